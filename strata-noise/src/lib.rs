//! Coherent noise built from a graph of small modules.
//!
//! Primitive generators (value noise, Perlin, simplex and a few geometric patterns)
//! feed fractal filters, modifiers, combiners, selectors and coordinate transforms.
//! Nodes live in a [`NoiseGraph`] arena and share their sources through [`NodeId`]
//! handles. A [`Sampler`] validates a subgraph once and then evaluates it at
//! `[f32; 1]` to `[f32; 4]` coordinates.
//!
//! Graphs can be written by hand through the builder API or loaded from JSON/JSON5
//! through [`description::GraphDescription`].

pub mod combiner;
pub mod description;
pub mod error;
pub mod fractal;
pub mod graph;
pub mod math;
pub mod modifier;
pub mod noise;
pub mod selector;
pub mod transform;

pub use description::GraphDescription;
pub use error::NoiseError;
pub use graph::{Dimensions, Module, Node, NodeId, NoiseGraph, Point, Sampler};
pub use noise::NoiseQuality;
