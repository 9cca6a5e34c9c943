//! The noise module graph.
//!
//! Every node lives in a [`NoiseGraph`] arena and refers to its sources through
//! [`NodeId`] handles, so a single node can feed any number of parents. Nodes are
//! added leaves first: [`NoiseGraph::add`] rejects handles that are not in the arena
//! yet, which keeps insertion order topological.
//!
//! Sampling goes through a typed [`Sampler`], created once per root and point
//! dimension. Creating it validates the whole subgraph (dimension support, cycles,
//! node-local rules); after that evaluation is infallible.
//!
//! ```
//! use strata_noise::graph::NoiseGraph;
//! use strata_noise::noise::ImprovedPerlin;
//! use strata_noise::fractal::SumFractal;
//!
//! let mut graph = NoiseGraph::new();
//! let perlin = graph.add(ImprovedPerlin::new(7)).unwrap();
//! let fbm = graph.add(SumFractal::new(perlin)).unwrap();
//!
//! let sampler = graph.sampler::<[f32; 3]>(fbm).unwrap();
//! let value = sampler.get([0.5, 1.25, -3.0]);
//! assert!(value.is_finite());
//! ```

mod point;
mod validate;

use std::fmt;

use bitflags::bitflags;
use enum_dispatch::enum_dispatch;
use smallvec::SmallVec;

pub use point::{Point, Sampler};

use crate::combiner::Combine;
use crate::error::NoiseError;
use crate::fractal::{
    Billow, HeterogeneousMultiFractal, HybridMultiFractal, MultiFractal, Pipe, RidgedMultiFractal,
    SinFractal, SumFractal, Voronoi,
};
use crate::modifier::{Clamp, Curve, Exponent, Invert, ScaleBias, Terrace};
use crate::noise::{
    Checkerboard, Constant, Cylinders, ImprovedPerlin, SimplexPerlin, Spheres, ValueNoise,
};
use crate::selector::{Blend, Select};
use crate::transform::{Displace, RotatePoint, ScalePoint, TranslatePoint, Turbulence};

/// Source handles of a node. Four inline slots cover every node kind.
pub type Sources = SmallVec<[NodeId; 4]>;

/// Handle to a node inside a [`NoiseGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Index of the node in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// Set of point dimensions a node can be evaluated in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Dimensions: u8 {
        /// `f(x)`
        const ONE = 1;
        /// `f(x, y)`
        const TWO = 1 << 1;
        /// `f(x, y, z)`
        const THREE = 1 << 2;
        /// `f(x, y, z, w)`
        const FOUR = 1 << 3;
    }
}

impl Dimensions {
    /// The single flag for an `n`-dimensional point, or empty for anything outside `1..=4`.
    #[must_use]
    pub const fn of(dimension: usize) -> Self {
        match dimension {
            1 => Self::ONE,
            2 => Self::TWO,
            3 => Self::THREE,
            4 => Self::FOUR,
            _ => Self::empty(),
        }
    }
}

/// Evaluation contract shared by every node.
///
/// A node declares which dimensions it supports; the graph only ever calls the
/// `get_value_*` methods a node declares, so the defaults for the others are never
/// reached from a validated [`Sampler`].
#[enum_dispatch]
pub trait Module {
    /// Dimensions this node can evaluate by itself, ignoring its sources.
    fn dimensions(&self) -> Dimensions;

    /// Handles of the nodes this node reads from.
    fn sources(&self) -> Sources {
        Sources::new()
    }

    /// Node-local configuration check, run when a sampler is created.
    fn validate(&self) -> Result<(), NoiseError> {
        Ok(())
    }

    /// Value at a 1D point.
    fn get_value_1d(&self, _graph: &NoiseGraph, _x: f32) -> f32 {
        0.0
    }

    /// Value at a 2D point.
    fn get_value_2d(&self, _graph: &NoiseGraph, _x: f32, _y: f32) -> f32 {
        0.0
    }

    /// Value at a 3D point.
    fn get_value_3d(&self, _graph: &NoiseGraph, _x: f32, _y: f32, _z: f32) -> f32 {
        0.0
    }

    /// Value at a 4D point.
    fn get_value_4d(&self, _graph: &NoiseGraph, _x: f32, _y: f32, _z: f32, _w: f32) -> f32 {
        0.0
    }
}

/// Implements every `get_value_*` method of [`Module`] by forwarding to a generic
/// `sample<P: Point>(&self, graph, point)` inherent method.
macro_rules! sample_every_dimension {
    () => {
        fn get_value_1d(&self, graph: &$crate::graph::NoiseGraph, x: f32) -> f32 {
            self.sample(graph, [x])
        }

        fn get_value_2d(&self, graph: &$crate::graph::NoiseGraph, x: f32, y: f32) -> f32 {
            self.sample(graph, [x, y])
        }

        fn get_value_3d(&self, graph: &$crate::graph::NoiseGraph, x: f32, y: f32, z: f32) -> f32 {
            self.sample(graph, [x, y, z])
        }

        fn get_value_4d(
            &self,
            graph: &$crate::graph::NoiseGraph,
            x: f32,
            y: f32,
            z: f32,
            w: f32,
        ) -> f32 {
            self.sample(graph, [x, y, z, w])
        }
    };
}
pub(crate) use sample_every_dimension;

// ── Node enum (dispatch wrapper) ────────────────────────────────────────────

/// Any node of the graph.
///
/// Each variant wraps its own struct; `From` conversions for every variant are
/// generated, so `graph.add(Invert::new(id))` works directly.
#[enum_dispatch(Module)]
#[derive(Debug, Clone)]
pub enum Node {
    /// Fixed value.
    Constant(Constant),
    /// Unit-cell checkerboard.
    Checkerboard(Checkerboard),
    /// Concentric spherical shells.
    Spheres(Spheres),
    /// Concentric cylindrical shells.
    Cylinders(Cylinders),
    /// Lattice value noise.
    ValueNoise(ValueNoise),
    /// Improved Perlin gradient noise.
    ImprovedPerlin(ImprovedPerlin),
    /// Simplex gradient noise.
    SimplexPerlin(SimplexPerlin),
    /// Fractional Brownian motion.
    SumFractal(SumFractal),
    /// `sin` of an absolute-value octave sum.
    SinFractal(SinFractal),
    /// Absolute-value octave sum with scale and bias.
    Billow(Billow),
    /// Multiplicative octave product.
    MultiFractal(MultiFractal),
    /// Value-weighted octave sum.
    HeterogeneousMultiFractal(HeterogeneousMultiFractal),
    /// Weight-decaying octave sum.
    HybridMultiFractal(HybridMultiFractal),
    /// Squared inverted ridges.
    RidgedMultiFractal(RidgedMultiFractal),
    /// Frequency-only pass-through.
    Pipe(Pipe),
    /// Cellular noise.
    Voronoi(Voronoi),
    /// Output saturation.
    Clamp(Clamp),
    /// Output negation.
    Invert(Invert),
    /// Linear output remap.
    ScaleBias(ScaleBias),
    /// Power output remap.
    Exponent(Exponent),
    /// Cubic control-point remap.
    Curve(Curve),
    /// Terrace remap.
    Terrace(Terrace),
    /// Two-source combination.
    Combine(Combine),
    /// Control-driven switch.
    Select(Select),
    /// Control-driven cross-fade.
    Blend(Blend),
    /// Per-axis coordinate scale.
    ScalePoint(ScalePoint),
    /// Per-axis coordinate offset.
    TranslatePoint(TranslatePoint),
    /// Coordinate rotation.
    RotatePoint(RotatePoint),
    /// Coordinate displacement by three fields.
    Displace(Displace),
    /// Coordinate turbulence.
    Turbulence(Turbulence),
}

/// Typed access to one [`Node`] variant.
pub trait NodeKind: Sized {
    /// Borrows the variant if `node` holds it.
    fn from_node(node: &Node) -> Option<&Self>;

    /// Mutably borrows the variant if `node` holds it.
    fn from_node_mut(node: &mut Node) -> Option<&mut Self>;
}

macro_rules! node_kinds {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl NodeKind for $variant {
                fn from_node(node: &Node) -> Option<&Self> {
                    match node {
                        Node::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn from_node_mut(node: &mut Node) -> Option<&mut Self> {
                    match node {
                        Node::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )+

        impl Node {
            /// Variant name, used in diagnostics.
            #[must_use]
            pub const fn kind(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant),)+
                }
            }
        }
    };
}

node_kinds!(
    Constant,
    Checkerboard,
    Spheres,
    Cylinders,
    ValueNoise,
    ImprovedPerlin,
    SimplexPerlin,
    SumFractal,
    SinFractal,
    Billow,
    MultiFractal,
    HeterogeneousMultiFractal,
    HybridMultiFractal,
    RidgedMultiFractal,
    Pipe,
    Voronoi,
    Clamp,
    Invert,
    ScaleBias,
    Exponent,
    Curve,
    Terrace,
    Combine,
    Select,
    Blend,
    ScalePoint,
    TranslatePoint,
    RotatePoint,
    Displace,
    Turbulence,
);

// ── Arena ───────────────────────────────────────────────────────────────────

/// Arena owning every node of a noise graph.
#[derive(Debug, Clone, Default)]
pub struct NoiseGraph {
    nodes: Vec<Node>,
}

impl NoiseGraph {
    /// Creates an empty graph.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Creates an empty graph with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Adds a node and returns its handle.
    ///
    /// Every source of the node must already be in the graph.
    pub fn add(&mut self, node: impl Into<Node>) -> Result<NodeId, NoiseError> {
        let node = node.into();
        for source in node.sources() {
            if source.index() >= self.nodes.len() {
                return Err(NoiseError::UnknownNode(source));
            }
        }

        let id = NodeId(self.nodes.len() as u32);
        tracing::trace!(%id, kind = node.kind(), "added noise node");
        self.nodes.push(node);
        Ok(id)
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` refers to a node of this graph.
    #[must_use]
    pub const fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Handles of every node, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Borrows a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Borrows a node as a concrete kind.
    #[must_use]
    pub fn node<T: NodeKind>(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.index()).and_then(T::from_node)
    }

    /// Mutably borrows a node as a concrete kind, to change its configuration.
    ///
    /// No [`Sampler`] can be alive while this borrow is held.
    pub fn node_mut<T: NodeKind>(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.index()).and_then(T::from_node_mut)
    }

    /// Creates a sampler for the subgraph rooted at `root`, evaluated at points of type `P`.
    pub fn sampler<P: Point>(&self, root: NodeId) -> Result<Sampler<'_, P>, NoiseError> {
        self.validate(root, Dimensions::of(P::DIMENSION))?;
        tracing::debug!(%root, dimension = P::DIMENSION, "noise graph validated");
        Ok(Sampler::new(self, root))
    }

    /// Dimensions every node under `root` supports.
    pub fn supported_dimensions(&self, root: NodeId) -> Result<Dimensions, NoiseError> {
        self.subgraph_dimensions(root)
    }

    /// Node lookup on the evaluation path. Handles are checked when a sampler is created.
    #[inline]
    pub(crate) fn at(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{Invert, ScaleBias};
    use crate::noise::{Constant, ImprovedPerlin, SimplexPerlin};

    #[test]
    fn add_rejects_unknown_sources() {
        let mut graph = NoiseGraph::new();
        let result = graph.add(Invert::new(NodeId(3)));
        assert_eq!(result, Err(NoiseError::UnknownNode(NodeId(3))));
        assert!(graph.is_empty());
    }

    #[test]
    #[allow(clippy::float_cmp, reason = "constants propagate exactly")]
    fn shared_child_feeds_many_parents() {
        let mut graph = NoiseGraph::new();
        let c = graph.add(Constant::new(0.25)).unwrap();
        let a = graph.add(Invert::new(c)).unwrap();
        let b = graph.add(ScaleBias::new(c, 2.0, 0.0)).unwrap();

        assert_eq!(graph.sampler::<[f32; 2]>(a).unwrap().get([0.0, 0.0]), -0.25);
        assert_eq!(graph.sampler::<[f32; 2]>(b).unwrap().get([0.0, 0.0]), 0.5);
    }

    #[test]
    fn sampler_rejects_unsupported_dimension() {
        let mut graph = NoiseGraph::new();
        let perlin = graph.add(ImprovedPerlin::new(0)).unwrap();
        let inverted = graph.add(Invert::new(perlin)).unwrap();

        let err = graph.sampler::<[f32; 4]>(inverted).unwrap_err();
        assert!(matches!(
            err,
            NoiseError::UnsupportedDimension { node, dimension: 4, .. } if node == perlin
        ));
    }

    #[test]
    fn supported_dimensions_intersect_sources() {
        let mut graph = NoiseGraph::new();
        let perlin = graph.add(ImprovedPerlin::new(0)).unwrap();
        let simplex = graph.add(SimplexPerlin::new(0)).unwrap();
        let sum = graph.add(crate::combiner::Combine::add(perlin, simplex)).unwrap();

        let dims = graph.supported_dimensions(sum).unwrap();
        assert_eq!(dims, Dimensions::TWO | Dimensions::THREE);
    }

    #[test]
    fn node_mut_changes_configuration() {
        let mut graph = NoiseGraph::new();
        let c = graph.add(Constant::new(0.0)).unwrap();
        graph.node_mut::<Constant>(c).unwrap().set_value(0.75);
        assert!(graph.node_mut::<Invert>(c).is_none());

        let value = graph.sampler::<[f32; 1]>(c).unwrap().get([3.0]);
        assert!((value - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn node_mut_can_introduce_cycle() {
        let mut graph = NoiseGraph::new();
        let c = graph.add(Constant::new(0.0)).unwrap();
        let a = graph.add(Invert::new(c)).unwrap();
        let b = graph.add(Invert::new(a)).unwrap();
        *graph.node_mut::<Invert>(a).unwrap() = Invert::new(b);

        assert!(matches!(
            graph.sampler::<[f32; 3]>(b),
            Err(NoiseError::Cycle(_))
        ));
    }

    #[test]
    fn kind_names_variant() {
        let node = Node::from(Constant::default());
        assert_eq!(node.kind(), "Constant");
    }

    #[test]
    fn graph_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoiseGraph>();
        assert_send_sync::<Sampler<'static, [f32; 3]>>();
    }
}
