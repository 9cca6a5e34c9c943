//! Configuration errors for the noise graph.
//!
//! Evaluation itself never fails: every problem is reported when a node is
//! configured, added to a graph, or when a [`Sampler`](crate::graph::Sampler) is created.

use thiserror::Error;

use crate::graph::NodeId;

/// An invalid noise graph configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoiseError {
    /// A node refers to a handle that does not exist in the graph.
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),
    /// A node in the sampled subgraph cannot evaluate the requested dimension.
    #[error("Node {node} ({kind}) cannot be sampled in {dimension}D")]
    UnsupportedDimension {
        /// Offending node.
        node: NodeId,
        /// Node variant name.
        kind: &'static str,
        /// Requested dimension.
        dimension: usize,
    },
    /// The sampled subgraph is not acyclic.
    #[error("Cycle detected through node {0}")]
    Cycle(NodeId),
    /// A control point with this input value already exists.
    #[error("Duplicate control point input {0}")]
    DuplicateControlPoint(f32),
    /// A control point input is NaN and cannot be ordered.
    #[error("Control point input is not a number")]
    NanControlPoint,
    /// A curve or terrace has fewer control points than it needs.
    #[error("{kind} needs at least {required} control points, has {actual}")]
    NotEnoughControlPoints {
        /// Node variant name.
        kind: &'static str,
        /// Minimum point count.
        required: usize,
        /// Current point count.
        actual: usize,
    },
    /// Bounds are inverted, or empty where a non-empty range is needed.
    #[error("Invalid bounds [{lower}, {upper}]")]
    InvalidBounds {
        /// Lower bound.
        lower: f32,
        /// Upper bound.
        upper: f32,
    },
    /// A graph description names a node it does not define.
    #[error("Unknown node reference '{0}'")]
    UnknownReference(String),
    /// A graph description's named nodes refer to each other in a loop.
    #[error("Reference cycle through '{0}'")]
    ReferenceCycle(String),
}
