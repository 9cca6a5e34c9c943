//! Two-source combiners.

use serde::Deserialize;
use smallvec::smallvec;

use crate::graph::{Dimensions, Module, NodeId, NoiseGraph, Point, Sources, sample_every_dimension};

/// How a [`Combine`] merges its two source values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineOp {
    /// `left + right`
    Add,
    /// `left · right`
    Multiply,
    /// `min(left, right)`, NaN if either side is NaN.
    Min,
    /// `max(left, right)`, NaN if either side is NaN.
    Max,
    /// `left ^ right`
    Power,
}

impl CombineOp {
    /// Applies the operation.
    #[inline]
    #[must_use]
    pub fn apply(self, left: f32, right: f32) -> f32 {
        match self {
            Self::Add => left + right,
            Self::Multiply => left * right,
            Self::Min => {
                if left <= right || left.is_nan() { left } else { right }
            }
            Self::Max => {
                if left >= right || left.is_nan() { left } else { right }
            }
            Self::Power => f64::from(left).powf(f64::from(right)) as f32,
        }
    }
}

/// Evaluates both sources at the same point and merges the results.
#[derive(Debug, Clone)]
pub struct Combine {
    op: CombineOp,
    left: NodeId,
    right: NodeId,
}

impl Combine {
    /// Combines `left` and `right` with `op`.
    #[must_use]
    pub const fn new(op: CombineOp, left: NodeId, right: NodeId) -> Self {
        Self { op, left, right }
    }

    /// `left + right`.
    #[must_use]
    pub const fn add(left: NodeId, right: NodeId) -> Self {
        Self::new(CombineOp::Add, left, right)
    }

    /// `left · right`.
    #[must_use]
    pub const fn multiply(left: NodeId, right: NodeId) -> Self {
        Self::new(CombineOp::Multiply, left, right)
    }

    /// `min(left, right)`.
    #[must_use]
    pub const fn min(left: NodeId, right: NodeId) -> Self {
        Self::new(CombineOp::Min, left, right)
    }

    /// `max(left, right)`.
    #[must_use]
    pub const fn max(left: NodeId, right: NodeId) -> Self {
        Self::new(CombineOp::Max, left, right)
    }

    /// `left ^ right`.
    #[must_use]
    pub const fn power(left: NodeId, right: NodeId) -> Self {
        Self::new(CombineOp::Power, left, right)
    }

    /// Operation.
    #[must_use]
    pub const fn op(&self) -> CombineOp {
        self.op
    }

    /// Changes the operation.
    pub const fn set_op(&mut self, op: CombineOp) {
        self.op = op;
    }

    /// Left source.
    #[must_use]
    pub const fn left(&self) -> NodeId {
        self.left
    }

    /// Right source.
    #[must_use]
    pub const fn right(&self) -> NodeId {
        self.right
    }

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        let left = point.evaluate(graph, self.left);
        let right = point.evaluate(graph, self.right);
        self.op.apply(left, right)
    }
}

impl Module for Combine {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.left, self.right]
    }

    sample_every_dimension!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::Constant;

    #[test]
    #[allow(clippy::float_cmp, reason = "exact arithmetic")]
    fn every_op() {
        assert_eq!(CombineOp::Add.apply(2.0, 3.0), 5.0);
        assert_eq!(CombineOp::Multiply.apply(2.0, 3.0), 6.0);
        assert_eq!(CombineOp::Min.apply(2.0, 3.0), 2.0);
        assert_eq!(CombineOp::Max.apply(2.0, 3.0), 3.0);
        assert_eq!(CombineOp::Power.apply(2.0, 3.0), 8.0);
    }

    #[test]
    fn min_max_propagate_nan() {
        for op in [CombineOp::Min, CombineOp::Max] {
            assert!(op.apply(f32::NAN, 1.0).is_nan(), "{op:?}");
            assert!(op.apply(1.0, f32::NAN).is_nan(), "{op:?}");
        }
    }

    #[test]
    #[allow(clippy::float_cmp, reason = "exact arithmetic")]
    fn combines_sources_at_same_point() {
        let mut graph = NoiseGraph::new();
        let a = graph.add(Constant::new(0.25)).unwrap();
        let b = graph.add(Constant::new(-0.5)).unwrap();
        let max = graph.add(Combine::max(a, b)).unwrap();
        let power = graph.add(Combine::power(b, a)).unwrap();

        assert_eq!(graph.sampler::<[f32; 4]>(max).unwrap().get([1.0; 4]), 0.25);
        // a negative base with a fractional exponent has no real result
        assert!(graph.sampler::<[f32; 2]>(power).unwrap().get([0.0; 2]).is_nan());
    }

    #[test]
    fn op_names_deserialize() {
        let op: CombineOp = serde_json::from_str("\"multiply\"").unwrap();
        assert_eq!(op, CombineOp::Multiply);
    }
}
