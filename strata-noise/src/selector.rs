//! Control-driven selection between two sources.

use smallvec::smallvec;

use crate::error::NoiseError;
use crate::graph::{Dimensions, Module, NodeId, NoiseGraph, Point, Sources, sample_every_dimension};
use crate::math::{lerp, s_curve3};

/// Picks `right` while the control value lies inside `[lower, upper]`, `left` otherwise.
///
/// A positive edge falloff replaces both hard edges with an S-curve cross-fade of
/// half-width `edge_falloff`, centred on the bound.
#[derive(Debug, Clone)]
pub struct Select {
    control: NodeId,
    left: NodeId,
    right: NodeId,
    lower: f32,
    upper: f32,
    edge_falloff: f32,
}

impl Select {
    /// Default lower bound.
    pub const DEFAULT_LOWER_BOUND: f32 = -1.0;
    /// Default upper bound.
    pub const DEFAULT_UPPER_BOUND: f32 = 1.0;
    /// Default edge falloff (hard switch).
    pub const DEFAULT_EDGE_FALLOFF: f32 = -1.0;

    /// Selects between `left` and `right` by `control`, with bounds `[-1, 1]` and no falloff.
    #[must_use]
    pub const fn new(control: NodeId, left: NodeId, right: NodeId) -> Self {
        Self {
            control,
            left,
            right,
            lower: Self::DEFAULT_LOWER_BOUND,
            upper: Self::DEFAULT_UPPER_BOUND,
            edge_falloff: Self::DEFAULT_EDGE_FALLOFF,
        }
    }

    /// Control source.
    #[must_use]
    pub const fn control(&self) -> NodeId {
        self.control
    }

    /// Source used outside the bounds.
    #[must_use]
    pub const fn left(&self) -> NodeId {
        self.left
    }

    /// Source used inside the bounds.
    #[must_use]
    pub const fn right(&self) -> NodeId {
        self.right
    }

    /// Lower bound.
    #[must_use]
    pub const fn lower_bound(&self) -> f32 {
        self.lower
    }

    /// Upper bound.
    #[must_use]
    pub const fn upper_bound(&self) -> f32 {
        self.upper
    }

    /// Half-width of the cross-fade at each bound; zero or less means a hard switch.
    #[must_use]
    pub const fn edge_falloff(&self) -> f32 {
        self.edge_falloff
    }

    /// Sets the selection range. Fails unless `lower < upper`.
    ///
    /// The current edge falloff is re-clamped to the new range.
    pub fn set_bounds(&mut self, lower: f32, upper: f32) -> Result<(), NoiseError> {
        if lower >= upper || lower.is_nan() || upper.is_nan() {
            return Err(NoiseError::InvalidBounds { lower, upper });
        }
        self.lower = lower;
        self.upper = upper;
        self.set_edge_falloff(self.edge_falloff);
        Ok(())
    }

    /// Sets the edge falloff, capped at half the selection range.
    pub fn set_edge_falloff(&mut self, edge_falloff: f32) {
        let half = (self.upper - self.lower) / 2.0;
        self.edge_falloff = edge_falloff.min(half);
    }

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        let control = point.evaluate(graph, self.control);
        let left = || point.evaluate(graph, self.left);
        let right = || point.evaluate(graph, self.right);

        let falloff = self.edge_falloff;
        if falloff <= 0.0 {
            return if control < self.lower || control > self.upper {
                left()
            } else {
                right()
            };
        }

        let fade = |edge: f32| s_curve3((control - (edge - falloff)) / (2.0 * falloff));
        if control < self.lower - falloff {
            left()
        } else if control < self.lower + falloff {
            lerp(left(), right(), fade(self.lower))
        } else if control < self.upper - falloff {
            right()
        } else if control < self.upper + falloff {
            lerp(right(), left(), fade(self.upper))
        } else {
            left()
        }
    }
}

impl Module for Select {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.control, self.left, self.right]
    }

    sample_every_dimension!();
}

/// Cross-fades from `left` to `right` as the control moves from -1 to 1.
#[derive(Debug, Clone)]
pub struct Blend {
    control: NodeId,
    left: NodeId,
    right: NodeId,
}

impl Blend {
    /// Blends `left` and `right` by `control`.
    #[must_use]
    pub const fn new(control: NodeId, left: NodeId, right: NodeId) -> Self {
        Self {
            control,
            left,
            right,
        }
    }

    /// Control source.
    #[must_use]
    pub const fn control(&self) -> NodeId {
        self.control
    }

    /// Source at control -1.
    #[must_use]
    pub const fn left(&self) -> NodeId {
        self.left
    }

    /// Source at control 1.
    #[must_use]
    pub const fn right(&self) -> NodeId {
        self.right
    }

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        let left = point.evaluate(graph, self.left);
        let right = point.evaluate(graph, self.right);
        let alpha = (point.evaluate(graph, self.control) + 1.0) / 2.0;
        lerp(left, right, alpha)
    }
}

impl Module for Blend {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.control, self.left, self.right]
    }

    sample_every_dimension!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::Constant;

    struct Fixture {
        graph: NoiseGraph,
        left: NodeId,
        right: NodeId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut graph = NoiseGraph::new();
            let left = graph.add(Constant::new(-1.0)).unwrap();
            let right = graph.add(Constant::new(1.0)).unwrap();
            Self { graph, left, right }
        }

        fn select(&mut self, control: f32, lower: f32, upper: f32, falloff: f32) -> f32 {
            let control = self.graph.add(Constant::new(control)).unwrap();
            let mut select = Select::new(control, self.left, self.right);
            select.set_bounds(lower, upper).unwrap();
            select.set_edge_falloff(falloff);
            let id = self.graph.add(select).unwrap();
            self.graph.sampler::<[f32; 3]>(id).unwrap().get([0.5, 0.5, 0.5])
        }
    }

    #[test]
    #[allow(clippy::float_cmp, reason = "hard switch returns source values")]
    fn hard_switch_boundaries() {
        let mut f = Fixture::new();
        assert_eq!(f.select(0.0, -0.2, 0.2, 0.0), 1.0);
        assert_eq!(f.select(0.5, -0.2, 0.2, 0.0), -1.0);
        assert_eq!(f.select(0.2, -0.2, 0.2, 0.0), 1.0);
    }

    #[test]
    fn falloff_fades_at_bound() {
        let mut f = Fixture::new();
        // exactly on the lower bound the fade is halfway
        assert!(f.select(-0.2, -0.2, 0.2, 0.1).abs() < 1e-5);
        assert!(f.select(0.2, -0.2, 0.2, 0.1).abs() < 1e-5);
        assert!((f.select(0.0, -0.2, 0.2, 0.1) - 1.0).abs() < 1e-6);
        assert!((f.select(-0.35, -0.2, 0.2, 0.1) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn falloff_is_capped_at_half_range() {
        let mut graph = NoiseGraph::new();
        let c = graph.add(Constant::default()).unwrap();
        let mut select = Select::new(c, c, c);
        select.set_bounds(0.0, 0.5).unwrap();
        select.set_edge_falloff(2.0);
        assert!((select.edge_falloff() - 0.25).abs() < f32::EPSILON);

        select.set_bounds(0.0, 0.2).unwrap();
        assert!((select.edge_falloff() - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let mut graph = NoiseGraph::new();
        let c = graph.add(Constant::default()).unwrap();
        let mut select = Select::new(c, c, c);
        assert!(select.set_bounds(0.5, 0.5).is_err());
        assert!((select.upper_bound() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn blend_maps_control_to_alpha() {
        let mut f = Fixture::new();
        let control = f.graph.add(Constant::new(0.5)).unwrap();
        let blend = f.graph.add(Blend::new(control, f.left, f.right)).unwrap();
        let value = f.graph.sampler::<[f32; 1]>(blend).unwrap().get([0.0]);
        assert!((value - 0.5).abs() < 1e-6);
    }
}
