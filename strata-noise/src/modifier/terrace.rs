//! Terrace-forming remap.

use std::mem;

use smallvec::smallvec;

use crate::error::NoiseError;
use crate::graph::{Dimensions, Module, NodeId, NoiseGraph, Point, Sources, sample_every_dimension};
use crate::math::{clamp_i32, lerp};

/// Remaps the source output into terraces.
///
/// Between two neighbouring terrace points the fraction travelled is squared before
/// interpolating, so the value rises slowly after each point and steeply before the
/// next one. With `invert` set the shape is mirrored inside every band.
#[derive(Debug, Clone)]
pub struct Terrace {
    source: NodeId,
    points: Vec<f32>,
    invert: bool,
}

impl Terrace {
    /// Fewest terrace points a terrace can be sampled with.
    pub const MIN_CONTROL_POINTS: usize = 2;

    /// Creates a terrace over `source` with no points.
    #[must_use]
    pub const fn new(source: NodeId) -> Self {
        Self {
            source,
            points: Vec::new(),
            invert: false,
        }
    }

    /// Source node.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Whether each band is mirrored.
    #[must_use]
    pub const fn invert(&self) -> bool {
        self.invert
    }

    /// Mirrors each band.
    pub const fn set_invert(&mut self, invert: bool) {
        self.invert = invert;
    }

    /// Inserts a terrace point, keeping the collection sorted.
    ///
    /// Fails with [`NoiseError::DuplicateControlPoint`] if the value is already present,
    /// or [`NoiseError::NanControlPoint`] if it is NaN.
    #[allow(clippy::float_cmp, reason = "points are compared as keys")]
    pub fn add_control_point(&mut self, value: f32) -> Result<(), NoiseError> {
        if value.is_nan() {
            return Err(NoiseError::NanControlPoint);
        }
        if self.points.iter().any(|&p| p == value) {
            return Err(NoiseError::DuplicateControlPoint(value));
        }
        let at = self.points.partition_point(|&p| p < value);
        self.points.insert(at, value);
        Ok(())
    }

    /// Replaces every point with `count` points spread evenly over `[-1, 1]`.
    pub fn make_control_points(&mut self, count: usize) -> Result<(), NoiseError> {
        if count < Self::MIN_CONTROL_POINTS {
            return Err(NoiseError::NotEnoughControlPoints {
                kind: "Terrace",
                required: Self::MIN_CONTROL_POINTS,
                actual: count,
            });
        }

        let step = 2.0 / (count as f32 - 1.0);
        self.points.clear();
        self.points.extend((0..count).map(|i| -1.0 + step * i as f32));
        Ok(())
    }

    /// Removes every point.
    pub fn clear_control_points(&mut self) {
        self.points.clear();
    }

    /// Terrace points, sorted ascending.
    #[must_use]
    pub fn control_points(&self) -> &[f32] {
        &self.points
    }

    /// Number of terrace points.
    #[must_use]
    pub const fn control_point_count(&self) -> usize {
        self.points.len()
    }

    fn remap(&self, value: f32) -> f32 {
        let last = self.points.len() as i32 - 1;
        let position = self.points.partition_point(|&p| p <= value) as i32;

        let i0 = clamp_i32(position - 1, 0, last) as usize;
        let i1 = clamp_i32(position, 0, last) as usize;
        if i0 == i1 {
            return self.points[i1];
        }

        let mut low = self.points[i0];
        let mut high = self.points[i1];
        let mut alpha = (value - low) / (high - low);
        if self.invert {
            alpha = 1.0 - alpha;
            mem::swap(&mut low, &mut high);
        }

        lerp(low, high, alpha * alpha)
    }

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        self.remap(point.evaluate(graph, self.source))
    }
}

impl Module for Terrace {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    fn validate(&self) -> Result<(), NoiseError> {
        if self.points.len() < Self::MIN_CONTROL_POINTS {
            return Err(NoiseError::NotEnoughControlPoints {
                kind: "Terrace",
                required: Self::MIN_CONTROL_POINTS,
                actual: self.points.len(),
            });
        }
        Ok(())
    }

    sample_every_dimension!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::Constant;

    fn terrace_at(value: f32, build: impl FnOnce(&mut Terrace)) -> f32 {
        let mut graph = NoiseGraph::new();
        let c = graph.add(Constant::new(value)).unwrap();
        let mut terrace = Terrace::new(c);
        build(&mut terrace);
        let terrace = graph.add(terrace).unwrap();
        graph.sampler::<[f32; 3]>(terrace).unwrap().get([0.0, 0.0, 0.0])
    }

    #[test]
    fn make_control_points_spans_unit_range() {
        let mut terrace = Terrace::new(NoiseGraph::new().add(Constant::default()).unwrap());
        terrace.make_control_points(5).unwrap();
        assert_eq!(terrace.control_points(), &[-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn make_control_points_needs_two() {
        let mut terrace = Terrace::new(NoiseGraph::new().add(Constant::default()).unwrap());
        terrace.add_control_point(0.3).unwrap();
        assert!(terrace.make_control_points(1).is_err());
        assert_eq!(terrace.control_point_count(), 1);
    }

    #[test]
    fn nan_point_is_rejected() {
        let mut terrace = Terrace::new(NoiseGraph::new().add(Constant::default()).unwrap());
        terrace.add_control_point(0.5).unwrap();
        assert_eq!(terrace.add_control_point(f32::NAN), Err(NoiseError::NanControlPoint));
        assert_eq!(terrace.add_control_point(f32::NAN), Err(NoiseError::NanControlPoint));
        assert_eq!(terrace.control_point_count(), 1);
    }

    #[test]
    #[allow(clippy::float_cmp, reason = "endpoints pass through")]
    fn endpoints_are_unchanged() {
        let five = |t: &mut Terrace| t.make_control_points(5).unwrap();
        assert_eq!(terrace_at(-1.0, five), -1.0);
        assert_eq!(terrace_at(1.0, five), 1.0);
    }

    #[test]
    fn band_is_squared() {
        let two = |t: &mut Terrace| t.make_control_points(2).unwrap();
        // halfway through [-1, 1] squares to a quarter of the band
        assert!((terrace_at(0.0, two) - (-0.5)).abs() < 1e-6);
    }

    #[test]
    fn invert_mirrors_band() {
        let inverted = |t: &mut Terrace| {
            t.make_control_points(2).unwrap();
            t.set_invert(true);
        };
        assert!((terrace_at(0.0, inverted) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn duplicate_point_is_rejected() {
        let mut terrace = Terrace::new(NoiseGraph::new().add(Constant::default()).unwrap());
        terrace.add_control_point(0.25).unwrap();
        assert_eq!(
            terrace.add_control_point(0.25),
            Err(NoiseError::DuplicateControlPoint(0.25))
        );
    }
}
