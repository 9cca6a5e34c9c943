//! Cubic remap through control points.

use smallvec::smallvec;

use crate::error::NoiseError;
use crate::graph::{Dimensions, Module, NodeId, NoiseGraph, Point, Sources, sample_every_dimension};
use crate::math::{cerp, clamp_i32};

/// One `(input, output)` pair of a [`Curve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Source value this point matches.
    pub input: f32,
    /// Value emitted at `input`.
    pub output: f32,
}

impl ControlPoint {
    /// Creates a control point.
    #[must_use]
    pub const fn new(input: f32, output: f32) -> Self {
        Self { input, output }
    }
}

impl From<(f32, f32)> for ControlPoint {
    fn from((input, output): (f32, f32)) -> Self {
        Self::new(input, output)
    }
}

/// Remaps the source output along a cubic curve through its control points.
///
/// The two points around the source value and one more on each side feed a cubic
/// interpolation. Indices are clamped at the ends of the collection, so values
/// outside the first or last input take that endpoint's output.
#[derive(Debug, Clone)]
pub struct Curve {
    source: NodeId,
    points: Vec<ControlPoint>,
}

impl Curve {
    /// Fewest control points a curve can be sampled with.
    pub const MIN_CONTROL_POINTS: usize = 4;

    /// Creates a curve over `source` with no control points.
    #[must_use]
    pub const fn new(source: NodeId) -> Self {
        Self {
            source,
            points: Vec::new(),
        }
    }

    /// Source node.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Inserts a control point, keeping the collection sorted by input.
    ///
    /// Fails with [`NoiseError::DuplicateControlPoint`] if a point with this input
    /// already exists, or [`NoiseError::NanControlPoint`] if `input` is NaN; the
    /// collection is left unchanged.
    #[allow(clippy::float_cmp, reason = "inputs are compared as keys")]
    pub fn add_control_point(&mut self, input: f32, output: f32) -> Result<(), NoiseError> {
        if input.is_nan() {
            return Err(NoiseError::NanControlPoint);
        }
        if self.points.iter().any(|p| p.input == input) {
            return Err(NoiseError::DuplicateControlPoint(input));
        }
        let at = self.points.partition_point(|p| p.input < input);
        self.points.insert(at, ControlPoint::new(input, output));
        Ok(())
    }

    /// Removes every control point.
    pub fn clear_control_points(&mut self) {
        self.points.clear();
    }

    /// Control points, sorted by input.
    #[must_use]
    pub fn control_points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Number of control points.
    #[must_use]
    pub const fn control_point_count(&self) -> usize {
        self.points.len()
    }

    fn remap(&self, value: f32) -> f32 {
        let last = self.points.len() as i32 - 1;
        let position = self.points.partition_point(|p| p.input <= value) as i32;

        let index = |offset: i32| clamp_i32(position + offset, 0, last) as usize;
        let (i0, i1, i2, i3) = (index(-2), index(-1), index(0), index(1));

        if i1 == i2 {
            return self.points[i1].output;
        }

        let input0 = self.points[i1].input;
        let input1 = self.points[i2].input;
        let alpha = (value - input0) / (input1 - input0);

        cerp(
            self.points[i0].output,
            self.points[i1].output,
            self.points[i2].output,
            self.points[i3].output,
            alpha,
        )
    }

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        self.remap(point.evaluate(graph, self.source))
    }
}

impl Module for Curve {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    fn validate(&self) -> Result<(), NoiseError> {
        if self.points.len() < Self::MIN_CONTROL_POINTS {
            return Err(NoiseError::NotEnoughControlPoints {
                kind: "Curve",
                required: Self::MIN_CONTROL_POINTS,
                actual: self.points.len(),
            });
        }
        Ok(())
    }

    sample_every_dimension!();
}
