//! Single-source output remaps.
//!
//! Modifiers never touch the sample point; they evaluate their source at the same
//! coordinate and reshape the scalar it returns. All of them work in every dimension
//! their source supports.

mod curve;
mod terrace;

pub use curve::{ControlPoint, Curve};
pub use terrace::Terrace;

use smallvec::smallvec;

use crate::error::NoiseError;
use crate::graph::{Dimensions, Module, NodeId, NoiseGraph, Point, Sources, sample_every_dimension};
use crate::math::{clamp, fast_floor};

/// Saturates the source output into `[lower, upper]`.
#[derive(Debug, Clone)]
pub struct Clamp {
    source: NodeId,
    lower: f32,
    upper: f32,
}

impl Clamp {
    /// Default lower bound.
    pub const DEFAULT_LOWER_BOUND: f32 = -1.0;
    /// Default upper bound.
    pub const DEFAULT_UPPER_BOUND: f32 = 1.0;

    /// Clamps `source` into `[-1, 1]`.
    #[must_use]
    pub const fn new(source: NodeId) -> Self {
        Self {
            source,
            lower: Self::DEFAULT_LOWER_BOUND,
            upper: Self::DEFAULT_UPPER_BOUND,
        }
    }

    /// Clamps `source` into `[lower, upper]`.
    pub fn with_bounds(source: NodeId, lower: f32, upper: f32) -> Result<Self, NoiseError> {
        let mut clamp = Self::new(source);
        clamp.set_bounds(lower, upper)?;
        Ok(clamp)
    }

    /// Source node.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
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

    /// Sets both bounds. Fails if `lower > upper`.
    pub fn set_bounds(&mut self, lower: f32, upper: f32) -> Result<(), NoiseError> {
        if lower > upper || lower.is_nan() || upper.is_nan() {
            return Err(NoiseError::InvalidBounds { lower, upper });
        }
        self.lower = lower;
        self.upper = upper;
        Ok(())
    }

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        clamp(point.evaluate(graph, self.source), self.lower, self.upper)
    }
}

impl Module for Clamp {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    sample_every_dimension!();
}

/// Negates the source output.
#[derive(Debug, Clone)]
pub struct Invert {
    source: NodeId,
}

impl Invert {
    /// Negates `source`.
    #[must_use]
    pub const fn new(source: NodeId) -> Self {
        Self { source }
    }

    /// Source node.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        -point.evaluate(graph, self.source)
    }
}

impl Module for Invert {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    sample_every_dimension!();
}

/// `source · scale + bias`.
#[derive(Debug, Clone)]
pub struct ScaleBias {
    source: NodeId,
    scale: f32,
    bias: f32,
}

impl ScaleBias {
    /// Default scale.
    pub const DEFAULT_SCALE: f32 = 1.0;
    /// Default bias.
    pub const DEFAULT_BIAS: f32 = 0.0;

    /// Remaps `source` linearly.
    #[must_use]
    pub const fn new(source: NodeId, scale: f32, bias: f32) -> Self {
        Self {
            source,
            scale,
            bias,
        }
    }

    /// Source node.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Scale.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Sets the scale.
    pub const fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Bias.
    #[must_use]
    pub const fn bias(&self) -> f32 {
        self.bias
    }

    /// Sets the bias.
    pub const fn set_bias(&mut self, bias: f32) {
        self.bias = bias;
    }

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        point.evaluate(graph, self.source) * self.scale + self.bias
    }
}

impl Module for ScaleBias {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    sample_every_dimension!();
}

/// Power remap: the source output is moved to `[0, 1]`, floored, raised to the
/// exponent and moved back with `· 2 − 1`.
///
/// The floor makes the result step-shaped: anything in `[-1, 1)` maps to the
/// bottom step. This is kept as-is for output compatibility.
#[derive(Debug, Clone)]
pub struct Exponent {
    source: NodeId,
    exponent: f32,
}

impl Exponent {
    /// Default exponent.
    pub const DEFAULT_EXPONENT: f32 = 1.0;

    /// Remaps `source` with exponent 1.
    #[must_use]
    pub const fn new(source: NodeId) -> Self {
        Self::with_exponent(source, Self::DEFAULT_EXPONENT)
    }

    /// Remaps `source` with an explicit exponent.
    #[must_use]
    pub const fn with_exponent(source: NodeId, exponent: f32) -> Self {
        Self { source, exponent }
    }

    /// Source node.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Exponent.
    #[must_use]
    pub const fn exponent(&self) -> f32 {
        self.exponent
    }

    /// Sets the exponent.
    pub const fn set_exponent(&mut self, exponent: f32) {
        self.exponent = exponent;
    }

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        let value = (point.evaluate(graph, self.source) + 1.0) / 2.0;
        let stepped = f64::from(fast_floor(value));
        stepped.powf(f64::from(self.exponent)) as f32 * 2.0 - 1.0
    }
}

impl Module for Exponent {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    sample_every_dimension!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::Constant;

    fn eval(graph: &NoiseGraph, id: NodeId) -> f32 {
        graph.sampler::<[f32; 3]>(id).unwrap().get([0.3, -1.2, 4.0])
    }

    #[test]
    #[allow(clippy::float_cmp, reason = "saturation is exact")]
    fn clamp_saturates_source() {
        let mut graph = NoiseGraph::new();
        let c = graph.add(Constant::new(3.0)).unwrap();
        let clamped = graph.add(Clamp::with_bounds(c, -0.5, 0.5).unwrap()).unwrap();
        assert_eq!(eval(&graph, clamped), 0.5);
    }

    #[test]
    fn clamp_rejects_inverted_bounds() {
        let mut graph = NoiseGraph::new();
        let c = graph.add(Constant::default()).unwrap();
        let mut clamp = Clamp::new(c);
        assert_eq!(
            clamp.set_bounds(1.0, -1.0),
            Err(NoiseError::InvalidBounds {
                lower: 1.0,
                upper: -1.0
            })
        );
        assert!((clamp.lower_bound() + 1.0).abs() < f32::EPSILON);
    }

    #[test]
    #[allow(clippy::float_cmp, reason = "exact arithmetic")]
    fn scale_bias_and_invert() {
        let mut graph = NoiseGraph::new();
        let c = graph.add(Constant::new(0.5)).unwrap();
        let scaled = graph.add(ScaleBias::new(c, 4.0, -1.0)).unwrap();
        let inverted = graph.add(Invert::new(scaled)).unwrap();
        assert_eq!(eval(&graph, scaled), 1.0);
        assert_eq!(eval(&graph, inverted), -1.0);
    }

    #[test]
    #[allow(clippy::float_cmp, reason = "step outputs are exact")]
    fn exponent_is_step_shaped() {
        let mut graph = NoiseGraph::new();
        let mid = graph.add(Constant::new(0.4)).unwrap();
        let top = graph.add(Constant::new(1.0)).unwrap();
        let mid = graph.add(Exponent::with_exponent(mid, 2.0)).unwrap();
        let top = graph.add(Exponent::with_exponent(top, 2.0)).unwrap();

        assert_eq!(eval(&graph, mid), -1.0);
        assert_eq!(eval(&graph, top), 1.0);
    }
}
