//! Additive fractals: fBm, its sine-warped variant, and billow.

use smallvec::smallvec;

use crate::fractal::{FractalParams, fractal_params_accessors};
use crate::graph::{Dimensions, Module, NodeId, NoiseGraph, Point, Sources, sample_every_dimension};

/// Fractional Brownian motion: the weighted sum of every octave.
#[derive(Debug, Clone)]
pub struct SumFractal {
    source: NodeId,
    params: FractalParams,
}

impl SumFractal {
    /// Creates an fBm over `source` with default parameters.
    #[must_use]
    pub fn new(source: NodeId) -> Self {
        Self::with_params(source, FractalParams::default())
    }

    /// Creates an fBm over `source` with explicit parameters.
    #[must_use]
    pub const fn with_params(source: NodeId, params: FractalParams) -> Self {
        Self { source, params }
    }

    fractal_params_accessors!();

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        let params = &self.params;
        let mut point = point.scale(params.frequency());
        let mut value = 0.0;

        let octaves = params.whole_octaves();
        for octave in 0..octaves {
            value += point.evaluate(graph, self.source) * params.weight(octave);
            point = point.scale(params.lacunarity());
        }

        let remainder = params.remainder();
        if remainder > 0.0 {
            value += remainder * point.evaluate(graph, self.source) * params.weight(octaves);
        }

        value
    }
}

impl Module for SumFractal {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    sample_every_dimension!();
}

/// `sin(x + Σ|octave|)`: an absolute-value octave sum used as a phase offset
/// along the first axis, which gives marble-like veins.
#[derive(Debug, Clone)]
pub struct SinFractal {
    source: NodeId,
    params: FractalParams,
}

impl SinFractal {
    /// Creates a sine fractal over `source` with default parameters.
    #[must_use]
    pub fn new(source: NodeId) -> Self {
        Self::with_params(source, FractalParams::default())
    }

    /// Creates a sine fractal over `source` with explicit parameters.
    #[must_use]
    pub const fn with_params(source: NodeId, params: FractalParams) -> Self {
        Self { source, params }
    }

    fractal_params_accessors!();

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        let params = &self.params;
        let origin_x = point.x();
        let mut point = point.scale(params.frequency());
        let mut value = 0.0;

        let octaves = params.whole_octaves();
        for octave in 0..octaves {
            value += (point.evaluate(graph, self.source) * params.weight(octave)).abs();
            point = point.scale(params.lacunarity());
        }

        // The partial octave keeps its sign.
        let remainder = params.remainder();
        if remainder > 0.0 {
            value += remainder * point.evaluate(graph, self.source) * params.weight(octaves);
        }

        f64::from(origin_x + value).sin() as f32
    }
}

impl Module for SinFractal {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    sample_every_dimension!();
}

/// Billowy noise: each octave is folded to its absolute value, then scaled and biased.
#[derive(Debug, Clone)]
pub struct Billow {
    source: NodeId,
    params: FractalParams,
    scale: f32,
    bias: f32,
}

impl Billow {
    /// Default per-octave scale.
    pub const DEFAULT_SCALE: f32 = 1.0;
    /// Default per-octave bias.
    pub const DEFAULT_BIAS: f32 = 0.0;

    /// Creates billow noise over `source` with default parameters.
    #[must_use]
    pub fn new(source: NodeId) -> Self {
        Self::with_params(source, FractalParams::default())
    }

    /// Creates billow noise over `source` with explicit parameters.
    #[must_use]
    pub const fn with_params(source: NodeId, params: FractalParams) -> Self {
        Self {
            source,
            params,
            scale: Self::DEFAULT_SCALE,
            bias: Self::DEFAULT_BIAS,
        }
    }

    fractal_params_accessors!();

    /// Per-octave scale.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Sets the per-octave scale.
    pub const fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Per-octave bias.
    #[must_use]
    pub const fn bias(&self) -> f32 {
        self.bias
    }

    /// Sets the per-octave bias.
    pub const fn set_bias(&mut self, bias: f32) {
        self.bias = bias;
    }

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        let params = &self.params;
        let mut point = point.scale(params.frequency());
        let mut value = 0.0;

        let octaves = params.whole_octaves();
        for octave in 0..octaves {
            let signal = (point.evaluate(graph, self.source) * params.weight(octave)).abs();
            value += signal * self.scale + self.bias;
            point = point.scale(params.lacunarity());
        }

        let remainder = params.remainder();
        if remainder > 0.0 {
            let signal = point.evaluate(graph, self.source) * params.weight(octaves);
            value += self.scale * remainder * signal + self.bias;
        }

        value
    }
}

impl Module for Billow {
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
    use crate::noise::{Constant, ImprovedPerlin};

    fn graph_with(source: impl Into<crate::graph::Node>) -> (NoiseGraph, NodeId) {
        let mut graph = NoiseGraph::new();
        let id = graph.add(source).unwrap();
        (graph, id)
    }

    #[test]
    #[allow(clippy::float_cmp, reason = "single octave reduces to the source exactly")]
    fn single_octave_is_source() {
        let (mut graph, perlin) = graph_with(ImprovedPerlin::new(3));
        let mut fbm = SumFractal::new(perlin);
        fbm.params_mut().set_octave_count(1.0);
        let fbm = graph.add(fbm).unwrap();

        let fbm = graph.sampler::<[f32; 3]>(fbm).unwrap();
        let raw = graph.sampler::<[f32; 3]>(perlin).unwrap();
        for i in 0..20 {
            let p = [i as f32 * 0.37, i as f32 * -0.11, 1.3];
            assert_eq!(fbm.get(p), raw.get(p));
        }
    }

    #[test]
    fn constant_source_sums_weights() {
        let (mut graph, c) = graph_with(Constant::new(1.0));
        let mut fbm = SumFractal::new(c);
        fbm.params_mut().set_octave_count(3.5);
        let expected: f32 = fbm.params().weights()[..3].iter().sum::<f32>()
            + 0.5 * fbm.params().weights()[3];
        let fbm = graph.add(fbm).unwrap();

        let value = graph.sampler::<[f32; 2]>(fbm).unwrap().get([0.1, 0.2]);
        assert!((value - expected).abs() < 1e-5);
    }

    #[test]
    fn billow_folds_negative_octaves() {
        let (mut graph, c) = graph_with(Constant::new(-1.0));
        let mut billow = Billow::new(c);
        billow.params_mut().set_octave_count(2.0);
        billow.set_bias(0.5);
        let expected = 1.0 + 0.5 + 2.0_f32.powf(-0.9) + 0.5;
        let billow = graph.add(billow).unwrap();

        let value = graph.sampler::<[f32; 1]>(billow).unwrap().get([4.0]);
        assert!((value - expected).abs() < 1e-5);
    }

    #[test]
    fn sin_fractal_uses_original_x() {
        let (mut graph, c) = graph_with(Constant::new(0.0));
        let sin = graph.add(SinFractal::new(c)).unwrap();

        let value = graph.sampler::<[f32; 3]>(sin).unwrap().get([0.5, 9.0, 9.0]);
        assert!((value - 0.5_f32.sin()).abs() < 1e-6);
    }
}
