//! Multiplicative fractals.
//!
//! Unlike fBm, later octaves are scaled by what has been accumulated so far, so
//! rough areas get rougher and smooth areas stay smooth.

use smallvec::smallvec;

use crate::fractal::{FractalParams, fractal_params_accessors};
use crate::graph::{Dimensions, Module, NodeId, NoiseGraph, Point, Sources, sample_every_dimension};

/// Weight below which hybrid octaves stop contributing.
const WEIGHT_CUTOFF: f32 = 0.001;

/// Product of `offset + octave` over every octave, starting from `1`.
#[derive(Debug, Clone)]
pub struct MultiFractal {
    source: NodeId,
    params: FractalParams,
}

impl MultiFractal {
    /// Creates a multifractal over `source` with default parameters.
    #[must_use]
    pub fn new(source: NodeId) -> Self {
        Self::with_params(source, FractalParams::default())
    }

    /// Creates a multifractal over `source` with explicit parameters.
    #[must_use]
    pub const fn with_params(source: NodeId, params: FractalParams) -> Self {
        Self { source, params }
    }

    fractal_params_accessors!();

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        let params = &self.params;
        let mut point = point.scale(params.frequency());
        let mut value = 1.0;

        let octaves = params.whole_octaves();
        for octave in 0..octaves {
            value *= params.offset() + point.evaluate(graph, self.source) * params.weight(octave);
            point = point.scale(params.lacunarity());
        }

        let remainder = params.remainder();
        if remainder > 0.0 {
            value += remainder * point.evaluate(graph, self.source) * params.weight(octaves);
        }

        value
    }
}

impl Module for MultiFractal {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    sample_every_dimension!();
}

/// Heterogeneous terrain: each octave after the first is scaled by the running value.
#[derive(Debug, Clone)]
pub struct HeterogeneousMultiFractal {
    source: NodeId,
    params: FractalParams,
}

impl HeterogeneousMultiFractal {
    /// Creates a heterogeneous multifractal over `source` with default parameters.
    #[must_use]
    pub fn new(source: NodeId) -> Self {
        Self::with_params(source, FractalParams::default())
    }

    /// Creates a heterogeneous multifractal over `source` with explicit parameters.
    #[must_use]
    pub const fn with_params(source: NodeId, params: FractalParams) -> Self {
        Self { source, params }
    }

    fractal_params_accessors!();

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        let params = &self.params;
        let mut point = point.scale(params.frequency());

        let mut value = params.offset() + point.evaluate(graph, self.source);
        point = point.scale(params.lacunarity());

        let octaves = params.whole_octaves();
        for octave in 1..octaves {
            let signal = (params.offset() + point.evaluate(graph, self.source))
                * params.weight(octave)
                * value;
            value += signal;
            point = point.scale(params.lacunarity());
        }

        let remainder = params.remainder();
        if remainder > 0.0 {
            let signal = (params.offset() + point.evaluate(graph, self.source))
                * params.weight(octaves)
                * value
                * remainder;
            value += signal;
        }

        value
    }
}

impl Module for HeterogeneousMultiFractal {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    sample_every_dimension!();
}

/// Hybrid multifractal: octaves are scaled by a weight that tracks the previous
/// octave's signal and decays geometrically; accumulation stops once it is negligible.
#[derive(Debug, Clone)]
pub struct HybridMultiFractal {
    source: NodeId,
    params: FractalParams,
}

impl HybridMultiFractal {
    /// Default offset.
    pub const DEFAULT_OFFSET: f32 = 0.7;
    /// Default gain.
    pub const DEFAULT_GAIN: f32 = 1.0;
    /// Default spectral exponent.
    pub const DEFAULT_SPECTRAL_EXPONENT: f32 = 0.25;

    /// Creates a hybrid multifractal over `source` with its own defaults
    /// (offset 0.7, gain 1, spectral exponent 0.25).
    #[must_use]
    pub fn new(source: NodeId) -> Self {
        Self::with_params(source, Self::default_params())
    }

    /// Creates a hybrid multifractal over `source` with explicit parameters.
    #[must_use]
    pub const fn with_params(source: NodeId, params: FractalParams) -> Self {
        Self { source, params }
    }

    /// Default parameters for this variant.
    #[must_use]
    pub fn default_params() -> FractalParams {
        FractalParams::with_shape(
            Self::DEFAULT_OFFSET,
            Self::DEFAULT_GAIN,
            Self::DEFAULT_SPECTRAL_EXPONENT,
        )
    }

    fractal_params_accessors!();

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        let params = &self.params;
        let mut point = point.scale(params.frequency());

        let mut value = point.evaluate(graph, self.source) + params.offset();
        let mut weight = params.gain() * value;
        point = point.scale(params.lacunarity());

        let octaves = params.whole_octaves();
        let mut octave = 1;
        while weight > WEIGHT_CUTOFF && octave < octaves {
            weight = weight.min(1.0);
            let signal =
                (params.offset() + point.evaluate(graph, self.source)) * params.weight(octave) * weight;
            value += signal;
            weight *= params.gain() * signal;
            point = point.scale(params.lacunarity());
            octave += 1;
        }

        let remainder = params.remainder();
        if remainder > 0.0 {
            value += point.evaluate(graph, self.source) * params.weight(octave) * remainder;
        }

        value
    }
}

impl Module for HybridMultiFractal {
    fn dimensions(&self) -> Dimensions {
        Dimensions::all()
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    sample_every_dimension!();
}
