//! Ridged multifractal.

use smallvec::smallvec;

use crate::fractal::{FractalParams, fractal_params_accessors};
use crate::graph::{Dimensions, Module, NodeId, NoiseGraph, Point, Sources, sample_every_dimension};
use crate::math::clamp01;

/// Sharp ridges: each octave is `(offset - |signal|)²`, weighted by the previous
/// octave's ridge times gain.
///
/// A fractional octave count has no partial octave here; accumulation also stops
/// early once the ridge weight drops to 0.001.
#[derive(Debug, Clone)]
pub struct RidgedMultiFractal {
    source: NodeId,
    params: FractalParams,
}

impl RidgedMultiFractal {
    /// Creates a ridged multifractal over `source` (offset 1, gain 2, spectral exponent 0.9).
    #[must_use]
    pub fn new(source: NodeId) -> Self {
        Self::with_params(source, FractalParams::with_shape(1.0, 2.0, 0.9))
    }

    /// Creates a ridged multifractal over `source` with explicit parameters.
    #[must_use]
    pub const fn with_params(source: NodeId, params: FractalParams) -> Self {
        Self { source, params }
    }

    fractal_params_accessors!();

    #[inline]
    fn ridge(&self, signal: f32) -> f32 {
        let signal = self.params.offset() - signal.abs();
        signal * signal
    }

    fn sample<P: Point>(&self, graph: &NoiseGraph, point: P) -> f32 {
        let params = &self.params;
        let mut point = point.scale(params.frequency());

        let mut signal = self.ridge(point.evaluate(graph, self.source));
        let mut value = signal;
        let mut weight = 1.0;

        let octaves = params.whole_octaves();
        let mut octave = 1;
        while weight > 0.001 && octave < octaves {
            point = point.scale(params.lacunarity());
            weight = clamp01(signal * params.gain());
            signal = self.ridge(point.evaluate(graph, self.source)) * weight;
            value += signal * params.weight(octave);
            octave += 1;
        }

        value
    }
}

impl Module for RidgedMultiFractal {
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
    use crate::noise::{Constant, SimplexPerlin};

    #[test]
    fn ridge_at_zero_crossing_is_offset_squared() {
        let mut graph = NoiseGraph::new();
        let c = graph.add(Constant::new(0.0)).unwrap();
        let mut ridged = RidgedMultiFractal::new(c);
        ridged.params_mut().set_octave_count(2.0);
        let w1 = ridged.params().weights()[1];
        let ridged = graph.add(ridged).unwrap();

        // first octave 1, weight clamp01(1 * 2) = 1, second octave 1 * w1
        let value = graph.sampler::<[f32; 2]>(ridged).unwrap().get([0.5, 0.5]);
        assert!((value - (1.0 + w1)).abs() < 1e-6);
    }

    #[test]
    fn saturated_signal_stops_early() {
        let mut graph = NoiseGraph::new();
        let c = graph.add(Constant::new(1.0)).unwrap();
        let ridged = graph.add(RidgedMultiFractal::new(c)).unwrap();

        let value = graph.sampler::<[f32; 3]>(ridged).unwrap().get([0.0, 0.0, 0.0]);
        assert!(value.abs() < 1e-6);
    }

    #[test]
    fn ridged_simplex_is_non_negative() {
        let mut graph = NoiseGraph::new();
        let simplex = graph.add(SimplexPerlin::new(21)).unwrap();
        let ridged = graph.add(RidgedMultiFractal::new(simplex)).unwrap();
        let sampler = graph.sampler::<[f32; 3]>(ridged).unwrap();

        for i in 0..64 {
            let t = i as f32 * 0.173;
            assert!(sampler.get([t, -t, t * 0.5]) >= 0.0);
        }
    }
}
