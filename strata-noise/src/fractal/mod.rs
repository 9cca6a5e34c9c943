//! Octave-based fractal synthesis over a single source node.
//!
//! Every fractal samples its source at a growing frequency (`frequency · lacunarityⁱ`
//! for octave `i`), weights each octave by a precomputed spectral weight and folds
//! the samples together with a variant-specific formula:
//!
//! - [`SumFractal`], [`SinFractal`], [`Billow`] - additive
//! - [`MultiFractal`], [`HeterogeneousMultiFractal`], [`HybridMultiFractal`] - multiplicative
//! - [`RidgedMultiFractal`] - squared inverted ridges
//!
//! A fractional octave count adds one partial octave at the end, weighted by the
//! fractional part. [`Pipe`] and [`Voronoi`] share the frequency setting but do not
//! accumulate octaves.

mod multi;
mod pipe;
mod ridged;
mod sum;
mod voronoi;

pub use multi::{HeterogeneousMultiFractal, HybridMultiFractal, MultiFractal};
pub use pipe::Pipe;
pub use ridged::RidgedMultiFractal;
pub use sum::{Billow, SinFractal, SumFractal};
pub use voronoi::Voronoi;

use std::array;

use crate::math::clamp;

/// Upper bound on the octave count, and the size of the spectral weight table.
pub const MAX_OCTAVE: usize = 30;

/// Spectral weights `lacunarity^(-i · exponent)` for `i` in `0..MAX_OCTAVE`.
#[must_use]
pub fn spectral_weights(lacunarity: f32, exponent: f32) -> [f32; MAX_OCTAVE] {
    array::from_fn(|i| {
        f64::from(lacunarity).powf(f64::from(-(i as f32) * exponent)) as f32
    })
}

/// Configuration shared by the fractal nodes.
///
/// The spectral weights are derived from lacunarity and spectral exponent and are
/// recomputed by the setters of either.
#[derive(Debug, Clone, PartialEq)]
pub struct FractalParams {
    frequency: f32,
    lacunarity: f32,
    octave_count: f32,
    offset: f32,
    gain: f32,
    spectral_exponent: f32,
    weights: [f32; MAX_OCTAVE],
}

impl FractalParams {
    /// Default base frequency.
    pub const DEFAULT_FREQUENCY: f32 = 1.0;
    /// Default frequency multiplier per octave.
    pub const DEFAULT_LACUNARITY: f32 = 2.0;
    /// Default octave count.
    pub const DEFAULT_OCTAVE_COUNT: f32 = 6.0;
    /// Default offset.
    pub const DEFAULT_OFFSET: f32 = 1.0;
    /// Default gain.
    pub const DEFAULT_GAIN: f32 = 2.0;
    /// Default spectral exponent.
    pub const DEFAULT_SPECTRAL_EXPONENT: f32 = 0.9;

    /// Creates parameters with explicit offset, gain and spectral exponent and the
    /// default frequency, lacunarity and octave count.
    #[must_use]
    pub fn with_shape(offset: f32, gain: f32, spectral_exponent: f32) -> Self {
        Self {
            frequency: Self::DEFAULT_FREQUENCY,
            lacunarity: Self::DEFAULT_LACUNARITY,
            octave_count: Self::DEFAULT_OCTAVE_COUNT,
            offset,
            gain,
            spectral_exponent,
            weights: spectral_weights(Self::DEFAULT_LACUNARITY, spectral_exponent),
        }
    }

    /// Base frequency.
    #[must_use]
    pub const fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Sets the base frequency.
    pub const fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
    }

    /// Frequency multiplier per octave.
    #[must_use]
    pub const fn lacunarity(&self) -> f32 {
        self.lacunarity
    }

    /// Sets the lacunarity and recomputes the spectral weights.
    pub fn set_lacunarity(&mut self, lacunarity: f32) {
        self.lacunarity = lacunarity;
        self.weights = spectral_weights(self.lacunarity, self.spectral_exponent);
    }

    /// Octave count, in `[1, MAX_OCTAVE]`.
    #[must_use]
    pub const fn octave_count(&self) -> f32 {
        self.octave_count
    }

    /// Sets the octave count, clamped to `[1, MAX_OCTAVE]`.
    pub fn set_octave_count(&mut self, octave_count: f32) {
        self.octave_count = clamp(octave_count, 1.0, MAX_OCTAVE as f32);
    }

    /// Offset.
    #[must_use]
    pub const fn offset(&self) -> f32 {
        self.offset
    }

    /// Sets the offset.
    pub const fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    /// Gain.
    #[must_use]
    pub const fn gain(&self) -> f32 {
        self.gain
    }

    /// Sets the gain.
    pub const fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }

    /// Spectral exponent.
    #[must_use]
    pub const fn spectral_exponent(&self) -> f32 {
        self.spectral_exponent
    }

    /// Sets the spectral exponent and recomputes the spectral weights.
    pub fn set_spectral_exponent(&mut self, spectral_exponent: f32) {
        self.spectral_exponent = spectral_exponent;
        self.weights = spectral_weights(self.lacunarity, self.spectral_exponent);
    }

    /// Spectral weight of each octave.
    #[must_use]
    pub const fn weights(&self) -> &[f32; MAX_OCTAVE] {
        &self.weights
    }

    /// Number of whole octaves.
    #[inline]
    pub(crate) fn whole_octaves(&self) -> usize {
        self.octave_count as usize
    }

    /// Fractional part of the octave count.
    #[inline]
    pub(crate) fn remainder(&self) -> f32 {
        self.octave_count - self.octave_count.trunc()
    }

    #[inline]
    pub(crate) fn weight(&self, octave: usize) -> f32 {
        self.weights[octave]
    }
}

impl Default for FractalParams {
    fn default() -> Self {
        Self::with_shape(
            Self::DEFAULT_OFFSET,
            Self::DEFAULT_GAIN,
            Self::DEFAULT_SPECTRAL_EXPONENT,
        )
    }
}

/// Common accessors of a node built around [`FractalParams`].
macro_rules! fractal_params_accessors {
    () => {
        /// Fractal parameters.
        #[must_use]
        pub const fn params(&self) -> &$crate::fractal::FractalParams {
            &self.params
        }

        /// Mutable fractal parameters.
        pub const fn params_mut(&mut self) -> &mut $crate::fractal::FractalParams {
            &mut self.params
        }

        /// Source node.
        #[must_use]
        pub const fn source(&self) -> $crate::graph::NodeId {
            self.source
        }
    };
}
pub(crate) use fractal_params_accessors;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::float_cmp, reason = "weight zero is exactly one")]
    fn first_weight_is_one() {
        let params = FractalParams::default();
        assert_eq!(params.weights()[0], 1.0);
        assert!((params.weights()[1] - 2.0_f32.powf(-0.9)).abs() < 1e-6);
    }

    #[test]
    fn octave_count_is_clamped() {
        let mut params = FractalParams::default();
        params.set_octave_count(0.2);
        assert!((params.octave_count() - 1.0).abs() < f32::EPSILON);
        params.set_octave_count(45.0);
        assert!((params.octave_count() - 30.0).abs() < f32::EPSILON);
        assert!(params.remainder().abs() < f32::EPSILON);
    }

    #[test]
    fn setters_refresh_weights() {
        let mut params = FractalParams::default();
        params.set_lacunarity(3.0);
        assert_eq!(params.weights(), &spectral_weights(3.0, 0.9));
        params.set_spectral_exponent(0.5);
        assert_eq!(params.weights(), &spectral_weights(3.0, 0.5));
    }

    #[test]
    fn remainder_splits_count() {
        let mut params = FractalParams::default();
        params.set_octave_count(4.25);
        assert_eq!(params.whole_octaves(), 4);
        assert!((params.remainder() - 0.25).abs() < 1e-6);
    }
}
