//! Primitive noise generators.
//!
//! These are the leaves of a noise graph; none of them read from other nodes.
//!
//! - [`ValueNoise`] - Hashed lattice values, interpolated (1D-3D)
//! - [`ImprovedPerlin`] - Ken Perlin's improved gradient noise (1D-3D)
//! - [`SimplexPerlin`] - Simplex gradient noise (2D-4D)
//! - [`Constant`], [`Checkerboard`], [`Spheres`], [`Cylinders`] - Simple patterns

mod improved_noise;
mod permutation;
mod shapes;
mod simplex_noise;
mod value_noise;

use serde::Deserialize;

pub use improved_noise::ImprovedPerlin;
pub use permutation::PermutationTable;
pub use shapes::{Checkerboard, Constant, Cylinders, Spheres};
pub use simplex_noise::SimplexPerlin;
pub use value_noise::ValueNoise;

use crate::math::{s_curve3, s_curve5};

/// Gradient vectors shared between Perlin and simplex noise.
///
/// Entry `h` is the gradient Perlin's improved noise selects for `hash & 15`; the
/// first twelve are the cube edge midpoints simplex noise uses with `hash % 12`.
pub(crate) const GRADIENT: [[i32; 3]; 16] = [
    [1, 1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [-1, 0, 1],
    [1, 0, -1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, -1, 1],
    [0, 1, -1],
    [0, -1, -1],
    [1, 1, 0],
    [0, -1, 1],
    [-1, 1, 0],
    [0, -1, -1],
];

/// Smoothing curve applied to lattice fractions before interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseQuality {
    /// Linear blend. Visible creases at cell boundaries.
    Fast,
    /// Cubic S-curve. Continuous first derivative.
    #[default]
    Standard,
    /// Quintic S-curve. Continuous second derivative.
    Best,
}

impl NoiseQuality {
    /// Applies the quality's smoothing curve to a fraction in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn smooth(self, t: f32) -> f32 {
        match self {
            Self::Fast => t,
            Self::Standard => s_curve3(t),
            Self::Best => s_curve5(t),
        }
    }
}
