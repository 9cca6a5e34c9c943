//! Lattice value noise.
//!
//! Each integer lattice point gets a pseudo-random value in `[-1, 1]` from an
//! integer hash of its coordinates and the seed; points in between interpolate the
//! surrounding corners with the quality's smoothing curve.

use crate::graph::{Dimensions, Module, NoiseGraph};
use crate::math::{fast_floor, lerp};
use crate::noise::NoiseQuality;

const X_NOISE_GEN: i32 = 1619;
const Y_NOISE_GEN: i32 = 31337;
const Z_NOISE_GEN: i32 = 6971;
const SEED_NOISE_GEN: i64 = 1013;

/// Integer lattice hash in `[0, 2^31)`.
///
/// The coordinate sum wraps in 32 bits, the polynomial in 64 bits.
#[inline]
const fn int_value(x: i32, y: i32, z: i32, seed: i32) -> i32 {
    let lattice = X_NOISE_GEN
        .wrapping_mul(x)
        .wrapping_add(Y_NOISE_GEN.wrapping_mul(y))
        .wrapping_add(Z_NOISE_GEN.wrapping_mul(z));
    let mut n = (lattice as i64 + SEED_NOISE_GEN * seed as i64) & 0x7fff_ffff;
    n ^= n >> 13;
    let h = n
        .wrapping_mul(n.wrapping_mul(n).wrapping_mul(60493).wrapping_add(19_990_303))
        .wrapping_add(1_376_312_589);
    (h as i32) & 0x7fff_ffff
}

/// Folds the lattice hash into `(-1, 1]`.
#[inline]
fn lattice_value(x: i32, y: i32, z: i32, seed: i32) -> f32 {
    1.0 - int_value(x, y, z, seed) as f32 / 1_073_741_824.0
}

/// Value noise generator.
#[derive(Debug, Clone, Default)]
pub struct ValueNoise {
    seed: i32,
    quality: NoiseQuality,
}

impl ValueNoise {
    /// Creates a generator with `seed` and [`NoiseQuality::Standard`].
    #[must_use]
    pub const fn new(seed: i32) -> Self {
        Self {
            seed,
            quality: NoiseQuality::Standard,
        }
    }

    /// Builder-style quality override.
    #[must_use]
    pub const fn with_quality(mut self, quality: NoiseQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Seed.
    #[must_use]
    pub const fn seed(&self) -> i32 {
        self.seed
    }

    /// Sets the seed.
    pub const fn set_seed(&mut self, seed: i32) {
        self.seed = seed;
    }

    /// Interpolation quality.
    #[must_use]
    pub const fn quality(&self) -> NoiseQuality {
        self.quality
    }

    /// Sets the interpolation quality.
    pub const fn set_quality(&mut self, quality: NoiseQuality) {
        self.quality = quality;
    }

    /// Raw value of the 1D lattice point `x`.
    #[must_use]
    pub fn value_1d(&self, x: i32) -> f32 {
        lattice_value(x, 0, 0, self.seed)
    }

    /// Raw value of the 2D lattice point `(x, y)`.
    #[must_use]
    pub fn value_2d(&self, x: i32, y: i32) -> f32 {
        lattice_value(x, y, 0, self.seed)
    }

    /// Raw value of the 3D lattice point `(x, y, z)`.
    #[must_use]
    pub fn value_3d(&self, x: i32, y: i32, z: i32) -> f32 {
        lattice_value(x, y, z, self.seed)
    }
}

impl Module for ValueNoise {
    fn dimensions(&self) -> Dimensions {
        Dimensions::ONE | Dimensions::TWO | Dimensions::THREE
    }

    fn get_value_1d(&self, _graph: &NoiseGraph, x: f32) -> f32 {
        let x0 = fast_floor(x);
        let xs = self.quality.smooth(x - x0 as f32);

        lerp(self.value_1d(x0), self.value_1d(x0 + 1), xs)
    }

    fn get_value_2d(&self, _graph: &NoiseGraph, x: f32, y: f32) -> f32 {
        let (x0, y0) = (fast_floor(x), fast_floor(y));
        let (x1, y1) = (x0 + 1, y0 + 1);
        let xs = self.quality.smooth(x - x0 as f32);
        let ys = self.quality.smooth(y - y0 as f32);

        let ix0 = lerp(self.value_2d(x0, y0), self.value_2d(x1, y0), xs);
        let ix1 = lerp(self.value_2d(x0, y1), self.value_2d(x1, y1), xs);
        lerp(ix0, ix1, ys)
    }

    fn get_value_3d(&self, _graph: &NoiseGraph, x: f32, y: f32, z: f32) -> f32 {
        let (x0, y0, z0) = (fast_floor(x), fast_floor(y), fast_floor(z));
        let (x1, y1, z1) = (x0 + 1, y0 + 1, z0 + 1);
        let xs = self.quality.smooth(x - x0 as f32);
        let ys = self.quality.smooth(y - y0 as f32);
        let zs = self.quality.smooth(z - z0 as f32);

        let ix0 = lerp(self.value_3d(x0, y0, z0), self.value_3d(x1, y0, z0), xs);
        let ix1 = lerp(self.value_3d(x0, y1, z0), self.value_3d(x1, y1, z0), xs);
        let iy0 = lerp(ix0, ix1, ys);

        let ix0 = lerp(self.value_3d(x0, y0, z1), self.value_3d(x1, y0, z1), xs);
        let ix1 = lerp(self.value_3d(x0, y1, z1), self.value_3d(x1, y1, z1), xs);
        let iy1 = lerp(ix0, ix1, ys);

        lerp(iy0, iy1, zs)
    }
}
