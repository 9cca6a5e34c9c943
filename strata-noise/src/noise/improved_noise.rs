//! Ken Perlin's improved gradient noise over a seeded permutation table.

use crate::graph::{Dimensions, Module, NoiseGraph};
use crate::math::{fast_floor, lerp};
use crate::noise::{GRADIENT, NoiseQuality, PermutationTable};

/// Improved Perlin noise generator.
///
/// Changing the seed regenerates the permutation table.
#[derive(Debug, Clone, Default)]
pub struct ImprovedPerlin {
    seed: i32,
    quality: NoiseQuality,
    pub(super) table: PermutationTable,
}

impl ImprovedPerlin {
    /// Creates a generator with `seed` and [`NoiseQuality::Standard`].
    #[must_use]
    pub fn new(seed: i32) -> Self {
        Self {
            seed,
            quality: NoiseQuality::Standard,
            table: PermutationTable::new(seed),
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

    /// Sets the seed, regenerating the permutation table if it changed.
    pub fn set_seed(&mut self, seed: i32) {
        if self.seed != seed {
            self.seed = seed;
            self.table = PermutationTable::new(seed);
        }
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

    #[inline]
    const fn p(&self, index: usize) -> usize {
        self.table.get(index)
    }

    #[inline]
    fn grad_3d(hash: usize, x: f32, y: f32, z: f32) -> f32 {
        let g = &GRADIENT[hash & 15];
        g[0] as f32 * x + g[1] as f32 * y + g[2] as f32 * z
    }

    #[inline]
    fn grad_2d(hash: usize, x: f32, y: f32) -> f32 {
        let u = if hash & 2 == 0 { x } else { -x };
        let v = if hash & 1 == 0 { y } else { -y };
        u + v
    }

    #[inline]
    fn grad_1d(hash: usize, x: f32) -> f32 {
        if hash & 1 == 0 { x } else { -x }
    }
}

/// Lattice cell (masked to the table) and fraction of `v`.
#[inline]
fn cell(v: f32) -> (usize, f32) {
    let floor = fast_floor(v);
    ((floor & 255) as usize, v - floor as f32)
}

impl Module for ImprovedPerlin {
    fn dimensions(&self) -> Dimensions {
        Dimensions::ONE | Dimensions::TWO | Dimensions::THREE
    }

    fn get_value_1d(&self, _graph: &NoiseGraph, x: f32) -> f32 {
        let (xi, x) = cell(x);
        let u = self.quality.smooth(x);

        lerp(
            Self::grad_1d(self.p(xi), x),
            Self::grad_1d(self.p(xi + 1), x - 1.0),
            u,
        )
    }

    fn get_value_2d(&self, _graph: &NoiseGraph, x: f32, y: f32) -> f32 {
        let (xi, x) = cell(x);
        let (yi, y) = cell(y);
        let u = self.quality.smooth(x);
        let v = self.quality.smooth(y);

        let a = self.p(xi) + yi;
        let b = self.p(xi + 1) + yi;

        lerp(
            lerp(
                Self::grad_2d(self.p(a), x, y),
                Self::grad_2d(self.p(b), x - 1.0, y),
                u,
            ),
            lerp(
                Self::grad_2d(self.p(a + 1), x, y - 1.0),
                Self::grad_2d(self.p(b + 1), x - 1.0, y - 1.0),
                u,
            ),
            v,
        )
    }

    fn get_value_3d(&self, _graph: &NoiseGraph, x: f32, y: f32, z: f32) -> f32 {
        let (xi, x) = cell(x);
        let (yi, y) = cell(y);
        let (zi, z) = cell(z);
        let u = self.quality.smooth(x);
        let v = self.quality.smooth(y);
        let w = self.quality.smooth(z);

        let a = self.p(xi) + yi;
        let aa = self.p(a) + zi;
        let ab = self.p(a + 1) + zi;
        let b = self.p(xi + 1) + yi;
        let ba = self.p(b) + zi;
        let bb = self.p(b + 1) + zi;

        lerp(
            lerp(
                lerp(
                    Self::grad_3d(self.p(aa), x, y, z),
                    Self::grad_3d(self.p(ba), x - 1.0, y, z),
                    u,
                ),
                lerp(
                    Self::grad_3d(self.p(ab), x, y - 1.0, z),
                    Self::grad_3d(self.p(bb), x - 1.0, y - 1.0, z),
                    u,
                ),
                v,
            ),
            lerp(
                lerp(
                    Self::grad_3d(self.p(aa + 1), x, y, z - 1.0),
                    Self::grad_3d(self.p(ba + 1), x - 1.0, y, z - 1.0),
                    u,
                ),
                lerp(
                    Self::grad_3d(self.p(ab + 1), x, y - 1.0, z - 1.0),
                    Self::grad_3d(self.p(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                    u,
                ),
                v,
            ),
            w,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_at_lattice_points() {
        let graph = NoiseGraph::new();
        let noise = ImprovedPerlin::new(11);
        for i in -3..3 {
            let p = i as f32;
            assert!(noise.get_value_3d(&graph, p + 0.5, p, p).is_finite());
            assert!(noise.get_value_3d(&graph, p, p, p).abs() < 1e-6);
            assert!(noise.get_value_2d(&graph, p, p).abs() < 1e-6);
            assert!(noise.get_value_1d(&graph, p).abs() < 1e-6);
        }
    }

    #[test]
    #[allow(clippy::float_cmp, reason = "determinism test")]
    fn set_seed_regenerates_table() {
        let graph = NoiseGraph::new();
        let mut noise = ImprovedPerlin::new(0);
        let before = noise.get_value_3d(&graph, 0.3, 0.7, 0.1);
        noise.set_seed(99);
        assert_eq!(noise.table, PermutationTable::new(99));
        noise.set_seed(0);
        assert_eq!(noise.get_value_3d(&graph, 0.3, 0.7, 0.1), before);
    }

    #[test]
    fn two_dimensional_varies_along_y() {
        let graph = NoiseGraph::new();
        let noise = ImprovedPerlin::new(5);
        let values: Vec<f32> = (0..16)
            .map(|i| noise.get_value_2d(&graph, 0.37, i as f32 * 0.31))
            .collect();
        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(max - min > 0.05, "2D Perlin should vary along y");
    }
}
