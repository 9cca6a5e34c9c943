//! Simplex gradient noise in 2D, 3D and 4D.
//!
//! Shares the seeded permutation table of [`ImprovedPerlin`](super::ImprovedPerlin).
//! The input is skewed onto a simplex lattice, each corner contributes
//! `(r² - d²)⁴ · (g · d)`, and the sum is scaled to roughly fill `[-1, 1]`.

use crate::graph::{Dimensions, Module, NoiseGraph};
use crate::math::{SQRT_3, SQRT_5, fast_floor};
use crate::noise::{GRADIENT, NoiseQuality, PermutationTable};

/// Skewing factor for 2D simplex: `0.5 * (sqrt(3) - 1)`
const F2: f32 = 0.5 * (SQRT_3 - 1.0);
/// Unskewing factor for 2D simplex: `(3 - sqrt(3)) / 6`
const G2: f32 = (3.0 - SQRT_3) / 6.0;
const G22: f32 = G2 * 2.0 - 1.0;
/// Skewing factor for 3D simplex: `1/3`
const F3: f32 = 1.0 / 3.0;
/// Unskewing factor for 3D simplex: `1/6`
const G3: f32 = 1.0 / 6.0;
/// Skewing factor for 4D simplex: `(sqrt(5) - 1) / 4`
const F4: f32 = (SQRT_5 - 1.0) / 4.0;
/// Unskewing factor for 4D simplex: `(5 - sqrt(5)) / 20`
const G4: f32 = (5.0 - SQRT_5) / 20.0;
const G42: f32 = G4 * 2.0;
const G43: f32 = G4 * 3.0;
const G44: f32 = G4 * 4.0 - 1.0;

/// Gradients for 4D: midpoints of the 32 edges of a tesseract.
const GRADIENT_4D: [[i32; 4]; 32] = [
    [0, 1, 1, 1],
    [0, 1, 1, -1],
    [0, 1, -1, 1],
    [0, 1, -1, -1],
    [0, -1, 1, 1],
    [0, -1, 1, -1],
    [0, -1, -1, 1],
    [0, -1, -1, -1],
    [1, 0, 1, 1],
    [1, 0, 1, -1],
    [1, 0, -1, 1],
    [1, 0, -1, -1],
    [-1, 0, 1, 1],
    [-1, 0, 1, -1],
    [-1, 0, -1, 1],
    [-1, 0, -1, -1],
    [1, 1, 0, 1],
    [1, 1, 0, -1],
    [1, -1, 0, 1],
    [1, -1, 0, -1],
    [-1, 1, 0, 1],
    [-1, 1, 0, -1],
    [-1, -1, 0, 1],
    [-1, -1, 0, -1],
    [1, 1, 1, 0],
    [1, 1, -1, 0],
    [1, -1, 1, 0],
    [1, -1, -1, 0],
    [-1, 1, 1, 0],
    [-1, 1, -1, 0],
    [-1, -1, 1, 0],
    [-1, -1, -1, 0],
];

/// Corner traversal order of the 4D simplex, keyed by the 6-bit comparison code of
/// the cell-relative coordinates. Each entry ranks the axes: the axis ranked 3 is
/// stepped first, then 2, then 1. Unreachable codes are zero.
const SIMPLEX_4D: [[u8; 4]; 64] = [
    [0, 1, 2, 3],
    [0, 1, 3, 2],
    [0, 0, 0, 0],
    [0, 2, 3, 1],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [1, 2, 3, 0],
    [0, 2, 1, 3],
    [0, 0, 0, 0],
    [0, 3, 1, 2],
    [0, 3, 2, 1],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [1, 3, 2, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [1, 2, 0, 3],
    [0, 0, 0, 0],
    [1, 3, 0, 2],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [2, 3, 0, 1],
    [2, 3, 1, 0],
    [1, 0, 2, 3],
    [1, 0, 3, 2],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [2, 0, 3, 1],
    [0, 0, 0, 0],
    [2, 1, 3, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [2, 0, 1, 3],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [3, 0, 1, 2],
    [3, 0, 2, 1],
    [0, 0, 0, 0],
    [3, 1, 2, 0],
    [2, 1, 0, 3],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
    [3, 1, 0, 2],
    [0, 0, 0, 0],
    [3, 2, 0, 1],
    [3, 2, 1, 0],
];

/// Simplex noise generator.
///
/// Quality is stored for parity with the other lattice generators but does not
/// affect simplex output; the radial kernel is already smooth.
#[derive(Debug, Clone, Default)]
pub struct SimplexPerlin {
    seed: i32,
    quality: NoiseQuality,
    table: PermutationTable,
}

impl SimplexPerlin {
    /// Creates a generator with `seed`.
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

    /// Stored quality.
    #[must_use]
    pub const fn quality(&self) -> NoiseQuality {
        self.quality
    }

    /// Sets the stored quality.
    pub const fn set_quality(&mut self, quality: NoiseQuality) {
        self.quality = quality;
    }

    #[inline]
    const fn p(&self, index: usize) -> usize {
        self.table.get(index)
    }

    /// Corner contribution in 2D or 3D; `z` is zero for 2D.
    #[inline]
    fn corner_noise_3d(index: usize, x: f32, y: f32, z: f32, base: f32) -> f32 {
        let t0 = base - x * x - y * y - z * z;
        if t0 > 0.0 {
            let t0 = t0 * t0;
            let g = &GRADIENT[index];
            t0 * t0 * (g[0] as f32 * x + g[1] as f32 * y + g[2] as f32 * z)
        } else {
            0.0
        }
    }

    #[inline]
    fn corner_noise_4d(index: usize, x: f32, y: f32, z: f32, w: f32) -> f32 {
        let t0 = 0.6 - x * x - y * y - z * z - w * w;
        if t0 > 0.0 {
            let t0 = t0 * t0;
            let g = &GRADIENT_4D[index];
            t0 * t0 * (g[0] as f32 * x + g[1] as f32 * y + g[2] as f32 * z + g[3] as f32 * w)
        } else {
            0.0
        }
    }
}

impl Module for SimplexPerlin {
    fn dimensions(&self) -> Dimensions {
        Dimensions::TWO | Dimensions::THREE | Dimensions::FOUR
    }

    fn get_value_2d(&self, _graph: &NoiseGraph, x: f32, y: f32) -> f32 {
        let s = (x + y) * F2;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);
        let t = (i + j) as f32 * G2;
        let x0 = x - (i as f32 - t);
        let y0 = y - (j as f32 - t);

        // Lower triangle steps x first, upper triangle y first
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f32 + G2;
        let y1 = y0 - j1 as f32 + G2;
        let x2 = x0 + G22;
        let y2 = y0 + G22;

        let ii = (i & 0xFF) as usize;
        let jj = (j & 0xFF) as usize;
        let gi0 = self.p(ii + self.p(jj)) % 12;
        let gi1 = self.p(ii + i1 + self.p(jj + j1)) % 12;
        let gi2 = self.p(ii + 1 + self.p(jj + 1)) % 12;

        let n0 = Self::corner_noise_3d(gi0, x0, y0, 0.0, 0.5);
        let n1 = Self::corner_noise_3d(gi1, x1, y1, 0.0, 0.5);
        let n2 = Self::corner_noise_3d(gi2, x2, y2, 0.0, 0.5);

        70.0 * (n0 + n1 + n2)
    }

    fn get_value_3d(&self, _graph: &NoiseGraph, x: f32, y: f32, z: f32) -> f32 {
        let s = (x + y + z) * F3;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);
        let k = fast_floor(z + s);
        let t = (i + j + k) as f32 * G3;
        let x0 = x - (i as f32 - t);
        let y0 = y - (j as f32 - t);
        let z0 = z - (k as f32 - t);

        // Determine which simplex tetrahedron we're in
        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let x1 = x0 - i1 as f32 + G3;
        let y1 = y0 - j1 as f32 + G3;
        let z1 = z0 - k1 as f32 + G3;
        let x2 = x0 - i2 as f32 + F3;
        let y2 = y0 - j2 as f32 + F3;
        let z2 = z0 - k2 as f32 + F3;
        let x3 = x0 - 0.5;
        let y3 = y0 - 0.5;
        let z3 = z0 - 0.5;

        let ii = (i & 0xFF) as usize;
        let jj = (j & 0xFF) as usize;
        let kk = (k & 0xFF) as usize;
        let gi0 = self.p(ii + self.p(jj + self.p(kk))) % 12;
        let gi1 = self.p(ii + i1 + self.p(jj + j1 + self.p(kk + k1))) % 12;
        let gi2 = self.p(ii + i2 + self.p(jj + j2 + self.p(kk + k2))) % 12;
        let gi3 = self.p(ii + 1 + self.p(jj + 1 + self.p(kk + 1))) % 12;

        let n0 = Self::corner_noise_3d(gi0, x0, y0, z0, 0.6);
        let n1 = Self::corner_noise_3d(gi1, x1, y1, z1, 0.6);
        let n2 = Self::corner_noise_3d(gi2, x2, y2, z2, 0.6);
        let n3 = Self::corner_noise_3d(gi3, x3, y3, z3, 0.6);

        32.0 * (n0 + n1 + n2 + n3)
    }

    fn get_value_4d(&self, _graph: &NoiseGraph, x: f32, y: f32, z: f32, w: f32) -> f32 {
        let s = (x + y + z + w) * F4;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);
        let k = fast_floor(z + s);
        let l = fast_floor(w + s);
        let t = (i + j + k + l) as f32 * G4;
        let x0 = x - (i as f32 - t);
        let y0 = y - (j as f32 - t);
        let z0 = z - (k as f32 - t);
        let w0 = w - (l as f32 - t);

        let mut c = 0;
        if x0 > y0 {
            c |= 0x20;
        }
        if x0 > z0 {
            c |= 0x10;
        }
        if y0 > z0 {
            c |= 0x08;
        }
        if x0 > w0 {
            c |= 0x04;
        }
        if y0 > w0 {
            c |= 0x02;
        }
        if z0 > w0 {
            c |= 0x01;
        }

        let sc = SIMPLEX_4D[c];
        let step = |rank: u8| sc.map(|axis| usize::from(axis >= rank));
        let [i1, j1, k1, l1] = step(3);
        let [i2, j2, k2, l2] = step(2);
        let [i3, j3, k3, l3] = step(1);

        let x1 = x0 - i1 as f32 + G4;
        let y1 = y0 - j1 as f32 + G4;
        let z1 = z0 - k1 as f32 + G4;
        let w1 = w0 - l1 as f32 + G4;
        let x2 = x0 - i2 as f32 + G42;
        let y2 = y0 - j2 as f32 + G42;
        let z2 = z0 - k2 as f32 + G42;
        let w2 = w0 - l2 as f32 + G42;
        let x3 = x0 - i3 as f32 + G43;
        let y3 = y0 - j3 as f32 + G43;
        let z3 = z0 - k3 as f32 + G43;
        let w3 = w0 - l3 as f32 + G43;
        let x4 = x0 + G44;
        let y4 = y0 + G44;
        let z4 = z0 + G44;
        let w4 = w0 + G44;

        let ii = (i & 0xFF) as usize;
        let jj = (j & 0xFF) as usize;
        let kk = (k & 0xFF) as usize;
        let ll = (l & 0xFF) as usize;
        let hash = |di: usize, dj: usize, dk: usize, dl: usize| {
            self.p(ii + di + self.p(jj + dj + self.p(kk + dk + self.p(ll + dl)))) % 32
        };

        let n0 = Self::corner_noise_4d(hash(0, 0, 0, 0), x0, y0, z0, w0);
        let n1 = Self::corner_noise_4d(hash(i1, j1, k1, l1), x1, y1, z1, w1);
        let n2 = Self::corner_noise_4d(hash(i2, j2, k2, l2), x2, y2, z2, w2);
        let n3 = Self::corner_noise_4d(hash(i3, j3, k3, l3), x3, y3, z3, w3);
        let n4 = Self::corner_noise_4d(hash(1, 1, 1, 1), x4, y4, z4, w4);

        27.0 * (n0 + n1 + n2 + n3 + n4)
    }
}
