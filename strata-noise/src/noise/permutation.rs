//! Seeded permutation table shared by the gradient noise generators.

use std::fmt;

/// Ken Perlin's reference permutation of `0..256`.
const BASE: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// 512-entry permutation table: a seeded permutation of `0..256`, mirrored so that
/// nested lookups like `p[p[x] + y]` never need wrapping.
#[derive(Clone, PartialEq, Eq)]
pub struct PermutationTable {
    p: [u8; 512],
}

impl PermutationTable {
    /// Builds the table for `seed`.
    ///
    /// Every base entry is XORed with each of the seed's four little-endian bytes.
    /// Seed `0` reproduces the base permutation unchanged.
    #[must_use]
    pub fn new(seed: i32) -> Self {
        let fold = seed.to_le_bytes().iter().fold(0u8, |acc, byte| acc ^ byte);
        let mut p = [0u8; 512];
        for (i, &value) in BASE.iter().enumerate() {
            p[i] = value ^ fold;
            p[i + 256] = p[i];
        }
        tracing::trace!(seed, "generated permutation table");
        Self { p }
    }

    /// Entry at `index`, which must be below 512.
    #[inline]
    #[must_use]
    pub const fn get(&self, index: usize) -> usize {
        self.p[index] as usize
    }
}

impl Default for PermutationTable {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for PermutationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermutationTable")
            .field("head", &&self.p[..8])
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_is_base_permutation() {
        let table = PermutationTable::new(0);
        for (i, &value) in BASE.iter().enumerate() {
            assert_eq!(table.get(i), value as usize);
            assert_eq!(table.get(i + 256), value as usize);
        }
    }

    #[test]
    fn seeded_table_is_still_a_permutation() {
        let table = PermutationTable::new(0x1234_5678);
        let mut seen = [false; 256];
        for i in 0..256 {
            seen[table.get(i)] = true;
            assert_eq!(table.get(i), table.get(i + 256));
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn seed_changes_table() {
        assert_ne!(PermutationTable::new(1), PermutationTable::new(0));
    }
}
