//! Cellular (Voronoi) noise.

use smallvec::smallvec;

use crate::graph::{Dimensions, Module, NodeId, NoiseGraph, Sources};
use crate::math::{SQRT_3, fast_floor};

/// Voronoi cells seeded by a source node.
///
/// Every unit cell holds one seed point at `cell + source(cell)` (the same offset
/// on all three axes). A point takes the value of the cell whose seed is nearest:
/// `displacement · source(⌊seed⌋)`, plus `√3 · distance − 1` when distance mode is on.
///
/// The source is sampled at integer coordinates only, so lattice-valued sources
/// such as [`ValueNoise`](crate::noise::ValueNoise) give distinct cells while
/// gradient noise (zero on the lattice) collapses them.
#[derive(Debug, Clone)]
pub struct Voronoi {
    source: NodeId,
    frequency: f32,
    displacement: f32,
    distance: bool,
}

impl Voronoi {
    /// Default cell value scale.
    pub const DEFAULT_DISPLACEMENT: f32 = 1.0;

    /// Creates Voronoi cells seeded by `source`, frequency 1, displacement 1,
    /// distance mode off.
    #[must_use]
    pub const fn new(source: NodeId) -> Self {
        Self {
            source,
            frequency: 1.0,
            displacement: Self::DEFAULT_DISPLACEMENT,
            distance: false,
        }
    }

    /// Source node.
    #[must_use]
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Cells per unit.
    #[must_use]
    pub const fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Sets the cells per unit.
    pub const fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
    }

    /// Scale applied to the cell value.
    #[must_use]
    pub const fn displacement(&self) -> f32 {
        self.displacement
    }

    /// Sets the scale applied to the cell value.
    pub const fn set_displacement(&mut self, displacement: f32) {
        self.displacement = displacement;
    }

    /// Whether the distance to the nearest seed is added to the output.
    #[must_use]
    pub const fn distance(&self) -> bool {
        self.distance
    }

    /// Enables or disables distance mode.
    pub const fn set_distance(&mut self, distance: bool) {
        self.distance = distance;
    }
}

impl Module for Voronoi {
    fn dimensions(&self) -> Dimensions {
        Dimensions::THREE
    }

    fn sources(&self) -> Sources {
        smallvec![self.source]
    }

    fn get_value_3d(&self, graph: &NoiseGraph, x: f32, y: f32, z: f32) -> f32 {
        let source = graph.at(self.source);
        let (x, y, z) = (x * self.frequency, y * self.frequency, z * self.frequency);
        let (xi, yi, zi) = (fast_floor(x), fast_floor(y), fast_floor(z));

        let mut min_dist = 2_147_483_647.0_f32;
        let mut candidate = (0.0_f32, 0.0_f32, 0.0_f32);

        for zc in zi - 2..=zi + 2 {
            for yc in yi - 2..=yi + 2 {
                for xc in xi - 2..=xi + 2 {
                    let (xc, yc, zc) = (xc as f32, yc as f32, zc as f32);
                    let offset = source.get_value_3d(graph, xc, yc, zc);
                    let seed = (xc + offset, yc + offset, zc + offset);

                    let (dx, dy, dz) = (seed.0 - x, seed.1 - y, seed.2 - z);
                    let dist = dx * dx + dy * dy + dz * dz;
                    if dist < min_dist {
                        min_dist = dist;
                        candidate = seed;
                    }
                }
            }
        }

        let value = if self.distance {
            let (dx, dy, dz) = (candidate.0 - x, candidate.1 - y, candidate.2 - z);
            f64::from(dx * dx + dy * dy + dz * dz).sqrt() as f32 * SQRT_3 - 1.0
        } else {
            0.0
        };

        value
            + self.displacement
                * source.get_value_3d(
                    graph,
                    candidate.0.floor(),
                    candidate.1.floor(),
                    candidate.2.floor(),
                )
    }
}
