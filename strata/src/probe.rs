//! Parallel lattice sampling.
//!
//! The lattice is split into rows along x. Rows are sampled in parallel with rayon,
//! each into its own [`ProbeStats`], and the partial results are merged.

use rayon::prelude::*;
use strata_noise::{NodeId, NoiseError, NoiseGraph, Point, Sampler};

use crate::config::{ProbeConfig, ProbeDimension};

/// Summary of a sampling run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeStats {
    /// Finite samples taken.
    pub samples: usize,
    /// Samples that came out NaN or infinite.
    pub non_finite: usize,
    /// Smallest finite sample.
    pub min: f32,
    /// Largest finite sample.
    pub max: f32,
    sum: f64,
}

impl ProbeStats {
    const EMPTY: Self = Self {
        samples: 0,
        non_finite: 0,
        min: f32::MAX,
        max: f32::MIN,
        sum: 0.0,
    };

    fn push(&mut self, value: f32) {
        if !value.is_finite() {
            self.non_finite += 1;
            return;
        }
        self.samples += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += f64::from(value);
    }

    fn merge(self, other: Self) -> Self {
        Self {
            samples: self.samples + other.samples,
            non_finite: self.non_finite + other.non_finite,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
            sum: self.sum + other.sum,
        }
    }

    /// Mean of the finite samples, or NaN if there were none.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.samples == 0 {
            f64::NAN
        } else {
            self.sum / self.samples as f64
        }
    }
}

/// Samples `root` over the probe lattice, logging each finished row at debug level.
pub fn run(graph: &NoiseGraph, root: NodeId, probe: &ProbeConfig) -> Result<ProbeStats, NoiseError> {
    let _span = tracing::info_span!("probe", resolution = probe.resolution).entered();
    let on_row = |row: usize| log::debug!("row {row} done");

    Ok(match probe.dimension {
        ProbeDimension::Two => sample(graph.sampler(root)?, probe, |[x, y, _]| [x, y], on_row),
        ProbeDimension::Three => sample(graph.sampler(root)?, probe, |p| p, on_row),
    })
}

fn sample<P: Point>(
    sampler: Sampler<'_, P>,
    probe: &ProbeConfig,
    project: impl Fn([f32; 3]) -> P + Sync,
    on_row: impl Fn(usize) + Sync,
) -> ProbeStats {
    let n = probe.resolution;
    let step = probe.extent.map(|e| e / n as f32);
    let coord = |axis: usize, index: usize| probe.origin[axis] + (index as f32 + 0.5) * step[axis];

    let rows = match probe.dimension {
        ProbeDimension::Two => n,
        ProbeDimension::Three => n * n,
    };

    (0..rows)
        .into_par_iter()
        .map(|row| {
            let y = coord(1, row % n);
            let z = match probe.dimension {
                ProbeDimension::Two => probe.origin[2],
                ProbeDimension::Three => coord(2, row / n),
            };

            let mut stats = ProbeStats::EMPTY;
            for i in 0..n {
                stats.push(sampler.get(project([coord(0, i), y, z])));
            }
            on_row(row);
            stats
        })
        .reduce(|| ProbeStats::EMPTY, ProbeStats::merge)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use strata_noise::modifier::ScaleBias;
    use strata_noise::noise::{Constant, ImprovedPerlin, Spheres};

    use super::*;

    fn probe(dimension: ProbeDimension, resolution: usize) -> ProbeConfig {
        ProbeConfig {
            dimension,
            origin: [-1.0, -1.0, -1.0],
            extent: [2.0, 2.0, 2.0],
            resolution,
        }
    }

    #[test]
    fn constant_graph_stats() {
        let mut graph = NoiseGraph::new();
        let root = graph.add(Constant::new(0.25)).unwrap();
        let stats = run(&graph, root, &probe(ProbeDimension::Three, 8)).unwrap();

        assert_eq!(stats.samples, 512);
        assert_eq!(stats.non_finite, 0);
        assert!((stats.min - 0.25).abs() < f32::EPSILON);
        assert!((stats.max - 0.25).abs() < f32::EPSILON);
        assert!((stats.mean() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn every_row_is_reported() {
        let mut graph = NoiseGraph::new();
        let perlin = graph.add(ImprovedPerlin::new(3)).unwrap();
        let root = graph.add(ScaleBias::new(perlin, 0.5, 0.0)).unwrap();
        let config = probe(ProbeDimension::Two, 16);

        let rows = AtomicUsize::new(0);
        let stats = sample(
            graph.sampler::<[f32; 2]>(root).unwrap(),
            &config,
            |[x, y, _]| [x, y],
            |_| {
                rows.fetch_add(1, Ordering::Relaxed);
            },
        );
        assert_eq!(rows.into_inner(), 16);
        assert_eq!(stats.samples, 256);
        assert!(stats.min >= -0.55 && stats.max <= 0.55);
    }

    #[test]
    fn two_dimensional_probe_needs_2d_graph() {
        let mut graph = NoiseGraph::new();
        let root = graph.add(Spheres::default()).unwrap();
        assert!(matches!(
            run(&graph, root, &probe(ProbeDimension::Two, 4)),
            Err(NoiseError::UnsupportedDimension { .. })
        ));
    }

    #[test]
    fn empty_stats_have_no_mean() {
        assert!(ProbeStats::EMPTY.mean().is_nan());
        let merged = ProbeStats::EMPTY.merge(ProbeStats::EMPTY);
        assert_eq!(merged.samples, 0);
    }
}
