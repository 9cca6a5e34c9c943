//! `strata.json5` loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use strata_noise::{GraphDescription, NoiseQuality};

/// Config path used when none is given on the command line.
pub const DEFAULT_PATH: &str = "strata.json5";

/// Written to [`DEFAULT_PATH`] on first run.
const DEFAULT_CONFIG: &str = r#"// strata sampler configuration
{
  // Added to the seed of every noise primitive.
  seed: 0,
  // fast | standard | best. Used by primitives that do not set their own.
  quality: "standard",
  // Sampling threads; leave out to use every core.
  // threads: 4,

  probe: {
    // 2 samples the x/y plane at origin z; 3 samples the whole box.
    dimension: 3,
    origin: [0.0, 0.0, 0.0],
    extent: [4.0, 4.0, 4.0],
    // Samples per axis.
    resolution: 64,
  },

  graph: {
    root: "terrain",
    nodes: {
      base: { type: "perlin", seed: 7, quality: "best" },
      hills: { type: "billow", source: "base", frequency: 2.0, octave_count: 4.5 },
      terrain: { type: "select", control: "base", left: "hills", right: 0.25, lower: -0.2, upper: 0.2, edge_falloff: 0.1 },
    },
  },
}
"#;

/// Largest accepted samples-per-axis.
const MAX_RESOLUTION: usize = 4096;

/// Top-level sampler configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StrataConfig {
    /// Seed offset for every primitive.
    #[serde(default)]
    pub seed: i32,
    /// Default primitive quality.
    #[serde(default)]
    pub quality: NoiseQuality,
    /// Sampling thread count; `None` keeps rayon's default.
    #[serde(default)]
    pub threads: Option<usize>,
    /// Sampled lattice.
    pub probe: ProbeConfig,
    /// Graph to sample.
    pub graph: GraphDescription,
}

/// Regular lattice of sample points, one at each cell centre.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// Number of sampled axes.
    pub dimension: ProbeDimension,
    /// Lower corner.
    pub origin: [f32; 3],
    /// Size along each axis.
    pub extent: [f32; 3],
    /// Samples per axis.
    pub resolution: usize,
}

/// Probe dimensionality, written as `2` or `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum ProbeDimension {
    /// x/y plane at the origin's z.
    Two,
    /// Full box.
    Three,
}

impl TryFrom<u8> for ProbeDimension {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(format!("probe dimension must be 2 or 3, got {other}")),
        }
    }
}

impl ProbeConfig {
    fn validate(&self) -> Result<()> {
        ensure!(self.resolution > 0, "probe resolution must be positive");
        ensure!(
            self.resolution <= MAX_RESOLUTION,
            "probe resolution must be at most {MAX_RESOLUTION}, got {}",
            self.resolution
        );
        ensure!(
            self.extent.iter().all(|e| e.is_finite() && *e > 0.0),
            "probe extent must be finite and positive, got {:?}",
            self.extent
        );
        ensure!(
            self.origin.iter().all(|o| o.is_finite()),
            "probe origin must be finite, got {:?}",
            self.origin
        );
        Ok(())
    }
}

impl StrataConfig {
    /// Reads `path`, writing the default config there first if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            fs::write(path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write default config to {}", path.display()))?;
            log::info!("Wrote default config to {}", path.display());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::parse(&text).with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::debug!(probe = ?config.probe, seed = config.seed, "loaded config");
        Ok(config)
    }

    fn parse(text: &str) -> Result<Self> {
        let config: Self = serde_json5::from_str(text).context("Failed to parse config")?;
        config.probe.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses_and_builds() {
        let config = StrataConfig::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.probe.dimension, ProbeDimension::Three);
        assert_eq!(config.probe.resolution, 64);
        assert_eq!(config.threads, None);
        assert!(config.graph.build_with(config.seed, config.quality).is_ok());
    }

    #[test]
    fn rejects_bad_dimension() {
        let text = DEFAULT_CONFIG.replace("dimension: 3", "dimension: 4");
        assert!(StrataConfig::parse(&text).is_err());
    }

    #[test]
    fn rejects_empty_probe() {
        let text = DEFAULT_CONFIG.replace("resolution: 64", "resolution: 0");
        assert!(StrataConfig::parse(&text).is_err());
    }

    #[test]
    fn resolution_is_bounded() {
        let at_limit = DEFAULT_CONFIG.replace("resolution: 64", &format!("resolution: {MAX_RESOLUTION}"));
        assert!(StrataConfig::parse(&at_limit).is_ok());

        let huge = DEFAULT_CONFIG.replace("resolution: 64", "resolution: 4294967296");
        assert!(StrataConfig::parse(&huge).is_err());
    }
}
