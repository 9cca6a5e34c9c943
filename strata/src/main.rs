//! `strata` samples a noise graph described in a JSON5 config over a probe lattice
//! and logs summary statistics.
//!
//! Usage: `strata [config.json5]`. A default config is written when the file is missing.

mod config;
mod probe;

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::StrataConfig;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<()> {
    init_logging();

    let path = env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(config::DEFAULT_PATH), PathBuf::from);
    let config = StrataConfig::load(&path)?;

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the sampling thread pool")?;
    }

    let (graph, root) = config
        .graph
        .build_with(config.seed, config.quality)
        .context("Invalid graph description")?;
    log::info!(
        "Built noise graph with {} nodes (seed {}, {:?} quality)",
        graph.len(),
        config.seed,
        config.quality
    );

    let start = Instant::now();
    let stats = probe::run(&graph, root, &config.probe).context("Cannot sample graph")?;
    log::info!(
        "Sampled {} points in {:.2?}: min {:.4}, max {:.4}, mean {:.4}",
        stats.samples,
        start.elapsed(),
        stats.min,
        stats.max,
        stats.mean()
    );
    if stats.non_finite > 0 {
        log::warn!("{} samples were not finite", stats.non_finite);
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_line_number(true)
        .compact()
        .init();
}
