//! baseline — run the population model with default or JSON parameters.
//!
//! ```text
//! baseline [PARAMS.json] [STEPS] [OUTPUT_DIR]
//! ```
//!
//! Writes `step_summaries.csv` and `events.csv` to `OUTPUT_DIR` (default
//! `./output`).  Log verbosity follows `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use pd_core::Params;
use pd_output::{CsvWriter, StatisticsCollector};
use pd_sim::SimBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_STEPS:  u64  = 100;
const DEFAULT_OUTPUT: &str = "output";
const DEFAULT_SEED:   u64  = 42;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let params = match args.next() {
        Some(path) => Params::from_json_file(Path::new(&path))
            .with_context(|| format!("loading parameters from {path}"))?,
        None => Params::default(),
    };
    let steps: u64 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("step count {s:?} is not a number"))?,
        None => DEFAULT_STEPS,
    };
    let output = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_owned()));

    println!("=== baseline — popdyn population model ===");
    println!(
        "Agents: {}  |  Steps: {steps}  |  Timestep: {:?}  |  Fertility: {}",
        params.pop_size, params.timestep, params.fertility_type
    );

    let t0 = Instant::now();
    let seed = params.seed.unwrap_or(DEFAULT_SEED);
    let mut sim = SimBuilder::new(params).seed(seed).build()?;
    println!(
        "Setup: {} agents, {} jobs in {:.2?}",
        sim.population.len(),
        sim.market.len(),
        t0.elapsed()
    );

    let writer = CsvWriter::new(&output)
        .with_context(|| format!("creating output files in {}", output.display()))?;
    let mut stats = StatisticsCollector::new(writer);

    let t1 = Instant::now();
    sim.run(steps, &mut stats)?;
    if let Some(e) = stats.take_error() {
        return Err(e).context("writing statistics");
    }
    tracing::info!(steps = stats.steps(), output = %output.display(), "run complete");

    let summary = sim.population.summary();
    println!();
    println!("Finished at {} after {:.2?}", sim.clock.date(), t1.elapsed());
    println!(
        "Population {}  |  partnered {}  |  unemployment {}  |  benefit {:.3}",
        summary.population,
        summary.partnered,
        summary.unemployment.map_or_else(|| "n/a".to_owned(), |u| format!("{:.1}%", u * 100.0)),
        summary.benefit_level,
    );
    println!("Statistics written to {}", output.display());
    Ok(())
}
