//! Game of Trust
//!
//! Seeds two competing beliefs into a toroidal grid and lets them spread until
//! the population stabilises. Logs go to stderr; with `--feed`, one JSON
//! snapshot per round goes to stdout for a viewer.

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use trust_core::config::{Config, DEFAULT_CONFIG_PATH};
use trust_core::output::{write_stats, JsonlFeed, TracingObserver};
use trust_core::{create_simulation, SimError};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "game_of_trust")]
#[command(about = "Simulates beliefs spreading through a population")]
struct Args {
    /// Configuration file; defaults are used if it does not exist
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Grid width, overrides the configuration
    #[arg(long)]
    width: Option<usize>,

    /// Grid height, overrides the configuration
    #[arg(long)]
    height: Option<usize>,

    /// Random seed for reproducibility, overrides the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Emit one JSON snapshot per round on stdout
    #[arg(long)]
    feed: bool,

    /// Write run statistics as JSON to this path
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] trust_core::ConfigError),
    #[error(transparent)]
    Simulation(#[from] SimError),
    #[error("could not write statistics: {0}")]
    Stats(#[from] io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    if args.print_default_config {
        println!("{}", Config::default().to_toml()?);
        return Ok(());
    }

    let mut config = Config::load_or_default(&args.config)?;
    if let Some(width) = args.width {
        config.population.width = width;
    }
    if let Some(height) = args.height {
        config.population.height = height;
    }
    if let Some(seed) = args.seed {
        config.simulation.rng_seed = seed;
    }
    config.validate().map_err(trust_core::ConfigError::from)?;

    tracing::info!(
        width = config.population.width,
        height = config.population.height,
        seed = config.simulation.rng_seed,
        "Starting simulation"
    );

    let (mut simulation, reports) = create_simulation(&config)?;
    for report in &reports {
        tracing::debug!(
            belief = %report.belief,
            requested = report.requested,
            seeded = report.seeded.len(),
            achieved_density = report.achieved_density,
            "Seed report"
        );
    }

    simulation.add_observer(TracingObserver);
    if args.feed {
        simulation.add_observer(JsonlFeed::new(io::stdout()));
    }

    let summary = simulation.run()?;

    if let Some(path) = &args.stats {
        let stats = simulation.stats().generate_stats(&summary);
        write_stats(&stats, path)?;
        tracing::info!(path = %path.display(), "Wrote statistics");
    }

    Ok(())
}
