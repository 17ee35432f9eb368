//! Simulation Setup
//!
//! Builds the population described by a [`Config`], introduces the configured
//! beliefs, and wraps the result in a [`Simulation`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::components::{Population, SeedReport};
use crate::config::Config;
use crate::error::SimResult;
use crate::systems::{Frontier, Simulation};

/// Build the grid and introduce every configured belief, in order.
pub fn populate<R: Rng + ?Sized>(
    config: &Config,
    rng: &mut R,
) -> SimResult<(Population, Vec<SeedReport>)> {
    let mut population = Population::build(
        config.population.width,
        config.population.height,
        config.population.initial_confidence,
    )?;

    let reports = config
        .seeds
        .iter()
        .map(|seed| population.seed_belief(seed.belief, seed.density, seed.confidence, rng))
        .collect::<SimResult<Vec<_>>>()?;

    Ok((population, reports))
}

/// Union of every seeded node: the frontier of round 1.
pub fn seed_frontier(reports: &[SeedReport]) -> Frontier {
    reports
        .iter()
        .flat_map(|report| report.seeded.iter().copied())
        .collect()
}

/// Create a ready-to-run simulation from configuration.
pub fn create_simulation(config: &Config) -> SimResult<(Simulation, Vec<SeedReport>)> {
    let mut rng = SmallRng::seed_from_u64(config.simulation.rng_seed);
    let (population, reports) = populate(config, &mut rng)?;
    let frontier = seed_frontier(&reports);
    Ok((Simulation::new(population, frontier, rng), reports))
}
