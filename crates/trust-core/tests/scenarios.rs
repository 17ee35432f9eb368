//! End-to-end scenarios
//!
//! Small grids whose outcome is known in advance, run through the public API.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use trust_core::config::{Config, SeedConfig};
use trust_core::systems::{frontier_candidates, run_round};
use trust_core::{
    create_simulation, Belief, Frontier, NodeId, NodeState, Population, Simulation,
    SimulationPhase,
};

fn config(width: usize, height: usize, seeds: Vec<SeedConfig>) -> Config {
    let mut config = Config::default();
    config.population.width = width;
    config.population.height = height;
    config.seeds = seeds;
    config
}

fn seed(belief: Belief, density: f64, confidence: f64) -> SeedConfig {
    SeedConfig {
        belief,
        density,
        confidence,
    }
}

/// A certain believer next to nodes with no confidence always convinces them
#[test]
fn test_two_by_two_certain_conviction() {
    let mut population = Population::build(2, 2, 0.0).unwrap();
    population
        .get_mut(NodeId(0))
        .unwrap()
        .set_belief(Belief::Positive, 1.0);
    let frontier = Frontier::from([NodeId(0)]);

    let candidates = frontier_candidates(&population, &frontier).unwrap();
    assert_eq!(candidates.len(), 3);

    for seed in 0..50 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let result = run_round(&population, &frontier, &mut rng).unwrap();
        assert_eq!(result.changes.len(), 3);
        for state in result.changes.values() {
            assert_eq!(*state, NodeState::new(Belief::Positive, 1.0));
        }
    }
}

#[test]
fn test_zero_density_is_stable_immediately() {
    let config = config(10, 10, vec![seed(Belief::Positive, 0.0, 0.9)]);
    let (mut sim, reports) = create_simulation(&config).unwrap();
    assert!(reports[0].seeded.is_empty());

    let summary = sim.run().unwrap();
    assert_eq!(sim.phase(), SimulationPhase::Stable);
    assert_eq!(summary.rounds, 0);
    assert_eq!(summary.total_changed, 0);
    assert_eq!(summary.final_counts.neutral, 100);
}

#[test]
fn test_full_density_leaves_nothing_to_contend() {
    let config = config(6, 6, vec![seed(Belief::Negative, 1.0, 0.4)]);
    let (mut sim, reports) = create_simulation(&config).unwrap();
    assert_eq!(reports[0].seeded.len(), 36);
    assert_eq!(sim.frontier().len(), 36);

    let report = sim.step().unwrap().unwrap();
    assert!(report.is_stable());
    assert_eq!(report.evaluated, 0);
    assert_eq!(sim.round(), 0);
    assert_eq!(sim.population().counts().negative, 36);
}

#[test]
fn test_runs_terminate_and_conserve_population() {
    for rng_seed in 0..20 {
        let mut config = config(
            12,
            9,
            vec![
                seed(Belief::Positive, 0.05, 0.8),
                seed(Belief::Negative, 0.05, 0.7),
            ],
        );
        config.simulation.rng_seed = rng_seed;

        let (mut sim, _) = create_simulation(&config).unwrap();
        let summary = sim.run().unwrap();

        assert_eq!(sim.phase(), SimulationPhase::Stable);
        assert_eq!(summary.final_counts.total(), 108);
        assert_eq!(summary.total_changed, sim.stats().total_changed);
        assert!(sim.frontier().is_empty());
        for node in sim.population().iter() {
            assert!((0.0..=1.0).contains(&node.confidence()));
        }
    }
}

#[test]
fn test_commit_is_atomic_per_round() {
    let config = config(
        15,
        15,
        vec![
            seed(Belief::Positive, 0.02, 0.9),
            seed(Belief::Negative, 0.02, 0.9),
        ],
    );
    let (mut sim, _) = create_simulation(&config).unwrap();

    while let Some(report) = sim.step().unwrap() {
        if report.is_stable() {
            break;
        }
        // Every committed change is in the next frontier, and nothing else
        assert_eq!(sim.frontier().len(), report.changed);
        for id in sim.frontier() {
            assert!(sim.population().get(*id).unwrap().previous().is_some());
        }
    }
}

#[test]
fn test_simulation_from_hand_built_population() {
    let mut population = Population::build(9, 1, 0.0).unwrap();
    population
        .get_mut(NodeId(4))
        .unwrap()
        .set_belief(Belief::Positive, 1.0);

    let mut sim = Simulation::new(
        population,
        Frontier::from([NodeId(4)]),
        SmallRng::seed_from_u64(0),
    );
    let summary = sim.run().unwrap();

    // A ring of nine floods outward four cells in each direction
    assert_eq!(summary.rounds, 4);
    assert_eq!(summary.final_counts.positive, 9);
}
