//! Round Observers
//!
//! The driver reports progress through observers instead of a global logger.
//! Observers only ever see the population after a round has been committed.

use bevy_ecs::prelude::*;
use trust_events::RunSummary;

use crate::components::Population;
use crate::systems::driver::RoundReport;

/// Receives the progress of a run
pub trait RoundObserver: Send + Sync {
    /// Called once with the freshly seeded population, before round 1.
    fn on_seeded(&mut self, _population: &Population) {}

    /// Called after every round, including the final one that changed nothing.
    fn on_round(&mut self, report: &RoundReport, population: &Population);

    /// Called once when the population has stabilised.
    fn on_stable(&mut self, _summary: &RunSummary, _population: &Population) {}
}

/// Resource: observers registered on a simulation
#[derive(Resource, Default)]
pub struct RoundObservers {
    observers: Vec<Box<dyn RoundObserver>>,
}

impl RoundObservers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, observer: impl RoundObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn seeded(&mut self, population: &Population) {
        for observer in &mut self.observers {
            observer.on_seeded(population);
        }
    }

    pub fn round(&mut self, report: &RoundReport, population: &Population) {
        for observer in &mut self.observers {
            observer.on_round(report, population);
        }
    }

    pub fn stable(&mut self, summary: &RunSummary, population: &Population) {
        for observer in &mut self.observers {
            observer.on_stable(summary, population);
        }
    }
}

/// Logs every round through `tracing`
///
/// Per-round statistics go out at `info`, the text map at `debug` and every
/// node with its links at `trace`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl TracingObserver {
    fn log_population(population: &Population) {
        tracing::debug!("\n{}", population.render_map());
        if tracing::enabled!(tracing::Level::TRACE) {
            for node in population.iter() {
                tracing::trace!("{}", node.pretty_display());
            }
        }
    }
}

impl RoundObserver for TracingObserver {
    fn on_seeded(&mut self, population: &Population) {
        let counts = population.counts();
        tracing::info!(
            neutral = counts.neutral,
            positive = counts.positive,
            negative = counts.negative,
            "Population seeded"
        );
        Self::log_population(population);
    }

    fn on_round(&mut self, report: &RoundReport, population: &Population) {
        if report.is_stable() {
            return;
        }
        tracing::info!(
            round = report.round,
            evaluated = report.evaluated,
            changed = report.changed,
            splits = report.splits,
            total_changed = report.total_changed,
            "Round committed"
        );
        if report.overcrowded > 0 {
            tracing::warn!(
                round = report.round,
                nodes = report.overcrowded,
                "Nodes skipped: more contending beliefs than the model resolves"
            );
        }
        Self::log_population(population);
    }

    fn on_stable(&mut self, summary: &RunSummary, _population: &Population) {
        tracing::info!(
            "Stabilisation took {} round(s), {} node(s) changed belief.",
            summary.rounds,
            summary.total_changed
        );
    }
}
