//! Simulation Driver
//!
//! Runs rounds until the population stabilises. Each round is a pass of the
//! schedule `evaluate_round -> commit_round -> record_stats -> publish_round`
//! over the resources held by a [`Simulation`].

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use rand::rngs::SmallRng;
use trust_events::RunSummary;

use super::round::{run_round, Frontier, RoundResult};
use crate::components::Population;
use crate::error::{SimError, SimResult};
use crate::output::observer::{RoundObserver, RoundObservers};
use crate::output::stats::{record_stats, StatsCollector};
use crate::SimRng;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationPhase {
    /// Beliefs introduced, no round run yet
    Seeded,
    /// At least one round committed changes
    Running,
    /// A round produced no change; terminal
    Stable,
}

/// Resource: nodes changed by the last committed round (the seeds before round 1)
#[derive(Resource, Debug, Default)]
pub struct CurrentFrontier(pub Frontier);

/// Resource: round evaluated but not committed yet
#[derive(Resource, Debug, Default)]
pub struct PendingRound {
    pub result: Option<RoundResult>,
}

/// Resource: report of the round completed by the current schedule pass
#[derive(Resource, Debug, Default)]
pub struct LatestRound {
    pub report: Option<RoundReport>,
}

/// Resource: counters and phase of the run
#[derive(Resource, Debug)]
pub struct SimulationState {
    pub phase: SimulationPhase,
    /// Rounds that committed changes
    pub round: u64,
    pub total_changed: u64,
    /// Error that aborted the current pass
    pub failure: Option<SimError>,
    seeded_published: bool,
}

impl SimulationState {
    pub fn new() -> Self {
        Self {
            phase: SimulationPhase::Seeded,
            round: 0,
            total_changed: 0,
            failure: None,
            seeded_published: false,
        }
    }

    pub fn is_stable(&self) -> bool {
        self.phase == SimulationPhase::Stable
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics of one round, handed to observers
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    /// Number of the round; a stabilising round reuses the last committed number
    pub round: u64,
    pub evaluated: usize,
    pub changed: usize,
    pub splits: usize,
    pub overcrowded: usize,
    /// Changes committed since the start of the run
    pub total_changed: u64,
    pub phase: SimulationPhase,
}

impl RoundReport {
    pub fn is_stable(&self) -> bool {
        self.phase == SimulationPhase::Stable
    }
}

/// System: evaluate the frontier against the current population
pub fn evaluate_round(
    population: Res<Population>,
    frontier: Res<CurrentFrontier>,
    mut rng: ResMut<SimRng>,
    mut pending: ResMut<PendingRound>,
    mut state: ResMut<SimulationState>,
) {
    if state.is_stable() || state.failure.is_some() {
        return;
    }

    match run_round(&population, &frontier.0, &mut rng.0) {
        Ok(result) => pending.result = Some(result),
        Err(e) => {
            tracing::error!(error = %e, round = state.round + 1, "Round evaluation failed");
            state.failure = Some(e);
        }
    }
}

/// System: apply the pending change set as a whole and advance the frontier
pub fn commit_round(
    mut population: ResMut<Population>,
    mut frontier: ResMut<CurrentFrontier>,
    mut pending: ResMut<PendingRound>,
    mut state: ResMut<SimulationState>,
    mut latest: ResMut<LatestRound>,
) {
    let Some(result) = pending.result.take() else {
        return;
    };

    if result.is_stable() {
        state.phase = SimulationPhase::Stable;
        frontier.0.clear();
        latest.report = Some(RoundReport {
            round: state.round,
            evaluated: result.evaluated,
            changed: 0,
            splits: 0,
            overcrowded: result.overcrowded,
            total_changed: state.total_changed,
            phase: state.phase,
        });
        return;
    }

    if let Some(missing) = result
        .changes
        .keys()
        .find(|id| population.get(**id).is_err())
    {
        tracing::error!(node = %missing, "Change set refers to an unknown node");
        state.failure = Some(SimError::NotFound(*missing));
        return;
    }

    for (id, new_state) in &result.changes {
        if let Ok(node) = population.get_mut(*id) {
            node.set_belief(new_state.belief, new_state.confidence);
        }
    }

    state.phase = SimulationPhase::Running;
    state.round += 1;
    state.total_changed += result.changes.len() as u64;
    frontier.0 = result.changes.keys().copied().collect();

    latest.report = Some(RoundReport {
        round: state.round,
        evaluated: result.evaluated,
        changed: result.changes.len(),
        splits: result.splits,
        overcrowded: result.overcrowded,
        total_changed: state.total_changed,
        phase: state.phase,
    });
}

/// System: hand the latest round to every observer
pub fn publish_round(
    population: Res<Population>,
    state: Res<SimulationState>,
    latest: Res<LatestRound>,
    mut observers: ResMut<RoundObservers>,
) {
    let Some(report) = &latest.report else {
        return;
    };

    observers.round(report, &population);
    if report.is_stable() {
        observers.stable(&run_summary(&state, &population), &population);
    }
}

fn run_summary(state: &SimulationState, population: &Population) -> RunSummary {
    RunSummary {
        rounds: state.round,
        total_changed: state.total_changed,
        final_counts: population.counts(),
    }
}

/// A seeded population and the schedule that drives it to stability
pub struct Simulation {
    world: World,
    schedule: Schedule,
}

impl Simulation {
    /// `seeds` is the union of every seeded node: the frontier of round 1.
    pub fn new(population: Population, seeds: Frontier, rng: SmallRng) -> Self {
        let mut world = World::new();
        world.insert_resource(population);
        world.insert_resource(CurrentFrontier(seeds));
        world.insert_resource(SimRng(rng));
        world.insert_resource(PendingRound::default());
        world.insert_resource(LatestRound::default());
        world.insert_resource(SimulationState::new());
        world.insert_resource(StatsCollector::new());
        world.insert_resource(RoundObservers::new());

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems((evaluate_round, commit_round, record_stats, publish_round).chain());

        Self { world, schedule }
    }

    pub fn with_observer(mut self, observer: impl RoundObserver + 'static) -> Self {
        self.add_observer(observer);
        self
    }

    pub fn add_observer(&mut self, observer: impl RoundObserver + 'static) {
        self.world.resource_mut::<RoundObservers>().push(observer);
    }

    pub fn phase(&self) -> SimulationPhase {
        self.world.resource::<SimulationState>().phase
    }

    /// Rounds committed so far
    pub fn round(&self) -> u64 {
        self.world.resource::<SimulationState>().round
    }

    pub fn total_changed(&self) -> u64 {
        self.world.resource::<SimulationState>().total_changed
    }

    pub fn population(&self) -> &Population {
        self.world.resource::<Population>()
    }

    pub fn frontier(&self) -> &Frontier {
        &self.world.resource::<CurrentFrontier>().0
    }

    pub fn stats(&self) -> &StatsCollector {
        self.world.resource::<StatsCollector>()
    }

    pub fn summary(&self) -> RunSummary {
        run_summary(
            self.world.resource::<SimulationState>(),
            self.world.resource::<Population>(),
        )
    }

    /// Run one round. Returns `None` once the population is stable.
    pub fn step(&mut self) -> SimResult<Option<RoundReport>> {
        if self.phase() == SimulationPhase::Stable {
            return Ok(None);
        }
        self.publish_seeded();

        self.world.resource_mut::<LatestRound>().report = None;
        self.schedule.run(&mut self.world);

        if let Some(e) = self.world.resource_mut::<SimulationState>().failure.take() {
            return Err(e);
        }
        Ok(self.world.resource::<LatestRound>().report.clone())
    }

    /// Run rounds until no node changes.
    pub fn run(&mut self) -> SimResult<RunSummary> {
        while self.step()?.is_some() {}
        Ok(self.summary())
    }

    fn publish_seeded(&mut self) {
        if self.world.resource::<SimulationState>().seeded_published {
            return;
        }
        self.world.resource_mut::<SimulationState>().seeded_published = true;
        self.world
            .resource_scope(|world, mut observers: Mut<RoundObservers>| {
                observers.seeded(world.resource::<Population>());
            });
    }
}
