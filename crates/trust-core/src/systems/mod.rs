//! Simulation Systems
//!
//! The contention model, the round controller, and the driver schedule.

pub mod contention;
pub mod driver;
pub mod round;

// Re-export commonly used items
pub use contention::{
    conviction_chances, decide, draw_outcome, outcome_distribution, resolve_split, threshold,
    tiebreak_threshold, Chances, Contention, Decision, Outcome, WeightedOutcome,
};
pub use driver::{
    commit_round, evaluate_round, publish_round, CurrentFrontier, LatestRound, PendingRound,
    RoundReport, Simulation, SimulationPhase, SimulationState,
};
pub use round::{evaluate_node, frontier_candidates, run_round, ChangeSet, Frontier, RoundResult};
