//! Run summary records.

use serde::{Deserialize, Serialize};

/// Number of cells holding each belief
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeliefCounts {
    pub neutral: usize,
    pub positive: usize,
    pub negative: usize,
}

impl BeliefCounts {
    pub fn total(&self) -> usize {
        self.neutral + self.positive + self.negative
    }
}

/// Final statistics of a run that reached stabilisation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Rounds that committed at least one change
    pub rounds: u64,
    /// Belief changes committed over the whole run
    pub total_changed: u64,
    pub final_counts: BeliefCounts,
}
