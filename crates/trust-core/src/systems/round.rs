//! Round Controller
//!
//! Evaluates one round against a frozen view of the population. Only the
//! neighbours of last round's changes are evaluated, and each of them only
//! listens to the neighbours that just changed. Results are collected into a
//! separate change set; the population itself is never written here.

use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

use super::contention::{conviction_chances, decide, Decision};
use crate::components::{Node, NodeId, NodeState, Population};
use crate::error::SimResult;

/// Names of the nodes that changed in the last completed round
pub type Frontier = BTreeSet<NodeId>;

/// New states drawn during a round, keyed by node
pub type ChangeSet = BTreeMap<NodeId, NodeState>;

/// Everything a round produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundResult {
    pub changes: ChangeSet,
    /// Nodes that had at least one contending label
    pub evaluated: usize,
    /// Changes that came out of a split tie-break
    pub splits: usize,
    /// Nodes left unchanged because too many labels contended
    pub overcrowded: usize,
}

impl RoundResult {
    /// A round without changes means the population has stabilised.
    pub fn is_stable(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Union of the neighbours of every frontier node.
pub fn frontier_candidates(population: &Population, frontier: &Frontier) -> SimResult<BTreeSet<NodeId>> {
    let mut candidates = BTreeSet::new();
    for id in frontier {
        candidates.extend(population.get(*id)?.neighbours().iter().copied());
    }
    Ok(candidates)
}

/// Draw the next state of one node, consulting only neighbours in the frontier.
pub fn evaluate_node<R: Rng + ?Sized>(
    population: &Population,
    node: &Node,
    frontier: &Frontier,
    rng: &mut R,
) -> SimResult<Decision> {
    let advocates = node
        .neighbours()
        .intersection(frontier)
        .map(|id| population.get(*id).map(Node::state))
        .collect::<SimResult<Vec<_>>>()?;

    let chances = conviction_chances(node.state(), advocates);
    Ok(decide(rng, node.state(), &chances))
}

/// Compute the changes of one round.
///
/// Every candidate is evaluated against the same pre-round states; the caller
/// must apply the returned change set as a whole once the round is over.
pub fn run_round<R: Rng + ?Sized>(
    population: &Population,
    frontier: &Frontier,
    rng: &mut R,
) -> SimResult<RoundResult> {
    let mut result = RoundResult::default();

    for id in frontier_candidates(population, frontier)? {
        let node = population.get(id)?;
        let decision = evaluate_node(population, node, frontier, rng)?;

        match decision {
            Decision::Uncontested => continue,
            Decision::Overcrowded(labels) => {
                tracing::debug!(node = %id, labels, "Too many contending beliefs, node left unchanged");
                result.overcrowded += 1;
            }
            Decision::SplitResolved(_) => result.splits += 1,
            Decision::Remain | Decision::Convinced(_) => {}
        }
        result.evaluated += 1;

        if let Some(state) = decision.new_state() {
            result.changes.insert(id, state);
        }
    }

    Ok(result)
}
