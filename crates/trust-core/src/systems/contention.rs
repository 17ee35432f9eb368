//! Threshold & Contention Model
//!
//! Pure functions deciding what a node could become this round, given the
//! neighbours that changed last round. Nothing here mutates the population.
//!
//! Every advocate of a label rolls independently against the node, so a
//! label's chance is the product of its advocates' thresholds. With two
//! competing labels the four branches (only X wins, only Y wins, neither,
//! both) partition the joint outcomes of two independent trials; a "both"
//! draw is settled by a second draw.

use rand::Rng;
use std::collections::BTreeMap;

use crate::components::{Belief, NodeState};

/// Chance, per contending label, of convincing the evaluated node
pub type Chances = BTreeMap<Belief, f64>;

/// Chance that `advocate` convinces `target` in one encounter.
pub fn threshold(advocate: NodeState, target: NodeState) -> f64 {
    advocate.confidence * (1.0 - target.confidence)
}

/// Group advocates by label and compound their thresholds.
///
/// Neutral advocates and advocates sharing the target's belief are ignored.
pub fn conviction_chances<I>(target: NodeState, advocates: I) -> Chances
where
    I: IntoIterator<Item = NodeState>,
{
    let mut chances = Chances::new();
    for advocate in advocates {
        if advocate.belief.is_neutral() || advocate.belief == target.belief {
            continue;
        }
        *chances.entry(advocate.belief).or_insert(1.0) *= threshold(advocate, target);
    }
    chances
}

/// What a single draw can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The label convinces the node
    Win(Belief),
    /// Nobody convinces the node
    Remain,
    /// Both labels convince the node at once; needs a tie-break
    SplitPending(Belief, Belief),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedOutcome {
    pub outcome: Outcome,
    pub weight: f64,
}

impl WeightedOutcome {
    pub fn new(outcome: Outcome, weight: f64) -> Self {
        Self { outcome, weight }
    }
}

/// Shape of the contention around one node
#[derive(Debug, Clone, PartialEq)]
pub enum Contention {
    /// No label pulls on the node
    Uncontested,
    /// One or two labels pull on the node
    Contested(Vec<WeightedOutcome>),
    /// More labels than the model resolves
    Overcrowded(usize),
}

/// Probability of each outcome given the per-label chances.
///
/// One label `X` with chance `p` gives `Win(X): p` and `Remain: 1 - p`.
/// Two labels give the four-way split; labels are taken in enum order so the
/// result does not depend on how the chances were gathered.
pub fn outcome_distribution(chances: &Chances) -> Contention {
    let mut labels = chances.iter().map(|(belief, chance)| (*belief, *chance));
    match (labels.next(), labels.next(), chances.len()) {
        (None, _, _) => Contention::Uncontested,
        (Some((x, p)), None, _) => Contention::Contested(vec![
            WeightedOutcome::new(Outcome::Win(x), p),
            WeightedOutcome::new(Outcome::Remain, 1.0 - p),
        ]),
        (Some((x, px)), Some((y, py)), 2) => Contention::Contested(vec![
            WeightedOutcome::new(Outcome::Win(x), px * (1.0 - py)),
            WeightedOutcome::new(Outcome::Win(y), py * (1.0 - px)),
            WeightedOutcome::new(Outcome::Remain, (1.0 - px) * (1.0 - py)),
            WeightedOutcome::new(Outcome::SplitPending(x, y), px * py),
        ]),
        (_, _, count) => Contention::Overcrowded(count),
    }
}

/// Weighted random choice over the outcomes.
///
/// Weights need not sum to one. Outcomes with zero weight are never picked;
/// an empty or weightless distribution yields nothing.
pub fn draw_outcome<'a, R: Rng + ?Sized>(
    rng: &mut R,
    outcomes: &'a [WeightedOutcome],
) -> Option<&'a WeightedOutcome> {
    let total_weight: f64 = outcomes.iter().map(|o| o.weight.max(0.0)).sum();
    if total_weight.is_nan() || total_weight <= 0.0 {
        return None;
    }

    let mut roll = rng.gen::<f64>() * total_weight;
    for candidate in outcomes {
        let weight = candidate.weight.max(0.0);
        if roll < weight {
            return Some(candidate);
        }
        roll -= weight;
    }

    // Rounding left the roll past the end
    outcomes.iter().rev().find(|o| o.weight > 0.0)
}

/// Probability that `x` takes a split decision.
pub fn tiebreak_threshold(px: f64, py: f64) -> f64 {
    let x_miss = 1.0 - px;
    let y_miss = 1.0 - py;
    if x_miss + y_miss > 0.0 {
        x_miss / (x_miss + y_miss)
    } else {
        0.5
    }
}

/// Settle a split decision with a second draw.
///
/// The winner's confidence is its own chance scaled by the weight the split
/// outcome was drawn with.
pub fn resolve_split<R: Rng + ?Sized>(
    rng: &mut R,
    (x, px): (Belief, f64),
    (y, py): (Belief, f64),
    joint_weight: f64,
) -> NodeState {
    let roll: f64 = rng.gen();
    if roll <= tiebreak_threshold(px, py) {
        NodeState::new(x, px * joint_weight)
    } else {
        NodeState::new(y, py * joint_weight)
    }
}

/// Result of evaluating one node for one round
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// No differing label among the consulted neighbours
    Uncontested,
    /// Contested, but the node keeps its state
    Remain,
    /// A single label won
    Convinced(NodeState),
    /// Both labels won and the tie-break picked this state
    SplitResolved(NodeState),
    /// Too many labels contended; left unchanged
    Overcrowded(usize),
}

impl Decision {
    /// The state the node moves to, if any.
    pub fn new_state(&self) -> Option<NodeState> {
        match self {
            Decision::Convinced(state) | Decision::SplitResolved(state) => Some(*state),
            _ => None,
        }
    }
}

/// Draw the next state of `target` given the chances of each contending label.
pub fn decide<R: Rng + ?Sized>(rng: &mut R, target: NodeState, chances: &Chances) -> Decision {
    let outcomes = match outcome_distribution(chances) {
        Contention::Uncontested => return Decision::Uncontested,
        Contention::Overcrowded(count) => return Decision::Overcrowded(count),
        Contention::Contested(outcomes) => outcomes,
    };

    let Some(drawn) = draw_outcome(rng, &outcomes) else {
        return Decision::Remain;
    };
    match drawn.outcome {
        Outcome::Remain => Decision::Remain,
        Outcome::Win(belief) if belief == target.belief => Decision::Remain,
        Outcome::Win(belief) => match chances.get(&belief) {
            Some(&chance) => Decision::Convinced(NodeState::new(belief, chance)),
            None => Decision::Remain,
        },
        Outcome::SplitPending(x, y) => {
            match (chances.get(&x).copied(), chances.get(&y).copied()) {
                (Some(px), Some(py)) => {
                    Decision::SplitResolved(resolve_split(rng, (x, px), (y, py), drawn.weight))
                }
                _ => Decision::Remain,
            }
        }
    }
}
