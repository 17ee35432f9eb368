//! Node Components
//!
//! A node is one member of the population: a belief held with some confidence,
//! plus the names of the nodes it can talk to.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::belief::Belief;

/// Confidence given to freshly created nodes
pub const DEFAULT_CONFIDENCE: f64 = 0.01;

/// Stable name of a node: its row-major index in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A belief together with the strength it is held with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeState {
    pub belief: Belief,
    /// Both persuasive power and resistance to persuasion, in [0, 1]
    pub confidence: f64,
}

impl NodeState {
    pub fn new(belief: Belief, confidence: f64) -> Self {
        Self { belief, confidence }
    }

    pub fn neutral(confidence: f64) -> Self {
        Self::new(Belief::Neutral, confidence)
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.belief, self.confidence)
    }
}

/// One member of the population
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    state: NodeState,
    /// State right before the last mutation
    previous: Option<NodeState>,
    neighbours: BTreeSet<NodeId>,
}

impl Node {
    pub fn new(id: NodeId, confidence: f64) -> Self {
        Self {
            id,
            state: NodeState::neutral(confidence),
            previous: None,
            neighbours: BTreeSet::new(),
        }
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn belief(&self) -> Belief {
        self.state.belief
    }

    pub fn confidence(&self) -> f64 {
        self.state.confidence
    }

    pub fn previous(&self) -> Option<NodeState> {
        self.previous
    }

    pub fn neighbours(&self) -> &BTreeSet<NodeId> {
        &self.neighbours
    }

    pub fn is_neighbour(&self, other: NodeId) -> bool {
        self.neighbours.contains(&other)
    }

    /// Overwrite belief and confidence, remembering the state they replace.
    pub fn set_belief(&mut self, belief: Belief, confidence: f64) {
        self.previous = Some(self.state);
        self.state = NodeState::new(belief, confidence);
    }

    /// Whether the last mutation changed the belief itself.
    pub fn changed_belief(&self) -> bool {
        self.previous
            .map(|previous| previous.belief != self.state.belief)
            .unwrap_or(false)
    }

    /// One direction of a link. Returns false for self-links and for links
    /// that already exist.
    pub(crate) fn add_neighbour(&mut self, other: NodeId) -> bool {
        if other == self.id {
            return false;
        }
        self.neighbours.insert(other)
    }

    /// Debug line listing the state and the links of the node.
    pub fn pretty_display(&self) -> String {
        let neighbours = if self.neighbours.is_empty() {
            "None".to_string()
        } else {
            self.neighbours
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!("{}: {}. Links: {}", self.id, self.state, neighbours)
    }
}
