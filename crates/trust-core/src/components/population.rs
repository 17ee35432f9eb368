//! Population Graph
//!
//! Fixed-size collection of nodes laid out on a toroidal grid. The set of
//! names and the adjacency relation never change after [`Population::build`];
//! only node states do.

use bevy_ecs::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use trust_events::BeliefCounts;

use super::belief::Belief;
use super::node::{Node, NodeId};
use crate::error::{check_confidence, check_density, check_dimensions, SimError, SimResult};

/// Row/column offsets of the Moore neighbourhood
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Resource: every node of the simulation, indexed by [`NodeId`]
#[derive(Resource, Debug, Clone)]
pub struct Population {
    width: usize,
    height: usize,
    nodes: Vec<Node>,
}

/// Outcome of seeding one belief into the population
#[derive(Debug, Clone, PartialEq)]
pub struct SeedReport {
    pub belief: Belief,
    /// Nodes asked for by the density
    pub requested: usize,
    /// Nodes that actually received the belief
    pub seeded: BTreeSet<NodeId>,
    /// Share of the whole population that was seeded
    pub achieved_density: f64,
}

impl SeedReport {
    /// True when there were not enough neutral nodes left.
    pub fn is_partial(&self) -> bool {
        self.seeded.len() < self.requested
    }
}

impl Population {
    /// Create a `width * height` grid where every node is linked to its 8
    /// surrounding cells, wrapping around the edges.
    pub fn build(width: usize, height: usize, initial_confidence: f64) -> SimResult<Self> {
        let count = check_dimensions(width, height)?;
        check_confidence(initial_confidence)?;

        let nodes = (0..count)
            .map(|index| Node::new(NodeId(index), initial_confidence))
            .collect();
        let mut population = Self {
            width,
            height,
            nodes,
        };

        for row in 0..height {
            for column in 0..width {
                let id = population.id_at(row, column);
                for (d_row, d_column) in MOORE_OFFSETS {
                    let other_row = (row as isize + d_row).rem_euclid(height as isize) as usize;
                    let other_column =
                        (column as isize + d_column).rem_euclid(width as isize) as usize;
                    let other = population.id_at(other_row, other_column);
                    population.link(id, other)?;
                }
            }
        }

        tracing::info!(
            width,
            height,
            nodes = population.len(),
            "Generated toroidal population grid"
        );
        Ok(population)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Name of the node at the given cell (row-major).
    pub fn id_at(&self, row: usize, column: usize) -> NodeId {
        NodeId(row * self.width + column)
    }

    /// Cell of a node as `(row, column)`.
    pub fn position(&self, id: NodeId) -> (usize, usize) {
        (id.0 / self.width, id.0 % self.width)
    }

    /// Get a node by name
    pub fn get(&self, id: NodeId) -> SimResult<&Node> {
        self.nodes.get(id.0).ok_or(SimError::NotFound(id))
    }

    /// Get mutable node
    pub fn get_mut(&mut self, id: NodeId) -> SimResult<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(SimError::NotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Link two nodes both ways. Returns whether a new link was created.
    pub fn link(&mut self, a: NodeId, b: NodeId) -> SimResult<bool> {
        self.get(b)?;
        if a == b {
            tracing::debug!(node = %a, "Trying to link node to itself");
            return Ok(false);
        }

        let forward = self.get_mut(a)?.add_neighbour(b);
        let backward = self.get_mut(b)?.add_neighbour(a);
        if forward || backward {
            tracing::trace!(%a, %b, "Linked nodes");
        } else {
            tracing::trace!(%a, %b, "Nodes already linked");
        }
        Ok(forward || backward)
    }

    /// Introduce a belief into the population.
    ///
    /// Picks `ceil(density * len)` currently neutral nodes uniformly at random
    /// and sets them to `(belief, confidence)`. When fewer neutral nodes are
    /// left, all of them are seeded and the report records the shortfall.
    pub fn seed_belief<R: Rng + ?Sized>(
        &mut self,
        belief: Belief,
        density: f64,
        confidence: f64,
        rng: &mut R,
    ) -> SimResult<SeedReport> {
        if belief.is_neutral() {
            return Err(SimError::NeutralSeed);
        }
        check_density(density)?;
        check_confidence(confidence)?;

        let requested = (density * self.len() as f64).ceil() as usize;
        let neutral: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|node| node.belief().is_neutral())
            .map(|node| node.id)
            .collect();

        let seeded: BTreeSet<NodeId> = neutral.choose_multiple(rng, requested).copied().collect();
        for id in &seeded {
            self.get_mut(*id)?.set_belief(belief, confidence);
        }

        let report = SeedReport {
            belief,
            requested,
            achieved_density: seeded.len() as f64 / self.len() as f64,
            seeded,
        };
        if report.is_partial() {
            tracing::warn!(
                %belief,
                requested,
                seeded = report.seeded.len(),
                achieved_density = report.achieved_density,
                "Not enough neutral nodes left, seeded a lower density"
            );
        } else {
            tracing::info!(%belief, seeded = report.seeded.len(), confidence, "Introduced belief");
        }
        Ok(report)
    }

    /// Number of nodes holding each belief
    pub fn counts(&self) -> BeliefCounts {
        let mut counts = BeliefCounts::default();
        for node in &self.nodes {
            match node.belief() {
                Belief::Neutral => counts.neutral += 1,
                Belief::Positive => counts.positive += 1,
                Belief::Negative => counts.negative += 1,
            }
        }
        counts
    }

    /// Rows of belief codes
    pub fn to_code_grid(&self) -> Vec<Vec<char>> {
        self.nodes
            .chunks(self.width)
            .map(|row| row.iter().map(|node| node.belief().code()).collect())
            .collect()
    }

    /// Text map, one line per row
    pub fn render_map(&self) -> String {
        self.nodes
            .chunks(self.width)
            .map(|row| row.iter().map(|node| node.belief().code()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
