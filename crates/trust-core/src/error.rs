//! Simulation Errors

use thiserror::Error;

use crate::components::node::NodeId;

/// Errors raised by grid construction, seeding and round evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A node name that should exist is missing: the graph is corrupted
    #[error("node {0} not found in population")]
    NotFound(NodeId),
    #[error("invalid grid dimensions {width}x{height}: both must be positive and the node count must fit in usize")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid density {0}: must be within [0, 1]")]
    InvalidDensity(f64),
    #[error("invalid confidence {0}: must be within [0, 1]")]
    InvalidConfidence(f64),
    #[error("cannot seed the neutral belief")]
    NeutralSeed,
}

pub type SimResult<T> = Result<T, SimError>;

/// Checks grid dimensions and returns the node count.
pub fn check_dimensions(width: usize, height: usize) -> SimResult<usize> {
    match width.checked_mul(height) {
        Some(count) if count > 0 => Ok(count),
        _ => Err(SimError::InvalidDimensions { width, height }),
    }
}

/// Checks that a confidence lies in the unit interval.
pub fn check_confidence(confidence: f64) -> SimResult<f64> {
    if (0.0..=1.0).contains(&confidence) {
        Ok(confidence)
    } else {
        Err(SimError::InvalidConfidence(confidence))
    }
}

/// Checks that a seeding density lies in the unit interval.
pub fn check_density(density: f64) -> SimResult<f64> {
    if (0.0..=1.0).contains(&density) {
        Ok(density)
    } else {
        Err(SimError::InvalidDensity(density))
    }
}
