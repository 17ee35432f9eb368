//! Game of Trust Simulation Engine
//!
//! Beliefs spreading over a toroidal grid: every round, the nodes next to last
//! round's changes may be convinced by them, until nothing changes anymore.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod setup;
pub mod systems;

pub use components::*;
pub use config::{Config, ConfigError};
pub use error::{SimError, SimResult};

// Re-export setup functions explicitly to avoid module name conflicts
pub use setup::{create_simulation, populate, seed_frontier};

pub use systems::{run_round, Frontier, RoundReport, RoundResult, Simulation, SimulationPhase};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
