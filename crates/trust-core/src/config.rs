//! Configuration System
//!
//! Loads grid size, RNG seed and belief seeding from a TOML file, so runs can
//! be adjusted without recompiling.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::components::{Belief, DEFAULT_CONFIDENCE};
use crate::error::{check_confidence, check_density, check_dimensions, SimError};

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "trust.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub population: PopulationConfig,
    pub simulation: SimulationConfig,
    /// Beliefs introduced before round 1, in order
    pub seeds: Vec<SeedConfig>,
}

/// Grid parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub width: usize,
    pub height: usize,
    /// Confidence of every node before seeding
    pub initial_confidence: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 20,
            initial_confidence: DEFAULT_CONFIDENCE,
        }
    }
}

/// Run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Random seed for reproducibility
    pub rng_seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { rng_seed: 42 }
    }
}

/// One belief to introduce into the population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    pub belief: Belief,
    /// Share of the whole population to seed
    pub density: f64,
    pub confidence: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            population: PopulationConfig::default(),
            simulation: SimulationConfig::default(),
            seeds: vec![
                SeedConfig {
                    belief: Belief::Positive,
                    density: 0.02,
                    confidence: 0.5,
                },
                SeedConfig {
                    belief: Belief::Negative,
                    density: 0.1,
                    confidence: 0.25,
                },
            ],
        }
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] SimError),
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        content.parse()
    }

    /// Load configuration from `path`, or use defaults if the file does not exist.
    ///
    /// A file that exists but does not parse or validate is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Returns the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), SimError> {
        let PopulationConfig {
            width,
            height,
            initial_confidence,
        } = self.population;
        check_dimensions(width, height)?;
        check_confidence(initial_confidence)?;

        for seed in &self.seeds {
            if seed.belief.is_neutral() {
                return Err(SimError::NeutralSeed);
            }
            check_density(seed.density)?;
            check_confidence(seed.confidence)?;
        }
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    /// Parse and validate configuration from a TOML string
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}
