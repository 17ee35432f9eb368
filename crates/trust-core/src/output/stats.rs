//! Statistics Output
//!
//! Collects per-round statistics during a run and writes them for analysis.

use bevy_ecs::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::Path;
use trust_events::RunSummary;

use crate::systems::driver::{LatestRound, RoundReport};

/// Summary of a committed round for history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    pub round: u64,
    pub evaluated: usize,
    pub changed: usize,
    pub splits: usize,
    pub overcrowded: usize,
}

/// Overall simulation statistics
#[derive(Debug, Clone, Serialize)]
pub struct SimulationStats {
    #[serde(flatten)]
    pub summary: RunSummary,
    pub average_changed_per_round: f64,
    /// Round with the most changes, earliest first on ties
    pub peak_round: Option<u64>,
    pub total_splits: usize,
    pub total_overcrowded: usize,
    pub round_history: Vec<RoundSummary>,
}

/// Resource to accumulate statistics during simulation
#[derive(Resource, Debug, Default)]
pub struct StatsCollector {
    pub rounds: Vec<RoundSummary>,
    pub total_changed: u64,
    pub total_splits: usize,
    pub total_overcrowded: usize,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a round. The stabilising round only contributes its
    /// overcrowded count.
    pub fn record_round(&mut self, report: &RoundReport) {
        self.total_overcrowded += report.overcrowded;
        if report.is_stable() {
            return;
        }

        self.total_changed += report.changed as u64;
        self.total_splits += report.splits;
        self.rounds.push(RoundSummary {
            round: report.round,
            evaluated: report.evaluated,
            changed: report.changed,
            splits: report.splits,
            overcrowded: report.overcrowded,
        });
    }

    /// Generate final statistics
    pub fn generate_stats(&self, summary: &RunSummary) -> SimulationStats {
        let average_changed_per_round = if self.rounds.is_empty() {
            0.0
        } else {
            self.total_changed as f64 / self.rounds.len() as f64
        };

        let peak_round = self
            .rounds
            .iter()
            .fold(None::<&RoundSummary>, |best, round| match best {
                Some(b) if b.changed >= round.changed => Some(b),
                _ => Some(round),
            })
            .map(|r| r.round);

        SimulationStats {
            summary: summary.clone(),
            average_changed_per_round,
            peak_round,
            total_splits: self.total_splits,
            total_overcrowded: self.total_overcrowded,
            round_history: self.rounds.clone(),
        }
    }
}

/// System: fold the latest round into the collector
pub fn record_stats(latest: Res<LatestRound>, mut stats: ResMut<StatsCollector>) {
    if let Some(report) = &latest.report {
        stats.record_round(report);
    }
}

/// Write statistics as pretty JSON, creating parent directories as needed
pub fn write_stats(stats: &SimulationStats, path: impl AsRef<Path>) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(stats)?;
    fs::write(path, json)?;
    Ok(())
}
