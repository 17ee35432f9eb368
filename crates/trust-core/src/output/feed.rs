//! Snapshot Feed
//!
//! Writes one [`RoundSnapshot`] per line for an external viewer: round 0 is
//! the seeded grid, then one line per committed round.

use std::io::Write;
use trust_events::{RunSummary, RoundSnapshot};

use super::observer::RoundObserver;
use crate::components::Population;
use crate::systems::driver::RoundReport;

/// Snapshot of the population as the feed encodes it.
pub fn snapshot(population: &Population, round: u64) -> RoundSnapshot {
    RoundSnapshot::new(round, population.to_code_grid())
}

/// Observer writing the JSONL snapshot feed
pub struct JsonlFeed<W: Write + Send + Sync> {
    writer: W,
    lines_written: u64,
    failed: bool,
}

impl<W: Write + Send + Sync> JsonlFeed<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines_written: 0,
            failed: false,
        }
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Append one snapshot line.
    pub fn write_snapshot(&mut self, snapshot: &RoundSnapshot) -> std::io::Result<()> {
        let json = snapshot.to_jsonl()?;
        writeln!(self.writer, "{}", json)?;
        self.lines_written += 1;
        Ok(())
    }

    fn emit(&mut self, population: &Population, round: u64) {
        if self.failed {
            return;
        }
        if let Err(e) = self.write_snapshot(&snapshot(population, round)) {
            // A closed pipe will not come back; stop writing for the rest of the run
            tracing::warn!(round, error = %e, "Could not write snapshot, feed disabled");
            self.failed = true;
        }
    }
}

impl<W: Write + Send + Sync> RoundObserver for JsonlFeed<W> {
    fn on_seeded(&mut self, population: &Population) {
        self.emit(population, 0);
    }

    fn on_round(&mut self, report: &RoundReport, population: &Population) {
        if !report.is_stable() {
            self.emit(population, report.round);
        }
    }

    fn on_stable(&mut self, _summary: &RunSummary, _population: &Population) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(error = %e, "Failed to flush snapshot feed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Belief, NodeId};
    use crate::systems::driver::SimulationPhase;
    use std::io::Cursor;
    use trust_events::read_feed;

    fn report(round: u64, phase: SimulationPhase) -> RoundReport {
        RoundReport {
            round,
            evaluated: 1,
            changed: 1,
            splits: 0,
            overcrowded: 0,
            total_changed: round,
            phase,
        }
    }

    #[test]
    fn test_feed_lines_decode() {
        let mut population = Population::build(3, 2, 0.01).unwrap();
        let mut feed = JsonlFeed::new(Vec::new());

        feed.on_seeded(&population);
        population
            .get_mut(NodeId(4))
            .unwrap()
            .set_belief(Belief::Negative, 0.3);
        feed.on_round(&report(1, SimulationPhase::Running), &population);
        feed.on_round(&report(1, SimulationPhase::Stable), &population);
        assert_eq!(feed.lines_written(), 2);

        let bytes = feed.into_inner();
        let snapshots = read_feed(Cursor::new(bytes)).unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].round, 0);
        assert_eq!(snapshots[0].counts().neutral, 6);
        assert_eq!(snapshots[1].round, 1);
        assert_eq!(snapshots[1].code_at(1, 1), Some('0'));
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_disables_feed() {
        let population = Population::build(2, 2, 0.01).unwrap();
        let mut feed = JsonlFeed::new(Broken);
        feed.on_seeded(&population);
        feed.on_round(&report(1, SimulationPhase::Running), &population);
        assert_eq!(feed.lines_written(), 0);
        assert!(feed.failed);
    }
}
