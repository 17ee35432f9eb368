//! Snapshot Types
//!
//! One record per round, describing every cell of the grid by its belief code.
//!
//! Snapshots are written one JSON object per line, in round order, so a viewer
//! can replay the run as a timeline.

use serde::{Deserialize, Serialize};

use crate::summary::BeliefCounts;

/// Code for an uncommitted cell
pub const NEUTRAL_CODE: char = '-';
/// Code for a cell holding the positive belief
pub const POSITIVE_CODE: char = 'X';
/// Code for a cell holding the negative belief
pub const NEGATIVE_CODE: char = '0';

/// State of the whole grid after a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Round number, 0 being the freshly seeded grid
    pub round: u64,
    /// Rows of belief codes, row-major
    pub map: Vec<Vec<char>>,
}

impl RoundSnapshot {
    pub fn new(round: u64, map: Vec<Vec<char>>) -> Self {
        Self { round, map }
    }

    pub fn height(&self) -> usize {
        self.map.len()
    }

    pub fn width(&self) -> usize {
        self.map.first().map(Vec::len).unwrap_or(0)
    }

    /// Code at the given cell, if it is inside the grid.
    pub fn code_at(&self, row: usize, column: usize) -> Option<char> {
        self.map.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Tally cells by belief code. Unknown codes are ignored.
    pub fn counts(&self) -> BeliefCounts {
        let mut counts = BeliefCounts::default();
        for code in self.map.iter().flatten() {
            match *code {
                NEUTRAL_CODE => counts.neutral += 1,
                POSITIVE_CODE => counts.positive += 1,
                NEGATIVE_CODE => counts.negative += 1,
                _ => {}
            }
        }
        counts
    }

    /// Renders the grid as text, one line per row.
    pub fn render(&self) -> String {
        self.map
            .iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Serializes the snapshot as a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a snapshot from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RoundSnapshot {
        RoundSnapshot::new(
            3,
            vec![vec!['-', 'X', '0'], vec!['X', 'X', '-']],
        )
    }

    #[test]
    fn test_dimensions() {
        let snapshot = sample();
        assert_eq!(snapshot.height(), 2);
        assert_eq!(snapshot.width(), 3);
        assert_eq!(snapshot.code_at(1, 0), Some('X'));
        assert_eq!(snapshot.code_at(2, 0), None);
    }

    #[test]
    fn test_empty_snapshot_has_zero_width() {
        let snapshot = RoundSnapshot::new(0, Vec::new());
        assert_eq!(snapshot.width(), 0);
        assert_eq!(snapshot.height(), 0);
    }

    #[test]
    fn test_counts() {
        let counts = sample().counts();
        assert_eq!(counts.neutral, 2);
        assert_eq!(counts.positive, 3);
        assert_eq!(counts.negative, 1);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn test_wire_format() {
        let line = sample().to_jsonl().unwrap();
        assert_eq!(
            line,
            r#"{"round":3,"map":[["-","X","0"],["X","X","-"]]}"#
        );
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_render() {
        assert_eq!(sample().render(), "-X0\nXX-");
    }
}
