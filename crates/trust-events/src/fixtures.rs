//! Sample data fixtures for testing.
//!
//! This module provides ready-made feed data for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // trust-events = { path = "../trust-events", features = ["test-fixtures"] }
//!
//! use trust_events::fixtures;
//!
//! let snapshots = fixtures::sample_feed();
//! ```

use crate::RoundSnapshot;

/// Raw lines of the sample feed.
pub fn sample_feed_jsonl() -> &'static str {
    include_str!("../tests/fixtures/sample_feed.jsonl")
}

/// Returns the snapshots of the sample feed.
///
/// A 4x3 grid seeded with two positive cells and one negative cell, which
/// stabilises after three rounds:
/// - round 0: the seeded grid
/// - rounds 1-3: the belief spreading until no cell changes
pub fn sample_feed() -> Vec<RoundSnapshot> {
    sample_feed_jsonl()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            RoundSnapshot::from_jsonl(l).unwrap_or_else(|e| {
                panic!("Failed to parse snapshot line: {}\nError: {}", l, e)
            })
        })
        .collect()
}
