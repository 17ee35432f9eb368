//! Shared feed types and serialization for the Game of Trust simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The engine writes these records; viewers and analysis tools read them.

pub mod feed;
pub mod snapshot;
pub mod summary;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export feed types
pub use feed::{read_feed, FeedError, FeedReader};

// Re-export snapshot types
pub use snapshot::{RoundSnapshot, NEGATIVE_CODE, NEUTRAL_CODE, POSITIVE_CODE};

// Re-export summary types
pub use summary::{BeliefCounts, RunSummary};
