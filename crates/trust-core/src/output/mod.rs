//! Output Systems
//!
//! Observers, the snapshot feed, and statistics.

pub mod feed;
pub mod observer;
pub mod stats;

pub use feed::{snapshot, JsonlFeed};
pub use observer::{RoundObserver, RoundObservers, TracingObserver};
pub use stats::{record_stats, write_stats, RoundSummary, SimulationStats, StatsCollector};
