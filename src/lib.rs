// Library crate for the match archive statistics engine
// This file exposes the public API for the binary and integration tests

pub mod archive;
pub mod champions;
pub mod config;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use archive::{ArchiveSnapshot, MatchRecord, PlayerIdentityRecord};
pub use config::AggregationConfig;
pub use stats::{
    Metric, PlayerStats, RecordEntry, RecordSet, SeasonFilter, StatsError, StatsService,
};
