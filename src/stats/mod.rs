pub mod collectors;
pub mod join;
pub mod records;
pub mod service;

mod errors;
pub mod models;

pub use collectors::{default_collectors, RecordCollector};
pub use errors::StatsError;
pub use join::{JoinedMatch, ParticipantItem, SeasonFilter};
pub use models::*;
pub use records::{Kda, Metric, RecordEntry, RecordSet, RecordValue};
pub use service::{StatsService, StatsServiceBuilder};
