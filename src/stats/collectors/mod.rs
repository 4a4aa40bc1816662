mod first_kill;
mod participant_metric;

pub use first_kill::FirstKillCollector;
pub use participant_metric::ParticipantMetricCollector;

use std::collections::HashSet;
use std::sync::Arc;

use crate::archive::{MatchRecord, PlayerIdentityRecord};

use super::records::{Metric, RecordEntry};

pub type CollectedRecords = Vec<(Metric, HashSet<RecordEntry>)>;

/// Extracts record candidates from a single match.
///
/// Every returned set must hold entries that tie under their comparison.
pub trait RecordCollector: Send + Sync {
    fn collect(&self, record: &MatchRecord, identity: &PlayerIdentityRecord) -> CollectedRecords;
}

/// The tracked metrics: seven participant maxima plus the first-kill pair.
pub fn default_collectors() -> Vec<Arc<dyn RecordCollector>> {
    vec![
        Arc::new(ParticipantMetricCollector::kills()),
        Arc::new(ParticipantMetricCollector::deaths()),
        Arc::new(ParticipantMetricCollector::assists()),
        Arc::new(ParticipantMetricCollector::kda()),
        Arc::new(ParticipantMetricCollector::gold()),
        Arc::new(ParticipantMetricCollector::creep_score()),
        Arc::new(ParticipantMetricCollector::vision_score()),
        Arc::new(FirstKillCollector::new()),
    ]
}
