use std::collections::HashSet;

use crate::archive::{MatchRecord, Participant, PlayerIdentityRecord};

use super::super::records::{max_set, Kda, Metric, RecordEntry, RecordValue};
use super::{CollectedRecords, RecordCollector};

/// Keeps every participant tied at the extreme of one stat.
pub struct ParticipantMetricCollector {
    metric: Metric,
    extract: fn(&Participant) -> RecordValue,
    inverse: bool,
}

impl ParticipantMetricCollector {
    pub fn new(metric: Metric, extract: fn(&Participant) -> RecordValue, inverse: bool) -> Self {
        Self {
            metric,
            extract,
            inverse,
        }
    }

    pub fn kills() -> Self {
        Self::new(
            Metric::Kills,
            |p| RecordValue::Count(p.stats.kills.into()),
            false,
        )
    }

    pub fn deaths() -> Self {
        Self::new(
            Metric::Deaths,
            |p| RecordValue::Count(p.stats.deaths.into()),
            false,
        )
    }

    pub fn assists() -> Self {
        Self::new(
            Metric::Assists,
            |p| RecordValue::Count(p.stats.assists.into()),
            false,
        )
    }

    pub fn kda() -> Self {
        Self::new(
            Metric::Kda,
            |p| RecordValue::Kda(Kda::new(p.stats.kills, p.stats.deaths, p.stats.assists)),
            false,
        )
    }

    pub fn gold() -> Self {
        Self::new(
            Metric::Gold,
            |p| RecordValue::Count(p.stats.gold_earned.into()),
            false,
        )
    }

    pub fn creep_score() -> Self {
        Self::new(
            Metric::Cs,
            |p| RecordValue::Count(p.stats.creep_score.into()),
            false,
        )
    }

    pub fn vision_score() -> Self {
        Self::new(
            Metric::VisionScore,
            |p| RecordValue::Count(p.stats.vision_score.into()),
            false,
        )
    }
}

impl RecordCollector for ParticipantMetricCollector {
    fn collect(&self, record: &MatchRecord, identity: &PlayerIdentityRecord) -> CollectedRecords {
        record
            .participants
            .iter()
            .map(|participant| {
                let value = (self.extract)(participant);
                HashSet::from([RecordEntry::for_participant(
                    value,
                    participant,
                    identity,
                    record,
                    self.inverse,
                )])
            })
            .reduce(max_set)
            .map(|best| vec![(self.metric, best)])
            .unwrap_or_default()
    }
}
