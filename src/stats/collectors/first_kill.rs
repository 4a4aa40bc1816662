use std::collections::HashSet;

use crate::archive::{MatchRecord, ParticipantId, PlayerIdentityRecord};

use super::super::records::{Metric, RecordEntry, RecordValue};
use super::{CollectedRecords, RecordCollector};

/// Credits the earliest champion kill of a match to its killer and its victim.
///
/// Matches without a champion kill contribute neither metric. A side whose
/// participant id is unknown to the match (turret or minion executions) is
/// left out on its own.
#[derive(Debug, Default)]
pub struct FirstKillCollector;

impl FirstKillCollector {
    pub fn new() -> Self {
        Self
    }

    fn entry(
        record: &MatchRecord,
        identity: &PlayerIdentityRecord,
        participant_id: Option<ParticipantId>,
        timestamp_ms: i64,
    ) -> Option<HashSet<RecordEntry>> {
        let participant = record.participant(participant_id?)?;
        Some(HashSet::from([RecordEntry::for_participant(
            RecordValue::Time(timestamp_ms),
            participant,
            identity,
            record,
            true,
        )]))
    }
}

impl RecordCollector for FirstKillCollector {
    fn collect(&self, record: &MatchRecord, identity: &PlayerIdentityRecord) -> CollectedRecords {
        let Some(first_kill) = record
            .events()
            .filter(|event| event.is_champion_kill())
            .min_by_key(|event| (event.timestamp_ms, event.killer_id, event.victim_id))
        else {
            return Vec::new();
        };

        let timestamp = first_kill.timestamp_ms;
        [
            (Metric::EarlyKill, first_kill.killer_id),
            (Metric::EarlyDeath, first_kill.victim_id),
        ]
        .into_iter()
        .filter_map(|(metric, participant_id)| {
            Self::entry(record, identity, participant_id, timestamp).map(|set| (metric, set))
        })
        .collect()
    }
}
