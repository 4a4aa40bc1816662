use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use strum_macros::{EnumIter, IntoStaticStr};

use crate::archive::{ChampionId, Lane, MatchId, MatchRecord, Participant, PlayerIdentityRecord};

use super::collectors::RecordCollector;
use super::join::JoinedMatch;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Metric {
    Kills,
    Deaths,
    Assists,
    Kda,
    Gold,
    Cs,
    VisionScore,
    EarlyKill,
    EarlyDeath,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Kda {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

impl Kda {
    pub fn new(kills: u32, deaths: u32, assists: u32) -> Self {
        Self {
            kills,
            deaths,
            assists,
        }
    }

    pub fn ratio(&self) -> f64 {
        self.takedowns() as f64 / f64::from(self.deaths.max(1))
    }

    fn takedowns(&self) -> u64 {
        u64::from(self.kills) + u64::from(self.assists)
    }

    /// Exact ratio comparison: (k1 + a1) / d1 against (k2 + a2) / d2 without floats.
    fn cmp_ratio(&self, other: &Self) -> Ordering {
        let lhs = u128::from(self.takedowns()) * u128::from(other.deaths.max(1));
        let rhs = u128::from(other.takedowns()) * u128::from(self.deaths.max(1));
        lhs.cmp(&rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordValue {
    Count(u64),
    Kda(Kda),
    /// Milliseconds since match start.
    Time(i64),
}

impl RecordValue {
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RecordValue::Count(a), RecordValue::Count(b)) => a.cmp(b),
            (RecordValue::Kda(a), RecordValue::Kda(b)) => a.cmp_ratio(b),
            (RecordValue::Time(a), RecordValue::Time(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            RecordValue::Count(_) => 0,
            RecordValue::Kda(_) => 1,
            RecordValue::Time(_) => 2,
        }
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordValue::Count(value) => write!(f, "{}", value),
            RecordValue::Kda(kda) => write!(
                f,
                "{}/{}/{} ({:.2})",
                kda.kills,
                kda.deaths,
                kda.assists,
                kda.ratio()
            ),
            RecordValue::Time(ms) => {
                let elapsed = TimeDelta::milliseconds(*ms);
                write!(
                    f,
                    "{:02}:{:02}",
                    elapsed.num_minutes(),
                    elapsed.num_seconds() % 60
                )
            }
        }
    }
}

/// One holder of a record: who set the value, on what, and in which match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordEntry {
    pub value: RecordValue,
    pub player_name: Option<String>,
    pub lane: Lane,
    pub champion_id: ChampionId,
    pub champion_name: Option<String>,
    pub match_id: MatchId,
    /// Lower values win when set.
    pub inverse: bool,
}

impl RecordEntry {
    pub fn for_participant(
        value: RecordValue,
        participant: &Participant,
        identity: &PlayerIdentityRecord,
        record: &MatchRecord,
        inverse: bool,
    ) -> Self {
        Self {
            value,
            player_name: identity
                .player_name(participant.participant_id)
                .map(str::to_owned),
            lane: participant.lane,
            champion_id: participant.champion_id,
            champion_name: None,
            match_id: record.id,
            inverse,
        }
    }

    /// `Greater` means `self` is the better record.
    pub fn compare(&self, other: &Self) -> Ordering {
        let ordering = self.value.compare(&other.value);
        if self.inverse {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Keeps the better of two tied sets, or both when they tie with each other.
pub fn max_set(
    mut left: HashSet<RecordEntry>,
    mut right: HashSet<RecordEntry>,
) -> HashSet<RecordEntry> {
    let ordering = match (left.iter().next(), right.iter().next()) {
        (Some(l), Some(r)) => l.compare(r),
        (_, None) => return left,
        (None, _) => return right,
    };

    match ordering {
        Ordering::Equal => {
            if left.len() < right.len() {
                std::mem::swap(&mut left, &mut right);
            }
            left.extend(right);
            left
        }
        Ordering::Greater => left,
        Ordering::Less => right,
    }
}

/// Per-metric record holders. Every set is non-empty and its entries tie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: BTreeMap<Metric, HashSet<RecordEntry>>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records contributed by one joined match.
    pub fn of_match(joined: &JoinedMatch, collectors: &[Arc<dyn RecordCollector>]) -> Self {
        collectors
            .iter()
            .flat_map(|collector| collector.collect(&joined.record, &joined.identity))
            .fold(Self::new(), |mut records, (metric, entries)| {
                records.offer(metric, entries);
                records
            })
    }

    /// Merges `entries` into the holders of `metric`.
    pub fn offer(&mut self, metric: Metric, entries: HashSet<RecordEntry>) {
        if entries.is_empty() {
            return;
        }
        let merged = match self.records.remove(&metric) {
            Some(current) => max_set(current, entries),
            None => entries,
        };
        self.records.insert(metric, merged);
    }

    pub fn combine(mut self, other: Self) -> Self {
        for (metric, entries) in other.records {
            self.offer(metric, entries);
        }
        self
    }

    pub fn get(&self, metric: Metric) -> Option<&HashSet<RecordEntry>> {
        self.records.get(&metric)
    }

    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.records.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn champion_ids(&self) -> HashSet<ChampionId> {
        self.records
            .values()
            .flatten()
            .map(|entry| entry.champion_id)
            .collect()
    }

    /// Fills in champion display names; ids missing from `names` stay unnamed.
    pub fn label_champions(self, names: &HashMap<ChampionId, String>) -> Self {
        let records = self
            .records
            .into_iter()
            .map(|(metric, entries)| {
                let entries = entries
                    .into_iter()
                    .map(|mut entry| {
                        entry.champion_name = names.get(&entry.champion_id).cloned();
                        entry
                    })
                    .collect();
                (metric, entries)
            })
            .collect();
        Self { records }
    }
}
