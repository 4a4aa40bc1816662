use futures::{future, TryStreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::archive::{
    MatchRecord, MatchStore, Participant, PlayerIdentityRecord, PlayerIdentityStore, Team,
};

use super::StatsError;

/// Which seasons a request covers. Season 0 on the wire means every season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonFilter {
    All,
    Season(u32),
}

impl SeasonFilter {
    pub fn accepts(self, season: u32) -> bool {
        match self {
            SeasonFilter::All => true,
            SeasonFilter::Season(wanted) => wanted == season,
        }
    }
}

impl From<u32> for SeasonFilter {
    fn from(season: u32) -> Self {
        match season {
            0 => SeasonFilter::All,
            n => SeasonFilter::Season(n),
        }
    }
}

/// A stored roster paired with the match it describes.
#[derive(Debug, Clone)]
pub struct JoinedMatch {
    pub identity: Arc<PlayerIdentityRecord>,
    pub record: Arc<MatchRecord>,
}

/// One participant of a joined match, resolved to a named player.
#[derive(Debug, Clone, Copy)]
pub struct ParticipantItem<'a> {
    pub player: &'a str,
    pub participant: &'a Participant,
    pub team: &'a Team,
    pub record: &'a MatchRecord,
}

/// Pairs every stored roster with its match, keeping only matches the filter accepts.
///
/// Match lookups run concurrently, at most `concurrency` at a time. A roster whose
/// match is missing from the store is dropped. The first store error aborts the join.
#[instrument(skip(identities, matches))]
pub async fn join_matches(
    identities: &dyn PlayerIdentityStore,
    matches: &dyn MatchStore,
    season: SeasonFilter,
    concurrency: usize,
) -> Result<Vec<JoinedMatch>, StatsError> {
    let joined: Vec<JoinedMatch> = identities
        .find_all()
        .map_ok(|identity| async move {
            let found = matches.find_by_id(identity.match_id).await?;
            if found.is_none() {
                debug!(
                    match_id = identity.match_id,
                    "Roster references missing match, skipping"
                );
            }
            Ok::<_, StatsError>(found.map(|record| (identity, record)))
        })
        .try_buffer_unordered(concurrency.max(1))
        .try_filter_map(|pair| {
            future::ready(Ok(pair.and_then(|(identity, record)| {
                season.accepts(record.season).then(|| JoinedMatch {
                    identity: Arc::new(identity),
                    record: Arc::new(record),
                })
            })))
        })
        .try_collect()
        .await?;

    debug!(joined = joined.len(), "Joined rosters with matches");
    Ok(joined)
}

/// Expands a joined match into one item per participant with a known player name.
pub fn fan_out(joined: &JoinedMatch) -> impl Iterator<Item = ParticipantItem<'_>> {
    let record = joined.record.as_ref();
    record.participants.iter().filter_map(move |participant| {
        let player = joined.identity.player_name(participant.participant_id)?;
        Some(ParticipantItem {
            player,
            participant,
            team: record.team_of(participant),
            record,
        })
    })
}
