use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use super::models::{ChampionId, MatchRecord, PlayerIdentityRecord};
use super::repository::{InMemoryMatchStore, InMemoryPlayerIdentityStore};
use crate::champions::{Champion, InMemoryChampionCatalog};
use crate::stats::StatsError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionEntry {
    pub id: ChampionId,
    pub name: String,
    /// PNG artwork, relative to the snapshot file.
    #[serde(default)]
    pub image_path: Option<PathBuf>,
}

/// JSON export of the match archive, used to seed the in-memory stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArchiveSnapshot {
    pub matches: Vec<MatchRecord>,
    pub players: Vec<PlayerIdentityRecord>,
    pub champions: Vec<ChampionEntry>,
}

pub struct ArchiveStores {
    pub identities: InMemoryPlayerIdentityStore,
    pub matches: InMemoryMatchStore,
    pub champions: InMemoryChampionCatalog,
}

impl ArchiveSnapshot {
    pub fn from_json(json: &str) -> Result<Self, StatsError> {
        Ok(serde_json::from_str(json)?)
    }

    #[instrument]
    pub async fn load(path: &Path) -> Result<ArchiveStores, StatsError> {
        let bytes = tokio::fs::read(path).await?;
        let snapshot: ArchiveSnapshot = serde_json::from_slice(&bytes)?;
        info!(
            matches = snapshot.matches.len(),
            rosters = snapshot.players.len(),
            champions = snapshot.champions.len(),
            "Loaded archive snapshot"
        );
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        snapshot.into_stores(base).await
    }

    /// Builds the in-memory stores, reading champion artwork relative to `base`.
    pub async fn into_stores(self, base: &Path) -> Result<ArchiveStores, StatsError> {
        let mut champions = Vec::with_capacity(self.champions.len());
        for entry in self.champions {
            let mut champion = Champion::new(entry.id, entry.name);
            if let Some(image_path) = entry.image_path {
                champion = champion.with_image(tokio::fs::read(base.join(image_path)).await?);
            }
            champions.push(champion);
        }

        Ok(ArchiveStores {
            identities: InMemoryPlayerIdentityStore::with_records(self.players),
            matches: InMemoryMatchStore::with_matches(self.matches),
            champions: InMemoryChampionCatalog::with_champions(champions),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::repository::{MatchStore, PlayerIdentityStore};
    use crate::champions::ChampionCatalog;
    use futures::TryStreamExt;

    const SNAPSHOT: &str = r#"{
        "matches": [{
            "id": 42,
            "season": 2,
            "playedAt": "2021-03-04T19:30:00Z",
            "durationMs": 1500000,
            "blueTeam": {"teamId": "BLUE", "win": true},
            "redTeam": {"teamId": "RED", "win": false},
            "participants": [{
                "participantId": 1,
                "team": "BLUE",
                "lane": "MID",
                "championId": 103,
                "stats": {"kills": 8, "deaths": 1, "assists": 5, "visionScore": 22}
            }],
            "timeline": [{"timestampMs": 60000, "events": [
                {"type": "CHAMPION_KILL", "timestampMs": 45000, "killerId": 1, "victimId": 6}
            ]}]
        }],
        "players": [{"matchId": 42, "roster": {"1": "alice"}}],
        "champions": [{"id": 103, "name": "Ahri"}]
    }"#;

    #[tokio::test]
    async fn builds_stores_from_json() {
        let snapshot = ArchiveSnapshot::from_json(SNAPSHOT).unwrap();
        let stores = snapshot.into_stores(Path::new(".")).await.unwrap();

        let record = stores.matches.find_by_id(42).await.unwrap().unwrap();
        assert_eq!(record.season, 2);
        assert_eq!(record.participants[0].stats.vision_score, 22);
        assert_eq!(record.events().count(), 1);

        let rosters: Vec<_> = stores.identities.find_all().try_collect().await.unwrap();
        assert_eq!(rosters[0].player_name(1), Some("alice"));

        assert_eq!(stores.champions.by_id(103).await.unwrap().name, "Ahri");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let result = ArchiveSnapshot::load(Path::new("/nonexistent/archive.json")).await;
        assert!(matches!(result, Err(StatsError::Io(_))));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let result = ArchiveSnapshot::from_json("{\"matches\": 3}");
        assert!(matches!(result, Err(StatsError::Json(_))));
    }
}
