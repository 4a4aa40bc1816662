use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::models::{MatchId, MatchRecord, PlayerIdentityRecord};
use crate::stats::StatsError;

/// Read access to the stored match rosters.
pub trait PlayerIdentityStore: Send + Sync {
    fn find_all(&self) -> BoxStream<'_, Result<PlayerIdentityRecord, StatsError>>;
}

/// Read access to the stored match documents.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn find_by_id(&self, id: MatchId) -> Result<Option<MatchRecord>, StatsError>;
}

#[derive(Debug, Default)]
pub struct InMemoryPlayerIdentityStore {
    records: Arc<RwLock<Vec<PlayerIdentityRecord>>>,
}

impl InMemoryPlayerIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<PlayerIdentityRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub async fn insert(&self, record: PlayerIdentityRecord) {
        self.records.write().await.push(record);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

impl PlayerIdentityStore for InMemoryPlayerIdentityStore {
    fn find_all(&self) -> BoxStream<'_, Result<PlayerIdentityRecord, StatsError>> {
        let records = Arc::clone(&self.records);
        stream::once(async move { records.read().await.clone() })
            .flat_map(|records| stream::iter(records.into_iter().map(Ok)))
            .boxed()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    matches: Arc<RwLock<HashMap<MatchId, MatchRecord>>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matches(matches: Vec<MatchRecord>) -> Self {
        let matches = matches.into_iter().map(|m| (m.id, m)).collect();
        Self {
            matches: Arc::new(RwLock::new(matches)),
        }
    }

    pub async fn insert(&self, record: MatchRecord) {
        self.matches.write().await.insert(record.id, record);
    }

    pub async fn len(&self) -> usize {
        self.matches.read().await.len()
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MatchId) -> Result<Option<MatchRecord>, StatsError> {
        let record = self.matches.read().await.get(&id).cloned();
        if record.is_none() {
            debug!(match_id = id, "Match not found in memory");
        }
        Ok(record)
    }
}
