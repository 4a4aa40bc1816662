use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::archive::models::ChampionId;
use crate::stats::StatsError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Champion {
    pub id: ChampionId,
    pub name: String,
    #[serde(skip)]
    pub image: Option<Vec<u8>>,
}

impl Champion {
    pub fn new(id: ChampionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }
}

/// Static game data lookup used to label records and serve champion artwork.
#[async_trait]
pub trait ChampionCatalog: Send + Sync {
    async fn by_id(&self, id: ChampionId) -> Result<Champion, StatsError>;
}

#[derive(Debug, Default)]
pub struct InMemoryChampionCatalog {
    champions: Arc<RwLock<HashMap<ChampionId, Champion>>>,
}

impl InMemoryChampionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_champions(champions: Vec<Champion>) -> Self {
        let champions = champions.into_iter().map(|c| (c.id, c)).collect();
        Self {
            champions: Arc::new(RwLock::new(champions)),
        }
    }

    pub async fn insert(&self, champion: Champion) {
        self.champions.write().await.insert(champion.id, champion);
    }
}

#[async_trait]
impl ChampionCatalog for InMemoryChampionCatalog {
    #[instrument(skip(self))]
    async fn by_id(&self, id: ChampionId) -> Result<Champion, StatsError> {
        match self.champions.read().await.get(&id) {
            Some(champion) => Ok(champion.clone()),
            None => {
                debug!(champion_id = id, "Champion not in catalog");
                Err(StatsError::NotFound(format!("champion {}", id)))
            }
        }
    }
}
