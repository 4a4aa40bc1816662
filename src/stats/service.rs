use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use rayon::prelude::*;
use tokio::sync::oneshot;
use tracing::{debug, info, instrument, warn};

use crate::archive::{ChampionId, MatchStore, PlayerIdentityStore};
use crate::champions::ChampionCatalog;
use crate::config::AggregationConfig;

use super::{
    collectors::{default_collectors, RecordCollector},
    join::{fan_out, join_matches, JoinedMatch, ParticipantItem, SeasonFilter},
    PlayerStats, RecordSet, StatsError,
};

pub struct StatsService {
    identities: Arc<dyn PlayerIdentityStore>,
    matches: Arc<dyn MatchStore>,
    champions: Option<Arc<dyn ChampionCatalog>>,
    collectors: Arc<Vec<Arc<dyn RecordCollector>>>,
    pool: Arc<rayon::ThreadPool>,
    config: AggregationConfig,
}

impl StatsService {
    pub fn builder(
        identities: Arc<dyn PlayerIdentityStore>,
        matches: Arc<dyn MatchStore>,
    ) -> StatsServiceBuilder {
        StatsServiceBuilder::new(identities, matches)
    }

    pub fn collectors(&self) -> Vec<Arc<dyn RecordCollector>> {
        self.collectors.as_ref().clone()
    }

    /// Career totals for every named player with at least one game in `season`,
    /// ordered by player name.
    #[instrument(skip(self, season))]
    pub async fn get_player_stats(
        &self,
        season: impl Into<SeasonFilter>,
    ) -> Result<Vec<PlayerStats>, StatsError> {
        let season = season.into();
        debug!(?season, "Computing player stats");
        let joined = self.join(season).await?;
        let matches = joined.len();

        let stats = self
            .run_on_pool(move || reduce_player_stats(&joined))
            .await?;

        info!(matches, players = stats.len(), "Aggregated player stats");
        Ok(stats)
    }

    /// Best (or worst, for inverted metrics) holders of every tracked metric in `season`.
    #[instrument(skip(self, season))]
    pub async fn get_records(
        &self,
        season: impl Into<SeasonFilter>,
    ) -> Result<RecordSet, StatsError> {
        let season = season.into();
        debug!(?season, "Computing records");
        let joined = self.join(season).await?;
        let matches = joined.len();

        let collectors = Arc::clone(&self.collectors);
        let records = self
            .run_on_pool(move || reduce_records(&joined, &collectors))
            .await?;

        info!(matches, metrics = records.len(), "Aggregated records");
        Ok(self.label_champions(records).await)
    }

    /// PNG artwork for a champion.
    #[instrument(skip(self))]
    pub async fn champion_image(&self, champion_id: ChampionId) -> Result<Vec<u8>, StatsError> {
        let catalog = self
            .champions
            .as_ref()
            .ok_or_else(|| StatsError::NotFound("champion catalog".to_string()))?;

        catalog.by_id(champion_id).await?.image.ok_or_else(|| {
            StatsError::NotFound(format!("image for champion {}", champion_id))
        })
    }

    async fn join(&self, season: SeasonFilter) -> Result<Vec<JoinedMatch>, StatsError> {
        join_matches(
            self.identities.as_ref(),
            self.matches.as_ref(),
            season,
            self.config.fetch_concurrency,
        )
        .await
    }

    /// Runs `work` on the reduction pool. If the caller stops waiting before
    /// the job starts, the job is skipped.
    async fn run_on_pool<T, F>(&self, work: F) -> Result<T, StatsError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.pool.spawn(move || {
            if tx.is_closed() {
                debug!("Aggregation abandoned before it started");
                return;
            }
            let _ = tx.send(work());
        });

        rx.await
            .map_err(|_| StatsError::Worker("aggregation job ended without a result".to_string()))
    }

    async fn label_champions(&self, records: RecordSet) -> RecordSet {
        let Some(catalog) = &self.champions else {
            return records;
        };

        let lookups = records.champion_ids().into_iter().map(|id| async move {
            match catalog.by_id(id).await {
                Ok(champion) => Some((id, champion.name)),
                Err(err) => {
                    warn!(?err, champion_id = id, "Failed to resolve champion name");
                    None
                }
            }
        });
        let names: HashMap<ChampionId, String> =
            join_all(lookups).await.into_iter().flatten().collect();

        records.label_champions(&names)
    }
}

/// Partitions participant items by player name and folds each partition in parallel.
pub fn reduce_player_stats(joined: &[JoinedMatch]) -> Vec<PlayerStats> {
    let mut partitions: HashMap<&str, Vec<ParticipantItem<'_>>> = HashMap::new();
    for item in joined.iter().flat_map(fan_out) {
        partitions.entry(item.player).or_default().push(item);
    }

    let mut stats: Vec<PlayerStats> = partitions
        .into_par_iter()
        .map(|(player, items)| {
            items
                .par_iter()
                .map(PlayerStats::derive)
                .reduce(PlayerStats::default, PlayerStats::combine)
                .with_player_name(player)
        })
        .collect();

    stats.sort_by(|a, b| a.player_name.cmp(&b.player_name));
    stats
}

/// Maps every joined match to its record set and reduces them with the max combine.
pub fn reduce_records(
    joined: &[JoinedMatch],
    collectors: &[Arc<dyn RecordCollector>],
) -> RecordSet {
    joined
        .par_iter()
        .map(|joined| RecordSet::of_match(joined, collectors))
        .reduce(RecordSet::new, RecordSet::combine)
}

pub struct StatsServiceBuilder {
    identities: Arc<dyn PlayerIdentityStore>,
    matches: Arc<dyn MatchStore>,
    champions: Option<Arc<dyn ChampionCatalog>>,
    collectors: Vec<Arc<dyn RecordCollector>>,
    config: AggregationConfig,
}

impl StatsServiceBuilder {
    fn new(identities: Arc<dyn PlayerIdentityStore>, matches: Arc<dyn MatchStore>) -> Self {
        Self {
            identities,
            matches,
            champions: None,
            collectors: default_collectors(),
            config: AggregationConfig::default(),
        }
    }

    pub fn with_collector(mut self, collector: Arc<dyn RecordCollector>) -> Self {
        self.collectors.push(collector);
        self
    }

    /// Replaces the default collectors.
    pub fn with_collectors(mut self, collectors: Vec<Arc<dyn RecordCollector>>) -> Self {
        self.collectors = collectors;
        self
    }

    pub fn with_champion_catalog(mut self, catalog: Arc<dyn ChampionCatalog>) -> Self {
        self.champions = Some(catalog);
        self
    }

    pub fn with_config(mut self, config: AggregationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<StatsService, StatsError> {
        self.config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|index| format!("stats-worker-{}", index))
            .build()
            .map_err(|err| StatsError::Worker(err.to_string()))?;

        debug!(
            workers = self.config.workers,
            fetch_concurrency = self.config.fetch_concurrency,
            collectors = self.collectors.len(),
            "Built stats service"
        );

        Ok(StatsService {
            identities: self.identities,
            matches: self.matches,
            champions: self.champions,
            collectors: Arc::new(self.collectors),
            pool: Arc::new(pool),
            config: self.config,
        })
    }
}
