#![allow(dead_code)] // Test utilities may not all be used in every test

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use match_stats::archive::{
    InMemoryMatchStore, MatchId, MatchRecord, MatchStore, PlayerIdentityRecord,
    PlayerIdentityStore,
};
use match_stats::StatsError;

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Yields the given rosters, then fails mid-stream.
pub struct FailingIdentityStore {
    records: Vec<PlayerIdentityRecord>,
}

impl FailingIdentityStore {
    pub fn new(records: Vec<PlayerIdentityRecord>) -> Self {
        Self { records }
    }
}

impl PlayerIdentityStore for FailingIdentityStore {
    fn find_all(&self) -> BoxStream<'_, Result<PlayerIdentityRecord, StatsError>> {
        stream::iter(self.records.clone().into_iter().map(Ok))
            .chain(stream::once(async {
                Err(StatsError::Repository("cursor closed".to_string()))
            }))
            .boxed()
    }
}

/// Delays every lookup and tracks how many are in flight at once.
pub struct SlowMatchStore {
    inner: InMemoryMatchStore,
    delay: Duration,
    in_flight: AtomicUsize,
    pub peak_in_flight: Arc<AtomicUsize>,
}

impl SlowMatchStore {
    pub fn new(matches: Vec<MatchRecord>, delay: Duration) -> Self {
        Self {
            inner: InMemoryMatchStore::with_matches(matches),
            delay,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl MatchStore for SlowMatchStore {
    async fn find_by_id(&self, id: MatchId) -> Result<Option<MatchRecord>, StatsError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }
}
