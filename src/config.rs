use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::stats::StatsError;

pub const WORKERS_ENV: &str = "STATS_WORKERS";
pub const FETCH_CONCURRENCY_ENV: &str = "STATS_FETCH_CONCURRENCY";

const DEFAULT_FETCH_CONCURRENCY: usize = 16;

/// Sizing for the aggregation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Threads in the reduction pool.
    pub workers: usize,
    /// Match lookups allowed in flight at once.
    pub fetch_concurrency: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
        }
    }
}

impl AggregationConfig {
    /// Defaults overridden by `STATS_WORKERS` and `STATS_FETCH_CONCURRENCY`.
    pub fn from_env() -> Result<Self, StatsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StatsError> {
        let defaults = Self::default();
        Ok(Self {
            workers: parse_positive(WORKERS_ENV, lookup(WORKERS_ENV))?.unwrap_or(defaults.workers),
            fetch_concurrency: parse_positive(FETCH_CONCURRENCY_ENV, lookup(FETCH_CONCURRENCY_ENV))?
                .unwrap_or(defaults.fetch_concurrency),
        })
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_fetch_concurrency(mut self, fetch_concurrency: usize) -> Self {
        self.fetch_concurrency = fetch_concurrency;
        self
    }

    pub fn validate(&self) -> Result<(), StatsError> {
        if self.workers == 0 {
            return Err(StatsError::Config("workers must be at least 1".to_string()));
        }
        if self.fetch_concurrency == 0 {
            return Err(StatsError::Config(
                "fetch concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_positive(key: &str, raw: Option<String>) -> Result<Option<usize>, StatsError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match NonZeroUsize::from_str(raw.trim()) {
        Ok(value) => Ok(Some(value.get())),
        Err(_) => Err(StatsError::Config(format!(
            "{} must be a positive integer, got {:?}",
            key, raw
        ))),
    }
}
