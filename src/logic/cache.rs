use crate::models::ForecastPayload;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Source of the current time, injectable for deterministic expiry
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: Arc<ForecastPayload>,
    pub fetched_at: DateTime<Utc>,
}

/// Forecast payloads keyed by location identity.
///
/// Entries are never evicted. An entry at least `ttl` old is simply
/// ignored on read and replaced by the next successful fetch.
#[derive(Debug)]
pub struct ForecastCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ForecastCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Cached payload for `key` if it is younger than the TTL at `now`
    pub fn get_fresh(&self, key: &str, now: DateTime<Utc>) -> Option<Arc<ForecastPayload>> {
        let entry = self.entries.get(key)?;
        let age = now.signed_duration_since(entry.fetched_at);
        // A negative age (clock moved backwards) converts to an error and counts as stale
        let fresh = age.to_std().map(|age| age < self.ttl).unwrap_or(false);
        fresh.then(|| Arc::clone(&entry.payload))
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        payload: Arc<ForecastPayload>,
        now: DateTime<Utc>,
    ) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                payload,
                fetched_at: now,
            },
        );
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ForecastCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
