use super::cache::{Clock, ForecastCache, SystemClock};
use crate::datasources::{ForecastQuery, ForecastSource};
use crate::models::{Coordinates, ForecastPayload};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Resolves locations to forecasts through a time-bounded cache.
///
/// The cache is keyed by the caller's location key alone. A place looked up
/// by name and later by coordinates under the same key shares one slot.
pub struct ForecastProvider<S, C = SystemClock> {
    source: S,
    clock: C,
    cache: ForecastCache,
}

impl<S: ForecastSource> ForecastProvider<S> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self::with_clock(source, SystemClock, ttl)
    }
}

impl<S: ForecastSource, C: Clock> ForecastProvider<S, C> {
    pub fn with_clock(source: S, clock: C, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            cache: ForecastCache::new(ttl),
        }
    }

    /// Forecast for `location_key`, or `None` when the source cannot provide one.
    ///
    /// A fresh cache hit never reaches the source. Otherwise one fetch is made,
    /// by coordinates when given and by name otherwise; failures are logged
    /// and not cached.
    pub async fn get_forecast(
        &mut self,
        location_key: &str,
        coordinates: Option<Coordinates>,
    ) -> Option<Arc<ForecastPayload>> {
        let now = self.clock.now();

        if let Some(payload) = self.cache.get_fresh(location_key, now) {
            debug!("Forecast cache hit for {}", location_key);
            return Some(payload);
        }

        let query = match coordinates {
            Some(c) => ForecastQuery::Coordinates(c),
            None => ForecastQuery::Name(location_key.to_string()),
        };

        match self.source.fetch_forecast(&query).await {
            Ok(payload) => {
                info!(
                    "Fetched forecast for {} ({} periods), caching for {}s",
                    location_key,
                    payload.periods.len(),
                    self.cache.ttl().as_secs()
                );
                let payload = Arc::new(payload);
                self.cache
                    .insert(location_key, Arc::clone(&payload), self.clock.now());
                Some(payload)
            }
            Err(e) => {
                warn!("Forecast unavailable for {}: {}", location_key, e);
                None
            }
        }
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }
}
