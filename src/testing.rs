//! Test doubles shared by unit tests across modules.

use crate::datasources::{ForecastQuery, ForecastSource};
use crate::error::{Result, TravelBotError};
use crate::logic::cache::Clock;
use crate::models::{ForecastPayload, ForecastPeriod};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Utc.timestamp_opt(1_717_200_000, 0).unwrap())),
        }
    }

    pub fn advance(&self, secs: i64) {
        self.now.set(self.now.get() + Duration::seconds(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Forecast source serving canned payloads and recording every call.
///
/// Payloads are keyed by the query's display form: the place name for
/// name queries, `"lat, lon"` for coordinate queries.
#[derive(Default)]
pub struct StubSource {
    payloads: HashMap<String, ForecastPayload>,
    calls: RefCell<Vec<ForecastQuery>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, payload: ForecastPayload) -> Self {
        self.payloads.insert(key.to_string(), payload);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls(&self) -> Vec<ForecastQuery> {
        self.calls.borrow().clone()
    }
}

impl ForecastSource for StubSource {
    async fn fetch_forecast(&self, query: &ForecastQuery) -> Result<ForecastPayload> {
        self.calls.borrow_mut().push(query.clone());
        self.payloads
            .get(&query.to_string())
            .cloned()
            .ok_or_else(|| TravelBotError::DataSourceUnavailable(format!("404 for {}", query)))
    }
}

/// Build a payload with one period per `(timestamp, description, temp)` tuple
pub fn payload(periods: &[(&str, &str, f64)]) -> ForecastPayload {
    ForecastPayload {
        periods: periods
            .iter()
            .map(|(timestamp, description, temp)| ForecastPeriod {
                timestamp: timestamp.to_string(),
                description: description.to_string(),
                temp_c: *temp,
                feels_like_c: *temp,
                humidity_percent: 60.0,
                wind_speed: 2.5,
            })
            .collect(),
    }
}

/// Build a payload with one noon period per day, starting 2024-06-01
pub fn daily_payload(descriptions: &[&str]) -> ForecastPayload {
    let stamps: Vec<String> = (0..descriptions.len())
        .map(|i| format!("2024-06-{:02} 12:00:00", i + 1))
        .collect();
    let periods: Vec<(&str, &str, f64)> = stamps
        .iter()
        .zip(descriptions)
        .map(|(stamp, description)| (stamp.as_str(), *description, 20.0))
        .collect();
    payload(&periods)
}
