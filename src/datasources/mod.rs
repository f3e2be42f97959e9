pub mod openweathermap;

pub use openweathermap::OpenWeatherMapClient;

use crate::error::Result;
use crate::models::{Coordinates, ForecastPayload};

/// How a forecast request identifies the place
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastQuery {
    Coordinates(Coordinates),
    Name(String),
}

impl std::fmt::Display for ForecastQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForecastQuery::Coordinates(c) => write!(f, "{}", c),
            ForecastQuery::Name(name) => write!(f, "{}", name),
        }
    }
}

/// A remote service able to produce a multi-day forecast.
///
/// Implementations make a single attempt per call; retries and caching are
/// the caller's concern.
pub trait ForecastSource {
    async fn fetch_forecast(&self, query: &ForecastQuery) -> Result<ForecastPayload>;
}
