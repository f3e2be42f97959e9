use super::{ForecastQuery, ForecastSource};
use crate::config::OpenWeatherMapConfig;
use crate::error::{Result, TravelBotError};
use crate::models::forecast::{ForecastPayload, ForecastPeriod};
use reqwest::Url;
use serde::Deserialize;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt_txt: String,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    #[serde(default)]
    wind: Option<OwmWind>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Build the 5-day/3-hour forecast URL, preferring coordinates over a name query
    fn forecast_url(&self, query: &ForecastQuery) -> Result<Url> {
        let endpoint = format!("{}/forecast", self.config.base_url.trim_end_matches('/'));

        let mut params: Vec<(&str, String)> = match query {
            ForecastQuery::Coordinates(c) => vec![
                ("lat", c.latitude.to_string()),
                ("lon", c.longitude.to_string()),
            ],
            ForecastQuery::Name(name) => vec![("q", name.clone())],
        };
        params.push(("appid", self.config.api_key.clone()));
        params.push(("units", self.config.units.clone()));

        Url::parse_with_params(&endpoint, &params)
            .map_err(|e| TravelBotError::Config(format!("Invalid OpenWeatherMap URL: {}", e)))
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, location: &str) -> Result<bool> {
        let url = self.forecast_url(&ForecastQuery::Name(location.to_string()))?;

        let response =
            self.client.get(url).send().await.map_err(|e| {
                TravelBotError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        Ok(response.status().is_success())
    }

    fn convert_response(response: OwmForecastResponse) -> ForecastPayload {
        let periods = response
            .list
            .into_iter()
            .map(Self::convert_forecast_item)
            .collect();

        ForecastPayload { periods }
    }

    fn convert_forecast_item(item: OwmForecastItem) -> ForecastPeriod {
        let description = item
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_default();

        ForecastPeriod {
            timestamp: item.dt_txt,
            description,
            temp_c: item.main.temp,
            feels_like_c: item.main.feels_like,
            humidity_percent: item.main.humidity,
            wind_speed: item.wind.map(|w| w.speed).unwrap_or(0.0),
        }
    }
}

impl ForecastSource for OpenWeatherMapClient {
    /// Fetch 5-day/3-hour forecast from OpenWeatherMap
    async fn fetch_forecast(&self, query: &ForecastQuery) -> Result<ForecastPayload> {
        let url = self.forecast_url(query)?;

        let response =
            self.client.get(url).send().await.map_err(|e| {
                TravelBotError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TravelBotError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {} for {}: {}",
                status, query, body
            )));
        }

        let owm_response: OwmForecastResponse = response.json().await.map_err(|e| {
            TravelBotError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        Ok(Self::convert_response(owm_response))
    }
}
