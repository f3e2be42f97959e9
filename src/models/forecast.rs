use serde::{Deserialize, Serialize};

/// Multi-day forecast for one place, as returned by the forecast source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub periods: Vec<ForecastPeriod>, // 3-hour intervals, in source order
}

/// A single forecast period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPeriod {
    pub timestamp: String, // "YYYY-MM-DD HH:MM:SS"
    pub description: String,
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub humidity_percent: f64,
    pub wind_speed: f64,
}

impl ForecastPeriod {
    /// Calendar date portion of the timestamp (everything before the first space)
    pub fn date_key(&self) -> &str {
        self.timestamp
            .split_once(' ')
            .map(|(date, _)| date)
            .unwrap_or(&self.timestamp)
    }
}

/// One summary record per calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDigest {
    pub date: String,
    pub avg_temp_c: f64,
    pub description: String,
    pub category: Option<WeatherCategory>,
}

/// Coarse weather categories used for destination scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCategory {
    Sunny,
    Cloudy,
    Rainy,
}

/// Keyword rules evaluated top-down; the first match wins.
pub const CATEGORY_RULES: [(WeatherCategory, &[&str]); 3] = [
    (WeatherCategory::Sunny, &["clear", "sunny"]),
    (WeatherCategory::Cloudy, &["cloud"]),
    (WeatherCategory::Rainy, &["rain", "drizzle"]),
];

impl WeatherCategory {
    /// Classify a condition description, case-insensitively
    pub fn classify(description: &str) -> Option<Self> {
        let description = description.to_lowercase();
        CATEGORY_RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| description.contains(k)))
            .map(|(category, _)| *category)
    }

    /// Score contribution of one day in this category
    pub fn score(&self) -> i32 {
        match self {
            WeatherCategory::Sunny => 1,
            WeatherCategory::Cloudy => 0,
            WeatherCategory::Rainy => -1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCategory::Sunny => "sunny",
            WeatherCategory::Cloudy => "cloudy",
            WeatherCategory::Rainy => "rainy",
        }
    }
}

impl std::fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
