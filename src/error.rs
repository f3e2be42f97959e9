use thiserror::Error;

#[derive(Error, Debug)]
pub enum TravelBotError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be within -90..90 and longitude within -180..180"
    )]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

pub type Result<T> = std::result::Result<T, TravelBotError>;
