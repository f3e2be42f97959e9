pub mod cache;
pub mod digest;
pub mod provider;
pub mod recommend;

pub use cache::{Clock, SystemClock};
pub use digest::digest;
pub use provider::ForecastProvider;
pub use recommend::RecommendationEngine;
