use crate::chat::{intent, Conversation, Intent, HELP_TEXT};
use crate::datasources::ForecastSource;
use crate::error::Result;
use crate::logic::{digest, Clock, ForecastProvider, RecommendationEngine, SystemClock};
use crate::models::{canonical_name, Location};
use crate::storage::LocationDirectory;

/// Answers one chat message at a time.
///
/// Owns the location directory and the forecast provider, so messages are
/// handled sequentially through `&mut self`.
pub struct TravelBot<S, C = SystemClock> {
    directory: LocationDirectory,
    provider: ForecastProvider<S, C>,
    engine: RecommendationEngine,
    conversation: Box<dyn Conversation>,
    default_location: String,
    temp_unit: &'static str,
}

impl<S: ForecastSource, C: Clock> TravelBot<S, C> {
    pub fn new(
        directory: LocationDirectory,
        provider: ForecastProvider<S, C>,
        conversation: Box<dyn Conversation>,
    ) -> Self {
        Self {
            directory,
            provider,
            engine: RecommendationEngine::new(),
            conversation,
            default_location: "London".to_string(),
            temp_unit: "°C",
        }
    }

    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        self.default_location = location.into();
        self
    }

    /// Temperature suffix matching the OpenWeatherMap `units` parameter
    pub fn with_units(mut self, units: &str) -> Self {
        self.temp_unit = match units {
            "imperial" => "°F",
            "standard" => "K",
            _ => "°C",
        };
        self
    }

    /// Route a raw chat message to the matching command and render the reply
    pub async fn handle_message(&mut self, message: &str) -> String {
        let intent = match intent::parse(message) {
            Ok(intent) => intent,
            Err(e) => return format!("Error: {}", e),
        };

        match intent {
            Intent::Empty => "Please enter a message.".to_string(),
            Intent::Save {
                name,
                latitude,
                longitude,
            } => match self.save_location(&name, latitude, longitude) {
                Ok(location) => format!("Saved {} at ({}).", location.name, location.coordinates),
                Err(e) => format!("Error: {}", e),
            },
            Intent::Weather { location } => {
                let location = location.unwrap_or_else(|| self.default_location.clone());
                self.weather(&location).await
            }
            Intent::Recommend { candidates } => self.recommend(&candidates).await,
            Intent::Locations => self.list_locations(),
            Intent::Help => HELP_TEXT.to_string(),
            Intent::Chat(raw) => self.conversation.respond(&raw),
        }
    }

    /// Daily forecast summary for one place
    pub async fn weather(&mut self, location: &str) -> String {
        let name = canonical_name(location);
        let coordinates = self.directory.get(&name).map(|l| l.coordinates);

        let Some(payload) = self.provider.get_forecast(&name, coordinates).await else {
            return format!("Unable to retrieve weather data for {}.", name);
        };

        let mut reply = format!("Weather forecast for {}:", name);
        for day in digest(&payload) {
            reply.push_str(&format!(
                "\n{}: {}, {}{}",
                day.date,
                day.description,
                format_temperature(day.avg_temp_c),
                self.temp_unit
            ));
        }
        reply.push_str("\n\nHope this helps!");
        reply
    }

    pub fn save_location(&mut self, name: &str, latitude: f64, longitude: f64) -> Result<Location> {
        self.directory.save(name, latitude, longitude)
    }

    pub async fn recommend(&mut self, candidates: &[String]) -> String {
        self.engine
            .recommend(candidates, &self.directory, &mut self.provider)
            .await
            .to_string()
    }

    pub fn list_locations(&self) -> String {
        if self.directory.is_empty() {
            return "No saved locations yet. Try: save <name> <latitude> <longitude>".to_string();
        }

        let mut reply = String::from("Saved locations:");
        for location in self.directory.all() {
            reply.push_str(&format!("\n{} ({})", location.name, location.coordinates));
        }
        reply
    }

    #[cfg(test)]
    pub fn provider(&self) -> &ForecastProvider<S, C> {
        &self.provider
    }
}

/// Whole numbers keep one decimal place ("20.0"), others print as-is ("21.35")
fn format_temperature(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
