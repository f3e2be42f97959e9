use super::forecast::WeatherCategory;
use serde::{Deserialize, Serialize};

pub const NO_RECOMMENDATION: &str =
    "Sorry, I couldn't find enough weather data to recommend a destination.";

/// Sunny/cloudy/rainy day counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub sunny: u32,
    pub cloudy: u32,
    pub rainy: u32,
}

impl CategoryTally {
    pub fn record(&mut self, category: WeatherCategory) {
        match category {
            WeatherCategory::Sunny => self.sunny += 1,
            WeatherCategory::Cloudy => self.cloudy += 1,
            WeatherCategory::Rainy => self.rainy += 1,
        }
    }

    pub fn add(&mut self, other: &CategoryTally) {
        self.sunny += other.sunny;
        self.cloudy += other.cloudy;
        self.rainy += other.rainy;
    }
}

/// Accumulated score for one candidate location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationScore {
    pub name: String,
    pub score: i32,
    pub tally: CategoryTally,
}

impl LocationScore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            tally: CategoryTally::default(),
        }
    }

    pub fn record(&mut self, category: WeatherCategory) {
        self.score += category.score();
        self.tally.record(category);
    }
}

/// Outcome of comparing candidate destinations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub winner: Option<String>,
    pub scores: Vec<LocationScore>, // processing order, fetched candidates only
    pub totals: CategoryTally,
}

impl Recommendation {
    pub fn winner_score(&self) -> Option<&LocationScore> {
        let winner = self.winner.as_ref()?;
        self.scores.iter().find(|s| &s.name == winner)
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(best) = self.winner_score() else {
            return write!(f, "{}", NO_RECOMMENDATION);
        };

        writeln!(
            f,
            "I recommend {} for your trip! It has the best forecast with a score of {}.",
            best.name, best.score
        )?;
        writeln!(f)?;
        write!(f, "Breakdown:")?;
        for s in &self.scores {
            write!(
                f,
                "\n{}: {} sunny, {} cloudy, {} rainy day(s) (score {})",
                s.name, s.tally.sunny, s.tally.cloudy, s.tally.rainy, s.score
            )?;
        }
        write!(
            f,
            "\n\nOverall: {} sunny, {} cloudy, {} rainy day(s)",
            self.totals.sunny, self.totals.cloudy, self.totals.rainy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_score_accumulates() {
        let mut score = LocationScore::new("Paris");
        score.record(WeatherCategory::Sunny);
        score.record(WeatherCategory::Sunny);
        score.record(WeatherCategory::Cloudy);
        score.record(WeatherCategory::Rainy);
        assert_eq!(score.score, 1);
        assert_eq!(
            score.tally,
            CategoryTally {
                sunny: 2,
                cloudy: 1,
                rainy: 1
            }
        );
    }

    #[test]
    fn empty_recommendation_renders_fallback() {
        let rec = Recommendation {
            winner: None,
            scores: Vec::new(),
            totals: CategoryTally::default(),
        };
        assert_eq!(rec.to_string(), NO_RECOMMENDATION);
    }

    #[test]
    fn recommendation_renders_breakdown_in_order() {
        let mut rome = LocationScore::new("Rome");
        rome.record(WeatherCategory::Sunny);
        let mut oslo = LocationScore::new("Oslo");
        oslo.record(WeatherCategory::Rainy);

        let rec = Recommendation {
            winner: Some("Rome".into()),
            scores: vec![oslo, rome],
            totals: CategoryTally {
                sunny: 1,
                cloudy: 0,
                rainy: 1,
            },
        };
        let text = rec.to_string();
        assert!(text.starts_with("I recommend Rome for your trip!"));
        let oslo_pos = text.find("Oslo: 0 sunny, 0 cloudy, 1 rainy").unwrap();
        let rome_pos = text.find("Rome: 1 sunny, 0 cloudy, 0 rainy").unwrap();
        assert!(oslo_pos < rome_pos);
        assert!(text.ends_with("\n\nOverall: 1 sunny, 0 cloudy, 1 rainy day(s)"));
    }
}
