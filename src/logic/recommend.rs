use super::cache::Clock;
use super::digest::digest;
use super::provider::ForecastProvider;
use crate::datasources::ForecastSource;
use crate::models::{canonical_name, CategoryTally, LocationScore, Recommendation};
use crate::storage::LocationDirectory;
use tracing::{debug, info};

/// Picks the candidate destination with the best multi-day outlook.
///
/// Each forecast day scores +1 when sunny, 0 when cloudy and -1 when rainy.
/// Candidates without forecast data are skipped. The highest total wins, and
/// among equal totals the candidate listed first wins.
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    pub async fn recommend<S, C>(
        &self,
        candidates: &[impl AsRef<str>],
        directory: &LocationDirectory,
        provider: &mut ForecastProvider<S, C>,
    ) -> Recommendation
    where
        S: ForecastSource,
        C: Clock,
    {
        let mut scores: Vec<LocationScore> = Vec::new();
        let mut totals = CategoryTally::default();

        for candidate in candidates {
            let name = canonical_name(candidate.as_ref());
            if name.is_empty() {
                continue;
            }

            let coordinates = directory.get(&name).map(|l| l.coordinates);
            let Some(payload) = provider.get_forecast(&name, coordinates).await else {
                debug!("Skipping {}: no forecast data", name);
                continue;
            };

            let mut score = LocationScore::new(name);
            for day in digest(&payload) {
                if let Some(category) = day.category {
                    score.record(category);
                }
            }
            totals.add(&score.tally);
            scores.push(score);
        }

        let winner = pick_winner(&scores).map(|s| s.name.clone());
        if let Some(ref name) = winner {
            info!(
                "Recommending {} out of {} candidate(s) with data",
                name,
                scores.len()
            );
        }

        Recommendation {
            winner,
            scores,
            totals,
        }
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// First-seen strictly-greater arg-max
fn pick_winner(scores: &[LocationScore]) -> Option<&LocationScore> {
    let mut best: Option<&LocationScore> = None;
    for score in scores {
        if best.map_or(true, |b| score.score > b.score) {
            best = Some(score);
        }
    }
    best
}
