use crate::models::{capitalize, DailyDigest, ForecastPayload, ForecastPeriod, WeatherCategory};

/// Number of distinct calendar days summarized per forecast
pub const MAX_DIGEST_DAYS: usize = 5;

/// Reduce a multi-period forecast to one summary per calendar day.
///
/// Periods are grouped by date first, then the first [`MAX_DIGEST_DAYS`]
/// dates in first-seen order are summarized. A period whose date was already
/// seen joins that day even if other dates came in between.
pub fn digest(payload: &ForecastPayload) -> Vec<DailyDigest> {
    group_by_date(&payload.periods)
        .into_iter()
        .take(MAX_DIGEST_DAYS)
        .map(|(date, periods)| summarize_day(date, &periods))
        .collect()
}

fn group_by_date(periods: &[ForecastPeriod]) -> Vec<(&str, Vec<&ForecastPeriod>)> {
    let mut days: Vec<(&str, Vec<&ForecastPeriod>)> = Vec::new();
    for period in periods {
        let date = period.date_key();
        match days.iter_mut().find(|(d, _)| *d == date) {
            Some((_, day)) => day.push(period),
            None => days.push((date, vec![period])),
        }
    }
    days
}

fn summarize_day(date: &str, periods: &[&ForecastPeriod]) -> DailyDigest {
    let avg_temp =
        periods.iter().map(|p| p.temp_c).sum::<f64>() / periods.len().max(1) as f64;

    let description = capitalize(most_common_description(periods));
    let category = WeatherCategory::classify(&description);

    DailyDigest {
        date: date.to_string(),
        avg_temp_c: round_to_hundredths(avg_temp),
        description,
        category,
    }
}

/// Mode of the descriptions; ties go to the one seen first
fn most_common_description<'a>(periods: &[&'a ForecastPeriod]) -> &'a str {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for &period in periods {
        let desc: &'a str = period.description.as_str();
        match counts.iter_mut().find(|(d, _)| *d == desc) {
            Some((_, n)) => *n += 1,
            None => counts.push((desc, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (desc, n) in counts {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((desc, n));
        }
    }
    best.map(|(desc, _)| desc).unwrap_or_default()
}

pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{daily_payload, payload};

    #[test]
    fn three_clear_days() {
        let forecast = payload(&[
            ("2024-06-01 09:00:00", "clear sky", 20.0),
            ("2024-06-01 12:00:00", "clear sky", 23.0),
            ("2024-06-01 15:00:00", "clear sky", 22.0),
            ("2024-06-02 09:00:00", "clear sky", 18.5),
            ("2024-06-02 12:00:00", "clear sky", 19.25),
            ("2024-06-03 12:00:00", "clear sky", 25.0),
        ]);

        let days = digest(&forecast);
        assert_eq!(days.len(), 3);
        assert!(days.iter().all(|d| d.description == "Clear sky"));
        assert!(days
            .iter()
            .all(|d| d.category == Some(WeatherCategory::Sunny)));

        assert_eq!(days[0].date, "2024-06-01");
        assert_eq!(days[0].avg_temp_c, 21.67);
        assert_eq!(days[1].avg_temp_c, 18.88);
        assert_eq!(days[2].avg_temp_c, 25.0);
    }

    #[test]
    fn at_most_five_distinct_days() {
        let forecast = daily_payload(&[
            "clear sky",
            "rain",
            "few clouds",
            "clear sky",
            "drizzle",
            "snow",
            "clear sky",
        ]);

        let days = digest(&forecast);
        assert_eq!(days.len(), 5);
        assert_eq!(days[4].date, "2024-06-05");
        assert_eq!(days[4].description, "Drizzle");
    }

    #[test]
    fn first_five_dates_by_first_appearance() {
        let forecast = payload(&[
            ("2024-06-03 00:00:00", "rain", 10.0),
            ("2024-06-01 00:00:00", "clear sky", 20.0),
            ("2024-06-02 00:00:00", "clear sky", 20.0),
            ("2024-06-04 00:00:00", "clear sky", 20.0),
            ("2024-06-05 00:00:00", "clear sky", 20.0),
            ("2024-06-06 00:00:00", "clear sky", 20.0),
            // Late period for an admitted date still counts
            ("2024-06-03 03:00:00", "rain", 14.0),
        ]);

        let days = digest(&forecast);
        let dates: Vec<_> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(
            dates,
            vec![
                "2024-06-03",
                "2024-06-01",
                "2024-06-02",
                "2024-06-04",
                "2024-06-05"
            ]
        );
        assert_eq!(days[0].avg_temp_c, 12.0);
    }

    #[test]
    fn mode_ties_go_to_first_seen() {
        let forecast = payload(&[
            ("2024-06-01 00:00:00", "light rain", 10.0),
            ("2024-06-01 03:00:00", "overcast clouds", 10.0),
            ("2024-06-01 06:00:00", "overcast clouds", 10.0),
            ("2024-06-01 09:00:00", "light rain", 10.0),
            ("2024-06-02 00:00:00", "scattered clouds", 10.0),
            ("2024-06-02 03:00:00", "clear sky", 10.0),
            ("2024-06-02 06:00:00", "clear sky", 10.0),
        ]);

        let days = digest(&forecast);
        assert_eq!(days[0].description, "Light rain");
        assert_eq!(days[0].category, Some(WeatherCategory::Rainy));
        assert_eq!(days[1].description, "Clear sky");
    }

    #[test]
    fn unmatched_description_has_no_category() {
        let days = digest(&daily_payload(&["mist"]));
        assert_eq!(days[0].description, "Mist");
        assert_eq!(days[0].category, None);
    }

    #[test]
    fn empty_forecast_yields_no_days() {
        assert!(digest(&payload(&[])).is_empty());
    }

    #[test]
    fn rounding_to_two_places() {
        assert_eq!(round_to_hundredths(1.234), 1.23);
        assert_eq!(round_to_hundredths(-3.456), -3.46);
        assert_eq!(round_to_hundredths(7.0), 7.0);
    }
}
