use crate::error::{Result, TravelBotError};
use serde::{Deserialize, Serialize};

/// A validated latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let lat_ok = (-90.0..=90.0).contains(&latitude);
        let lon_ok = (-180.0..=180.0).contains(&longitude);
        if !lat_ok || !lon_ok {
            return Err(TravelBotError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// A named place saved in the location directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Location {
    pub fn new(name: &str, coordinates: Coordinates) -> Self {
        Self {
            name: canonical_name(name),
            coordinates,
        }
    }
}

/// Normalize a place name to its canonical capitalized form.
///
/// Each whitespace-separated word gets an upper-case first letter and a
/// lower-case remainder, and runs of whitespace collapse to one space:
/// `"  new   YORK "` becomes `"New York"`.
pub fn canonical_name(name: &str) -> String {
    name.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-case the first character and lower-case the rest
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_accept_bounds() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn coordinates_reject_out_of_range() {
        assert!(matches!(
            Coordinates::new(91.0, 0.0),
            Err(TravelBotError::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            Coordinates::new(0.0, -181.0),
            Err(TravelBotError::InvalidCoordinates { .. })
        ));
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn canonical_name_capitalizes_words() {
        assert_eq!(canonical_name("london"), "London");
        assert_eq!(canonical_name("  new   YORK "), "New York");
        assert_eq!(canonical_name("PARIS"), "Paris");
        assert_eq!(canonical_name(""), "");
    }

    #[test]
    fn capitalize_lowers_remainder() {
        assert_eq!(capitalize("clear SKY"), "Clear sky");
        assert_eq!(capitalize("émile"), "Émile");
    }
}
