use crate::error::{Result, TravelBotError};

pub const SAVE_USAGE: &str = "Usage: save <name> <latitude> <longitude>";
pub const RECOMMEND_USAGE: &str = "Usage: recommend <place> <place> ...";

/// What a chat message asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Empty,
    Save {
        name: String,
        latitude: f64,
        longitude: f64,
    },
    Weather {
        location: Option<String>,
    },
    Recommend {
        candidates: Vec<String>,
    },
    Locations,
    Help,
    /// No keyword matched; carries the message verbatim
    Chat(String),
}

/// Classify a message by fixed keywords.
///
/// Keywords are matched as whole words, case-insensitively, in the order
/// `save`, `recommend`, `weather`. A message consisting only of `locations`
/// or `help` lists saved places or shows usage. Anything else is chat.
pub fn parse(message: &str) -> Result<Intent> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Ok(Intent::Empty);
    }

    let lowered = trimmed.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    if let Some(rest) = after_keyword(&words, "save") {
        return parse_save(rest);
    }

    if let Some(rest) = after_keyword(&words, "recommend") {
        return parse_recommend(rest);
    }

    if let Some(rest) = after_keyword(&words, "weather") {
        return Ok(Intent::Weather {
            location: weather_location(rest),
        });
    }

    match words.as_slice() {
        [only] if strip_punctuation(only) == "locations" => return Ok(Intent::Locations),
        [only] if strip_punctuation(only) == "help" => return Ok(Intent::Help),
        _ => {}
    }

    Ok(Intent::Chat(message.to_string()))
}

/// Words following the first occurrence of `keyword`, if present
fn after_keyword<'a>(words: &'a [&'a str], keyword: &str) -> Option<&'a [&'a str]> {
    let pos = words
        .iter()
        .position(|w| strip_punctuation(w) == keyword)?;
    Some(&words[pos + 1..])
}

fn strip_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric() && c != '-' && c != '.')
        .trim_end_matches('.')
}

fn parse_save(args: &[&str]) -> Result<Intent> {
    let [name_words @ .., lat, lon] = args else {
        return Err(TravelBotError::InvalidCommand(SAVE_USAGE.into()));
    };
    if name_words.is_empty() {
        return Err(TravelBotError::InvalidCommand(SAVE_USAGE.into()));
    }

    let latitude = parse_number(lat, "latitude")?;
    let longitude = parse_number(lon, "longitude")?;

    Ok(Intent::Save {
        name: name_words.join(" "),
        latitude,
        longitude,
    })
}

fn parse_number(token: &str, what: &str) -> Result<f64> {
    token
        .trim_end_matches(',')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            TravelBotError::InvalidCommand(format!(
                "'{}' is not a valid {}. {}",
                token, what, SAVE_USAGE
            ))
        })
}

/// Place names separated by commas, `and`/`or`, or (without commas) whitespace
fn parse_recommend(args: &[&str]) -> Result<Intent> {
    let joined = args.join(" ");

    let candidates: Vec<String> = if joined.contains(',') {
        joined
            .split(',')
            .flat_map(|part| part.split(" and "))
            .flat_map(|part| part.split(" or "))
            .map(|part| part.trim().trim_start_matches("and ").trim_start_matches("or "))
            .map(|part| strip_punctuation(part.trim()).to_string())
            .filter(|part| !part.is_empty())
            .collect()
    } else {
        args.iter()
            .map(|w| strip_punctuation(w))
            .filter(|w| !w.is_empty() && *w != "and" && *w != "or")
            .map(str::to_string)
            .collect()
    };

    if candidates.is_empty() {
        return Err(TravelBotError::InvalidCommand(RECOMMEND_USAGE.into()));
    }
    Ok(Intent::Recommend { candidates })
}

/// Words after the last standalone `in` following `weather`, else all of them
fn weather_location(after_weather: &[&str]) -> Option<String> {
    let tail = match after_weather.iter().rposition(|w| *w == "in") {
        Some(pos) => &after_weather[pos + 1..],
        None => after_weather,
    };

    let location = tail
        .iter()
        .map(|w| strip_punctuation(w))
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    (!location.is_empty()).then_some(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message() {
        assert_eq!(parse("").unwrap(), Intent::Empty);
        assert_eq!(parse("   ").unwrap(), Intent::Empty);
    }

    #[test]
    fn weather_in_place() {
        assert_eq!(
            parse("What's the weather in New York?").unwrap(),
            Intent::Weather {
                location: Some("new york".into())
            }
        );
    }

    #[test]
    fn weather_followed_by_place() {
        assert_eq!(
            parse("weather paris").unwrap(),
            Intent::Weather {
                location: Some("paris".into())
            }
        );
    }

    #[test]
    fn weather_without_place() {
        assert_eq!(
            parse("Weather!").unwrap(),
            Intent::Weather { location: None }
        );
    }

    #[test]
    fn in_inside_words_is_not_a_separator() {
        assert_eq!(
            parse("weather berlin").unwrap(),
            Intent::Weather {
                location: Some("berlin".into())
            }
        );
        assert_eq!(
            parse("weather in Lincoln").unwrap(),
            Intent::Weather {
                location: Some("lincoln".into())
            }
        );
    }

    #[test]
    fn save_with_multi_word_name() {
        assert_eq!(
            parse("save San Francisco 37.7749 -122.4194").unwrap(),
            Intent::Save {
                name: "san francisco".into(),
                latitude: 37.7749,
                longitude: -122.4194
            }
        );
    }

    #[test]
    fn save_wrong_arity() {
        assert!(matches!(
            parse("save London 51.5"),
            Err(TravelBotError::InvalidCommand(_))
        ));
        assert!(matches!(
            parse("save"),
            Err(TravelBotError::InvalidCommand(_))
        ));
    }

    #[test]
    fn save_non_numeric_coordinates() {
        let err = parse("save London north west").unwrap_err();
        match err {
            TravelBotError::InvalidCommand(msg) => assert!(msg.contains("'north'")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn save_takes_precedence_over_weather() {
        assert!(matches!(
            parse("save weather station 10 20").unwrap(),
            Intent::Save { .. }
        ));
    }

    #[test]
    fn recommend_whitespace_separated() {
        assert_eq!(
            parse("Recommend London Paris and Rome").unwrap(),
            Intent::Recommend {
                candidates: vec!["london".into(), "paris".into(), "rome".into()]
            }
        );
    }

    #[test]
    fn recommend_comma_separated_keeps_multi_word_names() {
        assert_eq!(
            parse("recommend New York, Los Angeles and San Diego").unwrap(),
            Intent::Recommend {
                candidates: vec!["new york".into(), "los angeles".into(), "san diego".into()]
            }
        );
    }

    #[test]
    fn recommend_without_places() {
        assert!(matches!(
            parse("recommend"),
            Err(TravelBotError::InvalidCommand(_))
        ));
    }

    #[test]
    fn locations_and_help() {
        assert_eq!(parse("locations").unwrap(), Intent::Locations);
        assert_eq!(parse("Help?").unwrap(), Intent::Help);
    }

    #[test]
    fn everything_else_is_chat_verbatim() {
        assert_eq!(
            parse("Hello there, BOT").unwrap(),
            Intent::Chat("Hello there, BOT".into())
        );
        // Keywords must be whole words
        assert!(matches!(parse("weatherproof jackets?").unwrap(), Intent::Chat(_)));
    }
}
