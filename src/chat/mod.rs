pub mod intent;
pub mod smalltalk;

pub use intent::Intent;
pub use smalltalk::{Conversation, SmallTalk};

pub const HELP_TEXT: &str = "I can help with:\n\
    weather in <place> - 5 day forecast\n\
    save <name> <latitude> <longitude> - remember a place\n\
    recommend <place>, <place>, ... - pick the sunniest destination\n\
    locations - list saved places";
