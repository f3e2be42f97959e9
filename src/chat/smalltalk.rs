/// Fallback responder for messages that are not commands
pub trait Conversation {
    fn respond(&self, message: &str) -> String;
}

/// Keyword-driven small talk
pub struct SmallTalk {
    bot_name: String,
}

impl SmallTalk {
    pub fn new(bot_name: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
        }
    }
}

impl Conversation for SmallTalk {
    fn respond(&self, message: &str) -> String {
        let lowered = message.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .collect();
        let has = |w: &str| words.contains(&w);

        if has("thanks") || has("thank") || has("thx") {
            return "You're welcome! Safe travels.".to_string();
        }
        if has("bye") || has("goodbye") {
            return "Goodbye! Have a great trip.".to_string();
        }
        if lowered.contains("how are you") {
            return "I'm doing great, thanks for asking! Planning a trip?".to_string();
        }
        if lowered.contains("your name") || lowered.contains("who are you") {
            return format!(
                "I'm {}, your travel weather assistant.",
                self.bot_name
            );
        }
        if has("hello") || has("hi") || has("hey") {
            return format!(
                "Hello! I'm {}. Ask me about the weather somewhere, or for a travel recommendation.",
                self.bot_name
            );
        }

        "I'm not sure I follow. Try \"weather in Paris\" or \"recommend Rome, Lisbon\"."
            .to_string()
    }
}
