use serde::{Deserialize, Serialize};

/// Separator the carrier gateway puts between successive keypresses
pub const INPUT_SEPARATOR: char = '*';

/// Fields a gateway adapter extracts from an inbound carrier callback
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UssdRequest {
    pub session_id: String,
    #[serde(default)]
    pub service_code: String,
    pub phone_number: String,
    /// Every choice made this session, `*`-separated
    #[serde(default)]
    pub text: String,
}

impl UssdRequest {
    pub fn new(
        session_id: impl Into<String>,
        phone_number: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            service_code: String::new(),
            phone_number: phone_number.into(),
            text: text.into(),
        }
    }

    pub fn with_service_code(mut self, service_code: impl Into<String>) -> Self {
        self.service_code = service_code.into();
        self
    }

    /// Input with surrounding whitespace removed
    pub fn raw_input(&self) -> &str {
        self.text.trim()
    }

    pub fn current_choice(&self) -> &str {
        current_choice(&self.text)
    }
}

/// The latest keypress in an accumulated input string; empty on first contact
pub fn current_choice(text: &str) -> &str {
    text.trim().rsplit(INPUT_SEPARATOR).next().unwrap_or("")
}
