use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Screen a USSD session is currently parked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Menu {
    #[default]
    LanguageSelect,
    Main,
    Weather,
    Forecast,
    Tips,
}

impl Menu {
    pub fn as_str(&self) -> &'static str {
        match self {
            Menu::LanguageSelect => "language",
            Menu::Main => "main",
            Menu::Weather => "weather",
            Menu::Forecast => "forecast",
            Menu::Tips => "tips",
        }
    }
}

impl std::fmt::Display for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    English,
    Luo,
}

impl Language {
    /// Map a language-menu keypress to a language
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Language::English),
            "2" => Some(Language::Luo),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Luo => "luo",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub phone_number: String,
    pub current_menu: Menu,
    pub selected_location: String,
    pub session_start: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub language: Language,
    pub language_selected: bool,
}

impl Session {
    pub fn new(
        id: impl Into<String>,
        phone_number: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            phone_number: phone_number.into(),
            current_menu: Menu::LanguageSelect,
            selected_location: location.into(),
            session_start: now,
            last_activity: now,
            language: Language::English,
            language_selected: false,
        }
    }

    /// Whether the session has outlived `timeout`, measured from session start
    pub fn is_expired(&self, now: DateTime<Utc>, timeout: chrono::Duration) -> bool {
        now - self.session_start > timeout
    }

    pub fn select_language(&mut self, language: Language) {
        self.language = language;
        self.language_selected = true;
        self.current_menu = Menu::Main;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_at_language_select() {
        let session = Session::new("ATUid_1", "+256700000001", "Gulu");
        assert_eq!(session.current_menu, Menu::LanguageSelect);
        assert_eq!(session.language, Language::English);
        assert!(!session.language_selected);
        assert_eq!(session.selected_location, "Gulu");
        assert_eq!(session.session_start, session.last_activity);
    }

    #[test]
    fn expiry_is_strictly_greater_than_timeout() {
        let mut session = Session::new("s", "p", "Gulu");
        let timeout = chrono::Duration::seconds(1800);
        let now = session.session_start + timeout;
        assert!(!session.is_expired(now, timeout));

        session.session_start -= chrono::Duration::seconds(1);
        assert!(session.is_expired(now, timeout));
    }

    #[test]
    fn language_choices() {
        assert_eq!(Language::from_choice("1"), Some(Language::English));
        assert_eq!(Language::from_choice("2"), Some(Language::Luo));
        assert_eq!(Language::from_choice("3"), None);
        assert_eq!(Language::from_choice(""), None);
    }

    #[test]
    fn selecting_language_moves_to_main() {
        let mut session = Session::new("s", "p", "Gulu");
        session.select_language(Language::Luo);
        assert!(session.language_selected);
        assert_eq!(session.language, Language::Luo);
        assert_eq!(session.current_menu, Menu::Main);
    }
}
