use super::response::UssdResponse;
use super::text;
use crate::datasources::WeatherProvider;
use crate::logic::{format_day_line, summarize_days, AdviceEngine, FORECAST_DAYS};
use crate::models::{Language, Menu, Session};
use std::sync::Arc;

/// Keypress that leaves the session (language/main) or goes back (content screens)
pub const EXIT_CHOICE: &str = "0";

/// Screen transitions for a single keypress.
///
/// Handlers mutate the session in place and classify their own response as
/// continuing or ending. The caller persists or removes the session based on
/// that classification.
pub struct MenuMachine {
    provider: Arc<dyn WeatherProvider>,
    advice: AdviceEngine,
}

impl MenuMachine {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            advice: AdviceEngine::new(),
        }
    }

    pub async fn dispatch(&self, session: &mut Session, choice: &str) -> UssdResponse {
        tracing::debug!(
            "Dispatching {:?} on {} for session {}",
            choice,
            session.current_menu,
            session.id
        );

        match session.current_menu {
            Menu::LanguageSelect => self.language_select(session, choice),
            Menu::Main => self.main_menu(session, choice).await,
            Menu::Weather => self.weather(session, choice).await,
            Menu::Forecast => self.forecast(session, choice).await,
            Menu::Tips => self.tips(session, choice).await,
        }
    }

    fn language_select(&self, session: &mut Session, choice: &str) -> UssdResponse {
        if choice == EXIT_CHOICE {
            return end_session(session);
        }

        match Language::from_choice(choice) {
            Some(language) => {
                session.select_language(language);
                tracing::info!("Session {} selected language {}", session.id, language);
                UssdResponse::con(text::main_menu(language, &session.selected_location))
            }
            None => UssdResponse::con(text::language_menu_invalid()),
        }
    }

    async fn main_menu(&self, session: &mut Session, choice: &str) -> UssdResponse {
        // Content screens render immediately, as if entered with no sub-choice
        match choice {
            "1" => {
                session.current_menu = Menu::Weather;
                self.weather(session, "").await
            }
            "2" => {
                session.current_menu = Menu::Forecast;
                self.forecast(session, "").await
            }
            "3" => {
                session.current_menu = Menu::Tips;
                self.tips(session, "").await
            }
            EXIT_CHOICE => end_session(session),
            _ => UssdResponse::con(text::main_menu_invalid(
                session.language,
                &session.selected_location,
            )),
        }
    }

    async fn weather(&self, session: &mut Session, choice: &str) -> UssdResponse {
        if choice == EXIT_CHOICE {
            return back_to_main(session);
        }

        let language = session.language;
        let location = session.selected_location.as_str();

        match self.provider.current_weather(location).await {
            Ok(weather) => {
                let body = format!(
                    "{}\n\n{}",
                    text::weather_report(language, location, &weather),
                    self.advice.render(&weather, language)
                );
                with_back_option(body, language)
            }
            Err(e) => {
                tracing::warn!("Weather fetch for {} failed: {}", location, e);
                with_back_option(text::weather_error(language), language)
            }
        }
    }

    async fn forecast(&self, session: &mut Session, choice: &str) -> UssdResponse {
        if choice == EXIT_CHOICE {
            return back_to_main(session);
        }

        let language = session.language;
        let location = session.selected_location.as_str();

        let forecast = match self.provider.forecast(location).await {
            Ok(forecast) if !forecast.samples.is_empty() => forecast,
            Ok(_) => {
                tracing::warn!("Forecast for {} came back empty", location);
                return with_back_option(text::forecast_error(language), language);
            }
            Err(e) => {
                tracing::warn!("Forecast fetch for {} failed: {}", location, e);
                return with_back_option(text::forecast_error(language), language);
            }
        };

        let days = summarize_days(&forecast.samples, language, FORECAST_DAYS);

        let mut body = text::forecast_heading(language, location);
        if days.is_empty() {
            body.push('\n');
            body.push_str(text::no_forecast_data(language));
        }
        for day in &days {
            body.push('\n');
            body.push_str(&format_day_line(day, language));
        }
        body.push('\n');

        with_back_option(body, language)
    }

    async fn tips(&self, session: &mut Session, choice: &str) -> UssdResponse {
        if choice == EXIT_CHOICE {
            return back_to_main(session);
        }

        let language = session.language;
        let location = session.selected_location.as_str();

        match self.provider.current_weather(location).await {
            Ok(weather) => with_back_option(self.advice.render(&weather, language), language),
            Err(e) => {
                tracing::warn!("Weather fetch for tips in {} failed: {}", location, e);
                with_back_option(text::tips_error(language), language)
            }
        }
    }
}

/// Send the session back to the main menu
pub fn back_to_main(session: &mut Session) -> UssdResponse {
    session.current_menu = Menu::Main;
    UssdResponse::con(text::main_menu(session.language, &session.selected_location))
}

/// Terminal thank-you; the caller removes the session on any END response
pub fn end_session(session: &Session) -> UssdResponse {
    tracing::info!("Session {} ended by user", session.id);
    UssdResponse::end(text::goodbye(session.language))
}

fn with_back_option(body: impl AsRef<str>, language: Language) -> UssdResponse {
    UssdResponse::con(format!("{}\n{}", body.as_ref(), text::back_option(language)))
}
