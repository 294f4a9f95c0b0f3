use super::locks::SessionLocks;
use super::menu::MenuMachine;
use super::request::UssdRequest;
use super::response::UssdResponse;
use super::store::SessionStore;
use super::text;
use crate::config::UssdConfig;
use crate::datasources::WeatherProvider;
use crate::error::Result;
use crate::models::Menu;
use chrono::Utc;
use std::sync::Arc;

/// Keypresses that jump back to the main menu from anywhere once a language is chosen
pub const GLOBAL_MAIN_MENU_CHOICES: [&str; 2] = ["00", "*0"];

/// Entry point for gateway callbacks.
///
/// Every request is handled under its session's lock and always produces a
/// response; internal failures become a terminal technical-error screen.
pub struct UssdService {
    store: Arc<dyn SessionStore>,
    machine: MenuMachine,
    locks: SessionLocks,
    session_timeout: chrono::Duration,
}

impl UssdService {
    pub fn new(
        store: Arc<dyn SessionStore>,
        provider: Arc<dyn WeatherProvider>,
        config: &UssdConfig,
    ) -> Self {
        Self {
            store,
            machine: MenuMachine::new(provider),
            locks: SessionLocks::new(),
            session_timeout: config.session_timeout(),
        }
    }

    pub async fn handle(&self, request: &UssdRequest) -> UssdResponse {
        tracing::debug!(
            "USSD request session={} phone={} service={} text={:?}",
            request.session_id,
            request.phone_number,
            request.service_code,
            request.text
        );

        let _guard = self.locks.acquire(&request.session_id).await;

        match self.process(request).await {
            Ok(response) => response,
            Err(e) => {
                // Session is left as-is; it expires or is reused like any other
                tracing::error!(
                    "Error handling USSD request for session {}: {}",
                    request.session_id,
                    e
                );
                UssdResponse::end(text::technical_error())
            }
        }
    }

    async fn process(&self, request: &UssdRequest) -> Result<UssdResponse> {
        let session_id = request.session_id.as_str();

        let Some(mut session) = self.store.get(session_id).await? else {
            self.store.create(session_id, &request.phone_number).await?;
            tracing::info!(
                "Started session {} for {} ({} live)",
                session_id,
                request.phone_number,
                self.store.len().await?
            );
            return Ok(UssdResponse::con(text::language_menu()));
        };

        self.store.touch(&mut session).await?;
        if session.is_expired(Utc::now(), self.session_timeout) {
            tracing::info!("Session {} timed out, restarting at language select", session_id);
            self.store.create(session_id, &request.phone_number).await?;
            return Ok(UssdResponse::con(text::language_menu()));
        }

        let raw_input = request.raw_input();
        let choice = request.current_choice();

        if session.language_selected && GLOBAL_MAIN_MENU_CHOICES.contains(&choice) {
            tracing::debug!("Global navigation to main menu for session {}", session_id);
            let response = super::menu::back_to_main(&mut session);
            self.store.save(&session).await?;
            return Ok(response);
        }

        if !session.language_selected && session.current_menu != Menu::LanguageSelect {
            tracing::warn!(
                "Session {} on {} without a language, forcing language select",
                session_id,
                session.current_menu
            );
            session.current_menu = Menu::LanguageSelect;
            if raw_input.is_empty() {
                self.store.save(&session).await?;
                return Ok(UssdResponse::con(text::language_menu()));
            }
        }

        let response = self.machine.dispatch(&mut session, choice).await;

        if response.is_end() {
            self.store.remove(session_id).await?;
        } else {
            self.store.save(&session).await?;
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::testing::StaticWeatherProvider;
    use crate::models::{Language, Session};
    use crate::ussd::response::ResponseKind;
    use crate::ussd::store::InMemorySessionStore;
    use async_trait::async_trait;

    const PHONE: &str = "+256772123456";

    fn service() -> (UssdService, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new("Gulu"));
        let service = UssdService::new(
            store.clone(),
            Arc::new(StaticWeatherProvider::gulu()),
            &UssdConfig::default(),
        );
        (service, store)
    }

    async fn send(service: &UssdService, session_id: &str, text: &str) -> UssdResponse {
        service
            .handle(&UssdRequest::new(session_id, PHONE, text))
            .await
    }

    #[tokio::test]
    async fn new_session_always_gets_language_prompt() {
        let (service, store) = service();

        for (id, text) in [("a", ""), ("b", "1"), ("c", "1*2*3")] {
            let response = send(&service, id, text).await;
            assert_eq!(response.kind, ResponseKind::Continue);
            assert!(response.body.starts_with("Select Language / Yer Dhok:"));

            let session = store.get(id).await.unwrap().unwrap();
            assert_eq!(session.current_menu, Menu::LanguageSelect);
            assert_eq!(session.phone_number, PHONE);
        }
    }

    #[tokio::test]
    async fn full_walk_to_weather_screen() {
        let (service, store) = service();

        send(&service, "s1", "").await;
        let main = send(&service, "s1", "1").await;
        assert!(main.to_string().starts_with("CON Main Menu (Gulu):"));

        let weather = send(&service, "s1", "1*1").await;
        let wire = weather.to_string();
        assert!(wire.starts_with("CON Weather in Gulu Today:"));
        assert!(wire.ends_with("0. Main Menu"));

        let session = store.get("s1").await.unwrap().unwrap();
        assert_eq!(session.current_menu, Menu::Weather);
        assert_eq!(session.language, Language::English);
    }

    #[tokio::test]
    async fn global_navigation_works_from_every_content_screen() {
        let (service, store) = service();

        for (screen, menu) in [("1", Menu::Weather), ("2", Menu::Forecast), ("3", Menu::Tips)] {
            let id = format!("s{}", screen);
            send(&service, &id, "").await;
            send(&service, &id, "1").await;
            send(&service, &id, &format!("1*{}", screen)).await;
            assert_eq!(store.get(&id).await.unwrap().unwrap().current_menu, menu);

            let response = send(&service, &id, &format!("1*{}*00", screen)).await;
            assert_eq!(response.kind, ResponseKind::Continue);
            assert!(
                response.body.starts_with("Main Menu (Gulu):"),
                "from {}",
                menu
            );
            assert_eq!(
                store.get(&id).await.unwrap().unwrap().current_menu,
                Menu::Main
            );
        }
    }

    #[tokio::test]
    async fn oversized_timeout_does_not_expire_every_request() {
        let store = Arc::new(InMemorySessionStore::new("Gulu"));
        let config = UssdConfig {
            session_timeout_secs: u64::MAX,
            ..UssdConfig::default()
        };
        let service = UssdService::new(
            store.clone(),
            Arc::new(StaticWeatherProvider::gulu()),
            &config,
        );

        send(&service, "s1", "").await;
        let response = send(&service, "s1", "1").await;
        assert!(response.body.starts_with("Main Menu (Gulu):"));
        assert_eq!(
            store.get("s1").await.unwrap().unwrap().current_menu,
            Menu::Main
        );
    }

    #[tokio::test]
    async fn global_navigation_overrides_screen_handling() {
        let (service, store) = service();

        send(&service, "s1", "").await;
        send(&service, "s1", "2").await;
        send(&service, "s1", "2*1").await;

        let response = send(&service, "s1", "2*1*00").await;
        assert_eq!(response.kind, ResponseKind::Continue);
        assert!(response.body.starts_with("Meny mar Loch (Gulu):"));
        assert_eq!(
            store.get("s1").await.unwrap().unwrap().current_menu,
            Menu::Main
        );
    }

    #[tokio::test]
    async fn double_zero_before_language_is_just_invalid() {
        let (service, store) = service();

        send(&service, "s1", "").await;
        let response = send(&service, "s1", "00").await;
        assert!(response.body.starts_with("Invalid selection. Please try again."));
        assert_eq!(
            store.get("s1").await.unwrap().unwrap().current_menu,
            Menu::LanguageSelect
        );
    }

    #[tokio::test]
    async fn exit_removes_session_and_next_request_starts_over() {
        let (service, store) = service();

        send(&service, "s1", "").await;
        send(&service, "s1", "1").await;
        let bye = send(&service, "s1", "1*0").await;
        assert_eq!(bye.to_string(), "END Thank you for using Farmer Weather Service!");
        assert!(store.get("s1").await.unwrap().is_none());

        let again = send(&service, "s1", "1*0*1").await;
        assert!(again.body.starts_with("Select Language / Yer Dhok:"));
    }

    #[tokio::test]
    async fn expired_session_restarts_and_discards_input() {
        let (service, store) = service();

        send(&service, "s1", "").await;
        send(&service, "s1", "1").await;

        let mut session = store.get("s1").await.unwrap().unwrap();
        session.session_start -= chrono::Duration::seconds(1801);
        store.save(&session).await.unwrap();

        // "1" would open the weather screen on a live session
        let response = send(&service, "s1", "1*1").await;
        assert!(response.body.starts_with("Select Language / Yer Dhok:"));

        let session = store.get("s1").await.unwrap().unwrap();
        assert_eq!(session.current_menu, Menu::LanguageSelect);
        assert!(!session.language_selected);
    }

    #[tokio::test]
    async fn missing_language_forces_language_select() {
        let (service, store) = service();
        send(&service, "s1", "").await;

        let mut session = store.get("s1").await.unwrap().unwrap();
        session.current_menu = Menu::Tips;
        store.save(&session).await.unwrap();

        let prompt = send(&service, "s1", "").await;
        assert_eq!(prompt.body, text::language_menu());

        session.current_menu = Menu::Weather;
        store.save(&session).await.unwrap();

        // Non-empty input falls through to the language handler
        let main = send(&service, "s1", "2").await;
        assert!(main.body.starts_with("Meny mar Loch"));
        assert_eq!(
            store.get("s1").await.unwrap().unwrap().current_menu,
            Menu::Main
        );
    }

    #[tokio::test]
    async fn requests_refresh_last_activity() {
        let (service, store) = service();
        send(&service, "s1", "").await;

        let mut session = store.get("s1").await.unwrap().unwrap();
        let stale = session.last_activity - chrono::Duration::minutes(10);
        session.last_activity = stale;
        store.save(&session).await.unwrap();

        send(&service, "s1", "9").await;
        assert!(store.get("s1").await.unwrap().unwrap().last_activity > stale);
    }

    #[tokio::test]
    async fn concurrent_sessions_are_independent() {
        let (service, store) = service();
        let service = Arc::new(service);

        let mut handles = Vec::new();
        for i in 0..8 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                let id = format!("s{}", i);
                send(&service, &id, "").await;
                send(&service, &id, "1").await;
                send(&service, &id, "1*3").await
            }));
        }

        for handle in handles {
            let response = handle.await.unwrap();
            assert!(response.body.starts_with("FARMING TIPS:"));
        }
        assert_eq!(store.len().await.unwrap(), 8);
    }

    struct BrokenStore;

    #[async_trait]
    impl SessionStore for BrokenStore {
        async fn get(&self, session_id: &str) -> Result<Option<Session>> {
            Ok(Some(Session::new(session_id, PHONE, "Gulu")))
        }

        async fn create(&self, session_id: &str, phone_number: &str) -> Result<Session> {
            Ok(Session::new(session_id, phone_number, "Gulu"))
        }

        async fn touch(&self, _session: &mut Session) -> Result<()> {
            Ok(())
        }

        async fn save(&self, _session: &Session) -> Result<()> {
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "backend unreachable",
            )
            .into())
        }

        async fn remove(&self, _session_id: &str) -> Result<()> {
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "backend unreachable",
            )
            .into())
        }

        async fn len(&self) -> Result<usize> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn store_failure_becomes_technical_error() {
        let service = UssdService::new(
            Arc::new(BrokenStore),
            Arc::new(StaticWeatherProvider::gulu()),
            &UssdConfig::default(),
        );

        let response = send(&service, "s1", "1").await;
        assert_eq!(
            response.to_string(),
            "END A technical error occurred. Please try again later."
        );
    }
}
