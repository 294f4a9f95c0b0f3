use crate::error::Result;
use crate::models::Session;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Storage for live USSD sessions, keyed by gateway session id
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Result<Option<Session>>;

    /// Create (or reset) a session with default state
    async fn create(&self, session_id: &str, phone_number: &str) -> Result<Session>;

    /// Refresh `last_activity` and persist it
    async fn touch(&self, session: &mut Session) -> Result<()>;

    async fn save(&self, session: &Session) -> Result<()>;

    async fn remove(&self, session_id: &str) -> Result<()>;

    /// Number of live sessions
    async fn len(&self) -> Result<usize>;
}

/// Process-local session store.
///
/// Entries are only dropped when a user exits; sessions abandoned mid-menu
/// stay until their id is reused. Long-running deployments need an external
/// eviction policy.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    default_location: String,
}

impl InMemorySessionStore {
    pub fn new(default_location: impl Into<String>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            default_location: default_location.into(),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn create(&self, session_id: &str, phone_number: &str) -> Result<Session> {
        let session = Session::new(session_id, phone_number, self.default_location.as_str());
        self.sessions
            .write()
            .await
            .insert(session_id.to_string(), session.clone());
        Ok(session)
    }

    async fn touch(&self, session: &mut Session) -> Result<()> {
        session.last_activity = Utc::now();
        if let Some(stored) = self.sessions.write().await.get_mut(&session.id) {
            stored.last_activity = session.last_activity;
        }
        Ok(())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn remove(&self, session_id: &str) -> Result<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.sessions.read().await.len())
    }
}
