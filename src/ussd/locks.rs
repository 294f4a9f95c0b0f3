use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::OwnedMutexGuard;

type SessionLock = Arc<tokio::sync::Mutex<()>>;

/// One async mutex per in-flight session id.
///
/// Duplicate gateway deliveries for the same session queue behind each other;
/// different sessions never contend. An id's entry is dropped once nobody
/// holds or waits on it.
#[derive(Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<String, SessionLock>>,
}

pub struct SessionGuard<'a> {
    owner: &'a SessionLocks,
    session_id: String,
    lock: SessionLock,
    guard: Option<OwnedMutexGuard<()>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, session_id: &str) -> SessionGuard<'_> {
        let lock = {
            let mut locks = self.registry();
            Arc::clone(locks.entry(session_id.to_string()).or_default())
        };

        let guard = Arc::clone(&lock).lock_owned().await;

        SessionGuard {
            owner: self,
            session_id: session_id.to_string(),
            lock,
            guard: Some(guard),
        }
    }

    /// Number of session ids with a live lock entry
    #[cfg(test)]
    pub fn active(&self) -> usize {
        self.registry().len()
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<String, SessionLock>> {
        // The map stays consistent even if a holder panicked
        self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();

        let mut locks = self.owner.registry();
        // Registry + this guard: nobody else is waiting
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.session_id);
        }
    }
}
