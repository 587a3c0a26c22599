//! DashMap-backed session store with idle expiry and a hard capacity limit

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chat_core::repositories::{SessionHandle, SessionRepository};
use chat_core::{ConversationSession, DomainError, SessionId};
use chat_shared::SessionSettings;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

struct SessionEntry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// Thread-safe in-memory session store
/// Uses DashMap for sharded concurrent access; each session has its own mutex
#[derive(Clone)]
pub struct InMemorySessionStore {
    /// Session storage: session_id -> entry
    storage: Arc<DashMap<SessionId, SessionEntry>>,
    /// Serializes the capacity check with the insert
    admission: Arc<Mutex<()>>,
    settings: SessionSettings,
}

impl InMemorySessionStore {
    pub fn new(settings: SessionSettings) -> Self {
        info!(
            "Initializing session store: idle_timeout={}s, max_sessions={}",
            settings.idle_timeout_secs, settings.max_sessions
        );
        Self {
            storage: Arc::new(DashMap::new()),
            admission: Arc::new(Mutex::new(())),
            settings,
        }
    }

    fn is_expired(&self, entry: &SessionEntry) -> bool {
        entry.last_seen.elapsed() >= self.settings.idle_timeout()
    }

    fn purge(&self) -> usize {
        let start_len = self.storage.len();
        self.storage.retain(|_, entry| !self.is_expired(entry));
        let count = start_len.saturating_sub(self.storage.len());

        if count > 0 {
            info!("Cleaned up {} expired sessions", count);
        }
        count
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn insert(&self, session: ConversationSession) -> Result<SessionHandle, DomainError> {
        let _admission = self.admission.lock().await;
        if self.storage.len() >= self.settings.max_sessions && self.purge() == 0 {
            warn!(
                "Session limit reached ({} active), rejecting new session",
                self.storage.len()
            );
            return Err(DomainError::SessionLimitReached(self.storage.len()));
        }

        let id = session.id();
        let handle = Arc::new(Mutex::new(session));
        self.storage.insert(
            id,
            SessionEntry {
                handle: handle.clone(),
                last_seen: Instant::now(),
            },
        );
        debug!("Stored session {} ({} active)", id, self.storage.len());
        Ok(handle)
    }

    async fn find(&self, id: &SessionId) -> Option<SessionHandle> {
        let mut entry = self.storage.get_mut(id)?;

        // Lazy deletion
        if self.is_expired(&entry) {
            drop(entry);
            self.storage.remove(id);
            debug!("Session {} expired, removed from store", id);
            return None;
        }

        entry.last_seen = Instant::now();
        Some(entry.handle.clone())
    }

    async fn remove(&self, id: &SessionId) -> Option<SessionHandle> {
        self.storage.remove(id).map(|(_, entry)| entry.handle)
    }

    async fn purge_expired(&self) -> usize {
        self.purge()
    }

    async fn count(&self) -> usize {
        self.storage.len()
    }
}
