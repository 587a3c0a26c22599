// ============================================================================
// Chat Core - Chat Service
// File: crates/chat-core/src/services/chat_service.rs
// ============================================================================
//! Session lifecycle and question handling on top of the repository and
//! responder ports.

use std::sync::Arc;

use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info, warn};

use crate::domain::{ConversationSession, Exchange, RoleCatalog, SessionId, SessionSnapshot};
use crate::error::DomainError;
use crate::repositories::{SessionHandle, SessionRepository};
use crate::services::Responder;

pub struct ChatService {
    sessions: Arc<dyn SessionRepository>,
    responder: Arc<dyn Responder>,
    catalog: RoleCatalog,
}

impl ChatService {
    pub fn new(sessions: Arc<dyn SessionRepository>, responder: Arc<dyn Responder>) -> Self {
        Self {
            sessions,
            responder,
            catalog: RoleCatalog::builtin(),
        }
    }

    pub fn roles(&self) -> &RoleCatalog {
        &self.catalog
    }

    pub fn responder_name(&self) -> &'static str {
        self.responder.name()
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.count().await
    }

    async fn handle(&self, id: &SessionId) -> Result<SessionHandle, DomainError> {
        self.sessions
            .find(id)
            .await
            .ok_or(DomainError::SessionNotFound(*id))
    }

    /// Lock a live session. A request that queued on a session which was
    /// closed meanwhile sees it as gone.
    async fn acquire(&self, id: &SessionId) -> Result<OwnedMutexGuard<ConversationSession>, DomainError> {
        let session = self.handle(id).await?.lock_owned().await;
        if session.is_closed() {
            debug!("Session {} was closed while waiting for its lock", id);
            return Err(DomainError::SessionNotFound(*id));
        }
        Ok(session)
    }

    /// Create a fresh session with the catalog's default role.
    pub async fn open_session(&self) -> Result<SessionSnapshot, DomainError> {
        let session = ConversationSession::new(self.catalog.default_role());
        let handle = self.sessions.insert(session).await?;
        let snapshot = handle.lock().await.snapshot();
        info!("Opened session {}", snapshot.session_id);
        Ok(snapshot)
    }

    pub async fn snapshot(&self, id: &SessionId) -> Result<SessionSnapshot, DomainError> {
        Ok(self.acquire(id).await?.snapshot())
    }

    pub async fn select_role(
        &self,
        id: &SessionId,
        role: &str,
    ) -> Result<SessionSnapshot, DomainError> {
        let mut session = self.acquire(id).await?;

        if let Err(e) = session.select_role(role) {
            warn!("Role change rejected for session {}: {}", id, e);
            return Err(e.into());
        }

        debug!("Session {} selected a new role", id);
        Ok(session.snapshot())
    }

    /// Validate, ask the responder, and append the exchange. The session stays
    /// locked for the whole round trip.
    pub async fn submit(&self, id: &SessionId, question: &str) -> Result<Exchange, DomainError> {
        let mut session = self.acquire(id).await?;

        let prompt = match session.prepare(question) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!("Question rejected for session {}: {}", id, e);
                return Err(e.into());
            }
        };

        let reply = self.responder.respond(&prompt).await.map_err(|e| {
            warn!("Responder '{}' failed for session {}: {}", self.responder.name(), id, e);
            e
        })?;

        let exchange = session.record(prompt, reply);
        info!(
            "Session {} answered exchange #{} via {}",
            id,
            session.transcript().len(),
            self.responder.name()
        );
        Ok(exchange)
    }

    /// Close the session and register a fresh one in its place. An unknown
    /// id still yields a fresh session.
    pub async fn new_chat(&self, id: &SessionId) -> Result<SessionSnapshot, DomainError> {
        let fresh = match self.sessions.remove(id).await {
            Some(handle) => {
                let mut old = handle.lock().await;
                old.new_chat()
            }
            None => {
                debug!("New chat requested for unknown session {}", id);
                ConversationSession::new(self.catalog.default_role())
            }
        };

        let handle = self.sessions.insert(fresh).await?;
        let snapshot = handle.lock().await.snapshot();
        info!("Session {} replaced by {}", id, snapshot.session_id);
        Ok(snapshot)
    }

    pub async fn toggle_debug(&self, id: &SessionId) -> Result<SessionSnapshot, DomainError> {
        let mut session = self.acquire(id).await?;
        session.toggle_debug();
        Ok(session.snapshot())
    }

    pub async fn close_session(&self, id: &SessionId) -> Result<(), DomainError> {
        let handle = self
            .sessions
            .remove(id)
            .await
            .ok_or(DomainError::SessionNotFound(*id))?;
        handle.lock().await.close();
        info!("Closed session {}", id);
        Ok(())
    }
}
