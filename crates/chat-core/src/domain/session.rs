//! Conversation session entity
//!
//! A session starts `Fresh` (role selectable, empty transcript) and moves to
//! `Locked` on its first valid question. `Locked` always holds at least one
//! exchange and never goes back; a new chat replaces the whole instance and
//! closes the old one.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::exchange::Exchange;
use super::role::RoleCatalog;
use super::transform;
use crate::error::{StateError, ValidationError};

/// Handle under which the web tier stores a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Fresh { role: String },
    Locked { role: String, transcript: Vec<Exchange> },
}

/// Raw payloads of the last backend round trip, for the debug panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DebugTrace {
    pub enabled: bool,
    pub last_request: Option<String>,
    pub last_response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireTrace {
    pub request: String,
    pub response: String,
}

/// Validated input handed to a responder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub role: String,
    pub question: String,
    pub history: Vec<Exchange>,
    /// True when this is the first exchange of the session.
    pub opens_session: bool,
}

impl Prompt {
    /// Role to print as a banner, only on the opening exchange.
    pub fn banner_role(&self) -> Option<&str> {
        self.opens_session.then_some(self.role.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub answer: String,
    pub trace: Option<WireTrace>,
}

impl Reply {
    pub fn text(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            trace: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: SessionId,
    phase: Phase,
    debug: DebugTrace,
    created_at: DateTime<Utc>,
    closed: bool,
}

impl ConversationSession {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            phase: Phase::Fresh { role: role.into() },
            debug: DebugTrace::default(),
            created_at: Utc::now(),
            closed: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn role(&self) -> &str {
        match &self.phase {
            Phase::Fresh { role } | Phase::Locked { role, .. } => role,
        }
    }

    pub fn is_role_locked(&self) -> bool {
        matches!(self.phase, Phase::Locked { .. })
    }

    pub fn transcript(&self) -> &[Exchange] {
        match &self.phase {
            Phase::Fresh { .. } => &[],
            Phase::Locked { transcript, .. } => transcript,
        }
    }

    pub fn last_exchange(&self) -> Option<&Exchange> {
        self.transcript().last()
    }

    pub fn last_question(&self) -> Option<&str> {
        self.last_exchange().map(|e| e.question.as_str())
    }

    pub fn last_answer(&self) -> Option<&str> {
        self.last_exchange().map(|e| e.answer.as_str())
    }

    /// Closed sessions are out of the store; late requests must not touch them.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn debug(&self) -> &DebugTrace {
        &self.debug
    }

    pub fn select_role(&mut self, new_role: impl Into<String>) -> Result<(), StateError> {
        match &mut self.phase {
            Phase::Fresh { role } => {
                *role = new_role.into();
                Ok(())
            }
            Phase::Locked { .. } => Err(StateError::RoleLocked),
        }
    }

    /// Validate a question without touching the session.
    pub fn prepare(&self, question: &str) -> Result<Prompt, ValidationError> {
        if question.trim().is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }

        Ok(Prompt {
            role: self.role().to_string(),
            question: question.to_string(),
            history: self.transcript().to_vec(),
            opens_session: !self.is_role_locked(),
        })
    }

    /// Append the answered prompt to the transcript, locking the role on the
    /// first exchange.
    pub fn record(&mut self, prompt: Prompt, reply: Reply) -> Exchange {
        if let Some(trace) = reply.trace {
            self.debug.last_request = Some(trace.request);
            self.debug.last_response = Some(trace.response);
        }

        let exchange = Exchange::new(prompt.question, reply.answer);
        let phase = std::mem::replace(
            &mut self.phase,
            Phase::Fresh {
                role: String::new(),
            },
        );

        self.phase = match phase {
            Phase::Fresh { role } => {
                debug!("Session {} locked its system role", self.id);
                Phase::Locked {
                    role,
                    transcript: vec![exchange.clone()],
                }
            }
            Phase::Locked {
                role,
                mut transcript,
            } => {
                transcript.push(exchange.clone());
                Phase::Locked { role, transcript }
            }
        };

        exchange
    }

    /// Answer with the local placeholder transformation.
    pub fn submit(&mut self, question: &str) -> Result<Exchange, ValidationError> {
        let prompt = self.prepare(question)?;
        let answer = transform::placeholder_answer(&prompt.question, prompt.banner_role());
        Ok(self.record(prompt, Reply::text(answer)))
    }

    /// Close this conversation and start over with the default role.
    pub fn new_chat(&mut self) -> Self {
        self.close();
        debug!("Session {} closed for a new chat", self.id);
        Self::default()
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.debug.enabled = !self.debug.enabled;
        self.debug.enabled
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            role: self.role().to_string(),
            role_locked: self.is_role_locked(),
            last_question: self.last_question().map(str::to_string),
            last_answer: self.last_answer().map(str::to_string),
            transcript: self.transcript().to_vec(),
            debug: self.debug.clone(),
            created_at: self.created_at,
        }
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new(RoleCatalog::builtin().default_role())
    }
}

/// Owned, serializable copy of a session's visible state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub role: String,
    pub role_locked: bool,
    pub last_question: Option<String>,
    pub last_answer: Option<String>,
    pub transcript: Vec<Exchange>,
    pub debug: DebugTrace,
    pub created_at: DateTime<Utc>,
}
