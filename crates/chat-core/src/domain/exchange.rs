//! One question/answer pair of a transcript

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
    pub asked_at: DateTime<Utc>,
}

impl Exchange {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            asked_at: Utc::now(),
        }
    }
}

/// Plain-text transcript, alternating `== User:` / `== Server:` blocks.
pub fn render_transcript(exchanges: &[Exchange]) -> String {
    let mut out = String::new();
    for exchange in exchanges {
        out.push_str("== User:\n");
        out.push_str(&exchange.question);
        out.push_str("\n== Server:\n");
        out.push_str(&exchange.answer);
        out.push('\n');
    }
    out
}
