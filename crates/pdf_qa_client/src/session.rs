//! Chat session state: ordered transcript, single-flight pending guard,
//! session-level error.
//!
//! The transcript is append-only for the life of the session; nothing is ever
//! edited or removed. `begin_submit`/`complete_submit` bracket one network
//! round trip so a frontend can publish the intermediate pending state;
//! `submit` composes both around one `ApiClient::ask` call.

use crate::client::{ApiClient, ApiError};

/// Author of one transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

/// One message in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// Chat Session Manager. Plain owned state; one instance per chat view,
/// created on mount and dropped on teardown.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    transcript: Vec<Turn>,
    pending: bool,
    error: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// True while a query is in flight; the input and send affordances are
    /// disabled for the duration.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Guarded start of a submit. A blank query (after trimming) or an
    /// outstanding query makes this a silent no-op returning false. Otherwise
    /// the raw untrimmed text is appended as a user turn, the pending flag is
    /// set, any prior error is cleared, and the caller must issue exactly one
    /// request and feed its outcome to `complete_submit`.
    pub fn begin_submit(&mut self, query: &str) -> bool {
        if self.pending || query.trim().is_empty() {
            return false;
        }
        self.transcript.push(Turn {
            role: Role::User,
            text: query.to_string(),
        });
        self.pending = true;
        self.error = None;
        true
    }

    /// Settle the in-flight submit. A successful answer is appended as a bot
    /// turn; a failure sets the session error and appends nothing — the user
    /// turn stays in the transcript. The pending flag clears either way.
    pub fn complete_submit(&mut self, outcome: Result<String, ApiError>) {
        match outcome {
            Ok(answer) => self.transcript.push(Turn {
                role: Role::Bot,
                text: answer,
            }),
            Err(e) => self.error = Some(e.0),
        }
        self.pending = false;
    }

    /// Full submit lifecycle: guard, one `ask` round trip, completion.
    /// Returns whether a request was issued.
    pub async fn submit(&mut self, api: &ApiClient, query: &str) -> bool {
        if !self.begin_submit(query) {
            return false;
        }
        let outcome = api.ask(query).await;
        self.complete_submit(outcome);
        true
    }
}
