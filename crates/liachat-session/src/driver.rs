//! Async driver tying a [`ChatSession`] to a [`ResponseSource`].
//!
//! Every mutation goes through one `tokio::sync::Mutex`, so the session is
//! single-writer by construction. The source invocation is the only
//! suspension point; it completes exactly once per accepted submission,
//! either with reply text or with a synthesized failure text that flows
//! through the same completion path.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use liachat_classify::failure_text;
use liachat_types::{Message, ResponseSource, SessionFilter, SourceError, SubmitError};

use crate::session::ChatSession;

/// Default reply timeout. Generous on purpose; the simulator answers
/// immediately and a remote backend should be given room to think.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(30);

/// What became of a submission.
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// The reply (or an in-band failure message) was appended.
    Replied(Message),
    /// The submission was dropped before anything was appended.
    Rejected(SubmitError),
    /// The session was cleared while the reply was in flight; the result
    /// was discarded.
    Superseded,
}

/// Point-in-time snapshot of session vitals.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub message_count: usize,
    pub awaiting_reply: bool,
    pub epoch: u64,
}

/// Shared handle driving one chat session.
#[derive(Clone)]
pub struct ChatClient {
    session: Arc<Mutex<ChatSession>>,
    source: Arc<dyn ResponseSource>,
    reply_timeout: Duration,
}

impl ChatClient {
    pub fn new(source: Arc<dyn ResponseSource>) -> Self {
        Self {
            session: Arc::new(Mutex::new(ChatSession::new())),
            source,
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
        }
    }

    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = timeout;
        self
    }

    /// Run one exchange: append the user message, invoke the source, append
    /// the classified reply.
    ///
    /// Empty and while-busy submissions are dropped silently; the typed
    /// reason is only carried in the outcome. Source failures and timeouts
    /// land as `error`-kind messages through the normal completion path.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let ticket = {
            let mut session = self.session.lock().await;
            match session.submit(text) {
                Ok(ticket) => ticket,
                Err(reason) => {
                    tracing::debug!(%reason, "submission ignored");
                    return SendOutcome::Rejected(reason);
                }
            }
        };

        let reply = match tokio::time::timeout(self.reply_timeout, self.source.generate(text)).await
        {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => {
                tracing::warn!(%err, "response source failed");
                failure_text(&err.to_string())
            }
            Err(_) => {
                let err = SourceError::Timeout(self.reply_timeout.as_secs());
                tracing::warn!(%err, "reply timed out");
                failure_text(&err.to_string())
            }
        };

        let mut session = self.session.lock().await;
        match session.complete(ticket, &reply) {
            Some(message) => SendOutcome::Replied(message.clone()),
            None => SendOutcome::Superseded,
        }
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.session.lock().await.messages().to_vec()
    }

    pub async fn filtered(&self, filter: SessionFilter) -> Vec<Message> {
        self.session
            .lock()
            .await
            .filtered_with(filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn set_filter(&self, filter: SessionFilter) {
        self.session.lock().await.set_filter(filter);
    }

    pub async fn clear(&self) {
        self.session.lock().await.clear();
    }

    /// Export the log; returns `(suggested file name, text)`.
    pub async fn export(&self) -> (String, String) {
        let session = self.session.lock().await;
        (session.export_filename(), session.export_text())
    }

    pub async fn status(&self) -> SessionStatus {
        let session = self.session.lock().await;
        SessionStatus {
            id: session.id(),
            started_at: session.started_at(),
            message_count: session.messages().len(),
            awaiting_reply: session.is_awaiting_reply(),
            epoch: session.epoch(),
        }
    }
}
