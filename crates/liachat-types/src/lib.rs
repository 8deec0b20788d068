//! Core types and structures for liachat
//!
//! This crate provides the foundational types used across all liachat crates:
//! the message model, the session view filter, the response-source contract,
//! and the shared error taxonomy.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Message Types
// ============================================================================

/// Semantic category of a message, used for display and filtering.
///
/// `User` and `System` are assigned directly at the point of submission or
/// seeding; the remaining kinds are produced by classifying reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    System,
    User,
    Chat,
    OsCommand,
    Osquery,
    Error,
    Dashboard,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::System => "system",
            MessageKind::User => "user",
            MessageKind::Chat => "chat",
            MessageKind::OsCommand => "os_command",
            MessageKind::Osquery => "osquery",
            MessageKind::Error => "error",
            MessageKind::Dashboard => "dashboard",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for parsing an unknown kind or filter name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown message kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for MessageKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(MessageKind::System),
            "user" => Ok(MessageKind::User),
            "chat" => Ok(MessageKind::Chat),
            "os_command" => Ok(MessageKind::OsCommand),
            "osquery" => Ok(MessageKind::Osquery),
            "error" => Ok(MessageKind::Error),
            "dashboard" => Ok(MessageKind::Dashboard),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// A single entry in the session log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message stamped with the current wall-clock time.
    pub fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

// ============================================================================
// View Filter
// ============================================================================

/// View parameter selecting which messages a filtered view returns.
///
/// Filtering never mutates the log. Under a specific kind, `user` messages
/// are always included so the conversational context stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionFilter {
    #[default]
    All,
    Kind(MessageKind),
}

impl SessionFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionFilter::All => "all",
            SessionFilter::Kind(kind) => kind.as_str(),
        }
    }
}

impl std::fmt::Display for SessionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SessionFilter {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(SessionFilter::All)
        } else {
            s.parse::<MessageKind>().map(SessionFilter::Kind)
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Reasons a submission is ignored. Neither is surfaced as a failure to the
/// caller; the driver drops the submission and the session stays as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// Input was empty after trimming.
    #[error("empty input")]
    EmptyInput,
    /// A reply is already in flight; the session accepts one exchange at a time.
    #[error("a reply is already in flight")]
    Busy,
}

/// Failure producing a reply. Converted to an in-band `error`-kind message by
/// the session driver, never raised past the session boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed backend reply: {0}")]
    Malformed(String),
    #[error("no reply within {0} seconds")]
    Timeout(u64),
}

// ============================================================================
// Response Source
// ============================================================================

/// External collaborator producing reply text for the latest user input.
///
/// The contract is deliberately narrow (string in, string out, asynchronous)
/// so a local simulator and a remote service are interchangeable without
/// touching session or classification logic.
#[async_trait]
pub trait ResponseSource: Send + Sync {
    async fn generate(&self, input: &str) -> Result<String, SourceError>;
}
