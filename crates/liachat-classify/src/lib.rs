//! Reply text classification.
//!
//! Maps raw reply text onto a [`MessageKind`] by marker detection in fixed
//! priority order, first match wins. The ordering is part of the observable
//! contract: a reply carrying both a warning marker and a SELECT token is a
//! query result, not an error. Do not reorder.

use liachat_types::MessageKind;

/// Literal markers the classifier keys on.
///
/// The response engine emits these exact strings, which keeps formatting and
/// classification in lock step.
pub mod markers {
    /// Prefix of a formatted OS command result.
    pub const EXECUTED: &str = "🛠 Executed:";
    /// Bare command marker.
    pub const COMMAND: &str = "Command:";
    /// Prefix of a formatted osquery result.
    pub const QUERY: &str = "🔍 Query:";
    /// SQL token, matched case-sensitively.
    pub const SELECT: &str = "SELECT";
    /// Warning sign carried by blocked and failed operations.
    pub const WARNING: &str = "⚠";
    /// Bare error token, matched case-sensitively.
    pub const ERROR: &str = "Error";
    /// Security dashboard banner line.
    pub const DASHBOARD_BANNER: &str = "🛡️  LIAAI SECURITY DASHBOARD";
}

/// Categorize reply text. Total and deterministic: every input maps to
/// exactly one kind, defaulting to [`MessageKind::Chat`].
///
/// Never returns [`MessageKind::User`] or [`MessageKind::System`]; those are
/// assigned by the session at the point of submission or seeding.
pub fn classify(text: &str) -> MessageKind {
    if text.contains(markers::EXECUTED) || text.contains(markers::COMMAND) {
        MessageKind::OsCommand
    } else if text.contains(markers::QUERY) || text.contains(markers::SELECT) {
        MessageKind::Osquery
    } else if text.contains(markers::WARNING) || text.contains(markers::ERROR) {
        MessageKind::Error
    } else if text.contains(markers::DASHBOARD_BANNER) {
        MessageKind::Dashboard
    } else {
        MessageKind::Chat
    }
}

/// Canonical rendering of a failure as reply text.
///
/// The result always classifies as [`MessageKind::Error`], so failures flow
/// through the same append path as ordinary replies.
pub fn failure_text(message: &str) -> String {
    format!("{} {}: {}", markers::WARNING, markers::ERROR, message)
}
