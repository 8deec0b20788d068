//! Keyword routing of user input.
//!
//! No natural-language understanding: lower-cased substring matching in a
//! fixed order, with chat as the catch-all. Unknown input can never fail to
//! route.

/// What the user appears to be asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Chat,
    OsCommand,
    Osquery,
    Dashboard,
}

/// Route user input to an intent.
///
/// The dashboard check runs first, then query keywords, then command
/// keywords. "show running processes" therefore routes to `Osquery` even
/// though it also contains no command keyword, and anything unmatched is a
/// plain chat turn.
pub fn route(input: &str) -> Intent {
    let lower = input.to_lowercase();

    if lower.contains("dashboard") || lower.contains("security status") {
        Intent::Dashboard
    } else if lower.contains("process")
        || lower.contains("running")
        || lower.contains("port")
        || lower.contains("listening")
    {
        Intent::Osquery
    } else if lower.contains("list") || lower.contains("ls") {
        Intent::OsCommand
    } else {
        Intent::Chat
    }
}
