//! Plain-text export of a session log.
//!
//! One block per message in session order, each prefixed with a wall-clock
//! timestamp and the upper-cased kind name, blocks separated by a blank
//! line. Content is carried verbatim, so nothing is lost on the way out.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};

use crate::session::ChatSession;

/// Separator between exported message blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

impl ChatSession {
    /// Render the whole log as plain text.
    pub fn export_text(&self) -> String {
        self.messages()
            .iter()
            .map(|m| {
                format!(
                    "[{}] {}: {}",
                    m.timestamp.with_timezone(&Local).format("%H:%M:%S"),
                    m.kind.as_str().to_uppercase(),
                    m.content
                )
            })
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR)
    }

    /// Suggested export file name, derived from the session start time.
    pub fn export_filename(&self) -> String {
        format!("liaai-chat-{}.txt", self.started_at().timestamp_millis())
    }

    /// Write the export as UTF-8 into `dir` and return the full path.
    pub fn write_export(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.export_filename());
        std::fs::write(&path, self.export_text())
            .with_context(|| format!("writing chat export to {}", path.display()))?;
        Ok(path)
    }
}
