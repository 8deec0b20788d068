//! Simulated response engine for liachat
//!
//! A stand-in for the remote assistant backend with the same
//! [`ResponseSource`] contract: user text is keyword-routed to an intent,
//! the matching canned result is safety-checked and rendered, and the reply
//! text comes back carrying the markers the classifier keys on. No command
//! or query is ever actually executed.

pub mod dashboard;
pub mod format;
pub mod router;
pub mod safety;
mod samples;

use async_trait::async_trait;
use std::time::Duration;

use liachat_classify::markers;
use liachat_types::{ResponseSource, SourceError};

pub use dashboard::DashboardReport;
pub use format::QueryRows;
pub use router::{route, Intent};
pub use safety::{SafetyChecker, SafetyViolation};

/// Local [`ResponseSource`] producing canned results.
pub struct SimulatedSource {
    safety: SafetyChecker,
    latency: Option<Duration>,
}

impl SimulatedSource {
    pub fn new() -> Self {
        Self {
            safety: SafetyChecker::new(),
            latency: None,
        }
    }

    /// Delay each reply, approximating a remote round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn respond(&self, input: &str) -> String {
        let intent = route(input);
        tracing::debug!(?intent, "routed simulated request");

        match intent {
            Intent::Dashboard => DashboardReport::sample().render(),
            Intent::Osquery => {
                let lower = input.to_lowercase();
                if lower.contains("port") || lower.contains("listening") {
                    self.run_query(samples::LISTENING_PORTS_SQL, samples::listening_ports())
                } else {
                    self.run_query(samples::PROCESSES_SQL, samples::processes())
                }
            }
            Intent::OsCommand => {
                self.run_command(samples::LIST_COMMAND, samples::DIRECTORY_LISTING)
            }
            Intent::Chat => samples::HELP_TEXT.to_string(),
        }
    }

    fn run_query(&self, sql: &str, rows: QueryRows) -> String {
        if let Err(violation) = self.safety.check_query(sql) {
            return format!(
                "{} This query has been blocked for security reasons: {}",
                markers::WARNING,
                violation
            );
        }
        format::osquery_result(sql, &self.safety.sanitize_rows(rows))
    }

    fn run_command(&self, command: &str, output: &str) -> String {
        if !self.safety.is_command_safe(command) {
            return format!(
                "{} This command has been blocked for security reasons.",
                markers::WARNING
            );
        }
        format::os_result(command, output)
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseSource for SimulatedSource {
    async fn generate(&self, input: &str) -> Result<String, SourceError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        Ok(self.respond(input))
    }
}
