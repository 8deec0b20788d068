//! Security dashboard rendering.
//!
//! Renders a [`DashboardReport`] into the fixed-width banner layout the
//! classifier recognizes. The report data itself is simulated; see
//! [`DashboardReport::sample`].

use liachat_classify::markers;

const RULE_WIDTH: usize = 70;

/// Snapshot of host security posture, grouped the way the dashboard
/// presents it.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub hostname: String,
    pub cpu: String,
    pub memory_gb: f64,
    pub logged_in_users: Vec<String>,
    pub total_users: u32,
    pub listening_ports: u32,
    pub external_connections: u32,
    pub privileged_ports: u32,
    pub running_processes: u32,
    pub root_processes: u32,
    pub alerts: Vec<String>,
}

impl DashboardReport {
    /// Fixed sample snapshot used by the simulated engine.
    pub fn sample() -> Self {
        Self {
            hostname: "dev-machine".to_string(),
            cpu: "Intel Core i7-9750H".to_string(),
            memory_gb: 16.0,
            logged_in_users: vec!["admin on console".to_string()],
            total_users: 12,
            listening_ports: 15,
            external_connections: 8,
            privileged_ports: 3,
            running_processes: 247,
            root_processes: 45,
            alerts: Vec::new(),
        }
    }

    /// Render the banner layout.
    ///
    /// With alert lines present the output carries the warning sign and will
    /// classify as an error rather than a dashboard; the alert-free render
    /// is the one the classifier tags `dashboard`.
    pub fn render(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let thin = "-".repeat(RULE_WIDTH);
        let mut lines: Vec<String> = Vec::new();

        lines.push(rule.clone());
        lines.push(markers::DASHBOARD_BANNER.to_string());
        lines.push(rule.clone());
        lines.push(String::new());

        lines.push("📊 SYSTEM OVERVIEW".to_string());
        lines.push(thin.clone());
        lines.push(format!("  Hostname: {}", self.hostname));
        lines.push(format!("  CPU: {}", self.cpu));
        lines.push(format!("  Memory: {:.2} GB", self.memory_gb));
        lines.push(String::new());

        lines.push("👤 USER ACTIVITY".to_string());
        lines.push(thin.clone());
        lines.push(format!("  Logged in users: {}", self.logged_in_users.len()));
        for user in &self.logged_in_users {
            lines.push(format!("  - {}", user));
        }
        lines.push(format!("  Total system users: {}", self.total_users));
        lines.push(String::new());

        lines.push("🌐 NETWORK SECURITY".to_string());
        lines.push(thin.clone());
        lines.push(format!("  Listening ports: {}", self.listening_ports));
        lines.push(format!(
            "  Active external connections: {}",
            self.external_connections
        ));
        lines.push(format!("  Privileged ports in use: {}", self.privileged_ports));
        lines.push(String::new());

        lines.push("⚙️  PROCESS SECURITY".to_string());
        lines.push(thin.clone());
        lines.push(format!("  Running processes: {}", self.running_processes));
        lines.push(format!("  Root-owned processes: {}", self.root_processes));
        lines.push(String::new());

        lines.push("🚨 SECURITY ALERTS".to_string());
        lines.push(thin);
        if self.alerts.is_empty() {
            lines.push("  ✅ No immediate security concerns detected".to_string());
        } else {
            for alert in &self.alerts {
                lines.push(format!("  ⚠️  {}", alert));
            }
        }
        lines.push(String::new());

        lines.push(rule);
        lines.join("\n")
    }
}
