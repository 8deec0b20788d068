//! Rendering of simulated results into reply text.
//!
//! The marker prefixes come from `liachat_classify::markers`, so everything
//! rendered here classifies as the kind it looks like.

use liachat_classify::markers;

/// Character cap on raw command output before truncation.
pub const MAX_OUTPUT_CHARS: usize = 1000;
/// Row cap for rendered query results.
pub const MAX_ROWS: usize = 50;
/// Character cap per table cell.
pub const MAX_CELL_CHARS: usize = 50;

/// Column-ordered tabular query result.
#[derive(Debug, Clone)]
pub struct QueryRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl QueryRows {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, cells: &[&str]) {
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn truncate_chars(s: &str, max: usize) -> Option<String> {
    if s.chars().count() <= max {
        None
    } else {
        Some(s.chars().take(max).collect())
    }
}

/// Render an executed OS command and its captured output.
pub fn os_result(command: &str, output: &str) -> String {
    if output.is_empty() {
        return format!("{} `{}`\n\nNo output.", markers::EXECUTED, command);
    }

    let output = match truncate_chars(output, MAX_OUTPUT_CHARS) {
        Some(cut) => format!("{}\n... (truncated)", cut),
        None => output.to_string(),
    };

    format!(
        "{} `{}`\n\nOutput:\n```\n{}\n```",
        markers::EXECUTED,
        command,
        output
    )
}

/// Render a query and its result rows as a markdown table.
pub fn osquery_result(sql: &str, rows: &QueryRows) -> String {
    if rows.is_empty() {
        return format!("{} `{}`\n\nNo results found.", markers::QUERY, sql);
    }

    let mut table = String::new();
    table.push_str(&format!("| {} |\n", rows.columns.join(" | ")));
    table.push_str(&format!(
        "|{}|\n",
        rows.columns.iter().map(|_| "---").collect::<Vec<_>>().join("|")
    ));

    for row in rows.rows.iter().take(MAX_ROWS) {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match truncate_chars(cell, MAX_CELL_CHARS) {
                Some(cut) => format!("{}...", cut),
                None => cell.clone(),
            })
            .collect();
        table.push_str(&format!("| {} |\n", cells.join(" | ")));
    }

    let total = rows.rows.len();
    let mut text = format!(
        "{} `{}`\n\nResults ({} rows):\n\n{}",
        markers::QUERY,
        sql,
        total,
        table
    );
    if total > MAX_ROWS {
        text.push_str(&format!(
            "\n*Showing first {} of {} results*",
            MAX_ROWS, total
        ));
    }
    text
}

/// Render a failure message.
pub fn error(message: &str) -> String {
    liachat_classify::failure_text(message)
}
