//! Pre-flight checks applied before anything is "run".
//!
//! Commands are screened against a blocklist, queries against a set of
//! structural rules, and result rows are stripped of columns that tend to
//! carry secrets. All checks are pure string logic.

use regex::Regex;
use thiserror::Error;

use crate::format::QueryRows;

/// Commands that must never run, matched case-insensitively as substrings.
const DANGEROUS_COMMANDS: &[&str] = &[
    "rm -rf",
    "rm --no-preserve-root",
    "format",
    "mkfs",
    "dd if=",
    "shutdown",
    "del /s",
    "rd /s",
    ":(){ :|:& };:",
    "fork bomb",
];

/// Tables exposing credential material.
const RESTRICTED_TABLES: &[&str] = &["keychain_items", "shadow", "etc_shadow"];

/// Column-name fragments that flag a cell as sensitive.
const RESTRICTED_COLUMNS: &[&str] = &["password", "passwd", "secret", "key", "token"];

const DESTRUCTIVE_KEYWORDS: &[&str] = &["drop", "delete", "insert", "update", "create"];

const UNION_PATTERN: &str = r"\bunion\b.+?\bselect\b";

/// Why a query was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SafetyViolation {
    #[error("Destructive operations are not allowed")]
    Destructive,
    #[error("UNION queries are not allowed")]
    UnionQuery,
    #[error("Excessive JOIN operations are not allowed")]
    ExcessiveJoins,
    #[error("Time-delay functions are not allowed")]
    TimeDelay,
    #[error("Restricted tables are not allowed")]
    RestrictedTable,
}

pub struct SafetyChecker {
    union_pattern: Regex,
}

impl SafetyChecker {
    pub fn new() -> Self {
        Self {
            union_pattern: Regex::new(UNION_PATTERN).expect("union pattern compiles"),
        }
    }

    /// Whether an OS command is clear of the blocklist.
    pub fn is_command_safe(&self, command: &str) -> bool {
        let lower = command.to_lowercase();
        !DANGEROUS_COMMANDS
            .iter()
            .any(|dangerous| lower.contains(dangerous))
    }

    /// Screen a query before execution. Read-only single-table selects pass;
    /// everything structurally suspicious is refused with a reason.
    pub fn check_query(&self, sql: &str) -> Result<(), SafetyViolation> {
        let lower = sql.to_lowercase();
        let lower = lower.trim();

        if DESTRUCTIVE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            return Err(SafetyViolation::Destructive);
        }
        if lower.contains("union")
            && lower.contains("select")
            && self.union_pattern.is_match(lower)
        {
            return Err(SafetyViolation::UnionQuery);
        }
        if lower.matches("join").count() > 3 {
            return Err(SafetyViolation::ExcessiveJoins);
        }
        if lower.contains("sleep") || lower.contains("delay") {
            return Err(SafetyViolation::TimeDelay);
        }
        if RESTRICTED_TABLES.iter().any(|table| lower.contains(table)) {
            return Err(SafetyViolation::RestrictedTable);
        }
        Ok(())
    }

    /// Drop columns whose name looks sensitive, cells included.
    pub fn sanitize_rows(&self, rows: QueryRows) -> QueryRows {
        let keep: Vec<usize> = rows
            .columns
            .iter()
            .enumerate()
            .filter(|(_, name)| {
                let lower = name.to_lowercase();
                !RESTRICTED_COLUMNS
                    .iter()
                    .any(|restricted| lower.contains(restricted))
            })
            .map(|(i, _)| i)
            .collect();

        QueryRows {
            columns: keep.iter().map(|&i| rows.columns[i].clone()).collect(),
            rows: rows
                .rows
                .iter()
                .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }
}

impl Default for SafetyChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_dangerous_commands() {
        let safety = SafetyChecker::new();
        assert!(!safety.is_command_safe("rm -rf /"));
        assert!(!safety.is_command_safe("sudo SHUTDOWN now"));
        assert!(!safety.is_command_safe("dd if=/dev/zero of=/dev/sda"));
        assert!(safety.is_command_safe("ls -la"));
        assert!(safety.is_command_safe("whoami"));
    }

    #[test]
    fn test_blocks_destructive_queries() {
        let safety = SafetyChecker::new();
        assert_eq!(
            safety.check_query("DROP TABLE users;"),
            Err(SafetyViolation::Destructive)
        );
        assert_eq!(
            safety.check_query("SELECT 1; DELETE FROM users;"),
            Err(SafetyViolation::Destructive)
        );
    }

    #[test]
    fn test_blocks_union_injection() {
        let safety = SafetyChecker::new();
        assert_eq!(
            safety.check_query("SELECT pid FROM processes UNION SELECT uid FROM users;"),
            Err(SafetyViolation::UnionQuery)
        );
    }

    #[test]
    fn test_blocks_excessive_joins() {
        let safety = SafetyChecker::new();
        let sql = "SELECT a.x FROM a \
                   JOIN b ON a.id = b.id \
                   JOIN c ON b.id = c.id \
                   JOIN d ON c.id = d.id \
                   JOIN e ON d.id = e.id;";
        assert_eq!(safety.check_query(sql), Err(SafetyViolation::ExcessiveJoins));
    }

    #[test]
    fn test_blocks_time_delay() {
        let safety = SafetyChecker::new();
        assert_eq!(
            safety.check_query("SELECT sleep(10);"),
            Err(SafetyViolation::TimeDelay)
        );
    }

    #[test]
    fn test_blocks_restricted_tables() {
        let safety = SafetyChecker::new();
        assert_eq!(
            safety.check_query("SELECT * FROM shadow;"),
            Err(SafetyViolation::RestrictedTable)
        );
    }

    #[test]
    fn test_allows_plain_selects() {
        let safety = SafetyChecker::new();
        assert_eq!(
            safety.check_query("SELECT pid, name, cmdline FROM processes LIMIT 10;"),
            Ok(())
        );
        assert_eq!(
            safety.check_query("SELECT port, protocol, address FROM listening_ports LIMIT 10;"),
            Ok(())
        );
    }

    #[test]
    fn test_sanitize_strips_sensitive_columns() {
        let safety = SafetyChecker::new();
        let mut rows = QueryRows::new(&["username", "password_hash", "api_token"]);
        rows.push_row(&["admin", "deadbeef", "tok-123"]);

        let clean = safety.sanitize_rows(rows);
        assert_eq!(clean.columns, vec!["username"]);
        assert_eq!(clean.rows, vec![vec!["admin".to_string()]]);
    }
}
