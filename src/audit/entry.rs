//! Activity entry data structures
//!
//! Defines the operations the client records and the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Client operations that change server state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateProxy,
    StartProxy,
    StopProxy,
    DeleteProxy,
    ExportBackup,
    RestoreBackup,
    CreateCaddyServer,
    UpdateCaddyServer,
    StartCaddyServer,
    StopCaddyServer,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::CreateProxy => write!(f, "CREATE"),
            Operation::StartProxy => write!(f, "START"),
            Operation::StopProxy => write!(f, "STOP"),
            Operation::DeleteProxy => write!(f, "DELETE"),
            Operation::ExportBackup => write!(f, "BACKUP"),
            Operation::RestoreBackup => write!(f, "RESTORE"),
            Operation::CreateCaddyServer => write!(f, "CADDY-CREATE"),
            Operation::UpdateCaddyServer => write!(f, "CADDY-UPDATE"),
            Operation::StartCaddyServer => write!(f, "CADDY-START"),
            Operation::StopCaddyServer => write!(f, "CADDY-STOP"),
        }
    }
}

/// Whether the operation went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

/// A single activity log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// When the operation finished (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// What the operation acted on (proxy id, file path, server)
    pub target: String,

    pub outcome: Outcome,

    /// Server message, saved path, or error text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ActivityEntry {
    /// Entry for an operation that succeeded
    pub fn success(
        operation: Operation,
        target: impl Into<String>,
        detail: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            target: target.into(),
            outcome: Outcome::Success,
            detail,
        }
    }

    /// Entry for an operation that failed with `error`
    pub fn failure(
        operation: Operation,
        target: impl Into<String>,
        error: &impl std::fmt::Display,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            target: target.into(),
            outcome: Outcome::Failure,
            detail: Some(error.to_string()),
        }
    }

    /// Entry for `result`, whichever way it went
    pub fn from_result<T, E: std::fmt::Display>(
        operation: Operation,
        target: impl Into<String>,
        result: &Result<T, E>,
        describe: impl FnOnce(&T) -> Option<String>,
    ) -> Self {
        match result {
            Ok(value) => Self::success(operation, target, describe(value)),
            Err(err) => Self::failure(operation, target, err),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.target
        );

        if self.outcome == Outcome::Failure {
            output.push_str(" FAILED");
        }

        if let Some(detail) = &self.detail {
            output.push_str(&format!(" ({})", detail));
        }

        output
    }
}
