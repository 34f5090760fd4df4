//! Restore modes and server acknowledgements

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a restored backup is merged with the server's current proxies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RestoreMode {
    /// Add restored proxies alongside existing ones
    #[default]
    Append,
    /// Replace existing proxies
    Overwrite,
}

impl RestoreMode {
    /// Value sent in the `mode` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Overwrite => "overwrite",
        }
    }
}

impl fmt::Display for RestoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RestoreMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(Self::Append),
            "overwrite" => Ok(Self::Overwrite),
            other => Err(format!(
                "Invalid restore mode: '{}'. Valid modes: append, overwrite",
                other
            )),
        }
    }
}

/// JSON acknowledgement returned by mutating endpoints
///
/// The shape is server-defined, so the document is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ack(pub serde_json::Value);

impl Ack {
    /// Best-effort human readable message from the acknowledgement
    pub fn message(&self) -> Option<&str> {
        ["message", "status", "result"]
            .iter()
            .find_map(|key| self.0.get(*key).and_then(|v| v.as_str()))
    }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => f.write_str(message),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Decoded response of a successful restore
pub type RestoreResult = Ack;
