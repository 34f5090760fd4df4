//! Custom error types for proxyctl
//!
//! This module defines the error hierarchy for the client using thiserror
//! for ergonomic error definitions.
//!
//! Three layers exist:
//!
//! - `TransportError`: anything that went wrong talking to the control service
//! - `RestoreError`: the restore flow, which can also fail before any request
//!   is made (no file, chooser failure, unreadable file)
//! - `ProxyctlError`: the crate-wide error that wraps both unchanged

use thiserror::Error;

/// Errors produced by the HTTP transport
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No response was received (DNS, connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("{message} (HTTP {code})")]
    HttpStatus { code: u16, message: String },

    /// The response body could not be decoded in the requested shape
    #[error("Decode error: {0}")]
    Decode(String),
}

impl TransportError {
    /// Status code of an HTTP failure, if this is one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Check if this is a network-level failure
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Errors produced by the restore flow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RestoreError {
    /// The chooser was dismissed without a selection
    #[error("No file selected")]
    NoFileSelected,

    /// The chooser could not be presented
    #[error("File selection failed: {0}")]
    SelectionFailed(String),

    /// The selected file could not be read as UTF-8 text
    #[error("Failed to read backup file: {0}")]
    ReadFailed(String),

    /// The restore request itself failed
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// The main error type for proxyctl operations
#[derive(Error, Debug)]
pub enum ProxyctlError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Errors talking to the control service
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Errors from the restore flow
    #[error(transparent)]
    Restore(#[from] RestoreError),
}

impl ProxyctlError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The transport error underneath this error, if any
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(err) | Self::Restore(RestoreError::Transport(err)) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ProxyctlError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ProxyctlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for proxyctl operations
pub type ProxyctlResult<T> = Result<T, ProxyctlError>;
