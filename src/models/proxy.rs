//! Proxy records as served by the control service
//!
//! The server owns these; the client only holds transient copies for
//! rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProxyctlError;

/// Run state of a managed proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyStatus {
    Running,
    Stopped,
}

impl fmt::Display for ProxyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// A forwarding proxy relaying a listening port to a target host/port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRecord {
    pub id: u64,
    pub listening_port: u16,
    pub target_host: String,
    pub target_port: u16,

    /// Process id while running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,

    /// Server-formatted start timestamp
    #[serde(default)]
    pub start_time: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_time: Option<String>,

    pub status: ProxyStatus,
}

impl ProxyRecord {
    /// Whether the proxy is currently running
    pub fn is_running(&self) -> bool {
        self.status == ProxyStatus::Running
    }

    /// `host:port` the proxy forwards to
    pub fn target(&self) -> String {
        format!("{}:{}", self.target_host, self.target_port)
    }
}

/// Definition of a proxy to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProxy {
    pub listening_port: u16,
    pub target_host: String,
    pub target_port: u16,

    /// Idle timeout in seconds passed through to the relay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

impl NewProxy {
    pub fn new(listening_port: u16, target_host: impl Into<String>, target_port: u16) -> Self {
        Self {
            listening_port,
            target_host: target_host.into(),
            target_port,
            timeout: None,
        }
    }

    /// Validate before sending to the server
    pub fn validate(&self) -> Result<(), ProxyctlError> {
        if self.listening_port == 0 {
            return Err(ProxyctlError::Validation(
                "Listening port must be between 1 and 65535".into(),
            ));
        }
        if self.target_port == 0 {
            return Err(ProxyctlError::Validation(
                "Target port must be between 1 and 65535".into(),
            ));
        }

        let host = self.target_host.trim();
        if host.is_empty() {
            return Err(ProxyctlError::Validation("Target host cannot be empty".into()));
        }
        if host.chars().any(char::is_whitespace) {
            return Err(ProxyctlError::Validation(format!(
                "Target host '{}' contains whitespace",
                host
            )));
        }

        if self.timeout == Some(0) {
            return Err(ProxyctlError::Validation(
                "Timeout must be at least one second".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_from_server_json() {
        let record: ProxyRecord = serde_json::from_value(json!({
            "id": 1,
            "listening_port": 8080,
            "target_host": "example.com",
            "target_port": 80,
            "pid": 4242,
            "start_time": "2026-10-19 08:00:00",
            "status": "running"
        }))
        .unwrap();

        assert_eq!(record.id, 1);
        assert!(record.is_running());
        assert_eq!(record.pid, Some(4242));
        assert_eq!(record.stop_time, None);
        assert_eq!(record.target(), "example.com:80");
    }

    #[test]
    fn test_stopped_record_without_pid() {
        let record: ProxyRecord = serde_json::from_value(json!({
            "id": 7,
            "listening_port": 2222,
            "target_host": "10.0.0.5",
            "target_port": 22,
            "start_time": "2026-10-18 21:14:03",
            "stop_time": "2026-10-18 22:00:00",
            "status": "stopped"
        }))
        .unwrap();

        assert_eq!(record.status, ProxyStatus::Stopped);
        assert_eq!(record.pid, None);
        assert_eq!(record.stop_time.as_deref(), Some("2026-10-18 22:00:00"));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result: Result<ProxyRecord, _> = serde_json::from_value(json!({
            "id": 1,
            "listening_port": 8080,
            "target_host": "example.com",
            "target_port": 80,
            "status": "paused"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_new_proxy_body_omits_missing_timeout() {
        let body = serde_json::to_value(NewProxy::new(8080, "example.com", 80)).unwrap();
        assert_eq!(
            body,
            json!({"listening_port": 8080, "target_host": "example.com", "target_port": 80})
        );
    }

    #[test]
    fn test_new_proxy_validation() {
        assert!(NewProxy::new(8080, "example.com", 80).validate().is_ok());
        assert!(NewProxy::new(0, "example.com", 80).validate().is_err());
        assert!(NewProxy::new(8080, "example.com", 0).validate().is_err());
        assert!(NewProxy::new(8080, "  ", 80).validate().is_err());
        assert!(NewProxy::new(8080, "exa mple.com", 80).validate().is_err());

        let mut proxy = NewProxy::new(8080, "example.com", 80);
        proxy.timeout = Some(0);
        assert!(proxy.validate().unwrap_err().is_validation());
    }
}
