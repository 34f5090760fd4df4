//! Caddy reverse-proxy servers managed by the control service

use serde::{Deserialize, Serialize};

use super::proxy::ProxyStatus;
use crate::error::ProxyctlError;

/// A Caddy server block as stored by the control service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaddyServer {
    #[serde(default)]
    pub id: u64,

    /// Server-assigned name (`srv...`) used in every per-server route
    pub name: String,

    pub hostname: String,
    pub port: u16,

    /// Upstream `host:port` the server dials
    pub upstream_url: String,

    /// PEM file trusted when dialing the upstream over TLS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_trust_pool: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_proxies: Option<Vec<String>>,

    #[serde(default = "stopped")]
    pub status: ProxyStatus,

    #[serde(default)]
    pub create_time: String,
}

fn stopped() -> ProxyStatus {
    ProxyStatus::Stopped
}

impl CaddyServer {
    pub fn is_running(&self) -> bool {
        self.status == ProxyStatus::Running
    }
}

/// Definition of a Caddy server, used to create or replace one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCaddyServer {
    pub hostname: String,
    pub port: u16,
    pub upstream_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_trust_pool: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_proxies: Option<Vec<String>>,
}

impl NewCaddyServer {
    pub fn new(hostname: impl Into<String>, port: u16, upstream_url: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            port,
            upstream_url: upstream_url.into(),
            tls_trust_pool: None,
            trusted_proxies: None,
        }
    }

    /// Validate before sending to the server
    pub fn validate(&self) -> Result<(), ProxyctlError> {
        if self.port == 0 {
            return Err(ProxyctlError::Validation(
                "Port must be between 1 and 65535".into(),
            ));
        }

        for (label, value) in [("Hostname", &self.hostname), ("Upstream", &self.upstream_url)] {
            let value = value.trim();
            if value.is_empty() {
                return Err(ProxyctlError::Validation(format!("{} cannot be empty", label)));
            }
            if value.chars().any(char::is_whitespace) {
                return Err(ProxyctlError::Validation(format!(
                    "{} '{}' contains whitespace",
                    label, value
                )));
            }
        }

        if self.trusted_proxies.as_ref().is_some_and(|p| p.is_empty()) {
            return Err(ProxyctlError::Validation(
                "Trusted proxies, when given, cannot be empty".into(),
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
    fn test_server_from_row() {
        let server: CaddyServer = serde_json::from_value(json!({
            "id": 2,
            "name": "srv4821",
            "hostname": "app.example.com",
            "port": 443,
            "upstream_url": "10.0.0.4:8080",
            "tls_trust_pool": null,
            "trusted_proxies": ["10.0.0.0/8"],
            "status": "running",
            "create_time": "2026-10-19 08:00:00"
        }))
        .unwrap();

        assert_eq!(server.name, "srv4821");
        assert!(server.is_running());
        assert_eq!(server.tls_trust_pool, None);
        assert_eq!(server.trusted_proxies, Some(vec!["10.0.0.0/8".to_string()]));
    }

    #[test]
    fn test_missing_status_is_stopped() {
        let server: CaddyServer = serde_json::from_value(json!({
            "name": "srv1",
            "hostname": "a.example",
            "port": 80,
            "upstream_url": "127.0.0.1:3000"
        }))
        .unwrap();
        assert_eq!(server.status, ProxyStatus::Stopped);
    }

    #[test]
    fn test_definition_body() {
        let mut server = NewCaddyServer::new("app.example.com", 443, "10.0.0.4:8080");
        assert_eq!(
            serde_json::to_value(&server).unwrap(),
            json!({"hostname": "app.example.com", "port": 443, "upstream_url": "10.0.0.4:8080"})
        );

        server.tls_trust_pool = Some("/etc/ca.pem".into());
        let body = serde_json::to_value(&server).unwrap();
        assert_eq!(body["tls_trust_pool"], "/etc/ca.pem");
    }

    #[test]
    fn test_definition_validation() {
        assert!(NewCaddyServer::new("a.example", 80, "127.0.0.1:3000").validate().is_ok());
        assert!(NewCaddyServer::new("a.example", 0, "127.0.0.1:3000").validate().is_err());
        assert!(NewCaddyServer::new("", 80, "127.0.0.1:3000").validate().is_err());
        assert!(NewCaddyServer::new("a.example", 80, "a b").validate().is_err());

        let mut server = NewCaddyServer::new("a.example", 80, "127.0.0.1:3000");
        server.trusted_proxies = Some(Vec::new());
        assert!(server.validate().unwrap_err().is_validation());
    }
}
