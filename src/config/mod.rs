//! Configuration module for proxyctl
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ProxyctlPaths;
pub use settings::Settings;
