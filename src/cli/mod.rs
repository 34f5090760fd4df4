//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod caddy;
pub mod config;
pub mod history;
pub mod proxy;

pub use backup::{handle_backup_command, BackupCommands};
pub use caddy::{handle_caddy_command, CaddyCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use history::handle_history_command;
pub use proxy::{handle_proxy_command, ProxyCommands};

use crate::config::Settings;
use crate::error::ProxyctlResult;
use crate::transport::{ReqwestBackend, Transport};

/// Build a transport for the configured control service
pub fn connect(settings: &Settings) -> ProxyctlResult<Transport> {
    let backend = ReqwestBackend::new(settings.timeout())?;
    Transport::new(&settings.base_url, backend)
}
