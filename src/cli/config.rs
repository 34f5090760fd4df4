//! Config CLI commands
//!
//! Shows and updates the persisted settings.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::{ProxyctlPaths, Settings};
use crate::error::{ProxyctlError, ProxyctlResult};
use crate::models::RestoreMode;
use crate::transport::normalize_base_url;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,
    /// Update one or more settings
    Set {
        /// Base URL of the proxy control service
        #[arg(long = "url")]
        url: Option<String>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Directory exported backups are saved into
        #[arg(long)]
        download_dir: Option<PathBuf>,
        /// Restore mode used when none is given
        #[arg(long, value_enum)]
        restore_mode: Option<RestoreMode>,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &ProxyctlPaths,
    settings: &mut Settings,
    cmd: ConfigCommands,
) -> ProxyctlResult<()> {
    match cmd {
        ConfigCommands::Show => {
            print!("{}", format_config(paths, settings));
        }

        ConfigCommands::Set {
            url,
            timeout,
            download_dir,
            restore_mode,
        } => {
            if url.is_none() && timeout.is_none() && download_dir.is_none() && restore_mode.is_none() {
                return Err(ProxyctlError::Validation(
                    "Nothing to change. Pass at least one of --url, --timeout, --download-dir, --restore-mode".into(),
                ));
            }

            if let Some(url) = url {
                settings.base_url = normalize_base_url(&url)?;
            }
            if let Some(timeout) = timeout {
                if timeout == 0 {
                    return Err(ProxyctlError::Validation(
                        "Timeout must be at least 1 second".into(),
                    ));
                }
                settings.timeout_secs = timeout;
            }
            if let Some(dir) = download_dir {
                settings.download_dir = Some(dir);
            }
            if let Some(mode) = restore_mode {
                settings.default_restore_mode = mode;
            }

            settings.save(paths)?;
            println!("Settings saved to {}", paths.settings_file().display());
        }
    }

    Ok(())
}

fn format_config(paths: &ProxyctlPaths, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str("proxyctl Configuration\n");
    output.push_str("======================\n");
    output.push_str(&format!("Config directory: {}\n", paths.base_dir().display()));
    output.push_str(&format!("Settings file:    {}\n", paths.settings_file().display()));
    output.push_str(&format!("Activity log:     {}\n", paths.activity_log().display()));
    output.push('\n');
    output.push_str("Settings:\n");
    output.push_str(&format!("  Base URL:             {}\n", settings.base_url));
    output.push_str(&format!("  Timeout:              {}s\n", settings.timeout_secs));
    output.push_str(&format!("  Download directory:   {}\n", settings.download_dir().display()));
    output.push_str(&format!("  Default restore mode: {}\n", settings.default_restore_mode));
    output
}
