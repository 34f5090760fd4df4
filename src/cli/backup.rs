//! Backup CLI commands
//!
//! Implements CLI commands for backup export and restore.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::audit::{ActivityEntry, ActivityLog, Operation};
use crate::backup::{
    BackupExporter, DirectorySaveTarget, FileChooser, PathChooser, PromptChooser,
    RestoreImporter, RestoreStage,
};
use crate::config::settings::Settings;
use crate::error::ProxyctlResult;
use crate::models::{RestoreMode, RestoreResult};
use crate::transport::{HttpBackend, Transport};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Download a snapshot of every proxy as proxies-backup.json
    Export {
        /// Directory to save into (defaults to the configured download directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Restore proxies from a backup file
    Restore {
        /// Backup file; asked for interactively when omitted
        file: Option<PathBuf>,

        /// How to merge with the proxies already on the server
        #[arg(short, long, value_enum)]
        mode: Option<RestoreMode>,

        /// Confirm an overwrite restore
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command<B: HttpBackend>(
    transport: &Transport<B>,
    settings: &Settings,
    activity: &ActivityLog,
    cmd: BackupCommands,
) -> ProxyctlResult<()> {
    match cmd {
        BackupCommands::Export { dir } => {
            let dir = dir.unwrap_or_else(|| settings.download_dir());
            let mut target = DirectorySaveTarget::new(&dir);

            println!("Creating backup...");
            let result = BackupExporter::new(transport).export(&mut target);
            activity.record(&ActivityEntry::from_result(
                Operation::ExportBackup,
                transport.base_url(),
                &result,
                |summary| Some(summary.path.display().to_string()),
            ));

            let summary = result?;
            println!("Backup saved: {}", summary.path.display());
            println!("Size: {} bytes", summary.size_bytes);
        }

        BackupCommands::Restore { file, mode, force } => {
            let mode = mode.unwrap_or(settings.default_restore_mode);

            if mode == RestoreMode::Overwrite && !force {
                println!("WARNING: An overwrite restore replaces ALL proxies on the server!");
                println!("To proceed, run again with --force flag:");
                println!("  proxyctl backup restore --mode overwrite --force");
                return Ok(());
            }

            let (target, result) = match file {
                Some(path) => {
                    let target = path.display().to_string();
                    (target, restore(transport, &mut PathChooser::new(path), mode))
                }
                None => {
                    let stdin = io::stdin();
                    let mut chooser = PromptChooser::new(stdin.lock(), io::stderr());
                    ("interactive selection".to_string(), restore(transport, &mut chooser, mode))
                }
            };

            activity.record(&ActivityEntry::from_result(
                Operation::RestoreBackup,
                format!("{} ({})", target, mode),
                &result,
                |ack| Some(ack.to_string()),
            ));

            let ack = result?;
            println!("Restore complete: {}", ack);
        }
    }

    Ok(())
}

fn restore<B: HttpBackend, C: FileChooser>(
    transport: &Transport<B>,
    chooser: &mut C,
    mode: RestoreMode,
) -> ProxyctlResult<RestoreResult> {
    let importer = RestoreImporter::new(transport);
    let ack = importer.import_backup_with_progress(chooser, Some(mode), |stage| {
        if stage == RestoreStage::Submitting {
            println!("Restoring proxies ({} mode)...", mode);
            let _ = io::stdout().flush();
        }
    })?;
    Ok(ack)
}
