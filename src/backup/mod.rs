//! Backup and restore of proxy configuration
//!
//! # Architecture
//!
//! - `BackupExporter`: asks the server for a snapshot and saves the bytes
//!   through a `SaveTarget`
//! - `RestoreImporter`: lets the user choose a file through a `FileChooser`,
//!   reads it and submits it to the server under a `RestoreMode`
//!
//! Both hold a transient resource while they work (the staged payload, the
//! chooser session). Each is wrapped in a guard that releases it on drop, so
//! every exit path releases it exactly once.
//!
//! # Backup Format
//!
//! Backups are produced by the server and are opaque here: the export is
//! written byte for byte, and a restore sends the file's text back
//! unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use proxyctl::backup::{BackupExporter, DirectorySaveTarget, PathChooser, RestoreImporter};
//! use proxyctl::models::RestoreMode;
//!
//! let summary = BackupExporter::new(&transport).export(&mut DirectorySaveTarget::new("."))?;
//!
//! let ack = RestoreImporter::new(&transport)
//!     .import_backup(&mut PathChooser::new(&summary.path), Some(RestoreMode::Overwrite))?;
//! println!("{}", ack);
//! ```

mod chooser;
mod exporter;
mod importer;
mod save;

pub use chooser::{AcceptFilter, FileChooser, PathChooser, PromptChooser, PromptSession, Selection, JSON_FILE};
pub use exporter::{BackupExporter, ExportSummary};
pub use importer::{RestoreImporter, RestoreStage};
pub use save::{DirectorySaveTarget, SaveTarget, StagedFile, BACKUP_FILE_NAME};
