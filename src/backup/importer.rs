//! Backup restore
//!
//! A restore is a linear state machine run as a single task:
//!
//! ```text
//! Idle -> AwaitingFileSelection -> ReadingFile -> Submitting -> Succeeded
//!               |                      |              |
//!               +----------------------+--------------+-----> Failed
//! ```
//!
//! The chooser session attached on leaving `Idle` is detached exactly once,
//! before the result is handed back, whichever terminal state is reached.

use std::fs;
use std::path::{Path, PathBuf};

use super::chooser::{FileChooser, PendingSelection, Selection, JSON_FILE};
use crate::error::{RestoreError, TransportError};
use crate::models::{RestoreMode, RestoreResult};
use crate::transport::{HttpBackend, Request, Transport};

/// Observable stage of a restore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreStage {
    Idle,
    AwaitingFileSelection,
    ReadingFile,
    Submitting,
    Succeeded,
    Failed,
}

/// Stage plus the data it carries
enum RestoreState {
    AwaitingFileSelection,
    ReadingFile(PathBuf),
    Submitting(String),
    Succeeded(RestoreResult),
    Failed(RestoreError),
}

impl RestoreState {
    fn stage(&self) -> RestoreStage {
        match self {
            Self::AwaitingFileSelection => RestoreStage::AwaitingFileSelection,
            Self::ReadingFile(_) => RestoreStage::ReadingFile,
            Self::Submitting(_) => RestoreStage::Submitting,
            Self::Succeeded(_) => RestoreStage::Succeeded,
            Self::Failed(_) => RestoreStage::Failed,
        }
    }
}

/// Uploads a previously exported backup
pub struct RestoreImporter<'a, B> {
    transport: &'a Transport<B>,
}

impl<'a, B: HttpBackend> RestoreImporter<'a, B> {
    pub fn new(transport: &'a Transport<B>) -> Self {
        Self { transport }
    }

    /// Let the user pick a backup file and restore it
    ///
    /// `None` restores in the default `append` mode.
    pub fn import_backup<C: FileChooser>(
        &self,
        chooser: &mut C,
        mode: Option<RestoreMode>,
    ) -> Result<RestoreResult, RestoreError> {
        self.import_backup_with_progress(chooser, mode, |_| {})
    }

    /// Same as `import_backup`, reporting every stage entered to `on_stage`
    pub fn import_backup_with_progress<C: FileChooser>(
        &self,
        chooser: &mut C,
        mode: Option<RestoreMode>,
        mut on_stage: impl FnMut(RestoreStage),
    ) -> Result<RestoreResult, RestoreError> {
        let mode = mode.unwrap_or_default();
        on_stage(RestoreStage::Idle);

        let mut pending = PendingSelection::attach(chooser, &JSON_FILE);
        let mut state = RestoreState::AwaitingFileSelection;
        let outcome = loop {
            tracing::debug!(stage = ?state.stage(), %mode, "restore stage");
            if !matches!(state, RestoreState::Succeeded(_) | RestoreState::Failed(_)) {
                on_stage(state.stage());
            }

            state = match state {
                RestoreState::AwaitingFileSelection => match pending.present() {
                    Ok(Selection::Chosen(path)) => RestoreState::ReadingFile(path),
                    Ok(Selection::Dismissed) => RestoreState::Failed(RestoreError::NoFileSelected),
                    Err(reason) => RestoreState::Failed(RestoreError::SelectionFailed(reason)),
                },
                RestoreState::ReadingFile(path) => match read_backup_text(&path) {
                    Ok(text) => RestoreState::Submitting(text),
                    Err(err) => RestoreState::Failed(err),
                },
                RestoreState::Submitting(text) => match self.submit(mode, text) {
                    Ok(ack) => RestoreState::Succeeded(ack),
                    Err(err) => RestoreState::Failed(err.into()),
                },
                RestoreState::Succeeded(ack) => break Ok(ack),
                RestoreState::Failed(err) => break Err(err),
            };
        };
        drop(pending);

        match &outcome {
            Ok(_) => {
                tracing::info!(%mode, "backup restored");
                on_stage(RestoreStage::Succeeded);
            }
            Err(err) => {
                tracing::debug!(%mode, error = %err, "restore failed");
                on_stage(RestoreStage::Failed);
            }
        }
        outcome
    }

    /// Send backup text to the restore endpoint verbatim
    pub fn submit(&self, mode: RestoreMode, text: String) -> Result<RestoreResult, TransportError> {
        let request = Request::post("/restore")
            .query("mode", mode.as_str())
            .header("Content-Type", "application/json")
            .body(text.into_bytes());
        self.transport.request_json(request)
    }
}

/// Read the whole file as UTF-8 text
fn read_backup_text(path: &Path) -> Result<String, RestoreError> {
    let bytes = fs::read(path)
        .map_err(|e| RestoreError::ReadFailed(format!("{}: {}", path.display(), e)))?;
    String::from_utf8(bytes).map_err(|e| {
        RestoreError::ReadFailed(format!(
            "{}: not valid UTF-8 (byte {})",
            path.display(),
            e.utf8_error().valid_up_to()
        ))
    })
}
