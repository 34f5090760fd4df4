//! Where exported backups end up
//!
//! Saving is two-phase: the payload is first staged behind a transient
//! handle, then saved under its final name. The handle is released exactly
//! once whether or not the save happened.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

/// File name exported backups are saved as
pub const BACKUP_FILE_NAME: &str = "proxies-backup.json";

/// Destination for a downloaded payload
pub trait SaveTarget {
    /// Transient resource exposing the payload until it is released
    type Handle;

    /// Expose `payload` through a new handle
    fn stage(&mut self, payload: Vec<u8>) -> io::Result<Self::Handle>;

    /// Save the staged payload as `file_name`, returning where it landed
    fn save(&mut self, handle: &mut Self::Handle, file_name: &str) -> io::Result<PathBuf>;

    /// Give the handle back
    fn release(&mut self, handle: Self::Handle);
}

/// A staged payload that releases its handle when dropped
pub(crate) struct StagedPayload<'t, T: SaveTarget> {
    target: &'t mut T,
    handle: Option<T::Handle>,
}

impl<'t, T: SaveTarget> StagedPayload<'t, T> {
    pub(crate) fn stage(target: &'t mut T, payload: Vec<u8>) -> io::Result<Self> {
        let handle = target.stage(payload)?;
        Ok(Self {
            target,
            handle: Some(handle),
        })
    }

    pub(crate) fn save(&mut self, file_name: &str) -> io::Result<PathBuf> {
        match self.handle.as_mut() {
            Some(handle) => self.target.save(handle, file_name),
            None => Err(io::Error::other("staged payload was already released")),
        }
    }
}

impl<T: SaveTarget> Drop for StagedPayload<'_, T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.target.release(handle);
        }
    }
}

/// Saves into a directory on the local filesystem
///
/// The payload is staged in a temporary file inside the directory and
/// renamed into place on save, so a failed export never leaves a partial
/// `proxies-backup.json` behind.
#[derive(Debug, Clone)]
pub struct DirectorySaveTarget {
    dir: PathBuf,
}

/// Temporary file holding a staged payload
#[derive(Debug)]
pub struct StagedFile {
    file: Option<NamedTempFile>,
}

impl DirectorySaveTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SaveTarget for DirectorySaveTarget {
    type Handle = StagedFile;

    fn stage(&mut self, payload: Vec<u8>) -> io::Result<StagedFile> {
        fs::create_dir_all(&self.dir)?;
        let mut file = NamedTempFile::new_in(&self.dir)?;
        file.write_all(&payload)?;
        file.flush()?;
        Ok(StagedFile { file: Some(file) })
    }

    fn save(&mut self, handle: &mut StagedFile, file_name: &str) -> io::Result<PathBuf> {
        let file = handle
            .file
            .take()
            .ok_or_else(|| io::Error::other("staged payload was already saved"))?;
        let destination = self.dir.join(file_name);
        file.persist(&destination).map_err(|e| e.error)?;
        Ok(destination)
    }

    fn release(&mut self, handle: StagedFile) {
        // An unsaved temp file is deleted on drop
        drop(handle);
    }
}
