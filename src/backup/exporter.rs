//! Backup export
//!
//! Asks the control service for a fresh snapshot of every proxy and saves
//! the bytes it returns as `proxies-backup.json`. The payload is never
//! parsed on this side.

use std::path::PathBuf;

use super::save::{SaveTarget, StagedPayload, BACKUP_FILE_NAME};
use crate::error::{ProxyctlResult, TransportError};
use crate::transport::{HttpBackend, Request, Transport};

/// Where an export was saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub size_bytes: usize,
}

/// Downloads server snapshots
pub struct BackupExporter<'a, B> {
    transport: &'a Transport<B>,
}

impl<'a, B: HttpBackend> BackupExporter<'a, B> {
    pub fn new(transport: &'a Transport<B>) -> Self {
        Self { transport }
    }

    /// Trigger a snapshot on the server and return its raw bytes
    ///
    /// Every call creates a new snapshot server-side.
    pub fn fetch_snapshot(&self) -> Result<Vec<u8>, TransportError> {
        self.transport.request_bytes(Request::post("/backup"))
    }

    /// Trigger a snapshot and save it through `target`
    ///
    /// Transport failures are returned unchanged. The staged payload is
    /// released before this returns, on success and on failure alike.
    pub fn export<T: SaveTarget>(&self, target: &mut T) -> ProxyctlResult<ExportSummary> {
        let payload = self.fetch_snapshot()?;
        let size_bytes = payload.len();

        let mut staged = StagedPayload::stage(target, payload)?;
        let saved = staged.save(BACKUP_FILE_NAME);
        drop(staged);
        let path = saved?;

        tracing::info!(path = %path.display(), size_bytes, "backup exported");
        Ok(ExportSummary { path, size_bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProxyctlError;
    use crate::transport::testing::{FakeControlService, ScriptedBackend};
    use crate::transport::Method;
    use std::io;
    use tempfile::TempDir;

    /// Save target that only counts what happens to it
    #[derive(Default)]
    struct RecordingTarget {
        staged: usize,
        saves: Vec<(String, Vec<u8>)>,
        released: usize,
        fail_save: bool,
    }

    impl SaveTarget for RecordingTarget {
        type Handle = Vec<u8>;

        fn stage(&mut self, payload: Vec<u8>) -> io::Result<Vec<u8>> {
            self.staged += 1;
            Ok(payload)
        }

        fn save(&mut self, handle: &mut Vec<u8>, file_name: &str) -> io::Result<PathBuf> {
            if self.fail_save {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.saves.push((file_name.to_string(), handle.clone()));
            Ok(PathBuf::from(file_name))
        }

        fn release(&mut self, _handle: Vec<u8>) {
            self.released += 1;
        }
    }

    fn transport(backend: ScriptedBackend) -> Transport<ScriptedBackend> {
        Transport::new("http://localhost:5000", backend).unwrap()
    }

    #[test]
    fn test_export_saves_once_and_releases_once() {
        let backend = ScriptedBackend::new();
        backend.respond(200, br#"[{"id":1}]"#.to_vec());
        let transport = transport(backend);
        let mut target = RecordingTarget::default();

        let summary = BackupExporter::new(&transport).export(&mut target).unwrap();

        assert_eq!(summary.path, PathBuf::from("proxies-backup.json"));
        assert_eq!(summary.size_bytes, 10);
        assert_eq!(target.saves.len(), 1);
        assert_eq!(target.saves[0].0, "proxies-backup.json");
        assert_eq!(target.saves[0].1, br#"[{"id":1}]"#.to_vec());
        assert_eq!(target.released, 1);

        let sent = transport.backend().requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].url, "http://localhost:5000/backup");
    }

    #[test]
    fn test_payload_kept_as_bytes() {
        // Not JSON at all; must still be saved untouched
        let payload = vec![0x1f, 0x8b, 0x08, 0x00, 0xff];
        let backend = ScriptedBackend::new();
        backend.respond(200, payload.clone());
        let transport = transport(backend);
        let mut target = RecordingTarget::default();

        BackupExporter::new(&transport).export(&mut target).unwrap();

        assert_eq!(target.saves[0].1, payload);
    }

    #[test]
    fn test_http_failure_propagates_unchanged() {
        let backend = ScriptedBackend::new();
        backend.respond(500, r#"{"error": "database is locked"}"#);
        let transport = transport(backend);
        let mut target = RecordingTarget::default();

        let err = BackupExporter::new(&transport).export(&mut target).unwrap_err();

        assert_eq!(
            err.transport(),
            Some(&TransportError::HttpStatus {
                code: 500,
                message: "database is locked".into()
            })
        );
        assert_eq!(target.staged, 0);
        assert_eq!(target.released, 0);
    }

    #[test]
    fn test_save_failure_still_releases() {
        let backend = ScriptedBackend::new();
        backend.respond(200, "[]");
        let transport = transport(backend);
        let mut target = RecordingTarget {
            fail_save: true,
            ..Default::default()
        };

        let err = BackupExporter::new(&transport).export(&mut target).unwrap_err();

        assert!(matches!(err, ProxyctlError::Io(_)));
        assert_eq!(target.staged, 1);
        assert_eq!(target.released, 1);
    }

    #[test]
    fn test_each_export_creates_a_snapshot() {
        let transport = Transport::new("http://localhost:5000", FakeControlService::new()).unwrap();
        let exporter = BackupExporter::new(&transport);
        exporter.fetch_snapshot().unwrap();
        exporter.fetch_snapshot().unwrap();

        assert_eq!(transport.backend().requests().len(), 2);
    }

    #[test]
    fn test_export_to_directory() {
        let temp_dir = TempDir::new().unwrap();
        let transport = Transport::new("http://localhost:5000", FakeControlService::new()).unwrap();
        let mut target = crate::backup::DirectorySaveTarget::new(temp_dir.path());

        let summary = BackupExporter::new(&transport).export(&mut target).unwrap();

        assert_eq!(summary.path, temp_dir.path().join("proxies-backup.json"));
        assert_eq!(std::fs::read_to_string(&summary.path).unwrap(), "[]");
    }
}
