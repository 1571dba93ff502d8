//! JSON-file snapshot store.
//!
//! Persists the session snapshot as a single `session.json` slot under
//! a base directory. One slot, overwritten whole on every committing
//! mutation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use mchat_core::session::SnapshotStore;
use mchat_types::error::SnapshotError;
use mchat_types::snapshot::SessionSnapshot;

const SNAPSHOT_FILE: &str = "session.json";

/// Single-slot snapshot store backed by one JSON file.
///
/// Writes go to a sibling temp file followed by a rename, so `load`
/// never observes a partially written snapshot.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store whose slot lives at `{base_dir}/session.json`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: base_dir.into().join(SNAPSHOT_FILE),
        }
    }

    /// Location of the slot on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(err: std::io::Error) -> SnapshotError {
        SnapshotError::Io(err.to_string())
    }
}

impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> Result<Option<SessionSnapshot>, SnapshotError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Self::io_error(err)),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| SnapshotError::Malformed(err.to_string()))
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SnapshotError> {
        let raw = serde_json::to_string(snapshot)
            .map_err(|err| SnapshotError::Serialize(err.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(Self::io_error)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw).await.map_err(Self::io_error)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(Self::io_error)?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), SnapshotError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Self::io_error(err)),
        }
    }
}
