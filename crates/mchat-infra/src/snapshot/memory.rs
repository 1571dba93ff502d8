//! In-memory snapshot store.

use std::sync::{Arc, Mutex};

use mchat_core::session::SnapshotStore;
use mchat_types::error::SnapshotError;
use mchat_types::snapshot::SessionSnapshot;

/// Snapshot store backed by a shared in-memory slot.
///
/// Clones share the slot, so a view layer and a test harness can
/// observe the same storage. The slot holds the serialized form, the
/// same bytes the file store would write.
#[derive(Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the slot currently holds a snapshot.
    pub fn is_empty(&self) -> bool {
        self.slot.lock().expect("snapshot slot lock poisoned").is_none()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> Result<Option<SessionSnapshot>, SnapshotError> {
        let slot = self.slot.lock().expect("snapshot slot lock poisoned");
        match slot.as_deref() {
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|err| SnapshotError::Malformed(err.to_string())),
            None => Ok(None),
        }
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SnapshotError> {
        let raw = serde_json::to_string(snapshot)
            .map_err(|err| SnapshotError::Serialize(err.to_string()))?;
        *self.slot.lock().expect("snapshot slot lock poisoned") = Some(raw);
        Ok(())
    }

    async fn clear(&self) -> Result<(), SnapshotError> {
        *self.slot.lock().expect("snapshot slot lock poisoned") = None;
        Ok(())
    }
}
