//! SnapshotStore trait definition.
//!
//! A durable single-slot store for the serialized session snapshot.
//! Implementations live in mchat-infra (`FileSnapshotStore`,
//! `MemorySnapshotStore`). Uses native async fn in traits (RPITIT,
//! Rust 2024 edition).

use mchat_types::error::SnapshotError;
use mchat_types::snapshot::SessionSnapshot;

/// Durable storage for the one persisted session snapshot.
///
/// The slot is single-writer from the core's perspective; concurrent
/// owners of the same slot race with last-write-wins semantics.
pub trait SnapshotStore: Send + Sync {
    /// Read the persisted snapshot.
    ///
    /// Returns `Ok(None)` when no snapshot has been written. A slot that
    /// exists but cannot be decoded is an error; the recovery policy
    /// (start empty) belongs to the core, not the store.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<SessionSnapshot>, SnapshotError>> + Send;

    /// Overwrite the slot with a new snapshot.
    ///
    /// A completed save must be fully visible to a subsequent `load`;
    /// no torn write may be observable.
    fn save(
        &self,
        snapshot: &SessionSnapshot,
    ) -> impl std::future::Future<Output = Result<(), SnapshotError>> + Send;

    /// Erase the slot. Succeeds when the slot is already empty.
    fn clear(&self) -> impl std::future::Future<Output = Result<(), SnapshotError>> + Send;
}
