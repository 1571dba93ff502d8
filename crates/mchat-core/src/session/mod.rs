//! Session lifecycle, message accumulation, and persistence.

pub mod context;
pub mod service;
pub mod snapshot;

pub use context::SessionContext;
pub use service::ScreeningService;
pub use snapshot::SnapshotStore;
