//! Session synchronization core for the mchat screening client.
//!
//! This crate defines the "ports" (the [`session::service::ScreeningService`]
//! and [`session::snapshot::SnapshotStore`] traits) that the infrastructure
//! layer implements, and the [`session::context::SessionContext`] that owns
//! the in-memory session state. It depends only on `mchat-types` -- never on
//! `mchat-infra` or any network/IO crate.

pub mod session;
