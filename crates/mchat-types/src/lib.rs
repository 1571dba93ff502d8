//! Shared domain types for the mchat screening client.
//!
//! This crate contains the types used across the mchat workspace:
//! intake data, chat messages, the persisted session snapshot, the
//! remote screening service contract shapes, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod message;
pub mod service;
pub mod session;
pub mod snapshot;
