//! Infrastructure implementations for the mchat screening client.
//!
//! Implements the port traits defined in `mchat-core`: the reqwest HTTP
//! client for the remote screening service, the JSON-file and in-memory
//! snapshot stores, and the configuration loader.

pub mod config;
pub mod http;
pub mod snapshot;
