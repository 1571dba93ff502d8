//! HTTP client for the remote screening service.

pub mod client;
mod types;

pub use client::HttpScreeningService;
