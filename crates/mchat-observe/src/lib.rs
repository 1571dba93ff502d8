//! Observability setup for the mchat screening client.

pub mod tracing_setup;
