//! Telemetry for the event ETL.
//!
//! Structured logging via `tracing`, plus an in-process metrics registry
//! whose snapshot is logged at the end of each run.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::*;
pub use tracing_setup::*;
