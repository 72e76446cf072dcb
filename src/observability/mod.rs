//! Observability
//!
//! Structured logging for the runner. Console reporting lives in `ui`; this
//! module only feeds `tracing`.

pub mod telemetry;
