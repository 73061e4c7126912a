//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Client operations produce:
//!     → logging.rs (structured log events on stderr)
//!     → metrics.rs (per-method attempt, retry and failure counters)
//!
//! Consumers:
//!     → Terminal / log aggregation (stderr keeps stdout for command output)
//!     → Any `metrics` recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (method, attempt, connection_id) on every RPC event
//! - `RUST_LOG` overrides the configured level
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
