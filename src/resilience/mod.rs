//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Remote call from the dispatcher:
//!     → timeouts.rs (optional deadline around each attempt)
//!     → On failure: retries.rs (transient-unavailable only, bounded attempts)
//!     → backoff.rs (initial delay, doubling per retry)
//! ```
//!
//! # Design Decisions
//! - Only transport-unavailable failures are retried; remote statuses and
//!   validation errors surface immediately
//! - Sleeping goes through the `Sleeper` trait so the schedule can be
//!   observed without waiting
//! - Retry state lives in the call, never in the client

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use retries::{RetryPolicy, Sleeper, TokioSleeper};
