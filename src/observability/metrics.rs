//! RPC metrics.
//!
//! # Metrics
//! - `casperlabs_client_rpc_attempts_total` (counter): attempts by method
//! - `casperlabs_client_rpc_retries_total` (counter): retries scheduled by method
//! - `casperlabs_client_rpc_failures_total` (counter): calls that gave up, by method
//!
//! # Design Decisions
//! - Low-overhead metric updates through the `metrics` facade
//! - No exporter is bundled; the embedding application picks one

pub fn record_attempt(method: &str) {
    metrics::counter!("casperlabs_client_rpc_attempts_total", "method" => method.to_string())
        .increment(1);
}

pub fn record_retry(method: &str) {
    metrics::counter!("casperlabs_client_rpc_retries_total", "method" => method.to_string())
        .increment(1);
}

pub fn record_failure(method: &str) {
    metrics::counter!("casperlabs_client_rpc_failures_total", "method" => method.to_string())
        .increment(1);
}
