//! Bookkeeping for the one-off connections opened per node call.
//!
//! Every call dials its own channel. A [`ConnectionGuard`] lives as long as
//! that channel is in use: for a unary call until the response arrives, for
//! a stream until the stream is exhausted or dropped.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide sequence number of a node connection, shown as `conn-N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Number of node connections currently held by one channel factory.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    open: Arc<AtomicU64>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly dialled connection to `address`.
    pub fn track(&self, address: &str) -> ConnectionGuard {
        self.open.fetch_add(1, Ordering::SeqCst);
        let guard = ConnectionGuard {
            id: ConnectionId::next(),
            address: address.to_string(),
            opened_at: Instant::now(),
            open: Arc::clone(&self.open),
        };
        tracing::debug!(connection_id = %guard.id, node = %guard.address, "Connected to node");
        guard
    }

    pub fn active_count(&self) -> u64 {
        self.open.load(Ordering::SeqCst)
    }
}

/// Releases its connection slot when dropped.
#[derive(Debug)]
pub struct ConnectionGuard {
    id: ConnectionId,
    address: String,
    opened_at: Instant,
    open: Arc<AtomicU64>,
}

impl ConnectionGuard {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
        tracing::debug!(
            connection_id = %self.id,
            node = %self.address,
            held_ms = self.opened_at.elapsed().as_millis() as u64,
            "Released node connection"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_and_prefixed() {
        let tracker = ConnectionTracker::new();
        let first = tracker.track("127.0.0.1:40401");
        let second = tracker.track("127.0.0.1:40401");
        assert!(second.id().as_u64() > first.id().as_u64());
        assert!(first.id().to_string().starts_with("conn-"));
        assert_eq!(first.address(), "127.0.0.1:40401");
    }

    #[test]
    fn dropping_a_guard_releases_its_slot() {
        let tracker = ConnectionTracker::new();
        let unary = tracker.track("127.0.0.1:40401");
        let stream = tracker.track("127.0.0.1:40402");
        assert_eq!(tracker.active_count(), 2);

        drop(unary);
        assert_eq!(tracker.active_count(), 1);

        // Clones share the same counter.
        let clone = tracker.clone();
        drop(stream);
        assert_eq!(clone.active_count(), 0);
    }
}
