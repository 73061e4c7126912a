//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher attempt
//!     → channel.rs (endpoint for host:port, plaintext or TLS)
//!     → tls.rs (certificate loaded once, identity from common name)
//!     → connection.rs (connection id, release on drop)
//!     → tonic Channel handed to the call
//!
//! Connection States:
//!     Connecting → Open (one call) → Closed
//! ```
//!
//! # Design Decisions
//! - No pooling: a connection is opened per call and released with it
//! - Plaintext is allowed but warned about on every connection
//! - TLS pins both the server name and the request authority to the node id

pub mod channel;
pub mod connection;
pub mod tls;

pub use channel::{ChannelFactory, ChannelSecurity};
pub use connection::{ConnectionGuard, ConnectionId, ConnectionTracker};
pub use tls::{extract_common_name, NodeCertificate};
