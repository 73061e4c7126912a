//! Remote procedure call subsystem.
//!
//! # Data Flow
//! ```text
//! CasperLabsClient operation
//!     → methods.rs (name → descriptor, `_stream` suffix → streaming path)
//!     → dispatcher.rs (retry policy around connect + call)
//!     → net::ChannelFactory (fresh connection per attempt)
//!     → node: unary response, or ResponseStream for streaming methods
//! ```

pub mod dispatcher;
pub mod methods;

pub use dispatcher::{Dispatcher, ResponseStream};
pub use methods::{MethodKind, MethodTable, RemoteMethod, Service};
