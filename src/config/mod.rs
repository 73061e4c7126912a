//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CLI global options override individual fields
//!     → ClientConfig (validated, immutable)
//!     → CasperLabsClient (channel factories, retry policy, deadlines)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the client is constructed
//! - All fields have defaults so the file is optional
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ClientConfig, ConnectionConfig, ContractsConfig, ObservabilityConfig, RetryConfig,
    TimeoutConfig,
};
