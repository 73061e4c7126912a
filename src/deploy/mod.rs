//! Deploy construction and signing.
//!
//! # Data Flow
//! ```text
//! DeployOptions (from_addr, contract identities, args, key files)
//!     → code.rs (exactly-one-of identity check, wasm file read, Code)
//!     → builder.rs (Body → body_hash → Header → deploy_hash → Deploy)
//!     → builder.rs sign_deploy (Approval over deploy_hash)
//!     → verify.rs (hash and approval checks before dispatch)
//! ```
//!
//! # Design Decisions
//! - Every validation failure happens here, before any network call
//! - Hashes are blake2b-256 over the canonical protobuf encoding
//! - A deploy is never mutated after its hashes are computed; callers that
//!   alter a header must rebuild, and `verify_hashes` rejects stale hashes

pub mod builder;
pub mod code;
pub mod verify;

pub use builder::{sign_deploy, DeployBuilder, DeployOptions, DEFAULT_GAS_PRICE};
pub use code::{CodeRole, ContractOptions};
pub use verify::{hash_body, hash_header, verify_approvals, verify_hashes};
