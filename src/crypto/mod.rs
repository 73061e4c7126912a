//! Hashing and signing.
//!
//! # Data Flow
//! ```text
//! serialized Body / Header bytes
//!     → hash.rs (blake2b, 32-byte digest)
//!
//! PEM key file (private or public)
//!     → keys.rs (first non-marker line, base64, 32-byte recovery rule)
//!     → signer.rs (ed25519 signing key, detached signature over a digest)
//! ```
//!
//! # Security Constraints
//! - Private key bytes are never logged or serialized
//! - Signing keys are loaded per call and dropped with the signer

pub mod hash;
pub mod keys;
pub mod signer;

pub use hash::{blake2b_hash, HASH_LENGTH};
pub use keys::{read_pem_key, KEY_LENGTH};
pub use signer::{sign, verify, Signer, ED25519_ALGORITHM};
