//! Wire schema for the node's gRPC API.
//!
//! # Data Flow
//! ```text
//! deploy builder / client facade
//!     → consensus.rs (Deploy, Header, Body, Code, Arg)
//!     → casper.rs / control.rs (request envelopes)
//!     → prost encoding (canonical bytes, also the hashing input)
//!     → rpc dispatcher
//!
//! node responses
//!     → info.rs / state.rs (decoded subsets, unknown fields skipped)
//!     → hex_format.rs (base-16 rendering of byte fields for display)
//! ```
//!
//! Messages are declared by hand with `prost` derives. Field numbers follow
//! the node's `.proto` definitions; only the fields the client reads or
//! writes are declared.

pub mod casper;
pub mod consensus;
pub mod control;
pub mod hex_format;
pub mod info;
pub mod state;

pub use consensus::{Approval, Arg, ArgValue, Body, Code, Deploy, Header, Signature};
