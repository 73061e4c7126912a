//! CasperLabs node client library

pub mod abi;
pub mod cli;
pub mod client;
pub mod config;
pub mod crypto;
pub mod deploy;
pub mod error;
pub mod net;
pub mod observability;
pub mod proto;
pub mod resilience;
pub mod rpc;

pub use client::CasperLabsClient;
pub use config::schema::ClientConfig;
pub use deploy::{DeployBuilder, DeployOptions};
pub use error::{ClientError, ClientResult, ValidationError};
