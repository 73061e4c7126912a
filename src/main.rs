//! CasperLabs node client (v1)
//!
//! Builds, signs and submits deploys, and queries a node over gRPC.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────────┐
//!                      │                 CASPERLABS CLIENT                    │
//!                      │                                                      │
//!   argv ──────────────┼─▶ cli ──▶ client ──▶ deploy builder                  │
//!                      │              │        (abi + crypto + proto)         │
//!                      │              ▼                                       │
//!                      │        rpc dispatcher ──▶ resilience                 │
//!                      │              │            (retry, backoff, deadline) │
//!                      │              ▼                                       │
//!                      │        net channel factory ──────────────────────────┼──▶ Node
//!                      │        (plaintext | TLS, one connection per call)    │    (gRPC)
//!                      │                                                      │
//!   stdout ◀───────────┼── cli output (pretty JSON, hex bytes)                │
//!                      │                                                      │
//!                      │  Cross-cutting: config · observability · error       │
//!                      └──────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;

use casperlabs_client::cli::{self, Cli, CliError};
use casperlabs_client::observability::logging::init_logging;
use casperlabs_client::CasperLabsClient;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.global.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.observability.log_level);

    let Some(command) = cli.command else {
        eprintln!("You must provide a command. --help for documentation of commands.");
        return ExitCode::FAILURE;
    };

    tracing::debug!(
        host = %config.connection.host,
        port = config.connection.port,
        port_internal = config.connection.port_internal,
        secure = config.connection.is_secure(),
        "Configuration loaded"
    );

    let result: Result<(), CliError> = async {
        let client = CasperLabsClient::new(config)?;
        let mut stdout = std::io::stdout().lock();
        cli::execute(&client, command, &mut stdout).await
    }
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
