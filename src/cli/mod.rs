//! Command line interface.
//!
//! # Data Flow
//! ```text
//! argv
//!     → Cli (clap derive: global connection options + one command)
//!     → GlobalOptions::resolve_config (config file, then flag overrides)
//!     → commands.rs (arguments → client calls, bundled contracts)
//!     → output.rs (pretty JSON with hex bytes on stdout)
//! ```
//!
//! `-h` selects the host, so help is only available as `--help`.

pub mod commands;
pub mod contracts;
pub mod output;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::config::validation::validate_config;
use crate::config::{load_config, ClientConfig, ConfigError};
use crate::error::{ClientError, ValidationError};

pub use commands::execute;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("cannot write output: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "casperlabs-client")]
#[command(about = "Submit deploys to and query a CasperLabs node", long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalOptions {
    /// Show this help message and exit
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Hostname or IP of node on which gRPC service is running.
    #[arg(short = 'h', long)]
    pub host: Option<String>,

    /// Port used for external gRPC API.
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Port used for internal gRPC API.
    #[arg(long)]
    pub port_internal: Option<u16>,

    /// node_id parameter for TLS connection
    #[arg(long)]
    pub node_id: Option<String>,

    /// Certificate file for TLS connection
    #[arg(long)]
    pub certificate_file: Option<String>,

    /// TOML configuration file; flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// Load the configuration file (if any) and apply flag overrides.
    pub fn resolve_config(&self) -> Result<ClientConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ClientConfig::default(),
        };
        self.apply(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    fn apply(&self, config: &mut ClientConfig) {
        let connection = &mut config.connection;
        if let Some(host) = &self.host {
            connection.host = host.clone();
        }
        if let Some(port) = self.port {
            connection.port = port;
        }
        if let Some(port) = self.port_internal {
            connection.port_internal = port;
        }
        if self.node_id.is_some() {
            connection.node_id = self.node_id.clone();
        }
        if self.certificate_file.is_some() {
            connection.certificate_file = self.certificate_file.clone();
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Deploy a smart contract source file to Casper on an existing running node.
    /// The deploy will be packaged and sent as a block to the network depending
    /// on the configuration of the Casper instance.
    Deploy(DeployArgs),

    /// Issues bonding request
    Bond {
        /// amount of motes to bond
        #[arg(short = 'a', long)]
        amount: i64,
        #[command(flatten)]
        deploy: DeployArgs,
    },

    /// Issues unbonding request
    Unbond {
        /// Amount of motes to unbond. If not provided then a request to unbond
        /// with full staked amount is made.
        #[arg(short = 'a', long)]
        amount: Option<i64>,
        #[command(flatten)]
        deploy: DeployArgs,
    },

    /// Force a node to propose a block based on its accumulated deploys.
    Propose,

    /// View properties of a block known by Casper on an existing running node.
    ShowBlock {
        /// the hash value of the block
        hash: String,
    },

    /// View list of blocks in the current Casper view on an existing running node.
    ShowBlocks {
        /// depth in terms of block height
        #[arg(short = 'd', long)]
        depth: u32,
    },

    /// View properties of a deploy known by Casper on an existing running node.
    ShowDeploy {
        /// Value of the deploy hash, base16 encoded.
        hash: String,
    },

    /// View deploys included in a block.
    ShowDeploys {
        /// Value of the block hash, base16 encoded.
        hash: String,
    },

    /// DAG in DOT format
    Vdag {
        /// depth in terms of block height
        #[arg(short = 'd', long)]
        depth: u32,
        /// output image filename, outputs to stdout if not specified
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
        /// if justification lines should be shown
        #[arg(short = 's', long)]
        show_justification_lines: bool,
        /// subscribe to changes, '--out' has to be specified
        #[arg(long, value_enum)]
        stream: Option<DagStream>,
    },

    /// Query a value in the global state.
    QueryState {
        /// Hash of the block to query the state of
        #[arg(short = 'b', long)]
        block_hash: String,
        /// Base16 encoding of the base key
        #[arg(short = 'k', long)]
        key: String,
        /// Path to the value to query. Must be of the form 'key1/key2/.../keyn'
        #[arg(short = 'p', long)]
        path: String,
        /// Type of base key. For 'local' key type, 'key' value format is
        /// {seed}:{rest}, where both parts are hex encoded.
        #[arg(short = 't', long = "type", value_enum)]
        key_type: KeyType,
    },

    /// Returns the balance of the account at the specified block.
    Balance {
        /// Account's public key in hex.
        #[arg(short = 'a', long)]
        address: String,
        /// Hash of the block to query the state of
        #[arg(short = 'b', long)]
        block_hash: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyType {
    Hash,
    Uref,
    Address,
    Local,
}

impl KeyType {
    pub fn as_str(self) -> &'static str {
        match self {
            KeyType::Hash => "hash",
            KeyType::Uref => "uref",
            KeyType::Address => "address",
            KeyType::Local => "local",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DagStream {
    SingleOutput,
    MultipleOutputs,
}

/// Options shared by `deploy`, `bond` and `unbond`.
#[derive(Debug, Clone, Default, Args)]
pub struct DeployArgs {
    /// The public key of the account which is the context of this deployment,
    /// base16 encoded.
    #[arg(short = 'f', long = "from")]
    pub from: String,

    /// Standard payment amount. Use this with the default payment, or override
    /// with --payment-args if custom payment code is used.
    #[arg(long)]
    pub payment_amount: Option<u64>,

    /// The price of gas for this transaction in units dust/gas. Must be positive integer.
    #[arg(long, default_value_t = crate::deploy::DEFAULT_GAS_PRICE)]
    pub gas_price: i64,

    /// Time (in milliseconds) that the deploy will remain valid for.
    #[arg(long, default_value_t = 0)]
    pub ttl_millis: i64,

    /// Path to the file with payment code, by default fallbacks to the --session code
    #[arg(short = 'p', long)]
    pub payment: Option<PathBuf>,

    /// Hash of the stored contract to be called in the payment; base16 encoded
    #[arg(long)]
    pub payment_hash: Option<String>,

    /// Name of the stored contract (associated with the executing account) to be
    /// called in the payment
    #[arg(long)]
    pub payment_name: Option<String>,

    /// URef of the stored contract to be called in the payment; base16 encoded
    #[arg(long)]
    pub payment_uref: Option<String>,

    /// Path to the file with session code
    #[arg(short = 's', long)]
    pub session: Option<PathBuf>,

    /// Hash of the stored contract to be called in the session; base16 encoded
    #[arg(long)]
    pub session_hash: Option<String>,

    /// Name of the stored contract (associated with the executing account) to be
    /// called in the session
    #[arg(long)]
    pub session_name: Option<String>,

    /// URef of the stored contract to be called in the session; base16 encoded
    #[arg(long)]
    pub session_uref: Option<String>,

    /// JSON encoded list of session args, e.g.:
    /// '[{"name": "amount", "value": {"long_value": 123456}}]'
    #[arg(long)]
    pub session_args: Option<String>,

    /// JSON encoded list of payment args, e.g.:
    /// '[{"name": "amount", "value": {"big_int": {"value": "123456", "bit_width": 512}}}]'
    #[arg(long)]
    pub payment_args: Option<String>,

    /// Path to the file with account private key (Ed25519)
    #[arg(long)]
    pub private_key: Option<PathBuf>,

    /// Path to the file with account public key (Ed25519)
    #[arg(long)]
    pub public_key: Option<PathBuf>,
}

impl DeployArgs {
    pub fn has_session(&self) -> bool {
        self.session.is_some()
            || self.session_hash.is_some()
            || self.session_name.is_some()
            || self.session_uref.is_some()
    }

    pub fn has_payment(&self) -> bool {
        self.payment.is_some()
            || self.payment_hash.is_some()
            || self.payment_name.is_some()
            || self.payment_uref.is_some()
    }
}
