//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default node host.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default port of the external (casper) gRPC API.
pub const DEFAULT_PORT: u16 = 40401;
/// Default port of the internal (control) gRPC API.
pub const DEFAULT_INTERNAL_PORT: u16 = 40402;

/// Root configuration for the client.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Node address and channel security.
    pub connection: ConnectionConfig,

    /// Retry configuration.
    pub retries: RetryConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Where bundled contracts live.
    pub contracts: ContractsConfig,
}

/// Node address and TLS settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Hostname or IP of the node.
    pub host: String,

    /// Port of the external gRPC API.
    pub port: u16,

    /// Port of the internal gRPC API.
    pub port_internal: u16,

    /// Expected peer identity for TLS. Taken from the certificate's
    /// common name when only a certificate is given.
    pub node_id: Option<String>,

    /// Path to the node's certificate (PEM). Enables TLS.
    pub certificate_file: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            port_internal: DEFAULT_INTERNAL_PORT,
            node_id: None,
            certificate_file: None,
        }
    }
}

impl ConnectionConfig {
    /// Whether calls go over an authenticated TLS channel.
    pub fn is_secure(&self) -> bool {
        self.node_id.is_some() || self.certificate_file.is_some()
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per call, including the first.
    pub max_attempts: u32,

    /// Delay before the first retry in milliseconds; doubles per retry.
    pub initial_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay_ms: 300,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Per-attempt request timeout in seconds (0 = no limit).
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            request_secs: 0,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Bundled contract lookup.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ContractsConfig {
    /// Directory holding `bonding.wasm`, `unbonding.wasm` and `standard_payment.wasm`.
    pub directory: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            directory: "contracts".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.connection.host, "127.0.0.1");
        assert_eq!(config.connection.port, 40401);
        assert_eq!(config.connection.port_internal, 40402);
        assert!(!config.connection.is_secure());
        assert_eq!(config.retries.max_attempts, 5);
        assert_eq!(config.retries.initial_delay_ms, 300);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [connection]
            host = "node-0"
            node_id = "abc123"
            certificate_file = "node.certificate.pem"

            [retries]
            max_attempts = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.connection.host, "node-0");
        assert_eq!(config.connection.port, 40401);
        assert!(config.connection.is_secure());
        assert_eq!(config.retries.max_attempts, 2);
        assert_eq!(config.retries.initial_delay_ms, 300);
        assert_eq!(config.contracts.directory, "contracts");
    }
}
