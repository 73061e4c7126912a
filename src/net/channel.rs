//! Channel factory: one connection per call, plaintext or TLS.

use std::path::Path;
use std::time::Duration;

use tonic::transport::{Channel, ClientTlsConfig, Endpoint, Uri};

use crate::config::{ConnectionConfig, TimeoutConfig};
use crate::error::{ClientError, ClientResult, ValidationError, ValidationResult};
use crate::net::connection::{ConnectionGuard, ConnectionTracker};
use crate::net::tls::NodeCertificate;

/// How connections to the node are secured.
#[derive(Debug, Clone)]
pub enum ChannelSecurity {
    /// No transport encryption. Trusted local and test deployments only.
    Plaintext,
    /// TLS with the node certificate as trust anchor and a pinned identity.
    Tls {
        certificate: NodeCertificate,
        node_id: String,
    },
}

/// Opens a fresh connection to one node port for every call.
#[derive(Debug, Clone)]
pub struct ChannelFactory {
    host: String,
    port: u16,
    security: ChannelSecurity,
    connect_timeout: Option<Duration>,
    tracker: ConnectionTracker,
}

impl ChannelFactory {
    pub fn plaintext(host: impl Into<String>, port: u16) -> Self {
        Self::new(host.into(), port, ChannelSecurity::Plaintext)
    }

    /// TLS channel pinned to `node_id`, or to the certificate's common name.
    pub fn tls(
        host: impl Into<String>,
        port: u16,
        certificate: NodeCertificate,
        node_id: Option<String>,
    ) -> Self {
        let node_id = node_id.unwrap_or_else(|| certificate.common_name().to_string());
        Self::new(
            host.into(),
            port,
            ChannelSecurity::Tls {
                certificate,
                node_id,
            },
        )
    }

    fn new(host: String, port: u16, security: ChannelSecurity) -> Self {
        Self {
            host,
            port,
            security,
            connect_timeout: None,
            tracker: ConnectionTracker::new(),
        }
    }

    /// Build the factory for one port of the configured node.
    pub fn from_config(
        connection: &ConnectionConfig,
        timeouts: &TimeoutConfig,
        port: u16,
    ) -> ValidationResult<Self> {
        let factory = if connection.is_secure() {
            let path = connection.certificate_file.as_deref().ok_or_else(|| {
                ValidationError::InvalidCertificate {
                    path: String::new(),
                    reason: "a certificate file is required for a TLS connection".into(),
                }
            })?;
            let certificate = NodeCertificate::load(Path::new(path))?;
            Self::tls(
                connection.host.clone(),
                port,
                certificate,
                connection.node_id.clone(),
            )
        } else {
            Self::plaintext(connection.host.clone(), port)
        };
        Ok(factory.with_connect_timeout(
            (timeouts.connect_secs > 0).then(|| Duration::from_secs(timeouts.connect_secs)),
        ))
    }

    /// Same node and security settings on another port.
    pub fn for_port(&self, port: u16) -> Self {
        Self {
            host: self.host.clone(),
            port,
            security: self.security.clone(),
            connect_timeout: self.connect_timeout,
            tracker: ConnectionTracker::new(),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// `host:port` of the node.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_secure(&self) -> bool {
        matches!(self.security, ChannelSecurity::Tls { .. })
    }

    /// Peer identity pinned for TLS connections.
    pub fn node_id(&self) -> Option<&str> {
        match &self.security {
            ChannelSecurity::Plaintext => None,
            ChannelSecurity::Tls { node_id, .. } => Some(node_id),
        }
    }

    /// Connections currently open through this factory.
    pub fn open_connections(&self) -> u64 {
        self.tracker.active_count()
    }

    /// Endpoint configuration for one connection.
    pub fn endpoint(&self) -> ValidationResult<Endpoint> {
        let scheme = if self.is_secure() { "https" } else { "http" };
        let address = format!("{}://{}", scheme, self.address());
        let invalid = |reason: String| ValidationError::InvalidEndpoint {
            address: address.clone(),
            reason,
        };

        let mut endpoint = Endpoint::from_shared(address.clone()).map_err(|e| invalid(e.to_string()))?;
        if let Some(timeout) = self.connect_timeout {
            endpoint = endpoint.connect_timeout(timeout);
        }

        if let ChannelSecurity::Tls {
            certificate,
            node_id,
        } = &self.security
        {
            let tls = ClientTlsConfig::new()
                .ca_certificate(certificate.to_tonic())
                .domain_name(node_id.clone());
            let origin: Uri = format!("https://{}:{}", node_id, self.port)
                .parse()
                .map_err(|e: tonic::codegen::http::uri::InvalidUri| invalid(e.to_string()))?;
            endpoint = endpoint
                .tls_config(tls)
                .map_err(|e| invalid(e.to_string()))?
                .origin(origin);
        }
        Ok(endpoint)
    }

    /// Open a connection for a single call.
    ///
    /// The returned guard must live as long as the call; dropping it marks
    /// the connection released.
    pub async fn connect(&self) -> ClientResult<(Channel, ConnectionGuard)> {
        let endpoint = self.endpoint()?;
        let address = self.address();
        match &self.security {
            ChannelSecurity::Plaintext => {
                tracing::warn!(address = %address, "Creating insecure connection");
            }
            ChannelSecurity::Tls { node_id, .. } => {
                tracing::debug!(address = %address, node_id = %node_id, "Creating secure connection");
            }
        }

        let channel = endpoint.connect().await.map_err(ClientError::from)?;
        Ok((channel, self.tracker.track(&address)))
    }
}
