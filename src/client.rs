//! The client facade: deploy construction plus every remote operation.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::crypto::{read_pem_key, Signer};
use crate::deploy::{self, DeployBuilder, DeployOptions};
use crate::error::{ClientError, ClientResult, ValidationError};
use crate::net::ChannelFactory;
use crate::proto::casper::{
    DeployRequest, GetBlockInfoRequest, GetBlockStateRequest, GetDeployInfoRequest, KeyVariant,
    StateQuery, StreamBlockDeploysRequest, StreamBlockInfosRequest,
};
use crate::proto::control::{ProposeRequest, ProposeResponse};
use crate::proto::info::{BlockInfo, DeployInfo, ProcessedDeploy, View};
use crate::proto::state;
use crate::proto::Deploy;
use crate::resilience::{RetryPolicy, Sleeper};
use crate::rpc::{Dispatcher, ResponseStream};

/// Named key under which an account stores the mint contract's uref.
const MINT_KEY_NAME: &str = "mint";

/// Client for one node.
///
/// Holds no connection between calls; each call opens and closes its own,
/// so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct CasperLabsClient {
    config: ClientConfig,
    dispatcher: Dispatcher,
}

impl CasperLabsClient {
    /// Build a client from configuration. A TLS certificate, if any, is read here.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let casper = ChannelFactory::from_config(
            &config.connection,
            &config.timeouts,
            config.connection.port,
        )?;
        let control = casper.for_port(config.connection.port_internal);
        let request_timeout = (config.timeouts.request_secs > 0)
            .then(|| Duration::from_secs(config.timeouts.request_secs));

        let dispatcher = Dispatcher::new(casper, control)
            .with_retry_policy(RetryPolicy::from(&config.retries))
            .with_request_timeout(request_timeout);

        Ok(Self { config, dispatcher })
    }

    /// Client for `host` with the default ports and retry settings.
    pub fn from_connection(
        host: impl Into<String>,
        port: u16,
        port_internal: u16,
        node_id: Option<String>,
        certificate_file: Option<String>,
    ) -> ClientResult<Self> {
        let mut config = ClientConfig::default();
        config.connection.host = host.into();
        config.connection.port = port;
        config.connection.port_internal = port_internal;
        config.connection.node_id = node_id;
        config.connection.certificate_file = certificate_file;
        Self::new(config)
    }

    /// Replace how the client waits between retries.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.dispatcher = self.dispatcher.with_sleeper(sleeper);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Build a hashed, optionally signed deploy. No network access.
    pub fn make_deploy(&self, options: DeployOptions) -> ClientResult<Deploy> {
        Ok(DeployBuilder::new(options).build()?)
    }

    /// Append an approval made with `private_key`.
    ///
    /// The approver key is read from `public_key` when given, otherwise
    /// derived from the private key.
    pub fn sign_deploy(
        &self,
        deploy: Deploy,
        public_key: Option<&Path>,
        private_key: &Path,
    ) -> ClientResult<Deploy> {
        let signer = Signer::from_pem_file(private_key)?;
        let approver = match public_key {
            Some(path) => read_pem_key(path)?,
            None => signer.public_key(),
        };
        Ok(deploy::sign_deploy(deploy, approver.to_vec(), &signer))
    }

    /// Submit a deploy. Its hashes are checked against its content first.
    pub async fn send_deploy(&self, deploy: &Deploy) -> ClientResult<()> {
        deploy::verify_hashes(deploy)?;
        let request = DeployRequest {
            deploy: Some(deploy.clone()),
        };
        self.dispatcher.unary::<_, ()>("Deploy", request).await?;
        tracing::info!(deploy_hash = %hex::encode(&deploy.deploy_hash), "Deploy sent");
        Ok(())
    }

    /// Build and submit a deploy; returns its hash.
    pub async fn deploy(&self, options: DeployOptions) -> ClientResult<Vec<u8>> {
        let deploy = self.make_deploy(options)?;
        self.send_deploy(&deploy).await?;
        Ok(deploy.deploy_hash)
    }

    /// Ask the node to propose a block from its accumulated deploys.
    pub async fn propose(&self) -> ClientResult<ProposeResponse> {
        self.dispatcher.unary("Propose", ProposeRequest {}).await
    }

    pub async fn show_block(&self, block_hash_base16: &str, full_view: bool) -> ClientResult<BlockInfo> {
        let request = GetBlockInfoRequest {
            block_hash_base16: block_hash_base16.to_string(),
            view: View::from_full(full_view) as i32,
        };
        self.dispatcher.unary("GetBlockInfo", request).await
    }

    /// Slices of the DAG, newest rank first. `max_rank` 0 means the current tip.
    pub async fn show_blocks(
        &self,
        depth: u32,
        max_rank: u64,
        full_view: bool,
    ) -> ClientResult<ResponseStream<BlockInfo>> {
        let request = StreamBlockInfosRequest {
            depth,
            view: View::from_full(full_view) as i32,
            max_rank,
        };
        self.dispatcher
            .server_streaming("StreamBlockInfos_stream", request)
            .await
    }

    pub async fn show_deploy(&self, deploy_hash_base16: &str, full_view: bool) -> ClientResult<DeployInfo> {
        let request = GetDeployInfoRequest {
            deploy_hash_base16: deploy_hash_base16.to_string(),
            view: View::from_full(full_view) as i32,
        };
        self.dispatcher.unary("GetDeployInfo", request).await
    }

    /// Deploys included in a block.
    pub async fn show_deploys(
        &self,
        block_hash_base16: &str,
        full_view: bool,
    ) -> ClientResult<ResponseStream<ProcessedDeploy>> {
        let request = StreamBlockDeploysRequest {
            block_hash_base16: block_hash_base16.to_string(),
            view: View::from_full(full_view) as i32,
        };
        self.dispatcher
            .server_streaming("StreamBlockDeploys_stream", request)
            .await
    }

    /// Query a value in global state.
    ///
    /// `key_type` is one of `hash`, `uref`, `address` or `local` (any case).
    /// A `local` key is written `{seed_hex}:{rest_hex}`. `path` is split on
    /// `/`, dropping empty segments.
    pub async fn query_state(
        &self,
        block_hash_base16: &str,
        key_base16: &str,
        path: &str,
        key_type: &str,
    ) -> ClientResult<state::Value> {
        let query = state_query(key_base16, path, key_type)?;
        let request = GetBlockStateRequest {
            block_hash_base16: block_hash_base16.to_string(),
            query: Some(query),
        };
        self.dispatcher.unary("GetBlockState", request).await
    }

    /// Balance of an account's main purse at a block, as a decimal string.
    pub async fn balance(&self, address: &str, block_hash_base16: &str) -> ClientResult<String> {
        let value = self
            .query_state(block_hash_base16, address, "", "address")
            .await?;
        let account = value.account().ok_or_else(|| unexpected(format!(
            "Expected Account type value under {}.",
            address
        )))?;

        let mint_uref = account
            .named_keys
            .iter()
            .find(|named| named.name == MINT_KEY_NAME)
            .and_then(|named| named.key.as_ref())
            .and_then(state::Key::uref)
            .ok_or_else(|| {
                unexpected("Account's named_keys map did not contain Mint contract address.".into())
            })?;
        let purse = account
            .purse_id
            .as_ref()
            .ok_or_else(|| unexpected("Account has no main purse.".into()))?;

        let local_key = purse_balance_key(mint_uref, &purse.uref);
        let balance_uref = self
            .query_state(block_hash_base16, &local_key, "", "local")
            .await?;
        let balance_uref = balance_uref
            .uref()
            .ok_or_else(|| unexpected("Expected a URef under the purse balance key.".into()))?;

        let balance = self
            .query_state(block_hash_base16, &hex::encode(balance_uref), "", "uref")
            .await?;
        let amount = balance
            .big_int()
            .ok_or_else(|| unexpected("Expected a BigInt balance value.".into()))?;
        if amount.value.is_empty() || !amount.value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unexpected(format!("Malformed balance value {:?}.", amount.value)));
        }
        Ok(amount.value.clone())
    }

    /// DAG rendering in DOT format. Not available in this client.
    pub async fn visualize_dag(&self, _depth: u32) -> ClientResult<String> {
        Err(ClientError::Unimplemented("visualize_dag"))
    }
}

fn unexpected(details: String) -> ClientError {
    ClientError::UnexpectedResponse {
        operation: "balance",
        details,
    }
}

/// Map a caller-facing key type name onto the wire enum.
pub fn key_variant(key_type: &str) -> Result<KeyVariant, ValidationError> {
    match key_type.to_ascii_lowercase().as_str() {
        "hash" => Ok(KeyVariant::Hash),
        "uref" => Ok(KeyVariant::Uref),
        "address" => Ok(KeyVariant::Address),
        "local" => Ok(KeyVariant::Local),
        _ => Err(ValidationError::UnknownKeyType(key_type.to_string())),
    }
}

/// Build the state query for `key_base16` and a `/`-separated path.
pub fn state_query(key_base16: &str, path: &str, key_type: &str) -> Result<StateQuery, ValidationError> {
    Ok(StateQuery {
        key_variant: key_variant(key_type)? as i32,
        key_base16: key_base16.to_string(),
        path_segments: path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

/// Local key under which the mint stores a purse's balance uref:
/// the mint uref, then the purse uref as a length-prefixed byte array.
pub fn purse_balance_key(mint_uref: &[u8], purse_uref: &[u8]) -> String {
    let mut rest = (purse_uref.len() as u32).to_le_bytes().to_vec();
    rest.extend_from_slice(purse_uref);
    format!("{}:{}", hex::encode(mint_uref), hex::encode(rest))
}
