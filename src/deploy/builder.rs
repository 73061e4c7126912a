//! Deploy assembly: body, header, hashes and approvals.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::abi::AccountInput;
use crate::crypto::{read_pem_key, Signer};
use crate::deploy::code::{CodeRole, ContractOptions};
use crate::deploy::verify::{hash_body, hash_header};
use crate::error::{ValidationError, ValidationResult};
use crate::proto::{Approval, Arg, Body, Deploy, Header};

/// Gas price used when the caller does not choose one.
pub const DEFAULT_GAS_PRICE: i64 = 10;

/// Everything needed to build a deploy.
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Account the deploy runs as; falls back to the public key.
    pub from_addr: Option<AccountInput>,
    pub gas_price: i64,
    /// How long the deploy stays valid, in milliseconds.
    pub ttl_millis: i64,
    pub session: ContractOptions,
    pub payment: ContractOptions,
    pub session_args: Vec<Arg>,
    pub payment_args: Vec<Arg>,
    pub public_key: Option<PathBuf>,
    pub private_key: Option<PathBuf>,
    /// Milliseconds since the epoch; the current time when unset.
    pub timestamp: Option<i64>,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            from_addr: None,
            gas_price: DEFAULT_GAS_PRICE,
            ttl_millis: 0,
            session: ContractOptions::default(),
            payment: ContractOptions::default(),
            session_args: Vec::new(),
            payment_args: Vec::new(),
            public_key: None,
            private_key: None,
            timestamp: None,
        }
    }
}

/// Builds a hashed and optionally signed [`Deploy`] from [`DeployOptions`].
#[derive(Debug, Clone)]
pub struct DeployBuilder {
    options: DeployOptions,
}

impl DeployBuilder {
    pub fn new(options: DeployOptions) -> Self {
        Self { options }
    }

    /// Validate the options and assemble the deploy.
    ///
    /// Fails before touching the network on a malformed `from_addr`, a
    /// missing or ambiguous session/payment identity, or an unreadable
    /// contract or key file.
    pub fn build(&self) -> ValidationResult<Deploy> {
        let options = &self.options;

        let from_addr = options
            .from_addr
            .as_ref()
            .map(|addr| {
                addr.to_bytes().map_err(|e| match e {
                    ValidationError::InvalidAccount(len) => ValidationError::InvalidFromAddr(len),
                    other => other,
                })
            })
            .transpose()?;

        options.session.validate(CodeRole::Session)?;
        if !options.payment.is_empty() {
            options.payment.validate(CodeRole::Payment)?;
        }

        let session = options
            .session
            .to_code(CodeRole::Session, options.session_args.clone())?;

        let payment = if options.payment.is_empty() {
            tracing::info!("No payment contract provided, using session as payment");
            let mut payment = session.clone();
            if !options.payment_args.is_empty() {
                payment.args = options.payment_args.clone();
            }
            payment
        } else {
            options
                .payment
                .to_code(CodeRole::Payment, options.payment_args.clone())?
        };

        let body = Body {
            session: Some(session),
            payment: Some(payment),
        };

        let signer = options
            .private_key
            .as_deref()
            .map(Signer::from_pem_file)
            .transpose()?;
        let approver_public_key = match &options.public_key {
            Some(path) => Some(read_pem_key(path)?),
            None => signer.as_ref().map(Signer::public_key),
        };
        let account_public_key = from_addr
            .or(approver_public_key)
            .ok_or(ValidationError::MissingAccountKey)?;

        let header = Header {
            account_public_key: account_public_key.to_vec(),
            timestamp: options.timestamp.unwrap_or_else(now_millis),
            ttl_millis: options.ttl_millis,
            gas_price: options.gas_price,
            body_hash: hash_body(&body).to_vec(),
        };
        let deploy_hash = hash_header(&header);

        let deploy = Deploy {
            deploy_hash: deploy_hash.to_vec(),
            header: Some(header),
            body: Some(body),
            approvals: Vec::new(),
        };

        tracing::debug!(deploy_hash = %hex::encode(deploy_hash), "Deploy built");

        Ok(match (signer, approver_public_key) {
            (Some(signer), Some(public_key)) => sign_deploy(deploy, public_key.to_vec(), &signer),
            _ => deploy,
        })
    }
}

/// Append an approval signing the deploy hash.
pub fn sign_deploy(mut deploy: Deploy, approver_public_key: Vec<u8>, signer: &Signer) -> Deploy {
    let signature = signer.sign(&deploy.deploy_hash);
    deploy.approvals.push(Approval {
        approver_public_key,
        signature: Some(signature),
    });
    deploy
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
