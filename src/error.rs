//! Error types surfaced by the client.
//!
//! `ValidationError` covers caller input rejected before any network call.
//! `ClientError` is the only error the public API returns; transport library
//! errors are converted into it at the dispatcher boundary.

use thiserror::Error;
use tonic::Code;

/// Malformed or ambiguous caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Account identifier is neither 32 raw bytes nor 64 hex characters.
    #[error("account must be 32 bytes or a 64 character hex string, got {0} bytes")]
    InvalidAccount(usize),

    #[error("from_addr must be 32 bytes, got {0}")]
    InvalidFromAddr(usize),

    /// Zero or several of the four contract identities were given.
    #[error("deploy: only one of {role}, {role}_hash, {role}_name, {role}_uref must be provided")]
    AmbiguousContract { role: &'static str },

    #[error("cannot read contract file {path}: {reason}")]
    MissingContractFile { path: String, reason: String },

    #[error("Missing bundled contract {name} ({path})")]
    MissingBundledContract { name: String, path: String },

    #[error("no account public key: supply from_addr, a public key or a private key")]
    MissingAccountKey,

    #[error("invalid key file {path}: {reason}")]
    InvalidKeyFile { path: String, reason: String },

    #[error("invalid certificate {path}: {reason}")]
    InvalidCertificate { path: String, reason: String },

    #[error("invalid node address {address}: {reason}")]
    InvalidEndpoint { address: String, reason: String },

    #[error("invalid hex in {field}: {reason}")]
    InvalidHex { field: String, reason: String },

    #[error("invalid arguments JSON: {0}")]
    InvalidArgsJson(String),

    #[error("{0} is not a known query-state key type")]
    UnknownKeyType(String),

    #[error("deploy body_hash does not match the hash of its body")]
    BodyHashMismatch,

    #[error("deploy_hash does not match the hash of its header")]
    DeployHashMismatch,

    #[error("deploy is missing its {0}")]
    IncompleteDeploy(&'static str),
}

/// Result type for input validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The client-visible error: a status name plus details.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The channel could not carry the call (connect failure, unavailable peer).
    #[error("{code:?}: {details}")]
    Transport { code: Code, details: String },

    /// The node answered with a failure status.
    #[error("{code:?}: {details}")]
    Remote { code: Code, details: String },

    /// The node answered, but not with the shape the operation expects.
    #[error("{operation}: {details}")]
    UnexpectedResponse {
        operation: &'static str,
        details: String,
    },

    #[error("{0}: not implemented yet")]
    Unimplemented(&'static str),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Status name, e.g. `Unavailable` or `InvalidArgument`.
    pub fn status(&self) -> String {
        match self {
            ClientError::Validation(_) => format!("{:?}", Code::InvalidArgument),
            ClientError::Transport { code, .. } | ClientError::Remote { code, .. } => {
                format!("{:?}", code)
            }
            ClientError::UnexpectedResponse { operation, .. } => operation.to_string(),
            ClientError::Unimplemented(_) => format!("{:?}", Code::Unimplemented),
            ClientError::Internal(_) => format!("{:?}", Code::Internal),
        }
    }

    /// Human readable details without the status prefix.
    pub fn details(&self) -> String {
        match self {
            ClientError::Transport { details, .. }
            | ClientError::Remote { details, .. }
            | ClientError::UnexpectedResponse { details, .. } => details.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the failure is the transient-unavailable kind that is worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ClientError::Transport {
                code: Code::Unavailable,
                ..
            }
        )
    }
}

impl From<tonic::Status> for ClientError {
    fn from(status: tonic::Status) -> Self {
        let code = status.code();
        let details = status.message().to_string();
        match code {
            Code::Unavailable => ClientError::Transport { code, details },
            _ => ClientError::Remote { code, details },
        }
    }
}

impl From<tonic::transport::Error> for ClientError {
    fn from(error: tonic::transport::Error) -> Self {
        let mut details = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            details.push_str(": ");
            details.push_str(&cause.to_string());
            source = cause.source();
        }
        ClientError::Transport {
            code: Code::Unavailable,
            details,
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
