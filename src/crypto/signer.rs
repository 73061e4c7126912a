//! Detached ed25519 signatures over deploy hashes.

use std::path::Path;

use ed25519_dalek::{Signer as _, SigningKey, Verifier as _, VerifyingKey};

use crate::crypto::keys::{read_pem_key, KEY_LENGTH};
use crate::error::ValidationResult;
use crate::proto::Signature;

/// Algorithm tag recorded in every signature.
pub const ED25519_ALGORITHM: &str = "ed25519";

/// Signing key loaded from a private key file.
pub struct Signer {
    signing_key: SigningKey,
}

impl Signer {
    /// Create a signer from the raw 32-byte ed25519 seed.
    pub fn from_seed(seed: [u8; KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Load a signer from a PEM-style private key file.
    pub fn from_pem_file(path: &Path) -> ValidationResult<Self> {
        let seed = read_pem_key(path)?;
        let signer = Self::from_seed(seed);
        tracing::debug!(
            public_key = %hex::encode(signer.public_key()),
            "Signing key loaded"
        );
        Ok(signer)
    }

    /// The public key matching this signing key.
    pub fn public_key(&self) -> [u8; KEY_LENGTH] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign a digest.
    pub fn sign(&self, digest: &[u8]) -> Signature {
        Signature {
            sig_algorithm: ED25519_ALGORITHM.to_string(),
            sig: self.signing_key.sign(digest).to_bytes().to_vec(),
        }
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("public_key", &hex::encode(self.public_key()))
            .finish()
    }
}

/// Sign `digest` with the key in `private_key`, or return `None` when no key
/// file is given (unsigned deploys).
pub fn sign(private_key: Option<&Path>, digest: &[u8]) -> ValidationResult<Option<Signature>> {
    private_key
        .map(|path| Signer::from_pem_file(path).map(|signer| signer.sign(digest)))
        .transpose()
}

/// Check an ed25519 signature against a public key.
pub fn verify(public_key: &[u8], digest: &[u8], signature: &Signature) -> bool {
    if signature.sig_algorithm != ED25519_ALGORITHM {
        return false;
    }
    let Ok(key_bytes) = <[u8; KEY_LENGTH]>::try_from(public_key) else {
        return false;
    };
    let Ok(key) = VerifyingKey::from_bytes(&key_bytes) else {
        return false;
    };
    let Ok(sig) = ed25519_dalek::Signature::from_slice(&signature.sig) else {
        return false;
    };
    key.verify(digest, &sig).is_ok()
}
