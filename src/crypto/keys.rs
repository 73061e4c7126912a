//! Key material loading from PEM-style files.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{ValidationError, ValidationResult};

/// Length of a raw ed25519 key.
pub const KEY_LENGTH: usize = 32;

/// Lines starting with this are armor, not key data.
const PEM_MARKER: &str = "-----";

/// Read the raw 32-byte key from a PEM-style file.
///
/// The first non-blank line that is not armor is base64-decoded. When the
/// decoded length is a multiple of 32 the first 32 bytes are the key (raw
/// seed or seed+public concatenations); otherwise the last 32 bytes are (DER
/// wrapped keys, whose prefix is 12 or 16 bytes).
pub fn read_pem_key(path: &Path) -> ValidationResult<[u8; KEY_LENGTH]> {
    let invalid = |reason: String| ValidationError::InvalidKeyFile {
        path: path.display().to_string(),
        reason,
    };

    let text = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let line = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with(PEM_MARKER))
        .ok_or_else(|| invalid("no key data found".to_string()))?;
    let decoded = STANDARD.decode(line).map_err(|e| invalid(e.to_string()))?;
    recover_key(&decoded).ok_or_else(|| {
        invalid(format!(
            "decoded key is {} bytes, need at least {}",
            decoded.len(),
            KEY_LENGTH
        ))
    })
}

// Legacy length rule shared with the node tooling: a body whose length is a
// multiple of 32 keeps its first 32 bytes, any other keeps its last 32. A
// 48-byte PKCS#8 private key and a 44-byte SPKI public key both end in the key.
fn recover_key(decoded: &[u8]) -> Option<[u8; KEY_LENGTH]> {
    if decoded.len() < KEY_LENGTH {
        return None;
    }
    let key = if decoded.len() % KEY_LENGTH == 0 {
        &decoded[..KEY_LENGTH]
    } else {
        &decoded[decoded.len() - KEY_LENGTH..]
    };
    <[u8; KEY_LENGTH]>::try_from(key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn pem_file(label: &str, body: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "-----BEGIN {}-----", label).unwrap();
        writeln!(file, "{}", STANDARD.encode(body)).unwrap();
        writeln!(file, "-----END {}-----", label).unwrap();
        file
    }

    #[test]
    fn pkcs8_private_key_takes_last_32_bytes() {
        let mut der = hex::decode("302e020100300506032b657004220420").unwrap();
        der.extend_from_slice(&[7u8; 32]);
        let file = pem_file("PRIVATE KEY", &der);
        assert_eq!(read_pem_key(file.path()).unwrap(), [7u8; 32]);
    }

    #[test]
    fn spki_public_key_takes_last_32_bytes() {
        let mut der = hex::decode("302a300506032b6570032100").unwrap();
        der.extend_from_slice(&[9u8; 32]);
        let file = pem_file("PUBLIC KEY", &der);
        assert_eq!(read_pem_key(file.path()).unwrap(), [9u8; 32]);
    }

    #[test]
    fn multiple_of_32_takes_first_32_bytes() {
        let mut raw = vec![1u8; 32];
        raw.extend_from_slice(&[2u8; 32]);
        let file = pem_file("PRIVATE KEY", &raw);
        assert_eq!(read_pem_key(file.path()).unwrap(), [1u8; 32]);
    }

    #[test]
    fn rejects_short_or_missing_keys() {
        let file = pem_file("PRIVATE KEY", &[1u8; 16]);
        assert!(matches!(
            read_pem_key(file.path()),
            Err(ValidationError::InvalidKeyFile { .. })
        ));
        assert!(read_pem_key(Path::new("/nonexistent/key.pem")).is_err());
    }
}
