//! Bundled system contracts.

use std::path::{Path, PathBuf};

use crate::error::{ValidationError, ValidationResult};

pub const BONDING_CONTRACT: &str = "bonding.wasm";
pub const UNBONDING_CONTRACT: &str = "unbonding.wasm";
pub const STANDARD_PAYMENT_CONTRACT: &str = "standard_payment.wasm";

/// Path of a bundled contract inside `directory`, which must exist.
pub fn bundled_contract(directory: &Path, file_name: &str) -> ValidationResult<PathBuf> {
    let path = directory.join(file_name);
    if !path.is_file() {
        return Err(ValidationError::MissingBundledContract {
            name: file_name.to_string(),
            path: path.display().to_string(),
        });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_existing_contract() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(BONDING_CONTRACT), b"\0asm").unwrap();
        assert_eq!(
            bundled_contract(dir.path(), BONDING_CONTRACT).unwrap(),
            dir.path().join(BONDING_CONTRACT)
        );
    }

    #[test]
    fn missing_contract_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = bundled_contract(dir.path(), STANDARD_PAYMENT_CONTRACT).unwrap_err();
        assert!(err.to_string().starts_with("Missing bundled contract standard_payment.wasm"));
    }
}
