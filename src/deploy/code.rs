//! Session and payment code identities.

use std::fs;
use std::path::PathBuf;

use crate::error::{ValidationError, ValidationResult};
use crate::proto::consensus::code::Contract;
use crate::proto::{Arg, Code};

/// Which slot of the deploy body a piece of code fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRole {
    Session,
    Payment,
}

impl CodeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeRole::Session => "session",
            CodeRole::Payment => "payment",
        }
    }
}

/// The four ways of naming executable logic. Exactly one must be non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractOptions {
    /// Path to a wasm module read at build time.
    pub wasm_path: Option<PathBuf>,
    pub hash: Option<Vec<u8>>,
    pub name: Option<String>,
    pub uref: Option<Vec<u8>>,
}

impl ContractOptions {
    pub fn wasm(path: impl Into<PathBuf>) -> Self {
        Self {
            wasm_path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn hash(hash: impl Into<Vec<u8>>) -> Self {
        Self {
            hash: Some(hash.into()),
            ..Self::default()
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn uref(uref: impl Into<Vec<u8>>) -> Self {
        Self {
            uref: Some(uref.into()),
            ..Self::default()
        }
    }

    /// Number of identities that are set and non-empty.
    pub fn provided(&self) -> usize {
        [
            self.wasm_path
                .as_ref()
                .is_some_and(|p| !p.as_os_str().is_empty()),
            self.hash.as_ref().is_some_and(|h| !h.is_empty()),
            self.name.as_ref().is_some_and(|n| !n.is_empty()),
            self.uref.as_ref().is_some_and(|u| !u.is_empty()),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.provided() == 0
    }

    pub fn validate(&self, role: CodeRole) -> ValidationResult<()> {
        if self.provided() != 1 {
            return Err(ValidationError::AmbiguousContract {
                role: role.as_str(),
            });
        }
        Ok(())
    }

    /// Build the `Code` message, reading the wasm file if that is the identity.
    pub fn to_code(&self, role: CodeRole, args: Vec<Arg>) -> ValidationResult<Code> {
        self.validate(role)?;

        let contract = match (&self.wasm_path, &self.hash, &self.name, &self.uref) {
            (Some(path), _, _, _) if !path.as_os_str().is_empty() => {
                let wasm = fs::read(path).map_err(|e| ValidationError::MissingContractFile {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
                Contract::Wasm(wasm)
            }
            (_, Some(hash), _, _) if !hash.is_empty() => Contract::Hash(hash.clone()),
            (_, _, Some(name), _) if !name.is_empty() => Contract::Name(name.clone()),
            (_, _, _, Some(uref)) if !uref.is_empty() => Contract::Uref(uref.clone()),
            _ => {
                return Err(ValidationError::AmbiguousContract {
                    role: role.as_str(),
                })
            }
        };

        Ok(Code {
            contract: Some(contract),
            args,
        })
    }
}
