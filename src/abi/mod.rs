//! Deploy argument encoding.
//!
//! # Data Flow
//! ```text
//! typed values (i32, i64, big integers, bytes, strings, accounts)
//!     → mod.rs encoders (one `Arg` per value, exactly one tag set)
//!     → json.rs (editable text form, byte payloads in base-16)
//!     → Code.args of session / payment
//! ```

pub mod json;

use crate::error::{ValidationError, ValidationResult};
use crate::proto::consensus::arg_value::Value;
use crate::proto::state::BigInt;
use crate::proto::{Arg, ArgValue};

pub use json::{args_from_json, args_to_json};

/// Bit width recorded for big integers unless one is given explicitly.
pub const DEFAULT_BIG_INT_WIDTH: u32 = 512;

/// Length of an account identifier in bytes.
pub const ACCOUNT_LENGTH: usize = 32;

fn arg(name: impl Into<String>, value: Value) -> Arg {
    Arg {
        name: name.into(),
        value: Some(ArgValue { value: Some(value) }),
    }
}

pub fn int_value(name: impl Into<String>, value: i32) -> Arg {
    arg(name, Value::IntValue(value))
}

pub fn long_value(name: impl Into<String>, value: i64) -> Arg {
    arg(name, Value::LongValue(value))
}

/// Big integer with the default 512-bit width. `value` must render as a
/// decimal integer, optionally negative.
pub fn big_int(name: impl Into<String>, value: impl ToString) -> Arg {
    big_int_with_width(name, value, DEFAULT_BIG_INT_WIDTH)
}

pub fn big_int_with_width(name: impl Into<String>, value: impl ToString, bit_width: u32) -> Arg {
    arg(
        name,
        Value::BigInt(BigInt {
            value: value.to_string(),
            bit_width,
        }),
    )
}

pub fn bytes_value(name: impl Into<String>, value: impl Into<Vec<u8>>) -> Arg {
    arg(name, Value::BytesValue(value.into()))
}

pub fn string_value(name: impl Into<String>, value: impl Into<String>) -> Arg {
    arg(name, Value::StringValue(value.into()))
}

/// Wrap the value of `inner` (or nothing) as an optional.
pub fn optional_value(name: impl Into<String>, inner: Option<Arg>) -> Arg {
    let wrapped = inner.and_then(|a| a.value).unwrap_or_default();
    arg(name, Value::OptionalValue(Box::new(wrapped)))
}

/// 32-byte account identifier given as raw bytes or 64 hex characters.
pub fn account(name: impl Into<String>, account: impl Into<AccountInput>) -> ValidationResult<Arg> {
    let bytes = account.into().to_bytes()?;
    Ok(bytes_value(name, bytes.to_vec()))
}

// Aliases kept for callers that think in terms of the contract-side types.

pub fn u32(name: impl Into<String>, value: i32) -> Arg {
    int_value(name, value)
}

pub fn u64(name: impl Into<String>, value: i64) -> Arg {
    long_value(name, value)
}

pub fn u512(name: impl Into<String>, value: impl ToString) -> Arg {
    big_int(name, value)
}

pub fn byte_array(name: impl Into<String>, value: impl Into<Vec<u8>>) -> Arg {
    bytes_value(name, value)
}

/// An account identifier as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountInput {
    Raw(Vec<u8>),
    Hex(String),
}

impl AccountInput {
    /// Resolve to the 32 raw bytes of the account.
    pub fn to_bytes(&self) -> ValidationResult<[u8; ACCOUNT_LENGTH]> {
        let bytes = match self {
            AccountInput::Raw(bytes) => bytes.clone(),
            AccountInput::Hex(text) if text.len() == 2 * ACCOUNT_LENGTH => {
                hex::decode(text).map_err(|e| ValidationError::InvalidHex {
                    field: "account".to_string(),
                    reason: e.to_string(),
                })?
            }
            AccountInput::Hex(text) => return Err(ValidationError::InvalidAccount(text.len())),
        };
        <[u8; ACCOUNT_LENGTH]>::try_from(bytes.as_slice())
            .map_err(|_| ValidationError::InvalidAccount(bytes.len()))
    }
}

impl From<Vec<u8>> for AccountInput {
    fn from(bytes: Vec<u8>) -> Self {
        AccountInput::Raw(bytes)
    }
}

impl From<&[u8]> for AccountInput {
    fn from(bytes: &[u8]) -> Self {
        AccountInput::Raw(bytes.to_vec())
    }
}

impl From<[u8; ACCOUNT_LENGTH]> for AccountInput {
    fn from(bytes: [u8; ACCOUNT_LENGTH]) -> Self {
        AccountInput::Raw(bytes.to_vec())
    }
}

impl From<&str> for AccountInput {
    fn from(text: &str) -> Self {
        AccountInput::Hex(text.to_string())
    }
}

impl From<String> for AccountInput {
    fn from(text: String) -> Self {
        AccountInput::Hex(text)
    }
}
