//! Global state values (`io.casperlabs.casper.consensus.state`).

use serde::Serialize;

use crate::proto::hex_format;

/// Arbitrary-precision integer carried as a decimal string.
#[derive(Clone, PartialEq, Eq, ::prost::Message, Serialize)]
pub struct BigInt {
    #[prost(string, tag = "1")]
    pub value: String,
    #[prost(uint32, tag = "2")]
    pub bit_width: u32,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Key {
    #[prost(oneof = "key::Value", tags = "1, 2, 3, 4")]
    pub value: Option<key::Value>,
}

pub mod key {
    use serde::Serialize;

    use crate::proto::hex_format;

    #[derive(Clone, PartialEq, ::prost::Oneof, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Value {
        #[prost(message, tag = "1")]
        Address(Address),
        #[prost(message, tag = "2")]
        Hash(Hash),
        #[prost(message, tag = "3")]
        Uref(URef),
        #[prost(message, tag = "4")]
        Local(Local),
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct Address {
        #[prost(bytes = "vec", tag = "1")]
        #[serde(serialize_with = "hex_format::bytes")]
        pub account: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct Hash {
        #[prost(bytes = "vec", tag = "1")]
        #[serde(serialize_with = "hex_format::bytes")]
        pub hash: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct URef {
        #[prost(bytes = "vec", tag = "1")]
        #[serde(serialize_with = "hex_format::bytes")]
        pub uref: Vec<u8>,
        #[prost(int32, tag = "2")]
        pub access_rights: i32,
    }

    #[derive(Clone, PartialEq, ::prost::Message, Serialize)]
    pub struct Local {
        #[prost(bytes = "vec", tag = "1")]
        #[serde(serialize_with = "hex_format::bytes")]
        pub hash: Vec<u8>,
    }
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct NamedKey {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub key: Option<Key>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Account {
    #[prost(bytes = "vec", tag = "1")]
    #[serde(serialize_with = "hex_format::bytes")]
    pub public_key: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub purse_id: Option<key::URef>,
    #[prost(message, repeated, tag = "3")]
    pub named_keys: Vec<NamedKey>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Unit {}

/// A value stored in global state, as returned by `GetBlockState`.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Value {
    #[prost(oneof = "value::Value", tags = "1, 2, 4, 5, 9, 10, 11, 12")]
    pub value: Option<value::Value>,
}

pub mod value {
    use serde::Serialize;

    use super::{Account, BigInt, Key, Unit};
    use crate::proto::hex_format;

    #[derive(Clone, PartialEq, ::prost::Oneof, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Value {
        #[prost(int32, tag = "1")]
        IntValue(i32),
        #[prost(bytes, tag = "2")]
        #[serde(serialize_with = "hex_format::bytes")]
        BytesValue(Vec<u8>),
        #[prost(string, tag = "4")]
        StringValue(String),
        #[prost(message, tag = "5")]
        Account(Account),
        #[prost(message, tag = "9")]
        BigInt(BigInt),
        #[prost(message, tag = "10")]
        Key(Key),
        #[prost(message, tag = "11")]
        Unit(Unit),
        #[prost(uint64, tag = "12")]
        LongValue(u64),
    }
}

impl Value {
    /// The account stored under this value, if it is one.
    pub fn account(&self) -> Option<&Account> {
        match &self.value {
            Some(value::Value::Account(account)) => Some(account),
            _ => None,
        }
    }

    /// The uref address stored under this value, if it is a uref key.
    pub fn uref(&self) -> Option<&[u8]> {
        match &self.value {
            Some(value::Value::Key(Key {
                value: Some(key::Value::Uref(uref)),
            })) => Some(&uref.uref),
            _ => None,
        }
    }

    pub fn big_int(&self) -> Option<&BigInt> {
        match &self.value {
            Some(value::Value::BigInt(big_int)) => Some(big_int),
            _ => None,
        }
    }
}

impl Key {
    pub fn uref(&self) -> Option<&[u8]> {
        match &self.value {
            Some(key::Value::Uref(uref)) => Some(&uref.uref),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn value_accessors_match_variant() {
        let value = Value {
            value: Some(value::Value::Key(Key {
                value: Some(key::Value::Uref(key::URef {
                    uref: vec![9; 32],
                    access_rights: 0,
                })),
            })),
        };
        assert_eq!(value.uref(), Some(&[9u8; 32][..]));
        assert!(value.account().is_none());
        assert!(value.big_int().is_none());
    }

    #[test]
    fn decode_skips_unknown_fields() {
        // Field 3 (int_list) is not declared; the decoder must skip it.
        let mut buf = vec![0x1a, 0x02, 0x08, 0x01];
        buf.extend_from_slice(&[0x4a, 0x06, 0x0a, 0x01, b'7', 0x10, 0x80, 0x04]);
        let value = Value::decode(buf.as_slice()).unwrap();
        assert_eq!(value.big_int().map(|b| b.value.as_str()), Some("7"));
        assert_eq!(value.big_int().map(|b| b.bit_width), Some(512));
    }
}
