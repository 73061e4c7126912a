//! Deploy envelope messages (`io.casperlabs.casper.consensus`).

use serde::Serialize;

use crate::proto::hex_format;
use crate::proto::state::BigInt;

/// Detached signature with its algorithm tag.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Signature {
    #[prost(string, tag = "1")]
    pub sig_algorithm: String,
    #[prost(bytes = "vec", tag = "2")]
    #[serde(serialize_with = "hex_format::bytes")]
    pub sig: Vec<u8>,
}

/// A signature over a deploy hash, associating the deploy with an account.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Approval {
    #[prost(bytes = "vec", tag = "1")]
    #[serde(serialize_with = "hex_format::bytes")]
    pub approver_public_key: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub signature: Option<Signature>,
}

/// A signed unit of work submitted to the node.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Deploy {
    /// Hash of the serialized [`Header`].
    #[prost(bytes = "vec", tag = "1")]
    #[serde(serialize_with = "hex_format::bytes")]
    pub deploy_hash: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub header: Option<Header>,
    #[prost(message, optional, tag = "3")]
    pub body: Option<Body>,
    #[prost(message, repeated, tag = "4")]
    pub approvals: Vec<Approval>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Header {
    #[prost(bytes = "vec", tag = "1")]
    #[serde(serialize_with = "hex_format::bytes")]
    pub account_public_key: Vec<u8>,
    /// Milliseconds since the Unix epoch.
    #[prost(int64, tag = "2")]
    pub timestamp: i64,
    #[prost(int64, tag = "3")]
    pub gas_price: i64,
    /// Hash of the serialized [`Body`].
    #[prost(bytes = "vec", tag = "4")]
    #[serde(serialize_with = "hex_format::bytes")]
    pub body_hash: Vec<u8>,
    #[prost(int64, tag = "5")]
    pub ttl_millis: i64,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Body {
    #[prost(message, optional, tag = "1")]
    pub session: Option<Code>,
    #[prost(message, optional, tag = "2")]
    pub payment: Option<Code>,
}

/// Executable logic plus its arguments.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Code {
    #[prost(oneof = "code::Contract", tags = "1, 3, 4, 5")]
    pub contract: Option<code::Contract>,
    #[prost(message, repeated, tag = "6")]
    pub args: Vec<Arg>,
}

pub mod code {
    use serde::Serialize;

    use crate::proto::hex_format;

    /// How the executable logic is identified.
    #[derive(Clone, PartialEq, ::prost::Oneof, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Contract {
        /// Inline module bytes.
        #[prost(bytes, tag = "1")]
        #[serde(serialize_with = "hex_format::bytes")]
        Wasm(Vec<u8>),
        /// Hash of a stored contract.
        #[prost(bytes, tag = "3")]
        #[serde(serialize_with = "hex_format::bytes")]
        Hash(Vec<u8>),
        /// Name bound in the invoking account's named keys.
        #[prost(string, tag = "4")]
        Name(String),
        #[prost(bytes, tag = "5")]
        #[serde(serialize_with = "hex_format::bytes")]
        Uref(Vec<u8>),
    }
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct Arg {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, optional, tag = "2")]
    pub value: Option<ArgValue>,
}

/// Tagged argument value. An empty value (`value: None`) is how an absent
/// optional is represented inside `OptionalValue`.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct ArgValue {
    #[prost(oneof = "arg_value::Value", tags = "1, 2, 3, 5, 7, 8")]
    pub value: Option<arg_value::Value>,
}

pub mod arg_value {
    use serde::Serialize;

    use super::{ArgValue, BigInt};
    use crate::proto::hex_format;

    #[derive(Clone, PartialEq, ::prost::Oneof, Serialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Value {
        #[prost(message, tag = "1")]
        OptionalValue(Box<ArgValue>),
        #[prost(bytes, tag = "2")]
        #[serde(serialize_with = "hex_format::bytes")]
        BytesValue(Vec<u8>),
        #[prost(int32, tag = "3")]
        IntValue(i32),
        #[prost(string, tag = "5")]
        StringValue(String),
        #[prost(int64, tag = "7")]
        LongValue(i64),
        #[prost(message, tag = "8")]
        BigInt(BigInt),
    }
}
