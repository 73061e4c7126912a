//! Messages of `io.casperlabs.node.api.control.ControlService`.

use serde::Serialize;

use crate::proto::hex_format;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProposeRequest {}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct ProposeResponse {
    #[prost(bytes = "vec", tag = "1")]
    #[serde(serialize_with = "hex_format::bytes")]
    pub block_hash: Vec<u8>,
}
