//! Block and deploy status views (`io.casperlabs.casper.consensus.info`).

use serde::Serialize;

use crate::proto::consensus::{Deploy, Signature};
use crate::proto::hex_format;

/// How much detail the node should return.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum View {
    Basic = 0,
    Full = 1,
}

impl View {
    pub fn from_full(full_view: bool) -> Self {
        if full_view {
            View::Full
        } else {
            View::Basic
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct BlockHeader {
    #[prost(bytes = "vec", repeated, tag = "1")]
    #[serde(serialize_with = "hex_format::bytes_list")]
    pub parent_hashes: Vec<Vec<u8>>,
    #[prost(bytes = "vec", tag = "4")]
    #[serde(serialize_with = "hex_format::bytes")]
    pub body_hash: Vec<u8>,
    #[prost(uint64, tag = "5")]
    pub timestamp: u64,
    #[prost(uint32, tag = "7")]
    pub deploy_count: u32,
    #[prost(string, tag = "8")]
    pub chain_id: String,
    #[prost(bytes = "vec", tag = "10")]
    #[serde(serialize_with = "hex_format::bytes")]
    pub validator_public_key: Vec<u8>,
    #[prost(uint64, tag = "11")]
    pub rank: u64,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct BlockSummary {
    #[prost(bytes = "vec", tag = "1")]
    #[serde(serialize_with = "hex_format::bytes")]
    pub block_hash: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub header: Option<BlockHeader>,
    #[prost(message, optional, tag = "3")]
    pub signature: Option<Signature>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct BlockStats {
    #[prost(uint32, tag = "1")]
    pub block_size_bytes: u32,
    #[prost(uint32, tag = "2")]
    pub deploy_error_count: u32,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct BlockStatus {
    #[prost(float, tag = "1")]
    pub fault_tolerance: f32,
    #[prost(message, optional, tag = "2")]
    pub stats: Option<BlockStats>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct BlockInfo {
    #[prost(message, optional, tag = "1")]
    pub summary: Option<BlockSummary>,
    #[prost(message, optional, tag = "2")]
    pub status: Option<BlockStatus>,
}

/// Outcome of a deploy in one block.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct ProcessingResult {
    #[prost(message, optional, tag = "1")]
    pub block_info: Option<BlockInfo>,
    #[prost(uint64, tag = "2")]
    pub cost: u64,
    #[prost(bool, tag = "3")]
    pub is_error: bool,
    #[prost(string, tag = "4")]
    pub error_message: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct DeployInfo {
    #[prost(message, optional, tag = "1")]
    pub deploy: Option<Deploy>,
    #[prost(message, repeated, tag = "2")]
    pub processing_results: Vec<ProcessingResult>,
}

/// A deploy as executed inside a block.
#[derive(Clone, PartialEq, ::prost::Message, Serialize)]
pub struct ProcessedDeploy {
    #[prost(message, optional, tag = "1")]
    pub deploy: Option<Deploy>,
    #[prost(uint64, tag = "2")]
    pub cost: u64,
    #[prost(bool, tag = "3")]
    pub is_error: bool,
    #[prost(string, tag = "4")]
    pub error_message: String,
}
