//! Request messages of `io.casperlabs.node.api.casper.CasperService`.

use crate::proto::consensus::Deploy;
use crate::proto::info::View;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeployRequest {
    #[prost(message, optional, tag = "1")]
    pub deploy: Option<Deploy>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetBlockInfoRequest {
    #[prost(string, tag = "1")]
    pub block_hash_base16: String,
    #[prost(enumeration = "View", tag = "2")]
    pub view: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StreamBlockInfosRequest {
    #[prost(uint32, tag = "1")]
    pub depth: u32,
    #[prost(enumeration = "View", tag = "2")]
    pub view: i32,
    /// Rank to go back from; 0 means the current tip.
    #[prost(uint64, tag = "3")]
    pub max_rank: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetDeployInfoRequest {
    #[prost(string, tag = "1")]
    pub deploy_hash_base16: String,
    #[prost(enumeration = "View", tag = "2")]
    pub view: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StreamBlockDeploysRequest {
    #[prost(string, tag = "1")]
    pub block_hash_base16: String,
    #[prost(enumeration = "View", tag = "2")]
    pub view: i32,
}

/// Type of the base key a state query starts from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum KeyVariant {
    Unspecified = 0,
    Hash = 1,
    Uref = 2,
    Address = 3,
    Local = 4,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StateQuery {
    #[prost(enumeration = "KeyVariant", tag = "1")]
    pub key_variant: i32,
    #[prost(string, tag = "2")]
    pub key_base16: String,
    #[prost(string, repeated, tag = "3")]
    pub path_segments: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetBlockStateRequest {
    #[prost(string, tag = "1")]
    pub block_hash_base16: String,
    #[prost(message, optional, tag = "2")]
    pub query: Option<StateQuery>,
}
