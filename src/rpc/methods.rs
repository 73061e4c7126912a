//! Remote method descriptors.
//!
//! Every operation the client invokes is described once here. Callers name
//! a method; a `_stream` suffix asks for the server-streaming path.

use std::collections::HashMap;

use crate::error::{ClientError, ClientResult};

/// Suffix that selects the streaming path when resolving a method by name.
pub const STREAM_SUFFIX: &str = "_stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Unary,
    ServerStreaming,
}

/// Which node service, and therefore which port, a method lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// External API (`port`).
    Casper,
    /// Internal API (`port_internal`).
    Control,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteMethod {
    pub service: Service,
    pub name: &'static str,
    /// gRPC path, `/<package>.<Service>/<Method>`.
    pub path: &'static str,
    pub kind: MethodKind,
}

const CASPER_SERVICE: &str = "io.casperlabs.node.api.casper.CasperService";

pub const DEPLOY: RemoteMethod = RemoteMethod {
    service: Service::Casper,
    name: "Deploy",
    path: "/io.casperlabs.node.api.casper.CasperService/Deploy",
    kind: MethodKind::Unary,
};

pub const GET_BLOCK_INFO: RemoteMethod = RemoteMethod {
    service: Service::Casper,
    name: "GetBlockInfo",
    path: "/io.casperlabs.node.api.casper.CasperService/GetBlockInfo",
    kind: MethodKind::Unary,
};

pub const STREAM_BLOCK_INFOS: RemoteMethod = RemoteMethod {
    service: Service::Casper,
    name: "StreamBlockInfos",
    path: "/io.casperlabs.node.api.casper.CasperService/StreamBlockInfos",
    kind: MethodKind::ServerStreaming,
};

pub const GET_BLOCK_STATE: RemoteMethod = RemoteMethod {
    service: Service::Casper,
    name: "GetBlockState",
    path: "/io.casperlabs.node.api.casper.CasperService/GetBlockState",
    kind: MethodKind::Unary,
};

pub const GET_DEPLOY_INFO: RemoteMethod = RemoteMethod {
    service: Service::Casper,
    name: "GetDeployInfo",
    path: "/io.casperlabs.node.api.casper.CasperService/GetDeployInfo",
    kind: MethodKind::Unary,
};

pub const STREAM_BLOCK_DEPLOYS: RemoteMethod = RemoteMethod {
    service: Service::Casper,
    name: "StreamBlockDeploys",
    path: "/io.casperlabs.node.api.casper.CasperService/StreamBlockDeploys",
    kind: MethodKind::ServerStreaming,
};

pub const PROPOSE: RemoteMethod = RemoteMethod {
    service: Service::Control,
    name: "Propose",
    path: "/io.casperlabs.node.api.control.ControlService/Propose",
    kind: MethodKind::Unary,
};

/// Name → descriptor lookup, built once per client.
#[derive(Debug, Clone)]
pub struct MethodTable {
    methods: HashMap<&'static str, RemoteMethod>,
}

impl Default for MethodTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodTable {
    pub fn new() -> Self {
        let methods = [
            DEPLOY,
            GET_BLOCK_INFO,
            STREAM_BLOCK_INFOS,
            GET_BLOCK_STATE,
            GET_DEPLOY_INFO,
            STREAM_BLOCK_DEPLOYS,
            PROPOSE,
        ]
        .into_iter()
        .map(|method| (method.name, method))
        .collect();
        Self { methods }
    }

    pub fn get(&self, name: &str) -> Option<&RemoteMethod> {
        self.methods.get(name)
    }

    /// Resolve a caller-facing name.
    ///
    /// `StreamBlockInfos_stream` resolves to the streaming `StreamBlockInfos`;
    /// names without the suffix must be unary methods.
    pub fn resolve(&self, name: &str) -> ClientResult<&RemoteMethod> {
        let (remote_name, requested) = match name.strip_suffix(STREAM_SUFFIX) {
            Some(stripped) => (stripped, MethodKind::ServerStreaming),
            None => (name, MethodKind::Unary),
        };
        let method = self
            .get(remote_name)
            .ok_or_else(|| ClientError::Internal(format!("unknown remote method {}", name)))?;
        if method.kind != requested {
            return Err(ClientError::Internal(format!(
                "{} is a {:?} method, requested as {:?}",
                method.name, method.kind, requested
            )));
        }
        Ok(method)
    }
}

/// Service name as it appears in gRPC paths, for logging.
pub fn service_name(service: Service) -> &'static str {
    match service {
        Service::Casper => CASPER_SERVICE,
        Service::Control => "io.casperlabs.node.api.control.ControlService",
    }
}
