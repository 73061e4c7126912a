//! Shared utilities for integration tests: key fixtures, a recording
//! sleeper and an in-process fake node speaking the node's gRPC API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::stream::{self, BoxStream, StreamExt};
use tonic::body::BoxBody;
use tonic::codec::ProstCodec;
use tonic::codegen::{empty_body, http, BoxFuture, Context, Poll, Service};
use tonic::server::{Grpc, NamedService, ServerStreamingService, UnaryService};
use tonic::transport::server::TcpIncoming;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

use casperlabs_client::config::ClientConfig;
use casperlabs_client::proto::casper::{
    DeployRequest, GetBlockInfoRequest, GetBlockStateRequest, StreamBlockDeploysRequest,
    StreamBlockInfosRequest,
};
use casperlabs_client::proto::control::{ProposeRequest, ProposeResponse};
use casperlabs_client::proto::info::{BlockInfo, ProcessedDeploy};
use casperlabs_client::proto::state::Value;
use casperlabs_client::proto::Deploy;
use casperlabs_client::resilience::Sleeper;

/// Seed of the fixture account key (`0x2a` repeated).
pub const ACCOUNT_SEED: [u8; 32] = [0x2a; 32];
/// Public key matching [`ACCOUNT_SEED`].
pub const ACCOUNT_PUBLIC_KEY_HEX: &str =
    "197f6b23e16c8532c6abc838facd5ea789be0c76b2920334039bfa8b3d368d61";

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// PKCS#8 PEM holding [`ACCOUNT_SEED`].
pub fn private_key_file() -> PathBuf {
    fixture("account-private.pem")
}

/// SubjectPublicKeyInfo PEM holding [`ACCOUNT_PUBLIC_KEY_HEX`].
pub fn public_key_file() -> PathBuf {
    fixture("account-public.pem")
}

/// Records requested delays instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, delay: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        self.delays.lock().unwrap().push(delay);
        Box::pin(async {})
    }
}

/// A local port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Client configuration pointing at local ports.
pub fn local_config(port: u16, port_internal: u16) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.connection.host = "127.0.0.1".into();
    config.connection.port = port;
    config.connection.port_internal = port_internal;
    config
}

/// What the fake node serves and what it has seen.
#[derive(Debug, Default)]
pub struct NodeState {
    pub deploys: Vec<Deploy>,
    pub blocks: Vec<BlockInfo>,
    pub block_deploys: Vec<ProcessedDeploy>,
    /// Values by `(key_variant, key_base16)`.
    pub global_state: HashMap<(i32, String), Value>,
    pub proposed_block_hash: Vec<u8>,
    /// Answer this many requests with `Unavailable` before serving.
    pub unavailable_responses: u32,
    /// Method names in arrival order.
    pub calls: Vec<&'static str>,
    pub state_queries: Vec<GetBlockStateRequest>,
}

pub type SharedState = Arc<Mutex<NodeState>>;

fn admit(state: &SharedState, method: &'static str) -> Result<(), Status> {
    let mut state = state.lock().unwrap();
    state.calls.push(method);
    if state.unavailable_responses > 0 {
        state.unavailable_responses -= 1;
        return Err(Status::unavailable("node is starting"));
    }
    Ok(())
}

struct Unary<F>(F);

impl<Req, Resp, F> UnaryService<Req> for Unary<F>
where
    F: FnMut(Req) -> Result<Resp, Status>,
    Resp: Send + 'static,
{
    type Response = Resp;
    type Future = BoxFuture<Response<Resp>, Status>;

    fn call(&mut self, request: Request<Req>) -> Self::Future {
        let result = (self.0)(request.into_inner()).map(Response::new);
        Box::pin(async move { result })
    }
}

struct Streaming<F>(F);

impl<Req, Resp, F> ServerStreamingService<Req> for Streaming<F>
where
    F: FnMut(Req) -> Result<Vec<Resp>, Status>,
    Resp: Send + 'static,
{
    type Response = Resp;
    type ResponseStream = BoxStream<'static, Result<Resp, Status>>;
    type Future = BoxFuture<Response<Self::ResponseStream>, Status>;

    fn call(&mut self, request: Request<Req>) -> Self::Future {
        let result = (self.0)(request.into_inner())
            .map(|items| Response::new(stream::iter(items.into_iter().map(Ok)).boxed()));
        Box::pin(async move { result })
    }
}

fn unimplemented() -> http::Response<BoxBody> {
    let mut response = http::Response::new(empty_body());
    response.headers_mut().insert(
        "grpc-status",
        http::HeaderValue::from(tonic::Code::Unimplemented as i32),
    );
    response.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/grpc"),
    );
    response
}

/// `io.casperlabs.node.api.casper.CasperService`.
#[derive(Clone)]
pub struct CasperService {
    state: SharedState,
}

impl NamedService for CasperService {
    const NAME: &'static str = "io.casperlabs.node.api.casper.CasperService";
}

impl Service<http::Request<BoxBody>> for CasperService {
    type Response = http::Response<BoxBody>;
    type Error = std::convert::Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<BoxBody>) -> Self::Future {
        let state = self.state.clone();
        match req.uri().path() {
            "/io.casperlabs.node.api.casper.CasperService/Deploy" => Box::pin(async move {
                let mut grpc = Grpc::new(ProstCodec::<(), DeployRequest>::default());
                let service = Unary(move |request: DeployRequest| {
                    admit(&state, "Deploy")?;
                    let deploy = request
                        .deploy
                        .ok_or_else(|| Status::invalid_argument("missing deploy"))?;
                    state.lock().unwrap().deploys.push(deploy);
                    Ok(())
                });
                Ok(grpc.unary(service, req).await)
            }),
            "/io.casperlabs.node.api.casper.CasperService/GetBlockInfo" => Box::pin(async move {
                let mut grpc = Grpc::new(ProstCodec::<BlockInfo, GetBlockInfoRequest>::default());
                let service = Unary(move |request: GetBlockInfoRequest| {
                    admit(&state, "GetBlockInfo")?;
                    let state = state.lock().unwrap();
                    let block = state
                        .blocks
                        .iter()
                        .find(|block| {
                            block.summary.as_ref().is_some_and(|summary| {
                                hex::encode(&summary.block_hash)
                                    .starts_with(&request.block_hash_base16)
                            })
                        })
                        .cloned();
                    block.ok_or_else(|| Status::not_found("Cannot find block matching hash"))
                });
                Ok(grpc.unary(service, req).await)
            }),
            "/io.casperlabs.node.api.casper.CasperService/StreamBlockInfos" => Box::pin(async move {
                let mut grpc =
                    Grpc::new(ProstCodec::<BlockInfo, StreamBlockInfosRequest>::default());
                let service = Streaming(move |request: StreamBlockInfosRequest| {
                    admit(&state, "StreamBlockInfos")?;
                    let state = state.lock().unwrap();
                    let blocks: Vec<BlockInfo> = state
                        .blocks
                        .iter()
                        .take(request.depth as usize)
                        .cloned()
                        .collect();
                    Ok(blocks)
                });
                Ok(grpc.server_streaming(service, req).await)
            }),
            "/io.casperlabs.node.api.casper.CasperService/StreamBlockDeploys" => {
                Box::pin(async move {
                    let mut grpc = Grpc::new(
                        ProstCodec::<ProcessedDeploy, StreamBlockDeploysRequest>::default(),
                    );
                    let service = Streaming(move |_request: StreamBlockDeploysRequest| {
                        admit(&state, "StreamBlockDeploys")?;
                        Ok(state.lock().unwrap().block_deploys.clone())
                    });
                    Ok(grpc.server_streaming(service, req).await)
                })
            }
            "/io.casperlabs.node.api.casper.CasperService/GetBlockState" => Box::pin(async move {
                let mut grpc = Grpc::new(ProstCodec::<Value, GetBlockStateRequest>::default());
                let service = Unary(move |request: GetBlockStateRequest| {
                    admit(&state, "GetBlockState")?;
                    let mut state = state.lock().unwrap();
                    state.state_queries.push(request.clone());
                    let query = request
                        .query
                        .ok_or_else(|| Status::invalid_argument("missing query"))?;
                    let value = state
                        .global_state
                        .get(&(query.key_variant, query.key_base16))
                        .cloned();
                    value.ok_or_else(|| Status::not_found("Value not found"))
                });
                Ok(grpc.unary(service, req).await)
            }),
            _ => Box::pin(async move { Ok(unimplemented()) }),
        }
    }
}

/// `io.casperlabs.node.api.control.ControlService`.
#[derive(Clone)]
pub struct ControlService {
    state: SharedState,
}

impl NamedService for ControlService {
    const NAME: &'static str = "io.casperlabs.node.api.control.ControlService";
}

impl Service<http::Request<BoxBody>> for ControlService {
    type Response = http::Response<BoxBody>;
    type Error = std::convert::Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<BoxBody>) -> Self::Future {
        let state = self.state.clone();
        match req.uri().path() {
            "/io.casperlabs.node.api.control.ControlService/Propose" => Box::pin(async move {
                let mut grpc = Grpc::new(ProstCodec::<ProposeResponse, ProposeRequest>::default());
                let service = Unary(move |_request: ProposeRequest| {
                    admit(&state, "Propose")?;
                    Ok(ProposeResponse {
                        block_hash: state.lock().unwrap().proposed_block_hash.clone(),
                    })
                });
                Ok(grpc.unary(service, req).await)
            }),
            _ => Box::pin(async move { Ok(unimplemented()) }),
        }
    }
}

/// A running fake node: external API on `port`, internal on `port_internal`.
pub struct FakeNode {
    pub state: SharedState,
    pub port: u16,
    pub port_internal: u16,
}

impl FakeNode {
    pub async fn start(state: NodeState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let port = serve(
            Server::builder().add_service(CasperService {
                state: state.clone(),
            }),
        )
        .await;
        let port_internal = serve(
            Server::builder().add_service(ControlService {
                state: state.clone(),
            }),
        )
        .await;
        Self {
            state,
            port,
            port_internal,
        }
    }

    pub fn config(&self) -> ClientConfig {
        local_config(self.port, self.port_internal)
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }
}

async fn serve(router: tonic::transport::server::Router) -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let incoming = TcpIncoming::from_listener(listener, true, None).unwrap();
    tokio::spawn(router.serve_with_incoming(incoming));
    addr.port()
}
