//! Resilient call dispatcher.
//!
//! Every remote method goes through the same path: resolve the descriptor,
//! open a connection, call under the optional deadline, and retry transient
//! failures per the [`RetryPolicy`]. For streaming methods only the
//! establishment of the stream is retried.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures_util::stream::{BoxStream, Stream, StreamExt, TryStreamExt};
use tonic::client::Grpc;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::Request;

use crate::error::{ClientError, ClientResult};
use crate::net::{ChannelFactory, ConnectionGuard, ConnectionId};
use crate::resilience::timeouts::with_deadline;
use crate::resilience::{RetryPolicy, Sleeper, TokioSleeper};
use crate::rpc::methods::{MethodTable, RemoteMethod, Service};

/// Forward-only sequence of streamed responses.
///
/// Owns the connection it arrived on; the connection is released when the
/// stream ends or the value is dropped, whichever comes first.
pub struct ResponseStream<T> {
    inner: BoxStream<'static, ClientResult<T>>,
    connection: Option<(Channel, ConnectionGuard)>,
}

// No field is structurally pinned.
impl<T> Unpin for ResponseStream<T> {}

impl<T> ResponseStream<T> {
    fn new(inner: BoxStream<'static, ClientResult<T>>, channel: Channel, guard: ConnectionGuard) -> Self {
        Self {
            inner,
            connection: Some((channel, guard)),
        }
    }

    /// Wrap an already-materialized stream that holds no connection.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = ClientResult<T>> + Send + 'static,
    {
        Self {
            inner: stream.boxed(),
            connection: None,
        }
    }

    /// Connection the stream is reading from, while it is still open.
    pub fn connection_id(&self) -> Option<ConnectionId> {
        self.connection.as_ref().map(|(_, guard)| guard.id())
    }

    /// Drain the stream, stopping at the first error.
    pub async fn try_collect_all(self) -> ClientResult<Vec<T>> {
        self.try_collect().await
    }
}

impl<T> Stream for ResponseStream<T> {
    type Item = ClientResult<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let item = self.inner.poll_next_unpin(cx);
        if let Poll::Ready(None) = item {
            self.connection = None;
        }
        item
    }
}

impl<T> std::fmt::Debug for ResponseStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseStream")
            .field("connection_id", &self.connection_id())
            .finish()
    }
}

/// Routes named remote methods to the right node port with retries.
#[derive(Clone)]
pub struct Dispatcher {
    casper: ChannelFactory,
    control: ChannelFactory,
    methods: MethodTable,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
    request_timeout: Option<Duration>,
}

impl Dispatcher {
    /// `casper` serves the external API, `control` the internal one.
    pub fn new(casper: ChannelFactory, control: ChannelFactory) -> Self {
        Self {
            casper,
            control,
            methods: MethodTable::new(),
            retry: RetryPolicy::default(),
            sleeper: Arc::new(TokioSleeper),
            request_timeout: None,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Deadline for each attempt; for streams, for establishing the stream.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn channel_factory(&self, service: Service) -> &ChannelFactory {
        match service {
            Service::Casper => &self.casper,
            Service::Control => &self.control,
        }
    }

    /// Invoke a unary method by name, e.g. `GetBlockInfo`.
    pub async fn unary<Req, Resp>(&self, name: &str, request: Req) -> ClientResult<Resp>
    where
        Req: prost::Message + Clone + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let method = *self.methods.resolve(name)?;
        let factory = self.channel_factory(method.service);

        self.retry
            .run(self.sleeper.as_ref(), method.name, |attempt| {
                let request = request.clone();
                async move {
                    let (channel, guard) = factory.connect().await?;
                    tracing::debug!(
                        method = %method.name,
                        attempt,
                        connection_id = %guard.id(),
                        "Unary call"
                    );
                    let call = invoke_unary::<Req, Resp>(channel, method, request);
                    let response = with_deadline(self.request_timeout, method.name, call).await;
                    drop(guard);
                    response
                }
            })
            .await
    }

    /// Open a server-streaming method by name, e.g. `StreamBlockInfos_stream`.
    pub async fn server_streaming<Req, Resp>(
        &self,
        name: &str,
        request: Req,
    ) -> ClientResult<ResponseStream<Resp>>
    where
        Req: prost::Message + Clone + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let method = *self.methods.resolve(name)?;
        let factory = self.channel_factory(method.service);

        self.retry
            .run(self.sleeper.as_ref(), method.name, |attempt| {
                let request = request.clone();
                async move {
                    let (channel, guard) = factory.connect().await?;
                    tracing::debug!(
                        method = %method.name,
                        attempt,
                        connection_id = %guard.id(),
                        "Opening stream"
                    );
                    let call = open_stream::<Req, Resp>(channel.clone(), method, request);
                    let inner = with_deadline(self.request_timeout, method.name, call).await?;
                    Ok(ResponseStream::new(inner, channel, guard))
                }
            })
            .await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("casper", &self.casper.address())
            .field("control", &self.control.address())
            .field("retry", &self.retry)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

async fn invoke_unary<Req, Resp>(channel: Channel, method: RemoteMethod, request: Req) -> ClientResult<Resp>
where
    Req: prost::Message + Send + Sync + 'static,
    Resp: prost::Message + Default + Send + Sync + 'static,
{
    let mut grpc = Grpc::new(channel);
    grpc.ready().await.map_err(ClientError::from)?;
    let response = grpc
        .unary(
            Request::new(request),
            PathAndQuery::from_static(method.path),
            ProstCodec::<Req, Resp>::default(),
        )
        .await?;
    Ok(response.into_inner())
}

async fn open_stream<Req, Resp>(
    channel: Channel,
    method: RemoteMethod,
    request: Req,
) -> ClientResult<BoxStream<'static, ClientResult<Resp>>>
where
    Req: prost::Message + Send + Sync + 'static,
    Resp: prost::Message + Default + Send + Sync + 'static,
{
    let mut grpc = Grpc::new(channel);
    grpc.ready().await.map_err(ClientError::from)?;
    let response = grpc
        .server_streaming(
            Request::new(request),
            PathAndQuery::from_static(method.path),
            ProstCodec::<Req, Resp>::default(),
        )
        .await?;
    Ok(response.into_inner().map_err(ClientError::from).boxed())
}
