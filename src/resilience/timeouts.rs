//! Per-attempt deadlines.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;
use tonic::Code;

use crate::error::{ClientError, ClientResult};

/// Run `fut` under `deadline`, if there is one.
///
/// An expired deadline is a `DeadlineExceeded` transport failure, which the
/// retry policy does not retry.
pub async fn with_deadline<T, F>(deadline: Option<Duration>, method: &str, fut: F) -> ClientResult<T>
where
    F: Future<Output = ClientResult<T>>,
{
    match deadline {
        None => fut.await,
        Some(limit) => match timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Transport {
                code: Code::DeadlineExceeded,
                details: format!("{} did not complete within {} ms", method, limit.as_millis()),
            }),
        },
    }
}
