//! Retry logic.
//!
//! # Responsibilities
//! - Decide whether a failure is retryable (transport unavailable only)
//! - Execute retries with exponential backoff
//! - Enforce the attempt budget (attempts, not retries: 5 means 1 + 4 retries)
//!
//! # Per-call states
//! ```text
//! ATTEMPT → SUCCESS
//! ATTEMPT → RETRYABLE_FAILURE → backoff sleep → ATTEMPT
//! ATTEMPT → FATAL_FAILURE (non-retryable, or budget exhausted)
//! ```

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::error::{ClientError, ClientResult};
use crate::observability::metrics;
use crate::resilience::backoff::calculate_backoff;

/// Suspends the caller between attempts.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, delay: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Sleeps on the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, delay: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(tokio::time::sleep(delay))
    }
}

/// Bounded retry with doubling backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(300),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            initial_delay: Duration::from_millis(config.initial_delay_ms),
        }
    }
}

impl RetryPolicy {
    pub fn is_retryable(&self, error: &ClientError) -> bool {
        error.is_transient()
    }

    /// Delay after failed attempt number `attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        calculate_backoff(attempt, self.initial_delay)
    }

    /// Run `operation` until it succeeds, fails fatally, or the budget runs out.
    ///
    /// `operation` receives the 1-based attempt number.
    pub async fn run<T, F, Fut>(
        &self,
        sleeper: &dyn Sleeper,
        method: &str,
        mut operation: F,
    ) -> ClientResult<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            metrics::record_attempt(method);
            tracing::debug!(method = %method, attempt, "Attempt");

            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) if self.is_retryable(&error) && attempt < max_attempts => {
                    let delay = self.delay_after(attempt);
                    tracing::warn!(
                        method = %method,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Retrying after transient failure"
                    );
                    metrics::record_retry(method);
                    sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    tracing::debug!(method = %method, attempt, error = %error, "Call failed");
                    metrics::record_failure(method);
                    return Err(error);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tonic::Code;

    #[derive(Default)]
    struct RecordingSleeper {
        delays: Mutex<Vec<Duration>>,
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, delay: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
            self.delays.lock().unwrap().push(delay);
            Box::pin(async {})
        }
    }

    fn unavailable() -> ClientError {
        ClientError::Transport {
            code: Code::Unavailable,
            details: "connection refused".into(),
        }
    }

    #[tokio::test]
    async fn succeeds_on_fifth_attempt_after_four_doubling_sleeps() {
        let sleeper = RecordingSleeper::default();
        let result = RetryPolicy::default()
            .run(&sleeper, "Deploy", |attempt| async move {
                if attempt < 5 {
                    Err(unavailable())
                } else {
                    Ok(attempt)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 5);
        assert_eq!(
            *sleeper.delays.lock().unwrap(),
            vec![
                Duration::from_millis(300),
                Duration::from_millis(600),
                Duration::from_millis(1200),
                Duration::from_millis(2400),
            ]
        );
    }

    #[tokio::test]
    async fn exhausted_budget_propagates_the_failure() {
        let sleeper = RecordingSleeper::default();
        let mut calls = 0;
        let result: ClientResult<()> = RetryPolicy::default()
            .run(&sleeper, "Deploy", |_| {
                calls += 1;
                async { Err(unavailable()) }
            })
            .await;

        assert!(result.unwrap_err().is_transient());
        assert_eq!(calls, 5);
        assert_eq!(sleeper.delays.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn remote_failure_is_not_retried() {
        let sleeper = RecordingSleeper::default();
        let mut calls = 0;
        let result: ClientResult<()> = RetryPolicy::default()
            .run(&sleeper, "GetBlockInfo", |_| {
                calls += 1;
                async {
                    Err(ClientError::Remote {
                        code: Code::NotFound,
                        details: "no such block".into(),
                    })
                }
            })
            .await;

        assert!(matches!(result, Err(ClientError::Remote { .. })));
        assert_eq!(calls, 1);
        assert!(sleeper.delays.lock().unwrap().is_empty());
    }

    #[test]
    fn policy_from_config() {
        let config = RetryConfig {
            max_attempts: 3,
            initial_delay_ms: 50,
        };
        let policy = RetryPolicy::from(&config);
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_after(2), Duration::from_millis(100));
    }
}
