//! Retry logic with exponential backoff
//!
//! Model calls are the only retried operations in the workspace. A policy
//! with `max_retries = 2` makes at most three attempts.

use crate::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,

    /// Backoff before the first retry
    pub initial_backoff: Duration,

    /// Upper bound for any single backoff
    pub max_backoff: Duration,

    /// Backoff multiplier (2.0 for exponential backoff)
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Policy with the given retry count and default backoff
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Policy that never retries
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            backoff_multiplier: 1.0,
        }
    }

    /// Backoff to wait before retry number `retry` (1-based)
    pub fn backoff_duration(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }

        let backoff_ms = self.initial_backoff.as_millis() as f64
            * self.backoff_multiplier.powi((retry - 1) as i32);

        Duration::from_millis(backoff_ms as u64).min(self.max_backoff)
    }

    /// Run `operation`, retrying transient failures
    ///
    /// Non-transient errors are returned immediately. When every attempt
    /// fails, the last error is returned.
    pub async fn execute<F, Fut, T>(&self, operation_name: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut retry = 0;

        loop {
            match operation().await {
                Ok(value) => {
                    if retry > 0 {
                        debug!("'{}' succeeded after {} retries", operation_name, retry);
                    }
                    return Ok(value);
                },
                Err(e) if e.is_transient() && retry < self.max_retries => {
                    retry += 1;
                    let backoff = self.backoff_duration(retry);
                    warn!(
                        "'{}' failed ({}), retry {}/{} in {:?}",
                        operation_name, e, retry, self.max_retries, backoff
                    );
                    sleep(backoff).await;
                },
                Err(e) => return Err(e),
            }
        }
    }
}
