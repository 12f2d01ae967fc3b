use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::error::LLMError;

const DEFAULT_MAX_RETRIES: usize = 3;
const DEFAULT_INITIAL_DELAY_MS: u64 = 2_000;
const DEFAULT_BACKOFF_MULTIPLIER: u32 = 2;

/// Retry and backoff behavior for transport failures.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: usize,
    /// Wait before the first retry, in milliseconds
    pub initial_delay_ms: u64,
    /// Factor applied to the wait after every retry
    pub backoff_multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
        }
    }
}

impl RetryPolicy {
    /// Total number of tries, the first one included.
    pub fn max_attempts(&self) -> usize {
        self.max_retries.saturating_add(1)
    }

    /// Waits between consecutive attempts, in order.
    #[cfg(test)]
    fn delays(&self) -> Vec<Duration> {
        std::iter::successors(Some(Duration::from_millis(self.initial_delay_ms)), |d| {
            Some(d.saturating_mul(self.backoff_multiplier))
        })
        .take(self.max_retries)
        .collect()
    }

    /// Runs `op` until it succeeds, fails with a non-retryable error, or the
    /// retry budget is spent.
    pub async fn run<F, Fut, T>(&self, mut op: F) -> Result<T, LLMError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LLMError>>,
    {
        let mut retries_left = self.max_retries;
        let mut delay = Duration::from_millis(self.initial_delay_ms);
        let mut attempt = 1usize;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) if retries_left == 0 => {
                    return Err(LLMError::RetryExceeded {
                        attempts: attempt,
                        last_error: err.to_string(),
                    });
                }
                Err(err) => {
                    log::warn!(
                        "attempt {attempt} failed: {err}; retrying in {:.1}s",
                        delay.as_secs_f64()
                    );
                    sleep(delay).await;
                    delay = delay.saturating_mul(self.backoff_multiplier);
                    retries_left -= 1;
                    attempt += 1;
                }
            }
        }
    }
}
