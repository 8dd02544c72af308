//! Exponential backoff retry, grounded in the reference framework's
//! `LlmRetryConfig` / `generate_with_retry` (codex agent-loop core).

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{Error, Result};

/// Retry policy: base delay 1s, cap 30s, doubling each attempt, matching
/// the workflow engine's stated backoff policy.
#[derive(Clone, Copy, Debug)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 30_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let scaled = (self.initial_delay_ms as f64) * self.backoff_multiplier.powi(attempt as i32);
        Duration::from_millis(scaled.min(self.max_delay_ms as f64) as u64)
    }
}

/// Whether an error represents a recoverable, worth-retrying condition
/// (transient upstream failure) as opposed to a hard failure.
pub fn is_recoverable(err: &Error) -> bool {
    matches!(
        err,
        Error::UpstreamTransient { .. } | Error::Http(_)
    )
}

/// Runs `f` up to `config.max_retries` additional times on recoverable
/// failure, sleeping with exponential backoff between attempts. Stops
/// immediately on a non-recoverable error.
pub async fn retry_with_backoff<F, Fut, T>(stage: &str, config: RetryConfig, mut f: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < config.max_retries && is_recoverable(&err) => {
                let delay = config.delay_for_attempt(attempt);
                warn!(
                    stage,
                    attempt,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "stage failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                info!(stage, attempt, error = %err, "stage failed, not retrying");
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn delay_doubles_and_caps() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(1000));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(2000));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(4000));
        assert_eq!(config.delay_for_attempt(10), Duration::from_millis(30_000));
    }

    #[tokio::test]
    async fn retries_recoverable_errors_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();
        let mut config = RetryConfig::default();
        config.initial_delay_ms = 1;
        config.max_delay_ms = 2;

        let result: Result<u32> = retry_with_backoff("S4", config, move || {
            let calls = calls_clone.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(Error::UpstreamTransient {
                        stage: "S4".to_string(),
                        message: "timeout".to_string(),
                    })
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_non_recoverable_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();
        let result: Result<()> = retry_with_backoff("S2", RetryConfig::default(), move || {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::UpstreamHard {
                    stage: "S2".to_string(),
                    message: "schema mismatch".to_string(),
                })
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
