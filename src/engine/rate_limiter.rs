//! A token-bucket rate limiter for bounding outbound LLM/API call rates.
//! Hand-rolled rather than pulled from a crate: the policy is a handful of
//! lines and every candidate crate in the dependency stack pulls in far
//! more surface (governor's jitter/clock abstractions) than this pipeline
//! needs.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Bounds calls to at most `max_per_window` within any rolling `window`.
/// `acquire()` blocks until a slot opens rather than rejecting the caller —
/// callers that need to fail fast should race it against a timeout.
pub struct RateLimiter {
    max_per_window: usize,
    window: Duration,
    timestamps: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    pub fn new(max_per_window: usize, window: Duration) -> Self {
        Self {
            max_per_window,
            window,
            timestamps: Mutex::new(VecDeque::with_capacity(max_per_window)),
        }
    }

    /// Convenience constructor for a per-minute budget.
    pub fn per_minute(max_per_minute: usize) -> Self {
        Self::new(max_per_minute, Duration::from_secs(60))
    }

    /// Waits until a call is permitted under the budget, then records it.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut timestamps = self.timestamps.lock().await;
                let now = Instant::now();
                while let Some(&oldest) = timestamps.front() {
                    if now.duration_since(oldest) >= self.window {
                        timestamps.pop_front();
                    } else {
                        break;
                    }
                }
                if timestamps.len() < self.max_per_window {
                    timestamps.push_back(now);
                    None
                } else {
                    let oldest = *timestamps.front().unwrap();
                    Some(self.window - now.duration_since(oldest))
                }
            };

            match wait {
                None => return,
                Some(duration) => tokio::time::sleep(duration).await,
            }
        }
    }
}
