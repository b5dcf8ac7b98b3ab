//! Request pacing for crawl-delay compliance
//!
//! A single shared last-request timestamp enforces a minimum spacing between
//! outbound requests. The gate is global rather than per-host, which is
//! correct here because the crawl is strictly same-origin.

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Enforces a minimum interval between consecutive requests
///
/// The last-request timestamp lives behind an async mutex that is held across
/// the pacing sleep, so concurrent callers are spaced out one after another
/// rather than all sleeping against the same stale timestamp.
pub struct RateLimiter {
    delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter with the given minimum spacing (zero disables pacing)
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_request: Mutex::new(None),
        }
    }

    /// Blocks until enough time has passed since the previous request, then
    /// stamps the current instant as the new last-request time
    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }

        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.delay {
                tokio::time::sleep(self.delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_delay_does_not_block() {
        let limiter = RateLimiter::new(Duration::ZERO);
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_consecutive_waits_are_spaced() {
        let delay = Duration::from_millis(100);
        let limiter = RateLimiter::new(delay);

        limiter.wait().await;
        let start = Instant::now();
        limiter.wait().await;

        // Allow a little scheduler jitter below the nominal delay
        assert!(
            start.elapsed() >= Duration::from_millis(90),
            "second request was not delayed: {:?}",
            start.elapsed()
        );
    }

    #[tokio::test]
    async fn test_concurrent_waits_are_serialized() {
        use std::sync::Arc;

        let delay = Duration::from_millis(50);
        let limiter = Arc::new(RateLimiter::new(delay));

        let start = Instant::now();
        let mut handles = Vec::new();
        for _ in 0..3 {
            let limiter = Arc::clone(&limiter);
            handles.push(tokio::spawn(async move { limiter.wait().await }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Three requests need at least two full delay intervals between them
        assert!(
            start.elapsed() >= Duration::from_millis(90),
            "requests were not paced: {:?}",
            start.elapsed()
        );
    }
}
