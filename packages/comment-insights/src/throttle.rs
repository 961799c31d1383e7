//! Request throttle for outbound AI calls.
//!
//! Spaces consecutive requests by a fixed interval using the governor crate.
//! Cloning shares the underlying limiter, so concurrent callers still observe
//! one combined rate.

use std::sync::Arc;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

/// One permit per interval; the first permit is available immediately.
#[derive(Clone, Default)]
pub struct Throttle {
    limiter: Option<Arc<DefaultDirectRateLimiter>>,
    interval: Duration,
}

impl Throttle {
    /// Create a throttle allowing one request per `interval`.
    ///
    /// A zero interval yields an unlimited throttle.
    pub fn new(interval: Duration) -> Self {
        match Quota::with_period(interval) {
            Some(quota) => Self {
                limiter: Some(Arc::new(RateLimiter::direct(quota))),
                interval,
            },
            None => Self::unlimited(),
        }
    }

    /// A throttle that never waits.
    pub fn unlimited() -> Self {
        Self {
            limiter: None,
            interval: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_unlimited(&self) -> bool {
        self.limiter.is_none()
    }

    /// Wait until the next request may be sent.
    pub async fn until_ready(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("interval", &self.interval)
            .finish()
    }
}
