//! Rate limiting port.

use async_trait::async_trait;
use std::time::Duration;

/// Rate limiter trait - one budget per key (client IP or user id).
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Consume one request from `key`'s budget.
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError>;

    /// Requests allowed per window, reported in response headers.
    fn limit(&self) -> u32;
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    /// Time until the next request would be accepted.
    pub reset_after: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}
