// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sliding-window rate limiter for the portfolio API endpoints.
//!
//! Each endpoint owns an independent limiter keyed by client identifier
//! (the first `X-Forwarded-For` token, or `"unknown"`). A request is
//! admitted if fewer than `max_requests` admissions fall inside the
//! trailing window; denied requests do not consume window capacity.

use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub enum RateLimitResult {
    /// Request is admitted
    Allowed {
        /// Remaining admissions in the current window
        remaining: u32,
    },
    /// Request is denied
    Limited {
        /// Time until the oldest admission leaves the window
        retry_after: Duration,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }
}

/// Thread-safe sliding-window rate limiter.
///
/// Entries are pruned on every check; keys whose whole window has expired
/// are only removed by [`RateLimiter::sweep`], which the binary runs on an
/// interval.
pub struct RateLimiter {
    /// Configuration
    config: RateLimitConfig,
    /// Per-client admission timestamps, insertion order = arrival order
    windows: Arc<RwLock<HashMap<String, Vec<Instant>>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Check whether a request from `client_id` is admitted.
    ///
    /// Prunes timestamps older than the window, then either records the
    /// admission or denies without recording anything. Never fails; denial
    /// is reported to the caller as a 429 by the handler, not here.
    pub async fn check(&self, client_id: &str) -> RateLimitResult {
        let now = Instant::now();
        let window = self.config.window_duration();

        let mut windows = self.windows.write().await;
        let timestamps = windows.entry(client_id.to_string()).or_default();
        timestamps.retain(|t| now.duration_since(*t) < window);

        if timestamps.len() >= self.config.max_requests as usize {
            // The pruned set stays stored; the denied request is not added.
            let retry_after = timestamps
                .first()
                .map(|oldest| window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(window);
            warn!(client_id, retry_after_secs = retry_after.as_secs(), "Rate limit exceeded");
            return RateLimitResult::Limited { retry_after };
        }

        timestamps.push(now);
        let remaining = self.config.max_requests - timestamps.len() as u32;
        debug!(client_id, remaining, "Request admitted");
        RateLimitResult::Allowed { remaining }
    }

    /// Evict clients whose every admission has left the window.
    ///
    /// Returns the number of evicted entries. The check path never removes
    /// keys, so this is what bounds the store between quiet periods.
    pub async fn sweep(&self) -> usize {
        let now = Instant::now();
        let window = self.config.window_duration();

        let mut windows = self.windows.write().await;
        let before = windows.len();
        windows.retain(|_, timestamps| {
            timestamps.iter().any(|t| now.duration_since(*t) < window)
        });
        before - windows.len()
    }

    /// Number of clients currently tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.windows.read().await.len()
    }
}
