use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use crate::metrics::RATE_LIMIT_CLIENTS;

pub const DEFAULT_MAX_REQUESTS: u32 = 30;
pub const DEFAULT_WINDOW_SECS: u64 = 60;

// Time source in whole unix seconds
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // pre-epoch clocks clamp to zero
        chrono::Utc::now().timestamp().max(0) as u64
    }
}

// Rate limit entry - tracks requests per client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub window_start: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Admit,
    Reject,
}

impl Decision {
    pub fn is_admitted(self) -> bool {
        matches!(self, Decision::Admit)
    }
}

/// Fixed window limiter keyed by client identifier.
///
/// A window opens on the first request from a client and restarts on the
/// first request made `window` seconds or more after it opened. Rejected
/// attempts still count toward the current window.
pub struct RateLimiter {
    entries: DashMap<String, RateLimitEntry>,
    max_requests: u32,
    window: u64,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            max_requests,
            window: window.as_secs(),
            clock,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            DEFAULT_MAX_REQUESTS,
            Duration::from_secs(DEFAULT_WINDOW_SECS),
            Arc::new(SystemClock),
        )
    }

    pub fn check(&self, client_id: &str) -> Decision {
        let now = self.clock.now();

        // entry() keeps the shard locked for the whole read-modify-write
        let mut entry = self
            .entries
            .entry(client_id.to_string())
            .or_insert(RateLimitEntry {
                count: 0,
                window_start: now,
            });

        // window expired..? start a fresh one
        if now.saturating_sub(entry.window_start) >= self.window {
            entry.window_start = now;
            entry.count = 1;
            return Decision::Admit;
        }

        entry.count = entry.count.saturating_add(1);
        if entry.count > self.max_requests {
            Decision::Reject
        } else {
            Decision::Admit
        }
    }

    pub fn entry(&self, client_id: &str) -> Option<RateLimitEntry> {
        self.entries.get(client_id).map(|e| *e)
    }

    pub fn tracked_clients(&self) -> usize {
        self.entries.len()
    }

    // Drop clients whose window already expired, the next request would reset them anyway
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries
            .retain(|_, e| now.saturating_sub(e.window_start) < self.window);
        before.saturating_sub(self.entries.len())
    }
}

// Background sweep of stale entries
pub async fn sweeper(limiter: Arc<RateLimiter>, every: Duration) {
    let mut interval = interval(every);

    tracing::info!(interval = ?every, "rate limit sweeper started");

    loop {
        interval.tick().await;
        let removed = limiter.sweep_expired();
        RATE_LIMIT_CLIENTS.set(limiter.tracked_clients() as f64);
        if removed > 0 {
            tracing::debug!(removed, remaining = limiter.tracked_clients(), "swept stale clients");
        }
    }
}
