//! Fixed-window request throttle keyed by client identity.

pub mod sweeper;

use std::time::{Duration, Instant};

use dashmap::DashMap;

use catalog_core::config::RateLimitConfig;

pub use sweeper::ThrottleSweeper;

/// Outcome of a throttle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// The request is admitted; `remaining` more fit in this window.
    Admitted { remaining: u32 },
    /// The window is exhausted until `retry_after` elapses.
    Rejected { retry_after: Duration },
}

impl ThrottleDecision {
    /// Whether the request may proceed.
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted { .. })
    }
}

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    window_start: Instant,
}

impl WindowEntry {
    fn new(now: Instant) -> Self {
        Self {
            count: 0,
            window_start: now,
        }
    }

    fn elapsed(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.window_start) > window
    }
}

/// Counts requests per key in fixed windows.
///
/// Each key's read-modify-write runs under its map shard's write lock, so
/// concurrent requests on one key never admit more than `limit` per window
/// while distinct keys proceed in parallel. A client may see up to twice the
/// limit across a window boundary.
#[derive(Debug)]
pub struct FixedWindowThrottle {
    limit: u32,
    window: Duration,
    entries: DashMap<String, WindowEntry>,
}

impl FixedWindowThrottle {
    /// Creates a throttle admitting `limit` requests per `window` per key.
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            entries: DashMap::new(),
        }
    }

    /// Creates a throttle from configuration.
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.limit, config.window())
    }

    /// Records a request from `key` at the current instant.
    pub fn check(&self, key: &str) -> ThrottleDecision {
        self.check_at(key, Instant::now())
    }

    /// Records a request from `key` at `now`.
    pub fn check_at(&self, key: &str, now: Instant) -> ThrottleDecision {
        let mut entry = match self.entries.get_mut(key) {
            Some(entry) => entry,
            None => self
                .entries
                .entry(key.to_owned())
                .or_insert_with(|| WindowEntry::new(now)),
        };

        if entry.elapsed(now, self.window) {
            *entry = WindowEntry::new(now);
        }

        if entry.count >= self.limit {
            let used = now.saturating_duration_since(entry.window_start);
            return ThrottleDecision::Rejected {
                retry_after: self.window.saturating_sub(used),
            };
        }

        entry.count += 1;
        ThrottleDecision::Admitted {
            remaining: self.limit - entry.count,
        }
    }

    /// Drops counters whose window has elapsed. Returns how many were removed.
    ///
    /// An elapsed entry would be reset on its next check anyway, so removal
    /// does not change any decision.
    pub fn sweep(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.elapsed(now, self.window));
        before.saturating_sub(self.entries.len())
    }

    /// Number of tracked keys.
    pub fn tracked_keys(&self) -> usize {
        self.entries.len()
    }

    /// Requests admitted per window.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Window length.
    pub fn window(&self) -> Duration {
        self.window
    }
}
