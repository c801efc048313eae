//! Request throttle configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Fixed-window request throttle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether the throttle middleware is installed.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Maximum admitted requests per client per window.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Window length in seconds.
    #[serde(default = "default_window")]
    pub window_seconds: u64,
    /// Use the first `X-Forwarded-For` hop as the client key.
    ///
    /// Only enable behind a trusted reverse proxy.
    #[serde(default)]
    pub trust_forwarded_for: bool,
    /// How often stale counters are swept, in seconds (0 disables the sweeper).
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl RateLimitConfig {
    /// Window length as a `Duration`.
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }

    /// Sweep interval, `None` when the sweeper is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_seconds > 0).then(|| Duration::from_secs(self.sweep_interval_seconds))
    }

    /// Reject limits that would block every request.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.enabled && (self.limit == 0 || self.window_seconds == 0) {
            return Err(AppError::configuration(
                "rate_limit.limit and rate_limit.window_seconds must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            limit: default_limit(),
            window_seconds: default_window(),
            trust_forwarded_for: false,
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_limit() -> u32 {
    100
}

fn default_window() -> u64 {
    60
}

fn default_sweep_interval() -> u64 {
    300
}
