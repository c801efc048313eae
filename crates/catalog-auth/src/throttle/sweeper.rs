//! Periodic removal of elapsed throttle windows.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::time;

use super::FixedWindowThrottle;

/// Background task bounding the throttle's memory.
#[derive(Debug)]
pub struct ThrottleSweeper {
    throttle: Arc<FixedWindowThrottle>,
    interval: Duration,
}

impl ThrottleSweeper {
    /// Creates a sweeper for the given throttle.
    pub fn new(throttle: Arc<FixedWindowThrottle>, interval: Duration) -> Self {
        Self { throttle, interval }
    }

    /// Sweeps on every tick until `cancel` turns `true`.
    pub async fn run(self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Throttle sweeper started"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = self.throttle.sweep(Instant::now());
                    if removed > 0 {
                        tracing::debug!(
                            removed,
                            tracked = self.throttle.tracked_keys(),
                            "Swept elapsed throttle windows"
                        );
                    }
                }
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        tracing::info!("Throttle sweeper shutting down");
                        break;
                    }
                }
            }
        }
    }
}
