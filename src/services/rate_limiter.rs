//! Fixed-rate request throttling.

use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior, interval};

/// Hands out one permit per tick at a fixed rate, with no burst.
///
/// The interval is created on first use so a limiter can be built outside
/// of a runtime.
#[derive(Debug)]
pub struct RateLimiter {
    period: Option<Duration>,
    ticker: Option<Interval>,
}

impl RateLimiter {
    /// Limit to `per_second` permits per second. Zero disables limiting.
    ///
    /// The period never drops below one nanosecond.
    pub fn new(per_second: u32) -> Self {
        if per_second == 0 {
            return Self::unlimited();
        }
        Self {
            period: Some((Duration::from_secs(1) / per_second).max(Duration::from_nanos(1))),
            ticker: None,
        }
    }

    /// A limiter whose `acquire` returns immediately.
    pub fn unlimited() -> Self {
        Self {
            period: None,
            ticker: None,
        }
    }

    pub fn is_limited(&self) -> bool {
        self.period.is_some()
    }

    /// Wait for the next permit.
    pub async fn acquire(&mut self) {
        let Some(period) = self.period else {
            return;
        };
        let ticker = self.ticker.get_or_insert_with(|| {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
        ticker.tick().await;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::unlimited()
    }
}
