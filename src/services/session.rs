//! Authenticated session state shared by every outbound request.

use crate::error::Result;
use crate::services::RateLimiter;
use crate::utils::http::Transport;

/// Transport, throttle and request counter of one client.
///
/// Every request goes through [`Session::throttle`], so API lookups and page
/// fetches share one rate budget.
pub struct Session {
    transport: Box<dyn Transport>,
    limiter: RateLimiter,
    request_count: u64,
}

impl Session {
    pub fn new(transport: Box<dyn Transport>, limiter: RateLimiter) -> Self {
        Self {
            transport,
            limiter,
            request_count: 0,
        }
    }

    /// Requests issued so far, API calls included.
    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    /// Wait for a permit and count the request about to be made.
    pub async fn throttle(&mut self) {
        self.limiter.acquire().await;
        self.request_count += 1;
    }

    /// Throttled GET returning the response body.
    pub async fn get(&mut self, url: &str) -> Result<String> {
        self.throttle().await;
        log::debug!("GET {url}");
        self.transport.get(url).await
    }
}
