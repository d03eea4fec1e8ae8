//! Service layer for the leaderboard client.
//!
//! This module contains the business logic for:
//! - Request throttling (`RateLimiter`)
//! - Field parsing (`parse`)
//! - Page fetching and parsing (`PageFetcher`)
//! - Reconciling pages into one leaderboard (`reconcile`)
//! - Login and typed API lookups

pub mod api;
pub mod auth;
pub mod leaderboard;
pub mod page;
pub mod parse;
mod rate_limiter;
mod session;

#[cfg(test)]
pub(crate) mod fixtures;

pub use api::{ApiSegment, HttpSegmentApi, SegmentApi};
pub use leaderboard::{LeaderboardPage, PageSource, reconcile};
pub use page::{PageFetcher, Selectors};
pub use rate_limiter::RateLimiter;
pub use session::Session;
