// src/models/mod.rs

//! Domain models for the leaderboard client.

mod config;
mod leaderboard;
mod segment;
mod selectors;

// Re-export all public types
pub use config::{ClientConfig, Config, Credentials, LoggingConfig, MAX_PER_PAGE, MAX_QPS_LIMIT};
pub use leaderboard::{Athlete, Filter, Gender, Leaderboard, LeaderboardEntry};
pub use segment::{Segment, SegmentStats};
pub use selectors::PageSelectors;
