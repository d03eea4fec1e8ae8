// src/models/segment.rs

//! Segment details.

use serde::{Deserialize, Serialize};

/// A fixed, named route over which efforts are timed.
///
/// Details scraped from the leaderboard page are less accurate than the ones
/// returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: i64,
    pub name: String,
    pub location: String,
    #[serde(rename = "distance")]
    pub distance_meters: f64,
    #[serde(rename = "average_grade")]
    pub average_grade_pct: f64,
    pub elevation_low: f64,
    pub elevation_high: f64,
    pub total_elevation_gain: f64,
}

/// Raw segment figures before the gain and grade are derived.
#[derive(Debug, Clone, Default)]
pub struct SegmentStats {
    pub distance_meters: f64,
    pub elevation_low: f64,
    pub elevation_high: f64,
    pub elevation_gain: f64,
}

impl Segment {
    /// Build a segment, deriving total gain and average grade.
    ///
    /// The reported gain is sometimes lower than the low/high delta, the
    /// larger of the two wins.
    pub fn new(id: i64, name: String, location: String, stats: SegmentStats) -> Self {
        let delta = stats.elevation_high - stats.elevation_low;
        let total_elevation_gain = stats.elevation_gain.max(delta);

        Self {
            id,
            name,
            location,
            distance_meters: stats.distance_meters,
            average_grade_pct: total_elevation_gain / stats.distance_meters * 100.0,
            elevation_low: stats.elevation_low,
            elevation_high: stats.elevation_high,
            total_elevation_gain,
        }
    }

    /// Distance in kilometers.
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }
}
