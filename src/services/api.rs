//! Typed API lookups.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{ClientConfig, Segment, SegmentStats};
use crate::utils::http::create_async_client;

/// Segment as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSegment {
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    pub distance: f64,
    pub elevation_low: f64,
    pub elevation_high: f64,
    #[serde(default)]
    pub total_elevation_gain: f64,
}

impl ApiSegment {
    /// Map into a [`Segment`], applying the same gain and grade rules as
    /// the scraped heading.
    pub fn into_segment(self, id: i64) -> Segment {
        let location = [self.city, self.state]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let stats = SegmentStats {
            distance_meters: self.distance,
            elevation_low: self.elevation_low,
            elevation_high: self.elevation_high,
            elevation_gain: self.total_elevation_gain,
        };
        Segment::new(id, self.name, location, stats)
    }
}

/// Segment lookup against the typed API.
#[async_trait]
pub trait SegmentApi: Send + Sync {
    async fn segment(&self, id: i64) -> Result<ApiSegment>;
}

/// [`SegmentApi`] over HTTP with a bearer access token.
pub struct HttpSegmentApi {
    client: Client,
    base_url: String,
    access_token: String,
}

impl HttpSegmentApi {
    pub fn new(config: &ClientConfig, access_token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }
}

#[async_trait]
impl SegmentApi for HttpSegmentApi {
    async fn segment(&self, id: i64) -> Result<ApiSegment> {
        let url = format!("{}/segments/{}", self.base_url, id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| AppError::fetch(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Api(format!("segment {id}: HTTP {status}")));
        }
        response
            .json::<ApiSegment>()
            .await
            .map_err(|e| AppError::Api(format!("segment {id}: {e}")))
    }
}
