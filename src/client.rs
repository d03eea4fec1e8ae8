// src/client.rs

//! Client facade for segment and leaderboard retrieval.

use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, Credentials, Filter, Gender, Leaderboard, Segment};
use crate::services::{
    HttpSegmentApi, LeaderboardPage, PageFetcher, PageSource, RateLimiter, SegmentApi,
    Selectors, Session, auth, reconcile,
};
use crate::utils::http::{HttpTransport, Transport};
use crate::utils::url::leaderboard_url;

/// Retrieves segments and leaderboards for a logged in user.
///
/// Requests are throttled to the configured rate across API and page
/// fetches combined, and counted by [`Client::request_count`]. Every
/// operation takes `&mut self`: a client serves one caller at a time.
pub struct Client {
    session: Session,
    api: Option<Box<dyn SegmentApi>>,
    selectors: Selectors,
    base_url: Url,
    per_page: u32,
}

impl Client {
    /// Log in and return a throttled client.
    ///
    /// The typed API is only available when `credentials` carry an access
    /// token.
    pub async fn login(config: &Config, credentials: &Credentials) -> Result<Self> {
        config.validate()?;

        let transport = HttpTransport::from_config(&config.client)?;
        let base_url = Url::parse(&config.client.base_url)?;
        auth::login(&transport, &base_url, credentials).await?;

        let limiter = RateLimiter::new(config.client.qps_limit);
        let mut client = Self::new(Box::new(transport), limiter, config)?;
        if let Some(token) = credentials.access_token.as_deref().filter(|t| !t.is_empty()) {
            client.api = Some(Box::new(HttpSegmentApi::new(&config.client, token)?));
        }
        Ok(client)
    }

    /// Build a client over an already authenticated transport.
    pub fn new(transport: Box<dyn Transport>, limiter: RateLimiter, config: &Config) -> Result<Self> {
        Ok(Self {
            session: Session::new(transport, limiter),
            api: None,
            selectors: Selectors::compile(&config.selectors)?,
            base_url: Url::parse(&config.client.base_url)?,
            per_page: config.client.per_page,
        })
    }

    /// Unthrottled client over any transport, e.g. one serving canned pages.
    pub fn with_transport(transport: Box<dyn Transport>, config: &Config) -> Result<Self> {
        Self::new(transport, RateLimiter::unlimited(), config)
    }

    /// Use `api` for [`Client::get_segment`].
    pub fn with_api(mut self, api: Box<dyn SegmentApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Requests issued so far, API calls included.
    pub fn request_count(&self) -> u64 {
        self.session.request_count()
    }

    /// Leaderboard URL without a page number.
    pub fn leaderboard_url(&self, segment_id: i64, gender: Gender, filter: Filter) -> String {
        leaderboard_url(self.base_url.as_str(), segment_id, gender, filter, self.per_page)
    }

    /// Segment details from the typed API.
    pub async fn get_segment(&mut self, segment_id: i64) -> Result<Segment> {
        let api = self
            .api
            .as_ref()
            .ok_or_else(|| AppError::config("segment lookup requires an API access token"))?;
        self.session.throttle().await;
        let segment = api.segment(segment_id).await?;
        Ok(segment.into_segment(segment_id))
    }

    /// Every page of a leaderboard.
    pub async fn get_leaderboard(
        &mut self,
        segment_id: i64,
        gender: Gender,
        filter: Filter,
    ) -> Result<Leaderboard> {
        let (leaderboard, _) = self.walk(segment_id, gender, filter, false).await?;
        Ok(leaderboard)
    }

    /// Every page of a leaderboard, with segment details scraped from page 1.
    pub async fn get_leaderboard_and_segment(
        &mut self,
        segment_id: i64,
        gender: Gender,
        filter: Filter,
    ) -> Result<(Leaderboard, Segment)> {
        let (leaderboard, segment) = self.walk(segment_id, gender, filter, true).await?;
        Ok((leaderboard, required(segment)?))
    }

    /// A single leaderboard page.
    pub async fn get_leaderboard_page(
        &mut self,
        segment_id: i64,
        gender: Gender,
        filter: Filter,
        page: u32,
    ) -> Result<Leaderboard> {
        let page = self.single(segment_id, gender, filter, page, false).await?;
        Ok(page.leaderboard)
    }

    /// A single leaderboard page, with segment details.
    pub async fn get_leaderboard_page_and_segment(
        &mut self,
        segment_id: i64,
        gender: Gender,
        filter: Filter,
        page: u32,
    ) -> Result<(Leaderboard, Segment)> {
        let page = self.single(segment_id, gender, filter, page, true).await?;
        Ok((page.leaderboard, required(page.segment)?))
    }

    async fn walk(
        &mut self,
        segment_id: i64,
        gender: Gender,
        filter: Filter,
        include_segment: bool,
    ) -> Result<(Leaderboard, Option<Segment>)> {
        let mut fetcher = self.fetcher(segment_id, gender, filter);
        reconcile(&mut fetcher, include_segment).await
    }

    async fn single(
        &mut self,
        segment_id: i64,
        gender: Gender,
        filter: Filter,
        page: u32,
        include_segment: bool,
    ) -> Result<LeaderboardPage> {
        if page == 0 {
            return Err(AppError::validation("leaderboard pages are numbered from 1"));
        }
        let mut fetcher = self.fetcher(segment_id, gender, filter);
        fetcher.fetch_page(page, include_segment).await
    }

    fn fetcher(&mut self, segment_id: i64, gender: Gender, filter: Filter) -> PageFetcher<'_> {
        let url = self.leaderboard_url(segment_id, gender, filter);
        PageFetcher::new(&mut self.session, &self.selectors, &self.base_url, url, gender)
    }
}

fn required(segment: Option<Segment>) -> Result<Segment> {
    segment.ok_or_else(|| AppError::missing("segment"))
}
