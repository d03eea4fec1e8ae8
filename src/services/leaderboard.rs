//! Leaderboard reconciliation across pages.
//!
//! Pages are fetched one after another starting at page 1. Each page's
//! entries are appended in fetch order and its claimed total replaces the
//! running one, since athletes may upload or delete activities while the
//! walk is in progress. The walk ends after the first page that is empty or
//! marked as the last one by the pagination control.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Leaderboard, Segment};

/// One parsed leaderboard page.
#[derive(Debug, Clone)]
pub struct LeaderboardPage {
    pub leaderboard: Leaderboard,
    pub segment: Option<Segment>,
    pub is_final: bool,
}

/// Source of numbered leaderboard pages.
#[async_trait]
pub trait PageSource: Send {
    async fn fetch_page(&mut self, page: u32, include_segment: bool) -> Result<LeaderboardPage>;
}

/// Walk every page of a leaderboard and merge the results.
///
/// The segment, when requested, comes from page 1. Any error aborts the walk
/// and nothing fetched so far is returned.
pub async fn reconcile<S>(
    source: &mut S,
    include_segment: bool,
) -> Result<(Leaderboard, Option<Segment>)>
where
    S: PageSource + ?Sized,
{
    let first = source.fetch_page(1, include_segment).await?;
    let mut leaderboard = first.leaderboard;
    let segment = first.segment;
    let mut is_final = first.is_final;
    let mut page = 1;

    while !is_final {
        page += 1;
        let next = source.fetch_page(page, false).await?;
        is_final = next.is_final;
        leaderboard.merge(next.leaderboard);
    }

    log::info!(
        "Fetched {} entries over {} pages ({} claimed)",
        leaderboard.len(),
        page,
        leaderboard.entries_count
    );
    Ok((leaderboard, segment))
}
