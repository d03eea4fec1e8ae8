//! Leaderboard page parsing and fetching.

use async_trait::async_trait;
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Athlete, Gender, Leaderboard, LeaderboardEntry, PageSelectors, Segment, SegmentStats};
use crate::services::leaderboard::{LeaderboardPage, PageSource};
use crate::services::parse::{
    is_final_page, parse_elapsed, parse_float, parse_int, text_of, text_without,
};
use crate::services::session::Session;
use crate::utils::resolve_url;
use crate::utils::url::{extract_effort_id, page_url};

const START_DATE_FORMAT: &str = "%b %d, %Y";

/// Column of the elapsed time within a leaderboard row.
const ELAPSED_COLUMN: usize = 7;

/// Compiled form of [`PageSelectors`].
#[derive(Debug, Clone)]
pub struct Selectors {
    segment_id: Selector,
    heading: Selector,
    segment_name: Selector,
    location: Selector,
    stat: Selector,
    standing: Selector,
    row: Selector,
    cell: Selector,
    link: Selector,
    pagination_last: Selector,
    next_page: Selector,
}

impl Selectors {
    pub fn compile(raw: &PageSelectors) -> Result<Self> {
        Ok(Self {
            segment_id: parse_selector(&raw.segment_id)?,
            heading: parse_selector(&raw.heading)?,
            segment_name: parse_selector(&raw.segment_name)?,
            location: parse_selector(&raw.location)?,
            stat: parse_selector(&raw.stat)?,
            standing: parse_selector(&raw.standing)?,
            row: parse_selector(&raw.row)?,
            cell: parse_selector(&raw.cell)?,
            link: parse_selector(&raw.link)?,
            pagination_last: parse_selector(&raw.pagination_last)?,
            next_page: parse_selector(&raw.next_page)?,
        })
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Parse one leaderboard page body.
pub fn parse_page(
    body: &str,
    gender: Gender,
    include_segment: bool,
    selectors: &Selectors,
    base_url: &Url,
) -> Result<LeaderboardPage> {
    let document = Html::parse_document(body);

    let segment = if include_segment {
        Some(parse_segment(&document, selectors)?)
    } else {
        None
    };
    let leaderboard = parse_leaderboard(&document, gender, selectors, base_url)?;

    // Looping until entries.len() == entries_count is not safe since the
    // count moves while fetching. An empty page always ends the walk.
    let is_final = leaderboard.is_empty()
        || is_final_page(&document, &selectors.pagination_last, &selectors.next_page);

    Ok(LeaderboardPage {
        leaderboard,
        segment,
        is_final,
    })
}

/// Parse segment details from the page heading.
pub fn parse_segment(document: &Html, selectors: &Selectors) -> Result<Segment> {
    let raw_id = document
        .select(&selectors.segment_id)
        .next()
        .and_then(|el| el.value().attr("data-segment-id"))
        .ok_or_else(|| AppError::missing("segment_id"))?;
    let id = parse_int(raw_id)?;

    let heading = document.select(&selectors.heading).next();
    let name = heading
        .and_then(|h| h.select(&selectors.segment_name).next())
        .and_then(|el| el.value().attr("data-full-name"))
        .ok_or_else(|| AppError::missing("segment_name"))?
        .to_string();
    let location = heading
        .and_then(|h| h.select(&selectors.location).next())
        .map(|el| text_without(el, "strong"))
        .unwrap_or_default();

    let values: Vec<ElementRef<'_>> = heading
        .map(|h| h.select(&selectors.stat).collect())
        .unwrap_or_default();
    let stat = |i: usize| -> Result<f64> {
        let el = values
            .get(i)
            .ok_or_else(|| AppError::missing(format!("segment_stat[{i}]")))?;
        parse_float(&text_without(*el, "abbr"))
    };

    let stats = SegmentStats {
        distance_meters: stat(0)? * 1000.0,
        elevation_low: stat(2)?,
        elevation_high: stat(3)?,
        elevation_gain: stat(4)?,
    };
    Ok(Segment::new(id, name, location, stats))
}

/// Parse the standings banner and every leaderboard row.
pub fn parse_leaderboard(
    document: &Html,
    gender: Gender,
    selectors: &Selectors,
    base_url: &Url,
) -> Result<Leaderboard> {
    let entries_count = parse_standing(document, selectors)?;

    let entries = document
        .select(&selectors.row)
        .map(|row| parse_row(row, gender, selectors, base_url))
        .collect::<Result<Vec<_>>>()?;

    Ok(Leaderboard {
        entries,
        entries_count,
    })
}

/// Total entries from the "X / Y" banner.
fn parse_standing(document: &Html, selectors: &Selectors) -> Result<i64> {
    let mut matches = document.select(&selectors.standing).peekable();
    if matches.peek().is_none() {
        return Err(AppError::missing("standing"));
    }
    let banner: String = matches.flat_map(|el| el.text()).collect();
    let total = banner.rsplit('/').next().unwrap_or_default().trim();
    parse_int(total).map_err(|_| AppError::parse("standing", banner.trim(), "expected 'X / Y'"))
}

fn parse_row(
    row: ElementRef<'_>,
    gender: Gender,
    selectors: &Selectors,
    base_url: &Url,
) -> Result<LeaderboardEntry> {
    let cells: Vec<ElementRef<'_>> = row.select(&selectors.cell).collect();
    let cell_text = |i: usize| cells.get(i).map(|c| text_of(*c)).unwrap_or_default();
    let cell_link = |i: usize| {
        cells
            .get(i)
            .and_then(|c| c.select(&selectors.link).next())
            .and_then(|a| a.value().attr("href"))
    };

    // The signed-in athlete's own row has no printed rank.
    let raw_rank = cell_text(0);
    let rank = if raw_rank.is_empty() {
        1
    } else {
        parse_int(&raw_rank).map_err(|_| AppError::parse("rank", &raw_rank, "not a number"))?
    };

    let athlete_href = cell_link(1).ok_or_else(|| AppError::missing("athlete_url"))?;
    let athlete = Athlete {
        url: resolve_url(base_url, athlete_href),
        name: cell_text(1),
        gender,
    };

    let raw_date = cell_text(2);
    let start_date = NaiveDate::parse_from_str(&raw_date, START_DATE_FORMAT)
        .map_err(|e| AppError::parse("start_date", &raw_date, e))?;

    let effort_href = cell_link(2).ok_or_else(|| AppError::missing("effort_id"))?;
    let raw_effort = extract_effort_id(effort_href)
        .ok_or_else(|| AppError::parse("effort_id", effort_href, "no effort id in link"))?;
    let effort_id = parse_int(raw_effort)?;

    let raw_elapsed = cell_text(ELAPSED_COLUMN);
    let elapsed_time_seconds = parse_elapsed(&raw_elapsed).unwrap_or_else(|e| {
        log::warn!("Effort {effort_id}: {e}, recording elapsed time as 0");
        0
    });

    Ok(LeaderboardEntry {
        rank,
        athlete,
        effort_id,
        start_date,
        elapsed_time_seconds,
    })
}

/// Fetches pages of one leaderboard through a [`Session`].
pub struct PageFetcher<'a> {
    session: &'a mut Session,
    selectors: &'a Selectors,
    base_url: &'a Url,
    url_base: String,
    gender: Gender,
}

impl<'a> PageFetcher<'a> {
    pub fn new(
        session: &'a mut Session,
        selectors: &'a Selectors,
        base_url: &'a Url,
        url_base: String,
        gender: Gender,
    ) -> Self {
        Self {
            session,
            selectors,
            base_url,
            url_base,
            gender,
        }
    }
}

#[async_trait]
impl<'a> PageSource for PageFetcher<'a> {
    async fn fetch_page(&mut self, page: u32, include_segment: bool) -> Result<LeaderboardPage> {
        let url = page_url(&self.url_base, page);
        let body = self.session.get(&url).await?;
        let parsed = parse_page(&body, self.gender, include_segment, self.selectors, self.base_url)?;

        log::debug!(
            "Page {}: {} entries of {} (final: {})",
            page,
            parsed.leaderboard.len(),
            parsed.leaderboard.entries_count,
            parsed.is_final
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{self, Row};

    fn selectors() -> Selectors {
        Selectors::compile(&PageSelectors::default()).unwrap()
    }

    fn base() -> Url {
        Url::parse("https://www.strava.com").unwrap()
    }

    fn parse(body: &str, include_segment: bool) -> Result<LeaderboardPage> {
        parse_page(body, Gender::Male, include_segment, &selectors(), &base())
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(parse_selector("[[invalid").is_err());
        let raw = PageSelectors {
            row: "tr:::".into(),
            ..PageSelectors::default()
        };
        assert!(matches!(Selectors::compile(&raw), Err(AppError::Selector { .. })));
    }

    #[test]
    fn test_parse_rows() {
        let rows = vec![Row::new(1, 1001), Row::new(2, 1002).elapsed("1:02:03")];
        let body = fixtures::page(&rows, 474, fixtures::Pagination::Middle);
        let page = parse(&body, false).unwrap();

        assert!(page.segment.is_none());
        assert!(!page.is_final);
        assert_eq!(page.leaderboard.entries_count, 474);
        assert_eq!(page.leaderboard.len(), 2);

        let second = &page.leaderboard.entries[1];
        assert_eq!(second.rank, 2);
        assert_eq!(second.effort_id, 1002);
        assert_eq!(second.elapsed_time_seconds, 3723);
        assert_eq!(second.athlete.url, "https://www.strava.com/athletes/1002");
        assert_eq!(second.athlete.name, "Athlete 1002");
        assert_eq!(second.athlete.gender, Gender::Male);
        assert_eq!(second.start_date, NaiveDate::from_ymd_opt(2017, 6, 1).unwrap());
    }

    #[test]
    fn test_blank_rank_defaults_to_one() {
        let rows = vec![Row::new(1, 1001).rank("")];
        let body = fixtures::page(&rows, 1, fixtures::Pagination::None);
        let page = parse(&body, false).unwrap();
        assert_eq!(page.leaderboard.entries[0].rank, 1);
    }

    #[test]
    fn test_unparsable_elapsed_keeps_row() {
        let rows = vec![Row::new(1, 1001).elapsed("--"), Row::new(2, 1002)];
        let body = fixtures::page(&rows, 2, fixtures::Pagination::Last);
        let page = parse(&body, false).unwrap();

        assert_eq!(page.leaderboard.len(), 2);
        assert_eq!(page.leaderboard.entries[0].elapsed_time_seconds, 0);
        assert_eq!(page.leaderboard.entries[1].elapsed_time_seconds, 330);
    }

    #[test]
    fn test_missing_athlete_link_fails_page() {
        let rows = vec![Row::new(1, 1001), Row::new(2, 1002).without_athlete_link()];
        let body = fixtures::page(&rows, 2, fixtures::Pagination::Last);
        let err = parse(&body, false).unwrap_err();
        assert!(matches!(err, AppError::Parse { ref field, .. } if field == "athlete_url"));
    }

    #[test]
    fn test_effort_link_with_trailing_text_fails_page() {
        let rows = vec![Row::new(1, 1001).effort_href("/segment_efforts/1001abc")];
        let body = fixtures::page(&rows, 1, fixtures::Pagination::None);
        let err = parse(&body, false).unwrap_err();
        assert!(matches!(err, AppError::Parse { ref field, .. } if field == "effort_id"));
    }

    #[test]
    fn test_bad_date_fails_page() {
        let rows = vec![Row::new(1, 1001).date("2017-06-01")];
        let body = fixtures::page(&rows, 1, fixtures::Pagination::None);
        let err = parse(&body, false).unwrap_err();
        assert!(matches!(err, AppError::Parse { ref field, .. } if field == "start_date"));
    }

    #[test]
    fn test_missing_standing_fails_page() {
        let body = fixtures::page(&[Row::new(1, 1001)], 1, fixtures::Pagination::None)
            .replace("class=\"standing\"", "class=\"rank-banner\"");
        let err = parse(&body, false).unwrap_err();
        assert!(matches!(err, AppError::Parse { ref field, .. } if field == "standing"));
    }

    #[test]
    fn test_empty_page_is_final() {
        let body = fixtures::page(&[], 474, fixtures::Pagination::Middle);
        let page = parse(&body, false).unwrap();
        assert!(page.is_final);
        assert_eq!(page.leaderboard.entries_count, 474);
    }

    #[test]
    fn test_parse_segment() {
        let body = fixtures::page(&[Row::new(1, 1001)], 1, fixtures::Pagination::None);
        let segment = parse(&body, true).unwrap().segment.unwrap();
        assert_eq!(segment, fixtures::segment());
    }

    #[test]
    fn test_segment_without_id_fails() {
        let body = fixtures::page(&[Row::new(1, 1001)], 1, fixtures::Pagination::None)
            .replace("data-segment-id", "data-other");
        let err = parse(&body, true).unwrap_err();
        assert!(matches!(err, AppError::Parse { ref field, .. } if field == "segment_id"));
        // Segment details are ignored when not requested.
        assert!(parse(&body, false).is_ok());
    }
}
