//! Canned leaderboard pages and a stub transport for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{Segment, SegmentStats};
use crate::utils::http::Transport;

pub const SEGMENT_ID: i64 = 2198806;

/// Pagination markup at the bottom of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// No pagination control at all
    None,
    /// Current page is the first of several
    Middle,
    /// Current page is the last one, next is disabled
    Last,
}

/// One leaderboard row.
#[derive(Debug, Clone)]
pub struct Row {
    rank: String,
    effort_id: i64,
    date: String,
    elapsed: String,
    athlete_link: bool,
    effort_href: Option<String>,
}

impl Row {
    pub fn new(rank: i64, effort_id: i64) -> Self {
        Self {
            rank: rank.to_string(),
            effort_id,
            date: "Jun 1, 2017".into(),
            elapsed: "5:30".into(),
            athlete_link: true,
            effort_href: None,
        }
    }

    pub fn rank(mut self, rank: &str) -> Self {
        self.rank = rank.into();
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.date = date.into();
        self
    }

    pub fn elapsed(mut self, elapsed: &str) -> Self {
        self.elapsed = elapsed.into();
        self
    }

    pub fn without_athlete_link(mut self) -> Self {
        self.athlete_link = false;
        self
    }

    pub fn effort_href(mut self, href: &str) -> Self {
        self.effort_href = Some(href.into());
        self
    }

    fn html(&self) -> String {
        let id = self.effort_id;
        let effort_href = self
            .effort_href
            .clone()
            .unwrap_or_else(|| format!("/segment_efforts/{id}"));
        let athlete = if self.athlete_link {
            format!(r#"<a href="/athletes/{id}">Athlete {id}</a>"#)
        } else {
            format!("Athlete {id}")
        };
        format!(
            r#"<tr>
  <td>{rank}</td>
  <td><div class="avatar"></div>{athlete}</td>
  <td><a href="{effort_href}">{date}</a></td>
  <td>21.3mi/h</td>
  <td>151bpm</td>
  <td>212W</td>
  <td>-</td>
  <td>{elapsed}</td>
</tr>"#,
            rank = self.rank,
            date = self.date,
            elapsed = self.elapsed,
        )
    }
}

/// The segment described by the canned page heading.
pub fn segment() -> Segment {
    Segment::new(
        SEGMENT_ID,
        "PCSD".into(),
        "Dixon, CA".into(),
        SegmentStats {
            distance_meters: 16.11 * 1000.0,
            elevation_low: 83.0,
            elevation_high: 96.0,
            elevation_gain: 13.0,
        },
    )
}

fn pagination(kind: Pagination) -> &'static str {
    match kind {
        Pagination::None => "",
        Pagination::Middle => {
            r#"<ul class="pagination">
  <li class="prev_page disabled"><span>&larr;</span></li>
  <li class="active"><span>1</span></li>
  <li><a href="?page=2">2</a></li>
  <li><a href="?page=3">3</a></li>
  <li class="next_page"><a href="?page=2">&rarr;</a></li>
</ul>"#
        }
        Pagination::Last => {
            r#"<ul class="pagination">
  <li class="prev_page"><a href="?page=1">&larr;</a></li>
  <li><a href="?page=1">1</a></li>
  <li class="active"><span>2</span></li>
  <li class="next_page disabled"><span>&rarr;</span></li>
</ul>"#
        }
    }
}

/// A full leaderboard page.
pub fn page(rows: &[Row], entries_count: i64, kind: Pagination) -> String {
    let rows: String = rows.iter().map(Row::html).collect::<Vec<_>>().join("\n");
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>PCSD | Strava Ride Segment in Dixon, CA</title></head>
<body>
<div class="segment-heading">
  <h1 class="segment-name">
    <span data-full-name="PCSD">PCSD</span>
    <button class="star" data-segment-id="{SEGMENT_ID}"></button>
  </h1>
  <div class="location"><strong>Ride</strong> Dixon, CA</div>
  <ul class="inline-stats">
    <li><div class="stat-text">16.11<abbr class="unit" title="kilometers">km</abbr></div></li>
    <li><div class="stat-text">0.1<abbr class="unit">%</abbr></div></li>
    <li><div class="stat-text">83<abbr class="unit" title="meters">m</abbr></div></li>
    <li><div class="stat-text">96<abbr class="unit" title="meters">m</abbr></div></li>
    <li><div class="stat-text">13<abbr class="unit" title="meters">m</abbr></div></li>
  </ul>
</div>
<div class="standing">1 <span class="slash">/</span> {entries_count}</div>
<table class="table-leaderboard">
<thead><tr><th>Rank</th><th>Name</th><th>Date</th><th>Speed</th><th>HR</th><th>Power</th><th>VAM</th><th>Time</th></tr></thead>
<tbody>
{rows}
</tbody>
</table>
{pagination}
</body>
</html>"#,
        pagination = pagination(kind),
    )
}

/// Consecutive pages holding `sizes[i]` rows each, ranked from 1.
pub fn pages(sizes: &[usize], entries_count: i64) -> Vec<String> {
    let mut rank = 0;
    sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| {
            let rows: Vec<Row> = (0..size)
                .map(|_| {
                    rank += 1;
                    Row::new(rank, 10_000 + rank)
                })
                .collect();
            let kind = if i + 1 == sizes.len() {
                Pagination::Last
            } else {
                Pagination::Middle
            };
            page(&rows, entries_count, kind)
        })
        .collect()
}

#[derive(Debug, Default)]
struct StubState {
    bodies: VecDeque<String>,
    requests: Vec<String>,
    forms: Vec<Vec<(String, String)>>,
}

/// Answers each request with the next queued body, whatever the URL.
///
/// Clones share state, so a test can keep one handle and give the other to
/// a client.
#[derive(Debug, Clone, Default)]
pub struct StubTransport {
    state: Arc<Mutex<StubState>>,
}

impl StubTransport {
    pub fn new(bodies: Vec<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StubState {
                bodies: bodies.into(),
                ..StubState::default()
            })),
        }
    }

    /// `METHOD URL` of every request made so far.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_form(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().forms.last().cloned().unwrap_or_default()
    }

    fn respond(&self, request: String) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        state
            .bodies
            .pop_front()
            .ok_or_else(|| AppError::fetch(request, "connection refused"))
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, url: &str) -> Result<String> {
        self.respond(format!("GET {url}"))
    }

    async fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<String> {
        self.state.lock().unwrap().forms.push(form.to_vec());
        self.respond(format!("POST {url}"))
    }
}
