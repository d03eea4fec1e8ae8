// src/models/leaderboard.rs

//! Leaderboard records and the query enums used to request them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Gender of the athletes on a leaderboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Value of the `gender` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            Gender::Unspecified => "",
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" | "unspecified" => Ok(Gender::Unspecified),
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            other => Err(AppError::validation(format!("unknown gender '{other}'"))),
        }
    }
}

/// Time window applied to a leaderboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    Overall,
    CurrentYear,
}

impl Filter {
    /// Value of the `filter` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            Filter::Overall => "overall",
            Filter::CurrentYear => "current_year",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for Filter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "overall" => Ok(Filter::Overall),
            "current_year" | "this_year" | "year" => Ok(Filter::CurrentYear),
            other => Err(AppError::validation(format!("unknown filter '{other}'"))),
        }
    }
}

/// An athlete as shown on a leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Athlete {
    /// Absolute profile URL
    pub url: String,

    /// Display name
    pub name: String,

    /// Taken from the query, the page does not expose it per row
    pub gender: Gender,
}

/// Best effort on a segment by a particular athlete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub athlete: Athlete,
    pub effort_id: i64,
    pub start_date: NaiveDate,
    #[serde(rename = "elapsed_time")]
    pub elapsed_time_seconds: i64,
}

/// Entries in rank order as fetched.
///
/// `entries.len()` need not equal `entries_count`: the count is whatever the
/// most recently fetched page claimed, and athletes may add or remove
/// activities while pages are being fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub entries_count: i64,
}

impl Leaderboard {
    /// Append another page, taking its claimed count as the current total.
    pub fn merge(&mut self, page: Leaderboard) {
        self.entries.extend(page.entries);
        self.entries_count = page.entries_count;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
