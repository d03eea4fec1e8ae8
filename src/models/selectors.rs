// src/models/selectors.rs

//! CSS selectors for scraping a segment leaderboard page.

use serde::{Deserialize, Serialize};

/// CSS selectors for scraping a segment leaderboard page.
///
/// Defaults match the live markup. They are configurable so a layout change
/// on the site can be absorbed without a rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSelectors {
    /// Element carrying the `data-segment-id` attribute
    #[serde(default = "defaults::segment_id")]
    pub segment_id: String,

    /// Container for the segment name, location and stats
    #[serde(default = "defaults::heading")]
    pub heading: String,

    /// Element carrying the `data-full-name` attribute, within the heading
    #[serde(default = "defaults::segment_name")]
    pub segment_name: String,

    /// Location text within the heading
    #[serde(default = "defaults::location")]
    pub location: String,

    /// Stat values within the heading (distance, _, low, high, gain)
    #[serde(default = "defaults::stat")]
    pub stat: String,

    /// The "X / Y" standings banner
    #[serde(default = "defaults::standing")]
    pub standing: String,

    /// Each leaderboard row
    #[serde(default = "defaults::row")]
    pub row: String,

    /// Cells within a row
    #[serde(default = "defaults::cell")]
    pub cell: String,

    /// Links within a cell
    #[serde(default = "defaults::link")]
    pub link: String,

    /// Second-to-last pagination item, `active` on the last page
    #[serde(default = "defaults::pagination_last")]
    pub pagination_last: String,

    /// Next-page pagination item, `disabled` on the last page
    #[serde(default = "defaults::next_page")]
    pub next_page: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            segment_id: defaults::segment_id(),
            heading: defaults::heading(),
            segment_name: defaults::segment_name(),
            location: defaults::location(),
            stat: defaults::stat(),
            standing: defaults::standing(),
            row: defaults::row(),
            cell: defaults::cell(),
            link: defaults::link(),
            pagination_last: defaults::pagination_last(),
            next_page: defaults::next_page(),
        }
    }
}

mod defaults {
    pub fn segment_id() -> String {
        ".segment-name button".into()
    }
    pub fn heading() -> String {
        ".segment-heading".into()
    }
    pub fn segment_name() -> String {
        ".segment-name span[data-full-name]".into()
    }
    pub fn location() -> String {
        ".location".into()
    }
    pub fn stat() -> String {
        ".stat-text".into()
    }
    pub fn standing() -> String {
        ".standing".into()
    }
    pub fn row() -> String {
        ".table-leaderboard tbody tr".into()
    }
    pub fn cell() -> String {
        "td".into()
    }
    pub fn link() -> String {
        "a".into()
    }
    pub fn pagination_last() -> String {
        ".pagination li:nth-last-child(2)".into()
    }
    pub fn next_page() -> String {
        ".pagination li.next_page".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let selectors: PageSelectors = toml::from_str(r#"row = "table.results tr""#).unwrap();
        assert_eq!(selectors.row, "table.results tr");
        assert_eq!(selectors.standing, ".standing");
    }
}
