//! Field parsers for leaderboard page text.

use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{AppError, Result};

/// Strict base-10 integer.
pub fn parse_int(text: &str) -> Result<i64> {
    text.parse::<i64>()
        .map_err(|e| AppError::parse("integer", text, e))
}

/// Strict decimal number.
pub fn parse_float(text: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|e| AppError::parse("float", text, e))
}

/// Elapsed time in seconds from `H:MM:SS`, `M:SS` or `Ss`.
///
/// The site picks the format by magnitude, so the component count decides
/// which units the leading parts carry.
pub fn parse_elapsed(text: &str) -> Result<i64> {
    let parts: Vec<&str> = text.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => ("0", *m, *s),
        [s] => ("0", "0", *s),
        _ => return Err(AppError::parse("elapsed_time", text, "too many components")),
    };
    let seconds = seconds.strip_suffix('s').unwrap_or(seconds);

    let component = |value: &str| {
        value
            .parse::<i64>()
            .map_err(|e| AppError::parse("elapsed_time", text, e))
    };
    Ok(component(hours)? * 3600 + component(minutes)? * 60 + component(seconds)?)
}

/// Whether the document is the last page of the leaderboard.
///
/// Either the second-to-last pagination item is `active` or the next-page
/// item is `disabled`.
// TODO: revisit whether both signals should be required once the
// pagination markup of a single-page leaderboard has been captured.
pub fn is_final_page(document: &Html, pagination_last: &Selector, next_page: &Selector) -> bool {
    has_class(document, pagination_last, "active") || has_class(document, next_page, "disabled")
}

/// Whether any element matching `selector` carries `class`.
pub fn has_class(document: &Html, selector: &Selector, class: &str) -> bool {
    document
        .select(selector)
        .any(|el| el.value().classes().any(|c| c == class))
}

/// Trimmed text content of an element.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of an element's children, leaving out child elements named `skip`.
///
/// Used for stat values whose unit is rendered in a nested `<abbr>`.
pub fn text_without(element: ElementRef<'_>, skip: &str) -> String {
    let mut out = String::new();
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() != skip => {
                if let Some(child) = ElementRef::wrap(child) {
                    out.extend(child.text());
                }
            }
            _ => {}
        }
    }
    out.trim().to_string()
}
