//! Habr hub listing extraction.
//!
//! A listing page repeats one `article.tm-articles-list__item` block per
//! article summary. Inside each block:
//!
//! | Field | Selector | Fallback |
//! |-------|----------|----------|
//! | title, link | `h2.tm-title a.tm-title__link` | sentinel strings |
//! | publication time | `time` (its `datetime` attribute) | displayed text, then sentinel |
//! | score | `span.tm-votes-meter__value` | `0` |
//!
//! Each field is extracted independently, so a broken score never costs us
//! the title and vice versa.

use crate::models::{DATE_NOT_FOUND, LINK_NOT_FOUND, ScrapedArticle, TITLE_NOT_FOUND};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

static ARTICLE_BLOCK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article.tm-articles-list__item").unwrap());
static TITLE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2.tm-title a.tm-title__link").unwrap());
static TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());
static SCORE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.tm-votes-meter__value").unwrap());

/// Display format for publication timestamps.
const TIME_FORMAT: &str = "%H:%M, %d.%m.%Y";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Extract every article block on a listing page, in document order.
///
/// An empty result means the page carried no articles at all, which the
/// pagination loop treats as the end of the listing.
///
/// # Arguments
///
/// * `html` - Raw body of one listing page
/// * `origin` - Scheme and host prefixed onto site-relative links
pub fn extract_articles(html: &str, origin: &str) -> Vec<ScrapedArticle> {
    let document = Html::parse_document(html);
    document
        .select(&ARTICLE_BLOCK)
        .map(|block| extract_article(block, origin))
        .collect()
}

fn extract_article(block: ElementRef<'_>, origin: &str) -> ScrapedArticle {
    let (title, link) = extract_title_link(block, origin);
    let publication_time = extract_publication_time(block, &title);
    let score = extract_score(block);
    ScrapedArticle {
        title,
        link,
        publication_time,
        score,
    }
}

/// Title and absolute link from the block's heading anchor.
///
/// Without the anchor both fields get their sentinels. An anchor missing
/// `href` keeps its title.
pub fn extract_title_link(block: ElementRef<'_>, origin: &str) -> (String, String) {
    match block.select(&TITLE_LINK).next() {
        Some(anchor) => {
            let title = stripped_text(anchor);
            let link = anchor
                .value()
                .attr("href")
                .map(|href| absolute_link(href, origin))
                .unwrap_or_else(|| LINK_NOT_FOUND.to_string());
            (title, link)
        }
        None => (TITLE_NOT_FOUND.to_string(), LINK_NOT_FOUND.to_string()),
    }
}

/// Publication time as `HH:MM, DD.MM.YYYY`.
///
/// Falls back to the element's displayed text when `datetime` is missing or
/// unparsable (the latter logs a warning naming `title`), and to
/// [`DATE_NOT_FOUND`] when the block has no `<time>` at all.
pub fn extract_publication_time(block: ElementRef<'_>, title: &str) -> String {
    let Some(time) = block.select(&TIME).next() else {
        return DATE_NOT_FOUND.to_string();
    };
    let shown = stripped_text(time);

    match time.value().attr("datetime") {
        Some(raw) if !raw.is_empty() => match format_timestamp(raw) {
            Some(formatted) => formatted,
            None => {
                warn!(
                    value = raw,
                    title,
                    fallback = %shown,
                    "Unrecognised publication timestamp; using displayed text"
                );
                shown
            }
        },
        _ => shown,
    }
}

/// Signed vote balance, or `0` when the element is missing or unparsable.
pub fn extract_score(block: ElementRef<'_>) -> i64 {
    block
        .select(&SCORE)
        .next()
        .map(|el| parse_score(&stripped_text(el)))
        .unwrap_or(0)
}

/// Parse a vote counter such as `+42` or `-7`.
///
/// Every `+`/`-` is dropped before parsing; the sign comes from a leading `-`.
pub fn parse_score(text: &str) -> i64 {
    let magnitude = match text.replace(['+', '-'], "").trim().parse::<i64>() {
        Ok(v) => v,
        Err(_) => return 0,
    };
    if text.starts_with('-') {
        -magnitude
    } else {
        magnitude
    }
}

/// Reformat an ISO-8601 timestamp to [`TIME_FORMAT`], keeping its own offset.
///
/// A trailing `Z` counts as UTC. Timestamps without an offset are taken as
/// is, and a bare date reads as midnight.
pub fn format_timestamp(raw: &str) -> Option<String> {
    let normalized = match raw.strip_suffix('Z') {
        Some(stem) => format!("{stem}+00:00"),
        None => raw.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.format(TIME_FORMAT).to_string());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, fmt) {
            return Some(dt.format(TIME_FORMAT).to_string());
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Some(dt.format(TIME_FORMAT).to_string());
        }
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.format(TIME_FORMAT).to_string())
}

/// Prefix site-relative paths with `origin`; anything else passes through.
pub fn absolute_link(href: &str, origin: &str) -> String {
    if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        href.to_string()
    }
}

/// Element text with each text node trimmed and the pieces concatenated.
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}
