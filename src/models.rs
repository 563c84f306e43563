//! Data models for scraped listing entries and exported rows.
//!
//! - [`ScrapedArticle`]: the four fields pulled out of one article block
//! - [`ArticleRow`]: a scraped article stamped with its run-wide sequence number
//!
//! Missing data never shows up as an empty field. Each extractor substitutes
//! one of the sentinel constants below (or a zero score) instead.

use serde::{Deserialize, Serialize};

/// Title used when an article block has no heading link.
pub const TITLE_NOT_FOUND: &str = "Заголовок не найден";
/// Link used when an article block has no heading link (or it lacks `href`).
pub const LINK_NOT_FOUND: &str = "Ссылка не найдена";
/// Publication time used when an article block has no `<time>` element.
pub const DATE_NOT_FOUND: &str = "Дата не найдена";

/// Fields extracted from a single article block, before sequencing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedArticle {
    pub title: String,
    pub link: String,
    pub publication_time: String,
    pub score: i64,
}

impl ScrapedArticle {
    /// Attach the 1-based sequence number assigned by the collector.
    pub fn into_row(self, sequence: usize) -> ArticleRow {
        ArticleRow {
            sequence,
            title: self.title,
            publication_time: self.publication_time,
            link: self.link,
            score: self.score,
        }
    }
}

/// One exported record.
///
/// Field order matches the spreadsheet column order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRow {
    /// Running 1-based index across every page of the run.
    pub sequence: usize,
    /// Article headline, or [`TITLE_NOT_FOUND`].
    pub title: String,
    /// `HH:MM, DD.MM.YYYY`, the raw displayed text, or [`DATE_NOT_FOUND`].
    pub publication_time: String,
    /// Absolute article URL, or [`LINK_NOT_FOUND`].
    pub link: String,
    /// Vote balance; zero when missing or unparsable.
    pub score: i64,
}
