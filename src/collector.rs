//! Pagination driver and row accumulation.
//!
//! Pages are walked strictly in order, one request at a time:
//!
//! ```text
//! page 1 ─ fetch ─ extract ─ push ─ (delay) ─ page 2 ─ ... ─ page N
//!            │         │
//!            │         └─ no article blocks ─▶ stop (end of listing)
//!            └─ request failed ─▶ stop (rows so far are kept)
//! ```
//!
//! Sequence numbers are handed out by [`ArticleCollector`] and never reset
//! between pages.

use crate::models::{ArticleRow, ScrapedArticle};
use crate::scrapers::habr::extract_articles;
use crate::scrapers::{ListingConfig, PageSource};
use crate::utils::truncate_for_log;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};

/// Why pagination ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every configured page was processed.
    Exhausted,
    /// This page had no article blocks.
    EmptyPage(u32),
    /// Fetching this page failed.
    FetchFailed(u32),
}

/// Everything one pagination run produced.
#[derive(Debug)]
pub struct Harvest {
    pub rows: Vec<ArticleRow>,
    /// Pages that yielded at least one article.
    pub pages_processed: u32,
    pub stop: StopReason,
}

/// Ordered row collection with run-wide sequence numbering.
#[derive(Debug, Default)]
pub struct ArticleCollector {
    rows: Vec<ArticleRow>,
}

impl ArticleCollector {
    /// Append one page's articles, numbering them from `len() + 1`.
    ///
    /// Returns the cumulative row count.
    pub fn push_page(&mut self, articles: Vec<ScrapedArticle>) -> usize {
        for article in articles {
            let sequence = self.rows.len() + 1;
            self.rows.push(article.into_row(sequence));
        }
        self.rows.len()
    }

    pub fn into_rows(self) -> Vec<ArticleRow> {
        self.rows
    }
}

/// Walk listing pages `1..=config.pages` and collect every article.
///
/// A fetch failure is logged and ends pagination; it is not returned as an
/// error because the rows gathered so far are still worth exporting.
#[instrument(level = "info", skip_all, fields(pages = config.pages, hub = %config.hub))]
pub async fn collect_listing<S: PageSource>(source: &S, config: &ListingConfig) -> Harvest {
    let origin = config.origin();
    let mut collector = ArticleCollector::default();
    let mut pages_processed = 0;
    let mut stop = StopReason::Exhausted;

    for page in 1..=config.pages {
        if page > 1 && !config.delay.is_zero() {
            sleep(config.delay).await;
        }

        let url = source.page_url(page);
        info!(page, %url, "Processing listing page");

        let html = match source.fetch_page(page).await {
            Ok(html) => html,
            Err(e) => {
                error!(page, %url, error = %e, "Listing request failed; stopping pagination");
                stop = StopReason::FetchFailed(page);
                break;
            }
        };

        let articles = extract_articles(&html, &origin);
        if articles.is_empty() {
            info!(page, "No articles found on page; stopping pagination");
            debug!(body = %truncate_for_log(&html, 300), "Empty listing page body");
            stop = StopReason::EmptyPage(page);
            break;
        }

        let found = articles.len();
        let total = collector.push_page(articles);
        pages_processed += 1;
        info!(page, found, total, "Listing page processed");
    }

    Harvest {
        rows: collector.into_rows(),
        pages_processed,
        stop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarvestError;
    use crate::models::{DATE_NOT_FOUND, LINK_NOT_FOUND, TITLE_NOT_FOUND};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::time::Duration;
    use url::Url;

    /// Canned pages keyed by number; unknown pages come back empty.
    #[derive(Default)]
    struct FakeSource {
        pages: HashMap<u32, Result<String, String>>,
        requested: RefCell<Vec<u32>>,
    }

    impl FakeSource {
        fn with_page(mut self, page: u32, titles: &[&str]) -> Self {
            let blocks: String = titles
                .iter()
                .map(|t| {
                    format!(
                        r#"<article class="tm-articles-list__item">
                             <h2 class="tm-title"><a class="tm-title__link" href="/ru/articles/{t}/">{t}</a></h2>
                             <span class="tm-votes-meter__value">+1</span>
                           </article>"#
                    )
                })
                .collect();
            self.pages
                .insert(page, Ok(format!("<html><body>{blocks}</body></html>")));
            self
        }

        fn with_raw(mut self, page: u32, html: &str) -> Self {
            self.pages.insert(page, Ok(html.to_string()));
            self
        }

        fn with_failure(mut self, page: u32) -> Self {
            self.pages.insert(page, Err("HTTP status server error (503)".to_string()));
            self
        }
    }

    impl PageSource for FakeSource {
        fn page_url(&self, page: u32) -> String {
            format!("https://habr.com/ru/hubs/python/articles/page{page}")
        }

        async fn fetch_page(&self, page: u32) -> Result<String, HarvestError> {
            self.requested.borrow_mut().push(page);
            match self.pages.get(&page) {
                Some(Ok(html)) => Ok(html.clone()),
                Some(Err(msg)) => Err(HarvestError::fetch(self.page_url(page), msg.clone())),
                None => Ok("<html><body></body></html>".to_string()),
            }
        }
    }

    fn config(pages: u32) -> ListingConfig {
        ListingConfig {
            base: Url::parse("https://habr.com").unwrap(),
            locale: "ru".to_string(),
            hub: "python".to_string(),
            pages,
            delay: Duration::ZERO,
            user_agent: "test-agent".to_string(),
        }
    }

    fn scraped(title: &str) -> ScrapedArticle {
        ScrapedArticle {
            title: title.to_string(),
            link: LINK_NOT_FOUND.to_string(),
            publication_time: DATE_NOT_FOUND.to_string(),
            score: 0,
        }
    }

    #[test]
    fn test_push_page_numbers_across_pages() {
        let mut collector = ArticleCollector::default();
        assert_eq!(collector.push_page(vec![scraped("a"), scraped("b")]), 2);
        assert_eq!(collector.push_page(vec![scraped("c")]), 3);

        let rows = collector.into_rows();
        let sequences: Vec<_> = rows.iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, [1, 2, 3]);
        assert_eq!(rows[2].title, "c");
    }

    #[test]
    fn test_push_empty_page_changes_nothing() {
        let mut collector = ArticleCollector::default();
        collector.push_page(vec![scraped("a")]);
        assert_eq!(collector.push_page(Vec::new()), 1);
    }

    #[tokio::test]
    async fn test_sequences_contiguous_over_all_pages() {
        let source = FakeSource::default()
            .with_page(1, &["a", "b", "c"])
            .with_page(2, &["d", "e"])
            .with_page(3, &["f"]);

        let harvest = collect_listing(&source, &config(3)).await;

        assert_eq!(harvest.stop, StopReason::Exhausted);
        assert_eq!(harvest.pages_processed, 3);
        let sequences: Vec<_> = harvest.rows.iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, [1, 2, 3, 4, 5, 6]);
        let titles: Vec<_> = harvest.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c", "d", "e", "f"]);
        assert_eq!(harvest.rows[3].link, "https://habr.com/ru/articles/d/");
        assert_eq!(harvest.rows[3].score, 1);
    }

    #[tokio::test]
    async fn test_empty_page_stops_pagination() {
        let source = FakeSource::default()
            .with_page(1, &["a", "b"])
            .with_raw(2, "<html><body><p>Здесь пока нет ни одной публикации</p></body></html>")
            .with_page(3, &["never"]);

        let harvest = collect_listing(&source, &config(10)).await;

        assert_eq!(harvest.stop, StopReason::EmptyPage(2));
        assert_eq!(harvest.pages_processed, 1);
        assert_eq!(harvest.rows.len(), 2);
        assert_eq!(*source.requested.borrow(), [1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_earlier_rows() {
        let source = FakeSource::default()
            .with_page(1, &["a"])
            .with_page(2, &["b", "c"])
            .with_failure(3)
            .with_page(4, &["never"]);

        let harvest = collect_listing(&source, &config(10)).await;

        assert_eq!(harvest.stop, StopReason::FetchFailed(3));
        assert_eq!(harvest.pages_processed, 2);
        assert_eq!(harvest.rows.len(), 3);
        assert_eq!(harvest.rows[2].sequence, 3);
        assert_eq!(*source.requested.borrow(), [1, 2, 3]);
    }

    #[tokio::test]
    async fn test_first_page_failure_yields_nothing() {
        let source = FakeSource::default().with_failure(1);

        let harvest = collect_listing(&source, &config(10)).await;

        assert_eq!(harvest.stop, StopReason::FetchFailed(1));
        assert!(harvest.rows.is_empty());
        assert_eq!(harvest.pages_processed, 0);
    }

    #[tokio::test]
    async fn test_block_without_fields_still_numbered() {
        let source = FakeSource::default().with_raw(
            1,
            r#"<article class="tm-articles-list__item"></article>
               <article class="tm-articles-list__item"></article>"#,
        );

        let harvest = collect_listing(&source, &config(1)).await;

        assert_eq!(harvest.rows.len(), 2);
        let last = &harvest.rows[1];
        assert_eq!(last.sequence, 2);
        assert_eq!(last.title, TITLE_NOT_FOUND);
        assert_eq!(last.link, LINK_NOT_FOUND);
        assert_eq!(last.publication_time, DATE_NOT_FOUND);
        assert_eq!(last.score, 0);
    }

    #[tokio::test]
    async fn test_page_limit_respected() {
        let source = FakeSource::default()
            .with_page(1, &["a"])
            .with_page(2, &["b"])
            .with_page(3, &["c"]);

        let harvest = collect_listing(&source, &config(2)).await;

        assert_eq!(harvest.stop, StopReason::Exhausted);
        assert_eq!(harvest.rows.len(), 2);
        assert_eq!(*source.requested.borrow(), [1, 2]);
    }
}
