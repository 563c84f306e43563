//! Listing page retrieval and article extraction.
//!
//! Scraping follows a two-phase pattern per page:
//!
//! 1. **Fetching**: a [`PageSource`] returns the raw HTML for page `n`
//! 2. **Extraction**: [`habr::extract_articles`] turns that HTML into
//!    [`ScrapedArticle`](crate::models::ScrapedArticle)s
//!
//! [`HabrClient`] is the network-backed source. Anything else implementing
//! [`PageSource`] (canned HTML in tests, for instance) can drive the same
//! pagination loop.

pub mod habr;

use crate::error::HarvestError;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Where and how to walk the hub listing.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Site root, e.g. `https://habr.com`.
    pub base: Url,
    pub locale: String,
    pub hub: String,
    /// Upper bound on pages requested; pagination may stop earlier.
    pub pages: u32,
    /// Pause inserted between consecutive pages.
    pub delay: Duration,
    pub user_agent: String,
}

impl ListingConfig {
    /// Listing URL for 1-based page `page`.
    pub fn page_url(&self, page: u32) -> String {
        format!(
            "{}/{}/hubs/{}/articles/page{}",
            self.base.as_str().trim_end_matches('/'),
            self.locale,
            self.hub,
            page
        )
    }

    /// Scheme and host prefixed onto site-relative article links.
    pub fn origin(&self) -> String {
        self.base.origin().ascii_serialization()
    }
}

/// Something that can hand back the HTML of a listing page.
pub trait PageSource {
    /// URL that page `page` is (or would be) fetched from, for reporting.
    fn page_url(&self, page: u32) -> String;

    /// Return the body of page `page`, or a [`HarvestError::Fetch`].
    async fn fetch_page(&self, page: u32) -> Result<String, HarvestError>;
}

/// Network-backed [`PageSource`] issuing one GET per page.
///
/// No retries: a transport error or non-success status is returned as is.
#[derive(Debug)]
pub struct HabrClient {
    client: reqwest::Client,
    config: ListingConfig,
}

impl HabrClient {
    pub fn new(config: ListingConfig) -> Result<Self, HarvestError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| HarvestError::Config(format!("HTTP client: {e}")))?;
        Ok(Self { client, config })
    }
}

impl PageSource for HabrClient {
    fn page_url(&self, page: u32) -> String {
        self.config.page_url(page)
    }

    #[instrument(level = "info", skip(self))]
    async fn fetch_page(&self, page: u32) -> Result<String, HarvestError> {
        let url = self.config.page_url(page);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| HarvestError::fetch(&url, e))?;
        let body = response
            .text()
            .await
            .map_err(|e| HarvestError::fetch(&url, e))?;
        debug!(%url, bytes = body.len(), "Fetched listing page");
        Ok(body)
    }
}
