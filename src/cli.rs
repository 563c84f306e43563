//! Command-line interface definitions for the Habr hub exporter.
//!
//! Every option has a default, so running the binary bare fetches ten pages
//! of the Python hub and writes `habr_articles_10_pages.xlsx`. Each option
//! can also come from an environment variable.

use crate::error::HarvestError;
use crate::scrapers::ListingConfig;
use clap::Parser;
use std::time::Duration;
use url::Url;

/// Browser identity sent with every listing request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Command-line arguments for the exporter.
///
/// # Examples
///
/// ```sh
/// # Defaults: ten pages of the Python hub into habr_articles_10_pages.xlsx
/// habr_articles
///
/// # Three pages of the Rust hub, plus a JSON copy of the rows
/// habr_articles --hub rust --pages 3 -o rust.xlsx -j rust.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Site origin the listing pages live under
    #[arg(long, env = "HABR_BASE_URL", default_value = "https://habr.com")]
    pub base_url: String,

    /// Locale path segment
    #[arg(long, env = "HABR_LOCALE", default_value = "ru")]
    pub locale: String,

    /// Hub whose article listing is exported
    #[arg(long, env = "HABR_HUB", default_value = "python")]
    pub hub: String,

    /// Maximum number of listing pages to walk
    #[arg(long, env = "HABR_PAGES", default_value_t = 10)]
    pub pages: u32,

    /// Pause between consecutive page requests, in milliseconds
    #[arg(long, env = "HABR_DELAY_MS", default_value_t = 1000)]
    pub delay_ms: u64,

    /// User-Agent header sent with each request
    #[arg(long, env = "HABR_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Spreadsheet file to write
    #[arg(short, long, env = "HABR_OUTPUT", default_value = "habr_articles_10_pages.xlsx")]
    pub output: String,

    /// Name of the single worksheet
    #[arg(long, env = "HABR_SHEET_NAME", default_value = "Habr Python Articles")]
    pub sheet_name: String,

    /// Optional JSON file receiving the same rows
    #[arg(short, long, env = "HABR_JSON_OUTPUT")]
    pub json_output: Option<String>,
}

impl Cli {
    /// Validate the listing-related options.
    pub fn listing_config(&self) -> Result<ListingConfig, HarvestError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| HarvestError::Config(format!("base URL {:?}: {e}", self.base_url)))?;
        if base.cannot_be_a_base() || base.host_str().is_none() {
            return Err(HarvestError::Config(format!(
                "base URL {:?} has no host",
                self.base_url
            )));
        }
        if self.pages == 0 {
            return Err(HarvestError::Config("--pages must be at least 1".to_string()));
        }

        Ok(ListingConfig {
            base,
            locale: self.locale.trim_matches('/').to_string(),
            hub: self.hub.trim_matches('/').to_string(),
            pages: self.pages,
            delay: Duration::from_millis(self.delay_ms),
            user_agent: self.user_agent.clone(),
        })
    }
}
