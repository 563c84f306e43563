//! # Habr Articles
//!
//! Walks the article listing of a Habr hub page by page, extracts each
//! article's title, link, publication time and score, and exports the rows
//! to a formatted XLSX spreadsheet.
//!
//! ## Usage
//!
//! ```sh
//! habr_articles                       # ten pages of the Python hub
//! habr_articles --hub rust --pages 3  # another hub, fewer pages
//! ```
//!
//! ## Architecture
//!
//! A single sequential pipeline:
//! 1. **Fetching**: one GET per listing page, no retries
//! 2. **Extraction**: article blocks to [`models::ScrapedArticle`], with per-field fallbacks
//! 3. **Accumulation**: rows numbered 1..N across all pages
//! 4. **Output**: the spreadsheet, plus an optional JSON copy
//!
//! Pagination stops at the page limit, on the first page without articles,
//! or on the first failed request. Whatever was collected is still exported.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod collector;
mod error;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use collector::collect_listing;
use outputs::{json, xlsx};
use scrapers::HabrClient;

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("habr_articles starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = args.listing_config()?;
    let client = HabrClient::new(config.clone())?;

    // ---- Walk the listing ----
    let harvest = collect_listing(&client, &config).await;
    let total = harvest.rows.len();
    info!(
        total,
        pages = harvest.pages_processed,
        stop = ?harvest.stop,
        "Pagination finished"
    );

    if harvest.rows.is_empty() {
        info!("No article data found to export");
        return Ok(());
    }

    // ---- Spreadsheet ----
    match xlsx::export_rows(&harvest.rows, &args.output, &args.sheet_name) {
        Ok(_) => info!(
            path = %args.output,
            total,
            pages = harvest.pages_processed,
            "Articles exported"
        ),
        Err(e) => error!(path = %args.output, error = %e, "Failed to save spreadsheet"),
    }

    // ---- Optional JSON copy ----
    if let Some(ref json_path) = args.json_output {
        if let Err(e) = json::write_rows(&harvest.rows, json_path).await {
            error!(path = %json_path, error = %e, "Failed to save JSON rows");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
