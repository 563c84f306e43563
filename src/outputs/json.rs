//! JSON copy of the exported rows.
//!
//! Written only when `--json-output` is given. The file holds a single
//! pretty-printed array of [`ArticleRow`] objects in sequence order:
//!
//! ```text
//! [
//!   { "sequence": 1, "title": "...", "publication_time": "...", "link": "...", "score": 42 },
//!   ...
//! ]
//! ```

use crate::error::HarvestError;
use crate::models::ArticleRow;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize `rows` to `path`, creating parent directories as needed.
///
/// Returns `Ok(false)` without writing anything when `rows` is empty.
#[instrument(level = "info", skip(rows), fields(rows = rows.len()))]
pub async fn write_rows(rows: &[ArticleRow], path: &str) -> Result<bool, HarvestError> {
    if rows.is_empty() {
        info!("No rows to export; JSON not written");
        return Ok(false);
    }

    let json = serde_json::to_string_pretty(rows).map_err(|e| HarvestError::save(path, e))?;

    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| HarvestError::save(path, e))?;
    }
    fs::write(path, json)
        .await
        .map_err(|e| HarvestError::save(path, e))?;

    info!(%path, "Wrote JSON rows");
    Ok(true)
}
