//! Failure kinds surfaced by the harvest run.
//!
//! Only three things can go wrong in a way worth reporting: bad runtime
//! configuration, a page that could not be fetched, and an output file that
//! could not be written. Field-level extraction problems are never errors;
//! the extractors fall back to sentinel values instead.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum HarvestError {
    /// Invalid CLI or environment input, detected before any request.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Transport failure or non-success HTTP status for a listing page.
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The spreadsheet or JSON output could not be persisted.
    #[error("failed to save {path}: {source}")]
    Save {
        path: String,
        #[source]
        source: BoxError,
    },
}

impl HarvestError {
    pub fn fetch(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Fetch {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn save(path: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Save {
            path: path.into(),
            source: source.into(),
        }
    }
}
