use mirror_http::HttpError;
use thiserror::Error;

/// Fatal failures of a single scrape. No partial link list accompanies them.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] HttpError),
    #[error("document could not be parsed: {0}")]
    Parse(String),
}

/// Failure of the embedded-data pass. Never escapes the pipeline: the DOM
/// results are still returned.
#[derive(Debug, Error)]
pub enum EmbeddedDataError {
    #[error("embedded data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid selector {selector}: {message}")]
    Selector {
        selector: &'static str,
        message: String,
    },
}
