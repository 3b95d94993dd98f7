//! Web front for the link mirror.
//!
//! Wires configuration into a [`Scraper`] and serves:
//!
//! - `GET /` — index of mirrored page identifiers
//! - `GET /{id}` — filtered links scraped live from the page's source
//! - `GET /static/*` — files from `server.static_dir`
//!
//! Unknown identifiers are 404; any scrape failure is a 500 with a generic
//! body, the cause goes to the log.

pub mod cli;
pub mod render;
pub mod server;

use mirror_common::{MirrorError, Result};
use mirror_config::MirrorConfig;
use mirror_web::fetch::HttpFetcher;
use mirror_web::filter::FilterPolicy;
use mirror_web::Scraper;
use std::sync::Arc;
use std::time::Duration;

pub use server::{AppState, router, serve, serve_with_shutdown};

/// Path prefix reserved for static files; cannot be used as a page id.
const RESERVED_ID: &str = "static";

/// Build the shared request context from a loaded configuration.
pub fn build_state(cfg: &MirrorConfig) -> Result<AppState> {
    let registry = cfg
        .registry()
        .map_err(|e| MirrorError::Config(e.to_string()))?;
    if registry.resolve(RESERVED_ID).is_some() {
        return Err(MirrorError::Config(format!(
            "page id {RESERVED_ID:?} is reserved for static files"
        )));
    }

    let fetcher = HttpFetcher::with_settings(
        &cfg.fetch.user_agent,
        Duration::from_secs(cfg.fetch.timeout_secs),
    )
    .map_err(|e| MirrorError::Config(format!("http client: {e}")))?;
    let policy = FilterPolicy::new(cfg.filter.categories());

    Ok(AppState::new(registry, Scraper::new(Arc::new(fetcher), policy)))
}
