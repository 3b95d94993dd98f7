use mirror_common::Link;
use scraper::{Html, Selector};

use super::LINK_MARKER_SELECTOR;
use crate::error::ScrapeError;

/// Collect `{text, href}` from every marked anchor, in document order.
///
/// Anchors with a missing or empty `href`, or with no visible text after
/// trimming, are skipped.
pub fn anchor_candidates(doc: &Html) -> Result<Vec<Link>, ScrapeError> {
    let selector = Selector::parse(LINK_MARKER_SELECTOR)
        .map_err(|e| ScrapeError::Parse(format!("selector {LINK_MARKER_SELECTOR}: {e}")))?;

    let links = doc
        .select(&selector)
        .filter_map(|el| {
            let href = el.value().attr("href").filter(|h| !h.is_empty())?;
            let text: String = el.text().collect();
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(Link::new(text, href))
        })
        .collect();
    Ok(links)
}
