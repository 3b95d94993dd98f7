//! End-to-end pipeline: fetch → parse → extract (DOM + embedded data) →
//! filter → dedupe.

use mirror_common::Link;
use scraper::Html;
use std::borrow::Cow;
use std::sync::Arc;

use crate::dedupe::dedupe_by_url;
use crate::error::ScrapeError;
use crate::extract::{anchor_candidates, embedded_candidates};
use crate::fetch::PageFetcher;
use crate::filter::FilterPolicy;

/// Produces the mirrored link list for one source URL.
///
/// Holds no per-request state; one instance is shared by every request.
#[derive(Clone)]
pub struct Scraper {
    fetcher: Arc<dyn PageFetcher>,
    policy: FilterPolicy,
}

impl Scraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>, policy: FilterPolicy) -> Self {
        Self { fetcher, policy }
    }

    pub fn policy(&self) -> &FilterPolicy {
        &self.policy
    }

    /// Fetch `url` once and return its filtered, deduplicated links.
    ///
    /// Either the full list or an error comes back, never both. A non-2xx
    /// response is parsed like any other.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn scrape(&self, url: &str) -> Result<Vec<Link>, ScrapeError> {
        let page = self.fetcher.fetch(url).await?;
        let links = links_from_document(&page.body, &self.policy)?;
        tracing::info!(
            url,
            status = %page.status,
            body_len = page.body.len(),
            kept = links.len(),
            "scrape.done"
        );
        Ok(links)
    }
}

/// Run the offline part of the pipeline over a fetched body.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
/// rejected. A malformed embedded-data payload is logged and skipped; the
/// anchor results are still returned.
pub fn links_from_document(body: &[u8], policy: &FilterPolicy) -> Result<Vec<Link>, ScrapeError> {
    let text = String::from_utf8_lossy(body);
    if let Cow::Owned(_) = text {
        tracing::debug!(body_len = body.len(), "scrape.body_not_utf8");
    }
    let doc = Html::parse_document(&text);

    let mut candidates = anchor_candidates(&doc)?;
    let from_dom = candidates.len();

    match embedded_candidates(&doc) {
        Ok(found) => candidates.extend(found),
        Err(err) => tracing::warn!(error = %err, "scrape.embedded_data_skipped"),
    }
    tracing::debug!(
        from_dom,
        from_embedded = candidates.len() - from_dom,
        "scrape.candidates"
    );

    Ok(dedupe_by_url(policy.apply(candidates)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stray_latin1_byte_does_not_lose_links() {
        let mut html = br#"<html><body><a data-testid="LinkClickTriggerLink" href="https://zoom.us/j/1">Sess"#.to_vec();
        html.push(0xe3);
        html.extend_from_slice(b"o de hoje</a></body></html>");

        let links = links_from_document(&html, &FilterPolicy::all()).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://zoom.us/j/1");
        assert_eq!(links[0].text, "Sess\u{fffd}o de hoje");
    }

    #[test]
    fn empty_body_yields_no_links() {
        assert!(links_from_document(b"", &FilterPolicy::all()).unwrap().is_empty());
    }

    #[test]
    fn dom_results_precede_embedded_results() {
        let html = br#"<html><head>
            <script id="__NEXT_DATA__" type="application/json">
              {"links": [{"url": "https://youtu.be/v", "title": "Video"}]}
            </script></head><body>
            <a data-testid="LinkClickTriggerLink" href="https://zoom.us/j/1">Join</a>
            </body></html>"#;
        let links = links_from_document(html, &FilterPolicy::all()).unwrap();
        assert_eq!(
            links,
            vec![
                Link::new("Join", "https://zoom.us/j/1"),
                Link::new("Video", "https://youtu.be/v"),
            ]
        );
    }
}
