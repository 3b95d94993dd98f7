//! Link mirroring core: fetch a source page, extract candidate links, keep
//! the ones the filter policy allows, drop duplicate URLs.
//!
//! - Page fetching seam and `reqwest`-backed implementation (`fetch`)
//! - Candidate extraction from marked anchors and embedded JSON (`extract`)
//! - Category filter policy (`filter`) and URL dedupe (`dedupe`)
//! - The end-to-end pipeline (`scrape`)
//!
//! ```
//! use mirror_web::filter::FilterPolicy;
//! use mirror_web::scrape::links_from_document;
//!
//! let html = br#"<a data-testid="LinkClickTriggerLink" href="https://zoom.us/j/123">Join</a>"#;
//! let links = links_from_document(html, &FilterPolicy::all()).unwrap();
//! assert_eq!(links[0].text, "Join");
//! ```

pub mod dedupe;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod scrape;

pub use error::{EmbeddedDataError, ScrapeError};
pub use scrape::Scraper;
