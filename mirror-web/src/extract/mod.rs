//! Candidate extraction.
//!
//! Two independent passes run over the same parsed document and their
//! results are concatenated, DOM first:
//!
//! - [`dom`]: anchors carrying the link-button marker attribute
//! - [`embedded`]: `{ "url", "title" }` objects inside the page's embedded
//!   client-state JSON
//!
//! Neither pass filters; that is the job of [`crate::filter`].

pub mod dom;
pub mod embedded;

pub use dom::anchor_candidates;
pub use embedded::embedded_candidates;

/// Anchors rendered as link buttons on the source pages.
pub const LINK_MARKER_SELECTOR: &str = "a[data-testid='LinkClickTriggerLink']";

/// Script element holding the client-side rendering state.
pub const EMBEDDED_DATA_SELECTOR: &str = "#__NEXT_DATA__";
