//! Common types and utilities shared across Mirror crates.
//!
//! This crate defines the link record every other crate passes around, the
//! link categories used by the filter policy, observability helpers, and the
//! shared error type used by the binary. It stays dependency-light so that
//! every crate in the workspace can depend on it.
//!
//! # Overview
//!
//! - [`Link`]: one mirrored outbound link (visible text + target URL)
//! - [`Category`]: the link-purpose classes a mirror may keep
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`MirrorError`] and [`Result`]: shared error handling
//!
//! # Examples
//!
//! ```rust
//! use mirror_common::{Category, Link};
//!
//! let link = Link::new("Join", "https://zoom.us/j/123");
//! assert_eq!(link.url, "https://zoom.us/j/123");
//! assert_eq!(Category::ALL.len(), 3);
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod observability;

/// A single outbound link kept by a mirror.
///
/// Two links are duplicates iff their `url` fields are byte-equal; `text` is
/// never consulted for identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Visible text, already trimmed.
    pub text: String,
    /// Target URL exactly as found in the source page.
    pub url: String,
}

impl Link {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// Link-purpose classes recognised by the filter policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Video-conference links (zoom).
    Conferencing,
    /// Video-hosting links (youtube, youtu.be).
    Video,
    /// Documents (pdf files, Google Drive).
    Document,
}

impl Category {
    /// Every category, in classification order.
    pub const ALL: [Category; 3] = [Category::Conferencing, Category::Video, Category::Document];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Conferencing => "conferencing",
            Category::Video => "video",
            Category::Document => "document",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error types used by the Mirror binary and its startup path.
#[derive(thiserror::Error, Debug)]
pub enum MirrorError {
    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The web server failed to bind or stopped unexpectedly.
    #[error("Server error: {0}")]
    Server(String),
}

/// Convenient alias for results that use [`MirrorError`].
pub type Result<T> = std::result::Result<T, MirrorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_uses_snake_case_names() {
        let json = serde_json::to_string(&Category::ALL).unwrap();
        assert_eq!(json, r#"["conferencing","video","document"]"#);

        let back: Category = serde_json::from_str(r#""document""#).unwrap();
        assert_eq!(back, Category::Document);
    }

    #[test]
    fn links_compare_by_both_fields() {
        let a = Link::new("Join", "https://zoom.us/j/1");
        let b = Link::new("Other", "https://zoom.us/j/1");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
