//! Category filter applied to every candidate link.
//!
//! Classification looks at the URL only, lowercased:
//!
//! | category       | rule                                          |
//! |----------------|-----------------------------------------------|
//! | conferencing   | contains `zoom`                               |
//! | video          | contains `youtube` or `youtu.be`              |
//! | document       | ends with `.pdf` or contains `drive.google.com` |
//!
//! A candidate is kept iff it matches at least one enabled category.

use mirror_common::{Category, Link};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPolicy {
    categories: BTreeSet<Category>,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::all()
    }
}

impl FilterPolicy {
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
        }
    }

    /// Conferencing, video and document links.
    pub fn all() -> Self {
        Self::new(Category::ALL)
    }

    /// Conferencing links only.
    pub fn conferencing_only() -> Self {
        Self::new([Category::Conferencing])
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().copied()
    }

    /// First enabled category `url` belongs to, in [`Category::ALL`] order.
    ///
    /// ```
    /// use mirror_common::Category;
    /// use mirror_web::filter::FilterPolicy;
    ///
    /// let policy = FilterPolicy::all();
    /// assert_eq!(policy.classify("https://YOUTU.BE/x"), Some(Category::Video));
    /// assert_eq!(policy.classify("https://example.com/notes.PDF"), Some(Category::Document));
    /// assert_eq!(policy.classify("https://example.com/"), None);
    /// ```
    pub fn classify(&self, url: &str) -> Option<Category> {
        let lower = url.to_lowercase();
        Category::ALL
            .into_iter()
            .filter(|c| self.categories.contains(c))
            .find(|c| matches(*c, &lower))
    }

    pub fn allows(&self, url: &str) -> bool {
        self.classify(url).is_some()
    }

    /// Drop every link the policy does not allow, keeping order.
    pub fn apply(&self, links: Vec<Link>) -> Vec<Link> {
        let before = links.len();
        let kept: Vec<Link> = links.into_iter().filter(|l| self.allows(&l.url)).collect();
        tracing::trace!(before, kept = kept.len(), "filter.applied");
        kept
    }
}

fn matches(category: Category, lower_url: &str) -> bool {
    match category {
        Category::Conferencing => lower_url.contains("zoom"),
        Category::Video => lower_url.contains("youtube") || lower_url.contains("youtu.be"),
        Category::Document => {
            lower_url.ends_with(".pdf") || lower_url.contains("drive.google.com")
        }
    }
}
