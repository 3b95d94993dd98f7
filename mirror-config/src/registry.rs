use config::ConfigError;
use std::collections::BTreeMap;
use url::Url;

/// Read-only mapping from short page identifiers to source page URLs.
///
/// Built once at startup from [`MirrorConfig::pages`](crate::MirrorConfig)
/// and shared by reference afterwards; there is no way to mutate it.
#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
    pages: BTreeMap<String, String>,
}

impl PageRegistry {
    /// Validate and freeze a page table.
    ///
    /// Identifiers must be non-empty and must not contain `/` (they are used
    /// as a single path segment). Source URLs must be absolute http(s) URLs.
    ///
    /// ```
    /// use mirror_config::PageRegistry;
    ///
    /// let registry = PageRegistry::from_pages([
    ///     ("demo".to_string(), "https://linktr.ee/demo".to_string()),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(registry.resolve("demo"), Some("https://linktr.ee/demo"));
    /// assert_eq!(registry.resolve("other"), None);
    /// ```
    pub fn from_pages<I>(pages: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut out = BTreeMap::new();
        for (id, source) in pages {
            if id.is_empty() || id.contains('/') {
                return Err(ConfigError::Message(format!(
                    "invalid page id {id:?}: must be a non-empty path segment"
                )));
            }
            let url = Url::parse(&source).map_err(|e| {
                ConfigError::Message(format!("page {id:?} has invalid source url {source:?}: {e}"))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Message(format!(
                    "page {id:?} source must be http(s), got {}",
                    url.scheme()
                )));
            }
            out.insert(id, source);
        }
        Ok(Self { pages: out })
    }

    /// Source URL for `id`, if it is whitelisted.
    pub fn resolve(&self, id: &str) -> Option<&str> {
        self.pages.get(id).map(String::as_str)
    }

    /// `(id, source_url)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pages.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
