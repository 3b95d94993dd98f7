//! Loader for the mirror configuration with YAML + environment overlays.
//!
//! Sources are merged in the order they are added, later sources winning.
//! `MIRROR__SECTION__KEY` environment variables are always consulted last, so
//! they override every file (for example `MIRROR__SERVER__PORT=9000`). String values may reference the
//! environment as `${VAR}`; expansion is applied after merging and is
//! repeated up to a fixed depth so that variables may reference each other.
//!
//! Every section is optional. An empty document yields the built-in page
//! list, port 8080 and the full filter policy.
use config::{Config, ConfigError, Environment, File};
use mirror_common::Category;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

mod registry;

pub use registry::PageRegistry;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Pages mirrored when the configuration does not list any.
pub const DEFAULT_PAGE_IDS: [&str; 4] = [
    "balanceclassturma06",
    "balanceclassturma07",
    "balanceclassturma08",
    "corridaguiada",
];

const LINKTREE_BASE: &str = "https://linktr.ee/";

#[derive(Debug, Clone, Deserialize)]
pub struct MirrorConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    /// Identifier → source page URL.
    #[serde(default = "default_pages")]
    pub pages: BTreeMap<String, String>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            fetch: FetchConfig::default(),
            filter: FilterConfig::default(),
            pages: default_pages(),
        }
    }
}

impl MirrorConfig {
    /// Validate the `pages` table and freeze it into a [`PageRegistry`].
    pub fn registry(&self) -> Result<PageRegistry, ConfigError> {
        PageRegistry::from_pages(self.pages.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served under `/static/`.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Named category sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPreset {
    /// Conferencing, video and document links.
    #[default]
    All,
    /// Conferencing links only.
    Conferencing,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub preset: FilterPreset,
    /// Explicit category list; overrides `preset` when present.
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
}

impl FilterConfig {
    /// The categories a mirror keeps, resolved from `categories` or `preset`.
    pub fn categories(&self) -> Vec<Category> {
        match (&self.categories, self.preset) {
            (Some(list), _) => list.clone(),
            (None, FilterPreset::All) => Category::ALL.to_vec(),
            (None, FilterPreset::Conferencing) => vec![Category::Conferencing],
        }
    }
}

fn default_pages() -> BTreeMap<String, String> {
    DEFAULT_PAGE_IDS
        .iter()
        .map(|id| (id.to_string(), format!("{LINKTREE_BASE}{id}")))
        .collect()
}
fn default_bind() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}
fn default_static_dir() -> String {
    "static".into()
}
fn default_user_agent() -> String {
    mirror_http::DEFAULT_USER_AGENT.into()
}
fn default_timeout_secs() -> u64 {
    mirror_http::DEFAULT_TIMEOUT.as_secs()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

fn validate(cfg: &MirrorConfig) -> Result<(), ConfigError> {
    if cfg.filter.categories().is_empty() {
        return Err(ConfigError::Message(
            "filter.categories must list at least one category".into(),
        ));
    }
    if cfg.fetch.timeout_secs == 0 {
        return Err(ConfigError::Message(
            "fetch.timeout_secs must be greater than zero".into(),
        ));
    }
    if cfg.fetch.user_agent.trim().is_empty() {
        return Err(ConfigError::Message("fetch.user_agent must not be empty".into()));
    }
    Ok(())
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct MirrorConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for MirrorConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl MirrorConfigLoader {
    /// Start with no sources; `MIRROR__` env overrides are applied on top of
    /// everything else in [`load`](Self::load).
    ///
    /// ```
    /// use mirror_config::MirrorConfigLoader;
    ///
    /// let config = MirrorConfigLoader::new()
    ///     .with_yaml_str("server:\n  port: 9090")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.server.port, 9090);
    /// assert_eq!(config.pages.len(), 4);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Like [`with_file`](Self::with_file) but a missing file is skipped, so
    /// deployments can rely purely on the environment.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use mirror_common::Category;
    /// use mirror_config::MirrorConfigLoader;
    ///
    /// let cfg = MirrorConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// filter:
    ///   preset: conferencing
    /// pages:
    ///   demo: "https://linktr.ee/demo"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.filter.categories(), vec![Category::Conferencing]);
    /// assert_eq!(cfg.pages["demo"], "https://linktr.ee/demo");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// ```
    /// use mirror_config::MirrorConfigLoader;
    ///
    /// unsafe { std::env::set_var("MIRROR_DOC_PAGE", "https://linktr.ee/from-env"); }
    ///
    /// let config = MirrorConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// pages:
    ///   env-page: "${MIRROR_DOC_PAGE}"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.pages["env-page"], "https://linktr.ee/from-env");
    ///
    /// unsafe { std::env::remove_var("MIRROR_DOC_PAGE"); }
    /// ```
    pub fn load(self) -> Result<MirrorConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("MIRROR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: MirrorConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        validate(&typed)?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("FOO", Some("bar"), || {
            let mut v = json!("prefix-${FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("CITY", Some("Winston")), ("STATE", Some("NC"))], || {
            let mut v = json!([
                "hello-$CITY",
                { "loc": "${CITY}-${STATE}" },
                42,
                true,
                null
            ]);
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!(["hello-Winston", { "loc": "Winston-NC" }, 42, true, null])
            );
        });
    }

    #[test]
    fn stops_on_cycles() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${DOES_NOT_EXIST}"));
    }

    #[test]
    fn explicit_categories_override_preset() {
        let f = FilterConfig {
            preset: FilterPreset::Conferencing,
            categories: Some(vec![Category::Video, Category::Document]),
        };
        assert_eq!(f.categories(), vec![Category::Video, Category::Document]);
    }

    #[test]
    fn default_filter_is_every_category() {
        assert_eq!(FilterConfig::default().categories(), Category::ALL.to_vec());
    }

    #[test]
    fn default_pages_point_at_linktree() {
        let cfg = MirrorConfig::default();
        assert_eq!(
            cfg.pages["corridaguiada"],
            "https://linktr.ee/corridaguiada"
        );
        assert_eq!(cfg.pages.len(), DEFAULT_PAGE_IDS.len());
    }

    #[test]
    fn rejects_empty_category_list() {
        let mut cfg = MirrorConfig::default();
        cfg.filter.categories = Some(vec![]);
        assert!(validate(&cfg).is_err());
    }
}
