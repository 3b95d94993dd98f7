use mirror_common::Category;
use mirror_config::{FilterPreset, MirrorConfigLoader};
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
server:
  port: 8181
  static_dir: "/srv/mirror/static"
fetch:
  timeout_secs: 4
filter:
  categories: [conferencing, document]
pages:
  turma: "https://linktr.ee/turma"
  race: "${MIRROR_TEST_RACE_URL}"
  "#;
    let p = write_yaml(&tmp, "mirror.yaml", file_yaml);

    temp_env::with_var(
        "MIRROR_TEST_RACE_URL",
        Some("https://linktr.ee/race"),
        || {
            let config = MirrorConfigLoader::new()
                .with_file(&p)
                .load()
                .expect("load mirror config");

            assert_eq!(config.server.port, 8181);
            assert_eq!(config.server.bind, "0.0.0.0");
            assert_eq!(config.server.static_dir, "/srv/mirror/static");
            assert_eq!(config.fetch.timeout_secs, 4);
            assert_eq!(
                config.filter.categories(),
                vec![Category::Conferencing, Category::Document]
            );
            assert_eq!(config.pages.len(), 2);

            let registry = config.registry().expect("valid registry");
            assert_eq!(registry.resolve("race"), Some("https://linktr.ee/race"));
            assert_eq!(registry.resolve("balanceclassturma06"), None);
        },
    );
}

#[test]
#[serial]
fn env_overrides_file() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "mirror.yaml", "server:\n  port: 8181\n");

    temp_env::with_vars(
        [
            ("MIRROR__SERVER__PORT", Some("9191")),
            ("MIRROR__FILTER__PRESET", Some("conferencing")),
        ],
        || {
            let config = MirrorConfigLoader::new()
                .with_file(&p)
                .load()
                .expect("load mirror config");
            assert_eq!(config.server.port, 9191);
            assert_eq!(config.filter.preset, FilterPreset::Conferencing);
            assert_eq!(config.filter.categories(), vec![Category::Conferencing]);
        },
    );
}

#[test]
#[serial]
fn env_wins_over_sources_added_after_it() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "mirror.yaml", "fetch:\n  timeout_secs: 3\n");

    temp_env::with_var("MIRROR__FETCH__TIMEOUT_SECS", Some("25"), || {
        let config = MirrorConfigLoader::new()
            .with_optional_file(&p)
            .with_yaml_str("fetch:\n  timeout_secs: 4\n")
            .load()
            .expect("load mirror config");
        assert_eq!(config.fetch.timeout_secs, 25);
    });
}

#[test]
#[serial]
fn missing_optional_file_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = MirrorConfigLoader::new()
        .with_optional_file(tmp.path().join("absent.yaml"))
        .load()
        .expect("defaults load");

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.fetch.timeout_secs, 10);
    assert_eq!(config.filter.categories(), Category::ALL.to_vec());
    assert_eq!(config.registry().unwrap().len(), 4);
}

#[test]
#[serial]
fn missing_required_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let result = MirrorConfigLoader::new()
        .with_file(tmp.path().join("absent.yaml"))
        .load();
    assert!(result.is_err());
}

#[test]
#[serial]
fn zero_timeout_is_rejected() {
    let result = MirrorConfigLoader::new()
        .with_yaml_str("fetch:\n  timeout_secs: 0\n")
        .load();
    assert!(result.is_err());
}

#[test]
#[serial]
fn unknown_category_is_rejected() {
    let result = MirrorConfigLoader::new()
        .with_yaml_str("filter:\n  categories: [podcasts]\n")
        .load();
    assert!(result.is_err());
}
