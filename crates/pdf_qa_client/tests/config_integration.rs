//! Integration tests for config load/save and base-URL resolution.

use pdf_qa_client::{config, Config};
use predicates::prelude::*;

#[test]
fn load_existing_yaml_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        r#"
server:
  base_url: "http://qa.example.com:8000"
"#,
    )
    .unwrap();

    let cfg = config::load(&config_path).expect("load should succeed");
    assert_eq!(
        cfg.server.base_url.as_deref(),
        Some("http://qa.example.com:8000")
    );
}

#[test]
fn load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = config::load(&dir.path().join("nope.yaml"));
    assert!(result.is_err());
}

#[test]
fn save_creates_directory_and_file_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("pdf-qa");
    let config_path = config_dir.join("config.yaml");
    assert!(!config_dir.exists(), "config dir should not exist yet");

    let mut config = Config::default();
    config.server.base_url = Some("http://localhost:8001".into());

    config::save(&config_path, &config).expect("save should succeed");
    let pred = predicates::path::exists();
    assert!(
        pred.eval(&config_path),
        "config file should exist after save"
    );
    assert!(config_dir.exists(), "config directory should be created");
}

#[test]
fn round_trip_preserves_schema() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        r#"
server:
  base_url: "http://qa.example.com:8000"
"#,
    )
    .unwrap();

    let loaded = config::load(&config_path).expect("load should succeed");
    config::save(&config_path, &loaded).expect("save should succeed");

    let contents = std::fs::read_to_string(&config_path).unwrap();
    let pred = predicates::str::contains("server:");
    assert!(pred.eval(&contents), "saved file should contain server section");
    let pred = predicates::str::contains("base_url");
    assert!(pred.eval(&contents), "saved file should contain base_url");

    let reloaded = config::load(&config_path).expect("reload should succeed");
    assert_eq!(reloaded.server.base_url, loaded.server.base_url);
}

/// Config path resolves to `~/.pdf-qa/config.yaml` using the current
/// platform's home dir. We override the HOME env var to a temp dir to verify
/// the resolution.
#[test]
fn default_config_path_uses_home_directory() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().to_str().unwrap().to_string();

    let key = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    let original = std::env::var(key).ok();

    std::env::set_var(key, &home);
    let path = config::default_config_path();
    match original {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }

    let path = path.expect("should resolve a config path");
    let expected = dir.path().join(".pdf-qa").join("config.yaml");
    assert_eq!(path, expected);
}

/// Base-URL resolution order: env var, then config file, then the default.
/// Kept in one test because it mutates the env var.
#[test]
fn resolve_base_url_prefers_env_then_config_then_default() {
    let original = std::env::var(config::BASE_URL_ENV).ok();
    std::env::remove_var(config::BASE_URL_ENV);

    let empty = Config::default();
    assert_eq!(config::resolve_base_url(&empty), config::DEFAULT_BASE_URL);

    let mut from_file = Config::default();
    from_file.server.base_url = Some("http://qa.example.com:8000".into());
    assert_eq!(
        config::resolve_base_url(&from_file),
        "http://qa.example.com:8000"
    );

    std::env::set_var(config::BASE_URL_ENV, "http://override:9999");
    assert_eq!(config::resolve_base_url(&from_file), "http://override:9999");

    match original {
        Some(v) => std::env::set_var(config::BASE_URL_ENV, v),
        None => std::env::remove_var(config::BASE_URL_ENV),
    }
}
