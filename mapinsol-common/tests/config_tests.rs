//! Configuration resolution tests
//!
//! Environment-mutating tests are marked #[serial] so they do not race.

use mapinsol_common::config::{
    apply_env_overrides, load_toml_config, ConfigResolver, TomlConfig,
    ENV_CMS_BASE_URL, ENV_LOG_LEVEL, ENV_PORT,
};
use mapinsol_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;

fn clear_env() {
    env::remove_var(ENV_CMS_BASE_URL);
    env::remove_var(ENV_PORT);
    env::remove_var(ENV_LOG_LEVEL);
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn test_load_full_toml() {
    let file = write_config(
        r#"
cms_base_url = "http://cms.local/wp-json/wp/v2"
port = 7000
request_timeout_secs = 5

[logging]
level = "debug"

[revalidate]
practices_secs = 10
taxonomies_secs = 20
media_secs = 30
"#,
    );

    let config = load_toml_config(file.path()).unwrap();
    assert_eq!(config.cms_base_url, "http://cms.local/wp-json/wp/v2");
    assert_eq!(config.port, 7000);
    assert_eq!(config.request_timeout_secs, 5);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.revalidate.practices_secs, 10);
    assert_eq!(config.revalidate.taxonomies_secs, 20);
    assert_eq!(config.revalidate.media_secs, 30);
}

#[test]
fn test_malformed_toml_is_config_error() {
    let file = write_config("port = \"not a number\"\n");
    let result = load_toml_config(file.path());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_missing_explicit_file_falls_back_to_defaults() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let resolver = ConfigResolver::new(Some(dir.path().join("absent.toml")));

    let config = resolver.resolve().unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    clear_env();
    let file = write_config("cms_base_url = \"http://from-toml/wp-json/wp/v2\"\nport = 7001\n");

    env::set_var(ENV_CMS_BASE_URL, "http://from-env/wp-json/wp/v2");
    env::set_var(ENV_LOG_LEVEL, "WARN");

    let config = ConfigResolver::new(Some(file.path().to_path_buf()))
        .resolve()
        .unwrap();
    clear_env();

    assert_eq!(config.cms_base_url, "http://from-env/wp-json/wp/v2");
    assert_eq!(config.port, 7001);
    assert_eq!(config.logging.level, "warn");
}

#[test]
#[serial]
fn test_invalid_port_env_is_rejected() {
    clear_env();
    env::set_var(ENV_PORT, "eighty");

    let mut config = TomlConfig::default();
    let result = apply_env_overrides(&mut config);
    clear_env();

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_resolved_config_is_validated() {
    clear_env();
    let file = write_config("cms_base_url = \"cms.local\"\n");

    let result = ConfigResolver::new(Some(file.path().to_path_buf())).resolve();
    assert!(matches!(result, Err(Error::Config(_))));
}
