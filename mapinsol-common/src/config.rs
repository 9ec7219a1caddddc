//! Configuration loading for Mapinsol services
//!
//! Settings are resolved in this priority order:
//! 1. Command-line arguments (applied by the binary on top of the result here)
//! 2. Environment variables (`MAPINSOL_*`)
//! 3. TOML configuration file
//! 4. Compiled defaults
//!
//! A missing TOML file is not an error: a warning is logged and the compiled
//! defaults are used. A TOML file that exists but cannot be parsed is.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default WordPress REST root for the foundation's CMS
pub const DEFAULT_CMS_BASE_URL: &str = "https://fundacionpadrinosdelavejez.es/wp-json/wp/v2";

/// Default HTTP port for mapinsol-catalog
pub const DEFAULT_PORT: u16 = 5810;

/// Environment variable overriding `cms_base_url`
pub const ENV_CMS_BASE_URL: &str = "MAPINSOL_CMS_BASE_URL";
/// Environment variable overriding `port`
pub const ENV_PORT: &str = "MAPINSOL_PORT";
/// Environment variable overriding `logging.level`
pub const ENV_LOG_LEVEL: &str = "MAPINSOL_LOG_LEVEL";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Base URL of the CMS REST API (no trailing slash required)
    #[serde(default = "default_cms_base_url")]
    pub cms_base_url: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Timeout for a single CMS request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Revalidation intervals for cached CMS data (optional)
    #[serde(default)]
    pub revalidate: RevalidateConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// How long each kind of CMS data may be served from cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevalidateConfig {
    /// Practice listings and detail lookups
    #[serde(default = "default_practices_secs")]
    pub practices_secs: u64,

    /// Category and tag lists
    #[serde(default = "default_taxonomies_secs")]
    pub taxonomies_secs: u64,

    /// Media attachments (gallery images, PDFs)
    #[serde(default = "default_media_secs")]
    pub media_secs: u64,
}

fn default_cms_base_url() -> String {
    DEFAULT_CMS_BASE_URL.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_practices_secs() -> u64 {
    60
}

fn default_taxonomies_secs() -> u64 {
    300
}

fn default_media_secs() -> u64 {
    3600
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            cms_base_url: default_cms_base_url(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
            logging: LoggingConfig::default(),
            revalidate: RevalidateConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for RevalidateConfig {
    fn default() -> Self {
        Self {
            practices_secs: default_practices_secs(),
            taxonomies_secs: default_taxonomies_secs(),
            media_secs: default_media_secs(),
        }
    }
}

impl TomlConfig {
    /// CMS base URL without trailing slashes
    pub fn cms_base_url(&self) -> &str {
        self.cms_base_url.trim_end_matches('/')
    }

    /// Check values that cannot be defaulted sensibly
    pub fn validate(&self) -> Result<()> {
        let url = self.cms_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "cms_base_url must be an http(s) URL, got '{}'",
                self.cms_base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
}

/// Locate the platform config file, if one exists
///
/// Linux checks `~/.config/mapinsol/config.toml` then `/etc/mapinsol/config.toml`;
/// other platforms only check the user config directory.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("mapinsol").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/mapinsol/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Resolves the effective configuration from TOML and environment
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    explicit_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(explicit_path: Option<PathBuf>) -> Self {
        Self { explicit_path }
    }

    /// Load TOML (or defaults), then apply environment overrides and validate
    pub fn resolve(&self) -> Result<TomlConfig> {
        let path = self.explicit_path.clone().or_else(default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                info!("Loading configuration from {}", path.display());
                load_toml_config(&path)?
            }
            Some(path) => {
                warn!(
                    "Config file {} not found, using compiled defaults",
                    path.display()
                );
                TomlConfig::default()
            }
            None => {
                info!("No config file found, using compiled defaults");
                TomlConfig::default()
            }
        };

        apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }
}

/// Apply `MAPINSOL_*` environment variables on top of `config`
pub fn apply_env_overrides(config: &mut TomlConfig) -> Result<()> {
    if let Ok(url) = std::env::var(ENV_CMS_BASE_URL) {
        if !url.trim().is_empty() {
            config.cms_base_url = url.trim().to_string();
        }
    }

    if let Ok(port) = std::env::var(ENV_PORT) {
        config.port = port
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid {}='{}': {}", ENV_PORT, port, e)))?;
    }

    if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
        if !level.trim().is_empty() {
            config.logging.level = level.trim().to_lowercase();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.cms_base_url, DEFAULT_CMS_BASE_URL);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.revalidate.practices_secs, 60);
        assert_eq!(config.revalidate.taxonomies_secs, 300);
        assert_eq!(config.revalidate.media_secs, 3600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: TomlConfig = toml::from_str("port = 9000\n").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.cms_base_url, DEFAULT_CMS_BASE_URL);
        assert_eq!(config.revalidate, RevalidateConfig::default());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = TomlConfig {
            cms_base_url: "http://localhost/wp-json/wp/v2///".to_string(),
            ..Default::default()
        };
        assert_eq!(config.cms_base_url(), "http://localhost/wp-json/wp/v2");
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = TomlConfig {
            cms_base_url: "ftp://example.org".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
