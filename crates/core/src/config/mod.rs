//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (DOCVIEW_*)
//! 2. TOML config file (if DOCVIEW_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! The loaded struct is constructed once at startup and passed down into
//! the dispatcher, fetcher, and cache store; nothing reads the environment
//! after load.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (DOCVIEW_*)
/// 2. TOML config file (if DOCVIEW_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// TCP port the HTTP server binds.
    ///
    /// Set via DOCVIEW_PORT environment variable.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding cached artifacts (`<key>.raw|.pdf|.html`).
    ///
    /// Set via DOCVIEW_CACHE_DIR environment variable.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Seconds before a cached artifact is considered stale.
    ///
    /// Set via DOCVIEW_CACHE_MAX_AGE_SECS environment variable.
    #[serde(default = "default_cache_max_age_secs")]
    pub cache_max_age_secs: u64,

    /// Maximum source document size in megabytes.
    ///
    /// Set via DOCVIEW_MAX_FILE_MB environment variable.
    #[serde(default = "default_max_file_mb")]
    pub max_file_mb: u64,

    /// HTTP fetch timeout in milliseconds.
    ///
    /// Set via DOCVIEW_FETCH_TIMEOUT_MS environment variable.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Conversion (office engine) timeout in milliseconds.
    ///
    /// Set via DOCVIEW_CONVERT_TIMEOUT_MS environment variable.
    #[serde(default = "default_convert_timeout_ms")]
    pub convert_timeout_ms: u64,

    /// User-Agent string for outbound fetches.
    ///
    /// Set via DOCVIEW_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Path or name of the office-conversion binary.
    ///
    /// Set via DOCVIEW_SOFFICE_PATH environment variable.
    #[serde(default = "default_soffice_path")]
    pub soffice_path: PathBuf,

    /// Domain allow-list for source URLs (empty = allow all).
    ///
    /// Set via DOCVIEW_ALLOWLIST_DOMAINS environment variable.
    #[serde(default)]
    pub allowlist_domains: Vec<String>,

    /// Accepted source-extension allow-list (empty = accept all).
    ///
    /// Set via DOCVIEW_ALLOWED_EXTENSIONS environment variable.
    #[serde(default)]
    pub allowed_extensions: Vec<String>,
}

fn default_port() -> u16 {
    3000
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./docview-cache")
}

fn default_cache_max_age_secs() -> u64 {
    3600
}

fn default_max_file_mb() -> u64 {
    20
}

fn default_fetch_timeout_ms() -> u64 {
    20_000
}

fn default_convert_timeout_ms() -> u64 {
    60_000
}

fn default_user_agent() -> String {
    "docview/0.1".into()
}

fn default_soffice_path() -> PathBuf {
    PathBuf::from("soffice")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cache_dir: default_cache_dir(),
            cache_max_age_secs: default_cache_max_age_secs(),
            max_file_mb: default_max_file_mb(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            convert_timeout_ms: default_convert_timeout_ms(),
            user_agent: default_user_agent(),
            soffice_path: default_soffice_path(),
            allowlist_domains: Vec::new(),
            allowed_extensions: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Byte ceiling for a single fetch.
    pub fn max_bytes(&self) -> usize {
        (self.max_file_mb as usize) * 1024 * 1024
    }

    /// Cache freshness window as a Duration.
    pub fn cache_max_age(&self) -> Duration {
        Duration::from_secs(self.cache_max_age_secs)
    }

    /// Fetch timeout as a Duration for use with reqwest/tokio.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Conversion timeout as a Duration.
    pub fn convert_timeout(&self) -> Duration {
        Duration::from_millis(self.convert_timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `DOCVIEW_`
    /// 2. TOML file from `DOCVIEW_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("DOCVIEW_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("DOCVIEW_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
