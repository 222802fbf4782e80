//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_file_mb` is 0 or exceeds 100MB
    /// - `cache_max_age_secs` is 0
    /// - `fetch_timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `convert_timeout_ms` is less than 1s or exceeds 10 minutes
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_file_mb == 0 {
            return Err(ConfigError::Invalid { field: "max_file_mb".into(), reason: "must be greater than 0".into() });
        }
        if self.max_file_mb > 100 {
            return Err(ConfigError::Invalid { field: "max_file_mb".into(), reason: "must not exceed 100MB".into() });
        }

        if self.cache_max_age_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_max_age_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.fetch_timeout_ms < 100 {
            return Err(ConfigError::Invalid {
                field: "fetch_timeout_ms".into(),
                reason: "must be at least 100ms".into(),
            });
        }
        if self.fetch_timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "fetch_timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.convert_timeout_ms < 1000 {
            return Err(ConfigError::Invalid {
                field: "convert_timeout_ms".into(),
                reason: "must be at least 1000ms".into(),
            });
        }
        if self.convert_timeout_ms > 600_000 {
            return Err(ConfigError::Invalid {
                field: "convert_timeout_ms".into(),
                reason: "must not exceed 10 minutes (600000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if !self.allowed_extensions.is_empty() {
            tracing::warn!(
                count = self.allowed_extensions.len(),
                "extension allow-list active; sources without a matching URL extension will be rejected"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_max_file_zero() {
        let config = AppConfig { max_file_mb: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_file_mb"));
    }

    #[test]
    fn test_validate_max_file_exceeds_limit() {
        let config = AppConfig { max_file_mb: 101, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_file_mb"));
    }

    #[test]
    fn test_validate_cache_age_zero() {
        let config = AppConfig { cache_max_age_secs: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "cache_max_age_secs"));
    }

    #[test]
    fn test_validate_fetch_timeout_too_small() {
        let config = AppConfig { fetch_timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "fetch_timeout_ms"));
    }

    #[test]
    fn test_validate_fetch_timeout_exceeds_limit() {
        let config = AppConfig { fetch_timeout_ms: 301_000, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "fetch_timeout_ms"));
    }

    #[test]
    fn test_validate_convert_timeout_too_small() {
        let config = AppConfig { convert_timeout_ms: 500, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "convert_timeout_ms"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig {
            max_file_mb: 1,
            cache_max_age_secs: 1,
            fetch_timeout_ms: 100,
            convert_timeout_ms: 1000,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
