//! Unified error types for docview.
//!
//! Variants group into the families the HTTP layer cares about:
//! invalid-input errors (rejected before any I/O), fetch errors,
//! conversion errors, and cache misses.

/// Unified error type for the docview pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid request parameters (e.g., missing `src`).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Source reference is not an HTTP(S) URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Source host is outside the configured domain allow-list.
    #[error("DOMAIN_NOT_ALLOWED: {0}")]
    DomainNotAllowed(String),

    /// Source extension is outside the configured extension allow-list.
    #[error("EXTENSION_NOT_ALLOWED: {0}")]
    ExtensionNotAllowed(String),

    /// Resolved address is private/reserved and must not be fetched.
    #[error("SSRF_BLOCKED: {0}")]
    SsrfBlocked(String),

    /// Fetch exceeded its wall-clock deadline.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch exceeded the configured byte ceiling.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// Upstream answered with a non-2xx status.
    #[error("UPSTREAM_STATUS: {0}")]
    UpstreamStatus(u16),

    /// Network-level fetch failure.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Converter invocation failed.
    #[error("CONVERSION_FAILED: {0}")]
    ConversionFailed(String),

    /// Converter exceeded its wall-clock deadline.
    #[error("CONVERSION_TIMEOUT: {0}")]
    ConversionTimeout(String),

    /// No cached artifact for the given key and kind.
    #[error("CACHE_MISS: {0}")]
    CacheMiss(String),

    /// Cache key is not a 64-char hex string.
    #[error("CACHE_ERROR: invalid key format")]
    InvalidKey,

    /// Filesystem operation failed.
    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),

    /// Anything unanticipated (e.g. template rendering).
    #[error("INTERNAL: {0}")]
    Internal(String),
}

impl Error {
    /// True for errors rejected before any I/O (mapped to 400).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_)
                | Error::InvalidUrl(_)
                | Error::DomainNotAllowed(_)
                | Error::ExtensionNotAllowed(_)
                | Error::InvalidKey
        )
    }

    /// True for the fetch-error family (network, status, size, deadline).
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Error::FetchTimeout(_) | Error::FetchTooLarge(_) | Error::UpstreamStatus(_) | Error::HttpError(_)
        )
    }

    /// True for the conversion-error family.
    pub fn is_conversion_error(&self) -> bool {
        matches!(self, Error::ConversionFailed(_) | Error::ConversionTimeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CacheMiss("abc123".to_string());
        assert!(err.to_string().contains("CACHE_MISS"));
        assert!(err.to_string().contains("abc123"));
    }

    #[test]
    fn test_invalid_input_family() {
        assert!(Error::InvalidInput("missing src".into()).is_invalid_input());
        assert!(Error::InvalidUrl("ftp://x".into()).is_invalid_input());
        assert!(Error::InvalidKey.is_invalid_input());
        assert!(!Error::CacheMiss("k".into()).is_invalid_input());
    }

    #[test]
    fn test_fetch_error_family() {
        assert!(Error::FetchTooLarge("6MB".into()).is_fetch_error());
        assert!(Error::UpstreamStatus(404).is_fetch_error());
        assert!(!Error::ConversionFailed("soffice".into()).is_fetch_error());
    }

    #[test]
    fn test_conversion_error_family() {
        assert!(Error::ConversionFailed("exit 1".into()).is_conversion_error());
        assert!(Error::ConversionTimeout("60s".into()).is_conversion_error());
        assert!(!Error::HttpError("reset".into()).is_conversion_error());
    }
}
