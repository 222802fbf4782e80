//! Source-reference validation and URL helpers.
//!
//! The source string is the request identity, so validation is strict:
//! unlike a browser bar we never default a missing scheme. Anything that
//! is not `http://` or `https://` (case-insensitive) is rejected before
//! any I/O happens.

use docview_core::Error;

/// Validate a source reference and parse it for fetching.
///
/// Rules:
/// 1. Trim leading/trailing whitespace
/// 2. Reject empty input
/// 3. Require an `http://` or `https://` prefix (case-insensitive)
/// 4. Reject anything `url::Url` cannot parse (host is lowercased and
///    the fragment dropped as a side effect of parsing)
pub fn validate_source(input: &str) -> Result<url::Url, Error> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(Error::InvalidInput("src must not be empty".into()));
    }

    let lower = trimmed.to_lowercase();
    if !lower.starts_with("http://") && !lower.starts_with("https://") {
        return Err(Error::InvalidUrl(format!("src must be an http(s) URL, got `{trimmed}`")));
    }

    let mut parsed = url::Url::parse(trimmed).map_err(|e| Error::InvalidUrl(e.to_string()))?;

    if parsed.host_str().is_none() {
        return Err(Error::InvalidUrl("src has no host".into()));
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

/// Best-effort filename guess: the last non-empty path segment.
pub fn filename_from_url(url: &url::Url) -> Option<String> {
    url.path_segments()?
        .filter(|s| !s.is_empty())
        .next_back()
        .map(|s| s.to_string())
}

/// Lower-cased extension of the URL path, if it has one.
pub fn extension_from_url(url: &url::Url) -> Option<String> {
    let name = filename_from_url(url)?;
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() { None } else { Some(ext.to_lowercase()) }
}

/// Check a host against the domain allow-list. An empty list allows all;
/// otherwise the host must equal an entry or be a subdomain of one.
pub fn domain_allowed(host: &str, allowlist: &[String]) -> bool {
    if allowlist.is_empty() {
        return true;
    }
    let host = host.to_lowercase();
    allowlist.iter().any(|entry| {
        let entry = entry.trim().to_lowercase();
        !entry.is_empty() && (host == entry || host.ends_with(&format!(".{entry}")))
    })
}
