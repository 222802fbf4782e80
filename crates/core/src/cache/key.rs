//! Content-addressed cache key generation.

use sha2::{Digest, Sha256};

/// Compute the cache key for a source URL.
///
/// The source string is the sole identity: identical sources hash to
/// identical keys across process restarts.
pub fn compute_cache_key(src: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(src.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check that a key arriving over an artifact route has the expected
/// shape (64 lowercase hex chars) before it is used to build a path.
pub fn is_valid_key(key: &str) -> bool {
    key.len() == 64 && key.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_stability() {
        let key1 = compute_cache_key("https://example.com/report.docx");
        let key2 = compute_cache_key("https://example.com/report.docx");
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_key_distinct_sources() {
        let key1 = compute_cache_key("https://example.com/a.pdf");
        let key2 = compute_cache_key("https://example.com/b.pdf");
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_key_format() {
        let key = compute_cache_key("https://example.com");
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(is_valid_key(&key));
    }

    #[test]
    fn test_is_valid_key_rejects_bad_shapes() {
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("abc123"));
        assert!(!is_valid_key(&"g".repeat(64)));
        assert!(!is_valid_key(&"A".repeat(64)));
        assert!(!is_valid_key("../../../../etc/passwd"));
    }
}
