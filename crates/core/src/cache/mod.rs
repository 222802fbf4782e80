//! Content-addressed artifact cache.
//!
//! A flat directory of `<key>.raw`, `<key>.pdf`, and `<key>.html` files,
//! keyed by the SHA-256 of the source URL. Expiry is lazy: staleness is
//! evaluated at read time from file mtimes; nothing is evicted.

pub mod key;
pub mod store;

pub use crate::Error;

pub use key::{compute_cache_key, is_valid_key};
pub use store::{ArtifactKind, CacheStore};
