//! Flat-directory artifact store with lazy, mtime-based expiry.
//!
//! Each cache key maps to up to three sibling files distinguished by
//! suffix: `<key>.raw` (original bytes), `<key>.pdf` (converted PDF),
//! `<key>.html` (rendered markup). Freshness is advisory and evaluated
//! only at read time via [`CacheStore::exists_and_fresh`]; stale files
//! stay on disk until the next successful regeneration overwrites them.
//!
//! There is no locking. Concurrent requests for the same key may race to
//! write the same artifact; last writer wins, and because regeneration is
//! deterministic from identical raw bytes the duplicate work is wasted,
//! not incorrect. Writes go through a temp file and rename so readers
//! never observe a partially-written artifact.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tokio::fs;

use crate::Error;

/// The three artifact kinds a cache key can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Raw,
    Pdf,
    Html,
}

impl ArtifactKind {
    /// File suffix for this kind.
    pub fn suffix(self) -> &'static str {
        match self {
            ArtifactKind::Raw => "raw",
            ArtifactKind::Pdf => "pdf",
            ArtifactKind::Html => "html",
        }
    }
}

/// Filesystem-backed artifact store.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
    max_age: Duration,
}

impl CacheStore {
    /// Initialise a store rooted at the given directory, creating it if
    /// necessary.
    pub fn new(root: impl Into<PathBuf>, max_age: Duration) -> Result<Self, Error> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root, max_age })
    }

    /// Absolute path of the artifact file for a key and kind.
    pub fn artifact_path(&self, key: &str, kind: ArtifactKind) -> PathBuf {
        self.root.join(format!("{}.{}", key, kind.suffix()))
    }

    /// True iff the artifact exists AND its age is strictly less than the
    /// configured cache duration. Absence (or any metadata error) yields
    /// `false`, never an error.
    pub async fn exists_and_fresh(&self, key: &str, kind: ArtifactKind) -> bool {
        let path = self.artifact_path(key, kind);
        match artifact_age(&path).await {
            Some(age) => age < self.max_age,
            None => false,
        }
    }

    /// Read stored content. Callers are expected to have checked
    /// freshness first; stale content is never filtered here.
    pub async fn read(&self, key: &str, kind: ArtifactKind) -> Result<Vec<u8>, Error> {
        let path = self.artifact_path(key, kind);
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::CacheMiss(format!("{}.{}", key, kind.suffix())))
            }
            Err(err) => Err(Error::Io(err)),
        }
    }

    /// Read stored content as UTF-8 text (for the `html` artifact).
    pub async fn read_text(&self, key: &str, kind: ArtifactKind) -> Result<String, Error> {
        let bytes = self.read(key, kind).await?;
        String::from_utf8(bytes).map_err(|e| Error::ConversionFailed(format!("stored artifact is not UTF-8: {e}")))
    }

    /// Persist content, establishing or refreshing its modification
    /// timestamp. Overwrites any prior artifact of the same kind.
    pub async fn write(&self, key: &str, kind: ArtifactKind, content: &[u8]) -> Result<(), Error> {
        // Unique temp name per in-flight write: same-key racers must not
        // share a staging file even within one process.
        static TMP_SEQ: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);
        let seq = TMP_SEQ.fetch_add(1, std::sync::atomic::Ordering::Relaxed);

        let path = self.artifact_path(key, kind);
        let tmp = self
            .root
            .join(format!("{}.{}.tmp-{}-{}", key, kind.suffix(), std::process::id(), seq));

        fs::write(&tmp, content).await?;
        if let Err(err) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(Error::Io(err));
        }

        tracing::debug!(key, kind = kind.suffix(), bytes = content.len(), "cached artifact");
        Ok(())
    }
}

async fn artifact_age(path: &Path) -> Option<Duration> {
    let meta = fs::metadata(path).await.ok()?;
    let modified = meta.modified().ok()?;
    SystemTime::now().duration_since(modified).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(max_age: Duration) -> (tempfile::TempDir, CacheStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path(), max_age).unwrap();
        (dir, store)
    }

    const KEY: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[tokio::test]
    async fn test_write_then_read_roundtrip() {
        let (_dir, store) = store(Duration::from_secs(3600));
        store.write(KEY, ArtifactKind::Raw, b"hello").await.unwrap();
        let bytes = store.read(KEY, ArtifactKind::Raw).await.unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[tokio::test]
    async fn test_missing_artifact_is_cache_miss() {
        let (_dir, store) = store(Duration::from_secs(3600));
        let result = store.read(KEY, ArtifactKind::Pdf).await;
        assert!(matches!(result, Err(Error::CacheMiss(_))));
    }

    #[tokio::test]
    async fn test_exists_and_fresh_absent_is_false() {
        let (_dir, store) = store(Duration::from_secs(3600));
        assert!(!store.exists_and_fresh(KEY, ArtifactKind::Html).await);
    }

    #[tokio::test]
    async fn test_exists_and_fresh_within_window() {
        let (_dir, store) = store(Duration::from_secs(3600));
        store.write(KEY, ArtifactKind::Pdf, b"%PDF-1.4").await.unwrap();
        assert!(store.exists_and_fresh(KEY, ArtifactKind::Pdf).await);
    }

    #[tokio::test]
    async fn test_exists_and_fresh_expired() {
        // Zero max-age means every artifact's age fails the strict `<`.
        let (_dir, store) = store(Duration::ZERO);
        store.write(KEY, ArtifactKind::Pdf, b"%PDF-1.4").await.unwrap();
        assert!(!store.exists_and_fresh(KEY, ArtifactKind::Pdf).await);
    }

    #[tokio::test]
    async fn test_stale_content_still_readable() {
        let (_dir, store) = store(Duration::ZERO);
        store.write(KEY, ArtifactKind::Html, b"<p>old</p>").await.unwrap();
        // Freshness is advisory; read never filters.
        let text = store.read_text(KEY, ArtifactKind::Html).await.unwrap();
        assert_eq!(text, "<p>old</p>");
    }

    #[tokio::test]
    async fn test_overwrite_replaces_content() {
        let (_dir, store) = store(Duration::from_secs(3600));
        store.write(KEY, ArtifactKind::Raw, b"first").await.unwrap();
        store.write(KEY, ArtifactKind::Raw, b"second").await.unwrap();
        let bytes = store.read(KEY, ArtifactKind::Raw).await.unwrap();
        assert_eq!(bytes, b"second");
    }

    #[tokio::test]
    async fn test_kinds_are_sibling_files() {
        let (_dir, store) = store(Duration::from_secs(3600));
        store.write(KEY, ArtifactKind::Raw, b"raw").await.unwrap();
        store.write(KEY, ArtifactKind::Pdf, b"pdf").await.unwrap();
        store.write(KEY, ArtifactKind::Html, b"html").await.unwrap();
        assert_eq!(store.read(KEY, ArtifactKind::Raw).await.unwrap(), b"raw");
        assert_eq!(store.read(KEY, ArtifactKind::Pdf).await.unwrap(), b"pdf");
        assert_eq!(store.read(KEY, ArtifactKind::Html).await.unwrap(), b"html");
    }

    #[tokio::test]
    async fn test_no_temp_files_left_behind() {
        let (dir, store) = store(Duration::from_secs(3600));
        store.write(KEY, ArtifactKind::Raw, b"data").await.unwrap();
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".tmp-"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
