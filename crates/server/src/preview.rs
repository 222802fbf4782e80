//! Preview dispatcher: the orchestration core.
//!
//! Given a source URL the service checks the cache, fetches, detects the
//! format, runs the matching converter, persists the artifact, and wraps
//! the result in a presentation page. Decision order (first match wins):
//!
//! 1. Reject invalid/disallowed sources before any I/O
//! 2. Fresh `html` artifact → returned verbatim
//! 3. Fresh `pdf` artifact → viewer page
//! 4. Fetch; persist `raw` unconditionally
//! 5. Branch on the detected format category
//!
//! Terminal conversion failures degrade uniformly to the download page:
//! once the fetch has succeeded the `raw` artifact is on disk, so a
//! download link is always serviceable. The spreadsheet path still tries
//! the PDF engine before giving up.

use std::sync::Arc;

use docview_client::convert::{PdfEngine, csv, load_workbook};
use docview_client::fetch::{Fetcher, domain_allowed, extension_from_url, filename_from_url, validate_source};
use docview_core::{AppConfig, ArtifactKind, CacheStore, Error, FormatCategory, classify, compute_cache_key, detect};

use crate::views::{self, DownloadPage, SheetPage, TablePage, ViewerPage};

/// Which rendering path produced a preview page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    CachedHtml,
    PdfViewer,
    Sheet,
    Table,
    Download,
}

/// A rendered preview response.
#[derive(Debug, Clone)]
pub struct PreviewPage {
    pub html: String,
    pub kind: PageKind,
    pub key: String,
}

/// The preview orchestration service.
pub struct PreviewService {
    config: Arc<AppConfig>,
    store: CacheStore,
    fetcher: Arc<dyn Fetcher>,
    engine: Arc<dyn PdfEngine>,
}

impl PreviewService {
    pub fn new(
        config: Arc<AppConfig>, store: CacheStore, fetcher: Arc<dyn Fetcher>, engine: Arc<dyn PdfEngine>,
    ) -> Self {
        Self { config, store, fetcher, engine }
    }

    /// Run the full preview pipeline for a source URL.
    pub async fn preview(&self, src: &str) -> Result<PreviewPage, Error> {
        let url = validate_source(src)?;

        let host = url.host_str().unwrap_or_default();
        if !domain_allowed(host, &self.config.allowlist_domains) {
            return Err(Error::DomainNotAllowed(host.to_string()));
        }
        if let Some(ext) = extension_from_url(&url)
            && !extension_allowed(&ext, &self.config.allowed_extensions)
        {
            return Err(Error::ExtensionNotAllowed(ext));
        }

        let src = src.trim();
        let key = compute_cache_key(src);
        let filename = filename_from_url(&url).unwrap_or_else(|| "document".to_string());

        if self.store.exists_and_fresh(&key, ArtifactKind::Html).await {
            tracing::debug!(key, "serving cached html artifact");
            let html = self.store.read_text(&key, ArtifactKind::Html).await?;
            return Ok(PreviewPage { html, kind: PageKind::CachedHtml, key });
        }

        if self.store.exists_and_fresh(&key, ArtifactKind::Pdf).await {
            tracing::debug!(key, "serving cached pdf artifact");
            let html = views::render(ViewerPage { filename: &filename, key: &key })?;
            return Ok(PreviewPage { html, kind: PageKind::PdfViewer, key });
        }

        let response = self.fetcher.fetch(src).await?;

        // Raw goes to disk before any conversion: even if everything
        // below fails the bytes remain addressable for download.
        self.store.write(&key, ArtifactKind::Raw, &response.bytes).await?;

        let detected = detect(&response.bytes, &filename);
        let category = classify(&detected);
        tracing::debug!(
            key,
            extension = %detected.extension,
            mime = %detected.mime_type,
            category = ?category,
            "detected source type"
        );

        match category {
            FormatCategory::Pdf => {
                self.store.write(&key, ArtifactKind::Pdf, &response.bytes).await?;
                self.viewer_page(&key, &filename)
            }
            FormatCategory::WordFamily | FormatCategory::Presentation => {
                match self.engine.to_pdf(&response.bytes, &detected.extension).await {
                    Ok(pdf) => {
                        self.store.write(&key, ArtifactKind::Pdf, &pdf).await?;
                        self.viewer_page(&key, &filename)
                    }
                    Err(error) => {
                        tracing::warn!(key, %error, "document conversion failed, degrading to download");
                        self.download_page(&key, &filename, &detected.extension)
                    }
                }
            }
            FormatCategory::Spreadsheet => match load_workbook(response.bytes.to_vec()).await {
                Ok(workbook) => {
                    let html = views::render(SheetPage { filename: &filename, workbook: &workbook })?;
                    self.store.write(&key, ArtifactKind::Html, html.as_bytes()).await?;
                    Ok(PreviewPage { html, kind: PageKind::Sheet, key })
                }
                Err(error) => {
                    tracing::warn!(key, %error, "workbook model failed, falling back to pdf conversion");
                    match self.engine.to_pdf(&response.bytes, &detected.extension).await {
                        Ok(pdf) => {
                            self.store.write(&key, ArtifactKind::Pdf, &pdf).await?;
                            self.viewer_page(&key, &filename)
                        }
                        Err(error) => {
                            tracing::warn!(key, %error, "pdf fallback failed, degrading to download");
                            self.download_page(&key, &filename, &detected.extension)
                        }
                    }
                }
            },
            FormatCategory::Csv => match csv::parse_rows(&response.bytes) {
                Ok(rows) => {
                    let html = views::render(TablePage { filename: &filename, rows: &rows })?;
                    self.store.write(&key, ArtifactKind::Html, html.as_bytes()).await?;
                    Ok(PreviewPage { html, kind: PageKind::Table, key })
                }
                Err(error) => {
                    tracing::warn!(key, %error, "csv parse failed, degrading to download");
                    self.download_page(&key, &filename, &detected.extension)
                }
            },
            FormatCategory::Unsupported => {
                match self.engine.to_pdf(&response.bytes, &detected.extension).await {
                    Ok(pdf) => {
                        self.store.write(&key, ArtifactKind::Pdf, &pdf).await?;
                        self.viewer_page(&key, &filename)
                    }
                    Err(error) => {
                        tracing::debug!(key, %error, "generic conversion failed, serving download page");
                        self.download_page(&key, &filename, &detected.extension)
                    }
                }
            }
        }
    }

    fn viewer_page(&self, key: &str, filename: &str) -> Result<PreviewPage, Error> {
        let html = views::render(ViewerPage { filename, key })?;
        Ok(PreviewPage { html, kind: PageKind::PdfViewer, key: key.to_string() })
    }

    fn download_page(&self, key: &str, filename: &str, extension: &str) -> Result<PreviewPage, Error> {
        let html = views::render(DownloadPage { filename, extension, key })?;
        Ok(PreviewPage { html, kind: PageKind::Download, key: key.to_string() })
    }
}

fn extension_allowed(ext: &str, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    allowed
        .iter()
        .any(|entry| entry.trim().trim_start_matches('.').eq_ignore_ascii_case(ext))
}
