//! HTTP fetch pipeline for preview sources.
//!
//! ### Source Validation
//! - Strict `http(s)://` prefix requirement, no scheme defaulting
//! - Optional domain allow-list
//!
//! ### SSRF & Safety Gates
//! - Deny private ranges (RFC1918, link-local, localhost, etc.)
//! - Resolve DNS and validate all answers are public before requesting
//! - Max redirects: 5
//!
//! ### Size Ceiling
//! - `Content-Length` is checked up front when present
//! - The body is streamed chunk by chunk and the transfer aborts as soon
//!   as the accumulated size exceeds the configured ceiling

pub mod ssrf;
pub mod url;

use bytes::{Bytes, BytesMut};
use reqwest::{Client, header};
use std::time::{Duration, Instant};

pub use reqwest::{StatusCode, Url};

pub use ssrf::{ensure_public_host, is_private_or_reserved};
pub use url::{domain_allowed, extension_from_url, filename_from_url, validate_source};

use docview_core::{AppConfig, Error};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "docview/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 20MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,

    /// Domain allow-list; empty allows all hosts.
    pub allowlist_domains: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "docview/0.1".to_string(),
            max_bytes: 20 * 1024 * 1024,
            timeout: Duration::from_millis(20_000),
            max_redirects: 5,
            allowlist_domains: Vec::new(),
        }
    }
}

impl FetchConfig {
    /// Derive a fetch configuration from the application config.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes(),
            timeout: config.fetch_timeout(),
            max_redirects: 5,
            allowlist_domains: config.allowlist_domains.clone(),
        }
    }
}

/// Response from a fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// The validated URL that was requested
    pub url: Url,
    /// The final URL after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status: StatusCode,
    /// Content-Type header
    pub content_type: Option<String>,
    /// Response body bytes
    pub bytes: Bytes,
    /// Time taken to fetch in milliseconds
    pub fetch_ms: u64,
}

/// Seam between the dispatcher and the network, so orchestration can be
/// tested with call-counting fakes.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a source URL, returning raw bytes and metadata.
    async fn fetch(&self, src: &str) -> Result<FetchResponse, Error>;
}

/// HTTP fetch client with safety checks.
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl Fetcher for FetchClient {
    /// Fetch a URL, enforcing the scheme/allow-list/SSRF gates and the
    /// streaming byte ceiling.
    async fn fetch(&self, src: &str) -> Result<FetchResponse, Error> {
        let start = Instant::now();
        let url = validate_source(src)?;

        let host = url.host_str().unwrap_or_default().to_string();
        if !domain_allowed(&host, &self.config.allowlist_domains) {
            return Err(Error::DomainNotAllowed(host));
        }
        ensure_public_host(&host, url.port_or_known_default().unwrap_or(443)).await?;

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "*/*")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::FetchTimeout(format!("{src}: {e}"))
                } else {
                    Error::HttpError(format!("network error: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus(status.as_u16()));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::FetchTooLarge(format!("{} bytes exceeds {}", len, self.config.max_bytes)));
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        // Stream the body so an unbounded (or lying) upstream is cut off
        // at the ceiling instead of buffered whole.
        let mut body = BytesMut::new();
        let mut response = response;
        loop {
            let chunk = response.chunk().await.map_err(|e| {
                if e.is_timeout() {
                    Error::FetchTimeout(format!("{src}: {e}"))
                } else {
                    Error::HttpError(format!("failed to read response: {e}"))
                }
            })?;
            let Some(chunk) = chunk else { break };
            if body.len() + chunk.len() > self.config.max_bytes {
                return Err(Error::FetchTooLarge(format!(
                    "body exceeds {} bytes, transfer aborted",
                    self.config.max_bytes
                )));
            }
            body.extend_from_slice(&chunk);
        }

        let bytes = body.freeze();
        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!("fetched {} -> {} in {}ms ({} bytes)", url, final_url, fetch_ms, bytes.len());

        Ok(FetchResponse { url, final_url, status, content_type, bytes, fetch_ms })
    }
}
