//! Shared application state for the HTTP layer.

use std::sync::Arc;

use docview_client::convert::{PdfEngine, SofficeEngine};
use docview_client::fetch::{FetchClient, FetchConfig, Fetcher};
use docview_core::{AppConfig, CacheStore, Error};

use crate::preview::PreviewService;

/// Everything a request handler needs, built once at startup.
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: CacheStore,
    pub preview: PreviewService,
}

impl AppState {
    /// Wire up production collaborators from the loaded configuration.
    pub fn from_config(config: AppConfig) -> Result<Self, Error> {
        let fetcher = Arc::new(FetchClient::new(FetchConfig::from_app_config(&config))?);
        let engine = Arc::new(SofficeEngine::from_app_config(&config));
        Self::new(config, fetcher, engine)
    }

    /// Assemble state from explicit collaborators (tests inject fakes).
    pub fn new(config: AppConfig, fetcher: Arc<dyn Fetcher>, engine: Arc<dyn PdfEngine>) -> Result<Self, Error> {
        let config = Arc::new(config);
        let store = CacheStore::new(config.cache_dir.clone(), config.cache_max_age())?;
        let preview = PreviewService::new(config.clone(), store.clone(), fetcher, engine);
        Ok(Self { config, store, preview })
    }
}
