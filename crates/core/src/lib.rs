//! Core types and shared functionality for docview.
//!
//! This crate provides:
//! - Content-addressed filesystem cache for preview artifacts
//! - Content-type detection and format classification
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod detect;
pub mod error;

pub use cache::{ArtifactKind, CacheStore, compute_cache_key, is_valid_key};
pub use config::AppConfig;
pub use detect::{DetectedType, FormatCategory, classify, detect};
pub use error::Error;
