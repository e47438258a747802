//! Bookshelf: a catalog crawler and home-library archiver
//!
//! This crate walks a paginated book catalog, resolves every listed item to
//! its identifier, downloads the item's text together with its cover and
//! reader comments, and writes a consolidated JSON catalog of everything it
//! archived. A single broken item never aborts a run.

pub mod config;
pub mod crawler;
pub mod item;
pub mod output;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Bookshelf operations
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Redirect (HTTP {status}) for {url}: item is missing or inaccessible")]
    SoftFailure { url: String, status: u16 },

    #[error("HTTP {status} for {url}")]
    HardFailure { url: String, status: u16 },

    #[error("Malformed page {url}: {message}")]
    MalformedPage { url: String, message: String },

    #[error("Invalid range: {0}")]
    Range(String),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArchiveError {
    /// Creates a malformed page error for the given page URL
    pub fn malformed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedPage {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error must abort the whole run
    ///
    /// Everything else is scoped to a single page or item and is reported
    /// and skipped by the walker and the archiver.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Range(_) | Self::Config(_))
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector for {field}: {message}")]
    InvalidSelector { field: String, message: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Not an item detail URL: {0}")]
    NotItemUrl(String),
}

/// Result type alias for Bookshelf operations
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Archiver, ArchiveOptions, CrawlRange, FetchOutcome, PageFetcher};
pub use item::{ItemId, ItemMetadata, ItemRecord};
pub use crate::url::{resolve_id, SiteEndpoints};
