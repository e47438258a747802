//! Storage traits and error types
//!
//! This module defines the trait interface for the place an item's files
//! are written to, and the associated error type.

use crate::item::ItemId;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot derive a file name from {0}")]
    InvalidFileName(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Destination for the files archived with each item
///
/// Implementations must be safe to share between concurrently archived
/// items. Text and comment paths are keyed by identifier, so distinct items
/// never share them. Cover paths come from the image URL and are shared by
/// items with the same image; `save_cover` writes each such path once.
pub trait ItemStore: Send + Sync {
    /// Saves an item's text body
    fn save_content(&self, id: &ItemId, title: &str, body: &[u8]) -> StorageResult<PathBuf>;

    /// Saves a cover image under the file name taken from its URL
    ///
    /// Returns `None` when another item already saved that file.
    fn save_cover(&self, cover_url: &Url, body: &[u8]) -> StorageResult<Option<PathBuf>>;

    /// Saves an item's comments as a sidecar text file
    fn save_comments(&self, id: &ItemId, title: &str, comments: &[String])
        -> StorageResult<PathBuf>;
}
