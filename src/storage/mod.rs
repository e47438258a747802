//! Storage module for archived item files
//!
//! This module handles writing everything an item brings along besides its
//! catalog record:
//! - The item's text, one file per item
//! - Cover images, named after the image URL
//! - Reader comments as a sidecar text file

mod files;
mod traits;

pub use files::{cover_file_name, FileLayout, FileStore};
pub use traits::{ItemStore, StorageError, StorageResult};
