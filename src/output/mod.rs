//! Output module for the consolidated catalog
//!
//! This module handles writing the records of a run to the catalog file
//! and reading a catalog back.

mod catalog;

pub use catalog::{load_catalog, resolve_catalog_path, save_catalog, DEFAULT_CATALOG_NAME};
