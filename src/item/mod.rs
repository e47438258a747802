//! Archived item data model
//!
//! An item is one archivable catalog entry: its identifier, the metadata
//! scraped from its detail page, and nothing else. Files saved alongside
//! a record live in [`crate::storage`].

mod record;

pub use record::{ItemId, ItemMetadata, ItemRecord};
