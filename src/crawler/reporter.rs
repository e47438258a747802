//! Run reporting
//!
//! The planner, walker and archiver report every run event (notices, page
//! and item failures, extracted metadata, progress) to a [`Reporter`]
//! handed to them by the caller. [`TracingReporter`] forwards these to
//! `tracing`. Stage summaries and saved paths are still traced directly as
//! plain diagnostics.

use crate::item::ItemRecord;
use crate::ArchiveError;
use url::Url;

/// Receives notices, failures and progress from a run
pub trait Reporter: Send + Sync {
    /// A recoverable correction, such as a clamped page range
    fn notice(&self, message: &str);

    /// A listing page that contributed no item links
    fn page_failed(&self, page: u32, url: &Url, error: &ArchiveError);

    /// An item that was skipped; `context` names the URL or identifier
    fn item_failed(&self, context: &str, error: &ArchiveError);

    /// An item's detail page was parsed
    fn metadata_extracted(&self, record: &ItemRecord);

    /// A problem that degraded an item without removing it (cover, comments)
    fn item_degraded(&self, record: &ItemRecord, error: &ArchiveError);

    /// An item was accepted; `index` is its 1-based position in the input
    fn item_archived(&self, index: usize, total: usize, record: &ItemRecord);
}

/// Reporter that writes to the `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn notice(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn page_failed(&self, page: u32, url: &Url, error: &ArchiveError) {
        tracing::error!("Listing page {} ({}) skipped: {}", page, url, error);
    }

    fn item_failed(&self, context: &str, error: &ArchiveError) {
        tracing::error!("Item {} skipped: {}", context, error);
    }

    fn metadata_extracted(&self, record: &ItemRecord) {
        tracing::info!(
            "Item {} '{}' genres: {:?}",
            record.id,
            record.title,
            record.genres
        );
    }

    fn item_degraded(&self, record: &ItemRecord, error: &ArchiveError) {
        tracing::warn!("Item {} '{}': {}", record.id, record.title, error);
    }

    fn item_archived(&self, index: usize, total: usize, record: &ItemRecord) {
        tracing::info!(
            "Downloaded '{}' by {} (id {}) {}/{}",
            record.title,
            record.creator,
            record.id,
            index,
            total
        );
    }
}
