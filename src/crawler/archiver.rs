//! Archive orchestration
//!
//! The archiver turns a list of item URLs (or identifiers) into catalog
//! records. Each item is an independent unit of work:
//! - Fetch the item's text from the content endpoint
//! - Fetch and parse its detail page
//! - Save the text, cover and comments
//!
//! Any failure while fetching the text or the detail page removes that one
//! item from the result; cover and comment failures only degrade it. No
//! per-item error ever escapes the batch.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::parse_item_page;
use crate::crawler::reporter::Reporter;
use crate::crawler::selectors::CompiledSelectors;
use crate::item::{ItemId, ItemRecord};
use crate::storage::ItemStore;
use crate::url::{resolve_id, SiteEndpoints};
use crate::ArchiveError;
use futures::stream::{self, Stream, StreamExt};
use std::sync::Arc;
use url::Url;

/// Per-run switches for the archiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Do not save item text files
    pub skip_content: bool,

    /// Do not fetch or save cover images
    pub skip_cover: bool,

    /// Items archived at once; results keep input order regardless
    pub concurrency: usize,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            skip_content: false,
            skip_cover: false,
            concurrency: 1,
        }
    }
}

/// Drives the per-item pipeline over a batch
pub struct Archiver {
    fetcher: PageFetcher,
    endpoints: SiteEndpoints,
    selectors: CompiledSelectors,
    store: Arc<dyn ItemStore>,
    reporter: Arc<dyn Reporter>,
    options: ArchiveOptions,
}

impl Archiver {
    pub fn new(
        fetcher: PageFetcher,
        endpoints: SiteEndpoints,
        selectors: CompiledSelectors,
        store: Arc<dyn ItemStore>,
        reporter: Arc<dyn Reporter>,
        options: ArchiveOptions,
    ) -> Self {
        Self {
            fetcher,
            endpoints,
            selectors,
            store,
            reporter,
            options,
        }
    }

    /// Archives every item URL, in order
    ///
    /// URLs that do not resolve to an identifier are reported and skipped.
    ///
    /// # Returns
    ///
    /// The records of the accepted items, in input order
    pub async fn archive(&self, item_urls: &[Url]) -> Vec<ItemRecord> {
        let total = item_urls.len();
        let jobs = item_urls.iter().enumerate().map(|(i, url)| async move {
            let result = match resolve_id(url) {
                Ok(id) => self.archive_item(&id).await,
                Err(e) => Err(ArchiveError::from(e)),
            };
            (i + 1, url.to_string(), result)
        });

        self.collect(stream::iter(jobs), total).await
    }

    /// Archives items addressed directly by identifier, in order
    ///
    /// Identifiers are pulled from `ids` only as workers free up, so a long
    /// range is never materialized. `total` is the number `ids` yields and
    /// is used for progress reporting.
    pub async fn archive_ids<I>(&self, ids: I, total: usize) -> Vec<ItemRecord>
    where
        I: IntoIterator<Item = ItemId>,
    {
        let jobs = ids.into_iter().enumerate().map(|(i, id)| async move {
            let result = self.archive_item(&id).await;
            (i + 1, format!("id {}", id), result)
        });

        self.collect(stream::iter(jobs), total).await
    }

    /// Runs jobs with bounded concurrency and keeps the accepted records
    ///
    /// `buffered` yields results in submission order, so the output order
    /// never depends on which item finished first.
    async fn collect<S, F>(&self, jobs: S, total: usize) -> Vec<ItemRecord>
    where
        S: Stream<Item = F>,
        F: std::future::Future<Output = (usize, String, Result<ItemRecord, ArchiveError>)>,
    {
        let mut results = std::pin::pin!(jobs.buffered(self.options.concurrency.max(1)));
        let mut records = Vec::new();

        while let Some((index, context, result)) = results.next().await {
            match result {
                Ok(record) => {
                    self.reporter.item_archived(index, total, &record);
                    records.push(record);
                }
                Err(e) => self.reporter.item_failed(&context, &e),
            }
        }

        records
    }

    /// Runs the full pipeline for one item
    ///
    /// # Steps
    ///
    /// 1. Fetch the text (failure: item skipped)
    /// 2. Fetch and parse the detail page (failure: item skipped)
    /// 3. Save the text unless `skip_content` (failure: item skipped)
    /// 4. Fetch and save the cover unless `skip_cover` (failure: reported only)
    /// 5. Save non-empty comments (failure: reported only)
    pub async fn archive_item(&self, id: &ItemId) -> Result<ItemRecord, ArchiveError> {
        let content_url = self.endpoints.content_url(id);
        let content = self
            .fetcher
            .fetch(&content_url)
            .await
            .into_page(&content_url)?;

        let detail_url = self.endpoints.detail_url(id)?;
        let detail = self
            .fetcher
            .fetch(&detail_url)
            .await
            .into_page(&detail_url)?;

        let metadata = parse_item_page(&detail.text(), &detail.final_url, &self.selectors)?;
        let record = ItemRecord::new(id.clone(), metadata);
        self.reporter.metadata_extracted(&record);

        if !self.options.skip_content {
            let path = self
                .store
                .save_content(&record.id, &record.title, &content.body)?;
            tracing::debug!("Saved text of {} to {}", record.id, path.display());
        }

        if !self.options.skip_cover {
            if let Some(cover_url) = &record.cover_url {
                if let Err(e) = self.save_cover(cover_url).await {
                    self.reporter.item_degraded(&record, &e);
                }
            }
        }

        if !record.comments.is_empty() {
            if let Err(e) = self
                .store
                .save_comments(&record.id, &record.title, &record.comments)
            {
                self.reporter.item_degraded(&record, &ArchiveError::from(e));
            }
        }

        Ok(record)
    }

    async fn save_cover(&self, cover_url: &str) -> Result<(), ArchiveError> {
        let url = Url::parse(cover_url)?;
        let cover = self.fetcher.fetch(&url).await.into_page(&url)?;
        match self.store.save_cover(&url, &cover.body)? {
            Some(path) => tracing::debug!("Saved cover {} to {}", url, path.display()),
            None => tracing::debug!("Cover {} already saved", url),
        }
        Ok(())
    }
}
