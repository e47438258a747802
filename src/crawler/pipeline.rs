//! Run pipeline
//!
//! Wires the stages together for the two ways of selecting items:
//! - Catalog mode: plan pages, walk listings, archive every listed item
//! - Range mode: archive a contiguous range of identifiers
//!
//! Range errors and configuration errors abort here, before any item is
//! touched. Everything after planning only ever yields fewer records.

use crate::config::Config;
use crate::crawler::archiver::{ArchiveOptions, Archiver};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::planner::{normalize_id_range, plan};
use crate::crawler::reporter::Reporter;
use crate::crawler::selectors::CompiledSelectors;
use crate::crawler::walker::{dedupe_preserving_order, walk};
use crate::item::{ItemId, ItemRecord};
use crate::storage::{FileLayout, FileStore, ItemStore};
use crate::url::SiteEndpoints;
use crate::ArchiveError;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// Page range requested for a catalog run, before validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub start_page: i64,
    pub end_page: Option<i64>,
}

/// Components shared by every stage of a run
pub struct Pipeline {
    fetcher: PageFetcher,
    endpoints: SiteEndpoints,
    selectors: CompiledSelectors,
    store: Arc<dyn ItemStore>,
    reporter: Arc<dyn Reporter>,
    options: ArchiveOptions,
    dedupe_items: bool,
}

impl Pipeline {
    /// Builds a pipeline writing files below the configured destination
    pub fn new(config: &Config, reporter: Arc<dyn Reporter>) -> Result<Self, ArchiveError> {
        let root = config
            .output
            .destination
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_default();
        let store = FileStore::new(root, FileLayout::from_config(&config.output));

        Self::with_store(config, Arc::new(store), reporter)
    }

    /// Builds a pipeline around a caller-provided store
    pub fn with_store(
        config: &Config,
        store: Arc<dyn ItemStore>,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self, ArchiveError> {
        Ok(Self {
            fetcher: PageFetcher::from_config(&config.http)?,
            endpoints: SiteEndpoints::from_config(&config.site)?,
            selectors: CompiledSelectors::compile(&config.selectors)?,
            store,
            reporter,
            options: ArchiveOptions {
                concurrency: config.crawl.concurrency,
                ..ArchiveOptions::default()
            },
            dedupe_items: config.crawl.dedupe_items,
        })
    }

    /// Sets which downloads are skipped
    pub fn with_skips(mut self, skip_content: bool, skip_cover: bool) -> Self {
        self.options.skip_content = skip_content;
        self.options.skip_cover = skip_cover;
        self
    }

    /// Crawls a catalog and archives every listed item
    ///
    /// # Arguments
    ///
    /// * `catalog_root` - Catalog to crawl; the configured root when `None`
    /// * `request` - Requested page range
    pub async fn run_catalog(
        self,
        catalog_root: Option<Url>,
        request: PageRequest,
    ) -> Result<Vec<ItemRecord>, ArchiveError> {
        let root = catalog_root.unwrap_or_else(|| self.endpoints.catalog_root().clone());

        let range = plan(
            &self.fetcher,
            &root,
            request.start_page,
            request.end_page,
            &self.selectors,
            self.reporter.as_ref(),
        )
        .await?;
        tracing::info!(
            "Crawling {} pages {}..={}",
            root,
            range.start_page,
            range.end_page
        );

        let mut item_urls = walk(
            &self.fetcher,
            &root,
            range,
            &self.selectors,
            self.reporter.as_ref(),
        )
        .await;

        if self.dedupe_items {
            let before = item_urls.len();
            item_urls = dedupe_preserving_order(item_urls);
            tracing::info!("Dropped {} repeated item links", before - item_urls.len());
        }

        Ok(self.into_archiver().archive(&item_urls).await)
    }

    /// Archives the identifiers `start..=stop`
    pub async fn run_id_range(self, start: i64, stop: i64) -> Result<Vec<ItemRecord>, ArchiveError> {
        let range = normalize_id_range(start, stop, self.reporter.as_ref())?;
        // Bounded by MAX_ID_RANGE_LEN, so the count fits in usize.
        let total = (range.end() - range.start() + 1) as usize;
        tracing::info!("Archiving {} items by identifier", total);

        Ok(self.into_archiver().archive_ids(range.map(ItemId::from), total).await)
    }

    fn into_archiver(self) -> Archiver {
        Archiver::new(
            self.fetcher,
            self.endpoints,
            self.selectors,
            self.store,
            self.reporter,
            self.options,
        )
    }
}
