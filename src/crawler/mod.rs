//! Crawler module for catalog walking and item archiving
//!
//! This module contains the core crawl-and-archive logic, including:
//! - HTTP fetching with redirect-as-failure classification
//! - Markup parsing driven by a field-to-selector table
//! - Pagination planning against the catalog's advertised extent
//! - Catalog walking and per-item archiving with isolated failures

mod archiver;
mod fetcher;
pub mod parser;
mod pipeline;
mod planner;
mod reporter;
pub mod selectors;
mod walker;

pub use archiver::{ArchiveOptions, Archiver};
pub use fetcher::{build_http_client, classify_status, FetchOutcome, FetchedPage, PageFetcher};
pub use pipeline::{PageRequest, Pipeline};
pub use planner::{normalize_id_range, normalize_range, plan, CrawlRange, MAX_ID_RANGE_LEN};
pub use reporter::{Reporter, TracingReporter};
pub use walker::{dedupe_preserving_order, walk};
