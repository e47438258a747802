//! Pagination planning
//!
//! The catalog's real extent is only known to the server, so a requested
//! page range is checked against the last page the catalog advertises
//! before any listing page is walked.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::parse_last_page;
use crate::crawler::reporter::Reporter;
use crate::crawler::selectors::CompiledSelectors;
use crate::ArchiveError;
use std::ops::RangeInclusive;
use url::Url;

/// An inclusive, validated range of listing pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlRange {
    pub start_page: u32,
    pub end_page: u32,
}

impl CrawlRange {
    /// Iterates the page numbers in order
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start_page..=self.end_page
    }

    pub fn page_count(&self) -> usize {
        (self.end_page - self.start_page) as usize + 1
    }
}

/// Fetches the catalog root once and plans the crawl range against it
///
/// # Arguments
///
/// * `fetcher` - The page fetcher
/// * `catalog_root` - Page 1 of the catalog
/// * `requested_start` - First page requested; values below 1 are clamped
/// * `requested_end` - Last page requested; `None` means the catalog's last page
/// * `selectors` - The compiled selector table
/// * `reporter` - Receives clamping notices
///
/// # Returns
///
/// * `Ok(CrawlRange)` - The normalized range
/// * `Err(ArchiveError)` - The root could not be fetched or read, or the range is empty
pub async fn plan(
    fetcher: &PageFetcher,
    catalog_root: &Url,
    requested_start: i64,
    requested_end: Option<i64>,
    selectors: &CompiledSelectors,
    reporter: &dyn Reporter,
) -> Result<CrawlRange, ArchiveError> {
    let page = fetcher.fetch(catalog_root).await.into_page(catalog_root)?;
    let last_page = parse_last_page(&page.text(), &page.final_url, selectors)?;
    tracing::info!("Catalog {} reports {} pages", catalog_root, last_page);

    normalize_range(requested_start, requested_end, last_page, reporter)
}

/// Clamps and validates a requested page range
///
/// Rules, in order:
/// 1. start below 1 is clamped to 1 (notice)
/// 2. start past the last page is an error
/// 3. a missing end, or an end past the last page, becomes the last page (notice)
/// 4. end before start is an error
pub fn normalize_range(
    requested_start: i64,
    requested_end: Option<i64>,
    last_page: u32,
    reporter: &dyn Reporter,
) -> Result<CrawlRange, ArchiveError> {
    let last = i64::from(last_page);

    let mut start = requested_start;
    if start < 1 {
        reporter.notice(&format!("Start page {} corrected to 1", start));
        start = 1;
    }

    if start > last {
        return Err(ArchiveError::Range(format!(
            "start page {} is past the last catalog page {}",
            start, last
        )));
    }

    let end = match requested_end {
        None => last,
        Some(end) if end > last => {
            reporter.notice(&format!(
                "End page {} corrected to the last catalog page {}",
                end, last
            ));
            last
        }
        Some(end) => end,
    };

    if end < start {
        return Err(ArchiveError::Range(format!(
            "pages from {} to {} select nothing",
            start, end
        )));
    }

    // Both bounds now lie in 1..=last_page.
    Ok(CrawlRange {
        start_page: start as u32,
        end_page: end as u32,
    })
}

/// Most identifiers a single range run may request
pub const MAX_ID_RANGE_LEN: u64 = 10_000_000;

/// Clamps and validates an identifier range for range mode
///
/// Start below 1 is clamped to 1 (notice). Stop before start, or a range
/// longer than [`MAX_ID_RANGE_LEN`], is an error.
pub fn normalize_id_range(
    requested_start: i64,
    requested_stop: i64,
    reporter: &dyn Reporter,
) -> Result<RangeInclusive<u64>, ArchiveError> {
    let mut start = requested_start;
    if start < 1 {
        reporter.notice(&format!("Start index {} corrected to 1", start));
        start = 1;
    }

    if requested_stop < start {
        return Err(ArchiveError::Range(format!(
            "indexes from {} to {} select nothing",
            start, requested_stop
        )));
    }

    // start >= 1, so the difference cannot overflow.
    let len = (requested_stop - start) as u64 + 1;
    if len > MAX_ID_RANGE_LEN {
        return Err(ArchiveError::Range(format!(
            "indexes from {} to {} request {} items, more than the limit of {}",
            start, requested_stop, len, MAX_ID_RANGE_LEN
        )));
    }

    Ok(start as u64..=requested_stop as u64)
}
