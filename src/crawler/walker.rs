//! Catalog walking
//!
//! Visits every listing page of a planned range and collects item detail
//! URLs. A listing page that fails is reported and contributes nothing;
//! the walk always continues with the next page.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::parse_listing_page;
use crate::crawler::planner::CrawlRange;
use crate::crawler::reporter::Reporter;
use crate::crawler::selectors::CompiledSelectors;
use crate::url::{listing_page_url, resolve_id};
use crate::ArchiveError;
use std::collections::HashSet;
use url::Url;

/// Collects item detail URLs from every page in `range`
///
/// Order is page order, then document order within a page. The same item
/// listed on two pages appears twice; see [`dedupe_preserving_order`].
pub async fn walk(
    fetcher: &PageFetcher,
    catalog_root: &Url,
    range: CrawlRange,
    selectors: &CompiledSelectors,
    reporter: &dyn Reporter,
) -> Vec<Url> {
    let mut item_urls = Vec::new();

    for page in range.pages() {
        let page_url = match listing_page_url(catalog_root, page) {
            Ok(url) => url,
            Err(e) => {
                reporter.page_failed(page, catalog_root, &ArchiveError::from(e));
                continue;
            }
        };

        let fetched = match fetcher.fetch(&page_url).await.into_page(&page_url) {
            Ok(fetched) => fetched,
            Err(e) => {
                reporter.page_failed(page, &page_url, &e);
                continue;
            }
        };

        let links = parse_listing_page(&fetched.text(), &fetched.final_url, selectors);
        tracing::debug!("Listing page {} yielded {} item links", page, links.len());
        item_urls.extend(links);
    }

    tracing::info!(
        "Walked {} listing pages, found {} item links",
        range.page_count(),
        item_urls.len()
    );

    item_urls
}

/// Removes URLs naming an already listed item, keeping the first occurrence
///
/// Items are compared by identifier, so `/b5/` and `/b5` are one item.
/// URLs without an identifier are all kept for the archiver to report.
pub fn dedupe_preserving_order(urls: Vec<Url>) -> Vec<Url> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| match resolve_id(url) {
            Ok(id) => seen.insert(id),
            Err(_) => true,
        })
        .collect()
}
