//! URL handling module for Bookshelf
//!
//! This module knows the site's URL shapes: where an item's text is served,
//! where its detail page lives, how listing pages are numbered, and how an
//! identifier is read back out of a detail page URL.

mod identifier;

use crate::config::SiteConfig;
use crate::item::ItemId;
use crate::{UrlError, UrlResult};
use ::url::Url;

pub use identifier::{parse_item_url, resolve_id};

/// The three site endpoints every run talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteEndpoints {
    catalog_root: Url,
    content_endpoint: Url,
    detail_base: Url,
}

impl SiteEndpoints {
    /// Creates endpoints from already parsed URLs
    pub fn new(catalog_root: Url, content_endpoint: Url, detail_base: Url) -> Self {
        Self {
            catalog_root,
            content_endpoint,
            detail_base: with_trailing_slash(detail_base),
        }
    }

    /// Parses endpoints from the `[site]` configuration section
    pub fn from_config(config: &SiteConfig) -> UrlResult<Self> {
        Ok(Self::new(
            parse(&config.catalog_root)?,
            parse(&config.content_endpoint)?,
            parse(&config.detail_base)?,
        ))
    }

    pub fn catalog_root(&self) -> &Url {
        &self.catalog_root
    }

    /// URL serving an item's text: `{content_endpoint}?id={id}`
    pub fn content_url(&self, id: &ItemId) -> Url {
        let mut url = self.content_endpoint.clone();
        url.query_pairs_mut().append_pair("id", id.as_str());
        url
    }

    /// URL of an item's detail page: `{detail_base}/b{id}/`
    pub fn detail_url(&self, id: &ItemId) -> UrlResult<Url> {
        self.detail_base
            .join(&format!("b{}/", id))
            .map_err(|e| UrlError::Parse(e.to_string()))
    }

    /// URL of a catalog listing page
    pub fn listing_page_url(&self, page: u32) -> UrlResult<Url> {
        listing_page_url(&self.catalog_root, page)
    }
}

/// Builds the URL of listing page `page` under `catalog_root`
///
/// Page 1 is the root itself; later pages append the page number as a
/// path segment.
///
/// # Examples
///
/// ```
/// use bookshelf::url::listing_page_url;
/// use url::Url;
///
/// let root = Url::parse("https://tululu.org/l55/").unwrap();
/// assert_eq!(listing_page_url(&root, 1).unwrap().as_str(), "https://tululu.org/l55/");
/// assert_eq!(listing_page_url(&root, 3).unwrap().as_str(), "https://tululu.org/l55/3");
/// ```
pub fn listing_page_url(catalog_root: &Url, page: u32) -> UrlResult<Url> {
    if page <= 1 {
        return Ok(catalog_root.clone());
    }

    with_trailing_slash(catalog_root.clone())
        .join(&page.to_string())
        .map_err(|e| UrlError::Parse(e.to_string()))
}

fn parse(value: &str) -> UrlResult<Url> {
    Url::parse(value).map_err(|e| UrlError::Parse(format!("{}: {}", value, e)))
}

/// Ensures relative joins append to the path instead of replacing its last segment
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
