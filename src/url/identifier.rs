use crate::item::ItemId;
use crate::{UrlError, UrlResult};
use ::url::Url;

/// Path segment prefix in front of the numeric item identifier
const ITEM_SEGMENT_PREFIX: char = 'b';

/// Resolves a detail page URL of the shape `.../b{digits}/` to its identifier
///
/// # Examples
///
/// ```
/// use bookshelf::url::resolve_id;
/// use url::Url;
///
/// let url = Url::parse("https://tululu.org/b1234/").unwrap();
/// assert_eq!(resolve_id(&url).unwrap().as_str(), "1234");
/// ```
pub fn resolve_id(url: &Url) -> UrlResult<ItemId> {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .ok_or_else(|| UrlError::NotItemUrl(url.to_string()))?;

    let segment = urlencoding::decode(segment)
        .map_err(|_| UrlError::NotItemUrl(url.to_string()))?;

    let digits = segment
        .strip_prefix(ITEM_SEGMENT_PREFIX)
        .filter(|d| !d.is_empty() && d.chars().all(|c| c.is_ascii_digit()))
        .ok_or_else(|| UrlError::NotItemUrl(url.to_string()))?;

    Ok(ItemId::new(digits))
}

/// Parses a URL string and resolves its identifier
pub fn parse_item_url(url_str: &str) -> UrlResult<ItemId> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    resolve_id(&url)
}
