//! HTML parser for catalog and detail pages
//!
//! This module handles parsing fetched markup to extract:
//! - Item metadata from a detail page (title, creator, cover, genres, comments)
//! - Item detail links from a catalog listing page
//! - The last page number advertised by the catalog's pagination
//!
//! Which node answers each question is decided by [`CompiledSelectors`];
//! nothing here names a CSS query directly.

use crate::crawler::selectors::CompiledSelectors;
use crate::item::ItemMetadata;
use crate::ArchiveError;
use scraper::{ElementRef, Html};
use url::Url;

/// Extracts item metadata from a parsed detail page
///
/// # Extraction Rules
///
/// - **Heading** (required): split on the separator into exactly two
///   non-empty parts, title then creator, both trimmed
/// - **Cover** (optional): `src` of the cover node resolved against `base_url`
/// - **Genres** (optional): trimmed text of each genre node, in document order
/// - **Comments** (optional): trimmed text nested in each comment container,
///   in document order; containers without a text node are skipped
///
/// Empty texts are kept, so positions match the page.
///
/// # Arguments
///
/// * `document` - The parsed detail page
/// * `base_url` - The page's final URL, used to resolve the cover URL
/// * `selectors` - The compiled selector table
///
/// # Returns
///
/// * `Ok(ItemMetadata)` - Heading found and well formed
/// * `Err(ArchiveError::MalformedPage)` - Heading missing or not splittable
pub fn extract_metadata(
    document: &Html,
    base_url: &Url,
    selectors: &CompiledSelectors,
) -> Result<ItemMetadata, ArchiveError> {
    let (title, creator) = extract_heading(document, base_url, selectors)?;

    Ok(ItemMetadata {
        title,
        creator,
        cover_url: extract_cover_url(document, base_url, selectors),
        genres: extract_genres(document, selectors),
        comments: extract_comments(document, selectors),
    })
}

/// Parses a detail page body and extracts its metadata
///
/// # Example
///
/// ```no_run
/// use bookshelf::config::SelectorConfig;
/// use bookshelf::crawler::parser::parse_item_page;
/// use bookshelf::crawler::selectors::CompiledSelectors;
/// use url::Url;
///
/// let html = r#"<div id="content"><h1>Title :: Author</h1></div>"#;
/// let selectors = CompiledSelectors::compile(&SelectorConfig::default()).unwrap();
/// let base = Url::parse("https://tululu.org/b1/").unwrap();
/// let metadata = parse_item_page(html, &base, &selectors).unwrap();
/// assert_eq!(metadata.creator, "Author");
/// ```
pub fn parse_item_page(
    html: &str,
    base_url: &Url,
    selectors: &CompiledSelectors,
) -> Result<ItemMetadata, ArchiveError> {
    let document = Html::parse_document(html);
    extract_metadata(&document, base_url, selectors)
}

fn extract_heading(
    document: &Html,
    base_url: &Url,
    selectors: &CompiledSelectors,
) -> Result<(String, String), ArchiveError> {
    let heading = document
        .select(&selectors.heading)
        .next()
        .ok_or_else(|| ArchiveError::malformed(base_url.as_str(), "heading not found"))?;

    let text = element_text(&heading);
    let parts: Vec<&str> = text.split(selectors.heading_separator.as_str()).collect();

    let [title, creator] = parts.as_slice() else {
        return Err(ArchiveError::malformed(
            base_url.as_str(),
            format!(
                "heading '{}' does not split into title and creator on '{}'",
                text.trim(),
                selectors.heading_separator
            ),
        ));
    };

    let (title, creator) = (title.trim(), creator.trim());
    if title.is_empty() || creator.is_empty() {
        return Err(ArchiveError::malformed(
            base_url.as_str(),
            format!("heading '{}' has an empty title or creator", text.trim()),
        ));
    }

    Ok((title.to_string(), creator.to_string()))
}

fn extract_cover_url(
    document: &Html,
    base_url: &Url,
    selectors: &CompiledSelectors,
) -> Option<String> {
    let src = document
        .select(&selectors.cover_image)
        .next()?
        .value()
        .attr("src")?
        .trim();

    match base_url.join(src) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            tracing::debug!("Unresolvable cover src '{}' on {}: {}", src, base_url, e);
            None
        }
    }
}

fn extract_genres(document: &Html, selectors: &CompiledSelectors) -> Vec<String> {
    document
        .select(&selectors.genres)
        .map(|genre| element_text(&genre).trim().to_string())
        .collect()
}

fn extract_comments(document: &Html, selectors: &CompiledSelectors) -> Vec<String> {
    document
        .select(&selectors.comment_container)
        .filter_map(|container| container.select(&selectors.comment_text).next())
        .map(|text| element_text(&text).trim().to_string())
        .collect()
}

/// Extracts the detail link of every item card on a listing page
///
/// Cards without a resolvable link are skipped. Document order is kept and
/// repeated links are not removed.
pub fn extract_item_links(
    document: &Html,
    base_url: &Url,
    selectors: &CompiledSelectors,
) -> Vec<Url> {
    let mut links = Vec::new();

    for card in document.select(&selectors.item_card) {
        let Some(href) = card
            .select(&selectors.item_link)
            .next()
            .and_then(|link| link.value().attr("href"))
        else {
            continue;
        };

        match base_url.join(href.trim()) {
            Ok(url) => links.push(url),
            Err(e) => tracing::debug!("Skipping item link '{}' on {}: {}", href, base_url, e),
        }
    }

    links
}

/// Parses a listing page body and extracts its item links
pub fn parse_listing_page(html: &str, base_url: &Url, selectors: &CompiledSelectors) -> Vec<Url> {
    let document = Html::parse_document(html);
    extract_item_links(&document, base_url, selectors)
}

/// Reads the last page number from the catalog's pagination links
///
/// A catalog without pagination links has a single page.
///
/// # Returns
///
/// * `Ok(u32)` - The last page number, at least 1
/// * `Err(ArchiveError::MalformedPage)` - The last link's text is not a positive number
pub fn extract_last_page(
    document: &Html,
    base_url: &Url,
    selectors: &CompiledSelectors,
) -> Result<u32, ArchiveError> {
    let Some(last_link) = document.select(&selectors.last_page).last() else {
        return Ok(1);
    };

    let text = element_text(&last_link);
    match text.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(ArchiveError::malformed(
            base_url.as_str(),
            format!("last page link text '{}' is not a page number", text.trim()),
        )),
    }
}

/// Parses a catalog page body and reads its last page number
pub fn parse_last_page(
    html: &str,
    base_url: &Url,
    selectors: &CompiledSelectors,
) -> Result<u32, ArchiveError> {
    let document = Html::parse_document(html);
    extract_last_page(&document, base_url, selectors)
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}
