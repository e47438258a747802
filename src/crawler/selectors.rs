//! Field-to-query table for the site's markup
//!
//! Extraction code only ever asks for a logical field; which CSS query
//! answers it is decided here. A markup change on the site is a one-line
//! edit to [`defaults`] or a `[selectors]` override in the config file.

use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::Selector;

/// Queries matching the tululu.org markup
pub mod defaults {
    pub const HEADING: &str = "div#content h1";
    pub const HEADING_SEPARATOR: &str = "::";
    pub const COVER_IMAGE: &str = ".bookimage img";
    pub const GENRES: &str = "span.d_book a";
    pub const COMMENT_CONTAINER: &str = "div.texts";
    pub const COMMENT_TEXT: &str = "span";
    pub const ITEM_CARD: &str = "table.d_book";
    pub const ITEM_LINK: &str = "a[href]";
    pub const LAST_PAGE: &str = "a.npage";
}

/// The selector table, compiled once per run
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub heading: Selector,
    pub heading_separator: String,
    pub cover_image: Selector,
    pub genres: Selector,
    pub comment_container: Selector,
    pub comment_text: Selector,
    pub item_card: Selector,
    pub item_link: Selector,
    pub last_page: Selector,
}

impl CompiledSelectors {
    /// Compiles every query in the table
    ///
    /// # Returns
    ///
    /// * `Ok(CompiledSelectors)` - All queries compiled
    /// * `Err(ConfigError::InvalidSelector)` - The first query that failed, by field name
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        if config.heading_separator.is_empty() {
            return Err(ConfigError::Validation(
                "heading-separator cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            heading: compile_field("heading", &config.heading)?,
            heading_separator: config.heading_separator.clone(),
            cover_image: compile_field("cover-image", &config.cover_image)?,
            genres: compile_field("genres", &config.genres)?,
            comment_container: compile_field("comment-container", &config.comment_container)?,
            comment_text: compile_field("comment-text", &config.comment_text)?,
            item_card: compile_field("item-card", &config.item_card)?,
            item_link: compile_field("item-link", &config.item_link)?,
            last_page: compile_field("last-page", &config.last_page)?,
        })
    }
}

fn compile_field(field: &str, query: &str) -> Result<Selector, ConfigError> {
    Selector::parse(query).map_err(|e| ConfigError::InvalidSelector {
        field: field.to_string(),
        message: format!("'{}': {:?}", query, e),
    })
}
