use serde::Deserialize;

/// Main configuration structure for Bookshelf
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to the defaults for the tululu.org catalog.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub http: HttpConfig,
    pub crawl: CrawlConfig,
    pub output: OutputConfig,
    pub selectors: SelectorConfig,
}

/// Site endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root URL of the catalog listing (page 1)
    #[serde(rename = "catalog-root")]
    pub catalog_root: String,

    /// Endpoint serving an item's text, addressed as `?id={identifier}`
    #[serde(rename = "content-endpoint")]
    pub content_endpoint: String,

    /// Base URL under which detail pages live as `b{identifier}/`
    #[serde(rename = "detail-base")]
    pub detail_base: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            catalog_root: "https://tululu.org/l55/".to_string(),
            content_endpoint: "https://tululu.org/txt.php".to_string(),
            detail_base: "https://tululu.org/".to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("bookshelf/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Number of items archived at once (1 = strictly sequential)
    pub concurrency: usize,

    /// Drop repeated item URLs found across listing pages
    #[serde(rename = "dedupe-items")]
    pub dedupe_items: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            dedupe_items: false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory for downloaded files (current directory when unset)
    pub destination: Option<String>,

    /// Catalog file path (`{destination}/library.json` when unset)
    #[serde(rename = "catalog-path")]
    pub catalog_path: Option<String>,

    #[serde(rename = "content-dir")]
    pub content_dir: String,

    #[serde(rename = "cover-dir")]
    pub cover_dir: String,

    #[serde(rename = "comments-dir")]
    pub comments_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            destination: None,
            catalog_path: None,
            content_dir: "books".to_string(),
            cover_dir: "images".to_string(),
            comments_dir: "comments".to_string(),
        }
    }
}

/// CSS queries for each logical field scraped from the site
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Heading holding "title :: creator"
    pub heading: String,

    #[serde(rename = "heading-separator")]
    pub heading_separator: String,

    #[serde(rename = "cover-image")]
    pub cover_image: String,

    pub genres: String,

    #[serde(rename = "comment-container")]
    pub comment_container: String,

    /// Text node inside each comment container
    #[serde(rename = "comment-text")]
    pub comment_text: String,

    /// One card per item on a listing page
    #[serde(rename = "item-card")]
    pub item_card: String,

    /// Link inside an item card pointing at the detail page
    #[serde(rename = "item-link")]
    pub item_link: String,

    /// Pagination links; the last one carries the last page number
    #[serde(rename = "last-page")]
    pub last_page: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        use crate::crawler::selectors::defaults;

        Self {
            heading: defaults::HEADING.to_string(),
            heading_separator: defaults::HEADING_SEPARATOR.to_string(),
            cover_image: defaults::COVER_IMAGE.to_string(),
            genres: defaults::GENRES.to_string(),
            comment_container: defaults::COMMENT_CONTAINER.to_string(),
            comment_text: defaults::COMMENT_TEXT.to_string(),
            item_card: defaults::ITEM_CARD.to_string(),
            item_link: defaults::ITEM_LINK.to_string(),
            last_page: defaults::LAST_PAGE.to_string(),
        }
    }
}
