use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical item identifier, taken verbatim from the detail page URL
///
/// Kept as text so identifiers such as `"0042"` survive unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an identifier from its textual form
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Metadata extracted from a detail page, before an identifier is attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMetadata {
    pub title: String,
    pub creator: String,

    /// Absolute cover URL, resolved against the page's final URL
    pub cover_url: Option<String>,

    /// Genre tags in document order
    pub genres: Vec<String>,

    /// Reader comments in document order
    pub comments: Vec<String>,
}

/// One archived catalog entry, as written to the catalog file
///
/// Field order here is the serialized field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub title: String,
    pub creator: String,
    pub cover_url: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub comments: Vec<String>,
}

impl ItemRecord {
    /// Attaches an identifier to extracted metadata
    pub fn new(id: ItemId, metadata: ItemMetadata) -> Self {
        Self {
            id,
            title: metadata.title,
            creator: metadata.creator,
            cover_url: metadata.cover_url,
            genres: metadata.genres,
            comments: metadata.comments,
        }
    }
}
