use crate::config::OutputConfig;
use crate::item::ItemId;
use crate::storage::traits::{ItemStore, StorageError, StorageResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use url::Url;

/// Subdirectories, relative to the destination, for each kind of file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLayout {
    pub content_dir: PathBuf,
    pub cover_dir: PathBuf,
    pub comments_dir: PathBuf,
}

impl Default for FileLayout {
    fn default() -> Self {
        Self::from_config(&OutputConfig::default())
    }
}

impl FileLayout {
    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            content_dir: PathBuf::from(&config.content_dir),
            cover_dir: PathBuf::from(&config.cover_dir),
            comments_dir: PathBuf::from(&config.comments_dir),
        }
    }
}

/// Writes item files below a destination directory
///
/// | File | Path |
/// |------|------|
/// | text | `{root}/{content_dir}/{id}. {title}.txt` |
/// | cover | `{root}/{cover_dir}/{file name from URL}` |
/// | comments | `{root}/{comments_dir}/Comments {id}.{title}.txt` |
///
/// File names are sanitized; missing directories are created on demand.
///
/// Many items share one cover image (every item without a cover points at
/// the same placeholder), so each cover path is written at most once per
/// store. Later saves of a claimed path write nothing.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    layout: FileLayout,
    claimed_covers: Mutex<HashSet<PathBuf>>,
}

impl FileStore {
    /// Creates a store rooted at `root` (an empty path means the current directory)
    pub fn new(root: impl Into<PathBuf>, layout: FileLayout) -> Self {
        Self {
            root: root.into(),
            layout,
            claimed_covers: Mutex::new(HashSet::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn content_path(&self, id: &ItemId, title: &str) -> PathBuf {
        let name = sanitize_filename::sanitize(format!("{}. {}.txt", id, title));
        self.root.join(&self.layout.content_dir).join(name)
    }

    /// Returns true if `path` was not yet claimed by another save
    fn claim_cover(&self, path: &Path) -> bool {
        let mut claimed = self
            .claimed_covers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        claimed.insert(path.to_path_buf())
    }

    fn release_cover(&self, path: &Path) {
        let mut claimed = self
            .claimed_covers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        claimed.remove(path);
    }

    fn comments_path(&self, id: &ItemId, title: &str) -> PathBuf {
        let name = sanitize_filename::sanitize(format!("Comments {}.{}.txt", id, title));
        self.root.join(&self.layout.comments_dir).join(name)
    }
}

impl ItemStore for FileStore {
    fn save_content(&self, id: &ItemId, title: &str, body: &[u8]) -> StorageResult<PathBuf> {
        let path = self.content_path(id, title);
        write_file(&path, body)?;
        Ok(path)
    }

    fn save_cover(&self, cover_url: &Url, body: &[u8]) -> StorageResult<Option<PathBuf>> {
        let name = cover_file_name(cover_url)?;
        let path = self.root.join(&self.layout.cover_dir).join(name);

        if !self.claim_cover(&path) {
            return Ok(None);
        }
        if let Err(e) = write_file(&path, body) {
            self.release_cover(&path);
            return Err(e);
        }
        Ok(Some(path))
    }

    fn save_comments(
        &self,
        id: &ItemId,
        title: &str,
        comments: &[String],
    ) -> StorageResult<PathBuf> {
        let path = self.comments_path(id, title);
        write_file(&path, comments.join("\n\n").as_bytes())?;
        Ok(path)
    }
}

/// File name of a cover image: the last segment of the percent-decoded URL path
///
/// # Examples
///
/// ```
/// use bookshelf::storage::cover_file_name;
/// use url::Url;
///
/// let url = Url::parse("https://tululu.org/shots/my%20cover.jpg").unwrap();
/// assert_eq!(cover_file_name(&url).unwrap(), "my cover.jpg");
/// ```
pub fn cover_file_name(cover_url: &Url) -> StorageResult<String> {
    let decoded = urlencoding::decode(cover_url.path())
        .map_err(|_| StorageError::InvalidFileName(cover_url.to_string()))?;

    let base_name = decoded.rsplit('/').next().unwrap_or_default();
    let name = sanitize_filename::sanitize(base_name);

    if name.is_empty() {
        return Err(StorageError::InvalidFileName(cover_url.to_string()));
    }

    Ok(name)
}

fn write_file(path: &Path, contents: &[u8]) -> StorageResult<()> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    };

    write().map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })
}
