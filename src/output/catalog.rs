use crate::config::OutputConfig;
use crate::item::ItemRecord;
use crate::ArchiveError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Catalog file name used when no path is configured
pub const DEFAULT_CATALOG_NAME: &str = "library.json";

/// Resolves where the catalog is written
///
/// An explicit `catalog-path` wins; otherwise the default name is placed in
/// the destination directory, or in the current directory without one.
pub fn resolve_catalog_path(config: &OutputConfig) -> PathBuf {
    match (&config.catalog_path, &config.destination) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(destination)) => Path::new(destination).join(DEFAULT_CATALOG_NAME),
        (None, None) => PathBuf::from(DEFAULT_CATALOG_NAME),
    }
}

/// Writes all records to `path` as a pretty-printed JSON array
///
/// Non-ASCII text is written as-is. Missing parent directories are created.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The path written
/// * `Err(ArchiveError)` - The file could not be created or written
pub fn save_catalog(records: &[ItemRecord], path: &Path) -> Result<PathBuf, ArchiveError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(path.to_path_buf())
}

/// Reads a catalog file written by [`save_catalog`]
pub fn load_catalog(path: &Path) -> Result<Vec<ItemRecord>, ArchiveError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
