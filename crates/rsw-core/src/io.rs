use crate::error::Result;
use crate::paths;
use chrono::NaiveDate;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Write the page for `date` to `<root>/<subdir>/<YYYY-MM-DD>.html`,
/// replacing any page previously generated for that date.
pub fn save_page(root: &Path, subdir: &str, date: NaiveDate, html: &str) -> Result<PathBuf> {
    ensure_dir(&paths::output_dir(root, subdir))?;
    let path = paths::page_path(root, subdir, date);
    atomic_write(&path, html.as_bytes())?;
    tracing::debug!(path = %path.display(), bytes = html.len(), "page written");
    Ok(path)
}
