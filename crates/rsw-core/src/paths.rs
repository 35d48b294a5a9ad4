use chrono::NaiveDate;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File and directory names
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "rsw.yaml";
pub const DATA_FILE: &str = "workouts_data.json";
pub const OUTPUT_DIR: &str = "4xweek";
pub const COMMIT_SCRIPT: &str = "auto_commit_push.sh";

/// File-name format of a generated page, without the extension.
pub const PAGE_DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn output_dir(root: &Path, subdir: &str) -> PathBuf {
    root.join(subdir)
}

pub fn page_path(root: &Path, subdir: &str, date: NaiveDate) -> PathBuf {
    output_dir(root, subdir).join(format!("{}.html", date.format(PAGE_DATE_FORMAT)))
}

/// Resolve `path` against `root` unless it is already absolute.
pub fn under_root(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
