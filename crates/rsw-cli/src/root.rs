use rsw_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `RSW_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `rsw.yaml` or `workouts_data.json`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_root_from(&cwd)
}

fn find_root_from(start: &Path) -> PathBuf {
    let is_project = |dir: &Path| {
        dir.join(paths::CONFIG_FILE).is_file() || dir.join(paths::DATA_FILE).is_file()
    };
    if let Some(dir) = start.ancestors().find(|d| is_project(*d)) {
        return dir.to_path_buf();
    }
    if let Some(dir) = start.ancestors().find(|d| d.join(".git").is_dir()) {
        return dir.to_path_buf();
    }
    start.to_path_buf()
}
