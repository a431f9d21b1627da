//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "vtree";
const APPLICATION: &str = "vtree";

/// Maximum number of archived logs to keep.
const MAX_OLD_LOGS: usize = 25;

const LATEST_LOG: &str = "latest.log";
const ARCHIVE_PREFIX: &str = "vtree-";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory, where logs live.
///
/// - Linux: `$XDG_CACHE_HOME/vtree` or `~/.cache/vtree`
/// - macOS: `~/Library/Caches/dev.vtree.vtree`
/// - Windows: `C:\Users\<User>\AppData\Local\vtree\vtree\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/vtree` or `~/.config/vtree`
/// - macOS: `~/Library/Application Support/dev.vtree.vtree`
/// - Windows: `C:\Users\<User>\AppData\Roaming\vtree\vtree\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the settings file.
pub fn settings_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("settings.json"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archive the previous session's log and prune old archives.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    if let Some(cache) = cache_dir() {
        rotate_logs_in(&cache, MAX_OLD_LOGS);
    }
}

fn rotate_logs_in(dir: &Path, keep: usize) {
    let latest = dir.join(LATEST_LOG);

    // Archives are named after the last write of the session they hold.
    if let Ok(modified) = fs::metadata(&latest).and_then(|meta| meta.modified()) {
        let stamp = DateTime::<Local>::from(modified).format("%Y%m%d-%H%M%S");
        let archived = dir.join(format!("{}{}.log", ARCHIVE_PREFIX, stamp));
        if let Err(e) = fs::rename(&latest, &archived) {
            eprintln!("warning: could not archive {}: {}", latest.display(), e);
        }
    }

    let archives = archives(dir);
    let excess = archives.len().saturating_sub(keep);
    for path in &archives[..excess] {
        let _ = fs::remove_file(path);
    }
}

/// Archived logs in `dir`, oldest first.
fn archives(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut archives: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"))
        })
        .collect();
    // Timestamps are zero-padded, so names sort chronologically.
    archives.sort();
    archives
}
