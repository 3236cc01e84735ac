//! Claude data directory discovery
//!
//! Candidates come from `CLAUDE_CONFIG_DIR` (comma-separated) followed by the
//! two default locations. A candidate is kept only when it has a `projects`
//! subdirectory.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::consts::PROJECTS_SUBDIR;

fn default_claude_dirs(home: &Path) -> [PathBuf; 2] {
    [home.join(".config").join("claude"), home.join(".claude")]
}

fn has_projects_dir(path: &Path) -> bool {
    path.join(PROJECTS_SUBDIR).is_dir()
}

/// Comma-separated entries, trimmed, empties dropped. Bytes are kept as-is
/// so non-UTF-8 paths survive.
#[cfg(unix)]
fn split_env_paths(value: &OsStr) -> Vec<PathBuf> {
    use std::os::unix::ffi::OsStrExt;

    value
        .as_bytes()
        .split(|b| *b == b',')
        .map(<[u8]>::trim_ascii)
        .filter(|entry| !entry.is_empty())
        .map(|entry| PathBuf::from(OsStr::from_bytes(entry)))
        .collect()
}

#[cfg(not(unix))]
fn split_env_paths(value: &OsStr) -> Vec<PathBuf> {
    value
        .to_string_lossy()
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Ordered, deduplicated list of Claude data directories that exist
pub(crate) fn resolve_claude_paths(env_value: Option<&OsStr>, home: Option<&Path>) -> Vec<PathBuf> {
    let from_env = env_value.into_iter().flat_map(split_env_paths);
    let defaults = home.into_iter().flat_map(default_claude_dirs);

    let mut paths: Vec<PathBuf> = Vec::new();
    for candidate in from_env.chain(defaults) {
        if paths.contains(&candidate) {
            continue;
        }
        if has_projects_dir(&candidate) {
            paths.push(candidate);
        } else {
            tracing::debug!("Skipping {}: no {PROJECTS_SUBDIR} directory", candidate.display());
        }
    }
    paths
}
