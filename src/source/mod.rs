//! Claude Code usage log discovery and scanning
//!
//! Resolves the data directories, lists the JSONL logs under their
//! `projects` subdirectory and finds the latest recorded activity.

pub(crate) mod finder;
pub(crate) mod paths;
pub(crate) mod scanner;

use std::path::PathBuf;

use crate::consts::PROJECTS_SUBDIR;

pub(crate) use finder::find_jsonl_files;
pub(crate) use paths::resolve_claude_paths;
pub(crate) use scanner::scan_latest_activity;

/// Log files under `<dir>/projects` for every data directory, in directory order
pub(crate) fn find_all_log_files(claude_paths: &[PathBuf]) -> Vec<PathBuf> {
    claude_paths
        .iter()
        .flat_map(|dir| find_jsonl_files(&dir.join(PROJECTS_SUBDIR)))
        .collect()
}
