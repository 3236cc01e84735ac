use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::consts::LOG_EXTENSION;

fn has_log_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == LOG_EXTENSION)
}

/// All `*.jsonl` files below `root`, at any depth.
///
/// Unreadable directories are skipped. Entries are visited in file-name
/// order within each directory, and non-UTF-8 names are kept as they are.
pub(crate) fn find_jsonl_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .min_depth(1)
        .sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) if !entry.file_type().is_dir() && has_log_extension(entry.path()) => {
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(err) => tracing::debug!("Skipping unreadable path: {err}"),
        }
    }
    files
}
