//! Directory walking for stylesheet rewrites

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{Error, Result, has_extension};

/// Collect every file under `root` whose extension is in `extensions`.
///
/// Directories listed in `skip` are pruned along with their contents.
/// Symlinks are not followed. Results are sorted by path.
pub fn collect_files(root: &Path, skip: &[PathBuf], extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !skip.iter().any(|s| entry.path() == s));

    for entry in walker {
        let entry = entry.map_err(|e| Error::Walk {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
            message: e.to_string(),
        })?;
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
