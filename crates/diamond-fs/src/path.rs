//! Package path validation and extension matching

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Validate a package destination path relative to the packages root.
///
/// Backslashes are accepted as separators. The path must be non-empty,
/// relative, and must not climb out of the packages root with `..`.
pub fn validate_package_path(path: &str) -> Result<PathBuf> {
    let normalized = path.replace('\\', "/");
    let invalid = |reason: &str| Error::InvalidPackagePath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if normalized.trim().is_empty() {
        return Err(invalid("path is empty"));
    }
    if normalized.starts_with('/') {
        return Err(invalid("path must be relative"));
    }

    let mut resolved = PathBuf::new();
    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid("path must not contain '..'")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("path must be relative"));
            }
        }
    }

    if resolved.as_os_str().is_empty() {
        return Err(invalid("path resolves to the packages root"));
    }
    Ok(resolved)
}

/// Check whether `path` has one of `extensions` (without the dot).
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}
