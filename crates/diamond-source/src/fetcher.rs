//! The fetcher seam between the installer and package sources

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::{LockEntry, LockList, PackageDescriptor, PackageManifest, Result, SourceKind};

/// What a fetch hands back to the installer.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// The lock list with the fetched package recorded.
    pub lock: LockList,
    /// The descriptor completed with version, entry file and capabilities.
    pub package: PackageDescriptor,
    /// `true` when the package was not in the lock list before.
    pub is_new: bool,
}

/// Fetches a package into its destination directory.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// The source type this fetcher handles.
    fn kind(&self) -> SourceKind;

    /// Fetch `package` and record it in `lock`.
    async fn fetch(&self, lock: LockList, package: &PackageDescriptor) -> Result<FetchOutcome>;
}

/// Remove any previous copy so the fetch starts from pristine content.
pub(crate) fn clear_destination(dest: &Path) -> Result<()> {
    if dest.exists() {
        debug!(path = %dest.display(), "removing previous package copy");
        fs::remove_dir_all(dest).map_err(|e| diamond_fs::Error::io(dest, e))?;
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| diamond_fs::Error::io(parent, e))?;
    }
    Ok(())
}

/// Complete the descriptor from the fetched manifest and record it.
pub(crate) fn record(
    mut lock: LockList,
    package: &PackageDescriptor,
    dest: &Path,
    resolved: Option<String>,
) -> Result<FetchOutcome> {
    let package = match PackageManifest::load(dest)? {
        Some(manifest) => manifest.resolve(package),
        None => package.clone(),
    };

    let is_new = lock.upsert(LockEntry::from_package(&package, resolved));
    debug!(package = %package.name, is_new, "recorded package in lock list");

    Ok(FetchOutcome {
        lock,
        package,
        is_new,
    })
}
