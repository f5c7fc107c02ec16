//! Source-control fetcher

use std::path::Path;

use async_trait::async_trait;
use diamond_fs::ProjectLayout;
use git2::build::{CheckoutBuilder, RepoBuilder};
use tracing::info;

use crate::fetcher::{clear_destination, record};
use crate::{
    Error, FetchOutcome, LockList, PackageDescriptor, Result, Source, SourceFetcher, SourceKind,
    resolve_scm_url,
};

/// Fetches packages by cloning a git repository.
#[derive(Debug, Clone)]
pub struct ScmFetcher {
    layout: ProjectLayout,
}

impl ScmFetcher {
    pub fn new(layout: ProjectLayout) -> Self {
        Self { layout }
    }
}

#[async_trait]
impl SourceFetcher for ScmFetcher {
    fn kind(&self) -> SourceKind {
        SourceKind::Scm
    }

    async fn fetch(&self, lock: LockList, package: &PackageDescriptor) -> Result<FetchOutcome> {
        let Source::Scm { url, reference } = &package.source else {
            return Err(Error::SourceMismatch {
                fetcher: self.kind(),
                found: package.source.kind(),
            });
        };

        let dest = self.layout.package_dir(&package.path)?;
        let url = resolve_scm_url(url);
        info!(package = %package.name, %url, "cloning");

        let (target, remote, rev) = (dest.clone(), url.clone(), reference.clone());
        let commit = tokio::task::spawn_blocking(move || {
            clear_destination(&target)?;
            clone_repo(&remote, &target, rev.as_deref())
        })
        .await
        .map_err(|e| Error::Task(e.to_string()))??;

        let mut outcome = record(lock, package, &dest, Some(commit))?;
        if outcome.package.version.is_none() && reference.is_some() {
            outcome.package.version = reference.clone();
        }
        Ok(outcome)
    }
}

/// Clone a git repository to a destination directory.
///
/// Checks out `reference` (tag, branch or commit) when given and returns the
/// id of the checked out commit.
pub fn clone_repo(url: &str, dest: &Path, reference: Option<&str>) -> Result<String> {
    let clone_error = |message: String| Error::GitClone {
        url: url.to_string(),
        message,
    };

    let repo = RepoBuilder::new()
        .clone(url, dest)
        .map_err(|e| clone_error(e.message().to_string()))?;

    if let Some(name) = reference {
        let (object, reference) = repo
            .revparse_ext(name)
            .or_else(|_| repo.revparse_ext(&format!("origin/{name}")))
            .map_err(|e| clone_error(format!("Reference {} not found: {}", name, e)))?;

        repo.checkout_tree(&object, Some(CheckoutBuilder::new().force()))
            .map_err(|e| clone_error(format!("Failed to checkout {}: {}", name, e)))?;

        let head = match reference.as_ref().and_then(|r| r.name()) {
            Some(ref_name) if !ref_name.starts_with("refs/remotes/") => repo.set_head(ref_name),
            _ => repo.set_head_detached(object.id()),
        };
        head.map_err(|e| clone_error(format!("Failed to set HEAD: {}", e)))?;
    }

    let commit = repo
        .head()
        .and_then(|head| head.peel_to_commit())
        .map_err(|e| clone_error(format!("Failed to resolve HEAD: {}", e)))?;

    Ok(commit.id().to_string())
}
