//! Source-control fetcher tests against local repositories

mod common;

use diamond_fs::ProjectLayout;
use diamond_source::{LockList, PackageDescriptor, ScmFetcher, Source, SourceFetcher};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn scm_package(name: &str, url: &str, reference: Option<&str>) -> PackageDescriptor {
    PackageDescriptor {
        source: Source::Scm {
            url: url.to_string(),
            reference: reference.map(str::to_string),
        },
        ..PackageDescriptor::registry(name)
    }
}

#[tokio::test]
async fn test_clone_records_commit_and_manifest() {
    let upstream = TempDir::new().unwrap();
    let oid = common::git_repo_with_files(
        upstream.path(),
        &[
            ("package.json", r#"{"version":"0.4.0","diamond":{"main":"_index.scss","importer":true}}"#),
            ("_index.scss", ".card {\n}\n"),
        ],
    );
    let project = TempDir::new().unwrap();
    let fetcher = ScmFetcher::new(ProjectLayout::new(project.path()));

    let pkg = scm_package("cards", upstream.path().to_str().unwrap(), None);
    let outcome = fetcher.fetch(LockList::new(), &pkg).await.unwrap();

    assert!(outcome.is_new);
    assert_eq!(outcome.package.version.as_deref(), Some("0.4.0"));
    assert_eq!(outcome.package.main.as_deref(), Some("_index.scss"));
    assert!(outcome.package.needs_dependency_install());

    let entry = outcome.lock.find("cards").unwrap();
    assert_eq!(entry.resolved.as_deref(), Some(oid.to_string().as_str()));
    assert!(project.path().join("diamond/packages/cards/_index.scss").is_file());
}

#[tokio::test]
async fn test_reference_checks_out_tag_and_becomes_version() {
    let upstream = TempDir::new().unwrap();
    let first = common::git_repo_with_files(upstream.path(), &[("_a.scss", ".a {\n}\n")]);
    let repo = git2::Repository::open(upstream.path()).unwrap();
    repo.tag_lightweight("v1.0.0", &repo.find_object(first, None).unwrap(), false)
        .unwrap();
    common::commit_files(&repo, &[("_b.scss", ".b {\n}\n")], "Second commit");

    let project = TempDir::new().unwrap();
    let fetcher = ScmFetcher::new(ProjectLayout::new(project.path()));
    let pkg = scm_package("letters", upstream.path().to_str().unwrap(), Some("v1.0.0"));

    let outcome = fetcher.fetch(LockList::new(), &pkg).await.unwrap();

    assert_eq!(outcome.package.version.as_deref(), Some("v1.0.0"));
    assert_eq!(
        outcome.lock.find("letters").unwrap().resolved.as_deref(),
        Some(first.to_string().as_str())
    );
    let dest = project.path().join("diamond/packages/letters");
    assert!(dest.join("_a.scss").is_file());
    assert!(!dest.join("_b.scss").exists());
}

#[tokio::test]
async fn test_refetch_replaces_previous_copy_and_is_not_new() {
    let upstream = TempDir::new().unwrap();
    common::git_repo_with_files(upstream.path(), &[("_a.scss", ".a {\n}\n")]);
    let project = TempDir::new().unwrap();
    let fetcher = ScmFetcher::new(ProjectLayout::new(project.path()));
    let pkg = scm_package("letters", upstream.path().to_str().unwrap(), None);

    let first = fetcher.fetch(LockList::new(), &pkg).await.unwrap();
    let stale = project.path().join("diamond/packages/letters/_stale.scss");
    std::fs::write(&stale, ".stale {\n}\n").unwrap();

    let second = fetcher.fetch(first.lock, &pkg).await.unwrap();

    assert!(!second.is_new);
    assert_eq!(second.lock.len(), 1);
    assert!(!stale.exists(), "refetch should start from a pristine copy");
}

#[tokio::test]
async fn test_unknown_reference_is_an_error() {
    let upstream = TempDir::new().unwrap();
    common::git_repo_with_files(upstream.path(), &[("_a.scss", ".a {\n}\n")]);
    let project = TempDir::new().unwrap();
    let fetcher = ScmFetcher::new(ProjectLayout::new(project.path()));
    let pkg = scm_package("letters", upstream.path().to_str().unwrap(), Some("no-such-tag"));

    let result = fetcher.fetch(LockList::new(), &pkg).await;

    assert!(matches!(result, Err(diamond_source::Error::GitClone { .. })));
}
