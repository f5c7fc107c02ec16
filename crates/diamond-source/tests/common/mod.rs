#![allow(dead_code)]

use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::path::Path;

/// Initialise a git repository at `path` and commit `files` to it.
pub fn git_repo_with_files(path: &Path, files: &[(&str, &str)]) -> git2::Oid {
    let repo = git2::Repository::init(path).expect("failed to init repository");
    commit_files(&repo, files, "Initial commit")
}

/// Write `files` into the work tree of `repo` and commit them on HEAD.
pub fn commit_files(repo: &git2::Repository, files: &[(&str, &str)], message: &str) -> git2::Oid {
    let workdir = repo.workdir().expect("repository has no work tree");
    for (name, content) in files {
        let file = workdir.join(name);
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(file, content).unwrap();
    }

    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = git2::Signature::now("Test User", "test@test.com").unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

/// Build a registry-style tarball with every file under `package/`.
pub fn registry_tarball(dest: &Path, files: &[(&str, &str)]) {
    let encoder = GzEncoder::new(fs::File::create(dest).unwrap(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, format!("package/{}", name), content.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}
