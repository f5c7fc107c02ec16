//! Registry fetcher
//!
//! Downloads the package tarball with `npm pack` and unpacks it into the
//! destination directory.

use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use diamond_fs::ProjectLayout;
use flate2::read::GzDecoder;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info};

use crate::fetcher::{clear_destination, record};
use crate::{Error, FetchOutcome, LockList, PackageDescriptor, Result, Source, SourceFetcher, SourceKind};

/// One element of the JSON array printed by `npm pack --json`.
#[derive(Debug, Deserialize)]
struct PackedTarball {
    filename: String,
    version: String,
    #[serde(default)]
    integrity: Option<String>,
}

/// Fetches packages from a registry through the package manager.
#[derive(Debug, Clone)]
pub struct RegistryFetcher {
    layout: ProjectLayout,
    program: String,
    default_registry: Option<String>,
}

impl RegistryFetcher {
    pub fn new(layout: ProjectLayout) -> Self {
        Self {
            layout,
            program: "npm".to_string(),
            default_registry: None,
        }
    }

    /// Use a different package manager executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Registry used when a descriptor does not name one.
    pub fn with_default_registry(mut self, registry: Option<String>) -> Self {
        self.default_registry = registry;
        self
    }

    fn package_spec(package: &PackageDescriptor) -> String {
        match &package.version {
            Some(version) => format!("{}@{}", package.name, version),
            None => package.name.clone(),
        }
    }

    async fn pack(&self, spec: &str, registry: Option<&str>, staging: &Path) -> Result<PackedTarball> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("pack")
            .arg(spec)
            .arg("--json")
            .arg("--pack-destination")
            .arg(staging)
            .current_dir(staging)
            .stdin(Stdio::null());
        if let Some(registry) = registry {
            cmd.args(["--registry", registry]);
        }

        let command = format!("{} pack {}", self.program, spec);
        let output = cmd.output().await.map_err(|e| Error::CommandNotFound {
            command: self.program.clone(),
            message: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let packed: Vec<PackedTarball> =
            serde_json::from_slice(&output.stdout).map_err(|e| Error::RegistryResponse {
                package: spec.to_string(),
                message: e.to_string(),
            })?;

        packed.into_iter().next().ok_or_else(|| Error::RegistryResponse {
            package: spec.to_string(),
            message: "no tarball reported".to_string(),
        })
    }
}

#[async_trait]
impl SourceFetcher for RegistryFetcher {
    fn kind(&self) -> SourceKind {
        SourceKind::Registry
    }

    async fn fetch(&self, lock: LockList, package: &PackageDescriptor) -> Result<FetchOutcome> {
        let Source::Registry { registry } = &package.source else {
            return Err(Error::SourceMismatch {
                fetcher: self.kind(),
                found: package.source.kind(),
            });
        };
        let registry = registry.as_deref().or(self.default_registry.as_deref());

        let dest = self.layout.package_dir(&package.path)?;
        let staging = tempfile::tempdir().map_err(|e| diamond_fs::Error::io(std::env::temp_dir(), e))?;

        let spec = Self::package_spec(package);
        info!(package = %spec, "fetching from registry");
        let packed = self.pack(&spec, registry, staging.path()).await?;
        debug!(tarball = %packed.filename, version = %packed.version, "packed");

        let tarball = staging.path().join(&packed.filename);
        let target = dest.clone();
        tokio::task::spawn_blocking(move || {
            clear_destination(&target)?;
            extract_tarball(&tarball, &target)
        })
        .await
        .map_err(|e| Error::Task(e.to_string()))??;

        let mut resolved = package.clone();
        resolved.version = Some(packed.version);
        record(lock, &resolved, &dest, packed.integrity)
    }
}

/// Unpack a gzip tarball into `dest`, dropping the leading directory that
/// registry tarballs wrap their content in.
///
/// Link entries are refused along with paths that leave `dest`.
pub fn extract_tarball(tarball: &Path, dest: &Path) -> Result<()> {
    let archive_error = |e: std::io::Error| Error::Archive {
        path: tarball.to_path_buf(),
        message: e.to_string(),
    };

    let file = File::open(tarball).map_err(|e| diamond_fs::Error::io(tarball, e))?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));
    fs::create_dir_all(dest).map_err(|e| diamond_fs::Error::io(dest, e))?;

    for entry in archive.entries().map_err(archive_error)? {
        let mut entry = entry.map_err(archive_error)?;
        let entry_path = entry.path().map_err(archive_error)?.into_owned();

        let relative: PathBuf = entry_path.components().skip(1).collect();
        if relative.as_os_str().is_empty() {
            continue;
        }
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(Error::UnsafeArchiveEntry {
                entry: entry_path.display().to_string(),
            });
        }

        if matches!(
            entry.header().entry_type(),
            tar::EntryType::Symlink | tar::EntryType::Link
        ) {
            return Err(Error::UnsafeArchiveEntry {
                entry: entry_path.display().to_string(),
            });
        }

        let target = dest.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| diamond_fs::Error::io(parent, e))?;
        }
        entry.unpack(&target).map_err(archive_error)?;
    }

    Ok(())
}
