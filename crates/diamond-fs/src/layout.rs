//! Host project layout
//!
//! Everything diamond writes lives under `<root>/diamond`:
//!
//! ```text
//! <root>/diamond/
//!   config.toml
//!   .internal/packages.lock
//!   packages/<package.path>/
//!     diamond/dist/main.css
//!     diamond/packages/        (nested installs, never rewritten)
//! ```

use std::path::{Path, PathBuf};

use crate::{DiamondPath, Result, validate_package_path};

/// Resolves diamond paths for one host project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The host project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/diamond`
    pub fn diamond_dir(&self) -> PathBuf {
        self.root.join(DiamondPath::Root)
    }

    /// `<root>/diamond/packages`
    pub fn packages_root(&self) -> PathBuf {
        self.diamond_dir().join(DiamondPath::Packages)
    }

    /// `<root>/diamond/.internal`
    pub fn internal_dir(&self) -> PathBuf {
        self.diamond_dir().join(DiamondPath::Internal)
    }

    /// `<root>/diamond/.internal/packages.lock`
    pub fn lock_document(&self) -> PathBuf {
        self.internal_dir().join(DiamondPath::LockDocument)
    }

    /// Sidecar file holding the advisory lock for the lock document.
    pub fn lock_sidecar(&self) -> PathBuf {
        self.internal_dir()
            .join(format!("{}.lock", DiamondPath::LockDocument))
    }

    /// `<root>/diamond/config.toml`
    pub fn config_file(&self) -> PathBuf {
        self.diamond_dir().join(DiamondPath::Config)
    }

    /// Destination directory for a package, validated against escapes.
    pub fn package_dir(&self, package_path: &str) -> Result<PathBuf> {
        Ok(self.packages_root().join(validate_package_path(package_path)?))
    }

    /// `<package>/diamond/dist`
    pub fn dist_dir(package_dir: &Path) -> PathBuf {
        package_dir.join(DiamondPath::Root).join(DiamondPath::Dist)
    }

    /// `<package>/diamond/dist/main.css`
    pub fn compiled_css(package_dir: &Path) -> PathBuf {
        Self::dist_dir(package_dir).join(DiamondPath::CompiledCss)
    }

    /// `<package>/diamond/packages`, the nested install root skipped by rewrites.
    pub fn nested_packages(package_dir: &Path) -> PathBuf {
        package_dir.join(DiamondPath::Root).join(DiamondPath::Packages)
    }
}
