//! Install orchestration
//!
//! One install is a fixed sequence under a single hold of the lock
//! document:
//!
//! 1. read the lock list
//! 2. fetch the package with the fetcher for its source type
//! 3. install the package's own dependencies when it declares a capability
//! 4. create `<package>/diamond/dist`
//! 5. compile the entry stylesheet and namespace every partial
//! 6. write the lock list
//!
//! Any failure before step 6 leaves the lock document as it was.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use diamond_fs::ProjectLayout;
use diamond_source::{
    PackageDescriptor, RegistryFetcher, ScmFetcher, Source, SourceFetcher, SourceKind,
};
use diamond_style::{PipelineReport, SassCompiler, StylesheetCompiler, StylesheetPipeline};
use tracing::{debug, error, info, warn};

use crate::{
    Cancellation, Config, DependencyInstaller, Error, LockStore, NpmInstaller, Result,
};

/// Whether an install added a package or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    New,
    Updated,
}

impl fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Updated => write!(f, "updated"),
        }
    }
}

/// Outcome of a successful install.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallResult {
    /// The descriptor as resolved by the fetcher.
    pub package: PackageDescriptor,
    pub new_package: bool,
    /// `name@version` when the version is known, otherwise `name`.
    pub display_token: String,
    pub report: PipelineReport,
}

impl InstallResult {
    pub fn status(&self) -> InstallStatus {
        if self.new_package {
            InstallStatus::New
        } else {
            InstallStatus::Updated
        }
    }
}

impl fmt::Display for InstallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_token)
    }
}

/// Installs packages into one project.
///
/// Collaborators default to the real package manager, git and `sass`; the
/// `with_*` methods swap them out.
#[derive(Clone)]
pub struct Installer {
    layout: ProjectLayout,
    lock_store: LockStore,
    registry: Arc<dyn SourceFetcher>,
    scm: Arc<dyn SourceFetcher>,
    dependencies: Arc<dyn DependencyInstaller>,
    pipeline: StylesheetPipeline,
}

impl Installer {
    pub fn new(layout: ProjectLayout, config: &Config) -> Self {
        let registry = RegistryFetcher::new(layout.clone())
            .with_program(&config.npm)
            .with_default_registry(config.registry.clone());
        let scm = ScmFetcher::new(layout.clone());
        let dependencies = NpmInstaller::new().with_program(&config.npm);
        let compiler = SassCompiler::new().with_program(&config.sass);

        Self {
            lock_store: LockStore::new(&layout, config.lock_timeout()),
            layout,
            registry: Arc::new(registry),
            scm: Arc::new(scm),
            dependencies: Arc::new(dependencies),
            pipeline: StylesheetPipeline::new(Arc::new(compiler)),
        }
    }

    pub fn with_registry_fetcher(mut self, fetcher: Arc<dyn SourceFetcher>) -> Self {
        self.registry = fetcher;
        self
    }

    pub fn with_scm_fetcher(mut self, fetcher: Arc<dyn SourceFetcher>) -> Self {
        self.scm = fetcher;
        self
    }

    pub fn with_dependency_installer(mut self, installer: Arc<dyn DependencyInstaller>) -> Self {
        self.dependencies = installer;
        self
    }

    pub fn with_compiler(mut self, compiler: Arc<dyn StylesheetCompiler>) -> Self {
        self.pipeline = StylesheetPipeline::new(compiler);
        self
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_store = LockStore::new(&self.layout, timeout);
        self
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn lock_store(&self) -> &LockStore {
        &self.lock_store
    }

    fn fetcher_for(&self, source: &Source) -> &dyn SourceFetcher {
        match source.kind() {
            SourceKind::Registry => self.registry.as_ref(),
            SourceKind::Scm => self.scm.as_ref(),
        }
    }

    /// Install one package.
    pub async fn install(&self, package: &PackageDescriptor) -> Result<InstallResult> {
        self.install_with_cancel(package, &Cancellation::new()).await
    }

    /// Install one package, stopping early if `cancel` fires before the
    /// dependency install starts.
    pub async fn install_with_cancel(
        &self,
        package: &PackageDescriptor,
        cancel: &Cancellation,
    ) -> Result<InstallResult> {
        cancel.check()?;
        let hold = self.lock_store.acquire().await?;
        let lock = hold.read();
        debug!(package = %package.name, entries = lock.len(), "read lock list");

        let outcome = self.fetcher_for(&package.source).fetch(lock, package).await?;
        cancel.check()?;

        let resolved = outcome.package;
        let package_dir = self.layout.package_dir(&resolved.path)?;

        if resolved.needs_dependency_install() {
            info!("installing npm dependencies, this may take a little while");
            if let Err(err) = self.install_dependencies(&package_dir).await {
                error!(package = %resolved.name, error = %err, "dependency install failed");
                if let Err(unlock_err) = hold.unlock() {
                    warn!(error = %unlock_err, "failed to release lock document");
                }
                return Err(err);
            }
        }

        let dist = ProjectLayout::dist_dir(&package_dir);
        tokio::fs::create_dir_all(&dist)
            .await
            .map_err(|e| diamond_fs::Error::io(&dist, e))?;

        let report = self
            .pipeline
            .run(&package_dir, &resolved.name, resolved.main.as_deref())
            .await?;

        hold.write(&outcome.lock)?;
        hold.unlock()?;

        let result = InstallResult {
            display_token: resolved.display_token(),
            new_package: outcome.is_new,
            package: resolved,
            report,
        };
        info!(package = %result, status = %result.status(), "installed");
        Ok(result)
    }

    /// Run the dependency installer off the async runtime and wait for it.
    ///
    /// Every failure comes back as [`Error::DependencyInstall`].
    async fn install_dependencies(&self, package_dir: &Path) -> Result<()> {
        let dependencies = Arc::clone(&self.dependencies);
        let dir = package_dir.to_path_buf();

        let installed = tokio::task::spawn_blocking(move || dependencies.install_dependencies(&dir))
            .await
            .map_err(|e| Error::Task(e.to_string()))
            .and_then(|result| result);

        installed.map_err(|err| match err {
            err @ Error::DependencyInstall { .. } => err,
            other => Error::DependencyInstall {
                dir: package_dir.to_path_buf(),
                message: other.to_string(),
            },
        })
    }
}
