//! In-memory collaborators for installer tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use diamond_core::{Cancellation, Config, DependencyInstaller, Installer};
use diamond_fs::ProjectLayout;
use diamond_source::{FetchOutcome, LockEntry, LockList, PackageDescriptor, SourceFetcher, SourceKind};
use diamond_style::{CompileOptions, StylesheetCompiler};

/// Writes fixed files into the destination and records the package.
pub struct FakeFetcher {
    pub layout: ProjectLayout,
    pub kind: SourceKind,
    pub files: Vec<(&'static str, &'static str)>,
    pub version: Option<&'static str>,
    pub main: Option<&'static str>,
    pub functions: bool,
    pub fail: bool,
    /// Fired during the fetch, to cancel an install already past the lock.
    pub cancel_during_fetch: Option<Cancellation>,
    /// Size of the lock list handed to each fetch.
    pub seen: Mutex<Vec<usize>>,
}

impl FakeFetcher {
    pub fn new(layout: ProjectLayout, kind: SourceKind) -> Self {
        Self {
            layout,
            kind,
            files: Vec::new(),
            version: None,
            main: None,
            functions: false,
            fail: false,
            cancel_during_fetch: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl SourceFetcher for FakeFetcher {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(
        &self,
        mut lock: LockList,
        package: &PackageDescriptor,
    ) -> diamond_source::Result<FetchOutcome> {
        self.seen.lock().unwrap().push(lock.len());
        if let Some(cancel) = &self.cancel_during_fetch {
            cancel.cancel();
        }
        if self.fail {
            return Err(diamond_source::Error::CommandFailed {
                command: format!("npm pack {}", package.name),
                message: "404 Not Found".to_string(),
            });
        }

        let dest = self.layout.package_dir(&package.path)?;
        if dest.exists() {
            fs::remove_dir_all(&dest).unwrap();
        }
        fs::create_dir_all(&dest).unwrap();
        for (relative, content) in &self.files {
            write(&dest, relative, content);
        }

        let mut resolved = package.clone();
        if resolved.version.is_none() {
            resolved.version = self.version.map(str::to_string);
        }
        if resolved.main.is_none() {
            resolved.main = self.main.map(str::to_string);
        }
        resolved.functions |= self.functions;

        let is_new = lock.upsert(LockEntry::from_package(&resolved, Some("sha512-fake".to_string())));
        Ok(FetchOutcome {
            lock,
            package: resolved,
            is_new,
        })
    }
}

/// Returns fixed CSS and records entry files.
#[derive(Default)]
pub struct FakeCompiler {
    pub css: String,
    pub fail: bool,
    pub calls: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl StylesheetCompiler for FakeCompiler {
    async fn compile(&self, entry: &Path, _options: &CompileOptions) -> diamond_style::Result<String> {
        self.calls.lock().unwrap().push(entry.to_path_buf());
        if self.fail {
            return Err(diamond_style::Error::CompileFailed {
                path: entry.to_path_buf(),
                message: "Undefined variable".to_string(),
            });
        }
        Ok(self.css.clone())
    }
}

/// Records the directories it was asked to install into.
#[derive(Default)]
pub struct FakeDependencies {
    pub fail: bool,
    pub calls: Mutex<Vec<PathBuf>>,
}

impl DependencyInstaller for FakeDependencies {
    fn install_dependencies(&self, package_dir: &Path) -> diamond_core::Result<()> {
        self.calls.lock().unwrap().push(package_dir.to_path_buf());
        if self.fail {
            return Err(diamond_core::Error::DependencyInstall {
                dir: package_dir.to_path_buf(),
                message: "npm ERR! code ERESOLVE".to_string(),
            });
        }
        Ok(())
    }
}

/// A project rooted at `root` with every collaborator faked.
pub struct Harness {
    pub layout: ProjectLayout,
    pub registry: Arc<FakeFetcher>,
    pub scm: Arc<FakeFetcher>,
    pub compiler: Arc<FakeCompiler>,
    pub dependencies: Arc<FakeDependencies>,
}

impl Harness {
    pub fn new(root: &Path) -> Self {
        let layout = ProjectLayout::new(root);
        Self {
            registry: Arc::new(FakeFetcher::new(layout.clone(), SourceKind::Registry)),
            scm: Arc::new(FakeFetcher::new(layout.clone(), SourceKind::Scm)),
            compiler: Arc::new(FakeCompiler {
                css: ".a{color:red}".to_string(),
                ..Default::default()
            }),
            dependencies: Arc::new(FakeDependencies::default()),
            layout,
        }
    }

    pub fn installer(&self) -> Installer {
        Installer::new(self.layout.clone(), &Config::default())
            .with_registry_fetcher(self.registry.clone())
            .with_scm_fetcher(self.scm.clone())
            .with_compiler(self.compiler.clone())
            .with_dependency_installer(self.dependencies.clone())
    }

    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.layout.package_dir(name).unwrap()
    }
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
