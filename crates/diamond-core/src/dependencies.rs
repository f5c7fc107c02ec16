//! Package-manager dependency install
//!
//! Packages that ship build-time code (`postCompile`, `functions`,
//! `importer`) need their own `node_modules` before anything can use them.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::{Error, Result};

/// Installs a package's own dependencies inside its directory.
///
/// Blocking: the call returns once the install has finished.
pub trait DependencyInstaller: Send + Sync {
    fn install_dependencies(&self, package_dir: &Path) -> Result<()>;
}

/// Runs `<npm> install` in the package directory.
#[derive(Debug, Clone)]
pub struct NpmInstaller {
    program: String,
}

impl NpmInstaller {
    pub fn new() -> Self {
        Self {
            program: "npm".to_string(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for NpmInstaller {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyInstaller for NpmInstaller {
    fn install_dependencies(&self, package_dir: &Path) -> Result<()> {
        let failed = |message: String| Error::DependencyInstall {
            dir: package_dir.to_path_buf(),
            message,
        };

        debug!(program = %self.program, dir = %package_dir.display(), "running dependency install");
        let output = Command::new(&self.program)
            .arg("install")
            .current_dir(package_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| failed(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("{} install exited with {}", self.program, output.status)
            } else {
                stderr
            };
            return Err(failed(message));
        }

        Ok(())
    }
}
