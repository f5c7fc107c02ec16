//! External stylesheet compiler

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use diamond_fs::has_extension;
use tokio::process::Command;
use tracing::debug;

use crate::{Error, Result};

/// CSS output style requested from the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    Expanded,
    #[default]
    Compressed,
}

impl std::fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expanded => write!(f, "expanded"),
            Self::Compressed => write!(f, "compressed"),
        }
    }
}

/// Options passed alongside the entry file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub output_style: OutputStyle,
    /// Extra directories searched by `@use`/`@import`.
    pub load_paths: Vec<PathBuf>,
}

impl CompileOptions {
    pub fn compressed() -> Self {
        Self::default()
    }

    pub fn with_load_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.load_paths.push(path.into());
        self
    }
}

/// Turns a stylesheet entry file into CSS text.
#[async_trait]
pub trait StylesheetCompiler: Send + Sync {
    async fn compile(&self, entry: &Path, options: &CompileOptions) -> Result<String>;
}

/// Compiler backed by the `sass` command-line tool.
#[derive(Debug, Clone)]
pub struct SassCompiler {
    program: String,
}

impl SassCompiler {
    pub fn new() -> Self {
        Self {
            program: "sass".to_string(),
        }
    }

    /// Use a different `sass` executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for SassCompiler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StylesheetCompiler for SassCompiler {
    async fn compile(&self, entry: &Path, options: &CompileOptions) -> Result<String> {
        if !has_extension(entry, &["scss", "sass"]) {
            return Err(Error::UnsupportedEntry {
                path: entry.to_path_buf(),
            });
        }

        let mut cmd = Command::new(&self.program);
        cmd.arg(format!("--style={}", options.output_style))
            .arg("--no-source-map");
        for load_path in &options.load_paths {
            cmd.arg(format!("--load-path={}", load_path.display()));
        }
        cmd.arg(entry).stdin(Stdio::null());

        debug!(program = %self.program, entry = %entry.display(), "running compiler");
        let output = cmd.output().await.map_err(|e| Error::CompilerNotFound {
            program: self.program.clone(),
            message: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(Error::CompileFailed {
                path: entry.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| Error::CompileFailed {
            path: entry.to_path_buf(),
            message: format!("compiler produced invalid UTF-8: {}", e),
        })
    }
}
