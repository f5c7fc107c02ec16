//! Compile-then-namespace pipeline for one package

use std::path::{Path, PathBuf};
use std::sync::Arc;

use diamond_fs::{ProjectLayout, collect_files, has_extension, io, validate_package_path};
use tracing::{debug, info};

use crate::{CompileOptions, Result, StylesheetCompiler, namespace_token, rewrite_selectors};

/// Entry extensions that trigger compilation.
pub const SOURCE_EXTENSIONS: &[&str] = &["sass", "scss", "less"];

/// Extensions of partials that get namespaced.
pub const PARTIAL_EXTENSIONS: &[&str] = &["scss", "sass"];

/// What the pipeline did to a package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// The compiled CSS file, when the entry was a stylesheet.
    pub compiled: Option<PathBuf>,
    /// Partials whose content changed.
    pub rewritten: Vec<PathBuf>,
}

/// Runs entry compilation and then the namespace rewrite.
#[derive(Clone)]
pub struct StylesheetPipeline {
    compiler: Arc<dyn StylesheetCompiler>,
}

impl StylesheetPipeline {
    pub fn new(compiler: Arc<dyn StylesheetCompiler>) -> Self {
        Self { compiler }
    }

    /// Compile `main` if it is a stylesheet, then namespace every partial
    /// under `package_dir` with the token derived from `name`.
    pub async fn run(&self, package_dir: &Path, name: &str, main: Option<&str>) -> Result<PipelineReport> {
        let compiled = self.compile_entry(package_dir, main).await?;
        let rewritten = namespace_partials(package_dir, name)?;
        Ok(PipelineReport {
            compiled,
            rewritten,
        })
    }

    /// Compile the entry stylesheet to `diamond/dist/main.css`.
    ///
    /// Returns `Ok(None)` without touching the filesystem when `main` is
    /// absent or not a stylesheet.
    pub async fn compile_entry(&self, package_dir: &Path, main: Option<&str>) -> Result<Option<PathBuf>> {
        let Some(main) = main else {
            return Ok(None);
        };
        if !has_extension(Path::new(main), SOURCE_EXTENSIONS) {
            debug!(%main, "entry is not a stylesheet, skipping compilation");
            return Ok(None);
        }
        let relative = validate_package_path(main)?;

        let entry_path = package_dir.join(&relative);
        let entry = dunce::canonicalize(&entry_path)
            .map_err(|e| diamond_fs::Error::io(&entry_path, e))?;

        let mut options = CompileOptions::compressed();
        let node_modules = package_dir.join("node_modules");
        if node_modules.is_dir() {
            options = options.with_load_path(node_modules);
        }

        info!(%main, "compiling");
        let css = self.compiler.compile(&entry, &options).await?;

        let output = ProjectLayout::compiled_css(package_dir);
        io::write_text(&output, &css)?;
        debug!(path = %output.display(), bytes = css.len(), "wrote compiled stylesheet");
        Ok(Some(output))
    }
}

/// Namespace every stylesheet partial under `package_dir`.
///
/// Nested installs under `<package>/diamond/packages` are left alone. Files
/// are only written when the rewrite changed them.
pub fn namespace_partials(package_dir: &Path, name: &str) -> Result<Vec<PathBuf>> {
    let token = namespace_token(name);
    let skip = [ProjectLayout::nested_packages(package_dir)];
    let mut rewritten = Vec::new();

    for file in collect_files(package_dir, &skip, PARTIAL_EXTENSIONS)? {
        let content = io::read_text(&file)?;
        let updated = rewrite_selectors(&content, &token);
        if updated != content {
            io::write_text(&file, &updated)?;
            rewritten.push(file);
        }
    }

    debug!(package = %name, %token, files = rewritten.len(), "namespaced partials");
    Ok(rewritten)
}
