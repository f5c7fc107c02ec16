//! Error types for diamond-core

use std::path::PathBuf;

/// Result type for diamond-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while installing a package
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The package manager could not install a package's own dependencies.
    ///
    /// This is the one failure that aborts a whole run.
    #[error("Failed to install dependencies in {dir}: {message}")]
    DependencyInstall { dir: PathBuf, message: String },

    /// Another installer held the lock document for the whole timeout
    #[error("Timed out waiting for the lock on {path}")]
    LockTimeout { path: PathBuf },

    /// The install was cancelled before it committed anything
    #[error("Install cancelled")]
    Cancelled,

    /// Project configuration could not be parsed
    #[error("Invalid configuration in {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A blocking task panicked or was aborted
    #[error("Background task failed: {0}")]
    Task(String),

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from diamond-fs
    #[error(transparent)]
    Fs(#[from] diamond_fs::Error),

    /// Fetch error from diamond-source
    #[error(transparent)]
    Source(#[from] diamond_source::Error),

    /// Stylesheet error from diamond-style
    #[error(transparent)]
    Style(#[from] diamond_style::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error must stop the whole run rather than just the
    /// current package.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DependencyInstall { .. })
    }
}
