//! Error types for diamond-source

use std::path::PathBuf;

use crate::SourceKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] diamond_fs::Error),

    #[error("Command not found: {command} ({message})")]
    CommandNotFound { command: String, message: String },

    #[error("Command failed: {command}: {message}")]
    CommandFailed { command: String, message: String },

    #[error("Unexpected registry response for {package}: {message}")]
    RegistryResponse { package: String, message: String },

    #[error("Failed to extract {path}: {message}")]
    Archive { path: PathBuf, message: String },

    #[error("Archive entry escapes the package directory: {entry}")]
    UnsafeArchiveEntry { entry: String },

    #[error("Failed to clone git repository {url}: {message}")]
    GitClone { url: String, message: String },

    #[error("Failed to read package manifest at {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("{fetcher} fetcher cannot fetch a {found} package")]
    SourceMismatch { fetcher: SourceKind, found: SourceKind },
}
