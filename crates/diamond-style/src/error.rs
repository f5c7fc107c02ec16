//! Error types for diamond-style

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] diamond_fs::Error),

    #[error("Stylesheet compiler not found: {program} ({message})")]
    CompilerNotFound { program: String, message: String },

    #[error("Failed to compile {path}: {message}")]
    CompileFailed { path: PathBuf, message: String },

    #[error("No compiler available for {path}")]
    UnsupportedEntry { path: PathBuf },
}
