//! Constants for the diamond directory layout.

use std::path::Path;

/// Well-known names inside a host project's `diamond/` tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiamondPath {
    /// The `diamond` directory at the project root
    Root,
    /// The `packages` directory holding installed packages
    Packages,
    /// The `.internal` directory holding installer state
    Internal,
    /// The `packages.lock` document listing installed packages
    LockDocument,
    /// The `dist` directory holding compiled artifacts
    Dist,
    /// The compiled stylesheet written for a package entry point
    CompiledCss,
    /// The optional `config.toml` file
    Config,
}

impl DiamondPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "diamond",
            Self::Packages => "packages",
            Self::Internal => ".internal",
            Self::LockDocument => "packages.lock",
            Self::Dist => "dist",
            Self::CompiledCss => "main.css",
            Self::Config => "config.toml",
        }
    }
}

impl AsRef<Path> for DiamondPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for DiamondPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for DiamondPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
