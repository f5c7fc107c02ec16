//! Package descriptors and sources

use serde::{Deserialize, Serialize};

/// Where a package is fetched from.
///
/// Parsing rejects any other `type`, so an install can only ever be
/// dispatched to one of the two fetchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    /// A package registry, resolved through the package manager.
    #[serde(alias = "npm")]
    Registry {
        /// Registry URL overriding the package manager's default.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        registry: Option<String>,
    },
    /// A source-control repository.
    #[serde(alias = "github")]
    Scm {
        /// Clone URL, or a `user/repo` shorthand for GitHub.
        url: String,
        /// Tag, branch or commit to check out.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference: Option<String>,
    },
}

impl Source {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Registry { .. } => SourceKind::Registry,
            Self::Scm { .. } => SourceKind::Scm,
        }
    }
}

/// Discriminant of [`Source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Registry,
    Scm,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry => write!(f, "registry"),
            Self::Scm => write!(f, "scm"),
        }
    }
}

/// A package to install, or the resolved record a fetcher hands back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub source: Source,
    /// Entry file, relative to the package directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub post_compile: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub functions: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub importer: bool,
    /// Destination directory relative to the packages root.
    pub path: String,
}

impl PackageDescriptor {
    /// A registry package installed under its own name.
    pub fn registry(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            name,
            version: None,
            source: Source::Registry { registry: None },
            main: None,
            post_compile: false,
            functions: false,
            importer: false,
        }
    }

    /// A source-control package installed under `name`.
    pub fn scm(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            source: Source::Scm {
                url: url.into(),
                reference: None,
            },
            ..Self::registry(name)
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_main(mut self, main: impl Into<String>) -> Self {
        self.main = Some(main.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Whether the package ships server-side code that needs its own
    /// dependencies installed.
    pub fn needs_dependency_install(&self) -> bool {
        self.post_compile || self.functions || self.importer
    }

    /// `name@version` when the version is known, otherwise `name`.
    pub fn display_token(&self) -> String {
        match &self.version {
            Some(version) if !self.name.is_empty() => format!("{}@{}", self.name, version),
            _ => self.name.clone(),
        }
    }
}

/// Expand a `user/repo` shorthand into a GitHub clone URL.
///
/// URLs with a scheme, scp-style `git@host:` addresses and filesystem paths
/// are returned unchanged.
pub fn resolve_scm_url(url: &str) -> String {
    let is_shorthand = !url.contains(':')
        && !url.starts_with('/')
        && !url.starts_with('.')
        && url.split('/').count() == 2
        && url.split('/').all(|part| !part.is_empty());

    if is_shorthand {
        format!("https://github.com/{}.git", url.trim_end_matches(".git"))
    } else {
        url.to_string()
    }
}
