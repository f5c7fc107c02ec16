//! Project configuration
//!
//! Read from `diamond/config.toml`. Every key is optional:
//!
//! ```toml
//! npm = "pnpm"
//! sass = "/usr/local/bin/sass"
//! lock_timeout_ms = 0
//! registry = "https://registry.example.com"
//! ```

use std::time::Duration;

use diamond_fs::{ProjectLayout, io};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Default wait for the lock document before giving up.
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 30_000;

/// Settings for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Package manager used for registry fetches and dependency installs.
    pub npm: String,
    /// Stylesheet compiler executable.
    pub sass: String,
    /// How long to wait for another installer to release the lock.
    /// Zero fails immediately.
    pub lock_timeout_ms: u64,
    /// Registry used when a descriptor does not name one.
    pub registry: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            npm: "npm".to_string(),
            sass: "sass".to_string(),
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
            registry: None,
        }
    }
}

impl Config {
    /// Load the project configuration, falling back to defaults when the
    /// file does not exist.
    pub fn load(layout: &ProjectLayout) -> Result<Self> {
        let path = layout.config_file();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = io::read_text(&path)?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path,
            message: e.to_string(),
        })
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}
