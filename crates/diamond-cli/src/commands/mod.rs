//! Command implementations for diamond-cli

pub mod install;
pub mod list;
pub mod spec;

pub use install::run_install;
pub use list::run_list;

use diamond_core::Config;
use diamond_fs::ProjectLayout;

use crate::cli::Cli;
use crate::error::Result;

/// The project a command runs against, with its effective configuration.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub layout: ProjectLayout,
    pub config: Config,
}

impl ProjectContext {
    /// Read `diamond/config.toml` and apply command-line overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let layout = ProjectLayout::new(&cli.project);
        let mut config = Config::load(&layout)?;

        if let Some(npm) = &cli.npm {
            config.npm = npm.clone();
        }
        if let Some(sass) = &cli.sass {
            config.sass = sass.clone();
        }
        if let Some(timeout) = cli.lock_timeout_ms {
            config.lock_timeout_ms = timeout;
        }

        tracing::debug!(root = %layout.root().display(), ?config, "loaded project");
        Ok(Self { layout, config })
    }
}
