//! Install orchestration for diamond
//!
//! Ties the lower crates together into a single install operation:
//!
//! - **Lock Store**: exclusive, atomic access to `diamond/.internal/packages.lock`
//! - **Dependency installer**: runs the package manager for packages that
//!   declare build-time capabilities
//! - **Installer**: fetch, dependency install, stylesheet pipeline and lock
//!   update, in that order, under one lock hold
//!
//! # Architecture
//!
//! ```text
//!                  diamond-cli
//!                       |
//!                  diamond-core
//!                       |
//!       +---------------+---------------+
//!       |               |               |
//! diamond-source  diamond-style    diamond-fs
//! ```
//!
//! # Example
//!
//! ```ignore
//! use diamond_core::{Config, Installer};
//! use diamond_fs::ProjectLayout;
//! use diamond_source::PackageDescriptor;
//!
//! async fn example() -> diamond_core::Result<()> {
//!     let layout = ProjectLayout::new(".");
//!     let config = Config::load(&layout)?;
//!     let installer = Installer::new(layout, &config);
//!     let result = installer.install(&PackageDescriptor::registry("widgets")).await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

pub mod cancel;
pub mod config;
pub mod dependencies;
pub mod error;
pub mod installer;
pub mod lock_store;

pub use cancel::Cancellation;
pub use config::Config;
pub use dependencies::{DependencyInstaller, NpmInstaller};
pub use error::{Error, Result};
pub use installer::{InstallResult, InstallStatus, Installer};
pub use lock_store::{LockHold, LockStore};
