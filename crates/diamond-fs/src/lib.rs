//! Filesystem layer for diamond
//!
//! Resolves where packages, the lock document and compiled artifacts live
//! inside a host project, and provides the low-level I/O the installer
//! builds on: atomic replacement of files, an advisory lock file that
//! serializes installers, and the stylesheet walk.

pub mod constants;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;
pub mod walk;

pub use constants::DiamondPath;
pub use error::{Error, Result};
pub use io::FileLock;
pub use layout::ProjectLayout;
pub use path::{has_extension, validate_package_path};
pub use walk::collect_files;
