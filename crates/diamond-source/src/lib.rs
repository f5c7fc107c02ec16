//! Package model and source fetchers for diamond.
//!
//! A [`PackageDescriptor`] names a package and where it comes from. A
//! [`SourceFetcher`] turns a descriptor into files under the packages root
//! and records the result in the [`LockList`].

pub mod error;
pub mod fetcher;
pub mod lockfile;
pub mod manifest;
pub mod package;
pub mod registry;
pub mod scm;

pub use error::{Error, Result};
pub use fetcher::{FetchOutcome, SourceFetcher};
pub use lockfile::{LockEntry, LockList};
pub use manifest::{DiamondSection, MANIFEST_FILENAME, PackageManifest};
pub use package::{PackageDescriptor, Source, SourceKind, resolve_scm_url};
pub use registry::RegistryFetcher;
pub use scm::ScmFetcher;
