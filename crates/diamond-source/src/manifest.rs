//! Package manifest (`package.json`) reading

use std::path::Path;

use serde::Deserialize;

use crate::{Error, PackageDescriptor, Result};

/// File name of the manifest shipped inside a fetched package.
pub const MANIFEST_FILENAME: &str = "package.json";

/// The subset of `package.json` the installer reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub diamond: Option<DiamondSection>,
}

/// The `diamond` object of a manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiamondSection {
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub post_compile: bool,
    #[serde(default)]
    pub functions: bool,
    #[serde(default)]
    pub importer: bool,
}

impl PackageManifest {
    /// Load the manifest from a package directory.
    ///
    /// Returns `Ok(None)` when the package ships no manifest.
    pub fn load(package_dir: &Path) -> Result<Option<Self>> {
        let path = package_dir.join(MANIFEST_FILENAME);
        if !path.is_file() {
            return Ok(None);
        }

        let content = diamond_fs::io::read_text(&path)?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| Error::Manifest {
                path,
                message: e.to_string(),
            })
    }

    /// Fill the gaps of `descriptor` from this manifest.
    ///
    /// Values set on the descriptor win. The entry file comes from
    /// `diamond.main` before the top-level `main`.
    pub fn resolve(&self, descriptor: &PackageDescriptor) -> PackageDescriptor {
        let section = self.diamond.clone().unwrap_or_default();
        let mut resolved = descriptor.clone();

        resolved.version = resolved.version.or_else(|| self.version.clone());
        resolved.main = resolved
            .main
            .or(section.main)
            .or_else(|| self.main.clone());
        resolved.post_compile |= section.post_compile;
        resolved.functions |= section.functions;
        resolved.importer |= section.importer;

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_manifest_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(PackageManifest::load(temp.path()).unwrap().is_none());
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(MANIFEST_FILENAME), "{").unwrap();

        let result = PackageManifest::load(temp.path());
        assert!(matches!(result, Err(Error::Manifest { .. })));
    }

    #[test]
    fn manifest_fills_unset_fields() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(MANIFEST_FILENAME),
            r#"{
                "name": "widgets",
                "version": "3.1.0",
                "main": "index.js",
                "diamond": { "main": "styles/main.scss", "functions": true }
            }"#,
        )
        .unwrap();

        let manifest = PackageManifest::load(temp.path()).unwrap().unwrap();
        let resolved = manifest.resolve(&PackageDescriptor::registry("widgets"));

        assert_eq!(resolved.version.as_deref(), Some("3.1.0"));
        assert_eq!(resolved.main.as_deref(), Some("styles/main.scss"));
        assert!(resolved.functions);
        assert!(!resolved.importer);
    }

    #[test]
    fn descriptor_values_take_precedence() {
        let manifest = PackageManifest {
            version: Some("3.1.0".into()),
            main: Some("index.js".into()),
            diamond: None,
        };
        let descriptor = PackageDescriptor::registry("widgets")
            .with_version("2.0.0")
            .with_main("lib/_index.scss");

        let resolved = manifest.resolve(&descriptor);

        assert_eq!(resolved.version.as_deref(), Some("2.0.0"));
        assert_eq!(resolved.main.as_deref(), Some("lib/_index.scss"));
    }
}
