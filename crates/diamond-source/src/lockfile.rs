//! Lock list entries
//!
//! The lock list is the JSON array persisted in `packages.lock`. Entries are
//! owned by the fetchers; everything else treats them as opaque and must
//! round-trip them, including keys this version does not know about.
//! Elements that do not look like an entry at all are kept verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{PackageDescriptor, Source};

/// One installed package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub path: String,
    /// Stored as written; see [`LockEntry::source`] for the typed view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
    /// Commit id or tarball integrity of the fetched content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
    /// Keys written by other versions of the installer.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LockEntry {
    pub fn from_package(package: &PackageDescriptor, resolved: Option<String>) -> Self {
        Self {
            name: package.name.clone(),
            version: package.version.clone(),
            path: package.path.clone(),
            source: serde_json::to_value(&package.source).ok(),
            resolved,
            extra: Map::new(),
        }
    }

    /// The recorded source, if it has a shape this version understands.
    pub fn source(&self) -> Option<Source> {
        self.source
            .clone()
            .and_then(|value| serde_json::from_value(value).ok())
    }
}

/// One element of the persisted array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum LockRecord {
    Entry(LockEntry),
    Raw(Value),
}

/// Ordered list of installed packages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockList {
    records: Vec<LockRecord>,
}

impl LockList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a lock document. Only a document that is not a JSON array fails.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Entries this version can read, in document order.
    pub fn iter(&self) -> impl Iterator<Item = &LockEntry> {
        self.records.iter().filter_map(|record| match record {
            LockRecord::Entry(entry) => Some(entry),
            LockRecord::Raw(_) => None,
        })
    }

    /// Number of elements in the document, unreadable ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find the entry for a package by name.
    pub fn find(&self, name: &str) -> Option<&LockEntry> {
        self.iter().find(|e| e.name == name)
    }

    /// Insert or replace the entry for `entry.name`.
    ///
    /// A replaced entry keeps its position and any unknown keys the new
    /// entry does not set. Returns `true` when the package was not listed.
    pub fn upsert(&mut self, mut entry: LockEntry) -> bool {
        let existing = self.records.iter_mut().find_map(|record| match record {
            LockRecord::Entry(existing) if existing.name == entry.name => Some(existing),
            _ => None,
        });
        match existing {
            Some(existing) => {
                for (key, value) in std::mem::take(&mut existing.extra) {
                    entry.extra.entry(key).or_insert(value);
                }
                *existing = entry;
                false
            }
            None => {
                self.records.push(LockRecord::Entry(entry));
                true
            }
        }
    }
}

impl<'a> IntoIterator for &'a LockList {
    type Item = &'a LockEntry;
    type IntoIter = Box<dyn Iterator<Item = &'a LockEntry> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
