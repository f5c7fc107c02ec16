//! The shared record of installed packages
//!
//! The lock document itself is replaced by rename on every write, so the
//! exclusive hold lives on a sidecar file next to it. Every installer in
//! every process goes through the same sidecar.

use std::path::{Path, PathBuf};
use std::time::Duration;

use diamond_fs::{FileLock, ProjectLayout, io};
use diamond_source::LockList;
use tracing::{debug, warn};

use crate::{Error, Result};

/// Location and locking policy of a project's lock document.
#[derive(Debug, Clone)]
pub struct LockStore {
    document: PathBuf,
    sidecar: PathBuf,
    timeout: Duration,
}

impl LockStore {
    pub fn new(layout: &ProjectLayout, timeout: Duration) -> Self {
        Self {
            document: layout.lock_document(),
            sidecar: layout.lock_sidecar(),
            timeout,
        }
    }

    pub fn document(&self) -> &Path {
        &self.document
    }

    /// Read the lock list without taking the hold.
    ///
    /// Only suitable for display; an install must read through a
    /// [`LockHold`].
    pub fn read(&self) -> LockList {
        read_document(&self.document)
    }

    /// Take the exclusive hold, waiting up to the configured timeout.
    pub async fn acquire(&self) -> Result<LockHold> {
        let sidecar = self.sidecar.clone();
        let timeout = self.timeout;

        let lock = tokio::task::spawn_blocking(move || FileLock::acquire(&sidecar, timeout))
            .await
            .map_err(|e| Error::Task(e.to_string()))?
            .map_err(|e| match e {
                diamond_fs::Error::LockFailed { path } => Error::LockTimeout { path },
                other => Error::Fs(other),
            })?;

        debug!(path = %self.document.display(), "acquired lock document");
        Ok(LockHold {
            lock,
            document: self.document.clone(),
        })
    }
}

/// Exclusive right to read-modify-write the lock document.
///
/// Dropping the hold releases it.
#[derive(Debug)]
pub struct LockHold {
    lock: FileLock,
    document: PathBuf,
}

impl LockHold {
    /// Read the lock list. A missing or unreadable document is an empty list.
    pub fn read(&self) -> LockList {
        read_document(&self.document)
    }

    /// Replace the lock document atomically.
    pub fn write(&self, list: &LockList) -> Result<()> {
        let content = list.to_json()?;
        io::write_text(&self.document, &content)?;
        debug!(path = %self.document.display(), entries = list.len(), "wrote lock document");
        Ok(())
    }

    /// Release the hold, whether or not anything was written.
    pub fn unlock(self) -> Result<()> {
        self.lock.release()?;
        debug!(path = %self.document.display(), "released lock document");
        Ok(())
    }
}

fn read_document(path: &Path) -> LockList {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return LockList::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read lock document, starting empty");
            return LockList::new();
        }
    };

    LockList::from_json(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "lock document is corrupt, starting empty");
        LockList::new()
    })
}
