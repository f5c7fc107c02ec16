//! Atomic writes and advisory file locking

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use backoff::ExponentialBackoff;
use fs2::FileExt;
use tracing::debug;

use crate::{Error, Result};

/// Write content atomically to a file.
///
/// Content goes to a temp file in the same directory, is flushed to disk,
/// then renamed over the target. A reader sees the old or the new content,
/// never a partial write.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

    let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(|e| Error::io(parent, e))?;
    temp.write_all(content)
        .map_err(|e| Error::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| Error::io(temp.path(), e))?;

    temp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// An exclusive advisory lock held on a sidecar file.
///
/// The lock is tied to the open file handle: dropping the value (or the
/// process dying) releases it.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Acquire an exclusive lock on `path`, creating the file if needed.
    ///
    /// Retries with exponential backoff until `timeout` elapses. A zero
    /// timeout makes exactly one attempt.
    pub fn acquire(path: &Path, timeout: Duration) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| Error::io(path, e))?;

        let locked = if timeout.is_zero() {
            file.try_lock_exclusive().is_ok()
        } else {
            let policy = ExponentialBackoff {
                initial_interval: Duration::from_millis(20),
                max_interval: Duration::from_millis(500),
                max_elapsed_time: Some(timeout),
                ..Default::default()
            };
            backoff::retry(policy, || {
                file.try_lock_exclusive().map_err(|e| {
                    debug!(path = %path.display(), "lock busy, retrying: {e}");
                    backoff::Error::transient(e)
                })
            })
            .is_ok()
        };

        if !locked {
            return Err(Error::LockFailed {
                path: path.to_path_buf(),
            });
        }

        debug!(path = %path.display(), "lock acquired");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Path of the sidecar file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock explicitly.
    pub fn release(self) -> Result<()> {
        FileExt::unlock(&self.file).map_err(|_| Error::LockFailed {
            path: self.path.clone(),
        })?;
        debug!(path = %self.path.display(), "lock released");
        Ok(())
    }
}
