// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exclusive file lock with a bounded wait
//!
//! The lock is advisory and process-external: it serializes cooperating
//! processes that open the same path, not threads sharing one `Store`.

use fs2::FileExt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors from acquiring a file lock
#[derive(Debug, Error)]
pub enum LockError {
    #[error("timed out after {waited:?} waiting for lock on {}", .path.display())]
    Timeout { path: PathBuf, waited: Duration },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// An exclusive lock held on an open file, released on drop
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Lock `file` exclusively, retrying every `poll` until `timeout` elapses
    pub fn acquire(
        file: File,
        path: &Path,
        timeout: Duration,
        poll: Duration,
    ) -> Result<Self, LockError> {
        let start = Instant::now();
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    tracing::trace!(path = %path.display(), "lock acquired");
                    return Ok(Self {
                        file,
                        path: path.to_path_buf(),
                    });
                }
                Err(e) if is_contended(&e) => {
                    let waited = start.elapsed();
                    if waited >= timeout {
                        tracing::error!(
                            path = %path.display(),
                            waited_ms = waited.as_millis() as u64,
                            "lock timeout"
                        );
                        return Err(LockError::Timeout {
                            path: path.to_path_buf(),
                            waited,
                        });
                    }
                    std::thread::sleep(poll.min(timeout - waited));
                }
                Err(e) => return Err(LockError::Io(e)),
            }
        }
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn file_mut(&mut self) -> &mut File {
        &mut self.file
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to release lock");
        }
    }
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
