//! Atomic writes and idempotent deletes

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::{Error, NormalizedPath, Result};

/// Write `content` to `path` so readers see either the old or the new file.
///
/// Missing parent directories are created. The bytes are staged in a
/// randomly named sibling, flushed to disk and then persisted over the
/// target. The staging file is cleaned up if anything fails.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;

    let mut staged = tempfile::Builder::new()
        .prefix(".ccf-")
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(|e| Error::io(&dir, e))?;
    staged
        .write_all(content)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| Error::io(staged.path(), e))?;

    staged
        .persist(&target)
        .map_err(|e| Error::io(&target, e.error))?;
    tracing::trace!(path = %path, bytes = content.len(), "Wrote file");
    Ok(())
}

/// Read raw bytes from a file.
pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    fs::read(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read a file, treating absence as `None`.
pub fn read_bytes_if_exists(path: &NormalizedPath) -> Result<Option<Vec<u8>>> {
    let native_path = path.to_native();
    match fs::read(&native_path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}

/// Delete a single file.
///
/// Returns `Ok(false)` when there was nothing to delete.
pub fn remove_file_if_exists(path: &NormalizedPath) -> Result<bool> {
    let native_path = path.to_native();
    match fs::remove_file(&native_path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path, "File already absent");
            Ok(false)
        }
        Err(e) => Err(Error::io(&native_path, e)),
    }
}

/// Recursively delete a directory.
///
/// Returns `Ok(false)` when there was nothing to delete.
pub fn remove_dir_if_exists(path: &NormalizedPath) -> Result<bool> {
    let native_path = path.to_native();
    match fs::remove_dir_all(&native_path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path, "Directory already absent");
            Ok(false)
        }
        Err(e) => Err(Error::io(&native_path, e)),
    }
}
