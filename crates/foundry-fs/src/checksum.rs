//! SHA-256 content hashing
//!
//! Installation records store the lowercase hex digest of the exact bytes
//! written, with no prefix, so the same value can be compared against a
//! hash of the file found on disk later.

use sha2::{Digest, Sha256};
use std::path::Path;

/// Compute the hex SHA-256 digest of raw content.
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Compute the hex SHA-256 digest of a file's contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn file_hash(path: &Path) -> std::io::Result<String> {
    let content = std::fs::read(path)?;
    Ok(content_hash(&content))
}
