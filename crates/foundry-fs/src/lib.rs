//! Filesystem primitives for CC Foundry
//!
//! Provides normalized paths, content hashing and the small set of
//! write/delete operations the installer and diagnostics build on.

pub mod checksum;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use checksum::{content_hash, file_hash};
pub use constants::FoundryPath;
pub use error::{Error, Result};
pub use path::{NormalizedPath, validate_path_identifier};
