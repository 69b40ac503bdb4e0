//! Error types for foundry-core

use std::path::PathBuf;

use crate::content::ContentType;

/// Result type for foundry-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in foundry-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Requested category is not part of the catalog
    #[error("Category not found in catalog: {category}")]
    CategoryNotFound { category: String },

    /// Category exists but has no items of the requested type
    #[error("No {kind} found in category '{category}'")]
    TypeNotFound { category: String, kind: ContentType },

    /// Requested catalog file does not exist
    #[error("Catalog file not found: {category}/{kind}/{filename}")]
    FileNotFound {
        category: String,
        kind: ContentType,
        filename: String,
    },

    /// The requested catalog subset resolved to nothing
    #[error("Nothing to install: {selection} contains no files")]
    EmptySelection { selection: String },

    /// Type name not recognized
    #[error("Unknown content type: {name} (expected commands, agents or skills)")]
    UnknownContentType { name: String },

    /// Catalog entry has a name that cannot be installed safely
    #[error("Invalid catalog entry: {message}")]
    InvalidEntry { message: String },

    /// State document exists but cannot be decoded
    #[error("Failed to parse state file {path}: {message}")]
    StateParse { path: PathBuf, message: String },

    /// Writing an item during install/update failed
    #[error("Failed to install {category}/{kind} to {path}: {source}")]
    InstallFailed {
        path: PathBuf,
        category: String,
        kind: ContentType,
        #[source]
        source: foundry_fs::Error,
    },

    /// Deleting an item during removal failed
    #[error("Failed to remove {category}/{kind} at {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        category: String,
        kind: ContentType,
        #[source]
        source: foundry_fs::Error,
    },

    /// Settings file exists but is invalid
    #[error("Invalid settings at {path}: {message}")]
    Settings { path: PathBuf, message: String },

    /// The home directory could not be determined
    #[error("Could not determine the home directory")]
    HomeDirUnavailable,

    /// Filesystem error from foundry-fs
    #[error(transparent)]
    Fs(#[from] foundry_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error means "the catalog does not have it".
    ///
    /// These are raised before anything is touched on disk.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::CategoryNotFound { .. }
                | Error::TypeNotFound { .. }
                | Error::FileNotFound { .. }
                | Error::EmptySelection { .. }
        )
    }
}
