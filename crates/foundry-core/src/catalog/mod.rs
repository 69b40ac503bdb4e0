//! Catalog provider interface
//!
//! The catalog is the read-only bundle of distributable items, grouped by
//! category and then by [`ContentType`]. The engine only ever reads it
//! through [`CatalogProvider`]; where the bundle lives is up to the
//! implementation.

mod directory;
mod memory;

pub use directory::DirectoryCatalog;
pub use memory::MemoryCatalog;

use std::fmt;

use crate::content::{CatalogFile, ContentType};
use crate::{Error, Result};

/// Read-only access to the bundled catalog.
pub trait CatalogProvider {
    /// All category names, sorted.
    fn categories(&self) -> Result<Vec<String>>;

    /// Files in a category, optionally restricted to one type.
    ///
    /// # Errors
    ///
    /// `CategoryNotFound` if the category is absent; `TypeNotFound` if a
    /// type was requested and the category has no items of it.
    fn list_files(&self, category: &str, kind: Option<ContentType>) -> Result<Vec<CatalogFile>>;

    /// A single file.
    ///
    /// # Errors
    ///
    /// `CategoryNotFound` or `FileNotFound`.
    fn get_file(&self, category: &str, kind: ContentType, filename: &str) -> Result<CatalogFile>;
}

/// Which part of the catalog an operation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every file in every category
    All,
    /// Every file in one category
    Category(String),
    /// Files of one type in one category
    CategoryType(String, ContentType),
}

impl Selection {
    /// Build a selection from optional CLI-style parameters.
    pub fn from_parts(category: Option<&str>, kind: Option<ContentType>) -> Self {
        match (category, kind) {
            (None, _) => Self::All,
            (Some(c), None) => Self::Category(c.to_string()),
            (Some(c), Some(k)) => Self::CategoryType(c.to_string(), k),
        }
    }

    /// Fetch the files this selection covers.
    ///
    /// # Errors
    ///
    /// Any provider not-found error, or `EmptySelection` when the subset
    /// exists but contains nothing.
    pub fn resolve(&self, provider: &dyn CatalogProvider) -> Result<Vec<CatalogFile>> {
        let files = match self {
            Self::All => {
                let mut all = Vec::new();
                for category in provider.categories()? {
                    all.extend(provider.list_files(&category, None)?);
                }
                all
            }
            Self::Category(category) => provider.list_files(category, None)?,
            Self::CategoryType(category, kind) => provider.list_files(category, Some(*kind))?,
        };

        if files.is_empty() {
            return Err(Error::EmptySelection {
                selection: self.to_string(),
            });
        }

        tracing::debug!(selection = %self, count = files.len(), "Resolved catalog selection");
        Ok(files)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all categories"),
            Self::Category(c) => write!(f, "category '{}'", c),
            Self::CategoryType(c, k) => write!(f, "{} in category '{}'", k, c),
        }
    }
}
