//! Catalog backed by a bundle directory on disk
//!
//! Expected layout:
//!
//! ```text
//! <root>/
//!   categories/
//!     development/
//!       commands/deploy.md
//!       agents/reviewer.md
//!       skills/makefile-guide.md
//! ```

use std::fs;
use std::io::ErrorKind;

use foundry_fs::NormalizedPath;

use super::CatalogProvider;
use crate::content::{CatalogFile, ContentType};
use crate::{Error, Result};

/// Reads catalog items from `<root>/categories/<category>/<type>/*.md`.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    root: NormalizedPath,
}

impl DirectoryCatalog {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self { root: root.into() }
    }

    /// The bundle root.
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    fn categories_dir(&self) -> NormalizedPath {
        self.root.join("categories")
    }

    fn category_dir(&self, category: &str) -> Result<NormalizedPath> {
        let dir = self.categories_dir().join(category);
        if foundry_fs::validate_path_identifier(category, "Category").is_err() || !dir.is_dir() {
            return Err(Error::CategoryNotFound {
                category: category.to_string(),
            });
        }
        Ok(dir)
    }

    /// Read every `*.md` regular file of one type, sorted by filename.
    ///
    /// Returns `None` when the type directory does not exist.
    fn read_type_dir(
        &self,
        category: &str,
        category_dir: &NormalizedPath,
        kind: ContentType,
    ) -> Result<Option<Vec<CatalogFile>>> {
        let type_dir = category_dir.join(kind.dir_name());
        let entries = match fs::read_dir(type_dir.to_native()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(foundry_fs::Error::io(type_dir.to_native(), e).into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| foundry_fs::Error::io(type_dir.to_native(), e))?;
            let name = entry.file_name().to_string_lossy().to_string();
            if entry.path().is_file() && name.ends_with(".md") {
                names.push(name);
            }
        }
        names.sort();

        let mut files = Vec::with_capacity(names.len());
        for name in names {
            let content = foundry_fs::io::read_bytes(&type_dir.join(&name))?;
            files.push(CatalogFile::new(category, kind, name, content));
        }
        Ok(Some(files))
    }
}

impl CatalogProvider for DirectoryCatalog {
    fn categories(&self) -> Result<Vec<String>> {
        let dir = self.categories_dir();
        let entries =
            fs::read_dir(dir.to_native()).map_err(|e| foundry_fs::Error::io(dir.to_native(), e))?;

        let mut categories = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| foundry_fs::Error::io(dir.to_native(), e))?;
            if entry.path().is_dir() {
                categories.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        categories.sort();
        Ok(categories)
    }

    fn list_files(&self, category: &str, kind: Option<ContentType>) -> Result<Vec<CatalogFile>> {
        let category_dir = self.category_dir(category)?;

        if let Some(kind) = kind {
            return match self.read_type_dir(category, &category_dir, kind)? {
                Some(files) if !files.is_empty() => Ok(files),
                _ => Err(Error::TypeNotFound {
                    category: category.to_string(),
                    kind,
                }),
            };
        }

        let mut files = Vec::new();
        for kind in ContentType::ALL {
            if let Some(found) = self.read_type_dir(category, &category_dir, kind)? {
                files.extend(found);
            }
        }
        Ok(files)
    }

    fn get_file(&self, category: &str, kind: ContentType, filename: &str) -> Result<CatalogFile> {
        let category_dir = self.category_dir(category)?;
        let not_found = || Error::FileNotFound {
            category: category.to_string(),
            kind,
            filename: filename.to_string(),
        };

        if foundry_fs::validate_path_identifier(filename, "Filename").is_err() {
            return Err(not_found());
        }

        let path = category_dir.join(kind.dir_name()).join(filename);
        match foundry_fs::io::read_bytes_if_exists(&path)? {
            Some(content) if path.is_file() => Ok(CatalogFile::new(category, kind, filename, content)),
            _ => Err(not_found()),
        }
    }
}
