//! In-memory catalog

use std::collections::BTreeMap;

use super::CatalogProvider;
use crate::content::{CatalogFile, ContentType};
use crate::{Error, Result};

/// A catalog held entirely in memory.
///
/// Useful for embedding a fixed bundle and for tests. Files within a
/// category are listed in (type, filename) order, matching
/// [`DirectoryCatalog`](super::DirectoryCatalog).
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    categories: BTreeMap<String, Vec<CatalogFile>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its category if needed.
    pub fn with_file(
        mut self,
        category: &str,
        kind: ContentType,
        filename: &str,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert(CatalogFile::new(category, kind, filename, content));
        self
    }

    /// Register a category with no files.
    pub fn with_category(mut self, category: &str) -> Self {
        self.categories.entry(category.to_string()).or_default();
        self
    }

    /// Insert or replace a file.
    pub fn insert(&mut self, file: CatalogFile) {
        let files = self.categories.entry(file.category.clone()).or_default();
        files.retain(|f| !(f.kind == file.kind && f.filename == file.filename));
        files.push(file);
        files.sort_by(|a, b| (a.kind, &a.filename).cmp(&(b.kind, &b.filename)));
    }

    fn category(&self, category: &str) -> Result<&[CatalogFile]> {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::CategoryNotFound {
                category: category.to_string(),
            })
    }
}

impl CatalogProvider for MemoryCatalog {
    fn categories(&self) -> Result<Vec<String>> {
        Ok(self.categories.keys().cloned().collect())
    }

    fn list_files(&self, category: &str, kind: Option<ContentType>) -> Result<Vec<CatalogFile>> {
        let files = self.category(category)?;
        let Some(kind) = kind else {
            return Ok(files.to_vec());
        };

        let filtered: Vec<CatalogFile> = files.iter().filter(|f| f.kind == kind).cloned().collect();
        if filtered.is_empty() {
            return Err(Error::TypeNotFound {
                category: category.to_string(),
                kind,
            });
        }
        Ok(filtered)
    }

    fn get_file(&self, category: &str, kind: ContentType, filename: &str) -> Result<CatalogFile> {
        self.category(category)?
            .iter()
            .find(|f| f.kind == kind && f.filename == filename)
            .cloned()
            .ok_or_else(|| Error::FileNotFound {
                category: category.to_string(),
                kind,
                filename: filename.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_same_file() {
        let mut catalog = MemoryCatalog::new().with_file("dev", ContentType::Commands, "a.md", "1");
        catalog.insert(CatalogFile::new("dev", ContentType::Commands, "a.md", "2"));

        let files = catalog.list_files("dev", None).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].content, b"2".to_vec());
    }

    #[test]
    fn get_file_missing_is_file_not_found() {
        let catalog = MemoryCatalog::new().with_file("dev", ContentType::Commands, "a.md", "1");
        let err = catalog.get_file("dev", ContentType::Agents, "a.md").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn list_files_orders_by_type_then_name() {
        let catalog = MemoryCatalog::new()
            .with_file("dev", ContentType::Skills, "a.md", "")
            .with_file("dev", ContentType::Commands, "z.md", "")
            .with_file("dev", ContentType::Commands, "b.md", "");

        let names: Vec<_> = catalog
            .list_files("dev", None)
            .unwrap()
            .into_iter()
            .map(|f| (f.kind, f.filename))
            .collect();
        assert_eq!(
            names,
            vec![
                (ContentType::Commands, "b.md".to_string()),
                (ContentType::Commands, "z.md".to_string()),
                (ContentType::Skills, "a.md".to_string()),
            ]
        );
    }
}
