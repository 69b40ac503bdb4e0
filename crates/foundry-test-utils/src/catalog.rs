//! Catalog fixtures

use std::fs;
use std::path::Path;

use foundry_core::{ContentType, MemoryCatalog};

/// Category `sample` with a flat command `a` ("X") and a skill `b` ("Y")
pub fn sample_catalog() -> MemoryCatalog {
    MemoryCatalog::new()
        .with_file("sample", ContentType::Commands, "a.md", "X")
        .with_file("sample", ContentType::Skills, "b.md", "Y")
}

/// Lay out `files` as a catalog bundle under `root`
///
/// Each entry is `(category, type directory, filename, content)` and lands at
/// `<root>/categories/<category>/<type>/<filename>`.
pub fn write_catalog_dir(root: &Path, files: &[(&str, &str, &str, &str)]) {
    for (category, kind, filename, content) in files {
        let dir = root.join("categories").join(category).join(kind);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(filename), content).unwrap();
    }
}
