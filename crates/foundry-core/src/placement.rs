//! Installed naming convention and path placement
//!
//! Installed names embed the category, so two categories shipping a file
//! with the same name can never collide:
//!
//! ```text
//! <root>/commands/ccf-<category>-<stem>.md
//! <root>/agents/ccf-<category>-<stem>.md
//! <root>/skills/ccf-<category>-<stem>/SKILL.md
//! ```

use foundry_fs::{FoundryPath, NormalizedPath, validate_path_identifier};

use crate::content::{CatalogFile, ContentType};
use crate::{Error, Result};

/// Prefix shared by every installed item.
pub const MANAGED_PREFIX: &str = "ccf-";

/// Where a catalog item lands under an install root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// The file that gets written (the leaf `SKILL.md` for skills)
    pub path: NormalizedPath,
    /// Short name shown to users
    pub display_name: String,
    /// The per-item directory for directory-per-item types
    pub item_dir: Option<NormalizedPath>,
}

/// `ccf-<category>-<filename without .md>`
pub fn installed_stem(category: &str, filename: &str) -> String {
    let base = filename.strip_suffix(".md").unwrap_or(filename);
    format!("{}{}-{}", MANAGED_PREFIX, category, base)
}

/// `ccf-<category>-<filename without .md>.md`
pub fn installed_name(category: &str, filename: &str) -> String {
    format!("{}.md", installed_stem(category, filename))
}

/// Whether a directory entry name follows the installed naming convention.
pub fn is_managed_name(name: &str) -> bool {
    name.starts_with(MANAGED_PREFIX) && name.len() > MANAGED_PREFIX.len()
}

/// Directory under `root` that holds items of `kind`.
pub fn type_dir(root: &NormalizedPath, kind: ContentType) -> NormalizedPath {
    root.join(kind.dir_name())
}

/// Compute where `category`/`filename` of type `kind` installs under `root`.
///
/// # Errors
///
/// `InvalidEntry` if the category or filename could escape its directory.
pub fn place(
    root: &NormalizedPath,
    category: &str,
    kind: ContentType,
    filename: &str,
) -> Result<Placement> {
    validate_path_identifier(category, "Category")
        .and_then(|_| validate_path_identifier(filename, "Filename"))
        .map_err(|message| Error::InvalidEntry { message })?;

    let dir = type_dir(root, kind);
    if kind.is_directory_per_item() {
        let stem = installed_stem(category, filename);
        let item_dir = dir.join(&stem);
        Ok(Placement {
            path: item_dir.join(FoundryPath::SkillFile.as_str()),
            display_name: format!("{}/{}", stem, FoundryPath::SkillFile),
            item_dir: Some(item_dir),
        })
    } else {
        let name = installed_name(category, filename);
        Ok(Placement {
            path: dir.join(&name),
            display_name: name,
            item_dir: None,
        })
    }
}

/// [`place`] for a catalog file.
pub fn place_file(root: &NormalizedPath, file: &CatalogFile) -> Result<Placement> {
    place(root, &file.category, file.kind, &file.filename)
}
