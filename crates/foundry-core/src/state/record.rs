//! Installation record type
//!
//! One record per installed item, keyed by the path it was written to.

use chrono::{DateTime, Utc};
use foundry_fs::{FoundryPath, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::content::{CatalogFile, ContentType};
use crate::placement;

/// Tracking entry for one installed catalog item
///
/// `hash` is always the SHA-256 of the bytes this tool itself last wrote to
/// `installed_path`. A different hash on disk means someone else changed
/// the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationRecord {
    /// Catalog category the item came from
    pub category: String,
    /// Content shape of the item
    #[serde(rename = "type")]
    pub kind: ContentType,
    /// Catalog filename as shipped
    #[serde(rename = "file")]
    pub filename: String,
    /// Absolute path of the written file (normalized)
    pub installed_path: String,
    /// Hex SHA-256 of the written content
    pub hash: String,
    /// When the content was written
    pub installed_at: DateTime<Utc>,
}

impl InstallationRecord {
    /// Create a record for `file` written to `path`, timestamped now.
    pub fn new(file: &CatalogFile, path: &NormalizedPath) -> Self {
        Self {
            category: file.category.clone(),
            kind: file.kind,
            filename: file.filename.clone(),
            installed_path: path.as_str().to_string(),
            hash: file.hash(),
            installed_at: Utc::now(),
        }
    }

    /// The installed path as a [`NormalizedPath`].
    pub fn path(&self) -> NormalizedPath {
        NormalizedPath::new(&self.installed_path)
    }

    /// Whether `hash` differs from what was recorded.
    pub fn has_content_changed(&self, hash: &str) -> bool {
        self.hash != hash
    }

    /// Directory to delete when removing this record.
    ///
    /// Only a skill laid out as `skills/ccf-*/SKILL.md` owns its parent
    /// directory. Any other shape, such as a flat `skills/ccf-*.md` left by
    /// an older layout, owns nothing beyond the file itself.
    pub fn owned_dir(&self) -> Option<NormalizedPath> {
        if !self.kind.is_directory_per_item() {
            return None;
        }
        let path = self.path();
        if path.file_name() != Some(FoundryPath::SkillFile.as_str()) {
            return None;
        }
        let item_dir = path.parent()?;
        let type_dir = item_dir.parent()?;
        let owned = item_dir.file_name().is_some_and(placement::is_managed_name)
            && type_dir.file_name() == Some(self.kind.dir_name());
        owned.then_some(item_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_wire_field_names() {
        let file = CatalogFile::new("dev", ContentType::Commands, "deploy.md", "x");
        let record =
            InstallationRecord::new(&file, &NormalizedPath::new("/h/.claude/commands/ccf-dev-deploy.md"));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "commands");
        assert_eq!(value["file"], "deploy.md");
        assert_eq!(value["installed_path"], "/h/.claude/commands/ccf-dev-deploy.md");
        assert!(value["installed_at"].is_string());
    }

    #[test]
    fn has_content_changed_compares_hash() {
        let file = CatalogFile::new("dev", ContentType::Commands, "deploy.md", "x");
        let record = InstallationRecord::new(&file, &NormalizedPath::new("/p"));
        assert!(!record.has_content_changed(&foundry_fs::content_hash(b"x")));
        assert!(record.has_content_changed(&foundry_fs::content_hash(b"y")));
    }

    #[test]
    fn only_skills_own_a_directory() {
        let skill = CatalogFile::new("dev", ContentType::Skills, "g.md", "x");
        let record = InstallationRecord::new(&skill, &NormalizedPath::new("/r/skills/ccf-dev-g/SKILL.md"));
        assert_eq!(record.owned_dir().unwrap().as_str(), "/r/skills/ccf-dev-g");

        let legacy = InstallationRecord::new(&skill, &NormalizedPath::new("/r/skills/ccf-dev-g.md"));
        assert!(legacy.owned_dir().is_none());

        let unmanaged = InstallationRecord::new(&skill, &NormalizedPath::new("/r/skills/mine/SKILL.md"));
        assert!(unmanaged.owned_dir().is_none());

        let misplaced = InstallationRecord::new(&skill, &NormalizedPath::new("/r/agents/ccf-dev-g/SKILL.md"));
        assert!(misplaced.owned_dir().is_none());

        let flat = CatalogFile::new("dev", ContentType::Agents, "a.md", "x");
        let record = InstallationRecord::new(&flat, &NormalizedPath::new("/r/agents/ccf-dev-a.md"));
        assert!(record.owned_dir().is_none());
    }
}
