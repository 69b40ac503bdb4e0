//! Read-only summaries for the `show` command

use std::collections::BTreeMap;
use std::io::ErrorKind;

use foundry_fs::NormalizedPath;
use serde::Serialize;

use crate::content::ContentType;
use crate::placement::type_dir;
use crate::state::State;

/// Item count for one type directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub kind: ContentType,
    pub count: usize,
    /// Set when the directory exists but could not be listed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// What is on disk under one install root, managed or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationSummary {
    pub root: String,
    pub exists: bool,
    pub types: Vec<TypeCount>,
}

impl LocationSummary {
    /// Count `*.md` files for flat types and subdirectories for skills
    pub fn scan(root: &NormalizedPath) -> Self {
        if !root.is_dir() {
            return Self {
                root: root.as_str().to_string(),
                exists: false,
                types: Vec::new(),
            };
        }

        let types = ContentType::ALL
            .into_iter()
            .map(|kind| match count_items(&type_dir(root, kind), kind) {
                Ok(count) => TypeCount {
                    kind,
                    count,
                    error: None,
                },
                Err(e) => TypeCount {
                    kind,
                    count: 0,
                    error: Some(e.to_string()),
                },
            })
            .collect();

        Self {
            root: root.as_str().to_string(),
            exists: true,
            types,
        }
    }
}

fn count_items(dir: &NormalizedPath, kind: ContentType) -> std::io::Result<usize> {
    let entries = match std::fs::read_dir(dir.to_native()) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let mut count = 0;
    for entry in entries {
        let entry = entry?;
        let is_dir = entry.file_type()?.is_dir();
        let counted = if kind.is_directory_per_item() {
            is_dir
        } else {
            !is_dir && entry.file_name().to_string_lossy().ends_with(".md")
        };
        if counted {
            count += 1;
        }
    }
    Ok(count)
}

/// Tracked installations grouped by category and type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstalledSummary {
    pub categories: BTreeMap<String, BTreeMap<ContentType, usize>>,
    pub total: usize,
}

impl InstalledSummary {
    pub fn from_state(state: &State) -> Self {
        let mut summary = Self::default();
        for record in state.installations() {
            *summary
                .categories
                .entry(record.category.clone())
                .or_default()
                .entry(record.kind)
                .or_default() += 1;
            summary.total += 1;
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::CatalogFile;
    use crate::state::InstallationRecord;
    use pretty_assertions::assert_eq;

    #[test]
    fn scan_counts_md_files_and_skill_dirs() {
        let temp = tempfile::tempdir().unwrap();
        let root = NormalizedPath::new(temp.path());
        std::fs::create_dir_all(temp.path().join("commands")).unwrap();
        std::fs::write(temp.path().join("commands/a.md"), "a").unwrap();
        std::fs::write(temp.path().join("commands/b.md"), "b").unwrap();
        std::fs::write(temp.path().join("commands/notes.txt"), "x").unwrap();
        std::fs::create_dir_all(temp.path().join("skills/one")).unwrap();
        std::fs::create_dir_all(temp.path().join("skills/two")).unwrap();
        std::fs::write(temp.path().join("skills/stray.md"), "x").unwrap();

        let summary = LocationSummary::scan(&root);

        assert!(summary.exists);
        let counts: Vec<_> = summary.types.iter().map(|t| (t.kind, t.count)).collect();
        assert_eq!(
            counts,
            vec![
                (ContentType::Commands, 2),
                (ContentType::Agents, 0),
                (ContentType::Skills, 2),
            ]
        );
    }

    #[test]
    fn scan_reports_missing_root() {
        let temp = tempfile::tempdir().unwrap();
        let summary = LocationSummary::scan(&NormalizedPath::new(temp.path().join("absent")));
        assert!(!summary.exists);
        assert!(summary.types.is_empty());
    }

    #[test]
    fn installed_summary_groups_by_category_and_type() {
        let mut state = State::new();
        let root = NormalizedPath::new("/h/.claude");
        for (category, kind, name) in [
            ("dev", ContentType::Commands, "a.md"),
            ("dev", ContentType::Commands, "b.md"),
            ("dev", ContentType::Skills, "c.md"),
            ("test", ContentType::Agents, "d.md"),
        ] {
            let file = CatalogFile::new(category, kind, name, "x");
            let path = root.join(kind.dir_name()).join(name);
            state.add(InstallationRecord::new(&file, &path));
        }

        let summary = InstalledSummary::from_state(&state);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.categories["dev"][&ContentType::Commands], 2);
        assert_eq!(summary.categories["dev"][&ContentType::Skills], 1);
        assert_eq!(summary.categories["test"][&ContentType::Agents], 1);
    }
}
