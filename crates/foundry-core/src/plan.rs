//! Plan builder
//!
//! Classifies every catalog file in a selection against the current state:
//!
//! - no record at the target path: **install**
//! - record with a different hash: **update**
//! - record with the same hash: **skip**
//!
//! A would-be update whose file on disk no longer matches its record was
//! edited locally. Such entries are skipped (and logged) unless the builder
//! is forced, so a user's edits are never overwritten silently.
//!
//! Records whose source file is not part of the selection are not looked at
//! here; finding those is the job of [`crate::doctor`].

use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;

use foundry_fs::NormalizedPath;
use serde::Serialize;

use crate::content::{CatalogFile, ContentType};
use crate::placement;
use crate::state::{InstallationRecord, State};
use crate::{Error, Result};

/// What applying a change will do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Install,
    Update,
    Skip,
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Install => "install",
            Self::Update => "update",
            Self::Skip => "skip",
        })
    }
}

/// Why a change is a skip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Catalog content matches what was installed
    Unchanged,
    /// The catalog has a newer version but the installed file was edited
    LocallyModified,
}

/// One classified catalog file
#[derive(Debug, Clone, Serialize)]
pub struct Change {
    pub action: ChangeAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
    pub kind: ContentType,
    pub display_name: String,
    pub path: String,
    /// Hex SHA-256 of the catalog content
    pub hash: String,
    #[serde(skip)]
    file: CatalogFile,
}

impl Change {
    /// Singular type label ("command", "agent", "skill")
    pub fn type_label(&self) -> &'static str {
        self.kind.label()
    }

    /// The catalog file this change would write
    pub fn file(&self) -> &CatalogFile {
        &self.file
    }

    /// Target path
    pub fn target(&self) -> NormalizedPath {
        NormalizedPath::new(&self.path)
    }

    /// Whether applying this change writes anything
    pub fn is_pending(&self) -> bool {
        matches!(self.action, ChangeAction::Install | ChangeAction::Update)
    }
}

/// Aggregate counts of a plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanCounts {
    pub install: usize,
    pub update: usize,
    pub skip: usize,
}

/// Ordered list of classified changes for one install root
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    #[serde(skip)]
    root: NormalizedPath,
    changes: Vec<Change>,
}

impl Plan {
    /// The install root this plan targets
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// All changes, in catalog order
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Changes that will write a file
    pub fn pending(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(|c| c.is_pending())
    }

    /// Entries preserved because they were edited locally
    pub fn preserved(&self) -> impl Iterator<Item = &Change> {
        self.changes
            .iter()
            .filter(|c| c.skip_reason == Some(SkipReason::LocallyModified))
    }

    pub fn counts(&self) -> PlanCounts {
        let mut counts = PlanCounts::default();
        for change in &self.changes {
            match change.action {
                ChangeAction::Install => counts.install += 1,
                ChangeAction::Update => counts.update += 1,
                ChangeAction::Skip => counts.skip += 1,
            }
        }
        counts
    }

    /// True when applying the plan would write nothing
    pub fn is_noop(&self) -> bool {
        self.pending().next().is_none()
    }
}

/// Builds a [`Plan`] for one install root
#[derive(Debug, Clone)]
pub struct PlanBuilder {
    root: NormalizedPath,
    force: bool,
}

impl PlanBuilder {
    pub fn new(root: NormalizedPath) -> Self {
        Self { root, force: false }
    }

    /// Overwrite locally modified files instead of preserving them
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Classify `files` against `state`.
    ///
    /// Never writes to disk. The only read is hashing the installed file of
    /// a would-be update, to detect local edits.
    ///
    /// # Errors
    ///
    /// `InvalidEntry` if a catalog name cannot be placed safely, or if two
    /// catalog files would be written to the same path (category `a-b` with
    /// `c.md` and category `a` with `b-c.md` both name `ccf-a-b-c`).
    pub fn build(&self, files: &[CatalogFile], state: &State) -> Result<Plan> {
        let mut changes = Vec::with_capacity(files.len());
        let mut targets: HashMap<NormalizedPath, &CatalogFile> = HashMap::new();

        for file in files {
            let placement = placement::place_file(&self.root, file)?;
            if let Some(first) = targets.insert(placement.path.clone(), file) {
                return Err(Error::InvalidEntry {
                    message: format!(
                        "{}/{} and {}/{} both install to {}",
                        first.category, first.filename, file.category, file.filename, placement.path
                    ),
                });
            }
            let hash = file.hash();

            let (action, skip_reason) = match state.find_by_path(&placement.path) {
                None => (ChangeAction::Install, None),
                Some(existing) if !existing.has_content_changed(&hash) => {
                    (ChangeAction::Skip, Some(SkipReason::Unchanged))
                }
                Some(existing) => {
                    if !self.force && is_locally_modified(existing) {
                        tracing::warn!(
                            path = %placement.path,
                            "Installed file was modified locally; keeping it (use force to overwrite)"
                        );
                        (ChangeAction::Skip, Some(SkipReason::LocallyModified))
                    } else {
                        (ChangeAction::Update, None)
                    }
                }
            };

            tracing::debug!(path = %placement.path, %action, "Classified catalog file");
            changes.push(Change {
                action,
                skip_reason,
                kind: file.kind,
                display_name: placement.display_name,
                path: placement.path.as_str().to_string(),
                hash,
                file: file.clone(),
            });
        }

        Ok(Plan {
            root: self.root.clone(),
            changes,
        })
    }
}

/// Whether the file behind `record` no longer matches what was written.
///
/// A missing file is not a local edit: reinstalling it loses nothing.
/// An unreadable file is treated as edited so it is left alone.
fn is_locally_modified(record: &InstallationRecord) -> bool {
    match foundry_fs::file_hash(&record.path().to_native()) {
        Ok(actual) => record.has_content_changed(&actual),
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => {
            tracing::warn!(path = %record.installed_path, error = %e, "Cannot read installed file");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> NormalizedPath {
        NormalizedPath::new("/nonexistent/.claude")
    }

    #[test]
    fn empty_state_installs_everything() {
        let files = vec![
            CatalogFile::new("sample", ContentType::Commands, "a.md", "X"),
            CatalogFile::new("sample", ContentType::Skills, "b.md", "Y"),
        ];
        let plan = PlanBuilder::new(root()).build(&files, &State::new()).unwrap();

        assert_eq!(
            plan.counts(),
            PlanCounts {
                install: 2,
                update: 0,
                skip: 0
            }
        );
        assert_eq!(plan.changes()[1].display_name, "ccf-sample-b/SKILL.md");
        assert_eq!(plan.changes()[1].type_label(), "skill");
    }

    #[test]
    fn same_hash_skips_and_different_hash_updates() {
        let a = CatalogFile::new("sample", ContentType::Commands, "a.md", "X");
        let b = CatalogFile::new("sample", ContentType::Agents, "b.md", "Y");

        let mut state = State::new();
        let a_path = placement::place_file(&root(), &a).unwrap().path;
        let b_path = placement::place_file(&root(), &b).unwrap().path;
        state.add(InstallationRecord::new(&a, &a_path));
        // Recorded with older content; file is absent on disk, so not a local edit
        state.add(InstallationRecord::new(
            &CatalogFile::new("sample", ContentType::Agents, "b.md", "old"),
            &b_path,
        ));

        let plan = PlanBuilder::new(root()).build(&[a, b], &state).unwrap();
        assert_eq!(plan.changes()[0].action, ChangeAction::Skip);
        assert_eq!(plan.changes()[0].skip_reason, Some(SkipReason::Unchanged));
        assert_eq!(plan.changes()[1].action, ChangeAction::Update);
        assert!(!plan.is_noop());
    }

    #[test]
    fn same_target_from_two_categories_is_rejected() {
        let files = vec![
            CatalogFile::new("a-b", ContentType::Agents, "c.md", "1"),
            CatalogFile::new("a", ContentType::Agents, "b-c.md", "2"),
        ];
        let err = PlanBuilder::new(root()).build(&files, &State::new()).unwrap_err();
        assert!(err.to_string().contains("ccf-a-b-c.md"), "got {}", err);

        // Same names under different type dirs do not clash
        let files = vec![
            CatalogFile::new("a-b", ContentType::Agents, "c.md", "1"),
            CatalogFile::new("a", ContentType::Commands, "b-c.md", "2"),
        ];
        assert!(PlanBuilder::new(root()).build(&files, &State::new()).is_ok());
    }

    #[test]
    fn building_twice_gives_same_plan() {
        let files = vec![CatalogFile::new("sample", ContentType::Commands, "a.md", "X")];
        let builder = PlanBuilder::new(root());
        let first = builder.build(&files, &State::new()).unwrap();
        let second = builder.build(&files, &State::new()).unwrap();
        assert_eq!(first.counts(), second.counts());
        assert_eq!(first.changes()[0].path, second.changes()[0].path);
    }
}
