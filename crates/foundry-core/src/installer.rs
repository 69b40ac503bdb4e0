//! Installer and remover
//!
//! Executes a [`Plan`] or a removal request against the filesystem and
//! keeps the [`State`] in step with every file written or deleted.
//!
//! Nothing is rolled back. A failure stops the batch, the records of the
//! entries that already went through are persisted, and the error names
//! the path, category and type that failed. Anything left inconsistent is
//! for the doctor to find on the next run.

use foundry_fs::NormalizedPath;
use serde::Serialize;

use crate::catalog::{CatalogProvider, Selection};
use crate::content::ContentType;
use crate::plan::{Change, ChangeAction, Plan, PlanBuilder, SkipReason};
use crate::state::{InstallationRecord, State, StateStore};
use crate::{Error, Result};

/// Outcome of applying a plan
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplyReport {
    /// Paths written for new installs
    pub installed: Vec<String>,
    /// Paths rewritten with new catalog content
    pub updated: Vec<String>,
    /// Entries left untouched
    pub skipped: usize,
    /// Paths left untouched because they were edited locally
    pub preserved: Vec<String>,
}

impl ApplyReport {
    /// Number of files written
    pub fn written(&self) -> usize {
        self.installed.len() + self.updated.len()
    }
}

/// How a removal batch reacts to a failed delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemoveMode {
    /// Stop at the first failure
    #[default]
    FailFast,
    /// Keep going, deregistering every record even when its delete failed
    BestEffort,
}

/// A delete that failed during a best-effort removal
#[derive(Debug, Clone, Serialize)]
pub struct RemoveFailure {
    pub path: String,
    pub message: String,
}

/// Outcome of a removal batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct RemoveReport {
    /// Records whose file or directory was deleted
    pub removed: Vec<String>,
    /// Records whose file was already gone
    pub already_absent: Vec<String>,
    /// Deletes that failed (best-effort mode only)
    pub failures: Vec<RemoveFailure>,
}

impl RemoveReport {
    /// Number of records deregistered
    pub fn deregistered(&self) -> usize {
        self.removed.len() + self.already_absent.len() + self.failures.len()
    }
}

/// Options for [`Installer::install`]
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Overwrite files that were edited locally
    pub force: bool,
}

/// Which records a removal targets
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub category: Option<String>,
    pub kind: Option<ContentType>,
    /// Only records installed beneath this root
    pub root: Option<NormalizedPath>,
}

impl RecordFilter {
    /// Records in `state` matching this filter
    pub fn select(&self, state: &State) -> Vec<InstallationRecord> {
        state
            .list(self.category.as_deref(), self.kind)
            .into_iter()
            .filter(|r| self.root.as_ref().is_none_or(|root| r.path().starts_with(root)))
            .cloned()
            .collect()
    }
}

/// Applies plans and removals, persisting state once per batch
pub struct Installer<'a> {
    store: &'a StateStore,
}

impl<'a> Installer<'a> {
    pub fn new(store: &'a StateStore) -> Self {
        Self { store }
    }

    /// Build the plan for `selection` without applying it
    pub fn preview(
        &self,
        provider: &dyn CatalogProvider,
        selection: &Selection,
        root: &NormalizedPath,
        options: &InstallOptions,
    ) -> Result<Plan> {
        let files = selection.resolve(provider)?;
        let state = self.store.load()?;
        PlanBuilder::new(root.clone())
            .force(options.force)
            .build(&files, &state)
    }

    /// Resolve, plan and apply `selection` under `root`
    ///
    /// Catalog lookups happen before anything is written, so a not-found
    /// error leaves the filesystem and state untouched.
    pub fn install(
        &self,
        provider: &dyn CatalogProvider,
        selection: &Selection,
        root: &NormalizedPath,
        options: &InstallOptions,
    ) -> Result<(Plan, ApplyReport)> {
        let files = selection.resolve(provider)?;
        let mut state = self.store.load()?;
        let plan = PlanBuilder::new(root.clone())
            .force(options.force)
            .build(&files, &state)?;
        let report = self.apply(&plan, &mut state)?;
        Ok((plan, report))
    }

    /// Apply every install/update entry of `plan`
    ///
    /// Content is written verbatim. State is saved once at the end, and
    /// only if something was written.
    pub fn apply(&self, plan: &Plan, state: &mut State) -> Result<ApplyReport> {
        let mut report = ApplyReport::default();

        for change in plan.changes() {
            match change.action {
                ChangeAction::Skip => {
                    report.skipped += 1;
                    if change.skip_reason == Some(SkipReason::LocallyModified) {
                        report.preserved.push(change.path.clone());
                    }
                    continue;
                }
                ChangeAction::Install | ChangeAction::Update => {}
            }

            if let Err(e) = self.write_change(change, state) {
                if report.written() > 0 {
                    self.persist_partial(state);
                }
                return Err(e);
            }

            if change.action == ChangeAction::Install {
                report.installed.push(change.path.clone());
            } else {
                report.updated.push(change.path.clone());
            }
        }

        if report.written() > 0 {
            self.store.save(state)?;
        }

        tracing::info!(
            installed = report.installed.len(),
            updated = report.updated.len(),
            skipped = report.skipped,
            "Applied plan"
        );
        Ok(report)
    }

    fn write_change(&self, change: &Change, state: &mut State) -> Result<()> {
        let target = change.target();
        let file = change.file();

        foundry_fs::io::write_atomic(&target, &file.content).map_err(|source| {
            Error::InstallFailed {
                path: target.to_native(),
                category: file.category.clone(),
                kind: file.kind,
                source,
            }
        })?;

        state.remove(&target);
        state.add(InstallationRecord::new(file, &target));
        tracing::debug!(path = %target, action = %change.action, "Wrote catalog file");
        Ok(())
    }

    /// Remove the records matching `filter`
    ///
    /// No matching records means nothing is touched, state included.
    pub fn remove_matching(&self, filter: &RecordFilter, mode: RemoveMode) -> Result<RemoveReport> {
        let mut state = self.store.load()?;
        let records = filter.select(&state);
        self.remove(&records, &mut state, mode)
    }

    /// Delete the files behind `records` and deregister them
    ///
    /// Directory-per-item records take their whole directory with them. A
    /// file that is already gone counts as removed.
    pub fn remove(
        &self,
        records: &[InstallationRecord],
        state: &mut State,
        mode: RemoveMode,
    ) -> Result<RemoveReport> {
        let mut report = RemoveReport::default();
        if records.is_empty() {
            return Ok(report);
        }

        for record in records {
            match delete_record_files(record) {
                Ok(true) => report.removed.push(record.installed_path.clone()),
                Ok(false) => report.already_absent.push(record.installed_path.clone()),
                Err(source) => match mode {
                    RemoveMode::FailFast => {
                        if report.deregistered() > 0 {
                            self.persist_partial(state);
                        }
                        return Err(Error::RemoveFailed {
                            path: record.path().to_native(),
                            category: record.category.clone(),
                            kind: record.kind,
                            source,
                        });
                    }
                    RemoveMode::BestEffort => {
                        tracing::warn!(
                            path = %record.installed_path,
                            error = %source,
                            "Failed to delete installed file; deregistering anyway"
                        );
                        report.failures.push(RemoveFailure {
                            path: record.installed_path.clone(),
                            message: source.to_string(),
                        });
                    }
                },
            }
            state.remove(&record.path());
        }

        self.store.save(state)?;
        tracing::info!(
            removed = report.removed.len(),
            already_absent = report.already_absent.len(),
            failed = report.failures.len(),
            "Removed installations"
        );
        Ok(report)
    }

    /// Save what a failed batch already did, so files and records agree.
    fn persist_partial(&self, state: &State) {
        if let Err(e) = self.store.save(state) {
            tracing::warn!(error = %e, "Failed to save state after aborted batch");
        }
    }
}

fn delete_record_files(record: &InstallationRecord) -> foundry_fs::Result<bool> {
    match record.owned_dir() {
        Some(dir) => foundry_fs::io::remove_dir_if_exists(&dir),
        None => foundry_fs::io::remove_file_if_exists(&record.path()),
    }
}
