//! Diagnostics engine
//!
//! Inspects the external configuration document, checks every installation
//! record against the file it points at, and scans both install roots for
//! managed-looking entries that nothing tracks.
//!
//! ```text
//! run() ──┬── check_external_config   (~/.claude.json)
//!         ├── check_integrity          (records vs disk)
//!         └── check_orphans            (disk vs records)
//! ```
//!
//! Diagnosis never changes anything on disk. [`Doctor::repair`] applies the
//! fixable subset of a [`Report`].

mod repair;
mod report;

pub use repair::{RepairFailure, RepairSummary};
pub use report::{Issue, IssueKind, Repair, Report, Severity};

use std::io::ErrorKind;

use foundry_fs::{FoundryPath, NormalizedPath};

use crate::config::{DEFAULT_SIZE_WARNING_MB, Locations};
use crate::content::ContentType;
use crate::placement::{is_managed_name, type_dir};
use crate::state::{State, StateStore};

const MIB: u64 = 1024 * 1024;

/// Runs the health checks for one pair of install roots
pub struct Doctor<'a> {
    locations: &'a Locations,
    store: &'a StateStore,
    size_threshold: u64,
}

impl<'a> Doctor<'a> {
    pub fn new(locations: &'a Locations, store: &'a StateStore) -> Self {
        Self {
            locations,
            store,
            size_threshold: DEFAULT_SIZE_WARNING_MB * MIB,
        }
    }

    /// Warn when the external configuration document is larger than `bytes`
    pub fn with_size_threshold(mut self, bytes: u64) -> Self {
        self.size_threshold = bytes;
        self
    }

    /// Diagnose without changing anything
    pub fn run(&self) -> Report {
        let mut report = Report::default();

        self.check_external_config(&mut report);

        match self.store.load() {
            Ok(state) => {
                self.check_integrity(&state, &mut report);
                self.check_orphans(&state, &mut report);
            }
            Err(e) => {
                tracing::warn!(error = %e, "State unreadable, skipping record checks");
                report.push(Issue::new(
                    Severity::Error,
                    IssueKind::State,
                    "state",
                    format!("Cannot load state: {}", e),
                ));
            }
        }

        tracing::info!(
            files_checked = report.files_checked,
            errors = report.errors,
            warnings = report.warnings,
            "Diagnostics finished"
        );
        report
    }

    /// Apply every fixable repair in `report`
    pub fn repair(&self, report: &Report) -> RepairSummary {
        repair::run_repairs(report, self.store)
    }

    fn check_external_config(&self, report: &mut Report) {
        let path = self.locations.external_config();
        let name = format!("~/{}", FoundryPath::ExternalConfig);
        let config_issue = |severity, description: String| {
            Issue::new(severity, IssueKind::ExternalConfig, "config", description)
        };

        let bytes = match std::fs::read(path.to_native()) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                report.push(config_issue(
                    Severity::Warning,
                    format!("{} does not exist (Claude Code may not be installed)", name),
                ));
                return;
            }
            Err(e) => {
                report.push(config_issue(
                    Severity::Error,
                    format!("Cannot read {}: {}", name, e),
                ));
                return;
            }
        };

        if let Err(e) = serde_json::from_slice::<serde_json::Value>(&bytes) {
            report.push(config_issue(
                Severity::Error,
                format!("{} is not valid JSON: {}", name, e),
            ));
            return;
        }

        let size = bytes.len() as u64;
        if size > self.size_threshold {
            report.push(config_issue(
                Severity::Warning,
                format!(
                    "{} is large ({:.1}MB) - may cause performance issues",
                    name,
                    size as f64 / MIB as f64
                ),
            ));
        }
    }

    fn check_integrity(&self, state: &State, report: &mut Report) {
        for record in state.installations() {
            report.files_checked += 1;
            let path = &record.installed_path;

            let current = match foundry_fs::file_hash(&record.path().to_native()) {
                Ok(hash) => hash,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    report.push(
                        Issue::new(
                            Severity::Error,
                            IssueKind::Missing,
                            &record.category,
                            format!("Missing file: {}", path),
                        )
                        .with_repair(Repair::DeregisterRecord { path: path.clone() }),
                    );
                    continue;
                }
                Err(e) => {
                    report.push(Issue::new(
                        Severity::Error,
                        IssueKind::Unreadable,
                        &record.category,
                        format!("Cannot read file {}: {}", path, e),
                    ));
                    continue;
                }
            };

            if current != record.hash {
                tracing::debug!(path = %path, "Hash mismatch");
                report.push(Issue::new(
                    Severity::Warning,
                    IssueKind::Modified,
                    &record.category,
                    format!("Modified file detected: {} (hash mismatch)", path),
                ));
            }
        }
    }

    fn check_orphans(&self, state: &State, report: &mut Report) {
        for (scope, root) in self.locations.roots() {
            if !root.is_dir() {
                tracing::debug!(%scope, root = %root, "Install root absent, skipping orphan scan");
                continue;
            }
            for kind in ContentType::ALL {
                self.scan_type_dir(&type_dir(&root, kind), kind, state, report);
            }
        }
    }

    fn scan_type_dir(
        &self,
        dir: &NormalizedPath,
        kind: ContentType,
        state: &State,
        report: &mut Report,
    ) {
        let entries = match std::fs::read_dir(dir.to_native()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return,
            Err(e) => {
                tracing::warn!(dir = %dir, error = %e, "Cannot scan directory");
                return;
            }
        };

        let mut entries: Vec<_> = entries.filter_map(|entry| entry.ok()).collect();
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !is_managed_name(&name) {
                continue;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let full = dir.join(&name);

            let repair = if kind.is_directory_per_item() {
                if !is_dir || state.is_tracked(&full.join(FoundryPath::SkillFile.as_str())) {
                    continue;
                }
                Repair::DeleteDirectory {
                    path: full.as_str().to_string(),
                }
            } else {
                if is_dir || !name.ends_with(".md") || state.is_tracked(&full) {
                    continue;
                }
                Repair::DeleteFile {
                    path: full.as_str().to_string(),
                }
            };

            report.push(
                Issue::new(
                    Severity::Warning,
                    IssueKind::Orphaned,
                    "orphaned",
                    format!("Orphaned foundry file: {} (not tracked in state)", full),
                )
                .with_repair(repair),
            );
        }
    }
}
