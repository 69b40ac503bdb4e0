//! Diagnostic report types

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

/// What an issue is about, for the report counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// External configuration document problem
    ExternalConfig,
    /// State document could not be loaded
    State,
    /// Tracked file is gone
    Missing,
    /// Tracked file no longer matches its recorded hash
    Modified,
    /// Tracked file exists but cannot be read
    Unreadable,
    /// Managed-looking entry with no record
    Orphaned,
}

/// A repair the doctor can carry out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Repair {
    /// Drop the record for a file that no longer exists
    DeregisterRecord { path: String },
    /// Delete an untracked flat file
    DeleteFile { path: String },
    /// Recursively delete an untracked per-item directory
    DeleteDirectory { path: String },
}

impl fmt::Display for Repair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeregisterRecord { path } => write!(f, "deregister {}", path),
            Self::DeleteFile { path } => write!(f, "delete {}", path),
            Self::DeleteDirectory { path } => write!(f, "delete directory {}", path),
        }
    }
}

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    /// Catalog category for record issues; "config", "state" or "orphaned" otherwise
    pub category: String,
    pub description: String,
    /// Present only for auto-fixable issues
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair: Option<Repair>,
}

impl Issue {
    pub fn new(
        severity: Severity,
        kind: IssueKind,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind,
            category: category.into(),
            description: description.into(),
            repair: None,
        }
    }

    pub fn with_repair(mut self, repair: Repair) -> Self {
        self.repair = Some(repair);
        self
    }

    pub fn is_fixable(&self) -> bool {
        self.repair.is_some()
    }
}

/// Result of one diagnostics run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub issues: Vec<Issue>,
    pub files_checked: usize,
    pub errors: usize,
    pub warnings: usize,
    pub missing: usize,
    pub modified: usize,
    pub orphaned: usize,
}

impl Report {
    /// Record an issue and bump the matching counters
    pub fn push(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        match issue.kind {
            IssueKind::Missing => self.missing += 1,
            IssueKind::Modified => self.modified += 1,
            IssueKind::Orphaned => self.orphaned += 1,
            IssueKind::ExternalConfig | IssueKind::State | IssueKind::Unreadable => {}
        }
        self.issues.push(issue);
    }

    /// Issues that carry a repair
    pub fn fixable(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.is_fixable())
    }

    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }
}
