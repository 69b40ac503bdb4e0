//! Reconciliation and diagnostics engine for CC Foundry
//!
//! Installs catalog content into Claude Code's configuration directories
//! and keeps a record of everything it wrote, so later runs can update,
//! remove and diagnose those files:
//!
//! - **Catalog**: read-only source of content, grouped by category and type
//! - **Placement**: the `ccf-<category>-<name>` naming convention
//! - **State**: installation records persisted in `~/.claude-code-foundry.json`
//! - **Plan / Installer**: diff the catalog against the records, then apply
//! - **Doctor**: detect missing, modified and orphaned files and repair them
//!
//! # Architecture
//!
//! ```text
//!                     foundry-cli
//!                          |
//!        +-----------------+-----------------+
//!        |                 |                 |
//!    Installer           Doctor          overview
//!        |                 |                 |
//!   PlanBuilder        StateStore ------+    |
//!        |                 |            |    |
//!   CatalogProvider    placement        +----+
//!                          |
//!                      foundry-fs
//! ```

pub mod catalog;
pub mod config;
pub mod content;
pub mod doctor;
pub mod error;
pub mod installer;
pub mod overview;
pub mod placement;
pub mod plan;
pub mod state;

pub use catalog::{CatalogProvider, DirectoryCatalog, MemoryCatalog, Selection};
pub use config::{InstallScope, Locations, Settings};
pub use content::{CatalogFile, ContentType};
pub use doctor::{Doctor, Issue, IssueKind, Repair, RepairSummary, Report, Severity};
pub use error::{Error, Result};
pub use installer::{
    ApplyReport, InstallOptions, Installer, RecordFilter, RemoveMode, RemoveReport,
};
pub use overview::{InstalledSummary, LocationSummary};
pub use plan::{Change, ChangeAction, Plan, PlanBuilder, PlanCounts, SkipReason};
pub use state::{InstallationRecord, STATE_VERSION, State, StateStore};
