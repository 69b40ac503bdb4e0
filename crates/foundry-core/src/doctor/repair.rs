//! Repair executor
//!
//! Every repair runs on its own; a failure is counted and the rest carry
//! on. Deregistrations share one loaded state that is saved once at the end.

use foundry_fs::NormalizedPath;
use serde::Serialize;

use super::report::{Report, Repair};
use crate::state::{State, StateStore};

/// A repair that did not succeed
#[derive(Debug, Clone, Serialize)]
pub struct RepairFailure {
    pub description: String,
    pub message: String,
}

/// Outcome of running the fixable repairs of a report
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepairSummary {
    pub fixed: usize,
    pub failed: usize,
    pub failures: Vec<RepairFailure>,
}

impl RepairSummary {
    fn fail(&mut self, description: &str, message: impl Into<String>) {
        self.failed += 1;
        self.failures.push(RepairFailure {
            description: description.to_string(),
            message: message.into(),
        });
    }
}

/// Run every fixable repair in `report`
pub fn run_repairs(report: &Report, store: &StateStore) -> RepairSummary {
    let mut summary = RepairSummary::default();
    let mut state: Option<std::result::Result<State, String>> = None;
    let mut deregistered: Vec<String> = Vec::new();

    for issue in report.fixable() {
        let Some(repair) = &issue.repair else {
            continue;
        };

        let outcome = match repair {
            Repair::DeregisterRecord { path } => {
                let loaded = state.get_or_insert_with(|| store.load().map_err(|e| e.to_string()));
                match loaded {
                    Ok(state) => {
                        state.remove(&NormalizedPath::new(path));
                        deregistered.push(issue.description.clone());
                        Ok(false)
                    }
                    Err(message) => Err(format!("state unavailable: {}", message)),
                }
            }
            Repair::DeleteFile { path } => {
                foundry_fs::io::remove_file_if_exists(&NormalizedPath::new(path))
                    .map(|_| true)
                    .map_err(|e| e.to_string())
            }
            Repair::DeleteDirectory { path } => {
                foundry_fs::io::remove_dir_if_exists(&NormalizedPath::new(path))
                    .map(|_| true)
                    .map_err(|e| e.to_string())
            }
        };

        match outcome {
            // Deregistrations are only counted once the state is saved
            Ok(false) => {}
            Ok(true) => {
                tracing::debug!(%repair, "Repaired");
                summary.fixed += 1;
            }
            Err(message) => {
                tracing::warn!(%repair, error = %message, "Repair failed");
                summary.fail(&issue.description, message);
            }
        }
    }

    if let Some(Ok(state)) = &state {
        if !deregistered.is_empty() {
            match store.save(state) {
                Ok(()) => summary.fixed += deregistered.len(),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to save state after deregistering records");
                    for description in &deregistered {
                        summary.fail(description, e.to_string());
                    }
                }
            }
        }
    }

    tracing::info!(fixed = summary.fixed, failed = summary.failed, "Repairs finished");
    summary
}
