//! Installation state
//!
//! The state document is the record of everything this tool has written.
//! It is a single JSON file loaded at the start of an operation and saved
//! once after the operation's mutations are complete.
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "installations": [
//!     { "category": "...", "type": "commands", "file": "deploy.md",
//!       "installed_path": "...", "hash": "<hex sha256>",
//!       "installed_at": "2024-05-01T12:00:00Z" }
//!   ]
//! }
//! ```
//!
//! There is no locking: two processes saving the same document race, and
//! the last writer wins.

mod record;

pub use record::InstallationRecord;

use foundry_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

use crate::content::ContentType;
use crate::overview::InstalledSummary;
use crate::{Error, Result};

/// Current state document schema version
pub const STATE_VERSION: &str = "1.0.0";

/// The set of installation records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Schema version of the document
    version: String,
    /// Records in insertion order, at most one per installed path
    #[serde(default)]
    installations: Vec<InstallationRecord>,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    /// Create an empty state at the current schema version
    pub fn new() -> Self {
        Self {
            version: STATE_VERSION.to_string(),
            installations: Vec::new(),
        }
    }

    /// Schema version this state was loaded with
    pub fn version(&self) -> &str {
        &self.version
    }

    /// All records
    pub fn installations(&self) -> &[InstallationRecord] {
        &self.installations
    }

    pub fn is_empty(&self) -> bool {
        self.installations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.installations.len()
    }

    /// Find the record for an installed path
    pub fn find_by_path(&self, path: &NormalizedPath) -> Option<&InstallationRecord> {
        self.installations
            .iter()
            .find(|r| r.installed_path == path.as_str())
    }

    /// Whether a record exists for `path`
    pub fn is_tracked(&self, path: &NormalizedPath) -> bool {
        self.find_by_path(path).is_some()
    }

    /// Add a record, replacing any existing record at the same path
    pub fn add(&mut self, record: InstallationRecord) {
        self.installations
            .retain(|r| r.installed_path != record.installed_path);
        self.installations.push(record);
    }

    /// Remove the record for an installed path
    ///
    /// Returns the removed record if one existed.
    pub fn remove(&mut self, path: &NormalizedPath) -> Option<InstallationRecord> {
        let pos = self
            .installations
            .iter()
            .position(|r| r.installed_path == path.as_str())?;
        Some(self.installations.remove(pos))
    }

    /// Records matching an optional category and an optional type
    pub fn list(&self, category: Option<&str>, kind: Option<ContentType>) -> Vec<&InstallationRecord> {
        self.installations
            .iter()
            .filter(|r| category.is_none_or(|c| r.category == c))
            .filter(|r| kind.is_none_or(|k| r.kind == k))
            .collect()
    }

    /// Distinct categories with at least one record, in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.installations {
            if !seen.contains(&record.category.as_str()) {
                seen.push(&record.category);
            }
        }
        seen
    }

    /// Per-category, per-type record counts
    pub fn summary(&self) -> InstalledSummary {
        InstalledSummary::from_state(self)
    }
}

/// Loads and saves the state document at a fixed path
#[derive(Debug, Clone)]
pub struct StateStore {
    path: NormalizedPath,
}

impl StateStore {
    pub fn new(path: impl Into<NormalizedPath>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the state document
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Load the state, or an empty state if no document exists yet
    ///
    /// # Errors
    ///
    /// `StateParse` if the document exists but cannot be decoded; an I/O
    /// error if it cannot be read.
    pub fn load(&self) -> Result<State> {
        let Some(content) = foundry_fs::io::read_bytes_if_exists(&self.path)? else {
            tracing::debug!(path = %self.path, "No state file, starting empty");
            return Ok(State::new());
        };

        let state: State = serde_json::from_slice(&content).map_err(|e| Error::StateParse {
            path: self.path.to_native(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            path = %self.path,
            records = state.len(),
            version = state.version(),
            "Loaded state"
        );
        Ok(state)
    }

    /// Write the full document, replacing any prior content
    pub fn save(&self, state: &State) -> Result<()> {
        let content = serde_json::to_vec_pretty(state)?;
        foundry_fs::io::write_atomic(&self.path, &content)?;
        tracing::debug!(path = %self.path, records = state.len(), "Saved state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::CatalogFile;

    fn record(category: &str, kind: ContentType, name: &str, path: &str) -> InstallationRecord {
        InstallationRecord::new(
            &CatalogFile::new(category, kind, name, name.as_bytes()),
            &NormalizedPath::new(path),
        )
    }

    #[test]
    fn new_state_has_current_version() {
        let state = State::new();
        assert_eq!(state.version(), STATE_VERSION);
        assert!(state.is_empty());
    }

    #[test]
    fn add_replaces_record_at_same_path() {
        let mut state = State::new();
        state.add(record("dev", ContentType::Commands, "a.md", "/r/a"));
        let mut replacement = record("dev", ContentType::Commands, "a.md", "/r/a");
        replacement.hash = "other".into();
        state.add(replacement);

        assert_eq!(state.len(), 1);
        assert_eq!(state.installations()[0].hash, "other");
    }

    #[test]
    fn list_filters_by_category_and_type() {
        let mut state = State::new();
        state.add(record("dev", ContentType::Commands, "a.md", "/r/a"));
        state.add(record("dev", ContentType::Skills, "b.md", "/r/b"));
        state.add(record("ops", ContentType::Commands, "c.md", "/r/c"));

        assert_eq!(state.list(None, None).len(), 3);
        assert_eq!(state.list(Some("dev"), None).len(), 2);
        assert_eq!(state.list(None, Some(ContentType::Commands)).len(), 2);
        assert_eq!(state.list(Some("dev"), Some(ContentType::Skills)).len(), 1);
        assert!(state.list(Some("nope"), None).is_empty());
        assert_eq!(state.categories(), vec!["dev", "ops"]);
    }

    #[test]
    fn remove_returns_removed_record() {
        let mut state = State::new();
        state.add(record("dev", ContentType::Commands, "a.md", "/r/a"));

        assert!(state.remove(&NormalizedPath::new("/r/a")).is_some());
        assert!(state.remove(&NormalizedPath::new("/r/a")).is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn summary_counts_per_category() {
        let mut state = State::new();
        state.add(record("dev", ContentType::Commands, "a.md", "/r/a"));
        state.add(record("dev", ContentType::Commands, "b.md", "/r/b"));
        state.add(record("ops", ContentType::Agents, "c.md", "/r/c"));

        let summary = state.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.categories["dev"][&ContentType::Commands], 2);
        assert_eq!(summary.categories["ops"][&ContentType::Agents], 1);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{
            "version": "1.0.0",
            "generator": "something-newer",
            "installations": [{
                "category": "dev", "type": "agents", "file": "a.md",
                "installed_path": "/r/agents/ccf-dev-a.md", "hash": "abc",
                "installed_at": "2024-05-01T12:00:00.123456789-07:00",
                "extra": true
            }]
        }"#;
        let state: State = serde_json::from_str(json).unwrap();
        assert_eq!(state.len(), 1);
        assert_eq!(state.installations()[0].kind, ContentType::Agents);
    }
}
