//! User settings
//!
//! Loaded from `<config_dir>/cc-foundry/config.toml` when present:
//!
//! ```toml
//! catalog_dir = "/opt/cc-foundry/catalog"
//! config_size_warning_mb = 50
//! default_scope = "project"
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::InstallScope;
use crate::{Error, Result};

/// Size above which the external config document is reported as large
pub const DEFAULT_SIZE_WARNING_MB: u64 = 50;

/// Optional user settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Catalog bundle directory (containing `categories/`)
    pub catalog_dir: Option<PathBuf>,
    /// Threshold for the external config size warning, in MiB
    pub config_size_warning_mb: u64,
    /// Install root used when none is given
    pub default_scope: InstallScope,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_dir: None,
            config_size_warning_mb: DEFAULT_SIZE_WARNING_MB,
            default_scope: InstallScope::User,
        }
    }
}

impl Settings {
    /// `<config_dir>/cc-foundry/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("cc-foundry").join("config.toml"))
    }

    /// Load from the default path, falling back to defaults
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; a missing file yields defaults
    ///
    /// # Errors
    ///
    /// `Settings` if the file exists but is not valid TOML for this schema.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(?path, "No settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(foundry_fs::Error::io(path, e).into()),
        };

        tracing::debug!(?path, "Loading settings");
        toml::from_str(&content).map_err(|e| Error::Settings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Size threshold in bytes
    pub fn size_threshold_bytes(&self) -> u64 {
        self.config_size_warning_mb.saturating_mul(1024 * 1024)
    }
}
