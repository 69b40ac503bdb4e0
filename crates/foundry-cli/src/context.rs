//! Per-invocation context
//!
//! Resolves locations, settings and the catalog bundle once, so commands
//! never look up the home directory or environment themselves.

use std::path::PathBuf;

use foundry_core::{
    ContentType, DirectoryCatalog, InstallScope, Locations, Selection, Settings, StateStore,
};

use crate::cli::ScopeArgs;
use crate::error::{CliError, Result};

pub struct Context {
    pub locations: Locations,
    pub settings: Settings,
    catalog_dir: Option<PathBuf>,
}

impl Context {
    /// Detect locations and load settings; `catalog` overrides the configured bundle
    pub fn detect(catalog: Option<PathBuf>) -> Result<Self> {
        let locations = Locations::detect()?;
        let settings = Settings::load()?;
        let catalog_dir = catalog.or_else(|| settings.catalog_dir.clone());
        tracing::debug!(
            home = %locations.home(),
            project = %locations.project(),
            catalog = ?catalog_dir,
            "Resolved context"
        );
        Ok(Self {
            locations,
            settings,
            catalog_dir,
        })
    }

    pub fn store(&self) -> StateStore {
        self.locations.state_store()
    }

    /// The catalog bundle
    ///
    /// Only commands that read the catalog need one configured.
    pub fn catalog(&self) -> Result<DirectoryCatalog> {
        let dir = self.catalog_dir.as_ref().ok_or_else(|| {
            CliError::user(
                "No catalog configured. Pass --catalog <DIR>, set CCF_CATALOG_DIR, \
                 or set catalog_dir in the settings file",
            )
        })?;
        if !dir.is_dir() {
            return Err(CliError::user(format!(
                "Catalog directory does not exist: {}",
                dir.display()
            )));
        }
        Ok(DirectoryCatalog::new(dir.as_path()))
    }

    /// Scope from explicit flags, falling back to the configured default
    pub fn scope(&self, args: &ScopeArgs) -> InstallScope {
        explicit_scope(args).unwrap_or(self.settings.default_scope)
    }
}

/// Scope only if a flag was given
pub fn explicit_scope(args: &ScopeArgs) -> Option<InstallScope> {
    if args.project {
        Some(InstallScope::Project)
    } else if args.user {
        Some(InstallScope::User)
    } else {
        None
    }
}

/// Parse `--type` and combine it with the category into a selection
pub fn selection(category: Option<&str>, kind: Option<&str>) -> Result<(Selection, Option<ContentType>)> {
    let kind = kind.map(str::parse::<ContentType>).transpose()?;
    if category.is_none() && kind.is_some() {
        return Err(CliError::user("--type requires a category"));
    }
    Ok((Selection::from_parts(category, kind), kind))
}
