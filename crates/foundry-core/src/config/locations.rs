//! Install roots and well-known document paths

use std::fmt;
use std::str::FromStr;

use foundry_fs::{FoundryPath, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::state::StateStore;
use crate::{Error, Result};

/// Which of the two supported install roots to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallScope {
    /// `~/.claude`
    #[default]
    User,
    /// `<project>/.claude`
    Project,
}

impl fmt::Display for InstallScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Project => "project",
        })
    }
}

impl FromStr for InstallScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" | "personal" => Ok(Self::User),
            "project" => Ok(Self::Project),
            other => Err(format!("unknown scope '{}' (expected user or project)", other)),
        }
    }
}

/// Machine-dependent paths for one run
///
/// Resolved once by the caller and passed down explicitly; nothing in the
/// engine looks up the home or current directory on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    home: NormalizedPath,
    project: NormalizedPath,
}

impl Locations {
    pub fn new(home: impl Into<NormalizedPath>, project: impl Into<NormalizedPath>) -> Self {
        Self {
            home: home.into(),
            project: project.into(),
        }
    }

    /// Use the user's home directory and the current working directory
    pub fn detect() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::HomeDirUnavailable)?;
        let project = std::env::current_dir()?;
        Ok(Self::new(home, project))
    }

    pub fn home(&self) -> &NormalizedPath {
        &self.home
    }

    pub fn project(&self) -> &NormalizedPath {
        &self.project
    }

    /// `<home>/.claude`
    pub fn user_root(&self) -> NormalizedPath {
        self.home.join(FoundryPath::ClaudeDir.as_str())
    }

    /// `<project>/.claude`
    pub fn project_root(&self) -> NormalizedPath {
        self.project.join(FoundryPath::ClaudeDir.as_str())
    }

    pub fn root(&self, scope: InstallScope) -> NormalizedPath {
        match scope {
            InstallScope::User => self.user_root(),
            InstallScope::Project => self.project_root(),
        }
    }

    /// Both roots, with the project root dropped when it is the user root
    pub fn roots(&self) -> Vec<(InstallScope, NormalizedPath)> {
        let user = self.user_root();
        let project = self.project_root();
        if user == project {
            vec![(InstallScope::User, user)]
        } else {
            vec![(InstallScope::User, user), (InstallScope::Project, project)]
        }
    }

    /// Which root an installed path belongs to
    pub fn scope_of(&self, path: &NormalizedPath) -> Option<InstallScope> {
        self.roots()
            .into_iter()
            .find(|(_, root)| path.starts_with(root))
            .map(|(scope, _)| scope)
    }

    /// `<home>/.claude-code-foundry.json`
    pub fn state_file(&self) -> NormalizedPath {
        self.home.join(FoundryPath::StateFile.as_str())
    }

    /// `<home>/.claude.json`
    pub fn external_config(&self) -> NormalizedPath {
        self.home.join(FoundryPath::ExternalConfig.as_str())
    }

    /// A store for this run's state document
    pub fn state_store(&self) -> StateStore {
        StateStore::new(self.state_file())
    }
}
