//! Fixed filesystem names used by the installer and diagnostics.

/// Well-known file and directory names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoundryPath {
    /// The `.claude` directory, present under both the home and project directories
    ClaudeDir,
    /// The installation state document, kept in the home directory
    StateFile,
    /// The externally-owned configuration document, kept in the home directory
    ExternalConfig,
    /// The leaf file inside every directory-per-item installation
    SkillFile,
}

impl FoundryPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClaudeDir => ".claude",
            Self::StateFile => ".claude-code-foundry.json",
            Self::ExternalConfig => ".claude.json",
            Self::SkillFile => "SKILL.md",
        }
    }
}

impl std::fmt::Display for FoundryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
