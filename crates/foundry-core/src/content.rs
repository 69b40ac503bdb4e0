//! Catalog content shapes
//!
//! Every catalog item has one of three types. Commands and agents install
//! as a single flat markdown file; skills install as a directory holding a
//! fixed-name `SKILL.md`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The supported content shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Commands,
    Agents,
    Skills,
}

impl ContentType {
    /// All types, in catalog listing order.
    pub const ALL: [ContentType; 3] = [Self::Commands, Self::Agents, Self::Skills];

    /// Directory name used both in the catalog bundle and under an install root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Commands => "commands",
            Self::Agents => "agents",
            Self::Skills => "skills",
        }
    }

    /// Singular label for display ("command", "agent", "skill").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Commands => "command",
            Self::Agents => "agent",
            Self::Skills => "skill",
        }
    }

    /// Whether items of this type install as `<name>/SKILL.md` rather than a flat file.
    pub fn is_directory_per_item(&self) -> bool {
        matches!(self, Self::Skills)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "commands" | "command" => Ok(Self::Commands),
            "agents" | "agent" => Ok(Self::Agents),
            "skills" | "skill" => Ok(Self::Skills),
            _ => Err(Error::UnknownContentType {
                name: s.to_string(),
            }),
        }
    }
}

/// One distributable item from the catalog.
///
/// Content is opaque: it may start with a `---` key/value header, but it is
/// written to disk byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFile {
    pub category: String,
    pub kind: ContentType,
    pub filename: String,
    pub content: Vec<u8>,
}

impl CatalogFile {
    pub fn new(
        category: impl Into<String>,
        kind: ContentType,
        filename: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            category: category.into(),
            kind,
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Hex SHA-256 of the content.
    pub fn hash(&self) -> String {
        foundry_fs::content_hash(&self.content)
    }
}
