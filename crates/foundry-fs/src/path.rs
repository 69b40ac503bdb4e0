//! Normalized path handling
//!
//! Installed paths are persisted as strings and later compared for
//! equality, so every path that reaches the state document or the
//! orphan scanner goes through [`NormalizedPath`].

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Two `NormalizedPath`s built from the same root with the same sequence of
/// [`join`](Self::join) calls always compare equal, which is what lets a
/// record's `installed_path` be matched against a path found by scanning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Backslashes become `/` and trailing separators are dropped (a bare
    /// `/` is kept).
    pub fn new(path: impl AsRef<Path>) -> Self {
        let mut inner = path.as_ref().to_string_lossy().replace('\\', "/");
        let keep = inner.trim_end_matches('/').len().max(1).min(inner.len());
        inner.truncate(keep);
        Self { inner }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Path for handing to `std::fs`.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append one or more `/`-separated components.
    pub fn join(&self, segment: &str) -> Self {
        let tail = segment.replace('\\', "/");
        let tail = tail.trim_start_matches('/');
        match self.inner.as_str() {
            "" => Self::new(tail),
            base if base.ends_with('/') => Self::new(format!("{base}{tail}")),
            base => Self::new(format!("{base}/{tail}")),
        }
    }

    /// The containing directory; `None` for a root or a single relative component.
    pub fn parent(&self) -> Option<Self> {
        let split = self.inner.rfind('/')?;
        match split {
            0 if self.inner.len() > 1 => Some(Self::new("/")),
            0 => None,
            _ => Some(Self::new(&self.inner[..split])),
        }
    }

    /// Last component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Whether `self` is `base` or lies beneath it.
    pub fn starts_with(&self, base: &NormalizedPath) -> bool {
        match self.inner.strip_prefix(base.inner.as_str()) {
            Some("") => true,
            Some(rest) => base.inner.ends_with('/') || rest.starts_with('/'),
            None => false,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

/// Validate that a name can be used as a single path component.
///
/// Catalog category names and filenames end up embedded in installed
/// paths, so they must not be able to escape their parent directory.
///
/// # Errors
///
/// Returns a human-readable message naming `label` when `value` is empty,
/// contains a separator or NUL, or is a dot segment.
pub fn validate_path_identifier(value: &str, label: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{} must not be empty", label));
    }
    if value == "." || value == ".." {
        return Err(format!("{} must not be a dot segment: {:?}", label, value));
    }
    if value.contains(['/', '\\', '\0']) {
        return Err(format!(
            "{} must not contain path separators: {:?}",
            label, value
        ));
    }
    Ok(())
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
