//! [`TestEnv`] for engine and CLI scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use foundry_core::{Locations, StateStore};
use foundry_fs::NormalizedPath;
use tempfile::TempDir;

/// A temporary home directory and a separate project directory.
///
/// Both are created empty; nothing exists under them until a test writes it.
///
/// # Example
///
/// ```rust,no_run
/// use foundry_test_utils::TestEnv;
///
/// let env = TestEnv::new();
/// let locations = env.locations();
/// env.write_external_config("{}");
/// env.assert_exists(&env.home().join(".claude.json"));
/// ```
pub struct TestEnv {
    temp_dir: TempDir,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("home")).unwrap();
        fs::create_dir_all(temp_dir.path().join("project")).unwrap();
        Self { temp_dir }
    }

    pub fn home(&self) -> PathBuf {
        self.temp_dir.path().join("home")
    }

    pub fn project(&self) -> PathBuf {
        self.temp_dir.path().join("project")
    }

    /// Scratch space outside both home and project
    pub fn scratch(&self) -> PathBuf {
        let dir = self.temp_dir.path().join("scratch");
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    pub fn locations(&self) -> Locations {
        Locations::new(self.home(), self.project())
    }

    pub fn store(&self) -> StateStore {
        self.locations().state_store()
    }

    pub fn user_root(&self) -> NormalizedPath {
        self.locations().user_root()
    }

    pub fn project_root(&self) -> NormalizedPath {
        self.locations().project_root()
    }

    /// Write `~/.claude.json`
    pub fn write_external_config(&self, content: impl AsRef<[u8]>) {
        fs::write(self.home().join(".claude.json"), content).unwrap();
    }

    /// Write `content` to `path`, creating parent directories.
    pub fn write(&self, path: &Path, content: impl AsRef<[u8]>) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Read a file as UTF-8.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, path: &Path) {
        assert!(path.exists(), "Expected path to exist: {}", path.display());
    }

    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_not_exists(&self, path: &Path) {
        assert!(
            !path.exists(),
            "Expected path NOT to exist: {}",
            path.display()
        );
    }
}
