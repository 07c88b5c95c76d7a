//! [`TestWorkspace`] for descriptor-set file tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding descriptor-set files.
///
/// # Example
///
/// ```rust,no_run
/// use loadorder_test_utils::TestWorkspace;
///
/// let workspace = TestWorkspace::new();
/// let path = workspace.write_set("pages.toml", "[interface]\nname = \"pages\"\n");
/// assert!(path.exists());
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `contents` to `name` inside the workspace and return its path.
    pub fn write_set(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Path of a file that does not exist.
    pub fn missing(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }
}
