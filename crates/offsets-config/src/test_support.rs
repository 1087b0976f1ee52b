//! Test helpers shared across offsets-config unit tests.
//!
//! Kept behind `cfg(test)` to avoid leaking into the public API surface.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// Temporary directory utility for tests.
pub struct TestDir {
    /// Backing temporary directory.
    root: TempDir,
}

impl TestDir {
    /// Creates a new temporary directory tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Returns the path to the root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory relative to the root.
    pub fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes a config file into the directory `rel_dir` and returns its path.
    pub fn create_config(&self, rel_dir: &str, contents: &str) -> PathBuf {
        let dir = self.create_dir(rel_dir);
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, contents).unwrap();
        path
    }
}
