//! Test utilities for building vaults in memory and on disk.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::TempDir;

use crate::vault::Vault;

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).expect("timestamp in range")
}

/// Builder for in-memory vaults.
///
/// Entries are added in call order, which is also the order children are
/// listed in. Notes added with [`VaultBuilder::note`] get increasing
/// timestamps so tests that do not care about time still sort stably.
pub struct VaultBuilder {
    vault: Vault,
    clock: i64,
}

impl VaultBuilder {
    /// A vault whose root folder has no name.
    pub fn new() -> Self {
        Self::named("")
    }

    /// A vault whose root folder is called `name`.
    pub fn named(name: &str) -> Self {
        Self {
            vault: Vault::new(name),
            clock: 0,
        }
    }

    /// Add a file with auto-assigned timestamps. Parent folders are created
    /// as needed.
    pub fn note(mut self, path: &str, content: &str) -> Self {
        self.clock += 1;
        let time = at(self.clock);
        self.vault
            .add_file(path, content, time, time)
            .expect("Failed to add note");
        self
    }

    /// Add a file with explicit creation and modification times, in seconds.
    pub fn file(mut self, path: &str, content: &str, created: i64, modified: i64) -> Self {
        self.vault
            .add_file(path, content, at(created), at(modified))
            .expect("Failed to add file");
        self
    }

    pub fn folder(mut self, path: &str) -> Self {
        self.vault
            .insert_folder(path)
            .expect("Failed to add folder");
        self
    }

    pub fn build(self) -> Vault {
        self.vault
    }
}

impl Default for VaultBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A temporary vault directory.
///
/// The directory is automatically cleaned up when dropped.
pub struct TempVault {
    dir: TempDir,
}

impl TempVault {
    /// Create a new empty temporary vault directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the vault directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Read a file back, relative to the vault.
    pub fn read(&self, path: &str) -> String {
        fs::read_to_string(self.dir.path().join(path)).expect("Failed to read file")
    }
}

impl Default for TempVault {
    fn default() -> Self {
        Self::new()
    }
}
