//! Registry of folders opted out of folder overviews

use log::info;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// A folder flagged in the exclusion registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcludedFolder {
    pub path: String,
    /// Order index, kept so the serialized registry stays stable
    pub position: usize,
    #[serde(default = "default_true")]
    pub exclude_from_folder_overview: bool,
}

impl ExcludedFolder {
    pub fn new(path: impl Into<String>, position: usize) -> Self {
        Self {
            path: path.into(),
            position,
            exclude_from_folder_overview: true,
        }
    }
}

/// Ordered list of excluded folders. Lookups are exact path matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionRegistry {
    folders: Vec<ExcludedFolder>,
}

impl ExclusionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_excluded(&self, path: &str) -> Option<&ExcludedFolder> {
        self.folders.iter().find(|folder| folder.path == path)
    }

    /// Whether the overview engine must skip `path`.
    pub fn excludes_from_overview(&self, path: &str) -> bool {
        self.is_excluded(path)
            .is_some_and(|folder| folder.exclude_from_folder_overview)
    }

    /// Exclude a folder. Already-excluded folders keep their existing entry.
    pub fn exclude(&mut self, path: &str) -> &ExcludedFolder {
        let index = match self.folders.iter().position(|f| f.path == path) {
            Some(index) => index,
            None => {
                let position = self.folders.len();
                self.folders.push(ExcludedFolder::new(path, position));
                info!("excluded folder {}", path);
                position
            }
        };
        &self.folders[index]
    }

    /// Remove a folder from the registry. Returns whether it was present.
    pub fn include(&mut self, path: &str) -> bool {
        let before = self.folders.len();
        self.folders.retain(|f| f.path != path);
        let removed = self.folders.len() != before;
        if removed {
            info!("removed folder {} from excluded folders", path);
        }
        removed
    }

    /// Flip a folder's exclusion. Returns `true` when it is now excluded.
    pub fn toggle(&mut self, path: &str) -> bool {
        if self.include(path) {
            false
        } else {
            self.exclude(path);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExcludedFolder> {
        self.folders.iter()
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}
