//! Plugin-wide settings
//!
//! Settings are stored as a camelCase JSON document. Every field has a
//! default, so partial or missing files load cleanly.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::exclusion::ExclusionRegistry;
use crate::overview::OverviewConfig;

/// Placeholder substituted with the folder name in the note naming template.
pub const FOLDER_NAME_PLACEHOLDER: &str = "{{folder_name}}";

/// Where a folder's note lives relative to the folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageLocation {
    /// `Folder/<note>` inside the folder itself
    #[default]
    InsideFolder,
    /// `<note>` beside the folder, in its parent
    ParentFolder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Naming template for folder notes, containing `{{folder_name}}`
    pub folder_note_name: String,
    /// Extension of folder notes, including the dot
    pub folder_note_type: String,
    pub storage_location: StorageLocation,
    pub exclude_folders: ExclusionRegistry,
    pub default_overview: OverviewConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            folder_note_name: FOLDER_NAME_PLACEHOLDER.to_string(),
            folder_note_type: ".md".to_string(),
            storage_location: StorageLocation::default(),
            exclude_folders: ExclusionRegistry::default(),
            default_overview: OverviewConfig::default(),
        }
    }
}

impl Settings {
    /// Default settings location inside a vault directory.
    pub fn default_path(vault_dir: &Path) -> PathBuf {
        vault_dir
            .join(".obsidian")
            .join("plugins")
            .join("folder-notes")
            .join("data.json")
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        debug!("saved settings to {}", path.display());
        Ok(())
    }

    /// Note name (without extension) for a folder called `folder_name`.
    pub fn note_name_for(&self, folder_name: &str) -> String {
        self.folder_note_name
            .replace(FOLDER_NAME_PLACEHOLDER, folder_name)
    }

    /// Full note file name, extension included.
    pub fn note_file_name_for(&self, folder_name: &str) -> String {
        format!("{}{}", self.note_name_for(folder_name), self.folder_note_type)
    }
}
