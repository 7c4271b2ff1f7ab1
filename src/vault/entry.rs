//! Vault entry types

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::path::{base_name, extension, strip_extension};

/// A file in the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct File {
    pub path: String,
    /// Full file name including extension
    pub name: String,
    /// File name without extension
    pub basename: String,
    /// Extension without the dot, as stored on disk
    pub extension: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl File {
    pub fn new(path: impl Into<String>, created: DateTime<Utc>, modified: DateTime<Utc>) -> Self {
        let path = path.into();
        let name = base_name(&path).to_string();
        let basename = strip_extension(&name).to_string();
        let extension = extension(&name).to_string();
        Self {
            path,
            name,
            basename,
            extension,
            created,
            modified,
        }
    }

    pub fn is_markdown(&self) -> bool {
        self.extension == "md"
    }
}

/// A folder in the vault. Children are stored as paths in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folder {
    pub path: String,
    pub name: String,
    pub children: Vec<String>,
}

impl Folder {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Folder(Folder),
    File(File),
}

impl Entry {
    pub fn path(&self) -> &str {
        match self {
            Entry::Folder(folder) => &folder.path,
            Entry::File(file) => &file.path,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entry::Folder(folder) => &folder.name,
            Entry::File(file) => &file.name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Entry::Folder(_))
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Entry::Folder(folder) => Some(folder),
            Entry::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&File> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Folder(_) => None,
        }
    }
}
