//! Error type shared by the vault, settings, and folder-note commands

use thiserror::Error;

/// Errors surfaced to the caller of a folder-note operation.
///
/// Rendering never fails with these: a malformed overview block falls back to
/// defaults and a missing source folder simply renders nothing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("file name cannot contain any of the following characters: * \" \\ / < > : | ?")]
    InvalidCharacters,

    #[error("file name cannot end with a dot")]
    TrailingDot,

    #[error("file name cannot be empty")]
    EmptyName,

    #[error("folder note already exists: {0}")]
    FolderNoteExists(String),

    #[error("file already exists: {0}")]
    FileExists(String),

    #[error("folder already exists: {0}")]
    FolderExists(String),

    #[error("no such file or folder: {0}")]
    NotFound(String),

    #[error("not a folder: {0}")]
    NotAFolder(String),

    #[error("not a file: {0}")]
    NotAFile(String),

    #[error("folder cannot have a folder note: {0}")]
    NoNoteLocation(String),

    #[error("already a folder note: {0}")]
    AlreadyFolderNote(String),

    #[error("no folder note for {0}")]
    NoFolderNote(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to scan vault: {0}")]
    Walk(#[from] ignore::Error),

    #[error("invalid settings file: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("failed to encode overview block: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
