//! Folder notes - folder notes and folder overviews for markdown vaults

pub mod commands;
pub mod error;
pub mod exclusion;
pub mod folder_note;
pub mod output;
pub mod overview;
pub mod settings;
pub mod string_utils;
pub mod vault;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use commands::{FolderNoteCommands, TurnedNote, validate_note_name};
pub use error::{Error, Result};
pub use exclusion::{ExcludedFolder, ExclusionRegistry};
pub use folder_note::FolderNoteResolver;
pub use output::{MarkdownFormatter, OutputConfig, TreeFormatter, print_json, print_markdown};
pub use overview::{Overview, OverviewBody, OverviewConfig, OverviewRenderer, RenderNode};
pub use settings::{Settings, StorageLocation};
pub use vault::{Entry, File, FileStore, Folder, Vault};
