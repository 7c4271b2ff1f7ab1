//! Folder-note resolution
//!
//! A folder note is the note that represents a folder. Depending on the
//! storage location setting it lives either inside the folder or beside it in
//! the parent folder, and is named by the `folderNoteName` template.

use regex::Regex;

use crate::settings::{FOLDER_NAME_PLACEHOLDER, Settings, StorageLocation};
use crate::vault::path::{is_root, join, parent_path};
use crate::vault::{Entry, File, FileStore, Folder};

/// Recover the folder name from a note name by matching it against the naming
/// template. Returns `None` when the name does not fit the template.
///
/// ```
/// use folder_notes::folder_note::extract_folder_name;
///
/// assert_eq!(extract_folder_name("{{folder_name}}", "Projects"), Some("Projects".to_string()));
/// assert_eq!(extract_folder_name("_{{folder_name}}", "_Projects"), Some("Projects".to_string()));
/// assert_eq!(extract_folder_name("_{{folder_name}}", "Projects"), None);
/// ```
pub fn extract_folder_name(template: &str, note_name: &str) -> Option<String> {
    let escaped_placeholder = regex::escape(FOLDER_NAME_PLACEHOLDER);
    let pattern = regex::escape(template).replacen(&escaped_placeholder, "(.+)", 1);
    let re = Regex::new(&format!("^{}$", pattern)).ok()?;
    re.captures(note_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Path of the folder note for a folder at `folder_path` named `folder_name`.
/// The vault root has no such path in parent-folder mode, and none in
/// inside-folder mode unless the root carries a name.
pub fn note_path_for(settings: &Settings, folder_path: &str, folder_name: &str) -> Option<String> {
    if folder_name.is_empty() {
        return None;
    }
    let file_name = settings.note_file_name_for(folder_name);
    match settings.storage_location {
        StorageLocation::InsideFolder => Some(join(folder_path, &file_name)),
        StorageLocation::ParentFolder if is_root(folder_path) => None,
        StorageLocation::ParentFolder => Some(join(parent_path(folder_path), &file_name)),
    }
}

/// Resolves folders to their folder notes using the store's path index.
pub struct FolderNoteResolver<'a, S: FileStore + ?Sized> {
    store: &'a S,
    settings: &'a Settings,
}

impl<'a, S: FileStore + ?Sized> FolderNoteResolver<'a, S> {
    pub fn new(store: &'a S, settings: &'a Settings) -> Self {
        Self { store, settings }
    }

    /// Path the folder note of `folder` would have, whether or not it exists.
    pub fn note_path(&self, folder: &Folder) -> Option<String> {
        note_path_for(self.settings, &folder.path, &folder.name)
    }

    /// The existing folder note of the folder at `folder_path`, if any.
    pub fn resolve(&self, folder_path: &str) -> Option<&'a File> {
        let folder = self.store.folder(folder_path)?;
        let note_path = self.note_path(folder)?;
        self.store.file(&note_path)
    }

    /// The folder a note represents, if the note is a folder note.
    pub fn folder_for_note(&self, note: &File) -> Option<&'a Folder> {
        let candidate = match self.settings.storage_location {
            StorageLocation::InsideFolder => self.store.folder(parent_path(&note.path))?,
            StorageLocation::ParentFolder => {
                let name = extract_folder_name(&self.settings.folder_note_name, &note.basename)?;
                self.store.folder(&join(parent_path(&note.path), &name))?
            }
        };
        let resolved = self.resolve(&candidate.path)?;
        (resolved.path == note.path).then_some(candidate)
    }

    /// Whether `entry` is the folder note of some folder.
    pub fn is_folder_note(&self, entry: &Entry) -> bool {
        entry
            .as_file()
            .is_some_and(|file| self.folder_for_note(file).is_some())
    }
}
