//! Folder-note commands
//!
//! Mutating operations that create folders and their notes. Every command
//! validates its inputs before touching the store.

use log::info;

use crate::error::{Error, Result};
use crate::folder_note::{FolderNoteResolver, extract_folder_name, note_path_for};
use crate::settings::{Settings, StorageLocation};
use crate::vault::path::{base_name, is_root, join, parent_path};
use crate::vault::{Entry, File, FileStore, Folder};

/// Characters that cannot appear in a note name.
pub const INVALID_NAME_CHARS: &[char] = &['*', '\\', '"', '/', '<', '>', '?', '|', ':'];

/// Check a user-supplied note name.
///
/// ```
/// use folder_notes::commands::validate_note_name;
///
/// assert!(validate_note_name("Projects").is_ok());
/// assert!(validate_note_name("a/b").is_err());
/// assert!(validate_note_name("draft.").is_err());
/// ```
pub fn validate_note_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::EmptyName);
    }
    if name.contains(INVALID_NAME_CHARS) {
        return Err(Error::InvalidCharacters);
    }
    if name.ends_with('.') {
        return Err(Error::TrailingDot);
    }
    Ok(())
}

/// Outcome of turning a file into a folder note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnedNote {
    /// New path of the file, now the folder note.
    pub note: String,
    /// Where the folder's previous note was moved, if it had one.
    pub displaced: Option<String>,
}

pub struct FolderNoteCommands<'a, S: FileStore + ?Sized> {
    store: &'a mut S,
    settings: &'a Settings,
}

impl<'a, S: FileStore + ?Sized> FolderNoteCommands<'a, S> {
    pub fn new(store: &'a mut S, settings: &'a Settings) -> Self {
        Self { store, settings }
    }

    /// Create an empty folder note for an existing folder. Returns the path
    /// of the new note.
    pub fn create_folder_note(&mut self, folder_path: &str) -> Result<String> {
        let folder = match self.store.entry(folder_path) {
            Some(Entry::Folder(folder)) => folder,
            Some(Entry::File(_)) => return Err(Error::NotAFolder(folder_path.to_string())),
            None => return Err(Error::NotFound(folder_path.to_string())),
        };
        let note_path = FolderNoteResolver::new(&*self.store, self.settings)
            .note_path(folder)
            .ok_or_else(|| Error::NoNoteLocation(folder_path.to_string()))?;
        if self.store.entry(&note_path).is_some() {
            return Err(Error::FileExists(note_path));
        }

        self.store.create_file(&note_path, "")?;
        info!("created folder note {}", note_path);
        Ok(note_path)
    }

    /// Turn `selection`, selected inside the note at `host_note`, into a new
    /// folder beside that note with its own folder note. Returns the wiki link
    /// that replaces the selection.
    pub fn create_from_selection(&mut self, host_note: &str, selection: &str) -> Result<String> {
        validate_note_name(selection)?;

        let parent = parent_path(host_note);
        let folder_path = join(parent, selection);
        match self.store.entry(&folder_path) {
            Some(Entry::Folder(_)) => return Err(Error::FolderNoteExists(folder_path)),
            Some(Entry::File(_)) => return Err(Error::FileExists(folder_path)),
            None => {}
        }
        let note_path = note_path_for(self.settings, &folder_path, selection)
            .ok_or_else(|| Error::NoNoteLocation(folder_path.clone()))?;
        if self.settings.storage_location == StorageLocation::ParentFolder
            && self.store.entry(&note_path).is_some()
        {
            return Err(Error::FileExists(note_path));
        }

        self.store.create_folder(&folder_path)?;
        self.store.create_file(&note_path, "")?;
        info!("created folder {} with note {}", folder_path, note_path);

        let note_name = self.settings.note_name_for(selection);
        if note_name == selection {
            Ok(format!("[[{}]]", note_name))
        } else {
            Ok(format!("[[{}|{}]]", note_name, selection))
        }
    }

    /// Create a folder named after the file at `file_path`, beside it, and
    /// move the file in as that folder's note. Returns the note's new path.
    pub fn create_for_file(&mut self, file_path: &str) -> Result<String> {
        let file = self.plain_file(file_path)?;
        let folder_path = join(parent_path(&file.path), &file.basename);
        if self.store.entry(&folder_path).is_some() {
            return Err(Error::FolderExists(folder_path));
        }

        // The moved note keeps its own extension
        let note_path = self
            .note_path_with_extension(&folder_path, &file.basename, &file.extension)
            .ok_or_else(|| Error::NoNoteLocation(folder_path.clone()))?;
        if note_path != file.path && self.store.entry(&note_path).is_some() {
            return Err(Error::FileExists(note_path));
        }

        self.store.create_folder(&folder_path)?;
        if note_path != file.path {
            self.store.rename(&file.path, &note_path)?;
        }
        info!("turned {} into folder note of {}", base_name(&file.path), folder_path);
        Ok(note_path)
    }

    /// Delete the folder note of the folder at `folder_path`. Returns the
    /// path of the deleted note.
    pub fn delete_folder_note(&mut self, folder_path: &str) -> Result<String> {
        match self.store.entry(folder_path) {
            Some(Entry::Folder(_)) => {}
            Some(Entry::File(_)) => return Err(Error::NotAFolder(folder_path.to_string())),
            None => return Err(Error::NotFound(folder_path.to_string())),
        }
        let note_path = FolderNoteResolver::new(&*self.store, self.settings)
            .resolve(folder_path)
            .map(|note| note.path.clone())
            .ok_or_else(|| Error::NoFolderNote(folder_path.to_string()))?;

        self.store.delete(&note_path)?;
        info!("deleted folder note {}", note_path);
        Ok(note_path)
    }

    /// Make the file at `file_path` the folder note of the folder it belongs
    /// to. A previous folder note is moved aside inside the folder as
    /// `<folder name> (n).<ext>`.
    pub fn turn_into_folder_note(&mut self, file_path: &str) -> Result<TurnedNote> {
        let file = self.plain_file(file_path)?;
        let folder = self.owning_folder(&file)?;
        if is_root(&folder.path) {
            return Err(Error::NoNoteLocation("/".to_string()));
        }

        let note_path = self
            .note_path_with_extension(&folder.path, &folder.name, &file.extension)
            .ok_or_else(|| Error::NoNoteLocation(folder.path.clone()))?;
        if note_path == file.path {
            return Err(Error::AlreadyFolderNote(file.path));
        }
        let existing = FolderNoteResolver::new(&*self.store, self.settings)
            .resolve(&folder.path)
            .cloned();
        let existing_path = existing.as_ref().map(|note| note.path.as_str());
        if existing_path != Some(note_path.as_str()) && self.store.entry(&note_path).is_some() {
            return Err(Error::FileExists(note_path));
        }

        let displaced = match existing {
            Some(note) => {
                let aside = self.displaced_path(&folder, &note);
                self.store.rename(&note.path, &aside)?;
                Some(aside)
            }
            None => None,
        };
        self.store.rename(&file.path, &note_path)?;
        info!("turned {} into folder note of {}", file.path, folder.path);
        Ok(TurnedNote {
            note: note_path,
            displaced,
        })
    }

    /// The file at `path`, unless it is already some folder's note.
    fn plain_file(&self, path: &str) -> Result<File> {
        let entry = self
            .store
            .entry(path)
            .ok_or_else(|| Error::NotFound(path.to_string()))?;
        let Entry::File(file) = entry else {
            return Err(Error::NotAFile(path.to_string()));
        };
        if FolderNoteResolver::new(&*self.store, self.settings).is_folder_note(entry) {
            return Err(Error::AlreadyFolderNote(file.path.clone()));
        }
        Ok(file.clone())
    }

    /// Folder a file would become the note of. In parent-folder mode that is
    /// the sibling folder its name points at, when one exists.
    fn owning_folder(&self, file: &File) -> Result<Folder> {
        let parent = parent_path(&file.path);
        let named = match self.settings.storage_location {
            StorageLocation::InsideFolder => None,
            StorageLocation::ParentFolder => {
                extract_folder_name(&self.settings.folder_note_name, &file.basename)
                    .and_then(|name| self.store.folder(&join(parent, &name)))
            }
        };
        named
            .or_else(|| self.store.folder(parent))
            .cloned()
            .ok_or_else(|| Error::NotFound(parent.to_string()))
    }

    /// Folder-note path with `extension` in place of the configured note type.
    fn note_path_with_extension(
        &self,
        folder_path: &str,
        folder_name: &str,
        extension: &str,
    ) -> Option<String> {
        let note_path = note_path_for(self.settings, folder_path, folder_name)?;
        let stem = note_path
            .strip_suffix(self.settings.folder_note_type.as_str())
            .unwrap_or(&note_path);
        Some(with_extension(stem, extension))
    }

    fn displaced_path(&self, folder: &Folder, note: &File) -> String {
        let mut n = 1;
        loop {
            let name = with_extension(&format!("{} ({})", folder.name, n), &note.extension);
            let path = join(&folder.path, &name);
            if self.store.entry(&path).is_none() {
                return path;
            }
            n += 1;
        }
    }
}

fn with_extension(stem: &str, extension: &str) -> String {
    if extension.is_empty() {
        stem.to_string()
    } else {
        format!("{}.{}", stem, extension)
    }
}
