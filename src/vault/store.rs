//! File store abstraction and the path-indexed `Vault` implementation

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ignore::WalkBuilder;
use log::{debug, info};

use crate::error::{Error, Result};

use super::entry::{Entry, File, Folder};
use super::path::{base_name, normalize, parent_path};

/// Storage collaborator used by the overview engine and the folder-note
/// commands. Lookups are by vault path; `""` is the root folder.
pub trait FileStore: Sync {
    fn entry(&self, path: &str) -> Option<&Entry>;

    /// Read a file's full text content.
    fn read(&self, file: &File) -> Result<String>;

    fn create_folder(&mut self, path: &str) -> Result<()>;

    fn create_file(&mut self, path: &str, content: &str) -> Result<()>;

    /// Move a file to a new path. Folders cannot be renamed.
    fn rename(&mut self, from: &str, to: &str) -> Result<()>;

    /// Remove a file. Folders cannot be deleted.
    fn delete(&mut self, path: &str) -> Result<()>;

    /// Immediate children of a folder, in insertion order.
    fn children<'a>(&'a self, folder: &Folder) -> Vec<&'a Entry> {
        folder
            .children
            .iter()
            .filter_map(|path| self.entry(path))
            .collect()
    }

    fn folder(&self, path: &str) -> Option<&Folder> {
        self.entry(path).and_then(Entry::as_folder)
    }

    fn file(&self, path: &str) -> Option<&File> {
        self.entry(path).and_then(Entry::as_file)
    }
}

/// In-memory path index of a vault, optionally backed by a directory on disk.
///
/// A disk-backed vault reads file content lazily and applies mutations to the
/// directory as well as to the index.
#[derive(Debug, Clone)]
pub struct Vault {
    dir: Option<PathBuf>,
    entries: HashMap<String, Entry>,
    contents: HashMap<String, String>,
}

impl Vault {
    /// Create an empty in-memory vault whose root folder carries `name`.
    pub fn new(name: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(String::new(), Entry::Folder(Folder::new("", name)));
        Self {
            dir: None,
            entries,
            contents: HashMap::new(),
        }
    }

    /// Index a vault directory. Hidden entries (such as the `.obsidian`
    /// config folder) and gitignored paths are skipped, as are symlinks.
    pub fn open(dir: &Path) -> Result<Self> {
        let name = dir
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .unwrap_or_default();
        let mut vault = Self::new(&name);

        let mut builder = WalkBuilder::new(dir);
        builder
            .hidden(true)
            .git_ignore(true)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        for result in builder.build() {
            let dir_entry = result?;
            if dir_entry.depth() == 0 {
                continue;
            }
            let Ok(relative) = dir_entry.path().strip_prefix(dir) else {
                continue;
            };
            let path = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect::<Vec<_>>()
                .join("/");
            let Some(file_type) = dir_entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                vault.insert_folder(&path)?;
            } else if file_type.is_file() {
                let metadata = dir_entry.metadata()?;
                let modified = metadata
                    .modified()
                    .map(DateTime::<Utc>::from)
                    .unwrap_or_else(|_| Utc::now());
                // Not every filesystem records a birth time
                let created = metadata
                    .created()
                    .map(DateTime::<Utc>::from)
                    .unwrap_or(modified);
                vault.insert_file(File::new(path, created, modified))?;
            }
        }

        debug!("indexed {} entries under {}", vault.len(), dir.display());
        vault.dir = Some(dir.to_path_buf());
        Ok(vault)
    }

    /// Number of indexed entries, including the root folder.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }

    pub fn root(&self) -> &Folder {
        match self.entries.get("") {
            Some(Entry::Folder(folder)) => folder,
            _ => unreachable!("vault root is always a folder"),
        }
    }

    /// Add a file with content to the index, creating parent folders as needed.
    pub fn add_file(
        &mut self,
        path: &str,
        content: &str,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Result<()> {
        let path = normalize(path);
        self.insert_file(File::new(path, created, modified))?;
        self.contents.insert(path.to_string(), content.to_string());
        Ok(())
    }

    /// Add a folder (and any missing ancestors) to the index. Existing folders
    /// are left untouched.
    pub fn insert_folder(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        match self.entries.get(path) {
            Some(Entry::Folder(_)) => return Ok(()),
            Some(Entry::File(_)) => return Err(Error::FileExists(path.to_string())),
            None => {}
        }

        let parent = parent_path(path);
        self.insert_folder(parent)?;
        self.entries.insert(
            path.to_string(),
            Entry::Folder(Folder::new(path, base_name(path))),
        );
        self.attach(parent, path);
        Ok(())
    }

    fn insert_file(&mut self, file: File) -> Result<()> {
        let path = file.path.clone();
        if self.entries.contains_key(&path) {
            return Err(Error::FileExists(path));
        }
        let parent = parent_path(&path).to_string();
        self.insert_folder(&parent)?;
        self.entries.insert(path.clone(), Entry::File(file));
        self.attach(&parent, &path);
        Ok(())
    }

    fn attach(&mut self, parent: &str, child: &str) {
        if let Some(Entry::Folder(folder)) = self.entries.get_mut(parent) {
            if !folder.children.iter().any(|c| c == child) {
                folder.children.push(child.to_string());
            }
        }
    }

    fn detach(&mut self, parent: &str, child: &str) {
        if let Some(Entry::Folder(folder)) = self.entries.get_mut(parent) {
            folder.children.retain(|c| c != child);
        }
    }

    fn require_folder(&self, path: &str) -> Result<()> {
        match self.entries.get(path) {
            Some(Entry::Folder(_)) => Ok(()),
            Some(Entry::File(_)) => Err(Error::NotAFolder(path.to_string())),
            None => Err(Error::NotFound(path.to_string())),
        }
    }
}

impl FileStore for Vault {
    fn entry(&self, path: &str) -> Option<&Entry> {
        self.entries.get(normalize(path))
    }

    fn read(&self, file: &File) -> Result<String> {
        if let Some(content) = self.contents.get(&file.path) {
            return Ok(content.clone());
        }
        match &self.dir {
            Some(dir) => Ok(fs::read_to_string(dir.join(&file.path))?),
            None if self.entries.contains_key(&file.path) => Ok(String::new()),
            None => Err(Error::NotFound(file.path.clone())),
        }
    }

    fn create_folder(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        match self.entries.get(path) {
            Some(Entry::Folder(_)) => return Err(Error::FolderExists(path.to_string())),
            Some(Entry::File(_)) => return Err(Error::FileExists(path.to_string())),
            None => {}
        }
        if let Some(dir) = &self.dir {
            fs::create_dir_all(dir.join(path))?;
        }
        self.insert_folder(path)?;
        info!("created folder {}", path);
        Ok(())
    }

    fn create_file(&mut self, path: &str, content: &str) -> Result<()> {
        let path = normalize(path);
        if self.entries.contains_key(path) {
            return Err(Error::FileExists(path.to_string()));
        }
        self.require_folder(parent_path(path))?;

        let now = Utc::now();
        match &self.dir {
            Some(dir) => {
                fs::write(dir.join(path), content)?;
                self.insert_file(File::new(path, now, now))?;
            }
            None => self.add_file(path, content, now, now)?,
        }
        info!("created file {}", path);
        Ok(())
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        let from = normalize(from);
        let to = normalize(to);
        let file = match self.entries.get(from) {
            Some(Entry::File(file)) => file.clone(),
            Some(Entry::Folder(_)) => return Err(Error::NotAFile(from.to_string())),
            None => return Err(Error::NotFound(from.to_string())),
        };
        if self.entries.contains_key(to) {
            return Err(Error::FileExists(to.to_string()));
        }
        self.require_folder(parent_path(to))?;

        if let Some(dir) = &self.dir {
            fs::rename(dir.join(from), dir.join(to))?;
        }

        self.entries.remove(from);
        self.detach(parent_path(from), from);
        self.insert_file(File::new(to, file.created, file.modified))?;
        if let Some(content) = self.contents.remove(from) {
            self.contents.insert(to.to_string(), content);
        }
        info!("moved {} to {}", from, to);
        Ok(())
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        match self.entries.get(path) {
            Some(Entry::File(_)) => {}
            Some(Entry::Folder(_)) => return Err(Error::NotAFile(path.to_string())),
            None => return Err(Error::NotFound(path.to_string())),
        }

        if let Some(dir) = &self.dir {
            fs::remove_file(dir.join(path))?;
        }

        self.entries.remove(path);
        self.detach(parent_path(path), path);
        self.contents.remove(path);
        info!("deleted {}", path);
        Ok(())
    }
}
