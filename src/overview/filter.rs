//! Admission of entries into an overview

use std::collections::HashSet;

use crate::exclusion::ExclusionRegistry;
use crate::vault::path::{is_root, parent_path, segment_count};
use crate::vault::{Entry, FileStore};

/// Paths already claimed as folder-note links during one render pass.
/// A claimed path is never listed again as a plain file in the same pass.
#[derive(Debug, Default)]
pub struct PathBlacklist(HashSet<String>);

impl PathBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>) {
        self.0.insert(path.into());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

/// Decides which descendants of the source folder an overview may show.
#[derive(Debug, Clone, Copy)]
pub struct TraversalFilter<'a> {
    source_folder: &'a str,
    source_note: Option<&'a str>,
    depth: usize,
    exclusions: &'a ExclusionRegistry,
}

impl<'a> TraversalFilter<'a> {
    pub fn new(source_folder: &'a str, depth: usize, exclusions: &'a ExclusionRegistry) -> Self {
        Self {
            source_folder,
            source_note: None,
            depth,
            exclusions,
        }
    }

    /// Never admit the note hosting the overview.
    pub fn with_source_note(mut self, note: &'a str) -> Self {
        self.source_note = Some(note);
        self
    }

    /// Levels between the source folder and `path`, minus one: direct
    /// children of a non-root source are at 0.
    pub fn relative_depth(&self, path: &str) -> isize {
        segment_count(path) as isize - segment_count(self.source_folder) as isize - 1
    }

    /// Bound on `relative_depth`. The root path contributes no real segment,
    /// so the bound drops by one when the source is the vault root.
    pub fn bound(&self) -> isize {
        if is_root(self.source_folder) {
            self.depth as isize - 1
        } else {
            self.depth as isize
        }
    }

    pub fn admits(&self, entry: &Entry, blacklist: &PathBlacklist) -> bool {
        let path = entry.path();
        if blacklist.contains(path) {
            return false;
        }
        if !parent_path(path).starts_with(self.source_folder) {
            return false;
        }
        if self.exclusions.excludes_from_overview(path) {
            return false;
        }
        if self.source_note == Some(path) {
            return false;
        }
        self.relative_depth(path) < self.bound()
    }

    pub fn filter<'e>(&self, entries: Vec<&'e Entry>, blacklist: &PathBlacklist) -> Vec<&'e Entry> {
        entries
            .into_iter()
            .filter(|entry| self.admits(entry, blacklist))
            .collect()
    }

    /// Depth-first flatten used when folders are not shown: folders within
    /// the bound are expanded in place and only files come out.
    pub fn flatten<'e, S: FileStore + ?Sized>(
        &self,
        store: &'e S,
        entries: Vec<&'e Entry>,
    ) -> Vec<&'e Entry> {
        let mut files = Vec::new();
        self.flatten_into(store, entries, &mut files);
        files
    }

    fn flatten_into<'e, S: FileStore + ?Sized>(
        &self,
        store: &'e S,
        entries: Vec<&'e Entry>,
        files: &mut Vec<&'e Entry>,
    ) {
        for entry in entries {
            match entry {
                Entry::Folder(folder) => {
                    if self.exclusions.excludes_from_overview(&folder.path) {
                        continue;
                    }
                    if self.relative_depth(&folder.path) < self.bound() - 1 {
                        self.flatten_into(store, store.children(folder), files);
                    }
                }
                Entry::File(_) => {
                    if self.source_note != Some(entry.path()) {
                        files.push(entry);
                    }
                }
            }
        }
    }
}
