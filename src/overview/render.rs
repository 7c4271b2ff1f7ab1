//! Render tree construction
//!
//! One render pass turns the source folder's subtree into an `Overview`:
//! filter, flatten when folders are hidden, sort, build nodes, prune. The
//! pass owns its path blacklist, so independent passes never share state.

use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::folder_note::FolderNoteResolver;
use crate::settings::Settings;
use crate::string_utils::{first_line, truncate_chars};
use crate::vault::path::parent_path;
use crate::vault::{Entry, File, FileStore, Folder};

use super::config::{OverviewConfig, Style};
use super::filter::{PathBlacklist, TraversalFilter};
use super::kind::{FileKind, accepts};
use super::prune::{prune_empty_folders, should_prune};
use super::sort::sort_entries;

/// Maximum characters of a grid card description.
pub const DESCRIPTION_LIMIT: usize = 64;

/// A node of the rendered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderNode {
    Folder {
        name: String,
        path: String,
        /// Path of the folder's note, when it has one
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
        children: Vec<RenderNode>,
    },
    File {
        /// File name without extension
        name: String,
        link: String,
        /// Extension shown beside non-markdown files
        #[serde(skip_serializing_if = "Option::is_none")]
        tag: Option<String>,
    },
}

impl RenderNode {
    pub fn name(&self) -> &str {
        match self {
            RenderNode::Folder { name, .. } => name,
            RenderNode::File { name, .. } => name,
        }
    }

    /// Vault path the node stands for.
    pub fn path(&self) -> &str {
        match self {
            RenderNode::Folder { path, .. } => path,
            RenderNode::File { link, .. } => link,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, RenderNode::Folder { .. })
    }

    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::Folder { children, .. } => children,
            RenderNode::File { .. } => &[],
        }
    }
}

/// A card of the grid style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GridCard {
    Folder {
        name: String,
        path: String,
    },
    File {
        title: String,
        link: String,
        /// First line of the file, truncated
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OverviewBody {
    List { items: Vec<RenderNode> },
    Grid { cards: Vec<GridCard> },
    /// Nothing to show; offers the effective block for editing
    EditPrompt { block: String },
    Empty,
}

/// A rendered overview block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub source_folder: String,
    pub body: OverviewBody,
}

/// Entry point for rendering overview blocks against a file store.
pub struct OverviewRenderer<'a, S: FileStore + ?Sized> {
    store: &'a S,
    settings: &'a Settings,
}

impl<'a, S: FileStore + ?Sized> OverviewRenderer<'a, S> {
    pub fn new(store: &'a S, settings: &'a Settings) -> Self {
        Self { store, settings }
    }

    /// Render the block `block` hosted by the note at `source_note`.
    /// Returns `None` when the note or its folder cannot be found.
    pub fn render(&self, source_note: &str, block: &str) -> Option<Overview> {
        let config = OverviewConfig::parse_block(block, &self.settings.default_overview);
        self.render_with(source_note, &config)
    }

    pub fn render_with(&self, source_note: &str, config: &OverviewConfig) -> Option<Overview> {
        let Some(note) = self.store.file(source_note) else {
            debug!("overview source {} not found, skipping", source_note);
            return None;
        };
        let source_folder = self.store.folder(parent_path(&note.path))?;

        let resolver = FolderNoteResolver::new(self.store, self.settings);
        let folder_name = resolver
            .folder_for_note(note)
            .map(|folder| folder.name.as_str())
            .unwrap_or(&source_folder.name);
        let title = (!config.disable_title).then(|| config.title_for(folder_name));

        let body = if config.include_types.is_empty() {
            OverviewBody::Empty
        } else {
            let filter = TraversalFilter::new(
                &source_folder.path,
                config.depth,
                &self.settings.exclude_folders,
            )
            .with_source_note(&note.path);
            RenderPass {
                store: self.store,
                resolver,
                config,
                filter,
                blacklist: PathBlacklist::new(),
            }
            .run(source_folder)
        };

        Some(Overview {
            title,
            source_folder: source_folder.path.clone(),
            body,
        })
    }
}

struct RenderPass<'p, S: FileStore + ?Sized> {
    store: &'p S,
    resolver: FolderNoteResolver<'p, S>,
    config: &'p OverviewConfig,
    filter: TraversalFilter<'p>,
    blacklist: PathBlacklist,
}

impl<'p, S: FileStore + ?Sized> RenderPass<'p, S> {
    fn run(mut self, source_folder: &'p Folder) -> OverviewBody {
        let mut entries = self
            .filter
            .filter(self.store.children(source_folder), &self.blacklist);
        if !self.config.includes("folder") {
            entries = self.filter.flatten(self.store, entries);
        }
        if entries.is_empty() {
            return OverviewBody::EditPrompt {
                block: self.config.to_block().unwrap_or_default(),
            };
        }
        sort_entries(&mut entries, self.config.sort_by);

        match self.config.style {
            Style::List => {
                let mut items = self.list_items(entries);
                if should_prune(self.config) {
                    prune_empty_folders(&mut items, self.config.only_include_subfolders);
                }
                debug!(
                    "rendered {} top-level items for {}, {} folder notes linked",
                    items.len(),
                    source_folder.path,
                    self.blacklist.len()
                );
                OverviewBody::List { items }
            }
            Style::Grid => OverviewBody::Grid {
                cards: self.grid_cards(&entries),
            },
            Style::Explorer | Style::Unsupported => OverviewBody::Empty,
        }
    }

    fn list_items(&mut self, entries: Vec<&'p Entry>) -> Vec<RenderNode> {
        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                Entry::Folder(folder) => items.push(self.folder_node(folder)),
                Entry::File(file) => items.extend(self.file_node(file)),
            }
        }
        items
    }

    fn folder_node(&mut self, folder: &'p Folder) -> RenderNode {
        let link = self.resolver.resolve(&folder.path).map(|note| {
            self.blacklist.insert(note.path.clone());
            note.path.clone()
        });

        // The bound stays relative to the source folder at every level
        let mut children = self
            .filter
            .filter(self.store.children(folder), &self.blacklist);
        sort_entries(&mut children, self.config.sort_by);

        RenderNode::Folder {
            name: folder.name.clone(),
            path: folder.path.clone(),
            link,
            children: self.list_items(children),
        }
    }

    fn file_node(&self, file: &File) -> Option<RenderNode> {
        if !accepts(file, &self.config.include_types) || self.blacklist.contains(&file.path) {
            return None;
        }
        let tag = (!file.is_markdown() && !self.config.disable_file_tag)
            .then(|| file.extension.clone());
        Some(RenderNode::File {
            name: file.basename.clone(),
            link: file.path.clone(),
            tag,
        })
    }

    /// One card per top-level entry. File contents are read in parallel and
    /// a failed read only costs that card its description.
    fn grid_cards(&self, entries: &[&'p Entry]) -> Vec<GridCard> {
        let store = self.store;
        let include_types = &self.config.include_types;

        let cards: Vec<Option<GridCard>> = entries
            .par_iter()
            .map(|entry| match entry {
                Entry::Folder(folder) => Some(GridCard::Folder {
                    name: folder.name.clone(),
                    path: folder.path.clone(),
                }),
                Entry::File(file) => {
                    if !accepts(file, include_types) {
                        return None;
                    }
                    let description = match store.read(file) {
                        Ok(content) => Some(truncate_chars(first_line(&content), DESCRIPTION_LIMIT)),
                        Err(e) => {
                            warn!("could not read {}: {}", file.path, e);
                            None
                        }
                    };
                    Some(GridCard::File {
                        title: card_title(file),
                        link: file.path.clone(),
                        description,
                    })
                }
            })
            .collect();

        cards.into_iter().flatten().collect()
    }
}

fn card_title(file: &File) -> String {
    match FileKind::from_extension(&file.extension) {
        FileKind::Markdown | FileKind::Canvas => file.basename.clone(),
        _ => file.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::StorageLocation;
    use crate::test_utils::VaultBuilder;
    use crate::vault::Vault;

    fn render(vault: &Vault, settings: &Settings, note: &str, block: &str) -> Overview {
        OverviewRenderer::new(vault, settings)
            .render(note, block)
            .expect("source note exists")
    }

    fn items(overview: &Overview) -> &[RenderNode] {
        match &overview.body {
            OverviewBody::List { items } => items,
            other => panic!("expected list body, got {:?}", other),
        }
    }

    fn cards(overview: &Overview) -> &[GridCard] {
        match &overview.body {
            OverviewBody::Grid { cards } => cards,
            other => panic!("expected grid body, got {:?}", other),
        }
    }

    /// Every rendered path, depth first.
    fn all_paths(nodes: &[RenderNode], out: &mut Vec<String>) {
        for node in nodes {
            out.push(node.path().to_string());
            all_paths(node.children(), out);
        }
    }

    fn projects() -> Vault {
        VaultBuilder::new()
            .note("Projects/Projects.md", "```folder-overview\n```")
            .folder("Projects/Alpha")
            .note("Projects/notes.md", "")
            .build()
    }

    #[test]
    fn test_empty_subfolder_is_pruned() {
        let vault = projects();
        let overview = render(&vault, &Settings::default(), "Projects/Projects.md", "");
        assert_eq!(
            items(&overview),
            &[RenderNode::File {
                name: "notes".to_string(),
                link: "Projects/notes.md".to_string(),
                tag: None,
            }]
        );
    }

    #[test]
    fn test_pinned_subfolder_survives_pruning() {
        let vault = projects();
        let overview = render(
            &vault,
            &Settings::default(),
            "Projects/Projects.md",
            "onlyIncludeSubfolders: true",
        );
        let items = items(&overview);
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0], RenderNode::Folder { name, children, .. } if name == "Alpha" && children.is_empty()));
        assert_eq!(items[1].name(), "notes");
    }

    #[test]
    fn test_folder_links_to_folder_note_once() {
        let vault = VaultBuilder::new()
            .note("Home.md", "")
            .note("Projects/Projects.md", "")
            .note("Projects/plan.md", "")
            .build();
        let overview = render(&vault, &Settings::default(), "Home.md", "depth: 2");
        let items = items(&overview);
        assert_eq!(items.len(), 1);
        match &items[0] {
            RenderNode::Folder { name, link, children, .. } => {
                assert_eq!(name, "Projects");
                assert_eq!(link.as_deref(), Some("Projects/Projects.md"));
                let names: Vec<_> = children.iter().map(|c| c.name()).collect();
                assert_eq!(names, vec!["plan"]);
            }
            other => panic!("expected folder, got {:?}", other),
        }
    }

    #[test]
    fn test_sibling_folder_note_not_listed_in_parent_mode() {
        let vault = VaultBuilder::new()
            .note("Area/Area index.md", "")
            .note("Area/Projects.md", "")
            .note("Area/Projects/plan.md", "")
            .note("Area/loose.md", "")
            .build();
        let settings = Settings {
            storage_location: StorageLocation::ParentFolder,
            ..Settings::default()
        };
        let overview = render(&vault, &settings, "Area/Area index.md", "depth: 2");
        let mut paths = Vec::new();
        all_paths(items(&overview), &mut paths);
        assert_eq!(paths, vec!["Area/Projects", "Area/Projects/plan.md", "Area/loose.md"]);
    }

    #[test]
    fn test_markdown_only_flattens() {
        let vault = VaultBuilder::new()
            .note("Notes/Notes.md", "")
            .note("Notes/a/b/deep.md", "")
            .note("Notes/a/b/c/too-deep.md", "")
            .file("Notes/a/photo.png", "", 0, 0)
            .build();
        let overview = render(
            &vault,
            &Settings::default(),
            "Notes/Notes.md",
            "includeTypes: [markdown]\ndepth: 3",
        );
        assert_eq!(
            items(&overview),
            &[RenderNode::File {
                name: "deep".to_string(),
                link: "Notes/a/b/deep.md".to_string(),
                tag: None,
            }]
        );
    }

    #[test]
    fn test_audio_requested_is_hidden() {
        let vault = VaultBuilder::new()
            .note("Music/Music.md", "")
            .file("Music/song.mp3", "", 0, 0)
            .build();
        let overview = render(&vault, &Settings::default(), "Music/Music.md", "includeTypes: [audio]");
        assert_eq!(overview.body, OverviewBody::List { items: vec![] });
    }

    #[test]
    fn test_depth_bound_holds_for_every_depth() {
        let vault = VaultBuilder::new()
            .note("Root/Root.md", "")
            .note("Root/l1.md", "")
            .note("Root/A/l2.md", "")
            .note("Root/A/B/l3.md", "")
            .note("Root/A/B/C/l4.md", "")
            .note("Root/A/B/C/D/l5.md", "")
            .build();
        for depth in 1..=5 {
            let overview = render(
                &vault,
                &Settings::default(),
                "Root/Root.md",
                &format!("depth: {}\nshowEmptyFolders: true", depth),
            );
            let mut paths = Vec::new();
            all_paths(items(&overview), &mut paths);
            for path in &paths {
                let levels = path.split('/').count() - 1;
                assert!(levels <= depth, "{} deeper than {}", path, depth);
            }
            assert!(paths.iter().any(|p| p.split('/').count() - 1 == depth));
        }
    }

    #[test]
    fn test_depth_bound_from_vault_root() {
        let vault = VaultBuilder::new()
            .note("Home.md", "")
            .note("A/a.md", "")
            .note("A/B/b.md", "")
            .note("A/B/C/c.md", "")
            .build();
        for depth in 1..=3 {
            let overview = render(
                &vault,
                &Settings::default(),
                "Home.md",
                &format!("depth: {}\nshowEmptyFolders: true", depth),
            );
            let mut paths = Vec::new();
            all_paths(items(&overview), &mut paths);
            let deepest = paths.iter().map(|p| p.split('/').count()).max().unwrap();
            assert_eq!(deepest, depth);
        }
    }

    #[test]
    fn test_file_tags() {
        let vault = VaultBuilder::new()
            .note("Docs/Docs.md", "")
            .file("Docs/spec.pdf", "", 0, 0)
            .note("Docs/readme.md", "")
            .build();
        let overview = render(
            &vault,
            &Settings::default(),
            "Docs/Docs.md",
            "includeTypes: [markdown, pdf]",
        );
        let tags: Vec<_> = items(&overview)
            .iter()
            .map(|node| match node {
                RenderNode::File { tag, .. } => tag.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(tags, vec![None, Some("pdf".to_string())]);

        let overview = render(
            &vault,
            &Settings::default(),
            "Docs/Docs.md",
            "includeTypes: [markdown, pdf]\ndisableFileTag: true",
        );
        assert!(items(&overview)
            .iter()
            .all(|node| matches!(node, RenderNode::File { tag: None, .. })));
    }

    #[test]
    fn test_sort_applies_at_every_level() {
        let vault = VaultBuilder::new()
            .note("S/S.md", "")
            .file("S/old.md", "", 1, 1)
            .file("S/new.md", "", 9, 9)
            .file("S/Sub/older.md", "", 2, 2)
            .file("S/Sub/newer.md", "", 8, 8)
            .build();
        let overview = render(&vault, &Settings::default(), "S/S.md", "depth: 2\nsortBy: created");
        let items = items(&overview);
        let top: Vec<_> = items.iter().map(|n| n.name()).collect();
        assert_eq!(top, vec!["Sub", "new", "old"]);
        let nested: Vec<_> = items[0].children().iter().map(|n| n.name()).collect();
        assert_eq!(nested, vec!["newer", "older"]);
    }

    #[test]
    fn test_title_uses_folder_name() {
        let vault = projects();
        let overview = render(&vault, &Settings::default(), "Projects/Projects.md", "");
        assert_eq!(overview.title.as_deref(), Some("Projects overview"));

        let overview = render(
            &vault,
            &Settings::default(),
            "Projects/notes.md",
            "title: 'Inside {{folderName}}'",
        );
        assert_eq!(overview.title.as_deref(), Some("Inside Projects"));

        let overview = render(&vault, &Settings::default(), "Projects/Projects.md", "disableTitle: true");
        assert_eq!(overview.title, None);
    }

    #[test]
    fn test_no_entries_offers_edit_prompt() {
        let vault = VaultBuilder::new().note("Lonely/Lonely.md", "").build();
        let overview = render(&vault, &Settings::default(), "Lonely/Lonely.md", "depth: 2");
        match overview.body {
            OverviewBody::EditPrompt { block } => assert!(block.contains("depth: 2")),
            other => panic!("expected edit prompt, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_include_types_renders_title_only() {
        let vault = projects();
        let overview = render(&vault, &Settings::default(), "Projects/Projects.md", "includeTypes: []");
        assert_eq!(overview.body, OverviewBody::Empty);
        assert!(overview.title.is_some());
    }

    #[test]
    fn test_missing_source_renders_nothing() {
        let vault = projects();
        let settings = Settings::default();
        let renderer = OverviewRenderer::new(&vault, &settings);
        assert!(renderer.render("Nowhere/ghost.md", "").is_none());
    }

    #[test]
    fn test_excluded_folder_hidden() {
        let vault = VaultBuilder::new()
            .note("P/P.md", "")
            .note("P/Archive/old.md", "")
            .note("P/Live/new.md", "")
            .build();
        let mut settings = Settings::default();
        settings.exclude_folders.exclude("P/Archive");
        let overview = render(&vault, &settings, "P/P.md", "depth: 2");
        let names: Vec<_> = items(&overview).iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["Live"]);
    }

    #[test]
    fn test_unsupported_styles_render_empty() {
        let vault = projects();
        for style in ["explorer", "testing"] {
            let overview = render(
                &vault,
                &Settings::default(),
                "Projects/Projects.md",
                &format!("style: {}", style),
            );
            assert_eq!(overview.body, OverviewBody::Empty);
        }
    }

    #[test]
    fn test_grid_cards() {
        let long_line = "x".repeat(80);
        let vault = VaultBuilder::new()
            .note("G/G.md", "")
            .note("G/Sub/inner.md", "")
            .note("G/short.md", "Short description\nsecond line")
            .note("G/long.md", &long_line)
            .note("G/board.canvas", "{}")
            .build();
        let overview = render(
            &vault,
            &Settings::default(),
            "G/G.md",
            "style: grid\nincludeTypes: [folder, markdown, canvas]\nsortBy: name",
        );
        let cards = cards(&overview);
        assert_eq!(
            cards[0],
            GridCard::Folder {
                name: "Sub".to_string(),
                path: "G/Sub".to_string(),
            }
        );
        assert_eq!(
            cards[1],
            GridCard::File {
                title: "board".to_string(),
                link: "G/board.canvas".to_string(),
                description: Some("{}".to_string()),
            }
        );
        match &cards[2] {
            GridCard::File { title, description, .. } => {
                assert_eq!(title, "long");
                let description = description.as_deref().unwrap();
                assert_eq!(description.chars().count(), DESCRIPTION_LIMIT + 3);
                assert!(description.ends_with("..."));
            }
            other => panic!("expected file card, got {:?}", other),
        }
        assert!(matches!(
            &cards[3],
            GridCard::File { description: Some(d), .. } if d == "Short description"
        ));
        assert_eq!(cards.len(), 4);
    }

    #[test]
    fn test_created_sort_keeps_folders_first() {
        let vault = VaultBuilder::new()
            .note("T/T.md", "")
            .file("T/recent.md", "", 100, 100)
            .note("T/Folder/x.md", "")
            .build();
        let overview = render(&vault, &Settings::default(), "T/T.md", "depth: 2");
        assert!(items(&overview)[0].is_folder());
        let overview = render(&vault, &Settings::default(), "T/T.md", "depth: 2\nsortBy: modifiedAsc");
        assert!(items(&overview)[0].is_folder());
    }
}
