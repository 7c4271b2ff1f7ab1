//! Overview configuration and embedded block parsing

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Language tag of fenced overview blocks inside a note.
pub const BLOCK_LANGUAGE: &str = "folder-overview";

/// Placeholder substituted with the source folder's name in the title.
pub const TITLE_PLACEHOLDER: &str = "{{folderName}}";

const DEFAULT_TITLE: &str = "{{folderName}} overview";

/// Ordering applied to the entries of each level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    Name,
    NameAsc,
    Created,
    CreatedAsc,
    Modified,
    ModifiedAsc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Style {
    #[default]
    List,
    Grid,
    /// Accepted for compatibility, renders nothing
    Explorer,
    /// Any other value, renders nothing
    Unsupported,
}

impl From<String> for Style {
    fn from(value: String) -> Self {
        match value.as_str() {
            "list" => Style::List,
            "grid" => Style::Grid,
            "explorer" => Style::Explorer,
            _ => Style::Unsupported,
        }
    }
}

/// Effective configuration of one overview block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverviewConfig {
    /// Title template, may contain `{{folderName}}`
    pub title: String,
    pub disable_title: bool,
    /// Folder levels below the source folder to include (at least 1)
    pub depth: usize,
    /// Lowercase category tags, e.g. `folder`, `markdown`, `image`, `all`
    pub include_types: Vec<String>,
    pub style: Style,
    pub disable_file_tag: bool,
    pub sort_by: SortBy,
    pub show_empty_folders: bool,
    /// Keep first-level folders even when empty
    pub only_include_subfolders: bool,
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            disable_title: false,
            depth: 1,
            include_types: vec!["folder".to_string(), "markdown".to_string()],
            style: Style::List,
            disable_file_tag: false,
            sort_by: SortBy::Name,
            show_empty_folders: false,
            only_include_subfolders: false,
        }
    }
}

/// Raw block contents. Every key is optional and falls back to the
/// plugin-wide default individually.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverviewBlock {
    title: Option<String>,
    disable_title: Option<bool>,
    depth: Option<i64>,
    include_types: Option<Vec<String>>,
    style: Option<Style>,
    disable_file_tag: Option<bool>,
    sort_by: Option<SortBy>,
    show_empty_folders: Option<bool>,
    only_include_subfolders: Option<bool>,
}

impl OverviewBlock {
    fn resolve(self, defaults: &OverviewConfig) -> OverviewConfig {
        let title = self
            .title
            .filter(|t| !t.is_empty())
            .or_else(|| Some(defaults.title.clone()).filter(|t| !t.is_empty()))
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let depth = match self.depth {
            Some(depth) => depth.max(1) as usize,
            None => defaults.depth.max(1),
        };

        OverviewConfig {
            title,
            disable_title: self.disable_title.unwrap_or(defaults.disable_title),
            depth,
            include_types: self
                .include_types
                .unwrap_or_else(|| defaults.include_types.clone()),
            style: self.style.unwrap_or(defaults.style),
            disable_file_tag: self.disable_file_tag.unwrap_or(defaults.disable_file_tag),
            sort_by: self.sort_by.unwrap_or(defaults.sort_by),
            show_empty_folders: self.show_empty_folders.unwrap_or(defaults.show_empty_folders),
            only_include_subfolders: self
                .only_include_subfolders
                .unwrap_or(defaults.only_include_subfolders),
        }
        .normalized()
    }
}

impl OverviewConfig {
    /// Parse an embedded block. Blank or malformed blocks yield `defaults`
    /// as a whole; a valid mapping merges key by key.
    pub fn parse_block(source: &str, defaults: &OverviewConfig) -> OverviewConfig {
        if source.trim().is_empty() {
            return defaults.clone().normalized();
        }
        match serde_yaml::from_str::<Option<OverviewBlock>>(source) {
            Ok(Some(block)) => block.resolve(defaults),
            Ok(None) => defaults.clone().normalized(),
            Err(e) => {
                debug!("malformed overview block, using defaults: {}", e);
                defaults.clone().normalized()
            }
        }
    }

    /// Serialize back to block text.
    pub fn to_block(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Title with the folder name substituted.
    pub fn title_for(&self, folder_name: &str) -> String {
        self.title.replace(TITLE_PLACEHOLDER, folder_name)
    }

    pub fn includes(&self, kind: &str) -> bool {
        self.include_types.iter().any(|t| t == kind)
    }

    fn normalized(mut self) -> Self {
        self.depth = self.depth.max(1);
        for kind in &mut self.include_types {
            *kind = kind.to_lowercase();
        }
        self
    }
}

/// Bodies of every fenced `folder-overview` block in a note, in order.
pub fn extract_blocks(note: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in note.lines() {
        let trimmed = line.trim();
        match current.as_mut() {
            None => {
                if let Some(lang) = trimmed.strip_prefix("```") {
                    if lang.trim() == BLOCK_LANGUAGE {
                        current = Some(Vec::new());
                    }
                }
            }
            Some(lines) => {
                if trimmed.starts_with("```") {
                    blocks.push(lines.join("\n"));
                    current = None;
                } else {
                    lines.push(line);
                }
            }
        }
    }

    blocks
}
