//! Folder overview rendering
//!
//! This module turns a `folder-overview` block into a render tree describing
//! the contents of the folder hosting the block.
//!
//! # Module Structure
//!
//! - `config` - Block configuration and parsing
//! - `kind` - File categories and the type filter
//! - `filter` - Traversal filter and per-pass path blacklist
//! - `sort` - Entry ordering
//! - `render` - Render tree and grid card construction
//! - `prune` - Empty branch removal

mod config;
mod filter;
mod kind;
mod prune;
mod render;
mod sort;

pub use config::{BLOCK_LANGUAGE, OverviewConfig, SortBy, Style, TITLE_PLACEHOLDER, extract_blocks};
pub use filter::{PathBlacklist, TraversalFilter};
pub use kind::{FileKind, accepts};
pub use prune::{prune_empty_folders, should_prune};
pub use render::{DESCRIPTION_LIMIT, GridCard, Overview, OverviewBody, OverviewRenderer, RenderNode};
pub use sort::{compare, sort_entries};
