//! Removal of empty folder branches from a rendered list

use super::config::{OverviewConfig, Style};
use super::render::RenderNode;

/// Whether empty folders are pruned for this configuration. A folders-only
/// selection keeps empty folders, as does `showEmptyFolders` unless
/// first-level subfolders are pinned.
pub fn should_prune(config: &OverviewConfig) -> bool {
    config.include_types.len() > 1
        && config.style != Style::Grid
        && (!config.show_empty_folders || config.only_include_subfolders)
}

/// Post-order removal of folder nodes with no rendered children. Children are
/// pruned first, so a chain of empty folders disappears in one pass. With
/// `keep_first_level`, top-level folders stay regardless.
pub fn prune_empty_folders(items: &mut Vec<RenderNode>, keep_first_level: bool) {
    prune_level(items, 1, keep_first_level);
}

fn prune_level(items: &mut Vec<RenderNode>, level: usize, keep_first_level: bool) {
    for item in items.iter_mut() {
        if let RenderNode::Folder { children, .. } = item {
            prune_level(children, level + 1, keep_first_level);
        }
    }

    if keep_first_level && level == 1 {
        return;
    }
    items.retain(|item| !matches!(item, RenderNode::Folder { children, .. } if children.is_empty()));
}
