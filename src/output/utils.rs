//! Shared helpers for the console and markdown formatters

use crate::overview::RenderNode;

/// Connector drawn before an entry.
pub fn connector(is_last: bool) -> &'static str {
    if is_last { "└── " } else { "├── " }
}

/// Prefix for the children of an entry drawn with `prefix`.
pub fn continuation_prefix(prefix: &str, is_last: bool) -> String {
    if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    }
}

/// Folder and file counts of a rendered list, nested entries included.
pub fn count_nodes(items: &[RenderNode]) -> (usize, usize) {
    items.iter().fold((0, 0), |(folders, files), node| match node {
        RenderNode::Folder { children, .. } => {
            let (f, n) = count_nodes(children);
            (folders + f + 1, files + n)
        }
        RenderNode::File { .. } => (folders, files + 1),
    })
}

/// `[[target|label]]`, or `[[target]]` when the label adds nothing.
pub fn wiki_link(target: &str, label: &str) -> String {
    if target == label {
        format!("[[{}]]", target)
    } else {
        format!("[[{}|{}]]", target, label)
    }
}
