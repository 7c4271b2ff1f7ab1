//! Overview formatting and display
//!
//! This module provides formatters for rendered overviews:
//! - Console output with colors
//! - JSON output
//! - Markdown output
//!
//! # Module Structure
//!
//! - `config` - Output configuration types
//! - `utils` - Shared helpers (prefixes, counts, wiki links)
//! - `tree` - Console tree formatter
//! - `markdown` - Markdown output formatter
//! - `json` - JSON output

mod config;
mod json;
mod markdown;
mod tree;
mod utils;

pub use config::OutputConfig;
pub use json::print_json;
pub use markdown::{MarkdownFormatter, print_markdown};
pub use tree::TreeFormatter;
pub use utils::{count_nodes, wiki_link};
