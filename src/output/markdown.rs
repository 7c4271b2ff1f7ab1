//! Markdown output formatting
//!
//! This module provides `MarkdownFormatter` which writes a rendered overview
//! as a nested markdown list of wiki links, the way it appears inside a note.

use std::io;

use crate::overview::{BLOCK_LANGUAGE, GridCard, Overview, OverviewBody, RenderNode};

use super::config::OutputConfig;
use super::utils::wiki_link;

/// Markdown output formatter.
pub struct MarkdownFormatter {
    config: OutputConfig,
    output: String,
}

impl MarkdownFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self {
            config,
            output: String::new(),
        }
    }

    /// Append one overview to the output.
    pub fn push_overview(&mut self, overview: &Overview) {
        if let Some(title) = &overview.title {
            self.output.push_str("## ");
            self.output.push_str(title);
            self.output.push_str("\n\n");
        }

        match &overview.body {
            OverviewBody::List { items } => self.push_items(items, 0),
            OverviewBody::Grid { cards } => self.push_cards(cards),
            OverviewBody::EditPrompt { block } => {
                self.output.push_str("*No files to show.*\n\n```");
                self.output.push_str(BLOCK_LANGUAGE);
                self.output.push('\n');
                self.output.push_str(block);
                self.output.push_str("```\n");
            }
            OverviewBody::Empty => {}
        }
        self.output.push('\n');
    }

    fn push_items(&mut self, items: &[RenderNode], level: usize) {
        let indent = "    ".repeat(level);
        for node in items {
            self.output.push_str(&indent);
            self.output.push_str("- ");
            match node {
                RenderNode::Folder {
                    name,
                    path,
                    link,
                    children,
                } => {
                    match link {
                        Some(link) => self.output.push_str(&wiki_link(link, name)),
                        None => {
                            self.output.push_str("**");
                            self.output.push_str(name);
                            self.output.push_str("**");
                        }
                    }
                    if self.config.show_paths {
                        self.output.push_str(&format!(" `{}`", path));
                    }
                    self.output.push('\n');
                    self.push_items(children, level + 1);
                }
                RenderNode::File { name, link, tag } => {
                    self.output.push_str(&wiki_link(link, name));
                    if let Some(tag) = tag {
                        self.output.push_str(&format!(" `{}`", tag));
                    }
                    self.output.push('\n');
                }
            }
        }
    }

    fn push_cards(&mut self, cards: &[GridCard]) {
        for card in cards {
            self.output.push_str("- ");
            match card {
                GridCard::Folder { name, .. } => {
                    self.output.push_str("**");
                    self.output.push_str(name);
                    self.output.push_str("/**");
                }
                GridCard::File {
                    title,
                    link,
                    description,
                } => {
                    self.output.push_str(&wiki_link(link, title));
                    if let Some(description) = description.as_deref().filter(|d| !d.is_empty()) {
                        self.output.push_str(" - ");
                        self.output.push_str(description);
                    }
                }
            }
            self.output.push('\n');
        }
    }

    /// Get the formatted output string.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Take ownership of the output string.
    pub fn into_output(self) -> String {
        self.output
    }
}

/// Print markdown output to stdout.
pub fn print_markdown(formatter: &MarkdownFormatter) -> io::Result<()> {
    print!("{}", formatter.output());
    Ok(())
}
