//! Console tree formatter
//!
//! This module provides `TreeFormatter` which draws a rendered `Overview`
//! with box-drawing connectors, either into a string or to stdout in color.

use std::io::{self, Write};

use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::overview::{GridCard, Overview, OverviewBody, RenderNode};

use super::config::OutputConfig;
use super::utils::{connector, continuation_prefix, count_nodes};

/// Formatter for console output.
pub struct TreeFormatter {
    config: OutputConfig,
}

impl TreeFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Plain text rendering, without color codes.
    pub fn format(&self, overview: &Overview) -> String {
        let mut buffer = Buffer::no_color();
        self.write_overview(&mut buffer, overview)
            .expect("writing to an in-memory buffer cannot fail");
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }

    pub fn print(&self, overview: &Overview) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_overview(&mut stdout, overview)
    }

    fn write_overview<W: WriteColor>(&self, out: &mut W, overview: &Overview) -> io::Result<()> {
        let heading = overview
            .title
            .as_deref()
            .unwrap_or(overview.source_folder.as_str());
        out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        writeln!(out, "{}", heading)?;
        out.reset()?;

        match &overview.body {
            OverviewBody::List { items } => {
                self.write_items(out, items, "")?;
                let (folders, files) = count_nodes(items);
                writeln!(out)?;
                writeln!(out, "{} folders, {} files", folders, files)?;
            }
            OverviewBody::Grid { cards } => self.write_cards(out, cards)?,
            OverviewBody::EditPrompt { block } => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
                writeln!(out, "No files to show. Edit the overview block:")?;
                out.reset()?;
                writeln!(out, "```{}", crate::overview::BLOCK_LANGUAGE)?;
                write!(out, "{}", block)?;
                writeln!(out, "```")?;
            }
            OverviewBody::Empty => {}
        }
        Ok(())
    }

    fn write_items<W: WriteColor>(
        &self,
        out: &mut W,
        items: &[RenderNode],
        prefix: &str,
    ) -> io::Result<()> {
        for (i, node) in items.iter().enumerate() {
            let is_last = i == items.len() - 1;
            write!(out, "{}{}", prefix, connector(is_last))?;
            match node {
                RenderNode::Folder {
                    name,
                    path,
                    link,
                    children,
                } => {
                    out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
                    write!(out, "{}/", name)?;
                    out.reset()?;
                    if let Some(link) = link {
                        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
                        write!(out, "  -> {}", link)?;
                        out.reset()?;
                    } else if self.config.show_paths {
                        write!(out, "  {}", path)?;
                    }
                    writeln!(out)?;
                    self.write_items(out, children, &continuation_prefix(prefix, is_last))?;
                }
                RenderNode::File { name, link, tag } => {
                    write!(out, "{}", name)?;
                    if let Some(tag) = tag {
                        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
                        write!(out, " [{}]", tag)?;
                        out.reset()?;
                    }
                    if self.config.show_paths {
                        write!(out, "  {}", link)?;
                    }
                    writeln!(out)?;
                }
            }
        }
        Ok(())
    }

    fn write_cards<W: WriteColor>(&self, out: &mut W, cards: &[GridCard]) -> io::Result<()> {
        for (i, card) in cards.iter().enumerate() {
            write!(out, "{}", connector(i == cards.len() - 1))?;
            match card {
                GridCard::Folder { name, path } => {
                    out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
                    write!(out, "{}/", name)?;
                    out.reset()?;
                    if self.config.show_paths {
                        write!(out, "  {}", path)?;
                    }
                }
                GridCard::File {
                    title,
                    link,
                    description,
                } => {
                    write!(out, "{}", title)?;
                    if self.config.show_paths {
                        write!(out, "  {}", link)?;
                    }
                    if let Some(description) = description.as_deref().filter(|d| !d.is_empty()) {
                        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                        write!(out, "  {}", description)?;
                        out.reset()?;
                    }
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
