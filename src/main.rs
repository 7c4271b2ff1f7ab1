//! CLI entry point for folder-notes

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use folder_notes::overview::extract_blocks;
use folder_notes::{
    Error, FileStore, FolderNoteCommands, FolderNoteResolver, MarkdownFormatter, OutputConfig,
    OverviewRenderer, Result, Settings, TreeFormatter, Vault, print_json, print_markdown,
};
use log::debug;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "folder-notes")]
#[command(about = "Folder notes and folder overviews for markdown vaults")]
#[command(version)]
struct Args {
    /// Vault directory
    #[arg(long, default_value = ".")]
    vault: PathBuf,

    /// Settings file (default: <vault>/.obsidian/plugins/folder-notes/data.json)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the folder overviews embedded in a note
    Render {
        /// Vault path of the note hosting the overview
        note: String,

        /// Render this block instead of the note's own blocks
        #[arg(long, value_name = "YAML")]
        block: Option<String>,

        /// Output in JSON format
        #[arg(long, conflicts_with = "markdown")]
        json: bool,

        /// Output in Markdown format
        #[arg(long, short = 'm', conflicts_with = "json")]
        markdown: bool,

        /// Show vault paths beside entry names
        #[arg(long)]
        paths: bool,
    },
    /// Print the path of a folder's note
    Resolve { folder: String },
    /// Hide a folder from overviews
    Exclude { folder: String },
    /// Stop hiding a folder from overviews
    Include { folder: String },
    /// Hide a folder if it is shown, show it if it is hidden
    Toggle { folder: String },
    /// Create a folder and its note from text selected in a note
    New { note: String, name: String },
    /// Create the folder note of an existing folder
    Create { folder: String },
    /// Turn a file into the folder note of a new folder named after it
    Convert { file: String },
    /// Make a file the folder note of its folder, moving any previous note aside
    Turn { file: String },
    /// Delete a folder's note
    Delete { folder: String },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("folder-notes: {}", e);
            process::exit(1);
        }
    }
}

/// Run one command. `Ok(false)` means the command found nothing to report.
fn run(args: Args) -> Result<bool> {
    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(|| Settings::default_path(&args.vault));
    let mut settings = Settings::load(&settings_path)?;
    let mut vault = Vault::open(&args.vault)?;
    debug!("opened vault {} ({} entries)", args.vault.display(), vault.len());

    match args.command {
        Command::Render {
            note,
            block,
            json,
            markdown,
            paths,
        } => {
            let config = OutputConfig {
                use_color: should_use_color(args.color),
                show_paths: paths,
            };
            render(&vault, &settings, &note, block, json, markdown, config)?;
        }
        Command::Resolve { folder } => {
            let resolver = FolderNoteResolver::new(&vault, &settings);
            match resolver.resolve(&folder) {
                Some(note) => println!("{}", note.path),
                None => {
                    eprintln!("folder-notes: no folder note for {}", folder);
                    return Ok(false);
                }
            }
        }
        Command::Exclude { folder } => {
            require_folder(&vault, &folder)?;
            settings.exclude_folders.exclude(&folder);
            settings.save(&settings_path)?;
        }
        Command::Include { folder } => {
            if !settings.exclude_folders.include(&folder) {
                eprintln!("folder-notes: {} was not excluded", folder);
                return Ok(false);
            }
            settings.save(&settings_path)?;
        }
        Command::Toggle { folder } => {
            require_folder(&vault, &folder)?;
            if settings.exclude_folders.toggle(&folder) {
                println!("excluded {}", folder);
            } else {
                println!("included {}", folder);
            }
            settings.save(&settings_path)?;
        }
        Command::New { note, name } => {
            let link = FolderNoteCommands::new(&mut vault, &settings).create_from_selection(&note, &name)?;
            println!("{}", link);
        }
        Command::Create { folder } => {
            let path = FolderNoteCommands::new(&mut vault, &settings).create_folder_note(&folder)?;
            println!("{}", path);
        }
        Command::Convert { file } => {
            let path = FolderNoteCommands::new(&mut vault, &settings).create_for_file(&file)?;
            println!("{}", path);
        }
        Command::Turn { file } => {
            let turned = FolderNoteCommands::new(&mut vault, &settings).turn_into_folder_note(&file)?;
            if let Some(displaced) = &turned.displaced {
                eprintln!("folder-notes: moved previous folder note to {}", displaced);
            }
            println!("{}", turned.note);
        }
        Command::Delete { folder } => {
            let path = FolderNoteCommands::new(&mut vault, &settings).delete_folder_note(&folder)?;
            println!("{}", path);
        }
    }
    Ok(true)
}

fn render(
    vault: &Vault,
    settings: &Settings,
    note: &str,
    block: Option<String>,
    json: bool,
    markdown: bool,
    config: OutputConfig,
) -> Result<()> {
    let file = vault
        .file(note)
        .ok_or_else(|| Error::NotFound(note.to_string()))?;
    let blocks = match block {
        Some(block) => vec![block],
        None => {
            let blocks = extract_blocks(&vault.read(file)?);
            if blocks.is_empty() {
                debug!("{} has no overview blocks, rendering defaults", note);
                vec![String::new()]
            } else {
                blocks
            }
        }
    };

    let renderer = OverviewRenderer::new(vault, settings);
    let overviews: Vec<_> = blocks
        .iter()
        .filter_map(|block| renderer.render(&file.path, block))
        .collect();

    if json {
        print_json(&overviews)?;
    } else if markdown {
        let mut formatter = MarkdownFormatter::new(config);
        for overview in &overviews {
            formatter.push_overview(overview);
        }
        print_markdown(&formatter)?;
    } else {
        let formatter = TreeFormatter::new(config);
        for (i, overview) in overviews.iter().enumerate() {
            if i > 0 {
                println!();
            }
            formatter.print(overview)?;
        }
    }
    Ok(())
}

fn require_folder(vault: &Vault, path: &str) -> Result<()> {
    match vault.entry(path) {
        Some(entry) if entry.is_folder() => Ok(()),
        Some(_) => Err(Error::NotAFolder(path.to_string())),
        None => Err(Error::NotFound(path.to_string())),
    }
}
