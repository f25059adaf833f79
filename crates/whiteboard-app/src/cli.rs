//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use whiteboard_export::ExportFormat;

#[derive(Parser, Debug)]
#[command(name = "whiteboard", about = "Build, replay and export whiteboard documents")]
pub struct Cli {
    /// Engine configuration file (JSON, every field optional).
    #[arg(long, env = "WHITEBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import items from JSON and write them in an export format.
    Export(ExportArgs),
    /// Apply collaboration messages (one JSON object per line) to a
    /// document, then export the result.
    Replay(ReplayArgs),
    /// List keyboard shortcuts.
    Shortcuts,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// json, csv, svg or outline.
    #[arg(long, short, default_value = "json")]
    pub format: ExportFormat,

    /// Write here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// One item, an array of items, or a previous JSON export.
    pub input: PathBuf,

    /// Image files to place on the board.
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Starting document; an empty board when omitted.
    #[arg(long)]
    pub document: Option<PathBuf>,

    /// Collaboration message log.
    pub messages: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}
