//! Command execution.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use whiteboard_core::{
    CollaborationManager, EngineConfig, EngineError, ImageSource, ImportError, ShortcutRegistry, Whiteboard,
};
use whiteboard_export::{ExportError, export};

use crate::cli::{Cli, Command, OutputArgs};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write output: {0}")]
    Write(#[from] io::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] EngineError),
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

fn read_to_string(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the engine configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, AppError> {
    match path {
        Some(path) => {
            let config = EngineConfig::from_json(&read_to_string(path)?)?;
            log::info!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Read an image file for [`Whiteboard::import_image`].
pub fn read_image(path: &Path) -> Result<ImageSource, ImportError> {
    let bytes = fs::read(path).map_err(|e| ImportError::Image(format!("{}: {}", path.display(), e)))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(ImageSource::new(name, bytes))
}

/// Apply a log of collaboration messages, one JSON object per line.
/// Returns the number of messages that changed something.
pub fn replay(wb: &mut Whiteboard, messages: &str) -> usize {
    let mut collab = CollaborationManager::new();
    let applied = messages
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| collab.handle_message(wb, line).is_some())
        .count();
    for entry in collab.activity() {
        log::info!("{}", entry);
    }
    applied
}

fn export_date() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn write_export(wb: &Whiteboard, args: &OutputArgs, out: &mut impl Write) -> Result<(), AppError> {
    let text = export(args.format, &wb.snapshot(), &export_date())?;
    match &args.output {
        Some(path) => {
            fs::write(path, text)?;
            log::info!("Wrote {} export to {}", args.format, path.display());
        }
        None => writeln!(out, "{text}")?,
    }
    Ok(())
}

/// Execute a parsed command line.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<(), AppError> {
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Command::Export(args) => {
            let mut wb = Whiteboard::with_config(config);
            let report = wb.import_json(&read_to_string(&args.input)?)?;
            for skipped in &report.skipped {
                log::warn!("Entry {} skipped: {}", skipped.index, skipped.reason);
            }
            for path in &args.images {
                wb.import_image(read_image(path));
            }
            write_export(&wb, &args.output, out)
        }
        Command::Replay(args) => {
            let mut wb = Whiteboard::with_config(config);
            if let Some(document) = &args.document {
                wb.import_json(&read_to_string(document)?)?;
            }
            let applied = replay(&mut wb, &read_to_string(&args.messages)?);
            log::info!("Replayed {} messages", applied);
            write_export(&wb, &args.output, out)
        }
        Command::Shortcuts => {
            writeln!(out, "=== Keyboard Shortcuts ===")?;
            writeln!(out, "{}", ShortcutRegistry::describe())?;
            Ok(())
        }
    }
}
