//! Export formats and dispatch.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use whiteboard_core::Snapshot;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// A supported output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Svg,
    /// Plain-text numbered list of items.
    Outline,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Svg,
        ExportFormat::Outline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Svg => "svg",
            ExportFormat::Outline => "outline",
        }
    }

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Svg => "svg",
            ExportFormat::Outline => "txt",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Outline => "text/plain",
        }
    }

    /// Suggested download name, e.g. `whiteboard-2024-05-01.csv`.
    pub fn file_name(self, date: &str) -> String {
        format!("whiteboard-{}.{}", date, self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "txt" | "text" => Ok(ExportFormat::Outline),
            _ => ExportFormat::ALL
                .into_iter()
                .find(|format| format.name() == lower)
                .ok_or_else(|| ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Encode `snapshot` in `format`.
///
/// `exported_at` is the timestamp recorded by the JSON format; the other
/// formats ignore it.
pub fn export(format: ExportFormat, snapshot: &Snapshot, exported_at: &str) -> ExportResult<String> {
    log::debug!("Exporting {} items as {}", snapshot.items.len(), format);
    match format {
        ExportFormat::Json => crate::json::to_json(snapshot, exported_at),
        ExportFormat::Csv => Ok(crate::csv::to_csv(snapshot)),
        ExportFormat::Svg => Ok(crate::svg::to_svg(snapshot)),
        ExportFormat::Outline => Ok(crate::outline::to_outline(snapshot)),
    }
}
