//! Whiteboard Export Library
//!
//! Encoders that turn a read-only [`Snapshot`] of the document into
//! downloadable files. Nothing here mutates the document.

mod csv;
mod format;
mod json;
mod outline;
mod svg;

pub use csv::to_csv;
pub use format::{ExportError, ExportFormat, ExportResult, export};
pub use json::{EXPORT_VERSION, to_json};
pub use outline::to_outline;
pub use svg::{SVG_HEIGHT, SVG_WIDTH, to_svg};

pub use whiteboard_core::Snapshot;
