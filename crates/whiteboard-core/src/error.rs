//! Error types for the engine.

use thiserror::Error;

/// Errors raised before an operation reaches the store.
///
/// Operations that reference a missing item are not errors; the store
/// ignores them.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown item property: {0}")]
    UnknownProperty(String),
    #[error("Invalid value for property {key}: {reason}")]
    InvalidPropertyValue { key: String, reason: String },
    #[error("Unknown item type: {0}")]
    UnknownItemKind(String),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors from bulk JSON import and image import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The batch is not valid JSON; nothing was imported.
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Reading the image resource failed; no item was created.
    #[error("Image read failed: {0}")]
    Image(String),
    #[error("Image {0} is empty")]
    EmptyImage(String),
}
