//! Engine configuration.

use crate::error::EngineResult;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Smallest width/height an item can be resized to.
pub const MIN_ITEM_SIZE: f64 = 20.0;

/// Window within which a second press on the same item counts as a double-click.
pub const DOUBLE_CLICK_MS: u64 = 300;

/// Tunables for the document engine.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Minimum width/height enforced by size updates.
    pub min_item_size: f64,
    /// Double-click detection window in milliseconds.
    pub double_click_ms: u64,
    /// Maximum number of history snapshots (None = unbounded).
    pub max_history: Option<usize>,
    /// Where imported images are placed.
    pub image_position: Point,
    /// Display size of imported images.
    pub image_size: Size,
    /// Where Ctrl+V pastes the clipboard item.
    pub paste_position: Point,
    /// Position of the first item of a JSON import without explicit position.
    pub import_origin: Point,
    /// Diagonal offset between successive items of an array import.
    pub import_step: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_item_size: MIN_ITEM_SIZE,
            double_click_ms: DOUBLE_CLICK_MS,
            max_history: None,
            image_position: Point::new(100.0, 100.0),
            image_size: Size::new(200.0, 150.0),
            paste_position: Point::new(525.0, 350.0),
            import_origin: Point::new(100.0, 100.0),
            import_step: 50.0,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Clamp a size so that neither dimension drops below the minimum.
    pub fn clamp_size(&self, size: Size) -> Size {
        Size::new(
            size.width.max(self.min_item_size),
            size.height.max(self.min_item_size),
        )
    }
}
