//! Item definitions for the whiteboard.

mod color;
mod style;

pub use color::Color;
pub use style::{FontStyle, ItemProperty, ItemStyle, TextAlign, TextDecoration};

use crate::error::EngineError;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Placeholder caption given to freshly created text items.
pub const TEXT_PLACEHOLDER: &str = "Double-click to edit";

/// Unique, opaque identifier for items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generate a fresh identifier (`item-` followed by a v4 UUID).
    pub fn generate() -> Self {
        Self(format!("item-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of placeable item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    PostIt,
    Rectangle,
    Text,
    Circle,
    Triangle,
    Arrow,
    Line,
    Image,
}

impl ItemKind {
    pub const ALL: [ItemKind; 8] = [
        ItemKind::PostIt,
        ItemKind::Rectangle,
        ItemKind::Text,
        ItemKind::Circle,
        ItemKind::Triangle,
        ItemKind::Arrow,
        ItemKind::Line,
        ItemKind::Image,
    ];

    /// Wire tag of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::PostIt => "post-it",
            ItemKind::Rectangle => "rectangle",
            ItemKind::Text => "text",
            ItemKind::Circle => "circle",
            ItemKind::Triangle => "triangle",
            ItemKind::Arrow => "arrow",
            ItemKind::Line => "line",
            ItemKind::Image => "image",
        }
    }

    /// Size used when the caller does not give one.
    pub fn default_size(&self) -> Size {
        match self {
            ItemKind::Text => Size::new(200.0, 50.0),
            ItemKind::Arrow | ItemKind::Line => Size::new(100.0, 20.0),
            ItemKind::Image => Size::new(200.0, 150.0),
            _ => Size::new(150.0, 100.0),
        }
    }

    /// Fill color used when the caller does not give one.
    pub fn default_background(&self) -> Color {
        match self {
            ItemKind::PostIt => Color::rgb(0xfe, 0xf3, 0xc7),
            ItemKind::Rectangle => Color::rgb(0xdb, 0xea, 0xfe),
            ItemKind::Circle => Color::rgb(0xfc, 0xe7, 0xf3),
            ItemKind::Triangle => Color::rgb(0xdc, 0xfc, 0xe7),
            ItemKind::Arrow | ItemKind::Line => Color::transparent(),
            _ => Color::white(),
        }
    }

    /// Complete default style for this kind.
    ///
    /// Connectors are drawn as a black stroke with no fill.
    pub fn default_style(&self) -> ItemStyle {
        if self.is_connector() {
            ItemStyle {
                background_color: self.default_background(),
                border_color: Some(Color::black()),
                border_width: 2.0,
                ..ItemStyle::default()
            }
        } else {
            ItemStyle {
                background_color: self.default_background(),
                ..ItemStyle::default()
            }
        }
    }

    pub fn default_content(&self) -> Option<String> {
        match self {
            ItemKind::Text => Some(TEXT_PLACEHOLDER.to_string()),
            _ => None,
        }
    }

    /// Text boxes are sized by their content and never resized by hand.
    pub fn is_resizable(&self) -> bool {
        !matches!(self, ItemKind::Text)
    }

    pub fn is_connector(&self) -> bool {
        matches!(self, ItemKind::Arrow | ItemKind::Line)
    }

    /// Kinds whose primary payload is text.
    pub fn is_text_like(&self) -> bool {
        matches!(self, ItemKind::Text | ItemKind::PostIt)
    }
}

impl FromStr for ItemKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EngineError::UnknownItemKind(s.to_string()))
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placeable object on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub(crate) id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Top-left corner in canvas coordinates.
    pub position: Point,
    pub size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub style: ItemStyle,
    /// Stacking order; higher values paint above lower ones.
    pub z_index: i64,
    #[serde(default)]
    pub selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_point: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_point: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
}

impl Item {
    /// Create a new, selected item with a fresh id and the kind's defaults.
    pub fn new(kind: ItemKind, position: Point, size: Option<Size>, z_index: i64) -> Self {
        Self {
            id: ItemId::generate(),
            kind,
            position,
            size: size.unwrap_or_else(|| kind.default_size()),
            content: kind.default_content(),
            style: kind.default_style(),
            z_index,
            selected: true,
            start_point: None,
            end_point: None,
            image_url: None,
            image_alt: None,
        }
    }

    /// Create an image item embedding `url` (usually a data URL).
    pub fn image(position: Point, size: Size, url: String, alt: String, z_index: i64) -> Self {
        let mut item = Self::new(ItemKind::Image, position, Some(size), z_index);
        item.image_url = Some(url);
        item.image_alt = Some(alt);
        item
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Axis-aligned bounds in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// True when the item carries a non-empty text payload.
    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Clone this item at `position` under a new id, selected.
    pub fn duplicate_at(&self, position: Point) -> Self {
        Self {
            id: ItemId::generate(),
            position,
            selected: true,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_sizes() {
        assert_eq!(ItemKind::Text.default_size(), Size::new(200.0, 50.0));
        assert_eq!(ItemKind::Arrow.default_size(), Size::new(100.0, 20.0));
        assert_eq!(ItemKind::Line.default_size(), Size::new(100.0, 20.0));
        assert_eq!(ItemKind::Image.default_size(), Size::new(200.0, 150.0));
        assert_eq!(ItemKind::PostIt.default_size(), Size::new(150.0, 100.0));
        assert_eq!(ItemKind::Triangle.default_size(), Size::new(150.0, 100.0));
    }

    #[test]
    fn test_default_colors() {
        assert_eq!(ItemKind::PostIt.default_background().to_hex(), "#fef3c7");
        assert_eq!(ItemKind::Rectangle.default_background().to_hex(), "#dbeafe");
        assert_eq!(ItemKind::Circle.default_background().to_hex(), "#fce7f3");
        assert_eq!(ItemKind::Triangle.default_background().to_hex(), "#dcfce7");
        assert_eq!(ItemKind::Line.default_background().to_hex(), "transparent");
    }

    #[test]
    fn test_connectors_have_stroke_and_no_fill() {
        for kind in [ItemKind::Arrow, ItemKind::Line] {
            let style = kind.default_style();
            assert!(style.background_color.is_transparent());
            assert_eq!(style.border_color, Some(Color::black()));
        }
    }

    #[test]
    fn test_new_item_defaults() {
        let item = Item::new(ItemKind::Text, Point::new(10.0, 20.0), None, 3);
        assert!(item.selected);
        assert_eq!(item.z_index, 3);
        assert_eq!(item.size, Size::new(200.0, 50.0));
        assert_eq!(item.content.as_deref(), Some(TEXT_PLACEHOLDER));
        assert!(item.id().as_str().starts_with("item-"));
    }

    #[test]
    fn test_explicit_size_wins() {
        let item = Item::new(ItemKind::Circle, Point::ZERO, Some(Size::new(40.0, 40.0)), 1);
        assert_eq!(item.size, Size::new(40.0, 40.0));
    }

    #[test]
    fn test_ids_are_unique_under_rapid_creation() {
        let ids: HashSet<ItemId> = (0..500).map(|_| ItemId::generate()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in ItemKind::ALL {
            assert_eq!(kind.as_str().parse::<ItemKind>().unwrap(), kind);
        }
        assert!("hexagon".parse::<ItemKind>().is_err());
    }

    #[test]
    fn test_duplicate_gets_fresh_id() {
        let item = Item::new(ItemKind::PostIt, Point::ZERO, None, 1);
        let copy = item.duplicate_at(Point::new(5.0, 5.0));
        assert_ne!(copy.id(), item.id());
        assert_eq!(copy.position, Point::new(5.0, 5.0));
        assert_eq!(copy.style, item.style);
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let item = Item::new(ItemKind::PostIt, Point::new(1.0, 2.0), None, 1);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "post-it");
        assert_eq!(value["backgroundColor"], "#fef3c7");
        assert_eq!(value["zIndex"], 1);
        assert_eq!(value["position"]["x"], 1.0);
        assert_eq!(value["size"]["width"], 150.0);

        let back: Item = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }
}
