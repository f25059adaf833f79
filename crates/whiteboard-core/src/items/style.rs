//! Item styling and the typed property keys accepted by the store.

use super::{Color, Item};
use crate::error::{EngineError, EngineResult};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// Text decoration line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
    Overline,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Style attributes shared by every item kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemStyle {
    /// Text / stroke color.
    pub color: Color,
    /// Fill color (`transparent` = no fill).
    pub background_color: Color,
    /// Border color (None = no border).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    /// Border width in canvas units.
    pub border_width: f64,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    pub opacity: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: String,
    pub font_style: FontStyle,
    pub text_decoration: TextDecoration,
    pub text_align: TextAlign,
}

impl Default for ItemStyle {
    fn default() -> Self {
        Self {
            color: Color::black(),
            background_color: Color::white(),
            border_color: None,
            border_width: 0.0,
            opacity: 1.0,
            rotation: 0.0,
            font_size: 16.0,
            font_family: "system-ui".to_string(),
            font_weight: "normal".to_string(),
            font_style: FontStyle::default(),
            text_decoration: TextDecoration::default(),
            text_align: TextAlign::default(),
        }
    }
}

/// A single style/layout field with its new value.
///
/// Keys follow the camelCase names used on the wire (`backgroundColor`,
/// `zIndex`, ...). Position, size and content have dedicated store
/// operations and are not properties.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemProperty {
    Color(Color),
    BackgroundColor(Color),
    BorderColor(Option<Color>),
    BorderWidth(f64),
    Opacity(f64),
    Rotation(f64),
    FontSize(f64),
    FontFamily(String),
    FontWeight(String),
    FontStyle(FontStyle),
    TextDecoration(TextDecoration),
    TextAlign(TextAlign),
    ZIndex(i64),
    ImageUrl(String),
    ImageAlt(String),
    StartPoint(Point),
    EndPoint(Point),
}

impl ItemProperty {
    /// Every key accepted by [`ItemProperty::parse`].
    pub const KEYS: [&'static str; 17] = [
        "color",
        "backgroundColor",
        "borderColor",
        "borderWidth",
        "opacity",
        "rotation",
        "fontSize",
        "fontFamily",
        "fontWeight",
        "fontStyle",
        "textDecoration",
        "textAlign",
        "zIndex",
        "imageUrl",
        "imageAlt",
        "startPoint",
        "endPoint",
    ];

    /// Wire name of this property.
    pub fn key(&self) -> &'static str {
        match self {
            ItemProperty::Color(_) => "color",
            ItemProperty::BackgroundColor(_) => "backgroundColor",
            ItemProperty::BorderColor(_) => "borderColor",
            ItemProperty::BorderWidth(_) => "borderWidth",
            ItemProperty::Opacity(_) => "opacity",
            ItemProperty::Rotation(_) => "rotation",
            ItemProperty::FontSize(_) => "fontSize",
            ItemProperty::FontFamily(_) => "fontFamily",
            ItemProperty::FontWeight(_) => "fontWeight",
            ItemProperty::FontStyle(_) => "fontStyle",
            ItemProperty::TextDecoration(_) => "textDecoration",
            ItemProperty::TextAlign(_) => "textAlign",
            ItemProperty::ZIndex(_) => "zIndex",
            ItemProperty::ImageUrl(_) => "imageUrl",
            ItemProperty::ImageAlt(_) => "imageAlt",
            ItemProperty::StartPoint(_) => "startPoint",
            ItemProperty::EndPoint(_) => "endPoint",
        }
    }

    /// Build a typed property from a wire key and an untyped JSON value.
    pub fn parse(key: &str, value: Value) -> EngineResult<Self> {
        let property = match key {
            "color" => ItemProperty::Color(decode(key, value)?),
            "backgroundColor" => ItemProperty::BackgroundColor(decode(key, value)?),
            "borderColor" => ItemProperty::BorderColor(decode(key, value)?),
            "borderWidth" => ItemProperty::BorderWidth(non_negative(key, decode(key, value)?)?),
            "opacity" => ItemProperty::Opacity(decode(key, value)?),
            "rotation" => ItemProperty::Rotation(decode(key, value)?),
            "fontSize" => ItemProperty::FontSize(non_negative(key, decode(key, value)?)?),
            "fontFamily" => ItemProperty::FontFamily(decode(key, value)?),
            "fontWeight" => ItemProperty::FontWeight(decode(key, value)?),
            "fontStyle" => ItemProperty::FontStyle(decode(key, value)?),
            "textDecoration" => ItemProperty::TextDecoration(decode(key, value)?),
            "textAlign" => ItemProperty::TextAlign(decode(key, value)?),
            "zIndex" => ItemProperty::ZIndex(decode(key, value)?),
            "imageUrl" => ItemProperty::ImageUrl(decode(key, value)?),
            "imageAlt" => ItemProperty::ImageAlt(decode(key, value)?),
            "startPoint" => ItemProperty::StartPoint(decode(key, value)?),
            "endPoint" => ItemProperty::EndPoint(decode(key, value)?),
            _ => return Err(EngineError::UnknownProperty(key.to_string())),
        };
        Ok(property)
    }

    /// Write this property into an item.
    pub fn apply(self, item: &mut Item) {
        let style = &mut item.style;
        match self {
            ItemProperty::Color(c) => style.color = c,
            ItemProperty::BackgroundColor(c) => style.background_color = c,
            ItemProperty::BorderColor(c) => style.border_color = c,
            ItemProperty::BorderWidth(w) => style.border_width = w,
            ItemProperty::Opacity(o) => style.opacity = o.clamp(0.0, 1.0),
            ItemProperty::Rotation(r) => style.rotation = r,
            ItemProperty::FontSize(s) => style.font_size = s,
            ItemProperty::FontFamily(f) => style.font_family = f,
            ItemProperty::FontWeight(w) => style.font_weight = w,
            ItemProperty::FontStyle(s) => style.font_style = s,
            ItemProperty::TextDecoration(d) => style.text_decoration = d,
            ItemProperty::TextAlign(a) => style.text_align = a,
            ItemProperty::ZIndex(z) => item.z_index = z,
            ItemProperty::ImageUrl(url) => item.image_url = Some(url),
            ItemProperty::ImageAlt(alt) => item.image_alt = Some(alt),
            ItemProperty::StartPoint(p) => item.start_point = Some(p),
            ItemProperty::EndPoint(p) => item.end_point = Some(p),
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(key: &str, value: Value) -> EngineResult<T> {
    serde_json::from_value(value).map_err(|e| EngineError::InvalidPropertyValue {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn non_negative(key: &str, value: f64) -> EngineResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EngineError::InvalidPropertyValue {
            key: key.to_string(),
            reason: format!("expected a non-negative number, got {value}"),
        })
    }
}
