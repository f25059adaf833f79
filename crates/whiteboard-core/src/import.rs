//! Bulk construction from JSON and image import.

use crate::error::ImportError;
use crate::items::{Item, ItemId, ItemKind, ItemProperty};
use crate::whiteboard::Whiteboard;
use base64::{Engine, engine::general_purpose::STANDARD};
use kurbo::{Point, Size};
use serde_json::{Map, Value};
use std::fmt;

/// Keys handled directly by the importer rather than as properties.
const STRUCTURAL_KEYS: [&str; 6] = ["id", "type", "position", "size", "content", "selected"];

/// Why an import entry was not turned into an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotAnObject,
    MissingType,
    UnknownType(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAnObject => f.write_str("entry is not an object"),
            SkipReason::MissingType => f.write_str("entry has no string \"type\""),
            SkipReason::UnknownType(kind) => write!(f, "unknown item type \"{kind}\""),
        }
    }
}

/// An entry that was skipped, by position in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub index: usize,
    pub reason: SkipReason,
}

/// Outcome of a JSON import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Ids of the created items, in batch order.
    pub accepted: Vec<ItemId>,
    pub skipped: Vec<SkippedEntry>,
}

/// Parse a JSON document into import entries.
///
/// An array yields its elements, and so does the `items` array of a
/// previous JSON export. Any other value is a single entry. Malformed JSON
/// rejects the whole batch.
pub fn parse_batch(json: &str) -> Result<Vec<Value>, ImportError> {
    match serde_json::from_str(json)? {
        Value::Array(entries) => Ok(entries),
        Value::Object(mut document) if is_export_document(&document) => match document.remove("items") {
            Some(Value::Array(entries)) => Ok(entries),
            _ => Ok(Vec::new()),
        },
        single => Ok(vec![single]),
    }
}

fn is_export_document(document: &Map<String, Value>) -> bool {
    !document.contains_key("type") && document.get("items").is_some_and(Value::is_array)
}

fn entry_kind(entry: &Map<String, Value>) -> Result<ItemKind, SkipReason> {
    let kind = entry
        .get("type")
        .and_then(Value::as_str)
        .ok_or(SkipReason::MissingType)?;
    kind.parse()
        .map_err(|_| SkipReason::UnknownType(kind.to_string()))
}

/// Read one coordinate of `entry[field]`, if present and numeric.
fn coordinate(entry: &Map<String, Value>, field: &str, axis: &str) -> Option<f64> {
    entry.get(field)?.get(axis)?.as_f64()
}

fn entry_size(entry: &Map<String, Value>) -> Option<Size> {
    let size = entry.get("size")?;
    let width = size.get("width")?.as_f64()?;
    let height = size.get("height")?.as_f64()?;
    Some(Size::new(width, height))
}

impl Whiteboard {
    /// Build one item per valid entry of a JSON object or array.
    ///
    /// Entries without a known `type` are skipped and reported. Positions
    /// default to a diagonal cascade from the configured import origin.
    /// Each accepted entry is committed separately.
    pub fn import_json(&mut self, json: &str) -> Result<ImportReport, ImportError> {
        let entries = parse_batch(json)?;
        let mut report = ImportReport::default();

        for (index, entry) in entries.into_iter().enumerate() {
            match self.import_entry(index, entry) {
                Ok(id) => report.accepted.push(id),
                Err(reason) => {
                    log::warn!("Skipping import entry {}: {}", index, reason);
                    report.skipped.push(SkippedEntry { index, reason });
                }
            }
        }

        log::info!(
            "Imported {} items ({} skipped)",
            report.accepted.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    fn import_entry(&mut self, index: usize, entry: Value) -> Result<ItemId, SkipReason> {
        let Value::Object(entry) = entry else {
            return Err(SkipReason::NotAnObject);
        };
        let kind = entry_kind(&entry)?;

        let config = self.config();
        let offset = config.import_step * index as f64;
        let position = Point::new(
            coordinate(&entry, "position", "x").unwrap_or(config.import_origin.x + offset),
            coordinate(&entry, "position", "y").unwrap_or(config.import_origin.y + offset),
        );
        let size = entry_size(&entry).map(|size| config.clamp_size(size));

        let mut item = Item::new(kind, position, size, self.state().next_z_index());
        if let Some(content) = entry.get("content").and_then(Value::as_str) {
            item.content = Some(content.to_string());
        }
        for (key, value) in entry {
            let is_property = ItemProperty::KEYS.iter().any(|k| *k == key);
            if STRUCTURAL_KEYS.iter().any(|k| *k == key) || !is_property {
                continue;
            }
            match ItemProperty::parse(&key, value) {
                Ok(property) => property.apply(&mut item),
                Err(e) => log::warn!("Ignoring field of import entry {}: {}", index, e),
            }
        }

        Ok(self.insert(item))
    }

    /// Add an image item from the result of an external file read.
    ///
    /// A failed read creates nothing.
    pub fn import_image(&mut self, source: Result<ImageSource, ImportError>) -> Option<ItemId> {
        let source = match source {
            Ok(source) => source,
            Err(e) => {
                log::error!("Image import failed: {}", e);
                return None;
            }
        };
        if source.bytes.is_empty() {
            log::error!("Image import failed: {}", ImportError::EmptyImage(source.name));
            return None;
        }

        let config = self.config();
        let item = Item::image(
            config.image_position,
            config.image_size,
            source.to_data_url(),
            source.name.clone(),
            self.state().next_z_index(),
        );
        log::info!("Imported image {} ({} bytes)", source.name, source.bytes.len());
        Some(self.insert(item))
    }
}

/// Raster formats recognized from file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
    Gif,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Gif => "image/gif",
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(ImageFormat::Gif);
        }
        // RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }
        None
    }
}

/// Image file contents handed over by the host after reading a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    /// File name; becomes the image's alt text.
    pub name: String,
    pub bytes: Vec<u8>,
    /// MIME type reported by the host, if any.
    pub mime: Option<String>,
}

impl ImageSource {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            mime: None,
        }
    }

    /// MIME type: the reported one, else sniffed, else a generic binary type.
    pub fn mime_type(&self) -> &str {
        match &self.mime {
            Some(mime) => mime.as_str(),
            None => ImageFormat::from_magic_bytes(&self.bytes)
                .map(|format| format.mime_type())
                .unwrap_or("application/octet-stream"),
        }
    }

    /// Encode the image as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Color;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_parse_batch() {
        assert_eq!(parse_batch("[1, 2]").unwrap().len(), 2);
        assert_eq!(parse_batch(r#"{"type": "text"}"#).unwrap().len(), 1);
        assert_eq!(parse_batch(r#"{"items": [{}, {}, {}], "version": "1.0"}"#).unwrap().len(), 3);
        assert!(matches!(parse_batch("{not json"), Err(ImportError::Parse(_))));
    }

    #[test]
    fn test_import_mixed_batch() {
        let mut wb = Whiteboard::new();
        let report = wb
            .import_json(r#"[{"type": "rectangle"}, {"type": "bogus"}, 3, {"size": {"width": 1, "height": 1}}]"#)
            .unwrap();

        assert_eq!(report.accepted.len(), 1);
        assert_eq!(
            report.skipped,
            vec![
                SkippedEntry { index: 1, reason: SkipReason::UnknownType("bogus".to_string()) },
                SkippedEntry { index: 2, reason: SkipReason::NotAnObject },
                SkippedEntry { index: 3, reason: SkipReason::MissingType },
            ]
        );
        assert_eq!(wb.state().len(), 1);
    }

    #[test]
    fn test_invalid_json_mutates_nothing() {
        let mut wb = Whiteboard::new();
        wb.add_item(ItemKind::Rectangle, Point::ZERO, None);
        let before = wb.snapshot();
        let history_len = wb.state().history().len();

        assert!(wb.import_json("[{\"type\": \"text\"").is_err());
        assert_eq!(wb.snapshot(), before);
        assert_eq!(wb.state().history().len(), history_len);
    }

    #[test]
    fn test_array_positions_cascade() {
        let mut wb = Whiteboard::new();
        let report = wb
            .import_json(r#"[{"type": "text"}, {"type": "circle"}, {"type": "line", "position": {"x": 7, "y": 8}}]"#)
            .unwrap();
        let positions: Vec<Point> = report
            .accepted
            .iter()
            .map(|id| wb.state().get_item(id).unwrap().position)
            .collect();
        assert_eq!(
            positions,
            vec![Point::new(100.0, 100.0), Point::new(150.0, 150.0), Point::new(7.0, 8.0)]
        );
        // One commit per accepted entry.
        assert_eq!(wb.state().history().len(), 4);
    }

    #[test]
    fn test_optional_fields_applied() {
        let mut wb = Whiteboard::new();
        let report = wb
            .import_json(
                r##"{"type": "post-it", "content": "hello", "size": {"width": 5, "height": 80},
                    "backgroundColor": "#ff0000", "opacity": "loud", "fontWeight": "bold", "unknown": 1}"##,
            )
            .unwrap();
        let item = wb.state().get_item(&report.accepted[0]).unwrap();
        assert_eq!(item.content.as_deref(), Some("hello"));
        assert_eq!(item.size, Size::new(20.0, 80.0));
        assert_eq!(item.style.background_color, Color::rgb(255, 0, 0));
        assert_eq!(item.style.opacity, 1.0);
        assert_eq!(item.style.font_weight, "bold");
        assert!(item.selected);
    }

    #[test]
    fn test_import_image() {
        let mut wb = Whiteboard::new();
        let mut bytes = PNG_HEADER.to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        let id = wb.import_image(Ok(ImageSource::new("logo.png", bytes))).unwrap();

        let item = wb.state().get_item(&id).unwrap();
        assert_eq!(item.kind, ItemKind::Image);
        assert_eq!(item.position, Point::new(100.0, 100.0));
        assert_eq!(item.size, Size::new(200.0, 150.0));
        assert_eq!(item.image_alt.as_deref(), Some("logo.png"));
        assert!(item.image_url.as_deref().unwrap().starts_with("data:image/png;base64,iVBORw0KGgo"));
        assert_eq!(wb.state().history().len(), 2);
    }

    #[test]
    fn test_failed_image_read_creates_nothing() {
        let mut wb = Whiteboard::new();
        assert!(wb.import_image(Err(ImportError::Image("permission denied".into()))).is_none());
        assert!(wb.import_image(Ok(ImageSource::new("empty.png", Vec::new()))).is_none());
        assert!(wb.state().is_empty());
        assert_eq!(wb.state().history().len(), 1);
    }

    #[test]
    fn test_magic_bytes() {
        assert_eq!(ImageFormat::from_magic_bytes(&PNG_HEADER), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_magic_bytes(b"GIF89a.."), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::from_magic_bytes(b"RIFF\0\0\0\0WEBPVP8 "), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_magic_bytes(b"hello"), None);

        let source = ImageSource {
            name: "x".into(),
            bytes: b"abc".to_vec(),
            mime: Some("image/svg+xml".into()),
        };
        assert_eq!(source.to_data_url(), "data:image/svg+xml;base64,YWJj");
    }
}
