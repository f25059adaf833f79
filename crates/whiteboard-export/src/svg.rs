//! SVG export.
//!
//! Items are painted back to front by z-index onto a fixed-size page.

use std::fmt::Write;

use whiteboard_core::{Item, ItemKind, Snapshot};

pub const SVG_WIDTH: u32 = 1200;
pub const SVG_HEIGHT: u32 = 800;

const PAGE_BACKGROUND: &str = "#f9fafb";
const STYLE: &str = ".text { font-family: Arial, sans-serif; } \
                     .shape { stroke: #1976d2; stroke-width: 2; }";

/// Escape text for use in XML content and attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shared presentation attributes (opacity, rotation about the center).
fn presentation(item: &Item) -> String {
    let mut attrs = String::new();
    if item.style.opacity < 1.0 {
        let _ = write!(attrs, " opacity=\"{}\"", item.style.opacity);
    }
    if item.style.rotation != 0.0 {
        let center = item.bounds().center();
        let _ = write!(
            attrs,
            " transform=\"rotate({} {} {})\"",
            item.style.rotation, center.x, center.y
        );
    }
    attrs
}

fn write_item(out: &mut String, item: &Item) {
    let (x, y) = (item.position.x, item.position.y);
    let (w, h) = (item.size.width, item.size.height);
    let fill = item.style.background_color.to_hex();
    let stroke = item
        .style
        .border_color
        .map(|c| c.to_hex())
        .unwrap_or_else(|| "#000000".to_string());
    let extra = presentation(item);

    // Writing into a String cannot fail.
    let _ = match item.kind {
        ItemKind::Text => write!(
            out,
            "<text x=\"{}\" y=\"{}\" class=\"text\" font-size=\"{}\" fill=\"{}\"{}>{}</text>",
            x,
            y + 20.0,
            item.style.font_size,
            item.style.color.to_hex(),
            extra,
            escape(item.content.as_deref().unwrap_or_default()),
        ),
        ItemKind::Rectangle | ItemKind::PostIt => write!(
            out,
            "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" class=\"shape\" fill=\"{fill}\"{extra}/>"
        ),
        ItemKind::Circle => write!(
            out,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" class=\"shape\" fill=\"{fill}\"{extra}/>",
            x + w / 2.0,
            y + h / 2.0,
            w.min(h) / 2.0,
        ),
        ItemKind::Triangle => write!(
            out,
            "<polygon points=\"{},{} {},{} {},{}\" class=\"shape\" fill=\"{fill}\"{extra}/>",
            x + w / 2.0,
            y,
            x,
            y + h,
            x + w,
            y + h,
        ),
        ItemKind::Arrow | ItemKind::Line => {
            let marker = if item.kind == ItemKind::Arrow {
                " marker-end=\"url(#arrowhead)\""
            } else {
                ""
            };
            let start = item.start_point.unwrap_or((x, y + h / 2.0).into());
            let end = item.end_point.unwrap_or((x + w, y + h / 2.0).into());
            write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{stroke}\" stroke-width=\"{}\"{marker}{extra}/>",
                start.x, start.y, end.x, end.y, item.style.border_width,
            )
        }
        ItemKind::Image => write!(
            out,
            "<image x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" href=\"{}\"{extra}><title>{}</title></image>",
            escape(item.image_url.as_deref().unwrap_or_default()),
            escape(item.image_alt.as_deref().unwrap_or_default()),
        ),
    };

    // Captions on shapes are centered on top.
    if item.kind != ItemKind::Text && item.has_content() {
        let center = item.bounds().center();
        let _ = write!(
            out,
            "<text x=\"{}\" y=\"{}\" class=\"text\" text-anchor=\"middle\" dominant-baseline=\"middle\" fill=\"{}\">{}</text>",
            center.x,
            center.y,
            item.style.color.to_hex(),
            escape(item.content.as_deref().unwrap_or_default()),
        );
    }
}

/// Render the snapshot as a standalone SVG document.
pub fn to_svg(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<svg width=\"{SVG_WIDTH}\" height=\"{SVG_HEIGHT}\" xmlns=\"http://www.w3.org/2000/svg\">"
    );
    let _ = write!(
        out,
        "<defs><style>{STYLE}</style>\
         <marker id=\"arrowhead\" markerWidth=\"10\" markerHeight=\"7\" refX=\"10\" refY=\"3.5\" orient=\"auto\">\
         <polygon points=\"0 0, 10 3.5, 0 7\"/></marker></defs>"
    );
    let _ = write!(out, "<rect width=\"100%\" height=\"100%\" fill=\"{PAGE_BACKGROUND}\"/>");

    for item in snapshot.items_by_z() {
        write_item(&mut out, item);
    }

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use whiteboard_core::{ItemProperty, Point, Size, Whiteboard};

    #[test]
    fn test_empty_document() {
        let svg = to_svg(&Snapshot { items: Vec::new() });
        assert!(svg.starts_with("<svg width=\"1200\" height=\"800\""));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_shapes() {
        let mut wb = Whiteboard::new();
        wb.add_item(ItemKind::Circle, Point::new(0.0, 0.0), Some(Size::new(100.0, 60.0)));
        wb.add_item(ItemKind::Triangle, Point::new(10.0, 10.0), Some(Size::new(20.0, 20.0)));
        wb.add_item(ItemKind::Arrow, Point::new(0.0, 100.0), None);
        let svg = to_svg(&wb.snapshot());

        assert!(svg.contains("<circle cx=\"50\" cy=\"30\" r=\"30\""));
        assert!(svg.contains("<polygon points=\"20,10 10,30 30,30\""));
        assert!(svg.contains("<line x1=\"0\" y1=\"110\" x2=\"100\" y2=\"110\" stroke=\"#000000\" stroke-width=\"2\" marker-end"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut wb = Whiteboard::new();
        let id = wb.add_item(ItemKind::Text, Point::new(5.0, 5.0), None);
        wb.update_item_content(&id, "a < b & \"c\"");
        let svg = to_svg(&wb.snapshot());
        assert!(svg.contains("<text x=\"5\" y=\"25\""));
        assert!(svg.contains(">a &lt; b &amp; &quot;c&quot;</text>"));
    }

    #[test]
    fn test_paint_order_follows_z_index() {
        let mut wb = Whiteboard::new();
        let back = wb.add_item(ItemKind::Rectangle, Point::new(1.0, 1.0), None);
        wb.add_item(ItemKind::Rectangle, Point::new(2.0, 2.0), None);
        wb.bring_to_front(&back);
        wb.update_item_property(&back, ItemProperty::Opacity(0.5));

        let svg = to_svg(&wb.snapshot());
        let first = svg.find("x=\"2\"").unwrap();
        let second = svg.find("x=\"1\"").unwrap();
        assert!(first < second);
        assert!(svg.contains("opacity=\"0.5\""));
    }
}
