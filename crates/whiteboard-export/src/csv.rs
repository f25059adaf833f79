//! CSV export: one row per item with its geometry and colors.

use whiteboard_core::{Item, Snapshot};

const HEADER: [&str; 8] = [
    "Type",
    "Position X",
    "Position Y",
    "Width",
    "Height",
    "Content",
    "Color",
    "Background Color",
];

/// Quote a cell, doubling embedded quotes.
fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn row(item: &Item) -> [String; 8] {
    [
        item.kind.to_string(),
        item.position.x.to_string(),
        item.position.y.to_string(),
        item.size.width.to_string(),
        item.size.height.to_string(),
        item.content.clone().unwrap_or_default(),
        item.style.color.to_hex(),
        item.style.background_color.to_hex(),
    ]
}

/// Items in document order, every cell quoted.
pub fn to_csv(snapshot: &Snapshot) -> String {
    let header = HEADER.iter().map(|cell| quote(cell)).collect::<Vec<_>>().join(",");
    let rows = snapshot
        .items
        .iter()
        .map(|item| row(item).iter().map(|cell| quote(cell)).collect::<Vec<_>>().join(","));

    std::iter::once(header).chain(rows).collect::<Vec<_>>().join("\n")
}
