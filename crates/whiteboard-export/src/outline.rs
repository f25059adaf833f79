//! Plain-text outline export.

use whiteboard_core::Snapshot;

const TITLE: &str = "Whiteboard Export";

/// Numbered list of items with their type and content.
pub fn to_outline(snapshot: &Snapshot) -> String {
    let mut lines = vec![TITLE.to_string(), "=".repeat(TITLE.len()), String::new()];
    lines.extend(snapshot.items.iter().enumerate().map(|(index, item)| {
        let content = item
            .content
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("(no content)");
        format!("{}. {}: {}", index + 1, item.kind, content)
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use whiteboard_core::{ItemKind, Point, Whiteboard};

    #[test]
    fn test_outline() {
        let mut wb = Whiteboard::new();
        let id = wb.add_item(ItemKind::PostIt, Point::ZERO, None);
        wb.update_item_content(&id, "Buy milk");
        wb.add_item(ItemKind::Circle, Point::ZERO, None);

        assert_eq!(
            to_outline(&wb.snapshot()),
            "Whiteboard Export\n=================\n\n1. post-it: Buy milk\n2. circle: (no content)"
        );
    }
}
