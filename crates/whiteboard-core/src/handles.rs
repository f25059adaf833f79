//! Resize handles and resize geometry.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Handle hit tolerance in canvas units.
pub const HANDLE_HIT_TOLERANCE: f64 = 6.0;

/// One of the eight resize handles around a selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Right,
        ResizeHandle::BottomRight,
        ResizeHandle::Bottom,
        ResizeHandle::BottomLeft,
        ResizeHandle::Left,
    ];

    /// CSS cursor name shown while hovering the handle.
    pub fn cursor(&self) -> &'static str {
        match self {
            ResizeHandle::TopLeft => "nw-resize",
            ResizeHandle::Top => "n-resize",
            ResizeHandle::TopRight => "ne-resize",
            ResizeHandle::Right => "e-resize",
            ResizeHandle::BottomRight => "se-resize",
            ResizeHandle::Bottom => "s-resize",
            ResizeHandle::BottomLeft => "sw-resize",
            ResizeHandle::Left => "w-resize",
        }
    }

    /// Position of this handle on `bounds`.
    pub fn anchor(&self, bounds: Rect) -> Point {
        let center = bounds.center();
        match self {
            ResizeHandle::TopLeft => Point::new(bounds.x0, bounds.y0),
            ResizeHandle::Top => Point::new(center.x, bounds.y0),
            ResizeHandle::TopRight => Point::new(bounds.x1, bounds.y0),
            ResizeHandle::Right => Point::new(bounds.x1, center.y),
            ResizeHandle::BottomRight => Point::new(bounds.x1, bounds.y1),
            ResizeHandle::Bottom => Point::new(center.x, bounds.y1),
            ResizeHandle::BottomLeft => Point::new(bounds.x0, bounds.y1),
            ResizeHandle::Left => Point::new(bounds.x0, center.y),
        }
    }

    fn moves_left(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::Left | ResizeHandle::BottomLeft
        )
    }

    fn moves_right(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopRight | ResizeHandle::Right | ResizeHandle::BottomRight
        )
    }

    fn moves_top(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::Top | ResizeHandle::TopRight
        )
    }

    fn moves_bottom(&self) -> bool {
        matches!(
            self,
            ResizeHandle::BottomLeft | ResizeHandle::Bottom | ResizeHandle::BottomRight
        )
    }
}

/// Find the handle of `bounds` under `point`, if any.
pub fn hit_test_handle(bounds: Rect, point: Point, tolerance: f64) -> Option<ResizeHandle> {
    ResizeHandle::ALL.into_iter().find(|handle| {
        let anchor = handle.anchor(bounds);
        let dx = point.x - anchor.x;
        let dy = point.y - anchor.y;
        dx * dx + dy * dy <= tolerance * tolerance
    })
}

/// Geometry of an item when a resize started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOrigin {
    pub position: Point,
    pub size: Size,
}

/// Compute the new position and size for a resize by `delta` from `origin`.
///
/// The edge opposite to the dragged handle stays fixed, and neither
/// dimension drops below `min_size`.
pub fn apply_resize(
    origin: ResizeOrigin,
    handle: ResizeHandle,
    delta: Vec2,
    min_size: f64,
) -> (Point, Size) {
    let mut position = origin.position;
    let mut size = origin.size;

    if handle.moves_right() {
        size.width = (origin.size.width + delta.x).max(min_size);
    } else if handle.moves_left() {
        size.width = (origin.size.width - delta.x).max(min_size);
        position.x = origin.position.x + origin.size.width - size.width;
    }

    if handle.moves_bottom() {
        size.height = (origin.size.height + delta.y).max(min_size);
    } else if handle.moves_top() {
        size.height = (origin.size.height - delta.y).max(min_size);
        position.y = origin.position.y + origin.size.height - size.height;
    }

    (position, size)
}
