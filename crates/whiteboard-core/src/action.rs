//! Actions understood by the document reducer.

use crate::handles::ResizeHandle;
use crate::items::{Item, ItemId, ItemProperty};
use kurbo::{Point, Size};

/// A single state transition request.
///
/// Actions are plain data; [`crate::document::reduce`] interprets them.
/// Composite operations (mutation followed by a history commit) are built
/// by [`crate::Whiteboard`] from several actions.
#[derive(Debug, Clone)]
pub enum Action {
    /// Insert a fully built item and select it.
    AddItem(Item),
    UpdateItemPosition { id: ItemId, position: Point },
    /// Size is clamped to the configured minimum by the reducer.
    UpdateItemSize { id: ItemId, size: Size },
    /// Select one item (None clears the selection).
    SelectItem(Option<ItemId>),
    DeleteItem(ItemId),
    ClearAll,
    SetDragging(bool),
    SetResizing {
        resizing: bool,
        handle: Option<ResizeHandle>,
    },
    UpdateItemContent { id: ItemId, content: String },
    UpdateItemProperty { id: ItemId, property: ItemProperty },
    /// Store a detached copy of an item in the clipboard.
    CopyItem(Item),
    /// Insert `item` at `position` under a fresh id.
    PasteItem { item: Item, position: Point },
    BringToFront(ItemId),
    SendToBack(ItemId),
    /// Commit the current items as a history snapshot.
    SaveHistory,
    Undo,
    Redo,
}

impl Action {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddItem(_) => "add_item",
            Action::UpdateItemPosition { .. } => "update_item_position",
            Action::UpdateItemSize { .. } => "update_item_size",
            Action::SelectItem(_) => "select_item",
            Action::DeleteItem(_) => "delete_item",
            Action::ClearAll => "clear_all",
            Action::SetDragging(_) => "set_dragging",
            Action::SetResizing { .. } => "set_resizing",
            Action::UpdateItemContent { .. } => "update_item_content",
            Action::UpdateItemProperty { .. } => "update_item_property",
            Action::CopyItem(_) => "copy_item",
            Action::PasteItem { .. } => "paste_item",
            Action::BringToFront(_) => "bring_to_front",
            Action::SendToBack(_) => "send_to_back",
            Action::SaveHistory => "save_history",
            Action::Undo => "undo",
            Action::Redo => "redo",
        }
    }
}
