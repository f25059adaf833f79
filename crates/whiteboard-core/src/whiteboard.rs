//! The whiteboard dispatcher: the single entry point for document mutations.

use crate::action::Action;
use crate::config::EngineConfig;
use crate::document::{DocumentState, Snapshot, reduce};
use crate::error::EngineResult;
use crate::handles::ResizeHandle;
use crate::items::{Item, ItemId, ItemKind, ItemProperty};
use kurbo::{Point, Size};
use serde_json::Value;

/// Owns the document and serializes every mutation through [`Whiteboard::dispatch`].
///
/// Operations that complete a user-visible edit (add, delete, clear, paste,
/// imports) commit a history snapshot; continuous updates (position, size)
/// do not, so callers driving a drag or resize commit once at the end.
#[derive(Debug, Clone, Default)]
pub struct Whiteboard {
    state: DocumentState,
    config: EngineConfig,
}

impl Whiteboard {
    /// Create an empty whiteboard with default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            state: DocumentState::new(&config),
            config,
        }
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply one action to the document.
    pub fn dispatch(&mut self, action: Action) {
        log::trace!("dispatch {}", action.name());
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action, &self.config);
    }

    /// Insert a prepared item, select it and commit.
    pub(crate) fn insert(&mut self, item: Item) -> ItemId {
        let id = item.id().clone();
        log::debug!("Adding {} {}", item.kind, id);
        self.dispatch(Action::AddItem(item));
        self.dispatch(Action::SaveHistory);
        id
    }

    // --- Item lifecycle ---

    /// Add a new item of `kind` and select it. Size defaults per kind and
    /// is clamped to the configured minimum.
    pub fn add_item(&mut self, kind: ItemKind, position: Point, size: Option<Size>) -> ItemId {
        let item = Item::new(kind, position, size, self.state.next_z_index());
        self.insert(item)
    }

    /// Remove an item. Returns false (and records nothing) for unknown ids.
    pub fn delete_item(&mut self, id: &ItemId) -> bool {
        if !self.state.contains(id) {
            log::debug!("delete_item: unknown item {}", id);
            return false;
        }
        self.dispatch(Action::DeleteItem(id.clone()));
        self.dispatch(Action::SaveHistory);
        true
    }

    /// Remove every item and clear the selection.
    pub fn clear_all(&mut self) {
        log::debug!("Clearing {} items", self.state.len());
        self.dispatch(Action::ClearAll);
        self.dispatch(Action::SaveHistory);
    }

    // --- Continuous updates (no history commit) ---

    pub fn update_item_position(&mut self, id: &ItemId, position: Point) {
        self.dispatch(Action::UpdateItemPosition {
            id: id.clone(),
            position,
        });
    }

    /// Resize an item; each dimension is clamped to the configured minimum.
    pub fn update_item_size(&mut self, id: &ItemId, size: Size) {
        self.dispatch(Action::UpdateItemSize {
            id: id.clone(),
            size,
        });
    }

    pub fn update_item_content(&mut self, id: &ItemId, content: impl Into<String>) {
        self.dispatch(Action::UpdateItemContent {
            id: id.clone(),
            content: content.into(),
        });
    }

    pub fn update_item_property(&mut self, id: &ItemId, property: ItemProperty) {
        self.dispatch(Action::UpdateItemProperty {
            id: id.clone(),
            property,
        });
    }

    /// Set a property from its wire key and an untyped value.
    ///
    /// Unknown keys and mistyped values are rejected before the store is
    /// touched.
    pub fn set_item_property(&mut self, id: &ItemId, key: &str, value: Value) -> EngineResult<()> {
        let property = ItemProperty::parse(key, value)?;
        self.update_item_property(id, property);
        Ok(())
    }

    // --- Selection, clipboard, z-order ---

    /// Select one item, or clear the selection with `None`.
    pub fn select_item(&mut self, id: Option<&ItemId>) {
        self.dispatch(Action::SelectItem(id.cloned()));
    }

    /// Copy an item into the clipboard. Returns false for unknown ids.
    pub fn copy_item(&mut self, id: &ItemId) -> bool {
        match self.state.get_item(id) {
            Some(item) => {
                let item = item.clone();
                self.dispatch(Action::CopyItem(item));
                true
            }
            None => false,
        }
    }

    /// Paste the clipboard item at `position`. Returns the new id, or None
    /// when the clipboard is empty.
    pub fn paste_item(&mut self, position: Point) -> Option<ItemId> {
        let item = self.state.clipboard()?.clone();
        self.dispatch(Action::PasteItem { item, position });
        self.dispatch(Action::SaveHistory);
        self.state.selected_item_id().cloned()
    }

    pub fn bring_to_front(&mut self, id: &ItemId) {
        self.dispatch(Action::BringToFront(id.clone()));
    }

    pub fn send_to_back(&mut self, id: &ItemId) {
        self.dispatch(Action::SendToBack(id.clone()));
    }

    // --- Transient flags ---

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dispatch(Action::SetDragging(dragging));
    }

    pub fn set_resizing(&mut self, resizing: bool, handle: Option<ResizeHandle>) {
        self.dispatch(Action::SetResizing { resizing, handle });
    }

    // --- History ---

    /// Commit the current items as a new history snapshot.
    pub fn save_to_history(&mut self) {
        self.dispatch(Action::SaveHistory);
    }

    /// Returns true if an undo was performed.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.dispatch(Action::Undo);
        true
    }

    /// Returns true if a redo was performed.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.dispatch(Action::Redo);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.state.history().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.history().can_redo()
    }

    /// Read-only view of the items for exporters.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }
}
