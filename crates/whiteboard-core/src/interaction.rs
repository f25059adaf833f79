//! Pointer and keyboard interaction: drag, resize and in-place text editing.
//!
//! The coordinator turns raw input into store operations. Drags and resizes
//! stream position/size updates without touching history and commit exactly
//! once when the pointer is released.

use crate::handles::{HANDLE_HIT_TOLERANCE, ResizeHandle, ResizeOrigin, apply_resize, hit_test_handle};
use crate::items::ItemId;
use crate::shortcuts::{Command, Modifiers, ShortcutRegistry};
use crate::whiteboard::Whiteboard;
use kurbo::{Point, Vec2};
use std::time::Duration;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Pointer gesture in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging {
        id: ItemId,
        /// Pointer position relative to the item's top-left corner.
        offset: Vec2,
    },
    Resizing {
        id: ItemId,
        handle: ResizeHandle,
        origin: ResizeOrigin,
        start_pointer: Point,
    },
}

impl Interaction {
    /// Item targeted by the gesture, if any.
    pub fn target(&self) -> Option<&ItemId> {
        match self {
            Interaction::Idle => None,
            Interaction::Dragging { id, .. } | Interaction::Resizing { id, .. } => Some(id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }
}

/// In-place text edit of one item.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub id: ItemId,
    /// Text typed so far; written to the item on commit.
    pub buffer: String,
}

/// Remembers the last press so a second press on the same target can be
/// recognized as a double-click.
#[derive(Debug, Clone, Default)]
struct ClickTracker {
    last: Option<(ItemId, Instant)>,
}

impl ClickTracker {
    fn register(&mut self, id: &ItemId, now: Instant, window: Duration) -> bool {
        let is_double = matches!(
            &self.last,
            Some((last_id, at)) if last_id == id && now.saturating_duration_since(*at) < window
        );
        // A third press starts a new sequence.
        self.last = if is_double {
            None
        } else {
            Some((id.clone(), now))
        };
        is_double
    }
}

/// Result of a pointer press.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerDown {
    /// The press was ignored (busy, stale target, or already editing it).
    Ignored,
    /// Empty canvas was pressed; the selection was cleared.
    Background,
    DragStarted(ItemId),
    ResizeStarted(ItemId, ResizeHandle),
    /// The press completed a double-click and opened the text editor.
    EditStarted(ItemId),
}

/// Drives the drag/resize/edit state machine on top of a [`Whiteboard`].
#[derive(Debug, Clone, Default)]
pub struct InteractionCoordinator {
    interaction: Interaction,
    editing: Option<EditSession>,
    clicks: ClickTracker,
}

impl InteractionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, id: &ItemId) -> bool {
        self.editing.as_ref().is_some_and(|edit| &edit.id == id)
    }

    /// Drop gestures and edits whose item no longer exists.
    fn sync(&mut self, wb: &mut Whiteboard) {
        let target_gone = self
            .interaction
            .target()
            .is_some_and(|id| !wb.state().contains(id));
        if target_gone {
            log::debug!("Interaction target vanished, returning to idle");
            self.abort(wb);
        }
        let edit_gone = self
            .editing
            .as_ref()
            .is_some_and(|edit| !wb.state().contains(&edit.id));
        if edit_gone {
            log::debug!("Edited item vanished, discarding edit");
            self.editing = None;
        }
    }

    /// End the current gesture without committing it.
    fn abort(&mut self, wb: &mut Whiteboard) {
        match std::mem::take(&mut self.interaction) {
            Interaction::Idle => {}
            Interaction::Dragging { .. } => wb.set_dragging(false),
            Interaction::Resizing { .. } => wb.set_resizing(false, None),
        }
    }

    /// Abort any gesture and discard any edit. Nothing is committed.
    pub fn reset(&mut self, wb: &mut Whiteboard) {
        self.abort(wb);
        self.editing = None;
    }

    // --- Pointer ---

    /// Press on item `id` at canvas position `pointer`.
    pub fn pointer_down(&mut self, wb: &mut Whiteboard, id: &ItemId, pointer: Point, now: Instant) -> PointerDown {
        self.sync(wb);
        if !self.interaction.is_idle() || self.is_editing(id) {
            return PointerDown::Ignored;
        }
        let Some(position) = wb.state().get_item(id).map(|item| item.position) else {
            log::debug!("pointer_down: unknown item {}", id);
            return PointerDown::Ignored;
        };

        let window = Duration::from_millis(wb.config().double_click_ms);
        if self.clicks.register(id, now, window) {
            self.begin_edit(wb, id);
            return PointerDown::EditStarted(id.clone());
        }

        // Pressing another item blurs the editor, which saves it.
        if self.editing.is_some() {
            self.commit_edit(wb);
        }

        wb.select_item(Some(id));
        self.interaction = Interaction::Dragging {
            id: id.clone(),
            offset: pointer - position,
        };
        wb.set_dragging(true);
        PointerDown::DragStarted(id.clone())
    }

    /// Press at a canvas position: resize handles of the selected item win,
    /// then the topmost item under the pointer, then the background.
    pub fn pointer_down_at(&mut self, wb: &mut Whiteboard, pointer: Point, now: Instant) -> PointerDown {
        self.sync(wb);
        if !self.interaction.is_idle() {
            return PointerDown::Ignored;
        }

        let handle_hit = wb.state().selected_item().and_then(|item| {
            if !item.kind.is_resizable() {
                return None;
            }
            hit_test_handle(item.bounds(), pointer, HANDLE_HIT_TOLERANCE)
                .map(|handle| (item.id().clone(), handle))
        });
        if let Some((id, handle)) = handle_hit {
            return if self.resize_start(wb, &id, handle, pointer) {
                PointerDown::ResizeStarted(id, handle)
            } else {
                PointerDown::Ignored
            };
        }

        let hit = wb.state().items_at_point(pointer).first().map(|item| item.id().clone());
        match hit {
            Some(id) => self.pointer_down(wb, &id, pointer, now),
            None => {
                if self.editing.is_some() {
                    self.commit_edit(wb);
                }
                wb.select_item(None);
                PointerDown::Background
            }
        }
    }

    /// Pointer moved. Returns true if an item was updated.
    pub fn pointer_move(&mut self, wb: &mut Whiteboard, pointer: Point) -> bool {
        self.sync(wb);
        match &self.interaction {
            Interaction::Idle => false,
            Interaction::Dragging { id, offset } => {
                wb.update_item_position(id, pointer - *offset);
                true
            }
            Interaction::Resizing {
                id,
                handle,
                origin,
                start_pointer,
            } => {
                let resizable = wb.state().get_item(id).is_some_and(|item| item.kind.is_resizable());
                if !resizable {
                    return false;
                }
                let min_size = wb.config().min_item_size;
                let (position, size) = apply_resize(*origin, *handle, pointer - *start_pointer, min_size);
                let id = id.clone();
                wb.update_item_position(&id, position);
                wb.update_item_size(&id, size);
                true
            }
        }
    }

    /// Pointer released. Ends a drag or resize with exactly one history
    /// commit. Returns true if a commit happened.
    pub fn pointer_up(&mut self, wb: &mut Whiteboard) -> bool {
        self.sync(wb);
        match std::mem::take(&mut self.interaction) {
            Interaction::Idle => false,
            Interaction::Dragging { id, .. } => {
                wb.set_dragging(false);
                wb.save_to_history();
                log::debug!("Drag of {} committed", id);
                true
            }
            Interaction::Resizing { id, .. } => {
                wb.set_resizing(false, None);
                wb.save_to_history();
                log::debug!("Resize of {} committed", id);
                true
            }
        }
    }

    /// Start resizing `id` from `handle`. Text items cannot be resized.
    /// An open edit is committed first.
    pub fn resize_start(&mut self, wb: &mut Whiteboard, id: &ItemId, handle: ResizeHandle, pointer: Point) -> bool {
        self.sync(wb);
        if !self.interaction.is_idle() {
            return false;
        }
        let Some(item) = wb.state().get_item(id) else {
            return false;
        };
        if !item.kind.is_resizable() {
            log::debug!("resize_start: {} items are not resizable", item.kind);
            return false;
        }
        let origin = ResizeOrigin {
            position: item.position,
            size: item.size,
        };

        // Grabbing a handle blurs the editor, which saves it.
        if self.editing.is_some() {
            self.commit_edit(wb);
        }

        wb.select_item(Some(id));
        self.interaction = Interaction::Resizing {
            id: id.clone(),
            handle,
            origin,
            start_pointer: pointer,
        };
        wb.set_resizing(true, Some(handle));
        true
    }

    // --- Editing ---

    /// Single click on an item. Shapes without a caption open the caption
    /// editor with an empty buffer.
    pub fn click(&mut self, wb: &mut Whiteboard, id: &ItemId) -> bool {
        self.sync(wb);
        if self.editing.is_some() || !self.interaction.is_idle() {
            return false;
        }
        let opens_caption = wb
            .state()
            .get_item(id)
            .is_some_and(|item| !item.kind.is_text_like() && !item.has_content());
        if opens_caption {
            self.editing = Some(EditSession {
                id: id.clone(),
                buffer: String::new(),
            });
        }
        opens_caption
    }

    /// Open the text editor on `id`, seeded with its current content.
    /// Refused while a drag or resize is in progress.
    pub fn begin_edit(&mut self, wb: &mut Whiteboard, id: &ItemId) -> bool {
        self.sync(wb);
        if !self.interaction.is_idle() {
            return false;
        }
        if self.is_editing(id) {
            return true;
        }
        let Some(content) = wb.state().get_item(id).map(|item| item.content.clone().unwrap_or_default()) else {
            return false;
        };
        if self.editing.is_some() {
            self.commit_edit(wb);
        }
        wb.select_item(Some(id));
        self.editing = Some(EditSession {
            id: id.clone(),
            buffer: content,
        });
        true
    }

    /// Replace the edit buffer. Ignored when not editing.
    pub fn edit_input(&mut self, text: impl Into<String>) {
        if let Some(edit) = &mut self.editing {
            edit.buffer = text.into();
        }
    }

    /// Write the buffer to the item and commit. Returns true if committed.
    pub fn commit_edit(&mut self, wb: &mut Whiteboard) -> bool {
        let Some(edit) = self.editing.take() else {
            return false;
        };
        if !wb.state().contains(&edit.id) {
            return false;
        }
        wb.update_item_content(&edit.id, edit.buffer);
        wb.save_to_history();
        true
    }

    /// Discard the buffer, leaving content unchanged.
    pub fn cancel_edit(&mut self) -> bool {
        self.editing.take().is_some()
    }

    // --- Keyboard ---

    /// Handle a key press. Returns true if the key was consumed.
    ///
    /// While editing only Escape and Enter are handled; everything else is
    /// text input for the editor.
    pub fn key_down(&mut self, wb: &mut Whiteboard, key: &str, modifiers: Modifiers) -> bool {
        self.sync(wb);
        let command = ShortcutRegistry::lookup(key, modifiers);

        if self.editing.is_some() {
            return match command {
                Some(Command::Cancel) => self.cancel_edit(),
                Some(Command::CommitEdit) => self.commit_edit(wb),
                _ => false,
            };
        }

        let Some(command) = command else {
            return false;
        };
        let selected = wb.state().selected_item_id().cloned();
        match command {
            Command::Cancel => {
                self.abort(wb);
                wb.select_item(None);
                true
            }
            Command::Delete => match selected {
                Some(id) => {
                    let deleted = wb.delete_item(&id);
                    self.sync(wb);
                    deleted
                }
                None => false,
            },
            Command::Undo => {
                let done = wb.undo();
                self.sync(wb);
                done
            }
            Command::Redo => {
                let done = wb.redo();
                self.sync(wb);
                done
            }
            Command::Copy => selected.is_some_and(|id| wb.copy_item(&id)),
            Command::Paste => {
                let position = wb.config().paste_position;
                wb.paste_item(position).is_some()
            }
            Command::CommitEdit => false,
        }
    }
}
