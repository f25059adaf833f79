//! Document state and the reducer that transitions it.

use crate::action::Action;
use crate::config::EngineConfig;
use crate::handles::ResizeHandle;
use crate::history::History;
use crate::items::{Item, ItemId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Read-only view of the document handed to exporters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub items: Vec<Item>,
}

impl Snapshot {
    /// Items sorted back to front by z-index (stable on ties).
    pub fn items_by_z(&self) -> Vec<&Item> {
        let mut ordered: Vec<&Item> = self.items.iter().collect();
        ordered.sort_by_key(|item| item.z_index);
        ordered
    }
}

/// The full in-memory model: items, selection, clipboard, history and the
/// transient interaction flags.
#[derive(Debug, Clone, Default)]
pub struct DocumentState {
    /// Items in insertion order (display/tab order, not stacking order).
    items: Vec<Item>,
    selected_item: Option<ItemId>,
    is_dragging: bool,
    is_resizing: bool,
    resize_handle: Option<ResizeHandle>,
    /// Detached copy of one item.
    clipboard: Option<Item>,
    history: History,
}

impl DocumentState {
    /// Create an empty document with the history configured from `config`.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            history: History::with_capacity_limit(config.max_history),
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get_item(id).is_some()
    }

    fn get_item_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    pub fn selected_item_id(&self) -> Option<&ItemId> {
        self.selected_item.as_ref()
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected_item.as_ref().and_then(|id| self.get_item(id))
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn is_resizing(&self) -> bool {
        self.is_resizing
    }

    pub fn active_resize_handle(&self) -> Option<ResizeHandle> {
        self.resize_handle
    }

    pub fn clipboard(&self) -> Option<&Item> {
        self.clipboard.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Highest z-index in use (0 for an empty document).
    pub fn max_z_index(&self) -> i64 {
        self.items.iter().map(|item| item.z_index).max().unwrap_or(0)
    }

    /// z-index given to newly created items.
    pub fn next_z_index(&self) -> i64 {
        self.items.len() as i64 + 1
    }

    /// Items under `point`, front to back.
    pub fn items_at_point(&self, point: Point) -> Vec<&Item> {
        let mut hits: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| item.bounds().contains(point))
            .collect();
        // Later insertion wins ties, matching paint order.
        hits.reverse();
        hits.sort_by_key(|item| std::cmp::Reverse(item.z_index));
        hits
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            items: self.items.clone(),
        }
    }

    /// Make the per-item `selected` flags agree with `selected_item`,
    /// dropping the selection if it no longer references a live item.
    fn sync_selection(&mut self) {
        if let Some(id) = &self.selected_item {
            if !self.items.iter().any(|item| &item.id == id) {
                self.selected_item = None;
            }
        }
        let selected = self.selected_item.clone();
        for item in &mut self.items {
            item.selected = selected.as_ref() == Some(&item.id);
        }
    }

    /// Take the selection recorded in freshly restored items.
    fn restore_selection(&mut self) {
        self.selected_item = self
            .items
            .iter()
            .find(|item| item.selected)
            .map(|item| item.id.clone());
        self.sync_selection();
    }

    /// Insert an item, making it the only selected one.
    fn insert_selected(&mut self, mut item: Item) {
        if self.contains(&item.id) {
            log::warn!("Duplicate item id {}, assigning a fresh one", item.id);
            item.id = ItemId::generate();
        }
        self.selected_item = Some(item.id.clone());
        self.items.push(item);
        self.sync_selection();
    }
}

/// Compute the next state from `state` and `action`.
///
/// Actions naming an item that does not exist leave the state unchanged.
pub fn reduce(mut state: DocumentState, action: Action, config: &EngineConfig) -> DocumentState {
    let name = action.name();
    match action {
        Action::AddItem(mut item) => {
            item.size = config.clamp_size(item.size);
            state.insert_selected(item);
        }
        Action::UpdateItemPosition { id, position } => match state.get_item_mut(&id) {
            Some(item) => item.position = position,
            None => ignore_stale(name, &id),
        },
        Action::UpdateItemSize { id, size } => match state.get_item_mut(&id) {
            Some(item) => item.size = config.clamp_size(size),
            None => ignore_stale(name, &id),
        },
        Action::SelectItem(id) => {
            if let Some(id) = &id {
                if !state.contains(id) {
                    ignore_stale(name, id);
                }
            }
            state.selected_item = id;
            state.sync_selection();
        }
        Action::DeleteItem(id) => {
            let before = state.items.len();
            state.items.retain(|item| item.id != id);
            if state.items.len() == before {
                ignore_stale(name, &id);
            } else if state.selected_item.as_ref() == Some(&id) {
                state.selected_item = None;
            }
        }
        Action::ClearAll => {
            state.items.clear();
            state.selected_item = None;
            state.is_dragging = false;
            state.is_resizing = false;
            state.resize_handle = None;
        }
        Action::SetDragging(dragging) => {
            state.is_dragging = dragging;
        }
        Action::SetResizing { resizing, handle } => {
            state.is_resizing = resizing;
            state.resize_handle = if resizing { handle } else { None };
        }
        Action::UpdateItemContent { id, content } => match state.get_item_mut(&id) {
            Some(item) => item.content = Some(content),
            None => ignore_stale(name, &id),
        },
        Action::UpdateItemProperty { id, property } => match state.get_item_mut(&id) {
            Some(item) => property.apply(item),
            None => ignore_stale(name, &id),
        },
        Action::CopyItem(mut item) => {
            item.selected = false;
            state.clipboard = Some(item);
        }
        Action::PasteItem { item, position } => {
            let mut pasted = item.duplicate_at(position);
            pasted.z_index = state.next_z_index();
            state.insert_selected(pasted);
        }
        Action::BringToFront(id) => {
            let front = state.max_z_index() + 1;
            match state.get_item_mut(&id) {
                Some(item) => item.z_index = front,
                None => ignore_stale(name, &id),
            }
        }
        Action::SendToBack(id) => match state.get_item_mut(&id) {
            Some(item) => item.z_index = 1,
            None => ignore_stale(name, &id),
        },
        Action::SaveHistory => {
            state.history.commit(&state.items);
        }
        Action::Undo => {
            if let Some(items) = state.history.undo() {
                state.items = items.to_vec();
                state.restore_selection();
            }
        }
        Action::Redo => {
            if let Some(items) = state.history.redo() {
                state.items = items.to_vec();
                state.restore_selection();
            }
        }
    }
    state
}

fn ignore_stale(action: &str, id: &ItemId) {
    log::debug!("Ignoring {} for unknown item {}", action, id);
}
