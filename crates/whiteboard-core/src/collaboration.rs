//! Collaboration relay: remote edit messages and user presence.
//!
//! Remote edits are applied through the same [`Whiteboard`] operations as
//! local ones. Presence (who is connected, where their cursor is) lives
//! here and never touches the document.

use crate::items::{Item, ItemId, ItemKind};
use crate::whiteboard::Whiteboard;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Palette new participants pick their color from.
pub const USER_COLORS: [&str; 6] = ["#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#feca57", "#ff9ff3"];

/// The geometry part of an item carried by add/update messages.
///
/// Peers may send full items; fields other than these are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ItemKind>,
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl From<&Item> for ItemPayload {
    fn from(item: &Item) -> Self {
        Self {
            kind: Some(item.kind),
            position: item.position,
            size: Some(item.size),
        }
    }
}

/// Messages exchanged between collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CollaborationMessage {
    #[serde(rename_all = "camelCase")]
    UserJoin {
        user_id: String,
        user_name: String,
        user_color: String,
    },
    #[serde(rename_all = "camelCase")]
    UserLeave { user_id: String },
    #[serde(rename_all = "camelCase")]
    CursorMove {
        user_id: String,
        cursor_position: Point,
    },
    #[serde(rename_all = "camelCase")]
    ItemAdd {
        item: ItemPayload,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_name: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    ItemUpdate {
        item_id: ItemId,
        item: ItemPayload,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_name: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    ItemDelete {
        item_id: ItemId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_name: Option<String>,
    },
}

/// A connected collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteUser {
    pub id: String,
    pub name: String,
    pub color: String,
    pub cursor: Point,
}

/// The local participant, once announced.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalUser {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// What an incoming message changed.
#[derive(Debug, Clone, PartialEq)]
pub enum CollabEvent {
    UserJoined { user_id: String },
    UserLeft { user_id: String },
    CursorMoved { user_id: String, position: Point },
    ItemAdded { id: ItemId },
    ItemUpdated { id: ItemId },
    ItemDeleted { id: ItemId },
}

/// Tracks presence and translates collaboration messages to and from
/// document operations.
#[derive(Debug, Default)]
pub struct CollaborationManager {
    local: Option<LocalUser>,
    /// Remote users in join order.
    users: Vec<RemoteUser>,
    /// Human-readable activity feed.
    activity: Vec<String>,
    /// Pending outgoing messages (JSON strings).
    outgoing: Vec<String>,
}

impl CollaborationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn local_user(&self) -> Option<&LocalUser> {
        self.local.as_ref()
    }

    pub fn users(&self) -> &[RemoteUser] {
        &self.users
    }

    pub fn user(&self, id: &str) -> Option<&RemoteUser> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn activity(&self) -> &[String] {
        &self.activity
    }

    /// Take pending outgoing messages (drains the queue).
    pub fn take_outgoing(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outgoing)
    }

    pub fn has_outgoing(&self) -> bool {
        !self.outgoing.is_empty()
    }

    fn queue(&mut self, msg: &CollaborationMessage) {
        match serde_json::to_string(msg) {
            Ok(json) => self.outgoing.push(json),
            Err(e) => log::error!("Failed to serialize collaboration message: {}", e),
        }
    }

    fn local_name(&self) -> Option<String> {
        self.local.as_ref().map(|user| user.name.clone())
    }

    // --- Outgoing ---

    /// Announce the local user under `name` with a fresh id and color.
    pub fn announce_join(&mut self, name: &str) -> &LocalUser {
        let uuid = uuid::Uuid::new_v4();
        let color = USER_COLORS[uuid.as_bytes()[0] as usize % USER_COLORS.len()];
        let user = LocalUser {
            id: uuid.simple().to_string(),
            name: name.to_string(),
            color: color.to_string(),
        };
        self.queue(&CollaborationMessage::UserJoin {
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_color: user.color.clone(),
        });
        log::info!("Joining as {} ({})", user.name, user.id);
        self.local.insert(user)
    }

    /// Announce that the local user leaves and forget all presence.
    pub fn leave(&mut self) {
        if let Some(user) = self.local.take() {
            self.queue(&CollaborationMessage::UserLeave { user_id: user.id });
        }
        self.users.clear();
        self.activity.clear();
    }

    pub fn broadcast_cursor(&mut self, position: Point) {
        if let Some(user_id) = self.local.as_ref().map(|user| user.id.clone()) {
            self.queue(&CollaborationMessage::CursorMove {
                user_id,
                cursor_position: position,
            });
        }
    }

    pub fn broadcast_item_add(&mut self, item: &Item) {
        let msg = CollaborationMessage::ItemAdd {
            item: item.into(),
            user_name: self.local_name(),
        };
        self.queue(&msg);
    }

    pub fn broadcast_item_update(&mut self, item: &Item) {
        let msg = CollaborationMessage::ItemUpdate {
            item_id: item.id().clone(),
            item: item.into(),
            user_name: self.local_name(),
        };
        self.queue(&msg);
    }

    pub fn broadcast_item_delete(&mut self, id: &ItemId) {
        let msg = CollaborationMessage::ItemDelete {
            item_id: id.clone(),
            user_name: self.local_name(),
        };
        self.queue(&msg);
    }

    // --- Incoming ---

    /// Handle an incoming message.
    ///
    /// Malformed messages are logged and ignored. Item messages go through
    /// the whiteboard; user and cursor messages only touch presence.
    pub fn handle_message(&mut self, wb: &mut Whiteboard, json: &str) -> Option<CollabEvent> {
        let msg: CollaborationMessage = match serde_json::from_str(json) {
            Ok(msg) => msg,
            Err(e) => {
                log::warn!("Ignoring malformed collaboration message: {}", e);
                return None;
            }
        };

        match msg {
            CollaborationMessage::UserJoin {
                user_id,
                user_name,
                user_color,
            } => {
                self.activity.push(format!("{user_name} joined the room"));
                let user = RemoteUser {
                    id: user_id.clone(),
                    name: user_name,
                    color: user_color,
                    cursor: Point::ZERO,
                };
                match self.users.iter_mut().find(|u| u.id == user_id) {
                    Some(existing) => *existing = user,
                    None => self.users.push(user),
                }
                Some(CollabEvent::UserJoined { user_id })
            }
            CollaborationMessage::UserLeave { user_id } => {
                let before = self.users.len();
                self.users.retain(|user| user.id != user_id);
                if self.users.len() == before {
                    return None;
                }
                self.activity.push("A user left the room".to_string());
                Some(CollabEvent::UserLeft { user_id })
            }
            CollaborationMessage::CursorMove {
                user_id,
                cursor_position,
            } => {
                let user = self.users.iter_mut().find(|user| user.id == user_id)?;
                user.cursor = cursor_position;
                Some(CollabEvent::CursorMoved {
                    user_id,
                    position: cursor_position,
                })
            }
            CollaborationMessage::ItemAdd { item, user_name } => {
                let Some(kind) = item.kind else {
                    log::warn!("Ignoring item_add without a type");
                    return None;
                };
                let id = wb.add_item(kind, item.position, item.size);
                self.record(format!("New {kind} added"), user_name);
                Some(CollabEvent::ItemAdded { id })
            }
            CollaborationMessage::ItemUpdate {
                item_id,
                item,
                user_name,
            } => {
                if !wb.state().contains(&item_id) {
                    log::debug!("item_update for unknown item {}", item_id);
                    return None;
                }
                wb.update_item_position(&item_id, item.position);
                self.record("Item updated".to_string(), user_name);
                Some(CollabEvent::ItemUpdated { id: item_id })
            }
            CollaborationMessage::ItemDelete { item_id, user_name } => {
                if !wb.delete_item(&item_id) {
                    return None;
                }
                self.record("Item deleted".to_string(), user_name);
                Some(CollabEvent::ItemDeleted { id: item_id })
            }
        }
    }

    fn record(&mut self, what: String, user_name: Option<String>) {
        let entry = match user_name {
            Some(name) => format!("{what} by {name}"),
            None => what,
        };
        self.activity.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_wire_format() {
        let msg = CollaborationMessage::CursorMove {
            user_id: "u1".to_string(),
            cursor_position: Point::new(3.0, 4.0),
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({"type": "cursor_move", "userId": "u1", "cursorPosition": {"x": 3.0, "y": 4.0}})
        );
    }

    #[test]
    fn test_user_presence() {
        let mut wb = Whiteboard::new();
        let mut collab = CollaborationManager::new();

        let join = r##"{"type": "user_join", "userId": "u1", "userName": "Ada", "userColor": "#4ecdc4"}"##;
        assert_eq!(
            collab.handle_message(&mut wb, join),
            Some(CollabEvent::UserJoined { user_id: "u1".to_string() })
        );
        assert_eq!(collab.users().len(), 1);

        let cursor = r#"{"type": "cursor_move", "userId": "u1", "cursorPosition": {"x": 40, "y": 50}}"#;
        collab.handle_message(&mut wb, cursor);
        assert_eq!(collab.user("u1").unwrap().cursor, Point::new(40.0, 50.0));

        collab.handle_message(&mut wb, r#"{"type": "user_leave", "userId": "u1"}"#);
        assert!(collab.users().is_empty());
        assert_eq!(collab.activity().len(), 2);
    }

    #[test]
    fn test_cursor_move_never_touches_document() {
        let mut wb = Whiteboard::new();
        wb.add_item(ItemKind::Rectangle, Point::ZERO, None);
        let before = wb.snapshot();
        let history_len = wb.state().history().len();

        let mut collab = CollaborationManager::new();
        collab.handle_message(&mut wb, r##"{"type": "user_join", "userId": "u1", "userName": "Ada", "userColor": "#fff"}"##);
        collab.handle_message(&mut wb, r#"{"type": "cursor_move", "userId": "u1", "cursorPosition": {"x": 1, "y": 1}}"#);

        assert_eq!(wb.snapshot(), before);
        assert_eq!(wb.state().history().len(), history_len);
    }

    #[test]
    fn test_remote_item_operations() {
        let mut wb = Whiteboard::new();
        let mut collab = CollaborationManager::new();

        let add = r#"{"type": "item_add", "userName": "Bob",
            "item": {"type": "circle", "position": {"x": 10, "y": 20}, "content": "ignored"}}"#;
        let Some(CollabEvent::ItemAdded { id }) = collab.handle_message(&mut wb, add) else {
            panic!("expected item_add to add an item");
        };
        assert_eq!(wb.state().get_item(&id).unwrap().size, Size::new(150.0, 100.0));
        assert_eq!(collab.activity().last().unwrap(), "New circle added by Bob");

        let update = json!({"type": "item_update", "itemId": id, "item": {"position": {"x": 70, "y": 80}}});
        collab.handle_message(&mut wb, &update.to_string());
        assert_eq!(wb.state().get_item(&id).unwrap().position, Point::new(70.0, 80.0));

        let delete = json!({"type": "item_delete", "itemId": id});
        assert_eq!(
            collab.handle_message(&mut wb, &delete.to_string()),
            Some(CollabEvent::ItemDeleted { id: id.clone() })
        );
        assert!(wb.state().is_empty());

        // Stale ids are ignored.
        assert_eq!(collab.handle_message(&mut wb, &delete.to_string()), None);
    }

    #[test]
    fn test_remote_add_with_degenerate_size_is_clamped() {
        let mut wb = Whiteboard::new();
        let mut collab = CollaborationManager::new();
        let add = r#"{"type": "item_add",
            "item": {"type": "rectangle", "position": {"x": 0, "y": 0}, "size": {"width": -40, "height": 0}}}"#;
        let Some(CollabEvent::ItemAdded { id }) = collab.handle_message(&mut wb, add) else {
            panic!("expected item_add to add an item");
        };
        let size = wb.state().get_item(&id).unwrap().size;
        assert_eq!(size, Size::new(20.0, 20.0));
    }

    #[test]
    fn test_malformed_messages_ignored() {
        let mut wb = Whiteboard::new();
        let mut collab = CollaborationManager::new();
        assert_eq!(collab.handle_message(&mut wb, "not json"), None);
        assert_eq!(collab.handle_message(&mut wb, r#"{"type": "teleport"}"#), None);
        assert_eq!(
            collab.handle_message(&mut wb, r#"{"type": "item_add", "item": {"type": "hexagon", "position": {"x": 0, "y": 0}}}"#),
            None
        );
        assert!(wb.state().is_empty());
    }

    #[test]
    fn test_outgoing_queue() {
        let mut collab = CollaborationManager::new();
        let color = collab.announce_join("Ada").color.clone();
        assert!(USER_COLORS.iter().any(|c| *c == color));

        let item = Item::new(ItemKind::Text, Point::new(1.0, 2.0), None, 1);
        collab.broadcast_item_add(&item);
        collab.broadcast_cursor(Point::new(5.0, 5.0));
        collab.leave();

        let sent: Vec<CollaborationMessage> = collab
            .take_outgoing()
            .iter()
            .map(|json| serde_json::from_str(json).unwrap())
            .collect();
        assert_eq!(sent.len(), 4);
        assert!(matches!(&sent[0], CollaborationMessage::UserJoin { user_name, .. } if user_name == "Ada"));
        assert!(matches!(
            &sent[1],
            CollaborationMessage::ItemAdd { item, user_name: Some(name) }
                if item.kind == Some(ItemKind::Text) && name == "Ada"
        ));
        assert!(matches!(&sent[3], CollaborationMessage::UserLeave { .. }));
        assert!(!collab.has_outgoing());
        assert!(collab.local_user().is_none());
    }
}
