//! Whiteboard Core Library
//!
//! Platform-agnostic document engine for the whiteboard: the item model, the
//! reducer-based document store, snapshot history and the drag/resize/edit
//! interaction state machine.

pub mod action;
pub mod collaboration;
pub mod config;
pub mod document;
pub mod error;
pub mod handles;
pub mod history;
pub mod import;
pub mod interaction;
pub mod items;
pub mod shortcuts;
pub mod whiteboard;

pub use action::Action;
pub use collaboration::{CollabEvent, CollaborationManager, CollaborationMessage, RemoteUser};
pub use config::{DOUBLE_CLICK_MS, EngineConfig, MIN_ITEM_SIZE};
pub use document::{DocumentState, Snapshot, reduce};
pub use error::{EngineError, EngineResult, ImportError};
pub use handles::{ResizeHandle, ResizeOrigin, apply_resize};
pub use history::History;
pub use import::{ImageFormat, ImageSource, ImportReport, SkipReason, parse_batch};
pub use interaction::{EditSession, Interaction, InteractionCoordinator, PointerDown};
pub use items::{Color, Item, ItemId, ItemKind, ItemProperty, ItemStyle};
pub use shortcuts::{Command, Modifiers, Shortcut, ShortcutRegistry};
pub use whiteboard::Whiteboard;

// Re-export kurbo geometry used throughout the public API.
pub use kurbo::{Point, Rect, Size, Vec2};
