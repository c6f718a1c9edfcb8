//! Input model: modifier keys, mouse buttons, keys, and the gesture state machine.
//!
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up. Only one gesture exists at a time; the host captures the
//! pointer on press so every later move and release belongs to it.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::ItemId;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"ArrowLeft"`, `"Delete"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Grid-unit direction for arrow keys, `None` for everything else.
    #[must_use]
    pub fn arrow_direction(&self) -> Option<(i32, i32)> {
        match self.0.as_str() {
            "ArrowLeft" => Some((-1, 0)),
            "ArrowRight" => Some((1, 0)),
            "ArrowUp" => Some((0, -1)),
            "ArrowDown" => Some((0, 1)),
            _ => None,
        }
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected item, if any.
    pub selected_id: Option<ItemId>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// An item was pressed but the pointer has not yet travelled far enough to drag.
    Pressed {
        /// Id of the pressed item.
        id: ItemId,
        /// Item position minus pointer position, in world units.
        offset: Point,
        /// World-space pointer position at pointer-down.
        start_world: Point,
    },
    /// The user is moving an item across the room.
    Dragging {
        /// Id of the item being dragged.
        id: ItemId,
        /// Item position minus pointer position, in world units.
        offset: Point,
    },
    /// The user is growing or shrinking a rug by its corner handle.
    Resizing {
        /// Id of the item being resized.
        id: ItemId,
        /// World-space pointer position at the previous event.
        last_world: Point,
    },
}

impl InputState {
    /// The item owning the active gesture, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<ItemId> {
        match self {
            Self::Idle => None,
            Self::Pressed { id, .. } | Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(*id),
        }
    }

    /// Whether an item is actively being moved.
    #[must_use]
    pub fn is_dragging(&self, item: ItemId) -> bool {
        matches!(self, Self::Dragging { id, .. } if *id == item)
    }
}
