//! Document model: placed furniture items and the in-memory store.
//!
//! This module defines the item type that is both the in-memory record and the
//! wire shape of an exported layout (`Item`), and the runtime store that owns
//! the ordered collection plus the session's id and z-order counters
//! (`DocStore`).
//!
//! Data flows into this layer from the input engine (mutations), from presets
//! and from imported documents (wholesale replacement). The renderer reads
//! `sorted_items` to determine paint order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::furniture::{FurnitureKind, Rotation};
use crate::layout::{self, Size};

/// Unique identifier for a placed item.
pub type ItemId = u32;

fn default_scale() -> f64 {
    1.0
}

/// A placed furniture item as stored in the document and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, stable for the item's lifetime.
    pub id: ItemId,
    /// Furniture kind; selects base size and silhouette.
    #[serde(rename = "type")]
    pub kind: FurnitureKind,
    /// Left edge in world coordinates.
    pub x: i32,
    /// Top edge in world coordinates.
    pub y: i32,
    /// Fill color as a CSS hex string.
    pub color: String,
    /// Quarter-turn rotation.
    #[serde(default)]
    pub rot: Rotation,
    /// Size multiplier applied to the base footprint.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Stacking order within the item's layer.
    #[serde(default)]
    pub z: i64,
}

impl Item {
    /// A new unrotated, unscaled item.
    #[must_use]
    pub fn new(id: ItemId, kind: FurnitureKind, x: i32, y: i32, color: impl Into<String>, z: i64) -> Self {
        Self { id, kind, x, y, color: color.into(), rot: Rotation::Deg0, scale: 1.0, z }
    }

    /// Footprint after scale and rotation.
    #[must_use]
    pub fn size(&self) -> Size {
        layout::effective_size(self.kind, self.rot, self.scale)
    }

    /// Whether the item lies fully inside `room`.
    #[must_use]
    pub fn in_bounds(&self, room: Size) -> bool {
        let size = self.size();
        self.x >= 0 && self.y >= 0 && self.x + size.w <= room.w && self.y + size.h <= room.h
    }

    /// Whether the world point lies on the item's footprint.
    #[must_use]
    pub fn contains(&self, wx: f64, wy: f64) -> bool {
        let size = self.size();
        let (x, y) = (f64::from(self.x), f64::from(self.y));
        wx >= x && wx < x + f64::from(size.w) && wy >= y && wy < y + f64::from(size.h)
    }

    /// This item with its position re-clamped into `room` for its current size.
    #[must_use]
    pub fn clamped(mut self, room: Size) -> Self {
        let (x, y) = layout::clamp_position(self.x, self.y, self.size(), room);
        self.x = x;
        self.y = y;
        self
    }

    /// This item with its scale forced into range and its position re-clamped.
    #[must_use]
    pub fn normalized(mut self, room: Size) -> Self {
        self.scale = if self.scale.is_finite() { layout::clamp_scale(self.scale) } else { 1.0 };
        self.clamped(room)
    }

    /// Paint-order key: floor layer first, then ascending z.
    fn layer_key(&self) -> (bool, i64) {
        (!self.kind.is_rug(), self.z)
    }
}

/// In-memory store of placed items plus the session counters.
///
/// Items keep their insertion order; updates replace an item in place so that
/// ties in z resolve by collection order.
#[derive(Debug, Clone)]
pub struct DocStore {
    items: Vec<Item>,
    next_id: ItemId,
    next_z: i64,
}

impl DocStore {
    /// Create an empty store with both counters at 1.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new(), next_id: 1, next_z: 1 }
    }

    /// Create a store holding `items`, with counters past every existing id and z.
    #[must_use]
    pub fn with_items(items: Vec<Item>) -> Self {
        let mut store = Self::new();
        store.replace_all(items);
        store
    }

    /// Append an item. The id counter is advanced past its id if needed.
    pub fn insert(&mut self, item: Item) {
        self.next_id = self.next_id.max(item.id.saturating_add(1));
        self.next_z = self.next_z.max(item.z.saturating_add(1));
        self.items.push(item);
    }

    /// Remove an item by id, returning it if it was present.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let idx = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(idx))
    }

    /// Return a reference to an item by id.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Commit a new version of an existing item, keeping its collection slot.
    /// Returns false if no item has that id.
    pub fn replace(&mut self, item: Item) -> bool {
        let Some(slot) = self.items.iter_mut().find(|existing| existing.id == item.id) else {
            return false;
        };
        *slot = item;
        true
    }

    /// Replace the whole collection. Counters restart past the new maxima.
    pub fn replace_all(&mut self, items: Vec<Item>) {
        self.next_id = items.iter().map(|item| item.id).max().map_or(1, |max| max.saturating_add(1));
        self.next_z = items.iter().map(|item| item.z).max().map_or(1, |max| max.saturating_add(1));
        self.items = items;
    }

    /// Take the next item id.
    pub fn alloc_id(&mut self) -> ItemId {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Take the next z value; strictly above every z handed out so far.
    ///
    /// Saturates at `i64::MAX`. Imported z values are bounded by
    /// [`crate::consts::Z_LIMIT`], so the counter stays far below that.
    pub fn alloc_z(&mut self) -> i64 {
        let z = self.next_z;
        self.next_z = self.next_z.saturating_add(1);
        z
    }

    /// The id the next created item will receive.
    #[must_use]
    pub fn peek_next_id(&self) -> ItemId {
        self.next_id
    }

    /// The z value the next raised or created item will receive.
    #[must_use]
    pub fn peek_next_z(&self) -> i64 {
        self.next_z
    }

    /// All items in collection order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// All items in paint order: rugs first, then ascending z, stable on
    /// collection order.
    #[must_use]
    pub fn sorted_items(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.iter().collect();
        items.sort_by_key(|item| item.layer_key());
        items
    }

    /// Number of items currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}
