#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::HANDLE_SIZE_PX;
use crate::doc::{DocStore, Item, ItemId};

/// Which part of an item was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub item_id: ItemId,
    pub part: HitPart,
}

/// World-space square of the resize handle in an item's bottom-right corner,
/// as `(left, top, side)`.
#[must_use]
pub fn resize_handle_rect(item: &Item, camera: &Camera) -> (f64, f64, f64) {
    let side = camera.screen_dist_to_world(HANDLE_SIZE_PX);
    let size = item.size();
    let right = f64::from(item.x + size.w);
    let bottom = f64::from(item.y + size.h);
    (right - side, bottom - side, side)
}

/// Test which item (if any) is under `world_pt`.
///
/// The selected item's resize handle wins over everything; otherwise the
/// topmost item in paint order is hit.
#[must_use]
pub fn hit_test(world_pt: Point, doc: &DocStore, camera: &Camera, selected_id: Option<ItemId>) -> Option<Hit> {
    if let Some(item) = selected_id.and_then(|id| doc.get(id)) {
        if item.kind.has_resize_handle() {
            let (left, top, side) = resize_handle_rect(item, camera);
            let on_handle =
                world_pt.x >= left && world_pt.x <= left + side && world_pt.y >= top && world_pt.y <= top + side;
            if on_handle {
                return Some(Hit { item_id: item.id, part: HitPart::ResizeHandle });
            }
        }
    }

    doc.sorted_items()
        .into_iter()
        .rev()
        .find(|item| item.contains(world_pt.x, world_pt.y))
        .map(|item| Hit { item_id: item.id, part: HitPart::Body })
}
