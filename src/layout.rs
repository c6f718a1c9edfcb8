//! Pure placement geometry: effective footprints, bounds clamping, grid
//! snapping, and edge magnetism.
//!
//! Everything here is a total function over world-space integers (or `f64`
//! pointer coordinates on their way in). No function in this module touches
//! the document store; callers compute a new position here and then commit it.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::consts::{SCALE_MAX, SCALE_MIN};
use crate::furniture::{FurnitureKind, Rotation};

/// A width/height pair in world units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    #[must_use]
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// The same footprint turned a quarter turn.
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self { w: self.h, h: self.w }
    }
}

/// Round a world-space coordinate to the nearest whole pixel.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn round_px(value: f64) -> i32 {
    value.round() as i32
}

/// Footprint after scaling each base dimension and applying the rotation swap.
#[must_use]
pub fn effective_size(kind: FurnitureKind, rotation: Rotation, scale: f64) -> Size {
    let base = kind.base_size();
    let scaled = Size::new(round_px(f64::from(base.w) * scale), round_px(f64::from(base.h) * scale));
    if rotation.swaps_axes() { scaled.swapped() } else { scaled }
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike `Ord::clamp` this never panics: when `max < min` (an item wider than
/// the room) the result is `min`.
#[must_use]
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    let capped = if value > max { max } else { value };
    if capped < min { min } else { capped }
}

/// Round `value` to the nearest multiple of `grid`.
#[must_use]
pub fn snap(value: f64, grid: i32) -> i32 {
    if grid <= 0 {
        return round_px(value);
    }
    round_px(value / f64::from(grid)) * grid
}

/// Return `target` when `value` is within `threshold` of it, else `value`.
#[must_use]
pub fn magnet(value: i32, target: i32, threshold: i32) -> i32 {
    if (value - target).abs() <= threshold { target } else { value }
}

/// Clamp a scale multiplier into `[SCALE_MIN, SCALE_MAX]`.
#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    clamp(scale, SCALE_MIN, SCALE_MAX)
}

/// Largest legal top-left coordinate on each axis for a footprint of `size`.
#[must_use]
pub fn max_origin(size: Size, room: Size) -> (i32, i32) {
    (room.w - size.w, room.h - size.h)
}

/// Clamp a top-left position so a footprint of `size` stays inside `room`.
#[must_use]
pub fn clamp_position(x: i32, y: i32, size: Size, room: Size) -> (i32, i32) {
    let (max_x, max_y) = max_origin(size, room);
    (clamp(x, 0, max_x), clamp(y, 0, max_y))
}

/// Edge-aware placement settings for a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapping {
    pub grid: i32,
    pub magnet_threshold: i32,
}

/// Resolve a dragged item's world-space candidate into its committed position.
///
/// Pipeline per axis: clamp to bounds, snap to the grid, pull onto either wall
/// when within the magnet threshold, then clamp again so a snap past a
/// non-grid-aligned far edge cannot leave the room.
#[must_use]
pub fn place_dragged(candidate_x: f64, candidate_y: f64, size: Size, room: Size, snapping: Snapping) -> (i32, i32) {
    let (max_x, max_y) = max_origin(size, room);
    let x = place_axis(candidate_x, max_x, snapping);
    let y = place_axis(candidate_y, max_y, snapping);
    (x, y)
}

fn place_axis(candidate: f64, max: i32, snapping: Snapping) -> i32 {
    let bounded = clamp(candidate, 0.0, f64::from(max));
    let snapped = snap(bounded, snapping.grid);
    let near_start = magnet(snapped, 0, snapping.magnet_threshold);
    let near_end = magnet(near_start, max, snapping.magnet_threshold);
    clamp(near_end, 0, max)
}
