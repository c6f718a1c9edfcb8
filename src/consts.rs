//! Shared numeric constants for the designer crate.

// ── Room ────────────────────────────────────────────────────────

/// Logical room width in world units.
pub const ROOM_WIDTH: i32 = 1200;

/// Logical room height in world units.
pub const ROOM_HEIGHT: i32 = 360;

// ── Placement ───────────────────────────────────────────────────

/// Grid pitch for drag snapping and keyboard nudges, in world units.
pub const GRID_SIZE: i32 = 10;

/// Distance from a room edge within which a dragged item sticks to the wall.
pub const MAGNET_THRESHOLD: i32 = 12;

/// World-space distance the pointer must travel before a press becomes a drag.
pub const DRAG_THRESHOLD: f64 = 6.0;

/// Step multiplier for a nudge with Shift held.
pub const NUDGE_MULTIPLIER: i32 = 4;

/// Base offset for the cascade position of newly added items.
pub const ADD_ORIGIN: i32 = 30;

/// Per-id step for the cascade position of newly added items.
pub const ADD_STEP: i32 = 10;

// ── Scale ───────────────────────────────────────────────────────

/// Smallest allowed item scale.
pub const SCALE_MIN: f64 = 0.6;

/// Largest allowed item scale.
pub const SCALE_MAX: f64 = 1.8;

/// World units of combined pointer travel that add 1.0 to a rug's scale.
pub const RESIZE_SENSITIVITY: f64 = 200.0;

// ── Layering ────────────────────────────────────────────────────

/// Largest z magnitude accepted from a layout document (the JavaScript safe
/// integer bound), leaving headroom for the z counter to keep increasing.
pub const Z_LIMIT: i64 = 9_007_199_254_740_991;

// ── Hit-testing ─────────────────────────────────────────────────

/// Side length of the rug resize handle, in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 16.0;

// ── Colors ──────────────────────────────────────────────────────

/// Fill palette for new items, indexed by id.
pub const PALETTE: [&str; 8] = [
    "#E6E6E6", "#EAE4D9", "#DFE9DA", "#DDE7F5", "#FCE2D9", "#CDC2AE", "#FFFFFF", "#DDD8CF",
];

/// Silhouette outline color.
pub const OUTLINE: &str = "#6b5f58";

/// Selection outline color.
pub const BRAND: &str = "#6f0500";
