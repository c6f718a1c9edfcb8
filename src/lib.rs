//! Layout engine and interaction controller for the dorm room designer.
//!
//! The crate compiles to WebAssembly and drives a single canvas that shows a
//! fixed-size room in plan view. It owns the furniture collection, turns raw
//! pointer and keyboard events into placement changes, and draws the scene.
//! The host page wires DOM events and toolbar buttons to [`engine::Engine`]
//! and reacts to the [`engine::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Placed items and the store holding them with the id/z counters |
//! | [`furniture`] | Furniture kinds, base footprints, and quarter-turn rotation |
//! | [`layout`] | Footprint math: clamping, grid snap, and wall magnet |
//! | [`preset`] | Named starter arrangements and the initial layout |
//! | [`serial`] | JSON layout export/import and the clipboard seam |
//! | [`camera`] | Surface placement, zoom, and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against items and the rug resize handle |
//! | [`render`] | Scene rendering to a 2D canvas context |
//! | [`config`] | Host-supplied room and interaction settings |
//! | [`consts`] | Shared constants (room size, grid, scale limits, palette) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod furniture;
pub mod hit;
pub mod input;
pub mod layout;
pub mod preset;
pub mod render;
pub mod serial;

/// Install the browser console as the `log` backend.
///
/// Call once from the host before constructing an [`engine::Engine`].
///
/// # Errors
///
/// Returns [`log::SetLoggerError`] if a logger is already installed.
#[cfg(feature = "console")]
pub fn init_console_logging(level: log::Level) -> Result<(), log::SetLoggerError> {
    console_log::init_with_level(level)
}
