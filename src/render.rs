//! Rendering: draws the room and its furniture to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only [`ItemView`] list in paint order and produces
//! pixels; it does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::{FRAC_PI_2, PI};

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{BRAND, HANDLE_SIZE_PX, OUTLINE};
use crate::doc::{Item, ItemId};
use crate::furniture::{FurnitureKind, Rotation};
use crate::layout::Size;

/// Grid line color.
const GRID_STROKE: &str = "rgba(0,0,0,0.04)";

/// Opacity of an item while it is being dragged.
const DRAG_ALPHA: f64 = 0.85;

/// Everything the renderer needs to draw one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemView {
    pub id: ItemId,
    pub kind: FurnitureKind,
    pub x: i32,
    pub y: i32,
    /// Footprint after scale and rotation.
    pub size: Size,
    pub rotation: Rotation,
    pub color: String,
    pub selected: bool,
    pub dragging: bool,
    /// Whether to draw the corner resize handle.
    pub resize_handle: bool,
}

impl ItemView {
    #[must_use]
    pub fn new(item: &Item, selected: bool, dragging: bool) -> Self {
        Self {
            id: item.id,
            kind: item.kind,
            x: item.x,
            y: item.y,
            size: item.size(),
            rotation: item.rot,
            color: item.color.clone(),
            selected,
            dragging,
            resize_handle: selected && item.kind.has_resize_handle(),
        }
    }

    /// The footprint before the rotation swap, i.e. the silhouette's own frame.
    #[must_use]
    pub fn local_size(&self) -> Size {
        if self.rotation.swaps_axes() { self.size.swapped() } else { self.size }
    }
}

/// Draw the full scene: floor, grid, items, and selection UI.
///
/// `zoom` maps world units to CSS pixels; `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &[ItemView],
    room: Size,
    grid: i32,
    zoom: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    let scale = zoom * dpr;
    ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0)?;

    // Layer 1: floor and grid.
    let (w, h) = (f64::from(room.w), f64::from(room.h));
    ctx.clear_rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str("#FFFFFF");
    ctx.fill_rect(0.0, 0.0, w, h);
    draw_grid(ctx, room, grid, zoom);

    // Layer 2: items, already in paint order.
    for view in scene {
        draw_item(ctx, view)?;
    }

    // Layer 3: selection UI above everything.
    for view in scene.iter().filter(|v| v.selected) {
        draw_selection(ctx, view, zoom);
    }

    Ok(())
}

fn draw_grid(ctx: &CanvasRenderingContext2d, room: Size, grid: i32, zoom: f64) {
    if grid <= 0 {
        return;
    }
    let step = usize::try_from(grid).unwrap_or(1);
    let (w, h) = (f64::from(room.w), f64::from(room.h));
    ctx.set_stroke_style_str(GRID_STROKE);
    ctx.set_line_width(1.0 / zoom);
    ctx.begin_path();
    for x in (0..=room.w).step_by(step) {
        ctx.move_to(f64::from(x), 0.0);
        ctx.line_to(f64::from(x), h);
    }
    for y in (0..=room.h).step_by(step) {
        ctx.move_to(0.0, f64::from(y));
        ctx.line_to(w, f64::from(y));
    }
    ctx.stroke();
}

// =============================================================
// Item dispatch
// =============================================================

fn draw_item(ctx: &CanvasRenderingContext2d, view: &ItemView) -> Result<(), JsValue> {
    let local = view.local_size();
    let (lw, lh) = (f64::from(local.w), f64::from(local.h));
    let cx = f64::from(view.x) + f64::from(view.size.w) / 2.0;
    let cy = f64::from(view.y) + f64::from(view.size.h) / 2.0;

    ctx.save();
    if view.dragging {
        ctx.set_global_alpha(DRAG_ALPHA);
    }
    ctx.translate(cx, cy)?;
    ctx.rotate(f64::from(view.rotation.degrees()).to_radians())?;
    ctx.translate(-lw / 2.0, -lh / 2.0)?;
    ctx.set_line_width(2.0);
    ctx.set_stroke_style_str(OUTLINE);

    let fill = view.color.as_str();
    let result = match view.kind {
        FurnitureKind::Bed => draw_bed(ctx, lw, lh, fill),
        FurnitureKind::Desk => draw_desk(ctx, lw, lh, fill),
        FurnitureKind::Chair => draw_chair(ctx, lw, lh, fill),
        FurnitureKind::Dresser => draw_dresser(ctx, lw, lh, fill),
        FurnitureKind::Bookshelf => draw_bookshelf(ctx, lw, lh, fill),
        FurnitureKind::Nightstand => draw_nightstand(ctx, lw, lh, fill),
        FurnitureKind::Lamp => draw_lamp(ctx, lw, lh, fill),
        FurnitureKind::Rug => draw_rug(ctx, lw, lh, fill),
        FurnitureKind::Plant => draw_plant(ctx, lw, lh, fill),
    };
    ctx.restore();
    result
}

fn draw_selection(ctx: &CanvasRenderingContext2d, view: &ItemView, zoom: f64) {
    let (x, y) = (f64::from(view.x), f64::from(view.y));
    let (w, h) = (f64::from(view.size.w), f64::from(view.size.h));
    ctx.set_stroke_style_str(BRAND);
    ctx.set_line_width(2.0 / zoom);
    ctx.stroke_rect(x, y, w, h);

    if view.resize_handle {
        let side = HANDLE_SIZE_PX / zoom;
        ctx.set_fill_style_str(BRAND);
        ctx.fill_rect(x + w - side, y + h - side, side, side);
    }
}

// =============================================================
// Silhouettes (local frame: origin top-left, w x h)
// =============================================================

fn rounded_rect(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    r: f64,
) -> Result<(), JsValue> {
    let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r)?;
    ctx.arc_to(x + w, y + h, x, y + h, r)?;
    ctx.arc_to(x, y + h, x, y, r)?;
    ctx.arc_to(x, y, x + w, y, r)?;
    ctx.close_path();
    Ok(())
}

fn fill_and_stroke(ctx: &CanvasRenderingContext2d, fill: &str) {
    ctx.set_fill_style_str(fill);
    ctx.fill();
    ctx.stroke();
}

fn draw_bed(ctx: &CanvasRenderingContext2d, w: f64, h: f64, fill: &str) -> Result<(), JsValue> {
    rounded_rect(ctx, 2.0, 2.0, w - 4.0, h - 4.0, h * 0.12)?;
    fill_and_stroke(ctx, fill);
    // Headboard band and pillow.
    let base_alpha = ctx.global_alpha();
    ctx.set_global_alpha(base_alpha * 0.5);
    ctx.set_fill_style_str("#FFFFFF");
    ctx.fill_rect(2.0, 2.0, w - 4.0, h * 0.18);
    ctx.set_global_alpha(base_alpha);
    rounded_rect(ctx, w * 0.07, h * 0.22, w * 0.27, h * 0.24, 6.0)?;
    fill_and_stroke(ctx, "#FFFFFF");
    Ok(())
}

fn draw_desk(ctx: &CanvasRenderingContext2d, w: f64, h: f64, fill: &str) -> Result<(), JsValue> {
    rounded_rect(ctx, 3.0, h * 0.12, w - 6.0, h * 0.25, 6.0)?;
    fill_and_stroke(ctx, fill);
    ctx.set_fill_style_str(OUTLINE);
    let base_alpha = ctx.global_alpha();
    ctx.set_global_alpha(base_alpha * 0.7);
    ctx.fill_rect(w * 0.07, h * 0.37, w * 0.05, h * 0.5);
    ctx.fill_rect(w * 0.88, h * 0.37, w * 0.05, h * 0.5);
    ctx.set_global_alpha(base_alpha);
    Ok(())
}

fn draw_chair(ctx: &CanvasRenderingContext2d, w: f64, h: f64, fill: &str) -> Result<(), JsValue> {
    rounded_rect(ctx, w * 0.27, h * 0.1, w * 0.45, h * 0.22, 4.0)?;
    fill_and_stroke(ctx, fill);
    rounded_rect(ctx, w * 0.22, h * 0.38, w * 0.55, h * 0.22, 4.0)?;
    fill_and_stroke(ctx, fill);
    Ok(())
}

fn draw_dresser(ctx: &CanvasRenderingContext2d, w: f64, h: f64, fill: &str) -> Result<(), JsValue> {
    rounded_rect(ctx, 2.0, 2.0, w - 4.0, h - 4.0, 6.0)?;
    fill_and_stroke(ctx, fill);
    ctx.begin_path();
    for i in 1..3 {
        let y = h * f64::from(i) / 3.0;
        ctx.move_to(6.0, y);
        ctx.line_to(w - 6.0, y);
    }
    ctx.stroke();
    Ok(())
}

fn draw_bookshelf(ctx: &CanvasRenderingContext2d, w: f64, h: f64, fill: &str) -> Result<(), JsValue> {
    rounded_rect(ctx, 2.0, 2.0, w - 4.0, h - 4.0, 4.0)?;
    fill_and_stroke(ctx, fill);
    ctx.begin_path();
    for i in 1..5 {
        let y = h * f64::from(i) / 5.0;
        ctx.move_to(4.0, y);
        ctx.line_to(w - 4.0, y);
    }
    ctx.stroke();
    Ok(())
}

fn draw_nightstand(ctx: &CanvasRenderingContext2d, w: f64, h: f64, fill: &str) -> Result<(), JsValue> {
    rounded_rect(ctx, 2.0, 2.0, w - 4.0, h - 4.0, 6.0)?;
    fill_and_stroke(ctx, fill);
    ctx.begin_path();
    ctx.arc(w / 2.0, h * 0.55, 3.0, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str(OUTLINE);
    ctx.fill();
    Ok(())
}

fn draw_lamp(ctx: &CanvasRenderingContext2d, w: f64, h: f64, fill: &str) -> Result<(), JsValue> {
    let r = w.min(h) * 0.4;
    ctx.begin_path();
    ctx.arc(w / 2.0, h / 2.0, r, 0.0, 2.0 * PI)?;
    fill_and_stroke(ctx, fill);
    ctx.begin_path();
    ctx.arc(w / 2.0, h / 2.0, r * 0.35, -FRAC_PI_2, 3.0 * FRAC_PI_2)?;
    fill_and_stroke(ctx, "#FFFFFF");
    Ok(())
}

fn draw_rug(ctx: &CanvasRenderingContext2d, w: f64, h: f64, fill: &str) -> Result<(), JsValue> {
    rounded_rect(ctx, 2.0, 2.0, w - 4.0, h - 4.0, 16.0)?;
    fill_and_stroke(ctx, fill);
    let base_alpha = ctx.global_alpha();
    ctx.set_global_alpha(base_alpha * 0.12);
    rounded_rect(ctx, w * 0.08, h * 0.13, w * 0.84, h * 0.74, 12.0)?;
    ctx.set_fill_style_str("#FFFFFF");
    ctx.fill();
    ctx.set_global_alpha(base_alpha);
    Ok(())
}

fn draw_plant(ctx: &CanvasRenderingContext2d, w: f64, h: f64, fill: &str) -> Result<(), JsValue> {
    // Leaves.
    ctx.set_fill_style_str("#8DB38B");
    for (fx, fy) in [(0.38, 0.3), (0.62, 0.3), (0.5, 0.18)] {
        ctx.begin_path();
        ctx.arc(w * fx, h * fy, w.min(h) * 0.16, 0.0, 2.0 * PI)?;
        ctx.fill();
    }
    // Pot.
    rounded_rect(ctx, w * 0.35, h * 0.57, w * 0.3, h * 0.23, 4.0)?;
    fill_and_stroke(ctx, fill);
    Ok(())
}
