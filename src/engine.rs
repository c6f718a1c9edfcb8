use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::config::DesignerConfig;
use crate::consts::{ADD_ORIGIN, ADD_STEP, PALETTE, RESIZE_SENSITIVITY};
use crate::doc::{DocStore, Item, ItemId};
use crate::furniture::FurnitureKind;
use crate::hit::{self, Hit, HitPart};
use crate::input::{Button, InputState, Key, Modifiers, UiState};
use crate::layout::{self, Size, Snapping};
use crate::preset::{self, Preset};
use crate::render::{self, ItemView};
use crate::serial::{self, Clipboard, ClipboardError};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// User-visible outcome of an export or import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The layout document is on the clipboard.
    Exported,
    /// The layout could not be serialized.
    ExportFailed(String),
    /// The clipboard refused the document; the layout is unchanged.
    ClipboardUnavailable(String),
    /// The pasted document was rejected; the layout is unchanged.
    ImportFailed(String),
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ItemCreated(Item),
    ItemUpdated(Item),
    ItemDeleted { id: ItemId },
    SelectionChanged(Option<ItemId>),
    /// The whole collection was swapped (preset, import, reset).
    LayoutReplaced,
    SetCursor(String),
    Notify(Notice),
    RenderNeeded,
}

/// Core engine state: all logic that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: DocStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub config: DesignerConfig,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(DesignerConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with the initial layout in a room described by `config`.
    #[must_use]
    pub fn with_config(config: DesignerConfig) -> Self {
        Self {
            doc: DocStore::with_items(preset::initial_layout(config.room())),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            config,
        }
    }

    /// Room dimensions in world units.
    #[must_use]
    pub fn room(&self) -> Size {
        self.config.room()
    }

    /// Update the on-screen placement of the surface. Zoom follows the width.
    pub fn set_surface(&mut self, left: f64, top: f64, width: f64) {
        self.camera = Camera::fit(left, top, width, self.config.room_width);
    }

    // --- Toolbar controls ---

    /// Append a new item of `kind` at its cascade position and select it.
    pub fn add_item(&mut self, kind: FurnitureKind) -> Vec<Action> {
        let room = self.room();
        let id = self.doc.alloc_id();
        let z = self.doc.alloc_z();
        let offset = i32::try_from(id).map_or(i32::MAX, |id| id.saturating_mul(ADD_STEP));
        let origin = ADD_ORIGIN.saturating_add(offset);
        let color = PALETTE[usize::try_from(id).unwrap_or(0) % PALETTE.len()];
        let item = Item::new(id, kind, origin, origin, color, z).clamped(room);

        log::debug!("add {kind:?} id={id} at ({}, {})", item.x, item.y);
        self.doc.insert(item.clone());

        let mut actions = vec![Action::ItemCreated(item)];
        actions.extend(self.select(Some(id)));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Remove the selected item. No-op without a selection.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        match self.ui.selected_id {
            Some(id) => self.delete(id),
            None => Vec::new(),
        }
    }

    /// Remove an item by id. Clears the selection only if it pointed at this item.
    pub fn delete(&mut self, id: ItemId) -> Vec<Action> {
        if self.doc.remove(id).is_none() {
            return Vec::new();
        }
        if self.input.active_id() == Some(id) {
            self.input = InputState::Idle;
        }
        let mut actions = vec![Action::ItemDeleted { id }];
        if self.ui.selected_id == Some(id) {
            actions.extend(self.select(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Turn the selected item a quarter turn clockwise.
    pub fn rotate_selected(&mut self) -> Vec<Action> {
        self.update_selected(|item| item.rot = item.rot.next())
    }

    /// Set the selected item's scale, clamped into range.
    pub fn set_scale(&mut self, scale: f64) -> Vec<Action> {
        if !scale.is_finite() {
            return Vec::new();
        }
        self.update_selected(|item| item.scale = layout::clamp_scale(scale))
    }

    /// Set the selected item's fill color.
    pub fn set_color(&mut self, color: &str) -> Vec<Action> {
        self.update_selected(|item| item.color = color.to_string())
    }

    /// Switch the selected item to another furniture kind.
    pub fn set_kind(&mut self, kind: FurnitureKind) -> Vec<Action> {
        self.update_selected(|item| item.kind = kind)
    }

    /// Raise the selected item above every other item.
    pub fn bring_forward(&mut self) -> Vec<Action> {
        if self.ui.selected_id.is_none() {
            return Vec::new();
        }
        let z = self.doc.alloc_z();
        self.update_selected(|item| item.z = z)
    }

    /// Lower the selected item's z by one. Equal z values are left unresolved.
    pub fn send_backward(&mut self) -> Vec<Action> {
        self.update_selected(|item| item.z = item.z.saturating_sub(1))
    }

    /// Restore the initial layout.
    pub fn reset(&mut self) -> Vec<Action> {
        log::info!("reset to initial layout");
        self.replace_layout(preset::initial_layout(self.room()))
    }

    /// Replace the collection with a named arrangement.
    pub fn apply_preset(&mut self, preset: Preset) -> Vec<Action> {
        log::info!("apply preset {}", preset.label());
        self.replace_layout(preset::generate(preset, self.room()))
    }

    // --- Export / import ---

    /// The current layout as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the layout cannot be serialized.
    pub fn export_text(&self) -> Result<String, serde_json::Error> {
        serial::export_layout(self.doc.items())
    }

    /// Place the layout document on `clipboard` and report the outcome.
    pub fn export_layout(&self, clipboard: &mut dyn Clipboard) -> Vec<Action> {
        let text = match self.export_text() {
            Ok(text) => text,
            Err(e) => {
                log::warn!("export failed: {e}");
                return vec![Action::Notify(Notice::ExportFailed(e.to_string()))];
            }
        };
        match clipboard.write_text(&text) {
            Ok(()) => {
                log::info!("exported {} items", self.doc.len());
                vec![Action::Notify(Notice::Exported)]
            }
            Err(ClipboardError(reason)) => {
                log::warn!("clipboard unavailable: {reason}");
                vec![Action::Notify(Notice::ClipboardUnavailable(reason))]
            }
        }
    }

    /// Replace the collection with a pasted layout document.
    ///
    /// A rejected document leaves every item, the selection, and the counters untouched.
    pub fn import_layout(&mut self, text: &str) -> Vec<Action> {
        match serial::import_layout(text, self.room()) {
            Ok(items) => {
                log::info!("imported {} items", items.len());
                self.replace_layout(items)
            }
            Err(e) => {
                log::warn!("import rejected: {e}");
                vec![Action::Notify(Notice::ImportFailed(e.to_string()))]
            }
        }
    }

    // --- Input events ---

    /// Pointer pressed on the surface.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen_pt);
        match hit::hit_test(world, &self.doc, &self.camera, self.ui.selected_id) {
            Some(Hit { item_id, part: HitPart::ResizeHandle }) => {
                log::debug!("resize start id={item_id}");
                self.input = InputState::Resizing { id: item_id, last_world: world };
                vec![Action::SetCursor("nwse-resize".into())]
            }
            Some(Hit { item_id, part: HitPart::Body }) => self.press_item(item_id, world),
            None => {
                self.input = InputState::Idle;
                let mut actions: Vec<Action> = self.select(None).into_iter().collect();
                if !actions.is_empty() {
                    actions.push(Action::RenderNeeded);
                }
                actions
            }
        }
    }

    /// Pointer moved while over (or captured by) the surface.
    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);
        match self.input.clone() {
            InputState::Idle => Vec::new(),
            InputState::Pressed { id, offset, start_world } => {
                if world.distance(start_world) < self.config.drag_threshold {
                    return Vec::new();
                }
                log::debug!("drag start id={id}");
                self.input = InputState::Dragging { id, offset };
                self.drag_to(id, offset, world)
            }
            InputState::Dragging { id, offset } => self.drag_to(id, offset, world),
            InputState::Resizing { id, last_world } => {
                self.input = InputState::Resizing { id, last_world: world };
                let travel = (world.x - last_world.x) + (world.y - last_world.y);
                self.resize_by(id, travel)
            }
        }
    }

    /// Pointer released. The last committed position stands.
    pub fn on_pointer_up(&mut self, _screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.end_gesture()
    }

    /// Pointer left the surface; ends the gesture like a release.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    /// Keyboard shortcuts for the selected item.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if let Some((dx, dy)) = key.arrow_direction() {
            let factor = if modifiers.shift { self.config.nudge_multiplier } else { 1 };
            let step = self.config.grid_size.saturating_mul(factor);
            return self.nudge(dx.saturating_mul(step), dy.saturating_mul(step));
        }
        if modifiers.ctrl || modifiers.meta {
            return Vec::new();
        }
        match key.0.as_str() {
            "Delete" | "Backspace" => self.delete_selected(),
            "Escape" => {
                let mut actions: Vec<Action> = self.select(None).into_iter().collect();
                if !actions.is_empty() {
                    actions.push(Action::RenderNeeded);
                }
                actions
            }
            "r" | "R" => self.rotate_selected(),
            "]" => self.bring_forward(),
            "[" => self.send_backward(),
            _ => Vec::new(),
        }
    }

    // --- Queries ---

    /// The currently selected item, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ItemId> {
        self.ui.selected_id
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Look up an item by ID.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.doc.get(id)
    }

    /// All items in collection order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.doc.items()
    }

    /// Per-item draw data in paint order.
    #[must_use]
    pub fn scene(&self) -> Vec<ItemView> {
        self.doc
            .sorted_items()
            .into_iter()
            .map(|item| {
                ItemView::new(item, self.ui.selected_id == Some(item.id), self.input.is_dragging(item.id))
            })
            .collect()
    }

    // --- Internals ---

    fn select(&mut self, id: Option<ItemId>) -> Option<Action> {
        if self.ui.selected_id == id {
            return None;
        }
        self.ui.selected_id = id;
        Some(Action::SelectionChanged(id))
    }

    /// Commit a new version of item `id` built by `edit`, re-clamped into the room.
    fn update_item(&mut self, id: ItemId, edit: impl FnOnce(&mut Item)) -> Option<Item> {
        let current = self.doc.get(id)?;
        let mut next = current.clone();
        edit(&mut next);
        let next = next.clamped(self.room());
        if next == *current {
            return None;
        }
        self.doc.replace(next.clone());
        Some(next)
    }

    fn update_selected(&mut self, edit: impl FnOnce(&mut Item)) -> Vec<Action> {
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };
        updated_actions(self.update_item(id, edit))
    }

    fn press_item(&mut self, id: ItemId, world: Point) -> Vec<Action> {
        let Some(item) = self.doc.get(id) else {
            return Vec::new();
        };
        let offset = Point::new(f64::from(item.x) - world.x, f64::from(item.y) - world.y);
        let z = self.doc.alloc_z();
        self.input = InputState::Pressed { id, offset, start_world: world };

        let mut actions = Vec::new();
        if let Some(raised) = self.update_item(id, |item| item.z = z) {
            actions.push(Action::ItemUpdated(raised));
        }
        actions.extend(self.select(Some(id)));
        actions.push(Action::SetCursor("grabbing".into()));
        actions.push(Action::RenderNeeded);
        actions
    }

    fn drag_to(&mut self, id: ItemId, offset: Point, world: Point) -> Vec<Action> {
        let Some(size) = self.doc.get(id).map(Item::size) else {
            return Vec::new();
        };
        let snapping = Snapping { grid: self.config.grid_size, magnet_threshold: self.config.magnet_threshold };
        let (x, y) = layout::place_dragged(world.x + offset.x, world.y + offset.y, size, self.room(), snapping);
        updated_actions(self.update_item(id, |item| {
            item.x = x;
            item.y = y;
        }))
    }

    fn resize_by(&mut self, id: ItemId, travel: f64) -> Vec<Action> {
        let growth = travel / RESIZE_SENSITIVITY;
        updated_actions(self.update_item(id, |item| item.scale = layout::clamp_scale(item.scale + growth)))
    }

    fn nudge(&mut self, dx: i32, dy: i32) -> Vec<Action> {
        self.update_selected(|item| {
            item.x = item.x.saturating_add(dx);
            item.y = item.y.saturating_add(dy);
        })
    }

    fn end_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            gesture => {
                log::debug!("gesture end {gesture:?}");
                vec![Action::SetCursor("default".into()), Action::RenderNeeded]
            }
        }
    }

    fn replace_layout(&mut self, items: Vec<Item>) -> Vec<Action> {
        self.doc.replace_all(items);
        self.input = InputState::Idle;
        let mut actions = vec![Action::LayoutReplaced];
        actions.extend(self.select(None));
        actions.push(Action::RenderNeeded);
        actions
    }
}

fn updated_actions(updated: Option<Item>) -> Vec<Action> {
    match updated {
        Some(item) => vec![Action::ItemUpdated(item), Action::RenderNeeded],
        None => Vec::new(),
    }
}

/// Clipboard backed by `navigator.clipboard.writeText`.
///
/// The write is fire-and-forget: the returned promise is not awaited, so a
/// later permission rejection surfaces only in the browser console.
pub struct BrowserClipboard;

impl Clipboard for BrowserClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let window = web_sys::window().ok_or_else(|| ClipboardError("no window".into()))?;
        let navigator = window.navigator();
        let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard")).map_err(js_error)?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(ClipboardError("navigator.clipboard is not available".into()));
        }
        let write_text: js_sys::Function = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;
        write_text.call1(&clipboard, &JsValue::from_str(text)).map_err(js_error)?;
        Ok(())
    }
}

fn js_error(value: JsValue) -> ClipboardError {
    ClipboardError(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn backing_px(css: f64, dpr: f64) -> u32 {
    (css * dpr).round().max(1.0) as u32
}

/// The full designer engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self::with_config(canvas, DesignerConfig::default())
    }

    #[must_use]
    pub fn with_config(canvas: HtmlCanvasElement, config: DesignerConfig) -> Self {
        Self { canvas, core: EngineCore::with_config(config) }
    }

    // --- Surface ---

    /// Re-read the canvas's on-screen rectangle and size its backing store.
    ///
    /// Must be called on mount and on every resize or scroll so pointer
    /// coordinates map correctly.
    pub fn sync_surface(&mut self) {
        let rect = self.canvas.get_bounding_client_rect();
        self.core.set_surface(rect.left(), rect.top(), rect.width());

        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio().max(1.0));
        let zoom = self.core.camera.zoom;
        let room = self.core.room();
        self.canvas.set_width(backing_px(f64::from(room.w) * zoom, dpr));
        self.canvas.set_height(backing_px(f64::from(room.h) * zoom, dpr));
    }

    // --- Delegated controls ---

    pub fn add_item(&mut self, kind: FurnitureKind) -> Vec<Action> {
        self.core.add_item(kind)
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        self.core.delete_selected()
    }

    pub fn rotate_selected(&mut self) -> Vec<Action> {
        self.core.rotate_selected()
    }

    pub fn set_scale(&mut self, scale: f64) -> Vec<Action> {
        self.core.set_scale(scale)
    }

    pub fn set_color(&mut self, color: &str) -> Vec<Action> {
        self.core.set_color(color)
    }

    pub fn set_kind(&mut self, kind: FurnitureKind) -> Vec<Action> {
        self.core.set_kind(kind)
    }

    pub fn bring_forward(&mut self) -> Vec<Action> {
        self.core.bring_forward()
    }

    pub fn send_backward(&mut self) -> Vec<Action> {
        self.core.send_backward()
    }

    pub fn reset(&mut self) -> Vec<Action> {
        self.core.reset()
    }

    pub fn apply_preset(&mut self, preset: Preset) -> Vec<Action> {
        self.core.apply_preset(preset)
    }

    /// Copy the layout document to the system clipboard.
    pub fn export_to_clipboard(&self) -> Vec<Action> {
        self.core.export_layout(&mut BrowserClipboard)
    }

    pub fn import_layout(&mut self, text: &str) -> Vec<Action> {
        self.core.import_layout(text)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.core.on_pointer_leave()
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio().max(1.0));
        render::draw(
            &ctx,
            &self.core.scene(),
            self.core.room(),
            self.core.config.grid_size,
            self.core.camera.zoom,
            dpr,
        )
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ItemId> {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.core.item(id)
    }
}
