#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::SCALE_MAX;
use crate::furniture::Rotation;

const BED: ItemId = 1;
const DESK: ItemId = 2;
const CHAIR: ItemId = 3;
const PLANT: ItemId = 4;

fn core() -> EngineCore {
    EngineCore::new()
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn no_mods() -> Modifiers {
    Modifiers::default()
}

fn shift() -> Modifiers {
    Modifiers { shift: true, ..Modifiers::default() }
}

fn key(name: &str) -> Key {
    Key(name.into())
}

fn item(core: &EngineCore, id: ItemId) -> Item {
    core.item(id).cloned().unwrap()
}

fn all_in_bounds(core: &EngineCore) -> bool {
    let room = core.room();
    core.items().iter().all(|i| i.in_bounds(room))
}

fn press(core: &mut EngineCore, x: f64, y: f64) -> Vec<Action> {
    core.on_pointer_down(pt(x, y), Button::Primary, no_mods())
}

fn release(core: &mut EngineCore, x: f64, y: f64) -> Vec<Action> {
    core.on_pointer_up(pt(x, y), Button::Primary, no_mods())
}

#[derive(Default)]
struct MemoryClipboard {
    text: Option<String>,
    refuse: bool,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.refuse {
            return Err(ClipboardError("permission denied".into()));
        }
        self.text = Some(text.to_string());
        Ok(())
    }
}

// =============================================================
// Session start
// =============================================================

#[test]
fn starts_with_initial_layout() {
    let core = core();
    let kinds: Vec<FurnitureKind> = core.items().iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![FurnitureKind::Bed, FurnitureKind::Desk, FurnitureKind::Chair, FurnitureKind::Plant]
    );
    assert_eq!(core.selection(), None);
    assert_eq!(core.doc.peek_next_id(), 5);
    assert_eq!(core.doc.peek_next_z(), 5);
    assert!(all_in_bounds(&core));
}

#[test]
fn surface_fit_caps_zoom_at_one() {
    let mut core = core();
    core.set_surface(10.0, 20.0, 2400.0);
    assert_eq!(core.camera().zoom, 1.0);
    core.set_surface(10.0, 20.0, 600.0);
    assert_eq!(core.camera().zoom, 0.5);
}

// =============================================================
// Add
// =============================================================

#[test]
fn add_bed_lands_in_room_and_is_selected() {
    let mut core = core();
    let actions = core.add_item(FurnitureKind::Bed);

    let bed = item(&core, 5);
    assert_eq!((bed.x, bed.y), (80, 80));
    assert!((0..=960).contains(&bed.x));
    assert!((0..=230).contains(&bed.y));
    assert_eq!(bed.z, 5);
    assert_eq!(bed.scale, 1.0);
    assert_eq!(bed.rot, Rotation::Deg0);
    assert_eq!(bed.color, PALETTE[5]);
    assert_eq!(core.selection(), Some(5));

    assert_eq!(actions[0], Action::ItemCreated(bed));
    assert!(actions.contains(&Action::SelectionChanged(Some(5))));
    assert_eq!(core.doc.peek_next_id(), 6);
}

#[test]
fn add_far_down_the_cascade_is_clamped() {
    let mut core = core();
    core.doc.replace_all(Vec::new());
    for _ in 0..40 {
        core.add_item(FurnitureKind::Bookshelf);
    }
    assert_eq!(core.items().len(), 40);
    assert!(all_in_bounds(&core));
    let last = core.items().last().cloned().unwrap();
    assert_eq!(last.y, 360 - 180);
}

#[test]
fn added_ids_never_repeat_after_delete() {
    let mut core = core();
    core.add_item(FurnitureKind::Lamp);
    core.delete_selected();
    core.add_item(FurnitureKind::Lamp);
    assert_eq!(core.selection(), Some(6));
    assert!(core.item(5).is_none());
}

// =============================================================
// Selected-item controls
// =============================================================

#[test]
fn rotate_swaps_footprint_and_reclamps() {
    let mut core = core();
    let mut bed = item(&core, BED);
    bed.y = 220;
    core.doc.replace(bed);
    core.ui.selected_id = Some(BED);

    let actions = core.rotate_selected();
    let bed = item(&core, BED);
    assert_eq!(bed.rot, Rotation::Deg90);
    assert_eq!(bed.size(), Size::new(130, 240));
    assert_eq!(bed.y, 120);
    assert_eq!(actions, vec![Action::ItemUpdated(bed), Action::RenderNeeded]);
}

#[test]
fn four_rotations_return_to_start() {
    let mut core = core();
    core.ui.selected_id = Some(DESK);
    for _ in 0..4 {
        core.rotate_selected();
    }
    assert_eq!(item(&core, DESK).rot, Rotation::Deg0);
}

#[test]
fn scale_is_clamped_into_range() {
    let mut core = core();
    core.ui.selected_id = Some(CHAIR);
    core.set_scale(2.5);
    assert_eq!(item(&core, CHAIR).scale, SCALE_MAX);
    core.set_scale(0.1);
    assert_eq!(item(&core, CHAIR).scale, 0.6);
    assert!(all_in_bounds(&core));
}

#[test]
fn scale_ignores_non_finite_values() {
    let mut core = core();
    core.ui.selected_id = Some(CHAIR);
    assert!(core.set_scale(f64::NAN).is_empty());
    assert_eq!(item(&core, CHAIR).scale, 1.0);
}

#[test]
fn recolor_and_change_kind() {
    let mut core = core();
    core.ui.selected_id = Some(PLANT);
    core.set_color("#123456");
    core.set_kind(FurnitureKind::Bookshelf);
    let plant = item(&core, PLANT);
    assert_eq!(plant.color, "#123456");
    assert_eq!(plant.kind, FurnitureKind::Bookshelf);
    // A bookshelf is taller than the plant was; the taller footprint is pulled back in.
    assert_eq!(plant.y, 360 - 180);
}

#[test]
fn controls_without_selection_do_nothing() {
    let mut core = core();
    let before = core.items().to_vec();
    assert!(core.rotate_selected().is_empty());
    assert!(core.set_scale(1.5).is_empty());
    assert!(core.set_color("#000000").is_empty());
    assert!(core.bring_forward().is_empty());
    assert!(core.send_backward().is_empty());
    assert!(core.delete_selected().is_empty());
    assert_eq!(core.items(), before.as_slice());
    assert_eq!(core.doc.peek_next_z(), 5);
}

// =============================================================
// Layering
// =============================================================

#[test]
fn bring_forward_puts_item_on_top() {
    let mut core = core();
    core.ui.selected_id = Some(BED);
    core.bring_forward();
    let bed_z = item(&core, BED).z;
    assert!(core.items().iter().filter(|i| i.id != BED).all(|i| i.z < bed_z));
    assert_eq!(core.scene().last().map(|v| v.id), Some(BED));
}

#[test]
fn send_backward_lowers_z_by_one() {
    let mut core = core();
    core.ui.selected_id = Some(PLANT);
    core.send_backward();
    assert_eq!(item(&core, PLANT).z, 3);
}

#[test]
fn rugs_paint_below_furniture_regardless_of_z() {
    let mut core = core();
    core.add_item(FurnitureKind::Rug);
    core.bring_forward();
    let scene = core.scene();
    assert_eq!(scene[0].kind, FurnitureKind::Rug);
}

// =============================================================
// Delete
// =============================================================

#[test]
fn deleting_unselected_item_keeps_selection() {
    let mut core = core();
    core.ui.selected_id = Some(DESK);
    let actions = core.delete(CHAIR);
    assert_eq!(actions, vec![Action::ItemDeleted { id: CHAIR }, Action::RenderNeeded]);
    assert_eq!(core.selection(), Some(DESK));
    assert!(core.item(CHAIR).is_none());
}

#[test]
fn deleting_selected_item_clears_selection() {
    let mut core = core();
    core.ui.selected_id = Some(DESK);
    let actions = core.delete_selected();
    assert!(actions.contains(&Action::SelectionChanged(None)));
    assert_eq!(core.selection(), None);
    assert_eq!(core.items().len(), 3);
}

#[test]
fn deleting_missing_item_is_a_no_op() {
    let mut core = core();
    assert!(core.delete(99).is_empty());
    assert_eq!(core.items().len(), 4);
}

#[test]
fn deleting_dragged_item_ends_the_gesture() {
    let mut core = core();
    press(&mut core, 400.0, 170.0);
    core.on_pointer_move(pt(450.0, 200.0), no_mods());
    assert!(core.input.is_dragging(CHAIR));
    core.delete_selected();
    assert!(matches!(core.input, InputState::Idle));
    assert!(core.on_pointer_move(pt(500.0, 250.0), no_mods()).is_empty());
}

// =============================================================
// Pointer: select and drag
// =============================================================

#[test]
fn press_selects_and_raises_item() {
    let mut core = core();
    let actions = press(&mut core, 400.0, 170.0);
    assert_eq!(core.selection(), Some(CHAIR));
    assert_eq!(item(&core, CHAIR).z, 5);
    assert!(actions.contains(&Action::SelectionChanged(Some(CHAIR))));
    assert!(actions.contains(&Action::SetCursor("grabbing".into())));
}

#[test]
fn small_movement_is_a_click_not_a_drag() {
    let mut core = core();
    press(&mut core, 400.0, 170.0);
    let moved = core.on_pointer_move(pt(403.0, 172.0), no_mods());
    assert!(moved.is_empty());
    release(&mut core, 403.0, 172.0);

    let chair = item(&core, CHAIR);
    assert_eq!((chair.x, chair.y), (370, 140));
    assert_eq!(core.selection(), Some(CHAIR));
    assert!(matches!(core.input, InputState::Idle));
}

#[test]
fn drag_near_wall_snaps_onto_it() {
    let mut core = core();
    press(&mut core, 50.0, 210.0);
    core.on_pointer_move(pt(19.0, 210.0), no_mods());
    let plant = item(&core, PLANT);
    assert_eq!((plant.x, plant.y), (0, 200));
    release(&mut core, 19.0, 210.0);
    assert_eq!((item(&core, PLANT).x, item(&core, PLANT).y), (0, 200));
}

#[test]
fn drag_snaps_to_grid_and_keeps_grab_offset() {
    let mut core = core();
    press(&mut core, 50.0, 210.0);
    core.on_pointer_move(pt(353.0, 217.0), no_mods());
    let plant = item(&core, PLANT);
    assert_eq!((plant.x, plant.y), (340, 210));
    assert!(core.scene().iter().any(|v| v.id == PLANT && v.dragging));
}

#[test]
fn drag_past_far_wall_stays_inside() {
    let mut core = core();
    press(&mut core, 50.0, 210.0);
    core.on_pointer_move(pt(5000.0, 5000.0), no_mods());
    let plant = item(&core, PLANT);
    assert_eq!((plant.x, plant.y), (1200 - 70, 360 - 70));
    assert!(all_in_bounds(&core));
}

#[test]
fn zoomed_surface_maps_pointer_to_world() {
    let mut core = core();
    core.set_surface(100.0, 50.0, 600.0);
    let plant_screen = core.camera().world_to_screen(pt(50.0, 210.0));
    assert_eq!((plant_screen.x, plant_screen.y), (125.0, 155.0));

    core.on_pointer_down(plant_screen, Button::Primary, no_mods());
    assert_eq!(core.selection(), Some(PLANT));
    core.on_pointer_move(pt(109.5, 155.0), no_mods());
    let plant = item(&core, PLANT);
    assert_eq!((plant.x, plant.y), (0, 200));
}

#[test]
fn leaving_the_surface_ends_the_drag() {
    let mut core = core();
    press(&mut core, 50.0, 210.0);
    core.on_pointer_move(pt(353.0, 217.0), no_mods());
    let actions = core.on_pointer_leave();
    assert_eq!(actions, vec![Action::SetCursor("default".into()), Action::RenderNeeded]);
    assert!(matches!(core.input, InputState::Idle));
    assert_eq!(item(&core, PLANT).x, 340);
}

#[test]
fn background_press_clears_selection() {
    let mut core = core();
    press(&mut core, 400.0, 170.0);
    release(&mut core, 400.0, 170.0);
    let actions = press(&mut core, 1000.0, 300.0);
    assert_eq!(core.selection(), None);
    assert_eq!(actions, vec![Action::SelectionChanged(None), Action::RenderNeeded]);
}

#[test]
fn secondary_button_is_ignored() {
    let mut core = core();
    let actions = core.on_pointer_down(pt(400.0, 170.0), Button::Secondary, no_mods());
    assert!(actions.is_empty());
    assert_eq!(core.selection(), None);
}

#[test]
fn overlapping_press_picks_topmost() {
    let mut core = core();
    let mut chair = item(&core, CHAIR);
    chair.x = 100;
    chair.y = 100;
    core.doc.replace(chair);
    // Chair (z 3) sits over the bed (z 1).
    press(&mut core, 120.0, 120.0);
    assert_eq!(core.selection(), Some(CHAIR));
}

// =============================================================
// Pointer: rug resize
// =============================================================

fn cozy_with_rug_selected() -> EngineCore {
    let mut core = core();
    core.apply_preset(Preset::Cozy);
    press(&mut core, 500.0, 150.0);
    release(&mut core, 500.0, 150.0);
    assert_eq!(item(&core, 1).kind, FurnitureKind::Rug);
    assert_eq!(core.selection(), Some(1));
    core
}

#[test]
fn rug_handle_starts_resize() {
    let mut core = cozy_with_rug_selected();
    let rug = item(&core, 1);
    let size = rug.size();
    let corner = (f64::from(rug.x + size.w) - 4.0, f64::from(rug.y + size.h) - 4.0);
    let actions = press(&mut core, corner.0, corner.1);
    assert_eq!(actions, vec![Action::SetCursor("nwse-resize".into())]);
    assert!(matches!(core.input, InputState::Resizing { id: 1, .. }));
}

#[test]
fn rug_resize_grows_monotonically_and_stays_bounded() {
    let mut core = cozy_with_rug_selected();
    let rug = item(&core, 1);
    let size = rug.size();
    let (mut px, mut py) = (f64::from(rug.x + size.w) - 4.0, f64::from(rug.y + size.h) - 4.0);
    press(&mut core, px, py);

    let mut last = item(&core, 1).scale;
    for _ in 0..20 {
        px += 15.0;
        py += 10.0;
        core.on_pointer_move(pt(px, py), no_mods());
        let scale = item(&core, 1).scale;
        assert!(scale >= last);
        assert!(scale <= SCALE_MAX);
        assert!(all_in_bounds(&core));
        last = scale;
    }
    assert_eq!(last, SCALE_MAX);

    core.on_pointer_move(pt(px - 100.0, py - 100.0), no_mods());
    assert!(item(&core, 1).scale < SCALE_MAX);
    release(&mut core, px, py);
    assert!(matches!(core.input, InputState::Idle));
}

#[test]
fn resize_step_follows_pointer_travel() {
    let mut core = cozy_with_rug_selected();
    press(&mut core, 735.0, 265.0);
    core.on_pointer_move(pt(755.0, 285.0), no_mods());
    let rug = item(&core, 1);
    assert!((rug.scale - 1.2).abs() < 1e-9);
    assert!(rug.in_bounds(core.room()));
}

#[test]
fn unselected_rug_corner_is_body_not_handle() {
    let mut core = core();
    core.apply_preset(Preset::Cozy);
    press(&mut core, 735.0, 265.0);
    assert!(matches!(core.input, InputState::Pressed { id: 1, .. }));
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn arrows_nudge_by_grid_and_shift_multiplies() {
    let mut core = core();
    core.ui.selected_id = Some(BED);
    core.on_key_down(&key("ArrowRight"), no_mods());
    assert_eq!(item(&core, BED).x, 50);
    core.on_key_down(&key("ArrowDown"), shift());
    assert_eq!(item(&core, BED).y, 80);
}

#[test]
fn nudge_stops_at_the_wall() {
    let mut core = core();
    core.ui.selected_id = Some(BED);
    for _ in 0..10 {
        core.on_key_down(&key("ArrowLeft"), no_mods());
    }
    assert_eq!(item(&core, BED).x, 0);
    assert!(core.on_key_down(&key("ArrowLeft"), no_mods()).is_empty());
}

#[test]
fn keyboard_shortcuts() {
    let mut core = core();
    core.ui.selected_id = Some(DESK);

    core.on_key_down(&key("r"), no_mods());
    assert_eq!(item(&core, DESK).rot, Rotation::Deg90);

    let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };
    assert!(core.on_key_down(&key("r"), ctrl).is_empty());

    core.on_key_down(&key("]"), no_mods());
    assert_eq!(item(&core, DESK).z, 5);
    core.on_key_down(&key("["), no_mods());
    assert_eq!(item(&core, DESK).z, 4);

    core.on_key_down(&key("Escape"), no_mods());
    assert_eq!(core.selection(), None);

    core.ui.selected_id = Some(DESK);
    core.on_key_down(&key("Backspace"), no_mods());
    assert!(core.item(DESK).is_none());
}

#[test]
fn keys_without_selection_are_ignored() {
    let mut core = core();
    assert!(core.on_key_down(&key("ArrowUp"), no_mods()).is_empty());
    assert!(core.on_key_down(&key("Delete"), no_mods()).is_empty());
    assert!(core.on_key_down(&key("Escape"), no_mods()).is_empty());
    assert!(core.on_key_down(&key("q"), no_mods()).is_empty());
}

// =============================================================
// Presets and reset
// =============================================================

#[test]
fn preset_replaces_layout_and_counters() {
    let mut core = core();
    core.ui.selected_id = Some(BED);
    let actions = core.apply_preset(Preset::Cozy);
    assert_eq!(
        actions,
        vec![Action::LayoutReplaced, Action::SelectionChanged(None), Action::RenderNeeded]
    );
    assert_eq!(core.items().len(), 6);
    assert_eq!(core.selection(), None);

    core.add_item(FurnitureKind::Chair);
    let added = item(&core, 7);
    assert_eq!(added.z, 7);
}

#[test]
fn every_preset_is_in_bounds() {
    let mut core = core();
    for preset in Preset::ALL {
        core.apply_preset(preset);
        assert!(all_in_bounds(&core), "{preset:?}");
    }
}

#[test]
fn reset_restores_initial_layout() {
    let mut core = core();
    core.add_item(FurnitureKind::Rug);
    core.apply_preset(Preset::LShape);
    core.reset();
    assert_eq!(core.items(), EngineCore::new().items());
    assert_eq!(core.doc.peek_next_id(), 5);
    assert_eq!(core.doc.peek_next_z(), 5);
}

// =============================================================
// Export / import
// =============================================================

#[test]
fn export_then_import_restores_layout() {
    let mut source = core();
    source.apply_preset(Preset::Focus);
    source.ui.selected_id = Some(2);
    source.rotate_selected();

    let mut clipboard = MemoryClipboard::default();
    let actions = source.export_layout(&mut clipboard);
    assert_eq!(actions, vec![Action::Notify(Notice::Exported)]);

    let mut target = core();
    let text = clipboard.text.unwrap();
    let actions = target.import_layout(&text);
    assert!(actions.contains(&Action::LayoutReplaced));
    assert_eq!(target.items(), source.items());
}

#[test]
fn import_sets_counters_past_imported_values() {
    let mut core = core();
    let text = r##"[{"id": 40, "type": "Lamp", "x": 0, "y": 0, "color": "#fff", "z": 12}]"##;
    core.import_layout(text);
    core.add_item(FurnitureKind::Desk);
    assert_eq!(core.selection(), Some(41));
    assert_eq!(item(&core, 41).z, 13);
}

#[test]
fn failed_import_leaves_state_untouched() {
    let mut core = core();
    core.ui.selected_id = Some(CHAIR);
    let before = core.items().to_vec();

    let actions = core.import_layout("{ definitely not a layout");
    assert!(matches!(actions.as_slice(), [Action::Notify(Notice::ImportFailed(_))]));
    assert_eq!(core.items(), before.as_slice());
    assert_eq!(core.selection(), Some(CHAIR));
    assert_eq!(core.doc.peek_next_id(), 5);
}

#[test]
fn refused_clipboard_is_reported() {
    let core = core();
    let mut clipboard = MemoryClipboard { refuse: true, ..MemoryClipboard::default() };
    let actions = core.export_layout(&mut clipboard);
    assert_eq!(
        actions,
        vec![Action::Notify(Notice::ClipboardUnavailable("permission denied".into()))]
    );
}

// =============================================================
// Invariants across a session
// =============================================================

#[test]
fn session_keeps_everything_in_bounds() {
    let mut core = core();
    core.add_item(FurnitureKind::Rug);
    core.set_scale(1.3);
    core.rotate_selected();
    assert_eq!(core.item(5).map(Item::size), Some(Size::new(221, 338)));
    core.add_item(FurnitureKind::Bookshelf);
    core.rotate_selected();
    core.set_scale(1.8);
    for _ in 0..30 {
        core.on_key_down(&key("ArrowDown"), shift());
        core.on_key_down(&key("ArrowRight"), shift());
    }
    press(&mut core, 40.0, 40.0);
    core.on_pointer_move(pt(-500.0, 900.0), no_mods());
    release(&mut core, -500.0, 900.0);
    assert!(all_in_bounds(&core));

    let mut ids: Vec<ItemId> = core.items().iter().map(|i| i.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), core.items().len());
}

#[test]
fn oversized_rotation_pins_overflowing_axis_to_zero() {
    let mut core = core();
    core.add_item(FurnitureKind::Rug);
    core.set_scale(1.8);
    core.rotate_selected();
    let rug = item(&core, 5);
    // 306x468 cannot fit a 360-high room; the origin is held at the near wall.
    assert_eq!(rug.size(), Size::new(306, 468));
    assert_eq!((rug.x, rug.y), (80, 0));
    assert!(!rug.in_bounds(core.room()));
}

#[test]
fn bring_forward_after_import_at_z_limit_is_strictly_above() {
    let mut core = core();
    let text = format!(
        r##"[{{"id": 1, "type": "Bed", "x": 0, "y": 0, "color": "#fff", "z": {limit}}},
            {{"id": 2, "type": "Lamp", "x": 400, "y": 0, "color": "#fff", "z": 1}}]"##,
        limit = crate::consts::Z_LIMIT
    );
    core.import_layout(&text);
    core.ui.selected_id = Some(2);
    core.bring_forward();
    assert!(item(&core, 2).z > item(&core, 1).z);
}

#[test]
fn import_with_overflowing_z_is_rejected() {
    let mut core = core();
    let text = r##"[{"id": 1, "type": "Bed", "x": 0, "y": 0, "color": "#fff", "z": 9223372036854775807}]"##;
    let actions = core.import_layout(text);
    assert!(matches!(actions.as_slice(), [Action::Notify(Notice::ImportFailed(_))]));
    assert_eq!(core.items().len(), 4);
}
