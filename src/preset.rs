//! Named furniture arrangements.
//!
//! Each preset is a fixed list of slots whose positions are fractions of the
//! room, tuned for a non-overlapping layout at the default 1200x360 room.
//! Nothing here is solved or randomized; narrower rooms simply clamp.

#[cfg(test)]
#[path = "preset_test.rs"]
mod preset_test;

use crate::consts::PALETTE;
use crate::doc::{Item, ItemId};
use crate::furniture::{FurnitureKind, Rotation};
use crate::layout::{Size, round_px};

/// A named arrangement offered by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Cozy,
    Focus,
    LShape,
}

impl Preset {
    pub const ALL: [Self; 3] = [Self::Cozy, Self::Focus, Self::LShape];

    /// Parse a toolbar name (`"cozy"`, `"focus"`, `"l-shape"`), case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cozy" => Some(Self::Cozy),
            "focus" => Some(Self::Focus),
            "l-shape" | "lshape" | "l_shape" => Some(Self::LShape),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Cozy => "Cozy",
            Self::Focus => "Focus",
            Self::LShape => "L-Shape",
        }
    }

    fn slots(self) -> &'static [Slot] {
        match self {
            Self::Cozy => COZY,
            Self::Focus => FOCUS,
            Self::LShape => L_SHAPE,
        }
    }
}

/// One placement in a preset: kind, fractional origin, rotation, palette index.
struct Slot {
    kind: FurnitureKind,
    fx: f64,
    fy: f64,
    rot: Rotation,
    color: usize,
}

const fn slot(kind: FurnitureKind, fx: f64, fy: f64, rot: Rotation, color: usize) -> Slot {
    Slot { kind, fx, fy, rot, color }
}

const COZY: &[Slot] = &[
    slot(FurnitureKind::Rug, 0.40, 0.28, Rotation::Deg0, 5),
    slot(FurnitureKind::Bed, 0.03, 0.06, Rotation::Deg0, 1),
    slot(FurnitureKind::Nightstand, 0.245, 0.06, Rotation::Deg0, 7),
    slot(FurnitureKind::Lamp, 0.245, 0.28, Rotation::Deg0, 4),
    slot(FurnitureKind::Chair, 0.80, 0.55, Rotation::Deg0, 3),
    slot(FurnitureKind::Plant, 0.92, 0.06, Rotation::Deg0, 2),
];

const FOCUS: &[Slot] = &[
    slot(FurnitureKind::Desk, 0.42, 0.06, Rotation::Deg0, 2),
    slot(FurnitureKind::Chair, 0.46, 0.36, Rotation::Deg0, 3),
    slot(FurnitureKind::Bookshelf, 0.03, 0.08, Rotation::Deg0, 5),
    slot(FurnitureKind::Lamp, 0.58, 0.06, Rotation::Deg0, 4),
    slot(FurnitureKind::Bed, 0.76, 0.55, Rotation::Deg0, 1),
    slot(FurnitureKind::Plant, 0.20, 0.72, Rotation::Deg0, 2),
];

const L_SHAPE: &[Slot] = &[
    slot(FurnitureKind::Rug, 0.45, 0.45, Rotation::Deg0, 5),
    slot(FurnitureKind::Desk, 0.03, 0.06, Rotation::Deg0, 2),
    slot(FurnitureKind::Desk, 0.03, 0.36, Rotation::Deg90, 2),
    slot(FurnitureKind::Chair, 0.16, 0.36, Rotation::Deg0, 3),
    slot(FurnitureKind::Bookshelf, 0.30, 0.06, Rotation::Deg90, 7),
    slot(FurnitureKind::Bed, 0.76, 0.06, Rotation::Deg0, 1),
    slot(FurnitureKind::Nightstand, 0.76, 0.50, Rotation::Deg0, 7),
];

/// Generate the complete item set for `preset` in a room of `room` size.
///
/// Ids run from 1 and z from 1 in slot order. Every item is clamped into the
/// room after placement.
#[must_use]
pub fn generate(preset: Preset, room: Size) -> Vec<Item> {
    preset
        .slots()
        .iter()
        .zip(1..)
        .map(|(slot, id): (&Slot, ItemId)| {
            let mut item = Item::new(
                id,
                slot.kind,
                round_px(slot.fx * f64::from(room.w)),
                round_px(slot.fy * f64::from(room.h)),
                PALETTE[slot.color % PALETTE.len()],
                i64::from(id),
            );
            item.rot = slot.rot;
            item.clamped(room)
        })
        .collect()
}

/// The hand-authored starting arrangement restored by reset.
#[must_use]
pub fn initial_layout(room: Size) -> Vec<Item> {
    [
        (FurnitureKind::Bed, 40, 40, 1),
        (FurnitureKind::Desk, 320, 40, 2),
        (FurnitureKind::Chair, 370, 140, 3),
        (FurnitureKind::Plant, 40, 200, 4),
    ]
    .into_iter()
    .zip(1..)
    .map(|((kind, x, y, color), id): ((FurnitureKind, i32, i32, usize), ItemId)| {
        Item::new(id, kind, x, y, PALETTE[color], i64::from(id)).clamped(room)
    })
    .collect()
}
