//! Furniture catalogue: the closed set of kinds, their base footprints, and
//! the quarter-turn rotation type.

#[cfg(test)]
#[path = "furniture_test.rs"]
mod furniture_test;

use serde::{Deserialize, Serialize};

use crate::layout::Size;

/// The kind of a placed furniture item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FurnitureKind {
    Bed,
    Desk,
    Chair,
    Dresser,
    Bookshelf,
    Nightstand,
    Lamp,
    /// Floor covering; always painted beneath every other kind.
    Rug,
    Plant,
}

impl FurnitureKind {
    /// Every kind, in toolbar order.
    pub const ALL: [Self; 9] = [
        Self::Bed,
        Self::Desk,
        Self::Chair,
        Self::Dresser,
        Self::Bookshelf,
        Self::Nightstand,
        Self::Lamp,
        Self::Rug,
        Self::Plant,
    ];

    /// Unscaled, unrotated footprint in world units.
    #[must_use]
    pub fn base_size(self) -> Size {
        match self {
            Self::Bed => Size::new(240, 130),
            Self::Desk => Size::new(180, 90),
            Self::Chair => Size::new(80, 80),
            Self::Dresser => Size::new(140, 100),
            Self::Bookshelf => Size::new(100, 180),
            Self::Nightstand => Size::new(70, 60),
            Self::Lamp => Size::new(50, 50),
            Self::Rug => Size::new(260, 170),
            Self::Plant => Size::new(70, 70),
        }
    }

    /// Whether this kind belongs to the floor layer.
    #[must_use]
    pub fn is_rug(self) -> bool {
        self == Self::Rug
    }

    /// Whether the selected item shows a drag-to-resize handle.
    #[must_use]
    pub fn has_resize_handle(self) -> bool {
        self == Self::Rug
    }

    /// Display label, identical to the wire name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bed => "Bed",
            Self::Desk => "Desk",
            Self::Chair => "Chair",
            Self::Dresser => "Dresser",
            Self::Bookshelf => "Bookshelf",
            Self::Nightstand => "Nightstand",
            Self::Lamp => "Lamp",
            Self::Rug => "Rug",
            Self::Plant => "Plant",
        }
    }
}

/// Error for a rotation value outside {0, 90, 180, 270}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rotation must be 0, 90, 180 or 270, got {0}")]
pub struct InvalidRotation(pub u16);

/// Quarter-turn rotation. Serialized as its degree value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// The next quarter turn clockwise, wrapping 270 back to 0.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    #[must_use]
    pub fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Whether width and height trade places at this rotation.
    #[must_use]
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = InvalidRotation;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(InvalidRotation(other)),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(value: Rotation) -> Self {
        value.degrees()
    }
}
