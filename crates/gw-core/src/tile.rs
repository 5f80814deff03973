//! The tile vocabulary
//!
//! Every grid cell holds one `TileKind`. The enum is the single source of
//! truth for glyph, colors, and description; persistence decodes by matching
//! a `(glyph, description)` pair back against the catalog, so those pairs
//! must stay pairwise distinct.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// RGB color attached to a tile glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const ORANGE: Rgb = Rgb(255, 200, 0);
    pub const PINK: Rgb = Rgb(255, 175, 175);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
}

/// Cell/tile kind
///
/// `Empty` and `Boundary` share the space glyph and are told apart by
/// description. The avatar skins are cosmetic: movement and persistence
/// treat them exactly like `Avatar`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TileKind {
    #[default]
    Empty = 0,
    Floor = 1,
    LockedDoor = 2,
    UnlockedDoor = 3,
    Boundary = 4,
    Avatar = 5,
    AvatarHeart = 6,
    AvatarStar = 7,
    AvatarMoney = 8,
    AvatarFlower = 9,
}

impl TileKind {
    /// Display glyph
    pub const fn glyph(self) -> char {
        match self {
            TileKind::Empty => ' ',
            TileKind::Floor => '·',
            TileKind::LockedDoor => '█',
            TileKind::UnlockedDoor => '▢',
            TileKind::Boundary => ' ',
            TileKind::Avatar => '@',
            TileKind::AvatarHeart => '❤',
            TileKind::AvatarStar => '★',
            TileKind::AvatarMoney => '$',
            TileKind::AvatarFlower => '❀',
        }
    }

    /// Human-readable description, also part of the persisted encoding
    pub const fn description(self) -> &'static str {
        match self {
            TileKind::Empty => "nothing",
            TileKind::Floor => "floor",
            TileKind::LockedDoor => "locked door",
            TileKind::UnlockedDoor => "unlocked door",
            TileKind::Boundary => "sand",
            TileKind::Avatar => "you",
            TileKind::AvatarHeart => "for that special someone",
            TileKind::AvatarStar => "special edition avatar",
            TileKind::AvatarMoney => "you're rich!",
            TileKind::AvatarFlower => "you but flower",
        }
    }

    /// Foreground color
    pub const fn foreground(self) -> Rgb {
        match self {
            TileKind::Empty => Rgb::BLACK,
            TileKind::Floor => Rgb(128, 192, 128),
            TileKind::LockedDoor | TileKind::UnlockedDoor => Rgb::ORANGE,
            TileKind::Boundary => Rgb::GRAY,
            TileKind::Avatar => Rgb::WHITE,
            TileKind::AvatarHeart => Rgb::RED,
            TileKind::AvatarStar => Rgb::YELLOW,
            TileKind::AvatarMoney => Rgb::GREEN,
            TileKind::AvatarFlower => Rgb::PINK,
        }
    }

    /// Background color
    pub const fn background(self) -> Rgb {
        match self {
            TileKind::Empty => Rgb::BLUE,
            TileKind::Boundary => Rgb::GRAY,
            _ => Rgb::BLACK,
        }
    }

    /// Ground-like tiles: walkable emptiness or plain floor
    pub const fn is_ground(self) -> bool {
        matches!(self, TileKind::Empty | TileKind::Floor)
    }

    /// Boundary-like tiles: impassable walls and doors
    pub const fn is_boundary(self) -> bool {
        matches!(
            self,
            TileKind::Boundary | TileKind::LockedDoor | TileKind::UnlockedDoor
        )
    }

    /// Any avatar skin, controlled or wandering
    pub const fn is_avatar(self) -> bool {
        matches!(
            self,
            TileKind::Avatar
                | TileKind::AvatarHeart
                | TileKind::AvatarStar
                | TileKind::AvatarMoney
                | TileKind::AvatarFlower
        )
    }

    /// Look a persisted `(glyph, description)` pair up in the catalog.
    ///
    /// Returns `None` for pairs no catalog entry produces; persistence
    /// treats that as a decode error rather than substituting `Empty`.
    pub fn from_encoding(glyph: char, description: &str) -> Option<TileKind> {
        TileKind::iter().find(|kind| kind.glyph() == glyph && kind.description() == description)
    }
}
