use serde::{Deserialize, Serialize};

use crate::*;

/// Content stored in one cell of the playing field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Empty,
    Breakable,
    Unbreakable,
    Diamond,
    Inspected,
    Bomb,
    Exit,
}

impl Tile {
    /// Layout code, shared with the display codes of [`Sprite`].
    pub const fn code(self) -> u8 {
        use Tile::*;
        match self {
            Empty => 0,
            Breakable => 3,
            Unbreakable => 4,
            Diamond => 5,
            Inspected => 7,
            Bomb => 8,
            Exit => 10,
        }
    }

    /// Whether the player may step onto this tile.
    pub const fn is_passable(self) -> bool {
        matches!(self, Self::Empty | Self::Diamond | Self::Bomb | Self::Exit)
    }

    /// Whether the flood fill continues through this tile.
    pub const fn is_transparent(self) -> bool {
        matches!(self, Self::Empty | Self::Diamond | Self::Exit)
    }

    /// Whether a detonation next to this tile clears it.
    pub const fn is_destructible(self) -> bool {
        matches!(self, Self::Breakable | Self::Inspected | Self::Exit)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Empty
    }
}

impl TryFrom<u8> for Tile {
    type Error = GameError;

    fn try_from(code: u8) -> Result<Self> {
        use Tile::*;
        match code {
            0 => Ok(Empty),
            3 => Ok(Breakable),
            4 => Ok(Unbreakable),
            5 => Ok(Diamond),
            7 => Ok(Inspected),
            8 => Ok(Bomb),
            10 => Ok(Exit),
            1 | 2 | 6 | 9 => Err(GameError::DisplayOnlyTileCode(code)),
            _ => Err(GameError::UnknownTileCode(code)),
        }
    }
}

/// Anything that can be drawn on a cell: tile content or one of the overlays.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    Tile(Tile),
    Player,
    Facing,
    Undiscovered,
    Explosion,
}

impl Sprite {
    pub const EMPTY: Self = Self::Tile(Tile::Empty);

    pub const fn code(self) -> u8 {
        match self {
            Self::Tile(tile) => tile.code(),
            Self::Player => 1,
            Self::Facing => 2,
            Self::Undiscovered => 6,
            Self::Explosion => 9,
        }
    }

    pub const fn colour(self) -> Colour {
        match self {
            Self::Player => Colour::Red,
            Self::Facing => Colour::LightRed,
            Self::Tile(Tile::Inspected) => Colour::LightGreen,
            Self::Tile(Tile::Breakable | Tile::Unbreakable) => Colour::Yellow,
            Self::Tile(Tile::Diamond) => Colour::Green,
            Self::Undiscovered => Colour::LightYellow,
            Self::Tile(Tile::Bomb) => Colour::Orange,
            Self::Explosion => Colour::LightOrange,
            Self::Tile(Tile::Empty | Tile::Exit) => Colour::Black,
        }
    }
}

impl From<Tile> for Sprite {
    fn from(tile: Tile) -> Self {
        Self::Tile(tile)
    }
}

/// LED matrix colours.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Colour {
    Black,
    Red,
    LightRed,
    Green,
    LightGreen,
    Yellow,
    LightYellow,
    Orange,
    LightOrange,
}
