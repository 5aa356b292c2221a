use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Invalid direction ({0}, {1}), expected a unit step along one axis")]
    InvalidDirection(i16, i16),
    #[error("Layout rows must be non-empty, equally long and at most 127 tiles in each axis")]
    InvalidLayoutShape,
    #[error("Unknown tile code {0}")]
    UnknownTileCode(u8),
    #[error("Tile code {0} is display-only and cannot be placed in a layout")]
    DisplayOnlyTileCode(u8),
    #[error("Diamond table entry {0:?} is not a diamond tile")]
    MissingDiamond(Coord2),
    #[error("Player start position is blocked")]
    BlockedStart,
}

pub type Result<T> = core::result::Result<T, GameError>;
