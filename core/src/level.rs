use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

pub const PLAYER_START: Coord2 = (0, 0);
pub const FACING_START: Coord2 = (1, 0);

const BUILTIN_WIDTH: usize = 16;
const BUILTIN_HEIGHT: usize = 8;

type BuiltinRows = [[Tile; BUILTIN_WIDTH]; BUILTIN_HEIGHT];

const O: Tile = Tile::Empty;
const B: Tile = Tile::Breakable;
const U: Tile = Tile::Unbreakable;
const D: Tile = Tile::Diamond;
const X: Tile = Tile::Exit;

// rows are written top row first, the way they show on the matrix
const LEVEL_ONE_ROWS: BuiltinRows = [
    [O, B, O, B, O, O, O, U, U, O, O, U, O, U, O, U],
    [O, U, O, U, O, O, O, B, U, U, B, U, O, B, O, U],
    [O, U, O, U, U, U, U, O, B, O, O, O, O, U, O, U],
    [D, U, O, U, O, O, B, O, O, U, O, O, O, U, O, X],
    [U, U, B, U, D, O, U, O, O, U, B, U, O, O, U, U],
    [O, O, O, U, U, U, U, O, U, O, O, O, U, B, O, U],
    [O, O, O, B, O, O, B, O, B, O, B, O, B, O, O, U],
    [O, O, O, U, O, O, B, O, U, O, O, B, B, O, D, U],
];
const LEVEL_ONE_DIAMONDS: [Coord2; 3] = [(0, 4), (4, 3), (14, 0)];

const LEVEL_TWO_ROWS: BuiltinRows = [
    [U, U, B, U, U, O, U, U, B, B, B, U, O, B, O, U],
    [O, O, O, D, B, O, O, U, U, U, O, U, D, U, O, U],
    [B, U, U, U, U, O, B, O, O, B, O, U, O, U, O, B],
    [O, B, O, U, O, O, O, O, O, U, O, U, O, B, O, B],
    [U, U, U, U, O, O, U, U, B, U, O, O, U, U, U, O],
    [O, O, O, B, O, O, U, D, O, U, O, O, O, O, B, B],
    [O, O, O, U, B, B, O, O, O, U, O, U, U, U, U, X],
    [O, O, O, U, B, U, U, U, U, U, O, B, D, O, U, O],
];
/// Every entry sits on a diamond of the level two grid, so the detector reacts to all four.
const LEVEL_TWO_DIAMONDS: [Coord2; 4] = [(3, 6), (7, 2), (12, 0), (12, 6)];

/// Starting content of a level plus the diamond positions the detector tracks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LayoutCodes", into = "LayoutCodes")]
pub struct LevelLayout {
    tiles: Array2<Tile>,
    diamonds: Vec<Coord2>,
}

impl LevelLayout {
    pub fn level_one() -> Self {
        Self::from_builtin(&LEVEL_ONE_ROWS, &LEVEL_ONE_DIAMONDS)
    }

    pub fn level_two() -> Self {
        Self::from_builtin(&LEVEL_TWO_ROWS, &LEVEL_TWO_DIAMONDS)
    }

    fn from_builtin(rows: &BuiltinRows, diamonds: &[Coord2]) -> Self {
        let tiles = Array2::from_shape_fn((BUILTIN_WIDTH, BUILTIN_HEIGHT), |(x, y)| {
            rows[BUILTIN_HEIGHT - 1 - y][x]
        });
        Self {
            tiles,
            diamonds: diamonds.to_vec(),
        }
    }

    /// Builds a layout from tile codes, top row first.
    pub fn from_codes<R: AsRef<[u8]>>(rows: &[R], diamonds: &[Coord2]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let max = Coord::MAX as usize;
        if width == 0 || height > max || width > max {
            return Err(GameError::InvalidLayoutShape);
        }
        if rows.iter().any(|row| row.as_ref().len() != width) {
            return Err(GameError::InvalidLayoutShape);
        }

        let mut tiles = Array2::default((width, height));
        for (row_index, row) in rows.iter().enumerate() {
            let y = height - 1 - row_index;
            for (x, &code) in row.as_ref().iter().enumerate() {
                tiles[[x, y]] = Tile::try_from(code)?;
            }
        }

        let layout = Self {
            tiles,
            diamonds: diamonds.to_vec(),
        };
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.in_bounds(PLAYER_START) || !self.tile_at(PLAYER_START).is_passable() {
            return Err(GameError::BlockedStart);
        }

        for &coords in &self.diamonds {
            if !self.in_bounds(coords) {
                return Err(GameError::InvalidCoords);
            }
            if self.tile_at(coords) != Tile::Diamond {
                return Err(GameError::MissingDiamond(coords));
            }
        }

        let on_field = self.tiles.iter().filter(|&&tile| tile == Tile::Diamond).count();
        if on_field != self.diamonds.len() {
            log::warn!(
                "Layout holds {} diamonds but the detector tracks {}",
                on_field,
                self.diamonds.len()
            );
        }
        Ok(())
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.tiles.dim();
        (x as Coord, y as Coord)
    }

    pub fn tiles(&self) -> &Array2<Tile> {
        &self.tiles
    }

    pub fn diamonds(&self) -> &[Coord2] {
        &self.diamonds
    }

    /// Diamonds that must be collected before the exit opens.
    pub fn diamonds_available(&self) -> u8 {
        self.diamonds.len().min(u8::MAX as usize) as u8
    }

    fn in_bounds(&self, (x, y): Coord2) -> bool {
        let (x_end, y_end) = self.size();
        (0..x_end).contains(&x) && (0..y_end).contains(&y)
    }

    fn tile_at(&self, coords: Coord2) -> Tile {
        self.tiles[coords.to_nd_index()]
    }
}

/// Serialized form of a [`LevelLayout`]: tile codes, top row first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutCodes {
    pub rows: Vec<Vec<u8>>,
    pub diamonds: Vec<Coord2>,
}

impl TryFrom<LayoutCodes> for LevelLayout {
    type Error = GameError;

    fn try_from(codes: LayoutCodes) -> Result<Self> {
        Self::from_codes(&codes.rows, &codes.diamonds)
    }
}

impl From<LevelLayout> for LayoutCodes {
    fn from(layout: LevelLayout) -> Self {
        let (width, height) = layout.tiles.dim();
        let rows: Vec<Vec<u8>> = (0..height)
            .rev()
            .map(|y| {
                (0..width)
                    .map(|x| layout.tiles[[x, y]].code())
                    .collect::<Vec<_>>()
            })
            .collect();
        Self {
            rows,
            diamonds: layout.diamonds,
        }
    }
}

/// The pair of layouts a run alternates between: odd levels use `odd`, even levels `even`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub odd: LevelLayout,
    pub even: LevelLayout,
}

impl Campaign {
    pub fn layout_for(&self, level: u8) -> &LevelLayout {
        if level % 2 == 1 { &self.odd } else { &self.even }
    }
}

impl Default for Campaign {
    fn default() -> Self {
        Self {
            odd: LevelLayout::level_one(),
            even: LevelLayout::level_two(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn builtin_diamond_tables_point_at_diamonds() {
        for layout in [LevelLayout::level_one(), LevelLayout::level_two()] {
            assert_eq!(layout.validate(), Ok(()));
            let on_field = layout
                .tiles()
                .iter()
                .filter(|&&tile| tile == Tile::Diamond)
                .count();
            assert_eq!(on_field, layout.diamonds().len());
        }
        assert_eq!(LevelLayout::level_one().diamonds_available(), 3);
        assert_eq!(LevelLayout::level_two().diamonds_available(), 4);
    }

    #[test]
    fn campaign_alternates_by_parity() {
        let campaign = Campaign::default();

        assert_eq!(campaign.layout_for(1), &campaign.odd);
        assert_eq!(campaign.layout_for(2), &campaign.even);
        assert_eq!(campaign.layout_for(3), &campaign.odd);
    }

    #[test]
    fn from_codes_flips_rows() {
        let layout = LevelLayout::from_codes(&[[4u8, 5], [0, 3]], &[(1, 1)]).unwrap();

        assert_eq!(layout.size(), (2, 2));
        assert_eq!(layout.tiles()[[0, 0]], Tile::Empty);
        assert_eq!(layout.tiles()[[1, 0]], Tile::Breakable);
        assert_eq!(layout.tiles()[[0, 1]], Tile::Unbreakable);
        assert_eq!(layout.tiles()[[1, 1]], Tile::Diamond);
    }

    #[test]
    fn from_codes_rejects_bad_input() {
        let ragged: [&[u8]; 2] = [&[0, 0], &[0]];
        assert_eq!(
            LevelLayout::from_codes(&ragged, &[]),
            Err(GameError::InvalidLayoutShape)
        );
        assert_eq!(
            LevelLayout::from_codes::<[u8; 0]>(&[], &[]),
            Err(GameError::InvalidLayoutShape)
        );
        assert_eq!(
            LevelLayout::from_codes(&[[0u8, 2]], &[]),
            Err(GameError::DisplayOnlyTileCode(2))
        );
        assert_eq!(
            LevelLayout::from_codes(&[[4u8, 0]], &[]),
            Err(GameError::BlockedStart)
        );
        assert_eq!(
            LevelLayout::from_codes(&[[0u8, 0]], &[(1, 0)]),
            Err(GameError::MissingDiamond((1, 0)))
        );
        assert_eq!(
            LevelLayout::from_codes(&[[0u8, 5]], &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn layout_codes_deserializes_through_validation() {
        let json = r#"{"rows": [[0, 5, 10]], "diamonds": [[1, 0]]}"#;
        let layout: LevelLayout = serde_json::from_str(json).unwrap();
        assert_eq!(layout.size(), (3, 1));
        assert_eq!(layout.diamonds(), &[(1, 0)]);

        let bad = r#"{"rows": [[0, 0, 10]], "diamonds": [[1, 0]]}"#;
        assert!(serde_json::from_str::<LevelLayout>(bad).is_err());

        let codes = LayoutCodes::from(layout);
        assert_eq!(codes.rows, vec![vec![0, 5, 10]]);
    }
}
