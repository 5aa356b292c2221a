use serde::{Deserialize, Serialize};

use crate::*;

/// Single coordinate axis. Signed so the facing indicator can point past the edge.
pub type Coord = i8;

/// Two-dimensional coordinates `(x, y)`, `(0, 0)` is the bottom-left cell.
pub type Coord2 = (Coord, Coord);

/// Milliseconds on the monotonic game clock.
pub type Millis = u32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Only meaningful for in-bounds coordinates, callers check bounds first.
    fn to_nd_index(self) -> Self::Output {
        [self.0 as usize, self.1 as usize]
    }
}

/// Sum of absolute coordinate differences.
pub const fn manhattan_distance(a: Coord2, b: Coord2) -> u16 {
    a.0.abs_diff(b.0) as u16 + a.1.abs_diff(b.1) as u16
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    /// Neighbour order used by the flood fill and the blast radius.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Right, Self::Left];

    pub const fn delta(self) -> Coord2 {
        use Direction::*;
        match self {
            Up => (0, 1),
            Down => (0, -1),
            Right => (1, 0),
            Left => (-1, 0),
        }
    }

    pub const fn offset(self, (x, y): Coord2) -> Coord2 {
        let (dx, dy) = self.delta();
        (x.saturating_add(dx), y.saturating_add(dy))
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    pub fn from_delta(dx: i16, dy: i16) -> Result<Self> {
        use Direction::*;
        match (dx, dy) {
            (0, 1) => Ok(Up),
            (0, -1) => Ok(Down),
            (1, 0) => Ok(Right),
            (-1, 0) => Ok(Left),
            _ => Err(GameError::InvalidDirection(dx, dy)),
        }
    }
}

impl TryFrom<Coord2> for Direction {
    type Error = GameError;

    fn try_from((dx, dy): Coord2) -> Result<Self> {
        Self::from_delta(dx.into(), dy.into())
    }
}

/// Iterates the in-bounds cardinal neighbours of a cell.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let direction = Direction::ALL.get(usize::from(self.index))?;
            self.index += 1;

            let (x, y) = direction.offset(self.center);
            if (0..self.bounds.0).contains(&x) && (0..self.bounds.1).contains(&y) {
                return Some((x, y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn from_delta_rejects_diagonals_and_long_steps() {
        assert_eq!(Direction::from_delta(1, 0), Ok(Direction::Right));
        assert_eq!(Direction::try_from((0, -1)), Ok(Direction::Down));
        assert_eq!(
            Direction::from_delta(1, 1),
            Err(GameError::InvalidDirection(1, 1))
        );
        assert_eq!(
            Direction::from_delta(0, 2),
            Err(GameError::InvalidDirection(0, 2))
        );
        assert_eq!(
            Direction::from_delta(0, 0),
            Err(GameError::InvalidDirection(0, 0))
        );
    }

    #[test]
    fn offsets_follow_the_axis() {
        assert_eq!(Direction::Up.offset((3, 3)), (3, 4));
        assert_eq!(Direction::Left.offset((0, 3)), (-1, 3));
        assert!(Direction::Down.is_vertical());
        assert!(!Direction::Right.is_vertical());
    }

    #[test]
    fn neighbors_skip_out_of_bounds_cells() {
        let corner: Vec<_> = NeighborIter::new((0, 0), (16, 8)).collect();
        assert_eq!(corner, [(0, 1), (1, 0)]);

        let middle: Vec<_> = NeighborIter::new((2, 2), (16, 8)).collect();
        assert_eq!(middle, [(2, 3), (2, 1), (3, 2), (1, 2)]);
    }

    #[test]
    fn manhattan_distance_is_symmetric_and_absolute() {
        assert_eq!(manhattan_distance((0, 0), (3, 4)), 7);
        assert_eq!(manhattan_distance((3, 4), (0, 0)), 7);
        assert_eq!(manhattan_distance((14, 0), (0, 4)), 18);
    }
}
