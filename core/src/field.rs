use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Playing field: tile content plus the per-cell discovered flag.
///
/// Coordinates outside the grid behave as unbreakable walls, so the boundary never has to be
/// stored. Writes outside the grid are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    tiles: Array2<Tile>,
    discovered: Array2<bool>,
}

impl Field {
    pub fn new(size: Coord2) -> Self {
        let shape = size.to_nd_index();
        Self {
            tiles: Array2::default(shape),
            discovered: Array2::default(shape),
        }
    }

    pub fn from_layout(layout: &LevelLayout) -> Self {
        let tiles = layout.tiles().clone();
        let discovered = Array2::default(tiles.dim());
        Self { tiles, discovered }
    }

    /// Replaces the content with `layout` and forgets everything discovered so far.
    pub fn reset(&mut self, layout: &LevelLayout) {
        *self = Self::from_layout(layout);
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.tiles.dim();
        (x as Coord, y as Coord)
    }

    pub fn in_bounds(&self, (x, y): Coord2) -> bool {
        let (x_end, y_end) = self.size();
        (0..x_end).contains(&x) && (0..y_end).contains(&y)
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        if self.in_bounds(coords) {
            self.tiles[coords.to_nd_index()]
        } else {
            Tile::Unbreakable
        }
    }

    pub fn set_tile(&mut self, coords: Coord2, tile: Tile) {
        if self.in_bounds(coords) {
            self.tiles[coords.to_nd_index()] = tile;
        } else {
            log::trace!("Ignoring write of {:?} outside the field at {:?}", tile, coords);
        }
    }

    pub fn is_discovered(&self, coords: Coord2) -> bool {
        self.in_bounds(coords) && self.discovered[coords.to_nd_index()]
    }

    /// Marks a cell discovered, returns whether it was hidden before.
    pub fn discover(&mut self, coords: Coord2) -> bool {
        if !self.in_bounds(coords) {
            return false;
        }
        let cell = &mut self.discovered[coords.to_nd_index()];
        !core::mem::replace(cell, true)
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.iter().filter(|&&seen| seen).count()
    }

    pub fn count_tiles(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// All coordinates, column by column.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (x_end, y_end) = self.size();
        (0..x_end).flat_map(move |x| (0..y_end).map(move |y| (x, y)))
    }
}
