use crate::*;

/// Detector blink interval for a Manhattan distance, `None` once nothing is close enough.
pub const fn detector_interval(distance: u16) -> Option<Millis> {
    match distance {
        1 => Some(125),
        2 => Some(250),
        3 => Some(500),
        4 => Some(750),
        _ => None,
    }
}

impl<F: Frontend> Session<F> {
    pub fn collect_diamond(&mut self, coords: Coord2) {
        self.field_mut().set_tile(coords, Tile::Empty);
        self.score = self.score.saturating_add(1);
        log::debug!("Diamond collected at {:?}, score {}", coords, self.score);

        let score = self.score;
        let available = self.diamonds_available();
        self.frontend_mut().show_score(score, available);
    }

    /// How fast the detector should blink, based on the nearest diamond still in the field.
    ///
    /// Only the level's diamond table is consulted, so a diamond counts for as long as its
    /// table position still holds one.
    pub fn detect_diamond(&self) -> Option<Millis> {
        let player = self.player();
        let nearest = self
            .layout()
            .diamonds()
            .iter()
            .filter(|&&coords| self.tile_at(coords) == Tile::Diamond)
            .map(|&coords| manhattan_distance(player, coords))
            .min()?;
        detector_interval(nearest)
    }
}
