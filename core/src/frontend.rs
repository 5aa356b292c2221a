use ndarray::Array2;

use crate::*;

/// Presentation side of the game: the LED matrix plus the status outputs around it.
///
/// Only [`Frontend::render`] is required. The status notifications are presentation-only and
/// nothing in the engine depends on them.
pub trait Frontend {
    /// Draws `sprite` on a cell. Coordinates outside the matrix must be ignored.
    fn render(&mut self, coords: Coord2, sprite: Sprite);

    fn show_level(&mut self, _level: u8) {}

    fn show_score(&mut self, _collected: u8, _available: u8) {}

    fn show_cheat(&mut self, _enabled: bool) {}

    fn show_paused(&mut self, _paused: bool) {}

    fn show_steps(&mut self, _steps: u8) {}

    fn toggle_detector(&mut self) {}

    fn clear_detector(&mut self) {}

    fn show_danger(&mut self, _danger: bool) {}

    fn toggle_game_over(&mut self) {}
}

/// Values shown outside the matrix.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusPanel {
    pub level: u8,
    pub collected: u8,
    pub available: u8,
    pub cheat: bool,
    pub paused: bool,
    pub steps: u8,
    pub detector_lit: bool,
    pub danger_lit: bool,
    pub game_over_lit: bool,
}

/// In-memory frontend keeping the last sprite drawn on every cell.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pixels: Array2<Sprite>,
    status: StatusPanel,
    revision: u64,
}

impl FrameBuffer {
    pub fn new(size: Coord2) -> Self {
        Self {
            pixels: Array2::from_elem(size.to_nd_index(), Sprite::EMPTY),
            status: StatusPanel::default(),
            revision: 0,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.pixels.dim();
        (x as Coord, y as Coord)
    }

    pub fn sprite_at(&self, coords: Coord2) -> Option<Sprite> {
        self.in_bounds(coords)
            .then(|| self.pixels[coords.to_nd_index()])
    }

    pub fn colour_at(&self, coords: Coord2) -> Option<Colour> {
        self.sprite_at(coords).map(Sprite::colour)
    }

    pub fn status(&self) -> &StatusPanel {
        &self.status
    }

    /// Bumped on every visible change, lets views skip redundant redraws.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn in_bounds(&self, (x, y): Coord2) -> bool {
        let (x_end, y_end) = self.size();
        (0..x_end).contains(&x) && (0..y_end).contains(&y)
    }

    fn update_status(&mut self, update: impl FnOnce(&mut StatusPanel)) {
        let before = self.status;
        update(&mut self.status);
        if before != self.status {
            self.revision += 1;
        }
    }
}

impl Frontend for FrameBuffer {
    fn render(&mut self, coords: Coord2, sprite: Sprite) {
        if !self.in_bounds(coords) {
            return;
        }
        let pixel = &mut self.pixels[coords.to_nd_index()];
        if *pixel != sprite {
            *pixel = sprite;
            self.revision += 1;
        }
    }

    fn show_level(&mut self, level: u8) {
        self.update_status(|status| status.level = level);
    }

    fn show_score(&mut self, collected: u8, available: u8) {
        self.update_status(|status| {
            status.collected = collected;
            status.available = available;
        });
    }

    fn show_cheat(&mut self, enabled: bool) {
        self.update_status(|status| status.cheat = enabled);
    }

    fn show_paused(&mut self, paused: bool) {
        self.update_status(|status| status.paused = paused);
    }

    fn show_steps(&mut self, steps: u8) {
        self.update_status(|status| status.steps = steps);
    }

    fn toggle_detector(&mut self) {
        self.update_status(|status| status.detector_lit = !status.detector_lit);
    }

    fn clear_detector(&mut self) {
        self.update_status(|status| status.detector_lit = false);
    }

    fn show_danger(&mut self, danger: bool) {
        self.update_status(|status| status.danger_lit = danger);
    }

    fn toggle_game_over(&mut self) {
        self.update_status(|status| status.game_over_lit = !status.game_over_lit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_ignores_cells_outside_the_matrix() {
        let mut frame = FrameBuffer::new((2, 2));

        frame.render((2, 0), Sprite::Player);
        frame.render((-1, 1), Sprite::Player);
        assert_eq!(frame.revision(), 0);

        frame.render((1, 1), Sprite::Player);
        assert_eq!(frame.sprite_at((1, 1)), Some(Sprite::Player));
        assert_eq!(frame.colour_at((1, 1)), Some(Colour::Red));
        assert_eq!(frame.sprite_at((2, 1)), None);
        assert_eq!(frame.revision(), 1);
    }

    #[test]
    fn revision_only_moves_on_change() {
        let mut frame = FrameBuffer::new((1, 1));

        frame.render((0, 0), Sprite::EMPTY);
        frame.show_danger(false);
        assert_eq!(frame.revision(), 0);

        frame.toggle_detector();
        frame.toggle_detector();
        assert_eq!(frame.revision(), 2);
        assert!(!frame.status().detector_lit);
    }
}
