use serde::{Deserialize, Serialize};

use crate::*;

/// Cursor marking the cell the player will move into next.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facing {
    pub position: Coord2,
    pub visible: bool,
}

/// A planted bomb waiting for its fuse.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bomb {
    pub position: Coord2,
    pub visible: bool,
}

/// Complete state of one run: field, player, bomb and score, plus the frontend it draws on.
///
/// Every operation is synchronous and reports presentation changes straight to the frontend.
#[derive(Clone, Debug)]
pub struct Session<F> {
    frontend: F,
    campaign: Campaign,
    field: Field,
    level: u8,
    player: Coord2,
    facing: Facing,
    pub(crate) bomb: Option<Bomb>,
    pub(crate) blast_center: Option<Coord2>,
    cheating: bool,
    pub(crate) score: u8,
    total_score: u16,
    completed_levels: u32,
    pub(crate) game_over: bool,
}

impl<F: Frontend> Session<F> {
    pub fn new(frontend: F) -> Self {
        Self::with_campaign(frontend, Campaign::default())
    }

    /// Starts a run at level 1 using custom layouts.
    pub fn with_campaign(frontend: F, campaign: Campaign) -> Self {
        let field = Field::from_layout(campaign.layout_for(1));
        let mut session = Self {
            frontend,
            campaign,
            field,
            level: 0,
            player: PLAYER_START,
            facing: Facing {
                position: FACING_START,
                visible: true,
            },
            bomb: None,
            blast_center: None,
            cheating: false,
            score: 0,
            total_score: 0,
            completed_levels: 0,
            game_over: false,
        };
        session.initialise_game(0, 0);
        session
    }

    /// Throws the current run away and starts again from level 1 with no score.
    pub fn new_game(&mut self) {
        self.total_score = 0;
        self.initialise_game(0, 0);
    }

    /// Sets up level `level + 1`, banking `score` into the running total.
    pub fn initialise_game(&mut self, level: u8, score: u8) {
        self.level = level.saturating_add(1);
        self.total_score = self.total_score.saturating_add(score.into());
        self.score = 0;
        self.player = PLAYER_START;
        self.facing = Facing {
            position: FACING_START,
            visible: true,
        };
        self.bomb = None;
        self.blast_center = None;
        self.cheating = false;
        self.game_over = false;
        self.field.reset(self.campaign.layout_for(self.level));
        log::debug!(
            "Level {} started, total score {}",
            self.level,
            self.total_score
        );

        for coords in self.field.iter_coords() {
            self.frontend.render(coords, Sprite::Undiscovered);
        }
        self.explore(self.player);
        self.frontend.render(self.player, Sprite::Player);
        self.frontend.render(self.facing.position, Sprite::Facing);

        let available = self.diamonds_available();
        self.frontend.show_level(self.level);
        self.frontend.show_score(self.score, available);
        self.frontend.show_cheat(self.cheating);
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    /// Diamonds banked by completed levels of this run.
    pub fn total_score(&self) -> u16 {
        self.total_score
    }

    /// Levels finished through the exit since the session was created.
    ///
    /// Keeps counting where [`Session::level`] saturates.
    pub fn completed_levels(&self) -> u32 {
        self.completed_levels
    }

    pub fn diamonds_available(&self) -> u8 {
        self.layout().diamonds_available()
    }

    pub fn player(&self) -> Coord2 {
        self.player
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn bomb(&self) -> Option<Bomb> {
        self.bomb
    }

    pub fn is_cheating(&self) -> bool {
        self.cheating
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.field.tile_at(coords)
    }

    pub fn in_bounds(&self, coords: Coord2) -> bool {
        self.field.in_bounds(coords)
    }

    /// Tries to step the player one cell, returns whether the player actually moved.
    ///
    /// The facing indicator follows the direction even when the step is blocked. Stepping
    /// right off the exit with every diamond collected completes the level first.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        self.render_content(self.player);
        self.render_content(self.facing.position);

        if direction == Direction::Right
            && self.field.tile_at(self.player) == Tile::Exit
            && self.score >= self.diamonds_available()
        {
            self.finish_level();
        }

        let destination = direction.offset(self.player);
        let moved = self.field.tile_at(destination).is_passable();
        if moved {
            self.player = destination;
        }
        log::trace!(
            "Move {:?} to {:?}: {}",
            direction,
            destination,
            if moved { "ok" } else { "blocked" }
        );

        self.facing = Facing {
            position: direction.offset(self.player),
            visible: true,
        };
        self.frontend.render(self.player, Sprite::Player);

        if self.field.tile_at(self.player) == Tile::Diamond {
            self.collect_diamond(self.player);
        }

        self.flash_facing();
        moved
    }

    /// Blinks the facing indicator, letting the tile underneath show through when off.
    pub fn flash_facing(&mut self) {
        let position = self.facing.position;
        if !self.field.in_bounds(position) {
            return;
        }

        if self.facing.visible {
            self.render_content(position);
        } else {
            self.frontend.render(position, Sprite::Facing);
        }
        self.facing.visible = !self.facing.visible;
    }

    /// Acts on the tile under the facing indicator.
    ///
    /// Normally a breakable wall is only marked as inspected. With cheats on, breakable and
    /// inspected walls are destroyed outright and the space behind them is explored.
    pub fn inspect_facing(&mut self) {
        let position = self.facing.position;
        let tile = self.field.tile_at(position);

        if self.cheating {
            if matches!(tile, Tile::Breakable | Tile::Inspected) {
                log::debug!("Cheat cleared {:?} at {:?}", tile, position);
                self.field.set_tile(position, Tile::Empty);
                self.explore(position);
            }
        } else if tile == Tile::Breakable {
            self.field.set_tile(position, Tile::Inspected);
            self.field.discover(position);
            self.frontend.render(position, Sprite::Tile(Tile::Inspected));
        }
    }

    pub fn toggle_cheat(&mut self) {
        self.cheating = !self.cheating;
        log::debug!("Cheat mode {}", if self.cheating { "on" } else { "off" });
        self.frontend.show_cheat(self.cheating);
    }

    /// Returns the clock reading to hand back to [`Session::unpause_game`].
    pub fn pause_game<C: Clock + ?Sized>(&mut self, clock: &C) -> Millis {
        let now = clock.now();
        log::debug!("Paused at {}", now);
        self.frontend.show_paused(true);
        now
    }

    /// Winds the clock back to `pause_time`, erasing the paused interval from every timer.
    pub fn unpause_game<C: Clock + ?Sized>(&mut self, clock: &mut C, pause_time: Millis) {
        log::debug!("Resumed, clock reset from {} to {}", clock.now(), pause_time);
        self.frontend.show_paused(false);
        clock.set(pause_time);
    }

    fn finish_level(&mut self) {
        log::debug!("Level {} complete with {} diamonds", self.level, self.score);
        self.completed_levels = self.completed_levels.saturating_add(1);
        self.initialise_game(self.level, self.score);
    }

    pub(crate) fn layout(&self) -> &LevelLayout {
        self.campaign.layout_for(self.level)
    }

    pub(crate) fn explore(&mut self, origin: Coord2) -> usize {
        visibility::explore(&mut self.field, origin, &mut self.frontend)
    }

    pub(crate) fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    /// Redraws a cell with whatever the field holds there.
    pub(crate) fn render_content(&mut self, coords: Coord2) {
        let tile = self.field.tile_at(coords);
        self.frontend.render(coords, tile.into());
    }
}
