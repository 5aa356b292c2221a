use serde::{Deserialize, Serialize};

use crate::*;

/// Highest value the step counter display can show.
pub const MAX_SHOWN_STEPS: u8 = 99;

/// Cadences the play loop runs on, all in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub facing_flash: Millis,
    pub bomb_fuse: Millis,
    pub explosion: Millis,
    /// First bomb blink interval after planting.
    pub bomb_blink: Millis,
    /// Taken off the blink interval every time the bomb is redrawn.
    pub bomb_blink_step: Millis,
    pub game_over_flash: Millis,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            facing_flash: 500,
            bomb_fuse: 2000,
            explosion: 500,
            bomb_blink: 350,
            bomb_blink_step: 75,
            game_over_flash: 1000,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Move(Direction),
    /// Two-axis move, vertical step tried first.
    MoveDiagonal {
        vertical: Direction,
        horizontal: Direction,
    },
    Inspect,
    ToggleCheat,
    PlantBomb,
    TogglePause,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    Playing,
    Paused,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Fuse {
    planted_at: Millis,
    blink_interval: Millis,
    last_blink: Option<Millis>,
}

/// Drives a [`Session`] in real time: routes input and fires every timer.
///
/// The loop never reads a clock of its own, hosts pass one in on every call. Call
/// [`PlayLoop::step`] frequently, every timer is checked against the clock on each call.
#[derive(Clone, Debug)]
pub struct PlayLoop {
    timings: Timings,
    steps: u8,
    last_facing_flash: Millis,
    last_detector_flash: Millis,
    fuse: Option<Fuse>,
    detonated_at: Option<Millis>,
    paused_at: Option<Millis>,
    last_game_over_flash: Option<Millis>,
    game_over_lit: bool,
}

impl PlayLoop {
    pub fn new(timings: Timings, now: Millis) -> Self {
        Self {
            timings,
            steps: 0,
            last_facing_flash: now,
            last_detector_flash: now,
            fuse: None,
            detonated_at: None,
            paused_at: None,
            last_game_over_flash: None,
            game_over_lit: false,
        }
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn set_timings(&mut self, timings: Timings) {
        self.timings = timings;
    }

    /// Successful moves since the run started.
    pub fn steps(&self) -> u8 {
        self.steps
    }

    /// Current bomb blink interval, `None` without a burning fuse.
    pub fn bomb_blink_interval(&self) -> Option<Millis> {
        self.fuse.map(|fuse| fuse.blink_interval)
    }

    pub fn state<F: Frontend>(&self, session: &Session<F>) -> LoopState {
        if session.is_game_over() {
            LoopState::GameOver
        } else if self.paused_at.is_some() {
            LoopState::Paused
        } else {
            LoopState::Playing
        }
    }

    /// Handles an optional input and then runs one tick.
    pub fn step<F: Frontend, C: Clock + ?Sized>(
        &mut self,
        session: &mut Session<F>,
        clock: &mut C,
        input: Option<Input>,
    ) -> LoopState {
        if let Some(input) = input {
            self.handle(session, clock, input);
        }
        self.tick(session, clock);
        self.state(session)
    }

    /// Applies one input. After a game over any input starts a new run.
    pub fn handle<F: Frontend, C: Clock + ?Sized>(
        &mut self,
        session: &mut Session<F>,
        clock: &mut C,
        input: Input,
    ) {
        if session.is_game_over() {
            self.restart(session, clock);
            return;
        }

        if let Some(paused_at) = self.paused_at {
            if input == Input::TogglePause {
                session.unpause_game(clock, paused_at);
                self.paused_at = None;
            }
            return;
        }

        let completed = session.completed_levels();
        match input {
            Input::Move(direction) => {
                self.count_step(session.move_player(direction));
            }
            Input::MoveDiagonal {
                vertical,
                horizontal,
            } => {
                let first = session.move_player(vertical);
                self.count_step(first);
                self.count_step(session.move_player(horizontal));
                if !first {
                    self.count_step(session.move_player(vertical));
                }
            }
            Input::Inspect => session.inspect_facing(),
            Input::ToggleCheat => session.toggle_cheat(),
            Input::PlantBomb => {
                if session.plant_bomb() {
                    self.fuse = Some(Fuse {
                        planted_at: clock.now(),
                        blink_interval: self.timings.bomb_blink,
                        last_blink: None,
                    });
                }
            }
            Input::TogglePause => {
                self.paused_at = Some(session.pause_game(clock));
            }
        }

        if session.completed_levels() != completed {
            log::debug!("Level changed to {}, dropping bomb timers", session.level());
            self.fuse = None;
            self.detonated_at = None;
            session.frontend_mut().show_danger(false);
        }
    }

    /// Fires every timer that is due. Does nothing while paused.
    pub fn tick<F: Frontend, C: Clock + ?Sized>(&mut self, session: &mut Session<F>, clock: &C) {
        if self.paused_at.is_some() {
            return;
        }

        let now = clock.now();
        if session.is_game_over() {
            self.flash_game_over(session, now);
            return;
        }

        if elapsed(now, self.last_facing_flash, self.timings.facing_flash) {
            session.flash_facing();
            self.last_facing_flash = now;
        }

        match session.detect_diamond() {
            None => session.frontend_mut().clear_detector(),
            Some(interval) => {
                if elapsed(now, self.last_detector_flash, interval) {
                    session.frontend_mut().toggle_detector();
                    self.last_detector_flash = now;
                }
            }
        }

        if let Some(mut fuse) = self.fuse.take() {
            let danger = session.in_danger();
            session.frontend_mut().show_danger(danger);

            if elapsed(now, fuse.planted_at, self.timings.bomb_fuse) {
                session.detonate_bomb();
                session.frontend_mut().show_danger(false);
                self.detonated_at = Some(now);
            } else {
                let due = fuse
                    .last_blink
                    .is_none_or(|last| elapsed(now, last, fuse.blink_interval));
                if due {
                    if session.flash_bomb() {
                        fuse.blink_interval = fuse
                            .blink_interval
                            .saturating_sub(self.timings.bomb_blink_step);
                    }
                    fuse.last_blink = Some(now);
                }
                self.fuse = Some(fuse);
            }
        }

        if let Some(detonated_at) = self.detonated_at {
            if elapsed(now, detonated_at, self.timings.explosion) {
                session.clear_explosion();
                self.detonated_at = None;
            }
        }

        session
            .frontend_mut()
            .show_steps(self.steps.min(MAX_SHOWN_STEPS));
    }

    /// Starts a brand-new run and resets every timer.
    pub fn restart<F: Frontend, C: Clock + ?Sized>(&mut self, session: &mut Session<F>, clock: &C) {
        log::info!("Starting a new game");
        if self.game_over_lit {
            session.frontend_mut().toggle_game_over();
        }
        session.frontend_mut().show_danger(false);
        session.frontend_mut().clear_detector();
        session.new_game();

        *self = Self::new(self.timings, clock.now());
        session.frontend_mut().show_steps(0);
    }

    fn count_step(&mut self, moved: bool) {
        self.steps = self.steps.saturating_add(u8::from(moved));
    }

    fn flash_game_over<F: Frontend>(&mut self, session: &mut Session<F>, now: Millis) {
        let due = self
            .last_game_over_flash
            .is_none_or(|last| elapsed(now, last, self.timings.game_over_flash));
        if due {
            session.frontend_mut().toggle_game_over();
            self.game_over_lit = !self.game_over_lit;
            self.last_game_over_flash = Some(now);
        }
    }
}

fn elapsed(now: Millis, since: Millis, interval: Millis) -> bool {
    now.saturating_sub(since) >= interval
}
