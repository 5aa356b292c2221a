use crate::settings;
use crate::utils::*;
use clap::Args;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Interval;
use miners_core as game;
use miners_core::Clock;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement, KeyboardEvent};
use web_time::Instant;
use yew::prelude::*;

const TICK_MILLIS: u32 = 25;

/// Millisecond clock on top of the browser's monotonic timer.
#[derive(Copy, Clone, Debug)]
pub(crate) struct WebClock {
    anchor: Instant,
    base: game::Millis,
}

impl WebClock {
    pub(crate) fn new() -> Self {
        Self {
            anchor: Instant::now(),
            base: 0,
        }
    }
}

impl Clock for WebClock {
    fn now(&self) -> game::Millis {
        let elapsed = game::Millis::try_from(self.anchor.elapsed().as_millis())
            .unwrap_or(game::Millis::MAX);
        self.base.saturating_add(elapsed)
    }

    fn set(&mut self, now: game::Millis) {
        self.anchor = Instant::now();
        self.base = now;
    }
}

/// Maps a `KeyboardEvent::key` value to the game input it triggers.
pub(crate) fn input_for_key(key: &str) -> Option<game::Input> {
    use game::Direction::*;
    use game::Input::*;
    match key {
        "w" | "W" | "ArrowUp" => Some(Move(Up)),
        "s" | "S" | "ArrowDown" => Some(Move(Down)),
        "d" | "D" | "ArrowRight" => Some(Move(Right)),
        "a" | "A" | "ArrowLeft" => Some(Move(Left)),
        "e" | "E" => Some(Inspect),
        "c" | "C" => Some(ToggleCheat),
        " " | "Spacebar" => Some(PlantBomb),
        "p" | "P" => Some(TogglePause),
        _ => None,
    }
}

pub(crate) const fn colour_class(colour: game::Colour) -> &'static str {
    use game::Colour::*;
    match colour {
        Black => "black",
        Red => "red",
        LightRed => "light-red",
        Green => "green",
        LightGreen => "light-green",
        Yellow => "yellow",
        LightYellow => "light-yellow",
        Orange => "orange",
        LightOrange => "light-orange",
    }
}

/// True when the event was aimed at a form input, whose keys belong to the input.
fn targets_input(event: &Event) -> bool {
    event
        .target()
        .is_some_and(|target| target.has_type::<HtmlInputElement>())
}

fn format_steps(steps: u8) -> String {
    format!("{:02}", steps)
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Tick,
    Key(String),
    ToggleSettings,
    UpdateSettings(settings::Settings),
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Level to start on
    #[arg(short, long, default_value_t = 1)]
    pub(crate) level: u8,
}

impl Default for GameProps {
    fn default() -> Self {
        Self { level: 1 }
    }
}

pub(crate) struct GameView {
    settings: settings::Settings,
    session: game::Session<game::FrameBuffer>,
    play: game::PlayLoop,
    clock: WebClock,
    settings_open: bool,
    revision: u64,
    _timer_interval: Interval,
    _keydown: EventListener,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TICK_MILLIS, move || link.send_message(Msg::Tick))
    }

    fn create_keydown(ctx: &Context<Self>) -> EventListener {
        let link = ctx.link().clone();
        let options = EventListenerOptions::enable_prevent_default();
        EventListener::new_with_options(&gloo::utils::document(), "keydown", options, move |e| {
            let Some(e) = e.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if e.repeat() || targets_input(e) {
                return;
            }
            let key = e.key();
            if input_for_key(&key).is_some() {
                e.prevent_default();
            }
            link.send_message(Msg::Key(key));
        })
    }

    fn create_session(level: u8) -> game::Session<game::FrameBuffer> {
        let campaign = game::Campaign::default();
        let frame = game::FrameBuffer::new(campaign.odd.size());
        let mut session = game::Session::with_campaign(frame, campaign);
        if level > 1 {
            session.initialise_game(level - 1, 0);
        }
        session
    }

    fn press_key(&mut self, key: &str) {
        let state = self.play.state(&self.session);
        match input_for_key(key) {
            Some(input) => {
                log::debug!("key {:?}: {:?}", key, input);
                self.play.handle(&mut self.session, &mut self.clock, input);
            }
            None if state == game::LoopState::GameOver => {
                self.play.restart(&mut self.session, &self.clock);
            }
            None => log::trace!("key {:?} ignored", key),
        }
    }

    /// True when the frame buffer changed since the last render.
    fn take_redraw(&mut self) -> bool {
        let revision = self.session.frontend().revision();
        if self.revision != revision {
            self.revision = revision;
            true
        } else {
            false
        }
    }

    fn view_status(&self) -> Html {
        let status = self.session.frontend().status();
        let state_class = match self.play.state(&self.session) {
            game::LoopState::Playing => "playing",
            game::LoopState::Paused => "paused",
            game::LoopState::GameOver => "game-over",
        };
        let led = |lit: bool, name: &'static str| classes!("led", name, lit.then_some("lit"));

        html! {
            <nav class={state_class}>
                <aside>{format!("Level {}", status.level)}</aside>
                <aside>{format!("{} / {}", status.collected, status.available)}</aside>
                <aside class="steps">{format_steps(status.steps)}</aside>
                <span class={led(status.detector_lit, "detector")} title="Diamond detector"/>
                <span class={led(status.danger_lit, "danger")} title="Danger"/>
                <span class={led(status.game_over_lit, "game-over")} title="Game over"/>
                if status.cheat {
                    <mark>{"Cheat"}</mark>
                }
                if status.paused {
                    <mark>{"Paused"}</mark>
                }
            </nav>
        }
    }

    fn view_matrix(&self) -> Html {
        let frame = self.session.frontend();
        let (cols, rows) = frame.size();

        // matrix row 0 is the bottom row
        let rows: Html = (0..rows)
            .rev()
            .map(|y| {
                let cells: Html = (0..cols)
                    .map(|x| {
                        let colour = frame.colour_at((x, y)).unwrap_or(game::Colour::Black);
                        html! { <td class={colour_class(colour)}/> }
                    })
                    .collect();
                html! { <tr>{cells}</tr> }
            })
            .collect();

        html! { <table class="matrix">{rows}</table> }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let settings: settings::Settings = LocalOrDefault::local_or_default();
        let clock = WebClock::new();
        let session = Self::create_session(ctx.props().level);
        let play = game::PlayLoop::new(settings.timings, clock.now());
        log::debug!("Game created at level {}", session.level());

        Self {
            settings,
            session,
            play,
            clock,
            settings_open: false,
            revision: 0,
            _timer_interval: GameView::create_timer(ctx),
            _keydown: GameView::create_keydown(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Tick => {
                self.play.tick(&mut self.session, &self.clock);
                self.take_redraw()
            }
            Key(key) => {
                if self.settings_open {
                    return false;
                }
                self.press_key(&key);
                self.play.tick(&mut self.session, &self.clock);
                self.take_redraw()
            }
            ToggleSettings => {
                self.settings_open = !self.settings_open;
                if !self.settings_open {
                    self.settings = LocalOrDefault::local_or_default();
                }
                true
            }
            UpdateSettings(settings) => {
                log::info!("Applying timings {:?}", settings.timings);
                self.play.set_timings(settings.timings);
                settings.local_save();
                self.settings = settings;
                self.settings_open = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use settings::SettingsView;
        use Msg::*;

        let cb_toggle_settings = ctx.link().callback(|_: MouseEvent| ToggleSettings);
        let on_apply = ctx.link().callback(UpdateSettings);
        let on_cancel = ctx.link().callback(|_: ()| ToggleSettings);

        html! {
            <div class="miners">
                <small onclick={cb_toggle_settings}>{"···"}</small>
                {self.view_status()}
                {self.view_matrix()}
                <SettingsView
                    open={self.settings_open}
                    settings={self.settings.clone()}
                    {on_apply}
                    {on_cancel}
                />
            </div>
        }
    }
}
