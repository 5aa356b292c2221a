use miners_core::{Millis, Timings};
use serde::{Deserialize, Serialize};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::utils::*;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub timings: Timings,
}

impl StorageKey for Settings {
    const KEY: &'static str = "miners:settings:v1";
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TimingField {
    FacingFlash,
    BombFuse,
    Explosion,
    BombBlink,
    BombBlinkStep,
    GameOverFlash,
}

impl TimingField {
    pub(crate) const ALL: [Self; 6] = [
        Self::FacingFlash,
        Self::BombFuse,
        Self::Explosion,
        Self::BombBlink,
        Self::BombBlinkStep,
        Self::GameOverFlash,
    ];

    pub(crate) const fn label(self) -> &'static str {
        use TimingField::*;
        match self {
            FacingFlash => "Facing blink",
            BombFuse => "Bomb fuse",
            Explosion => "Explosion",
            BombBlink => "First bomb blink",
            BombBlinkStep => "Bomb blink speed-up",
            GameOverFlash => "Game over blink",
        }
    }

    pub(crate) fn get(self, timings: &Timings) -> Millis {
        use TimingField::*;
        match self {
            FacingFlash => timings.facing_flash,
            BombFuse => timings.bomb_fuse,
            Explosion => timings.explosion,
            BombBlink => timings.bomb_blink,
            BombBlinkStep => timings.bomb_blink_step,
            GameOverFlash => timings.game_over_flash,
        }
    }

    pub(crate) fn set(self, timings: &mut Timings, value: Millis) {
        use TimingField::*;
        let slot = match self {
            FacingFlash => &mut timings.facing_flash,
            BombFuse => &mut timings.bomb_fuse,
            Explosion => &mut timings.explosion,
            BombBlink => &mut timings.bomb_blink,
            BombBlinkStep => &mut timings.bomb_blink_step,
            GameOverFlash => &mut timings.game_over_flash,
        };
        *slot = value;
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    #[prop_or_default]
    pub open: bool,
    pub settings: Settings,
    pub on_apply: Callback<Settings>,
    pub on_cancel: Callback<()>,
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let draft = use_state(|| props.settings.clone());

    let rows: Html = TimingField::ALL
        .into_iter()
        .map(|field| {
            let oninput = {
                let draft = draft.clone();
                Callback::from(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    match input.value().parse::<Millis>() {
                        Ok(value) => {
                            let mut next = (*draft).clone();
                            field.set(&mut next.timings, value);
                            draft.set(next);
                        }
                        Err(err) => {
                            log::warn!("Ignoring {:?} for {:?}: {}", input.value(), field, err)
                        }
                    }
                })
            };
            let value = field.get(&draft.timings).to_string();
            html! {
                <label>
                    {field.label()}
                    <input type="number" min="0" step="25" {value} {oninput}/>
                    <small>{"ms"}</small>
                </label>
            }
        })
        .collect();

    let onreset = {
        let draft = draft.clone();
        Callback::from(move |_: MouseEvent| draft.set(Settings::default()))
    };
    let oncancel = {
        let draft = draft.clone();
        let settings = props.settings.clone();
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(settings.clone());
            on_cancel.emit(());
        })
    };
    let onapply = {
        let draft = draft.clone();
        let on_apply = props.on_apply.clone();
        Callback::from(move |_: MouseEvent| on_apply.emit((*draft).clone()))
    };

    html! {
        <dialog id="settings" open={props.open}>
            <article>
                <h2>{"Settings"}</h2>
                { rows }
                <footer>
                    <button onclick={onreset} type="button">{"Defaults"}</button>
                    <button onclick={oncancel} type="reset">{"Cancel"}</button>
                    <button onclick={onapply}>{"Apply"}</button>
                </footer>
            </article>
        </dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_fields_cover_every_timing() {
        let mut timings = Timings::default();
        for (value, field) in (1..).zip(TimingField::ALL) {
            field.set(&mut timings, value);
        }

        assert_eq!(
            timings,
            Timings {
                facing_flash: 1,
                bomb_fuse: 2,
                explosion: 3,
                bomb_blink: 4,
                bomb_blink_step: 5,
                game_over_flash: 6,
            }
        );
        for (value, field) in (1..).zip(TimingField::ALL) {
            assert_eq!(field.get(&timings), value);
        }
    }

    #[test]
    fn stored_settings_tolerate_missing_fields() {
        let settings: Settings = serde_json::from_str(r#"{"timings": {"explosion": 800}}"#).unwrap();
        assert_eq!(settings.timings.explosion, 800);
        assert_eq!(settings.timings.bomb_fuse, 2000);

        let empty: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Settings::default());
    }

    #[test]
    fn storage_key_is_versioned() {
        assert_eq!(<Settings as StorageKey>::KEY, "miners:settings:v1");
    }
}
