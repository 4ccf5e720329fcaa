//! Settings Screen
//!
//! Edits a working copy of the settings. Every change is applied to the copy
//! immediately and flagged as pending; the controller picks the copy up at
//! the end of the frame, persists it and rebuilds this screen so the labels
//! catch up.

use super::button::{Button, Point};
use super::screen::{Screen, ScreenContext, ScreenRequest};
use crate::data::{get_text, next_locale};
use crate::input_system::InputEvent;
use crate::render::{Anchor, DrawCommand, TextSize};
use crate::settings::Settings;
use crate::text::TextMetrics;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use std::time::Duration;

const ROW_WIDTH: u32 = 400;
const ROW_HEIGHT: u32 = 40;
const START_Y: i32 = 150;
const SPACING: i32 = 70;
const STEP_BUTTON_WIDTH: u32 = 40;
const VOLUME_STEP: f32 = 0.1;

const TITLE_Y: i32 = 100;
const TITLE_COLOR: Color = Color::RGB(255, 215, 0);

const NEUTRAL: Color = Color::RGB(100, 100, 100);
const NEUTRAL_HOVER: Color = Color::RGB(200, 200, 200);
const PLUS_COLOR: Color = Color::RGB(50, 205, 50);
const MINUS_COLOR: Color = Color::RGB(178, 34, 34);

/// Which setting changed since the controller last looked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingChange {
    Language,
    MusicVolume,
    SfxVolume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsAction {
    ToggleLanguage,
    MusicUp,
    MusicDown,
    SfxUp,
    SfxDown,
    Back,
}

struct Widget {
    button: Button,
    /// `None` for display-only rows
    action: Option<SettingsAction>,
}

pub struct SettingsMenu {
    settings: Settings,
    pending: Option<PendingChange>,
    widgets: Vec<Widget>,
}

/// Moves a volume by `delta`, rounded to one decimal and kept in `[0, 1]`
pub fn step_volume(volume: f32, delta: f32) -> f32 {
    (((volume + delta) * 10.0).round() / 10.0).clamp(0.0, 1.0)
}

fn volume_label(locale: &str, key: &str, volume: f32) -> String {
    format!("{}: {}%", get_text(locale, key), (volume * 100.0).round() as i32)
}

impl SettingsMenu {
    pub fn new(ctx: &ScreenContext) -> Self {
        let mut menu = SettingsMenu {
            settings: ctx.settings.clone(),
            pending: None,
            widgets: Vec::new(),
        };
        menu.build_widgets(ctx.screen_size);
        menu
    }

    /// Takes the pending marker, leaving none
    pub fn take_pending(&mut self) -> Option<PendingChange> {
        self.pending.take()
    }

    pub fn working_settings(&self) -> &Settings {
        &self.settings
    }

    /// Re-syncs with the committed settings and rebuilds all widgets
    pub fn rebuild(&mut self, ctx: &ScreenContext) {
        self.settings = ctx.settings.clone();
        self.build_widgets(ctx.screen_size);
    }

    fn build_widgets(&mut self, (width, height): (u32, u32)) {
        let locale = self.settings.language.as_str();
        let x = width as i32 / 2 - ROW_WIDTH as i32 / 2;
        let row = |i: i32| Rect::new(x, START_Y + i * SPACING, ROW_WIDTH, ROW_HEIGHT);
        let plus = |i: i32| {
            Rect::new(
                x + ROW_WIDTH as i32 - 50,
                START_Y + i * SPACING,
                STEP_BUTTON_WIDTH,
                ROW_HEIGHT,
            )
        };
        let minus = |i: i32| Rect::new(x + 10, START_Y + i * SPACING, STEP_BUTTON_WIDTH, ROW_HEIGHT);

        let language_label = format!(
            "{}: {}",
            get_text(locale, "language"),
            locale.to_uppercase()
        );

        let mut widgets = vec![Widget {
            button: Button::new(row(0), language_label, NEUTRAL, NEUTRAL_HOVER)
                .toggleable()
                .with_toggled(locale == "en"),
            action: Some(SettingsAction::ToggleLanguage),
        }];

        let volumes = [
            ("music_volume", self.settings.music_volume, SettingsAction::MusicUp, SettingsAction::MusicDown),
            ("sfx_volume", self.settings.sfx_volume, SettingsAction::SfxUp, SettingsAction::SfxDown),
        ];

        for (i, (key, volume, up, down)) in volumes.into_iter().enumerate() {
            let i = i as i32 + 1;
            // Readout first so the +/- buttons draw on top of it
            widgets.push(Widget {
                button: Button::new(row(i), volume_label(locale, key, volume), NEUTRAL, NEUTRAL),
                action: None,
            });
            widgets.push(Widget {
                button: Button::new(plus(i), "+", PLUS_COLOR, NEUTRAL_HOVER),
                action: Some(up),
            });
            widgets.push(Widget {
                button: Button::new(minus(i), "-", MINUS_COLOR, NEUTRAL_HOVER),
                action: Some(down),
            });
        }

        widgets.push(Widget {
            button: Button::new(
                Rect::new(50, height as i32 - 80, 150, 50),
                get_text(locale, "back"),
                NEUTRAL,
                NEUTRAL_HOVER,
            ),
            action: Some(SettingsAction::Back),
        });

        self.widgets = widgets;
    }

    fn apply(&mut self, action: SettingsAction) -> Option<ScreenRequest> {
        match action {
            SettingsAction::ToggleLanguage => {
                self.settings.language = next_locale(&self.settings.language).to_string();
                self.pending = Some(PendingChange::Language);
            }
            SettingsAction::MusicUp | SettingsAction::MusicDown => {
                let delta = if action == SettingsAction::MusicUp {
                    VOLUME_STEP
                } else {
                    -VOLUME_STEP
                };
                self.settings.music_volume = step_volume(self.settings.music_volume, delta);
                tracing::debug!("Music volume set to {}", self.settings.music_volume);
                self.pending = Some(PendingChange::MusicVolume);
            }
            SettingsAction::SfxUp | SettingsAction::SfxDown => {
                let delta = if action == SettingsAction::SfxUp {
                    VOLUME_STEP
                } else {
                    -VOLUME_STEP
                };
                self.settings.sfx_volume = step_volume(self.settings.sfx_volume, delta);
                tracing::debug!("SFX volume set to {}", self.settings.sfx_volume);
                self.pending = Some(PendingChange::SfxVolume);
            }
            SettingsAction::Back => return Some(ScreenRequest::BackToMainMenu),
        }
        None
    }

    #[cfg(test)]
    fn bounds_of(&self, action: SettingsAction) -> Rect {
        self.widgets
            .iter()
            .find(|w| w.action == Some(action))
            .map(|w| w.button.bounds())
            .unwrap_or_else(|| panic!("no widget for {:?}", action))
    }
}

impl Screen for SettingsMenu {
    fn handle_event(
        &mut self,
        event: &InputEvent,
        pointer: Point,
        ctx: &ScreenContext,
    ) -> Option<ScreenRequest> {
        // First actionable widget under the pointer wins
        let action = self.widgets.iter_mut().find_map(|widget| {
            let action = widget.action?;
            widget.button.try_click(pointer, event, ctx.audio).then_some(action)
        })?;

        self.apply(action)
    }

    fn update(&mut self, pointer: Point, _dt: Duration, _ctx: &ScreenContext) -> Option<ScreenRequest> {
        for widget in &mut self.widgets {
            widget.button.set_hover(pointer);
        }
        None
    }

    fn draw(&self, ctx: &ScreenContext, _metrics: &dyn TextMetrics, commands: &mut Vec<DrawCommand>) {
        commands.push(DrawCommand::Text {
            text: get_text(&self.settings.language, "settings_title").to_string(),
            x: ctx.screen_size.0 as i32 / 2,
            y: TITLE_Y,
            color: TITLE_COLOR,
            size: TextSize::Title,
            anchor: Anchor::Center,
        });

        for widget in &self.widgets {
            widget.button.draw(commands);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioContext;
    use crate::gui::button::tests::{click_at, recording_audio};

    fn click(menu: &mut SettingsMenu, action: SettingsAction, ctx: &ScreenContext) -> Option<ScreenRequest> {
        let center = menu.bounds_of(action).center();
        menu.handle_event(&click_at(center.x(), center.y()), (center.x(), center.y()), ctx)
    }

    fn labels(menu: &SettingsMenu) -> Vec<String> {
        menu.widgets.iter().map(|w| w.button.label().to_string()).collect()
    }

    #[test]
    fn test_step_volume_rounds_and_clamps() {
        assert_eq!(step_volume(0.5, 0.1), 0.6);
        assert_eq!(step_volume(0.7, -0.1), 0.6);
        assert_eq!(step_volume(1.0, 0.1), 1.0);
        assert_eq!(step_volume(0.0, -0.1), 0.0);
        assert_eq!(step_volume(0.95, 0.1), 1.0);
        assert_eq!(step_volume(0.33, 0.1), 0.4);
    }

    #[test]
    fn test_step_volume_idempotent_at_bounds() {
        let mut v = 0.8;
        for _ in 0..5 {
            v = step_volume(v, 0.1);
        }
        assert_eq!(v, 1.0);
        assert_eq!(step_volume(v, 0.1), v);
    }

    #[test]
    fn test_layout() {
        let settings = Settings::default();
        let audio = AudioContext::silent();
        let ctx = ScreenContext::new(&settings, &audio, (1920, 1080));
        let menu = SettingsMenu::new(&ctx);

        assert_eq!(menu.bounds_of(SettingsAction::ToggleLanguage), Rect::new(760, 150, 400, 40));
        assert_eq!(menu.bounds_of(SettingsAction::MusicUp), Rect::new(1110, 220, 40, 40));
        assert_eq!(menu.bounds_of(SettingsAction::MusicDown), Rect::new(770, 220, 40, 40));
        assert_eq!(menu.bounds_of(SettingsAction::SfxUp), Rect::new(1110, 290, 40, 40));
        assert_eq!(menu.bounds_of(SettingsAction::Back), Rect::new(50, 1000, 150, 50));
    }

    #[test]
    fn test_labels() {
        let settings = Settings::default();
        let audio = AudioContext::silent();
        let ctx = ScreenContext::new(&settings, &audio, (1920, 1080));
        let menu = SettingsMenu::new(&ctx);

        let labels = labels(&menu);
        assert_eq!(labels[0], "Язык: RU");
        assert_eq!(labels[1], "Громкость музыки: 50%");
        assert_eq!(labels[4], "Громкость эффектов: 70%");
    }

    #[test]
    fn test_language_toggle_marks_pending() {
        let settings = Settings::default();
        let audio = AudioContext::silent();
        let ctx = ScreenContext::new(&settings, &audio, (1920, 1080));
        let mut menu = SettingsMenu::new(&ctx);

        assert_eq!(click(&mut menu, SettingsAction::ToggleLanguage, &ctx), None);
        assert_eq!(menu.working_settings().language, "en");
        assert_eq!(menu.take_pending(), Some(PendingChange::Language));
        assert_eq!(menu.take_pending(), None);
    }

    #[test]
    fn test_volume_buttons_fire_once_per_click() {
        let settings = Settings::default();
        let (audio, plays) = recording_audio(0.7);
        let ctx = ScreenContext::new(&settings, &audio, (1920, 1080));
        let mut menu = SettingsMenu::new(&ctx);

        // The +/- buttons sit on top of the readout row; only + fires
        click(&mut menu, SettingsAction::MusicUp, &ctx);
        assert_eq!(menu.working_settings().music_volume, 0.6);
        assert_eq!(menu.take_pending(), Some(PendingChange::MusicVolume));
        assert_eq!(plays.borrow().len(), 1);

        click(&mut menu, SettingsAction::SfxDown, &ctx);
        assert_eq!(menu.working_settings().sfx_volume, 0.6);
        assert_eq!(menu.take_pending(), Some(PendingChange::SfxVolume));
    }

    #[test]
    fn test_readout_row_is_inert() {
        let settings = Settings::default();
        let (audio, plays) = recording_audio(0.7);
        let ctx = ScreenContext::new(&settings, &audio, (1920, 1080));
        let mut menu = SettingsMenu::new(&ctx);

        // Middle of the music readout, between the - and + buttons
        assert_eq!(menu.handle_event(&click_at(960, 240), (960, 240), &ctx), None);
        assert_eq!(menu.take_pending(), None);
        assert!(plays.borrow().is_empty());
    }

    #[test]
    fn test_back_requests_main_menu() {
        let settings = Settings::default();
        let audio = AudioContext::silent();
        let ctx = ScreenContext::new(&settings, &audio, (1920, 1080));
        let mut menu = SettingsMenu::new(&ctx);

        assert_eq!(click(&mut menu, SettingsAction::Back, &ctx), Some(ScreenRequest::BackToMainMenu));
        assert_eq!(menu.take_pending(), None);
    }

    #[test]
    fn test_rebuild_refreshes_labels() {
        let settings = Settings::default();
        let audio = AudioContext::silent();
        let ctx = ScreenContext::new(&settings, &audio, (1920, 1080));
        let mut menu = SettingsMenu::new(&ctx);

        click(&mut menu, SettingsAction::ToggleLanguage, &ctx);
        let committed = menu.working_settings().clone();
        let ctx = ScreenContext::new(&committed, &audio, (1920, 1080));
        menu.rebuild(&ctx);

        let labels = labels(&menu);
        assert_eq!(labels[0], "Language: EN");
        assert_eq!(labels[1], "Music Volume: 50%");
        assert!(menu.widgets[0].button.is_toggled());
    }
}
