//! The contract every screen implements
//!
//! Screens are driven by the application controller once per frame:
//! `handle_event` for each input event, then `update`, then `draw`. A screen
//! that wants to leave returns a [`ScreenRequest`]; it never knows which
//! screen comes next.

use super::button::Point;
use crate::audio::AudioContext;
use crate::data::get_text;
use crate::input_system::InputEvent;
use crate::render::DrawCommand;
use crate::settings::Settings;
use crate::text::TextMetrics;
use std::time::Duration;

/// Result of a finished character creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterData {
    pub name: String,
    pub path_id: &'static str,
}

/// What a screen asks the controller to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenRequest {
    SplashFinished,
    NewGame,
    LoadGame,
    OpenSettings,
    Exit,
    BackToMainMenu,
    CharacterCreated(CharacterData),
}

/// Read-only services a screen may use while handling a frame
pub struct ScreenContext<'a> {
    pub settings: &'a Settings,
    pub audio: &'a AudioContext,
    pub screen_size: (u32, u32),
}

impl<'a> ScreenContext<'a> {
    pub fn new(settings: &'a Settings, audio: &'a AudioContext, screen_size: (u32, u32)) -> Self {
        ScreenContext {
            settings,
            audio,
            screen_size,
        }
    }

    /// Localized text in the current language
    pub fn text(&self, key: &'a str) -> &'a str {
        get_text(&self.settings.language, key)
    }
}

pub trait Screen {
    /// Handles one input event; `pointer` is the current pointer position
    fn handle_event(
        &mut self,
        event: &InputEvent,
        pointer: Point,
        ctx: &ScreenContext,
    ) -> Option<ScreenRequest>;

    /// Advances timers and hover state
    fn update(&mut self, pointer: Point, dt: Duration, ctx: &ScreenContext) -> Option<ScreenRequest>;

    /// Appends this frame's draw commands
    fn draw(&self, ctx: &ScreenContext, metrics: &dyn TextMetrics, commands: &mut Vec<DrawCommand>);
}
