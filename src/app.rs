//! Application controller
//!
//! Owns the canonical settings, the audio services and exactly one active
//! screen. Screens report what they want through [`ScreenRequest`]s and the
//! controller decides what happens next:
//!
//! | From              | Request          | Effect                                  |
//! |-------------------|------------------|-----------------------------------------|
//! | Splash            | SplashFinished   | Main Menu, menu music starts            |
//! | Main Menu         | NewGame          | fresh Character Creation                |
//! | Main Menu         | LoadGame         | logged, stays                           |
//! | Main Menu         | OpenSettings     | Settings                                |
//! | Main Menu         | Exit             | save settings, stop music, quit         |
//! | Settings          | BackToMainMenu   | Main Menu                               |
//! | Char. Creation    | BackToMainMenu   | Main Menu                               |
//! | Char. Creation    | CharacterCreated | logged, music stopped, Main Menu        |
//!
//! Entering the Main Menu restarts the music if it is not already playing.

use crate::assets::{cover_rect, AssetSource, ImageInfo};
use crate::audio::{AudioContext, MusicPlayer};
use crate::data::{format_text, get_text, path_by_id};
use crate::gui::{
    CharacterCreation, CharacterData, MainMenu, PendingChange, Point, Screen, ScreenContext,
    ScreenRequest, SettingsMenu, SplashScreen,
};
use crate::input_system::InputEvent;
use crate::render::DrawCommand;
use crate::settings::{Settings, SettingsStore};
use crate::text::TextMetrics;
use sdl2::pixels::Color;
use std::time::Duration;

pub const MAIN_MENU_BACKGROUND_FILE: &str = "assets/mainpage_image.png";

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Splash,
    MainMenu,
    Settings,
    CharacterCreation,
}

/// Whether the main loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFlow {
    Continue,
    Quit,
}

enum ActiveScreen {
    Splash(SplashScreen),
    MainMenu(MainMenu),
    Settings(SettingsMenu),
    CharacterCreation(CharacterCreation),
}

impl ActiveScreen {
    fn state(&self) -> AppState {
        match self {
            ActiveScreen::Splash(_) => AppState::Splash,
            ActiveScreen::MainMenu(_) => AppState::MainMenu,
            ActiveScreen::Settings(_) => AppState::Settings,
            ActiveScreen::CharacterCreation(_) => AppState::CharacterCreation,
        }
    }

    fn as_screen(&self) -> &dyn Screen {
        match self {
            ActiveScreen::Splash(screen) => screen,
            ActiveScreen::MainMenu(screen) => screen,
            ActiveScreen::Settings(screen) => screen,
            ActiveScreen::CharacterCreation(screen) => screen,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            ActiveScreen::Splash(screen) => screen,
            ActiveScreen::MainMenu(screen) => screen,
            ActiveScreen::Settings(screen) => screen,
            ActiveScreen::CharacterCreation(screen) => screen,
        }
    }
}

pub struct App {
    settings: Settings,
    store: SettingsStore,
    audio: AudioContext,
    music: Box<dyn MusicPlayer>,
    background: Option<ImageInfo>,
    screen: ActiveScreen,
    pointer: Point,
    screen_size: (u32, u32),
}

impl App {
    /// Loads the shared background and starts on the splash screen
    pub fn new(
        settings: Settings,
        store: SettingsStore,
        audio: AudioContext,
        music: Box<dyn MusicPlayer>,
        screen_size: (u32, u32),
        assets: &mut dyn AssetSource,
    ) -> Self {
        let background = match assets.load_image(MAIN_MENU_BACKGROUND_FILE) {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!("Main menu background unavailable: {}", e);
                None
            }
        };

        App {
            settings,
            store,
            audio,
            music,
            background,
            screen: ActiveScreen::Splash(SplashScreen::new(assets)),
            pointer: (0, 0),
            screen_size,
        }
    }

    pub fn state(&self) -> AppState {
        self.screen.state()
    }

    #[cfg(test)]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Localized window title
    pub fn window_title(&self) -> &'static str {
        get_text(&self.settings.language, "title")
    }

    /// Runs one frame: input events, pending settings, then update
    ///
    /// Pending settings are also committed before any screen switch, so a
    /// change and a Back click in the same frame both take effect.
    pub fn handle_frame(
        &mut self,
        events: &[InputEvent],
        dt: Duration,
        assets: &mut dyn AssetSource,
    ) -> AppFlow {
        // A splash with no media finished during construction
        if let ActiveScreen::Splash(splash) = &mut self.screen {
            if let Some(request) = splash.take_finish_request() {
                self.apply(request, assets);
            }
        }

        for event in events {
            if *event == InputEvent::Quit {
                tracing::info!("Window closed");
                self.commit_pending_settings();
                self.save_settings();
                return AppFlow::Quit;
            }

            match event {
                InputEvent::PointerDown { x, y, .. } | InputEvent::PointerMotion { x, y } => {
                    self.pointer = (*x, *y);
                }
                _ => {}
            }

            let ctx = ScreenContext::new(&self.settings, &self.audio, self.screen_size);
            let request = self
                .screen
                .as_screen_mut()
                .handle_event(event, self.pointer, &ctx);

            if let Some(request) = request {
                if self.apply(request, assets) == AppFlow::Quit {
                    return AppFlow::Quit;
                }
            }
        }

        self.commit_pending_settings();

        let ctx = ScreenContext::new(&self.settings, &self.audio, self.screen_size);
        let request = self.screen.as_screen_mut().update(self.pointer, dt, &ctx);
        match request {
            Some(request) => self.apply(request, assets),
            None => AppFlow::Continue,
        }
    }

    /// Composes the frame: background (except on the splash), then the screen
    pub fn draw(&self, metrics: &dyn TextMetrics) -> Vec<DrawCommand> {
        let mut commands = vec![DrawCommand::Clear(Color::RGB(0, 0, 0))];

        if let Some(background) = &self.background {
            if self.state() != AppState::Splash {
                let (w, h) = self.screen_size;
                commands.push(DrawCommand::Image {
                    key: background.key.clone(),
                    src: None,
                    dest: cover_rect(background.width, background.height, w, h),
                });
            }
        }

        let ctx = ScreenContext::new(&self.settings, &self.audio, self.screen_size);
        self.screen.as_screen().draw(&ctx, metrics, &mut commands);
        commands
    }

    fn apply(&mut self, request: ScreenRequest, assets: &mut dyn AssetSource) -> AppFlow {
        tracing::debug!("{:?} -> {:?}", self.state(), request);

        // Leaving the settings screen drops its working copy
        self.commit_pending_settings();

        let ctx = ScreenContext::new(&self.settings, &self.audio, self.screen_size);
        match request {
            ScreenRequest::SplashFinished | ScreenRequest::BackToMainMenu => {
                self.enter_main_menu();
            }
            ScreenRequest::NewGame => {
                self.screen = ActiveScreen::CharacterCreation(CharacterCreation::new(&ctx, assets));
            }
            ScreenRequest::LoadGame => {
                tracing::info!("{}", ctx.text("loading_not_implemented"));
            }
            ScreenRequest::OpenSettings => {
                self.screen = ActiveScreen::Settings(SettingsMenu::new(&ctx));
            }
            ScreenRequest::Exit => {
                self.save_settings();
                self.music.stop();
                return AppFlow::Quit;
            }
            ScreenRequest::CharacterCreated(character) => {
                self.on_character_created(&character);
            }
        }

        AppFlow::Continue
    }

    // Gameplay is not implemented yet; creation returns to the menu
    fn on_character_created(&mut self, character: &CharacterData) {
        let locale = self.settings.language.as_str();
        let path_name = path_by_id(character.path_id)
            .map(|path| get_text(locale, path.name_key))
            .unwrap_or(character.path_id);

        tracing::info!(
            "{}",
            format_text(
                locale,
                "character_created",
                &[("name", character.name.as_str()), ("path", path_name)]
            )
        );

        self.music.stop();
        self.enter_main_menu();
    }

    fn enter_main_menu(&mut self) {
        let ctx = ScreenContext::new(&self.settings, &self.audio, self.screen_size);
        self.screen = ActiveScreen::MainMenu(MainMenu::new(&ctx));

        if self.music.is_loaded() && !self.music.is_playing() {
            if let Err(e) = self.music.play_looped(self.settings.music_volume) {
                tracing::warn!("Failed to play menu music: {}", e);
            }
        }
    }

    /// Commits the settings screen's working copy, if it changed
    fn commit_pending_settings(&mut self) {
        let ActiveScreen::Settings(menu) = &mut self.screen else {
            return;
        };
        let Some(change) = menu.take_pending() else {
            return;
        };

        tracing::info!("Applying settings change: {:?}", change);
        self.settings = menu.working_settings().clone();
        if let Err(e) = self.store.save(&self.settings) {
            tracing::warn!("Failed to save settings: {}", e);
        }

        self.music.set_volume(self.settings.music_volume);
        self.audio.set_sfx_volume(self.settings.sfx_volume);
        if change == PendingChange::Language {
            tracing::debug!("Language is now '{}'", self.settings.language);
        }

        let ctx = ScreenContext::new(&self.settings, &self.audio, self.screen_size);
        menu.rebuild(&ctx);
    }

    fn save_settings(&self) {
        if let Err(e) = self.store.save(&self.settings) {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }
}
