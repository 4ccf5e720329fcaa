//! Screen-Space GUI System
//!
//! Every screen of the pre-game flow plus the widget they are built from.
//!
//! # Architecture
//!
//! Screens:
//! - Implement the [`Screen`] contract (`handle_event` / `update` / `draw`)
//! - Keep their own small state machine; widgets for a state live inside it
//! - Leave by returning a [`ScreenRequest`], never by naming another screen
//! - Draw by appending [`DrawCommand`](crate::render::DrawCommand)s
//!
//! # Available Components
//!
//! - [`Button`] - hover/click/toggle widget with click sound
//! - [`SplashScreen`] - intro video or image
//! - [`MainMenu`] - New Game / Load Game / Settings / Exit
//! - [`SettingsMenu`] - language and volume
//! - [`CharacterCreation`] - name entry and Path selection
//!
//! # Example Usage
//!
//! ```ignore
//! let ctx = ScreenContext::new(&settings, &audio, (1920, 1080));
//! let mut menu = MainMenu::new(&ctx);
//!
//! for event in &events {
//!     if let Some(request) = menu.handle_event(event, pointer, &ctx) {
//!         // switch screens
//!     }
//! }
//! menu.update(pointer, dt, &ctx);
//! menu.draw(&ctx, &metrics, &mut commands);
//! ```

pub mod button;
pub mod character_creation;
pub mod main_menu;
pub mod screen;
pub mod settings_menu;
pub mod splash;

pub use button::Point;
pub use character_creation::CharacterCreation;
pub use main_menu::MainMenu;
pub use screen::{CharacterData, Screen, ScreenContext, ScreenRequest};
pub use settings_menu::{PendingChange, SettingsMenu};
pub use splash::SplashScreen;
