use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SCREEN_WIDTH: u32 = 1920;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 1080;

/// User-configurable settings
///
/// Owned by the application controller; screens only ever see a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Always true; the game only runs fullscreen
    pub fullscreen: bool,
    pub language: String,
    /// Music volume in `[0, 1]`
    pub music_volume: f32,
    /// Sound effect volume in `[0, 1]`
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            fullscreen: true,
            language: crate::data::DEFAULT_LOCALE.to_string(),
            music_volume: 0.5,
            sfx_volume: 0.7,
        }
    }
}

impl Settings {
    /// Defaults sized to the given display
    pub fn with_screen_size(width: u32, height: u32) -> Self {
        Settings {
            screen_width: width,
            screen_height: height,
            ..Self::default()
        }
    }

    /// Forces invariants that hand-edited files may break
    pub(crate) fn normalized(mut self) -> Self {
        self.fullscreen = true;
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("settings file is not a JSON object")]
    NotAnObject,
}
