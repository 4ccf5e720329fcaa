//! Sound effects and menu music
//!
//! Screens only see [`AudioContext`], which is passed by reference into
//! [`Button::try_click`](crate::gui::button::Button::try_click). The SDL_mixer
//! implementations live at the bottom of this file; tests substitute their own
//! [`SoundEffect`] and [`MusicPlayer`] doubles.

use sdl2::mixer::{Channel, Chunk, Music, MAX_VOLUME};
use std::cell::RefCell;
use std::path::Path;

/// A short one-shot sound
pub trait SoundEffect {
    /// Plays the sound at `volume` in `[0, 1]`
    fn play(&self, volume: f32) -> Result<(), String>;
}

/// Looping background music
pub trait MusicPlayer {
    fn is_loaded(&self) -> bool;
    fn is_playing(&self) -> bool;
    fn play_looped(&mut self, volume: f32) -> Result<(), String>;
    fn set_volume(&mut self, volume: f32);
    fn stop(&mut self);
}

/// Shared click sound plus the live SFX volume
///
/// Owned by the application controller. The volume is read at click time,
/// so a settings change is heard on the very next click.
pub struct AudioContext {
    click: Option<Box<dyn SoundEffect>>,
    sfx_volume: f32,
}

impl AudioContext {
    pub fn new(click: Option<Box<dyn SoundEffect>>, sfx_volume: f32) -> Self {
        AudioContext {
            click,
            sfx_volume: sfx_volume.clamp(0.0, 1.0),
        }
    }

    /// No click sound; used when the mixer is unavailable
    pub fn silent() -> Self {
        Self::new(None, 0.0)
    }

    #[cfg(test)]
    pub fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }

    /// Fire-and-forget click; failures are logged and swallowed
    pub fn play_click(&self) {
        if let Some(click) = &self.click {
            if let Err(e) = click.play(self.sfx_volume) {
                tracing::warn!("Failed to play click sound: {}", e);
            }
        }
    }
}

/// Converts a `[0, 1]` volume to SDL_mixer's `0..=MAX_VOLUME` range
pub fn to_mix_volume(volume: f32) -> i32 {
    (volume.clamp(0.0, 1.0) * MAX_VOLUME as f32).round() as i32
}

/// Click sound backed by an SDL_mixer chunk
pub struct SdlClickSound {
    chunk: RefCell<Chunk>,
}

impl SdlClickSound {
    pub fn load(path: &str) -> Result<Self, String> {
        if !Path::new(path).exists() {
            return Err(format!("sound file not found: {}", path));
        }

        let chunk = Chunk::from_file(path)?;
        Ok(SdlClickSound {
            chunk: RefCell::new(chunk),
        })
    }
}

impl SoundEffect for SdlClickSound {
    fn play(&self, volume: f32) -> Result<(), String> {
        let mut chunk = self.chunk.borrow_mut();
        chunk.set_volume(to_mix_volume(volume));
        Channel::all().play(&chunk, 0)?;
        Ok(())
    }
}

/// Menu music backed by SDL_mixer's single music stream
///
/// `None` when the track failed to load; every operation is then a no-op.
pub struct SdlMusic {
    music: Option<Music<'static>>,
}

impl SdlMusic {
    pub fn load(path: &str) -> Self {
        if !Path::new(path).exists() {
            tracing::warn!("Music '{}' not found, menu will be silent", path);
            return SdlMusic { music: None };
        }

        match Music::from_file(path) {
            Ok(music) => {
                tracing::debug!("Loaded music '{}'", path);
                SdlMusic { music: Some(music) }
            }
            Err(e) => {
                tracing::warn!("Failed to load music '{}': {}", path, e);
                SdlMusic { music: None }
            }
        }
    }

    pub fn none() -> Self {
        SdlMusic { music: None }
    }
}

impl MusicPlayer for SdlMusic {
    fn is_loaded(&self) -> bool {
        self.music.is_some()
    }

    fn is_playing(&self) -> bool {
        self.music.is_some() && Music::is_playing()
    }

    fn play_looped(&mut self, volume: f32) -> Result<(), String> {
        if let Some(music) = &self.music {
            Music::set_volume(to_mix_volume(volume));
            music.play(-1)?;
        }
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        if self.music.is_some() {
            Music::set_volume(to_mix_volume(volume));
        }
    }

    fn stop(&mut self) {
        if self.music.is_some() {
            Music::halt();
        }
    }
}
