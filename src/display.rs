//! Window and canvas creation
//!
//! The game always wants fullscreen. Modes are tried in order of preference
//! and the first one SDL accepts wins; if none do, the last error is
//! returned to `main`.

use crate::settings::Settings;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::VideoSubsystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Borderless desktop fullscreen, scaled to the settings resolution
    ScaledFullscreen,
    /// Exclusive fullscreen at the settings resolution
    Fullscreen,
    Windowed,
}

/// Preference order
pub const DISPLAY_MODES: [DisplayMode; 3] = [
    DisplayMode::ScaledFullscreen,
    DisplayMode::Fullscreen,
    DisplayMode::Windowed,
];

/// Tries `attempt` for each mode in turn, returning the first success
pub fn cascade<T>(
    modes: &[DisplayMode],
    mut attempt: impl FnMut(DisplayMode) -> Result<T, String>,
) -> Result<(T, DisplayMode), String> {
    let mut last_error = String::from("no display modes to try");

    for &mode in modes {
        match attempt(mode) {
            Ok(value) => return Ok((value, mode)),
            Err(e) => {
                tracing::warn!("Display mode {:?} failed: {}", mode, e);
                last_error = e;
            }
        }
    }

    Err(last_error)
}

/// Creates the game window and canvas, falling back through [`DISPLAY_MODES`]
pub fn create_canvas(
    video: &VideoSubsystem,
    title: &str,
    settings: &Settings,
) -> Result<(Canvas<Window>, DisplayMode), String> {
    let (width, height) = (settings.screen_width, settings.screen_height);

    let (canvas, mode) = cascade(&DISPLAY_MODES, |mode| {
        let mut builder = video.window(title, width, height);
        match mode {
            DisplayMode::ScaledFullscreen => builder.fullscreen_desktop(),
            DisplayMode::Fullscreen => builder.fullscreen(),
            DisplayMode::Windowed => builder.position_centered(),
        };

        let window = builder.build().map_err(|e| e.to_string())?;
        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| e.to_string())?;

        if mode == DisplayMode::ScaledFullscreen {
            canvas
                .set_logical_size(width, height)
                .map_err(|e| e.to_string())?;
        }

        Ok(canvas)
    })?;

    tracing::info!("Display mode {:?} at {}x{}", mode, width, height);
    Ok((canvas, mode))
}

/// Native resolution of the primary display, if SDL can report it
pub fn desktop_size(video: &VideoSubsystem) -> Option<(u32, u32)> {
    match video.desktop_display_mode(0) {
        Ok(mode) if mode.w > 0 && mode.h > 0 => Some((mode.w as u32, mode.h as u32)),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Could not query desktop display mode: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_mode_wins() {
        let mut tried = Vec::new();
        let result = cascade(&DISPLAY_MODES, |mode| {
            tried.push(mode);
            Ok::<_, String>(1)
        });

        assert_eq!(result, Ok((1, DisplayMode::ScaledFullscreen)));
        assert_eq!(tried, vec![DisplayMode::ScaledFullscreen]);
    }

    #[test]
    fn test_falls_back_in_order() {
        let mut tried = Vec::new();
        let result = cascade(&DISPLAY_MODES, |mode| {
            tried.push(mode);
            match mode {
                DisplayMode::Windowed => Ok("window"),
                _ => Err(format!("{:?} unsupported", mode)),
            }
        });

        assert_eq!(result, Ok(("window", DisplayMode::Windowed)));
        assert_eq!(tried, DISPLAY_MODES.to_vec());
    }

    #[test]
    fn test_last_error_propagates() {
        let result: Result<((), DisplayMode), String> =
            cascade(&DISPLAY_MODES, |mode| Err(format!("{:?} failed", mode)));

        assert_eq!(result, Err("Windowed failed".to_string()));
    }

    #[test]
    fn test_empty_cascade_is_an_error() {
        let result = cascade(&[], |_| Ok::<_, String>(()));
        assert!(result.is_err());
    }
}
