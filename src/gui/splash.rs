//! Splash Screen
//!
//! Plays the intro clip if there is one, otherwise shows the static splash
//! image for a few seconds, otherwise finishes immediately. Any key or
//! pointer press skips ahead.

use super::button::Point;
use super::screen::{Screen, ScreenContext, ScreenRequest};
use crate::assets::{contain_rect, AssetSource, ImageInfo};
use crate::input_system::InputEvent;
use crate::render::DrawCommand;
use crate::text::TextMetrics;
use crate::video::VideoClip;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use std::time::Duration;

pub const SPLASH_VIDEO_FILE: &str = "assets/zastavka.json";
pub const SPLASH_IMAGE_FILE: &str = "assets/zastavka.png";

/// How long the static splash image stays up
pub const SPLASH_IMAGE_DURATION_MS: u64 = 3000;

enum SplashState {
    Loading,
    PlayingVideo { clip: VideoClip, elapsed: Duration },
    ShowingImage { image: ImageInfo, elapsed: Duration },
    Finished,
}

/// Observable phase of the splash, without the owned media
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashPhase {
    Loading,
    PlayingVideo,
    ShowingImage,
    Finished,
}

pub struct SplashScreen {
    state: SplashState,
    /// Set on entering `Finished`, cleared when the request is handed out
    pending_finish: bool,
}

impl SplashScreen {
    /// Loads the splash media: video first, then the still image
    pub fn new(assets: &mut dyn AssetSource) -> Self {
        let mut splash = SplashScreen {
            state: SplashState::Loading,
            pending_finish: false,
        };

        match assets.load_video(SPLASH_VIDEO_FILE) {
            Ok(clip) => {
                tracing::info!("Playing splash video ({:?})", clip.duration());
                splash.state = SplashState::PlayingVideo {
                    clip,
                    elapsed: Duration::ZERO,
                };
                return splash;
            }
            Err(e) => tracing::warn!("Splash video unavailable: {}", e),
        }

        match assets.load_image(SPLASH_IMAGE_FILE) {
            Ok(image) => {
                splash.state = SplashState::ShowingImage {
                    image,
                    elapsed: Duration::ZERO,
                };
            }
            Err(e) => {
                tracing::warn!("Splash image unavailable: {}", e);
                splash.finish();
            }
        }

        splash
    }

    #[cfg(test)]
    pub fn phase(&self) -> SplashPhase {
        match self.state {
            SplashState::Loading => SplashPhase::Loading,
            SplashState::PlayingVideo { .. } => SplashPhase::PlayingVideo,
            SplashState::ShowingImage { .. } => SplashPhase::ShowingImage,
            SplashState::Finished => SplashPhase::Finished,
        }
    }

    /// Hands out the finish request, at most once
    pub fn take_finish_request(&mut self) -> Option<ScreenRequest> {
        if self.pending_finish {
            self.pending_finish = false;
            Some(ScreenRequest::SplashFinished)
        } else {
            None
        }
    }

    fn finish(&mut self) {
        if matches!(self.state, SplashState::Finished) {
            return;
        }
        // Replacing the state drops the clip and releases its texture
        self.state = SplashState::Finished;
        self.pending_finish = true;
    }
}

impl Screen for SplashScreen {
    fn handle_event(
        &mut self,
        event: &InputEvent,
        _pointer: Point,
        _ctx: &ScreenContext,
    ) -> Option<ScreenRequest> {
        if event.is_press() {
            self.finish();
        }
        self.take_finish_request()
    }

    fn update(&mut self, _pointer: Point, dt: Duration, _ctx: &ScreenContext) -> Option<ScreenRequest> {
        let done = match &mut self.state {
            SplashState::PlayingVideo { clip, elapsed } => {
                *elapsed += dt;
                *elapsed > clip.duration()
            }
            SplashState::ShowingImage { elapsed, .. } => {
                *elapsed += dt;
                *elapsed > Duration::from_millis(SPLASH_IMAGE_DURATION_MS)
            }
            SplashState::Loading | SplashState::Finished => false,
        };

        if done {
            self.finish();
        }
        self.take_finish_request()
    }

    fn draw(&self, ctx: &ScreenContext, _metrics: &dyn TextMetrics, commands: &mut Vec<DrawCommand>) {
        commands.push(DrawCommand::Clear(Color::RGB(0, 0, 0)));

        let (w, h) = ctx.screen_size;
        let screen = Rect::new(0, 0, w.max(1), h.max(1));

        match &self.state {
            SplashState::PlayingVideo { clip, elapsed } => {
                if let Some(frame) = clip.frame_at(*elapsed) {
                    commands.push(DrawCommand::Image {
                        key: clip.texture_key().to_string(),
                        src: Some(frame.source_rect()),
                        dest: contain_rect(frame.width, frame.height, screen),
                    });
                }
            }
            SplashState::ShowingImage { image, .. } => {
                commands.push(DrawCommand::Image {
                    key: image.key.clone(),
                    src: None,
                    dest: contain_rect(image.width, image.height, screen),
                });
            }
            SplashState::Loading | SplashState::Finished => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetError;
    use crate::audio::AudioContext;
    use crate::input_system::{Key, PointerButton};
    use crate::settings::Settings;
    use crate::text::BitmapMetrics;
    use crate::video::{Frame, TextureLease};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Serves whichever splash media the test enables
    struct FakeAssets {
        video: bool,
        image: bool,
        released: Rc<RefCell<Vec<String>>>,
    }

    impl FakeAssets {
        fn new(video: bool, image: bool) -> Self {
            FakeAssets {
                video,
                image,
                released: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl AssetSource for FakeAssets {
        fn load_image(&mut self, path: &str) -> Result<ImageInfo, AssetError> {
            if !self.image {
                return Err(AssetError::NotFound(path.to_string()));
            }
            Ok(ImageInfo {
                key: path.to_string(),
                width: 800,
                height: 600,
            })
        }

        fn load_video(&mut self, path: &str) -> Result<VideoClip, AssetError> {
            if !self.video {
                return Err(AssetError::NotFound(path.to_string()));
            }
            let frames = vec![Frame::new(0, 0, 320, 180, 500), Frame::new(320, 0, 320, 180, 500)];
            Ok(VideoClip::new(path, frames).with_lease(TextureLease::new(path, self.released.clone())))
        }
    }

    fn run_frame(splash: &mut SplashScreen, ctx: &ScreenContext, dt_ms: u64) -> Option<ScreenRequest> {
        splash.update((0, 0), Duration::from_millis(dt_ms), ctx)
    }

    #[test]
    fn test_video_plays_then_finishes_once() {
        let settings = Settings::default();
        let audio = AudioContext::silent();
        let ctx = ScreenContext::new(&settings, &audio, (1920, 1080));
        let mut assets = FakeAssets::new(true, true);
        let mut splash = SplashScreen::new(&mut assets);

        assert_eq!(splash.phase(), SplashPhase::PlayingVideo);
        assert_eq!(splash.take_finish_request(), None);
        assert_eq!(run_frame(&mut splash, &ctx, 600), None);
        assert_eq!(run_frame(&mut splash, &ctx, 600), Some(ScreenRequest::SplashFinished));
        assert_eq!(splash.phase(), SplashPhase::Finished);
        assert_eq!(run_frame(&mut splash, &ctx, 600), None);

        // The clip was dropped on finish
        assert_eq!(*assets.released.borrow(), vec![SPLASH_VIDEO_FILE.to_string()]);
    }

    #[test]
    fn test_image_shows_for_three_seconds() {
        let settings = Settings::default();
        let audio = AudioContext::silent();
        let ctx = ScreenContext::new(&settings, &audio, (1920, 1080));
        let mut splash = SplashScreen::new(&mut FakeAssets::new(false, true));

        assert_eq!(splash.phase(), SplashPhase::ShowingImage);
        assert_eq!(run_frame(&mut splash, &ctx, 2000), None);
        assert_eq!(run_frame(&mut splash, &ctx, 1000), None);
        assert_eq!(run_frame(&mut splash, &ctx, 1), Some(ScreenRequest::SplashFinished));
        assert_eq!(run_frame(&mut splash, &ctx, 1000), None);
    }

    #[test]
    fn test_no_media_finishes_at_construction() {
        let settings = Settings::default();
        let audio = AudioContext::silent();
        let ctx = ScreenContext::new(&settings, &audio, (1920, 1080));
        let mut splash = SplashScreen::new(&mut FakeAssets::new(false, false));

        assert_eq!(splash.phase(), SplashPhase::Finished);
        assert_eq!(splash.take_finish_request(), Some(ScreenRequest::SplashFinished));
        assert_eq!(splash.take_finish_request(), None);
        assert_eq!(run_frame(&mut splash, &ctx, 16), None);
    }

    #[test]
    fn test_any_press_skips() {
        let settings = Settings::default();
        let audio = AudioContext::silent();
        let ctx = ScreenContext::new(&settings, &audio, (1920, 1080));
        let mut assets = FakeAssets::new(true, true);
        let mut splash = SplashScreen::new(&mut assets);

        let motion = InputEvent::PointerMotion { x: 5, y: 5 };
        assert_eq!(splash.handle_event(&motion, (5, 5), &ctx), None);
        assert_eq!(splash.phase(), SplashPhase::PlayingVideo);
        assert!(assets.released.borrow().is_empty());

        let press = InputEvent::PointerDown {
            button: PointerButton::Secondary,
            x: 5,
            y: 5,
        };
        assert_eq!(splash.handle_event(&press, (5, 5), &ctx), Some(ScreenRequest::SplashFinished));
        assert_eq!(*assets.released.borrow(), vec![SPLASH_VIDEO_FILE.to_string()]);

        let key = InputEvent::KeyDown(Key::Other);
        assert_eq!(splash.handle_event(&key, (5, 5), &ctx), None);
    }

    #[test]
    fn test_draws_current_frame_contained() {
        let settings = Settings::default();
        let audio = AudioContext::silent();
        let ctx = ScreenContext::new(&settings, &audio, (1920, 1080));
        let mut splash = SplashScreen::new(&mut FakeAssets::new(true, false));
        run_frame(&mut splash, &ctx, 700);

        let mut commands = Vec::new();
        splash.draw(&ctx, &BitmapMetrics, &mut commands);

        assert_eq!(commands[0], DrawCommand::Clear(Color::RGB(0, 0, 0)));
        assert_eq!(
            commands[1],
            DrawCommand::Image {
                key: SPLASH_VIDEO_FILE.to_string(),
                src: Some(Rect::new(320, 0, 320, 180)),
                dest: Rect::new(0, 0, 1920, 1080),
            }
        );
    }
}
