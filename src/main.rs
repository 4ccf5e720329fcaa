use sdl2::image::InitFlag as ImageInitFlag;
use sdl2::mixer::{InitFlag as MixerInitFlag, Sdl2MixerContext, AUDIO_S16LSB, DEFAULT_CHANNELS};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

mod app;
mod assets;
mod audio;
mod data;
mod display;
mod gui;
mod input_system;
mod render;
mod settings;
mod text;
mod video;

use app::{App, AppFlow};
use audio::{AudioContext, MusicPlayer, SdlClickSound, SdlMusic, SoundEffect};
use input_system::InputSystem;
use render::{FontSet, SdlRenderer};
use settings::{Settings, SettingsStore};

// Bundled font first, then common system fonts with Cyrillic glyphs
const FONT_CANDIDATES: &[&str] = &[
    "assets/font.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];
const CLICK_SOUND_FILE: &str = "assets/button_sound.mp3";
const MENU_MUSIC_FILE: &str = "assets/main_menu.mp3";

const TARGET_FPS: u32 = 60;
const MIXER_CHANNELS: i32 = 16;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Opens the mixer; `None` means the game runs without sound
fn init_mixer() -> Option<Sdl2MixerContext> {
    if let Err(e) = sdl2::mixer::open_audio(44_100, AUDIO_S16LSB, DEFAULT_CHANNELS, 1024) {
        tracing::warn!("Audio device unavailable, continuing without sound: {}", e);
        return None;
    }

    match sdl2::mixer::init(MixerInitFlag::MP3) {
        Ok(context) => {
            sdl2::mixer::allocate_channels(MIXER_CHANNELS);
            Some(context)
        }
        Err(e) => {
            tracing::warn!("MP3 support unavailable, continuing without sound: {}", e);
            None
        }
    }
}

fn main() -> Result<(), String> {
    init_tracing();

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(ImageInitFlag::PNG | ImageInitFlag::JPG)?;
    let ttf_context = sdl2::ttf::init().map_err(|e| e.to_string())?;

    let _audio_subsystem = sdl_context.audio()?;
    let mixer_context = init_mixer();

    // Defaults follow the desktop, the stored file overrides them
    let defaults = match display::desktop_size(&video_subsystem) {
        Some((w, h)) => Settings::with_screen_size(w, h),
        None => Settings::default(),
    };
    let store = SettingsStore::default_location();
    let settings = store.load(&defaults);
    tracing::info!("Settings: {:?}", settings);

    let title = data::get_text(&settings.language, "title");
    let (canvas, mode) = display::create_canvas(&video_subsystem, title, &settings)?;
    tracing::info!("Display mode: {:?}", mode);

    let texture_creator = canvas.texture_creator();
    let fonts = FontSet::load(&ttf_context, FONT_CANDIDATES);
    let mut renderer = SdlRenderer::new(canvas, &texture_creator, fonts);
    video_subsystem.text_input().start();

    let (audio, music): (AudioContext, Box<dyn MusicPlayer>) = if mixer_context.is_some() {
        let click: Option<Box<dyn SoundEffect>> = match SdlClickSound::load(CLICK_SOUND_FILE) {
            Ok(sound) => Some(Box::new(sound)),
            Err(e) => {
                tracing::warn!("Click sound unavailable: {}", e);
                None
            }
        };
        let mut music: Box<dyn MusicPlayer> = Box::new(SdlMusic::load(MENU_MUSIC_FILE));
        music.set_volume(settings.music_volume);
        (AudioContext::new(click, settings.sfx_volume), music)
    } else {
        let music: Box<dyn MusicPlayer> = Box::new(SdlMusic::none());
        (AudioContext::silent(), music)
    };

    let screen_size = renderer.logical_size();
    tracing::info!("Screen size: {}x{}", screen_size.0, screen_size.1);

    let mut app = App::new(settings, store, audio, music, screen_size, &mut renderer);
    let mut input = InputSystem::new();
    let mut event_pump = sdl_context.event_pump()?;

    let frame_time = Duration::new(0, 1_000_000_000u32 / TARGET_FPS);
    let mut last_frame = Instant::now();
    let mut current_title = app.window_title();

    'running: loop {
        let now = Instant::now();
        let dt = now - last_frame;
        last_frame = now;

        renderer.evict_released();

        let events = input.poll_events(&mut event_pump);
        if app.handle_frame(&events, dt, &mut renderer) == AppFlow::Quit {
            break 'running;
        }

        if app.window_title() != current_title {
            current_title = app.window_title();
            renderer.set_window_title(current_title);
        }

        let commands = app.draw(&renderer);
        renderer.execute(&commands)?;
        renderer.present();

        // Cap framerate to ~60 FPS
        if let Some(remaining) = frame_time.checked_sub(now.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    tracing::info!("Goodbye");
    Ok(())
}
