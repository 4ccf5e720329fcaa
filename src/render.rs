//! Draw-command rendering system
//!
//! Screens describe what they want on screen as a flat list of
//! [`DrawCommand`]s; the [`SdlRenderer`] executes that list against an SDL2
//! canvas. This keeps every screen's `draw` a pure function of its state and
//! lets tests assert on the produced commands directly.
//!
//! # Architecture
//!
//! - `DrawCommand`: the closed set of primitives the UI needs
//! - `SdlRenderer`: canvas + texture cache + optional TTF fonts
//! - `FontSet`: TTF fonts per [`TextSize`], with a bitmap-font fallback
//!
//! The renderer also implements [`AssetSource`], since loaded images live in
//! its texture cache, and [`TextMetrics`], since only it knows the fonts.

use crate::assets::{AssetError, AssetSource, ImageInfo};
use crate::text::{bitmap_scale, draw_simple_text, BitmapMetrics, TextMetrics};
use crate::video::{TextureLease, VideoClip, VideoManifest};
use sdl2::image::LoadTexture;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::ttf::{Font, Sdl2TtfContext};
use sdl2::video::{Window, WindowContext};
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

/// Logical text sizes; the renderer maps these to font sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSize {
    Small,
    Normal,
    Large,
    Title,
}

impl TextSize {
    const ALL: [TextSize; 4] = [TextSize::Small, TextSize::Normal, TextSize::Large, TextSize::Title];

    /// TTF point size for this logical size
    fn point_size(self) -> u16 {
        match self {
            TextSize::Small => 22,
            TextSize::Normal => 30,
            TextSize::Large => 40,
            TextSize::Title => 56,
        }
    }
}

/// Which point of the text box `(x, y)` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    MidLeft,
    Center,
}

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole frame
    Clear(Color),

    /// Filled rectangle (alpha-blended)
    FillRect { rect: Rect, color: Color },

    /// Rectangle outline
    OutlineRect { rect: Rect, color: Color },

    /// Single line of text
    Text {
        text: String,
        x: i32,
        y: i32,
        color: Color,
        size: TextSize,
        anchor: Anchor,
    },

    /// Cached texture, optionally a sub-rect of it
    Image {
        key: String,
        src: Option<Rect>,
        dest: Rect,
    },
}

/// Identity of a rendered text line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LabelKey {
    text: String,
    size: TextSize,
    rgba: (u8, u8, u8, u8),
}

impl LabelKey {
    fn new(text: &str, size: TextSize, color: Color) -> Self {
        LabelKey {
            text: text.to_string(),
            size,
            rgba: color.rgba(),
        }
    }
}

/// Rendered text lines, reused across frames
///
/// Labels that change every keystroke (the name box, volume readouts) would
/// grow this without bound, so the whole cache is dropped once it reaches
/// `limit` entries.
struct LabelCache<T> {
    entries: HashMap<LabelKey, T>,
    limit: usize,
}

impl<T> LabelCache<T> {
    fn new(limit: usize) -> Self {
        LabelCache {
            entries: HashMap::new(),
            limit,
        }
    }

    fn get_or_create<F>(&mut self, key: LabelKey, create: F) -> Result<&T, String>
    where
        F: FnOnce() -> Result<T, String>,
    {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.limit {
            tracing::debug!("Label cache full ({} entries), clearing", self.entries.len());
            self.entries.clear();
        }

        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(create()?)),
        }
    }
}

const LABEL_CACHE_LIMIT: usize = 256;

/// TTF fonts keyed by logical size
///
/// Empty when the font file could not be loaded; text then falls back to the
/// procedural bitmap font.
pub struct FontSet<'ttf> {
    fonts: HashMap<TextSize, Font<'ttf, 'static>>,
}

impl<'ttf> FontSet<'ttf> {
    /// Loads one font per logical size from the first of `candidates` that exists
    pub fn load(ttf_context: &'ttf Sdl2TtfContext, candidates: &[&str]) -> Self {
        let mut fonts = HashMap::new();

        let Some(path) = first_existing(candidates) else {
            tracing::warn!("No font found in {:?}, using bitmap font", candidates);
            return FontSet { fonts };
        };
        tracing::info!("Using font '{}'", path);

        for size in TextSize::ALL {
            match ttf_context.load_font(path, size.point_size()) {
                Ok(font) => {
                    fonts.insert(size, font);
                }
                Err(e) => {
                    tracing::warn!("Failed to load font '{}' at {}pt: {}", path, size.point_size(), e);
                }
            }
        }

        FontSet { fonts }
    }

    fn get(&self, size: TextSize) -> Option<&Font<'ttf, 'static>> {
        self.fonts.get(&size)
    }
}

fn first_existing<'p>(candidates: &[&'p str]) -> Option<&'p str> {
    candidates.iter().copied().find(|path| Path::new(path).exists())
}

/// Executes draw commands on an SDL2 canvas
pub struct SdlRenderer<'a> {
    canvas: Canvas<Window>,
    texture_creator: &'a TextureCreator<WindowContext>,
    textures: HashMap<String, Texture<'a>>,
    fonts: FontSet<'a>,
    labels: LabelCache<Texture<'a>>,
    released: Rc<RefCell<Vec<String>>>,
}

impl<'a> SdlRenderer<'a> {
    pub fn new(
        mut canvas: Canvas<Window>,
        texture_creator: &'a TextureCreator<WindowContext>,
        fonts: FontSet<'a>,
    ) -> Self {
        // All translucent UI panels rely on alpha blending
        canvas.set_blend_mode(BlendMode::Blend);

        SdlRenderer {
            canvas,
            texture_creator,
            textures: HashMap::new(),
            fonts,
            labels: LabelCache::new(LABEL_CACHE_LIMIT),
            released: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Logical (game coordinate) size of the canvas
    pub fn logical_size(&self) -> (u32, u32) {
        match self.canvas.logical_size() {
            (0, 0) => self.canvas.output_size().unwrap_or((0, 0)),
            size => size,
        }
    }

    pub fn set_window_title(&mut self, title: &str) {
        if let Err(e) = self.canvas.window_mut().set_title(title) {
            tracing::warn!("Failed to set window title: {}", e);
        }
    }

    /// Drops textures whose leases were released since the last frame
    pub fn evict_released(&mut self) {
        for key in self.released.borrow_mut().drain(..) {
            if self.textures.remove(&key).is_some() {
                tracing::debug!("Released texture '{}'", key);
            }
        }
    }

    /// Runs a frame's worth of commands
    pub fn execute(&mut self, commands: &[DrawCommand]) -> Result<(), String> {
        for command in commands {
            match command {
                DrawCommand::Clear(color) => {
                    self.canvas.set_draw_color(*color);
                    self.canvas.clear();
                }
                DrawCommand::FillRect { rect, color } => {
                    self.canvas.set_draw_color(*color);
                    self.canvas.fill_rect(*rect)?;
                }
                DrawCommand::OutlineRect { rect, color } => {
                    self.canvas.set_draw_color(*color);
                    self.canvas.draw_rect(*rect)?;
                }
                DrawCommand::Text {
                    text,
                    x,
                    y,
                    color,
                    size,
                    anchor,
                } => {
                    self.draw_text(text, *x, *y, *color, *size, *anchor)?;
                }
                DrawCommand::Image { key, src, dest } => {
                    // Images that failed to load were never cached; skip them
                    if let Some(texture) = self.textures.get(key) {
                        self.canvas.copy(texture, *src, *dest)?;
                    }
                }
            }
        }

        Ok(())
    }

    pub fn present(&mut self) {
        self.canvas.present();
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        color: Color,
        size: TextSize,
        anchor: Anchor,
    ) -> Result<(), String> {
        if text.is_empty() {
            return Ok(());
        }

        let width = self.text_width(text, size) as i32;
        let height = self.line_height(size) as i32;
        let (left, top) = match anchor {
            Anchor::TopLeft => (x, y),
            Anchor::MidLeft => (x, y - height / 2),
            Anchor::Center => (x - width / 2, y - height / 2),
        };

        match self.fonts.get(size) {
            Some(font) => {
                let creator = self.texture_creator;
                let texture = self.labels.get_or_create(LabelKey::new(text, size, color), || {
                    let surface = font.render(text).blended(color).map_err(|e| e.to_string())?;
                    creator
                        .create_texture_from_surface(&surface)
                        .map_err(|e| e.to_string())
                })?;
                let query = texture.query();
                self.canvas
                    .copy(texture, None, Rect::new(left, top, query.width, query.height))
            }
            None => draw_simple_text(&mut self.canvas, text, left, top, color, bitmap_scale(size)),
        }
    }
}

impl TextMetrics for SdlRenderer<'_> {
    fn text_width(&self, text: &str, size: TextSize) -> u32 {
        match self.fonts.get(size) {
            Some(font) => font.size_of(text).map(|(w, _)| w).unwrap_or(0),
            None => BitmapMetrics.text_width(text, size),
        }
    }

    fn line_height(&self, size: TextSize) -> u32 {
        match self.fonts.get(size) {
            Some(font) => font.height().max(0) as u32,
            None => BitmapMetrics.line_height(size),
        }
    }
}

impl AssetSource for SdlRenderer<'_> {
    fn load_image(&mut self, path: &str) -> Result<ImageInfo, AssetError> {
        if let Some(texture) = self.textures.get(path) {
            let query = texture.query();
            return Ok(ImageInfo {
                key: path.to_string(),
                width: query.width,
                height: query.height,
            });
        }

        if !Path::new(path).exists() {
            return Err(AssetError::NotFound(path.to_string()));
        }

        let texture = self
            .texture_creator
            .load_texture(path)
            .map_err(|reason| AssetError::Decode {
                path: path.to_string(),
                reason,
            })?;

        let query = texture.query();
        self.textures.insert(path.to_string(), texture);
        tracing::debug!("Loaded image '{}' ({}x{})", path, query.width, query.height);

        Ok(ImageInfo {
            key: path.to_string(),
            width: query.width,
            height: query.height,
        })
    }

    fn load_video(&mut self, path: &str) -> Result<VideoClip, AssetError> {
        let manifest = VideoManifest::load_from_file(path)?;
        let frames = manifest.create_frames();
        if frames.is_empty() {
            return Err(AssetError::Decode {
                path: path.to_string(),
                reason: "manifest has no frames".to_string(),
            });
        }

        let sheet_path = manifest.sheet_path(path);
        let sheet = self.load_image(&sheet_path.to_string_lossy())?;
        let lease = TextureLease::new(sheet.key.clone(), self.released.clone());

        Ok(VideoClip::new(sheet.key, frames).with_lease(lease))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(text: &str) -> LabelKey {
        LabelKey::new(text, TextSize::Normal, Color::RGB(255, 255, 255))
    }

    #[test]
    fn test_label_created_once() {
        let mut cache = LabelCache::new(8);
        let mut created = 0;

        for _ in 0..3 {
            let value = cache
                .get_or_create(key("New Game"), || {
                    created += 1;
                    Ok(created)
                })
                .unwrap();
            assert_eq!(*value, 1);
        }
        assert_eq!(created, 1);
    }

    #[test]
    fn test_color_and_size_are_part_of_the_key() {
        let mut cache = LabelCache::new(8);
        cache.get_or_create(key("Back"), || Ok(1)).unwrap();

        let grey = LabelKey::new("Back", TextSize::Normal, Color::RGB(170, 170, 170));
        assert_eq!(*cache.get_or_create(grey, || Ok(2)).unwrap(), 2);

        let large = LabelKey::new("Back", TextSize::Large, Color::RGB(255, 255, 255));
        assert_eq!(*cache.get_or_create(large, || Ok(3)).unwrap(), 3);
        assert_eq!(cache.entries.len(), 3);
    }

    #[test]
    fn test_full_cache_is_cleared() {
        let mut cache = LabelCache::new(2);
        cache.get_or_create(key("a"), || Ok(1)).unwrap();
        cache.get_or_create(key("b"), || Ok(2)).unwrap();

        // Hits never evict
        cache.get_or_create(key("a"), || Ok(9)).unwrap();
        assert_eq!(cache.entries.len(), 2);

        cache.get_or_create(key("c"), || Ok(3)).unwrap();
        assert_eq!(cache.entries.len(), 1);
        assert!(cache.entries.contains_key(&key("c")));
    }

    #[test]
    fn test_first_existing_font_wins() {
        let dir = tempfile::TempDir::new().unwrap();
        let font = dir.path().join("font.ttf");
        std::fs::write(&font, b"").unwrap();
        let font = font.to_string_lossy().into_owned();

        assert_eq!(first_existing(&["missing/font.ttf", font.as_str()]), Some(font.as_str()));
        assert_eq!(first_existing(&["missing/font.ttf"]), None);
    }

    #[test]
    fn test_failed_render_is_not_cached() {
        let mut cache: LabelCache<u32> = LabelCache::new(8);
        assert!(cache.get_or_create(key("x"), || Err("no font".to_string())).is_err());
        assert!(cache.entries.is_empty());
    }
}
