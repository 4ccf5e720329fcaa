//! Asset services consumed by the screens
//!
//! Screens never hold SDL textures directly. Loading an image registers it in
//! the renderer's texture cache and hands back an [`ImageInfo`] (cache key plus
//! native size) that draw commands refer to. The [`AssetSource`] trait is the
//! seam between screens and the SDL-backed cache, so screen logic can be
//! exercised without a window.
//!
//! The geometry helpers at the bottom implement the three scaling policies
//! used by the UI: cover (background), contain (splash), and fit without
//! upscaling (path illustrations).

use crate::video::VideoClip;
use sdl2::rect::Rect;
use thiserror::Error;

/// Errors produced while loading assets
///
/// All of these are recoverable: callers log them and fall back to a
/// degraded presentation.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },

    #[error("invalid manifest {path}: {source}")]
    Manifest {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A loaded image, addressed by its texture cache key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub key: String,
    pub width: u32,
    pub height: u32,
}

/// Loads images and video clips into whatever backs the renderer
pub trait AssetSource {
    /// Loads a still image
    fn load_image(&mut self, path: &str) -> Result<ImageInfo, AssetError>;

    /// Loads a video clip (frame sheet + manifest)
    fn load_video(&mut self, path: &str) -> Result<VideoClip, AssetError>;
}

/// Destination rect that covers the whole screen, cropping the overflow.
///
/// Scale is `max(scale_w, scale_h)` and the result is centered, so it may
/// extend past the screen edges but never letterboxes.
pub fn cover_rect(img_w: u32, img_h: u32, screen_w: u32, screen_h: u32) -> Rect {
    if img_w == 0 || img_h == 0 {
        return Rect::new(0, 0, screen_w.max(1), screen_h.max(1));
    }

    let scale = (screen_w as f32 / img_w as f32).max(screen_h as f32 / img_h as f32);
    centered(img_w, img_h, scale, Rect::new(0, 0, screen_w.max(1), screen_h.max(1)))
}

/// Largest aspect-preserving rect inside `area`, centered in it.
pub fn contain_rect(img_w: u32, img_h: u32, area: Rect) -> Rect {
    if img_w == 0 || img_h == 0 {
        return area;
    }

    let scale = (area.width() as f32 / img_w as f32).min(area.height() as f32 / img_h as f32);
    centered(img_w, img_h, scale, area)
}

/// Size of an image scaled down to fit `max_w` x `max_h`.
///
/// Aspect ratio is preserved and the image is never upscaled past its native
/// resolution.
pub fn fit_size(img_w: u32, img_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if img_w == 0 || img_h == 0 {
        return (0, 0);
    }

    let scale = (max_w as f32 / img_w as f32)
        .min(max_h as f32 / img_h as f32)
        .min(1.0);

    (
        (img_w as f32 * scale) as u32,
        (img_h as f32 * scale) as u32,
    )
}

fn centered(img_w: u32, img_h: u32, scale: f32, area: Rect) -> Rect {
    let w = ((img_w as f32 * scale) as u32).max(1);
    let h = ((img_h as f32 * scale) as u32).max(1);
    let center = area.center();
    Rect::new(center.x() - w as i32 / 2, center.y() - h as i32 / 2, w, h)
}
