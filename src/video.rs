//! Frame-sheet video clips
//!
//! A splash "video" is a sprite sheet plus a JSON manifest listing each
//! frame's source rectangle and how long it stays on screen:
//!
//! ```json
//! {
//!     "sheet": "zastavka_frames.png",
//!     "frame_width": 640,
//!     "frame_height": 360,
//!     "frames": [ { "x": 0, "y": 0, "duration_ms": 40 }, ... ]
//! }
//! ```
//!
//! The sheet path is relative to the manifest. Frames are picked by elapsed
//! time, so playback needs no clock of its own.

use crate::assets::AssetError;
use serde::{Deserialize, Serialize};
use sdl2::rect::Rect;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoManifest {
    pub sheet: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frames: Vec<FrameData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameData {
    pub x: i32,
    pub y: i32,
    pub duration_ms: u64,
}

impl FrameData {
    pub fn to_frame(&self, width: u32, height: u32) -> Frame {
        Frame::new(self.x, self.y, width, height, self.duration_ms)
    }
}

impl VideoManifest {
    pub fn load_from_file(path: &str) -> Result<Self, AssetError> {
        if !Path::new(path).exists() {
            return Err(AssetError::NotFound(path.to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| AssetError::Manifest {
            path: path.to_string(),
            source,
        })
    }

    /// Path of the frame sheet, resolved against the manifest location
    pub fn sheet_path(&self, manifest_path: &str) -> PathBuf {
        Path::new(manifest_path)
            .parent()
            .map(|dir| dir.join(&self.sheet))
            .unwrap_or_else(|| PathBuf::from(&self.sheet))
    }

    pub fn create_frames(&self) -> Vec<Frame> {
        self.frames
            .iter()
            .map(|frame_data| frame_data.to_frame(self.frame_width, self.frame_height))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub duration: Duration,
}

impl Frame {
    pub fn new(x: i32, y: i32, width: u32, height: u32, duration_ms: u64) -> Self {
        Frame {
            x,
            y,
            width,
            height,
            duration: Duration::from_millis(duration_ms),
        }
    }

    pub fn source_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Keeps a cached texture alive for as long as its owner lives.
///
/// Dropping the lease queues the texture key for eviction; the renderer drains
/// the queue at the start of the next frame.
#[derive(Debug)]
pub struct TextureLease {
    key: String,
    released: Rc<RefCell<Vec<String>>>,
}

impl TextureLease {
    pub fn new(key: impl Into<String>, released: Rc<RefCell<Vec<String>>>) -> Self {
        TextureLease {
            key: key.into(),
            released,
        }
    }
}

impl Drop for TextureLease {
    fn drop(&mut self) {
        self.released.borrow_mut().push(std::mem::take(&mut self.key));
    }
}

/// A playable clip: frame sheet texture key plus timed frames
#[derive(Debug)]
pub struct VideoClip {
    texture: String,
    frames: Vec<Frame>,
    _lease: Option<TextureLease>,
}

impl VideoClip {
    pub fn new(texture: impl Into<String>, frames: Vec<Frame>) -> Self {
        VideoClip {
            texture: texture.into(),
            frames,
            _lease: None,
        }
    }

    pub fn with_lease(mut self, lease: TextureLease) -> Self {
        self._lease = Some(lease);
        self
    }

    pub fn texture_key(&self) -> &str {
        &self.texture
    }

    /// Total running time of the clip
    pub fn duration(&self) -> Duration {
        self.frames.iter().map(|frame| frame.duration).sum()
    }

    /// Frame on screen after `elapsed`, or `None` once the clip has ended
    pub fn frame_at(&self, elapsed: Duration) -> Option<&Frame> {
        let mut start = Duration::ZERO;
        for frame in &self.frames {
            let end = start + frame.duration;
            if elapsed < end {
                return Some(frame);
            }
            start = end;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> VideoClip {
        VideoClip::new(
            "intro",
            vec![
                Frame::new(0, 0, 64, 36, 100),
                Frame::new(64, 0, 64, 36, 100),
                Frame::new(128, 0, 64, 36, 300),
            ],
        )
    }

    #[test]
    fn test_duration_is_sum_of_frames() {
        assert_eq!(clip().duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_frame_at_picks_by_elapsed_time() {
        let clip = clip();
        assert_eq!(clip.frame_at(Duration::ZERO).map(|f| f.x), Some(0));
        assert_eq!(clip.frame_at(Duration::from_millis(150)).map(|f| f.x), Some(64));
        assert_eq!(clip.frame_at(Duration::from_millis(499)).map(|f| f.x), Some(128));
        assert!(clip.frame_at(Duration::from_millis(500)).is_none());
    }

    #[test]
    fn test_dropping_clip_releases_texture() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let clip = clip().with_lease(TextureLease::new("intro", released.clone()));
        assert!(released.borrow().is_empty());

        drop(clip);
        assert_eq!(*released.borrow(), vec!["intro".to_string()]);
    }

    #[test]
    fn test_manifest_parses_and_resolves_sheet() {
        let json = r#"{
            "sheet": "frames.png",
            "frame_width": 320,
            "frame_height": 180,
            "frames": [ { "x": 0, "y": 0, "duration_ms": 40 }, { "x": 320, "y": 0, "duration_ms": 40 } ]
        }"#;
        let manifest: VideoManifest = serde_json::from_str(json).unwrap();
        let frames = manifest.create_frames();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].source_rect(), Rect::new(320, 0, 320, 180));
        assert_eq!(
            manifest.sheet_path("assets/zastavka.json"),
            PathBuf::from("assets/frames.png")
        );
    }

    #[test]
    fn test_missing_manifest_is_not_found() {
        let result = VideoManifest::load_from_file("definitely/missing/clip.json");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }
}
