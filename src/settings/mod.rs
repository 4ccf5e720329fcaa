//! Persistent user settings
//!
//! Settings live in a single pretty-printed JSON object:
//!
//! ```json
//! {
//!     "screen_width": 1920,
//!     "screen_height": 1080,
//!     "fullscreen": true,
//!     "language": "ru",
//!     "music_volume": 0.5,
//!     "sfx_volume": 0.7
//! }
//! ```
//!
//! # Architecture
//!
//! - `types`: the `Settings` record and `SettingsError`
//! - `store`: `SettingsStore` for reading/writing the file
//!
//! Loading never fails from the caller's point of view: missing fields are
//! backfilled from defaults and an unreadable file yields the defaults.

pub mod store;
pub mod types;

pub use store::SettingsStore;
pub use types::Settings;
