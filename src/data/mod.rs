// Static game data
//
// This module holds the read-only tables the screens draw from:
// - Localized UI strings (ru / en)
// - Path (faction) definitions and their skills

pub mod localization;
pub mod paths;

// Re-export main entry points for convenient access
pub use localization::{format_text, get_text, next_locale, DEFAULT_LOCALE};
pub use paths::{path_by_id, PathDef, PATHS};
