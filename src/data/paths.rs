use sdl2::pixels::Color;

/// A skill shown in the Path detail panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillDef {
    pub name_key: &'static str,
    pub description_key: &'static str,
}

/// Static definition of a Path (faction)
///
/// All player-visible text is stored as localization keys and resolved at
/// draw time, so switching language never touches this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathDef {
    pub id: &'static str,
    pub name_key: &'static str,
    pub title_key: &'static str,
    pub description_key: &'static str,
    pub color: (u8, u8, u8),
    /// Illustration shown above the description; skipped if it fails to load
    pub illustration: &'static str,
    pub skills: &'static [SkillDef],
}

impl PathDef {
    pub fn color(&self) -> Color {
        let (r, g, b) = self.color;
        Color::RGB(r, g, b)
    }
}

/// All Paths, in the order they are offered to the player
// No Path ships skills yet; the detail panel omits the section for them
pub const PATHS: &[PathDef] = &[
    PathDef {
        id: "relaamon",
        name_key: "path_relaamon",
        title_key: "path_relaamon_title",
        description_key: "path_relaamon_desc",
        color: (25, 25, 112),
        illustration: "assets/paths/relaamon.png",
        skills: &[],
    },
    PathDef {
        id: "vortira",
        name_key: "path_vortira",
        title_key: "path_vortira_title",
        description_key: "path_vortira_desc",
        color: (139, 0, 0),
        illustration: "assets/paths/vortira.png",
        skills: &[],
    },
    PathDef {
        id: "light_shadow",
        name_key: "path_light_shadow",
        title_key: "path_light_shadow_title",
        description_key: "path_light_shadow_desc",
        color: (148, 0, 211),
        illustration: "assets/paths/light_shadow.png",
        skills: &[],
    },
    PathDef {
        id: "sailyora",
        name_key: "path_sailyora",
        title_key: "path_sailyora_title",
        description_key: "path_sailyora_desc",
        color: (255, 215, 0),
        illustration: "assets/paths/sailyora.png",
        skills: &[],
    },
    PathDef {
        id: "gravaan",
        name_key: "path_gravaan",
        title_key: "path_gravaan_title",
        description_key: "path_gravaan_desc",
        color: (47, 79, 79),
        illustration: "assets/paths/gravaan.png",
        skills: &[],
    },
    PathDef {
        id: "kyriel",
        name_key: "path_kyriel",
        title_key: "path_kyriel_title",
        description_key: "path_kyriel_desc",
        color: (0, 191, 255),
        illustration: "assets/paths/kyriel.png",
        skills: &[],
    },
    PathDef {
        id: "nerradis_onna",
        name_key: "path_nerradis_onna",
        title_key: "path_nerradis_onna_title",
        description_key: "path_nerradis_onna_desc",
        color: (34, 139, 34),
        illustration: "assets/paths/nerradis_onna.png",
        skills: &[],
    },
];

/// Gets a Path by id
///
/// Returns None if no Path with this id exists.
pub fn path_by_id(id: &str) -> Option<&'static PathDef> {
    PATHS.iter().find(|path| path.id == id)
}
