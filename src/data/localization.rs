//! Localized UI strings
//!
//! Two tables, `ru` and `en`. Lookups never fail: an unknown locale falls
//! back to [`DEFAULT_LOCALE`] and an unknown key comes back as itself, so a
//! missing translation shows up on screen as its key.

use std::collections::HashMap;
use std::sync::OnceLock;

pub const DEFAULT_LOCALE: &str = "ru";

/// Locales in toggle order
pub const LOCALES: [&str; 2] = ["ru", "en"];

type Table = HashMap<&'static str, &'static str>;

const RU: &[(&str, &str)] = &[
    ("title", "Вселенная Релаамо"),
    ("main_menu", "Главное Меню"),
    ("new_game", "Новая Игра"),
    ("load_game", "Загрузить Игру"),
    ("settings", "Настройки"),
    ("exit", "Выход"),
    ("back", "Назад"),
    ("continue", "Нажмите любую клавишу для продолжения..."),
    ("settings_title", "Настройки"),
    ("language", "Язык"),
    ("music_volume", "Громкость музыки"),
    ("sfx_volume", "Громкость эффектов"),
    ("selected", "Выбрано"),
    ("path_selected", "Вы выбрали"),
    ("loading_not_implemented", "Функция загрузки ещё не реализована."),
    ("enter_name_title", "Введите имя вашего персонажа"),
    ("enter_name_placeholder", "Введите имя героя..."),
    ("confirm", "Подтвердить"),
    ("choose_path_title", "{name}, выберите свой Путь"),
    ("view_path_title", "Детали Пути"),
    ("select", "Выбрать"),
    ("path_description", "Описание"),
    ("path_skills", "Навыки"),
    ("character_created", "Персонаж {name} создан! Путь: {path}"),
    ("path_relaamon", "Путь Релаамона"),
    ("path_relaamon_title", "Верховный Ткач, Отец-Кристалл"),
    (
        "path_relaamon_desc",
        "Не бог, но сама суть Релаамо, проявленная в сознании. Его голос — гул энергетических вихрей, а тело — структура Кристалла. Он не вмешивается в миры, но его ритм задает законы бытия. Мудрецы Страрии верят, что медитация на его грани открывает истину мироздания.",
    ),
    ("path_vortira", "Путь Вортиры"),
    ("path_vortira_title", "Мать Хаоса и Порядка, Владычица Эфирных Воронок"),
    (
        "path_vortira_desc",
        "Рожденная из первого импульса, ударившего в эфирную воронку. Её двойственная природа отражается в спиралях галактик и бурях на молодых планетах. Её храмы на Страрии строят в виде вращающихся башен, где жрецы вычисляют «моменты равновесия» между разрушением и созиданием.",
    ),
    ("path_light_shadow", "Путь Светотени"),
    ("path_light_shadow_title", "Близнецы Света и Тени"),
    (
        "path_light_shadow_desc",
        "Две грани одного Аэтрала. Люминар наполняет звёзды сиянием, а Ноктюр плетёт чёрные дыры — «врата перерождения». На фресках Нэрадиса их изображают сцепленными руками, образуя кольцо. Легенды Страрии гласят, что их вечный спор рождает смену дня и ночи даже в мирах без солнц.",
    ),
    ("path_sailyora", "Путь Сайлоры"),
    ("path_sailyora_title", "Богиня Звёздных Нитей"),
    (
        "path_sailyora_desc",
        "Её пальцы сплетают магнитные поля и нейтринные реки. Говорят, каждая сверхновая — это узел на её космическом станке. На планетах с кольцами её почитают как покровительницу влюблённых, обменивающихся кольцами из звёздной пыли.",
    ),
    ("path_gravaan", "Путь Граваана"),
    ("path_gravaan_title", "Хранитель Гравитационных Узлов"),
    (
        "path_gravaan_desc",
        "Его тело — сеть из чёрных дыр и тёмной материи. Молятся ему, бросая в пропасти камни с высеченными молитвами: считается, что те, что не достигнут дна, будут подхвачены его незримыми руками.",
    ),
    ("path_kyriel", "Путь Кириэль"),
    ("path_kyriel_title", "Стражиха Времени, Та, Что Режет Истории"),
    (
        "path_kyriel_desc",
        "Её клинок — вспышки гамма-излучений — обрывает линии судеб. На Страрии её культ запрещён, но в подпольных святилищах ей дарят песочные часы, наполненные прахом умерших, веря, что так она продлит участь живых.",
    ),
    ("path_nerradis_onna", "Путь Нэрадис-Онна"),
    ("path_nerradis_onna_title", "Дух-Мать Галактики"),
    (
        "path_nerradis_onna_desc",
        "Её тело — рукава спирали Нэрадис, глаза — скопления сверхновых. Планета Стрария — родинка на её ладони. Шаманы вызывают её дух, танцуя под светом трёх лун, пока тело не покроется узорами, похожими на звёздные карты.",
    ),
];

const EN: &[(&str, &str)] = &[
    ("title", "Universe of Relaamo"),
    ("main_menu", "Main Menu"),
    ("new_game", "New Game"),
    ("load_game", "Load Game"),
    ("settings", "Settings"),
    ("exit", "Exit"),
    ("back", "Back"),
    ("continue", "Press any key to continue..."),
    ("settings_title", "Settings"),
    ("language", "Language"),
    ("music_volume", "Music Volume"),
    ("sfx_volume", "SFX Volume"),
    ("selected", "Selected"),
    ("path_selected", "You have chosen"),
    ("loading_not_implemented", "Loading function is not yet implemented."),
    ("enter_name_title", "Enter your character's name"),
    ("enter_name_placeholder", "Enter hero's name..."),
    ("confirm", "Confirm"),
    ("choose_path_title", "{name}, choose your Path"),
    ("view_path_title", "Path Details"),
    ("select", "Select"),
    ("path_description", "Description"),
    ("path_skills", "Skills"),
    ("character_created", "Character {name} created! Path: {path}"),
    ("path_relaamon", "Path of Relaamon"),
    ("path_relaamon_title", "Supreme Weaver, Father-Crystal"),
    (
        "path_relaamon_desc",
        "Not a god, but the very essence of Relaamo, manifested in consciousness. His voice is the hum of energetic vortices, and his body is the structure of the Crystal. He does not interfere in the worlds, but his rhythm sets the laws of being. The sages of Staria believe that meditation on his facet reveals the truth of the universe.",
    ),
    ("path_vortira", "Path of Vortira"),
    ("path_vortira_title", "Mother of Chaos and Order, Mistress of Aether Vortices"),
    (
        "path_vortira_desc",
        "Born from the first impulse that struck an aether vortex. Her dual nature is reflected in the spirals of galaxies and storms on young planets. Her temples on Staria are built as rotating towers, where priests calculate the 'moments of equilibrium' between destruction and creation.",
    ),
    ("path_light_shadow", "Path of Light and Shadow"),
    ("path_light_shadow_title", "Twins of Light and Shadow"),
    (
        "path_light_shadow_desc",
        "Two facets of one Aetral. Luminar fills the stars with radiance, while Noctur weaves black holes - 'gates of rebirth'. Frescoes on Nerradis depict them clasping hands, forming a ring. Legends of Staria say their eternal strife gives birth to day and night even in sunless worlds.",
    ),
    ("path_sailyora", "Path of Sailyora"),
    ("path_sailyora_title", "Goddess of Stellar Threads"),
    (
        "path_sailyora_desc",
        "Her fingers weave magnetic fields and neutrino rivers. They say every supernova is a knot on her cosmic loom. On ringed planets, she is revered as the patroness of lovers exchanging rings made of stardust.",
    ),
    ("path_gravaan", "Path of Gravaan"),
    ("path_gravaan_title", "Guardian of Gravitational Nodes"),
    (
        "path_gravaan_desc",
        "His body is a network of black holes and dark matter. Prayers are offered to him by casting stones with engraved prayers into the abyss: it is believed that those that do not reach the bottom will be caught by his unseen hands.",
    ),
    ("path_kyriel", "Path of Kyriel"),
    ("path_kyriel_title", "Guardian of Time, She Who Cuts Histories"),
    (
        "path_kyriel_desc",
        "Her blade - bursts of gamma radiation - severs lines of fate. On Staria, her cult is forbidden, but in underground shrines, they give her hourglasses filled with the ashes of the dead, believing that she will thus extend the lives of the living.",
    ),
    ("path_nerradis_onna", "Path of Nerradis-Onna"),
    ("path_nerradis_onna_title", "Galaxy Mother Spirit"),
    (
        "path_nerradis_onna_desc",
        "Her body is the arms of the Nerradis spiral, her eyes - clusters of supernovas. The planet Staria is a mole on her palm. Shamans invoke her spirit, dancing under the light of three moons until their bodies are covered with patterns resembling star maps.",
    ),
];

fn tables() -> &'static HashMap<&'static str, Table> {
    static TABLES: OnceLock<HashMap<&'static str, Table>> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut tables = HashMap::new();
        tables.insert("ru", RU.iter().copied().collect());
        tables.insert("en", EN.iter().copied().collect());
        tables
    })
}

fn table(locale: &str) -> &'static Table {
    let tables = tables();
    match tables.get(locale) {
        Some(table) => table,
        None => &tables[DEFAULT_LOCALE],
    }
}

/// Looks up `key` in `locale`, falling back to the default locale, then the key
pub fn get_text<'a>(locale: &str, key: &'a str) -> &'a str {
    table(locale).get(key).copied().unwrap_or(key)
}

/// Like [`get_text`], substituting `{name}`-style placeholders
pub fn format_text(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    let mut text = get_text(locale, key).to_string();
    for (name, value) in args {
        text = text.replace(&format!("{{{}}}", name), value);
    }
    text
}

/// The locale after `locale` in toggle order (ru ↔ en)
pub fn next_locale(locale: &str) -> &'static str {
    match LOCALES.iter().position(|l| *l == locale) {
        Some(i) => LOCALES[(i + 1) % LOCALES.len()],
        None => DEFAULT_LOCALE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_in_both_locales() {
        assert_eq!(get_text("en", "new_game"), "New Game");
        assert_eq!(get_text("ru", "new_game"), "Новая Игра");
    }

    #[test]
    fn test_unknown_locale_falls_back_to_default() {
        assert_eq!(get_text("de", "exit"), "Выход");
    }

    #[test]
    fn test_missing_key_returns_key() {
        assert_eq!(get_text("en", "no_such_key"), "no_such_key");
    }

    #[test]
    fn test_tables_share_keys() {
        let ru = table("ru");
        let en = table("en");
        assert_eq!(ru.len(), en.len());
        for key in ru.keys() {
            assert!(en.contains_key(key), "missing en translation for {}", key);
        }
    }

    #[test]
    fn test_format_substitutes_placeholders() {
        assert_eq!(
            format_text("en", "choose_path_title", &[("name", "Aria")]),
            "Aria, choose your Path"
        );
        assert_eq!(
            format_text(
                "en",
                "character_created",
                &[("name", "Aria"), ("path", "Path of Kyriel")]
            ),
            "Character Aria created! Path: Path of Kyriel"
        );
    }

    #[test]
    fn test_next_locale_toggles() {
        assert_eq!(next_locale("ru"), "en");
        assert_eq!(next_locale("en"), "ru");
        assert_eq!(next_locale("fr"), "ru");
    }
}
