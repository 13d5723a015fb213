use eframe::egui;
use tracing::{debug, warn};

// Families tried in order among installed system fonts.
const CJK_FAMILIES: &[&str] = &[
    "Noto Sans CJK JP",
    "Noto Sans JP",
    "Source Han Sans JP",
    "Hiragino Sans",
    "Hiragino Kaku Gothic ProN",
    "Meiryo",
    "Yu Gothic",
    "IPAexGothic",
    "IPAGothic",
    "TakaoGothic",
    "VL Gothic",
];

const FALLBACK_PATHS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
];

struct LoadedFont {
    name: String,
    data: Vec<u8>,
    index: u32,
}

/// Appends a Japanese-capable font to both families so headlines and
/// summaries render instead of showing tofu.
pub fn install_cjk_fonts(ctx: &egui::Context) {
    let Some(font) = find_system_font().or_else(read_fallback_font) else {
        warn!("no CJK font found; Japanese text may not render");
        return;
    };
    debug!(font = %font.name, "installing CJK font");

    let mut fonts = egui::FontDefinitions::default();
    let mut data = egui::FontData::from_owned(font.data);
    data.index = font.index;
    fonts.font_data.insert(font.name.clone(), data);
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(font.name.clone());
    }
    ctx.set_fonts(fonts);
}

fn find_system_font() -> Option<LoadedFont> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    CJK_FAMILIES.iter().find_map(|family| {
        let id = db.query(&fontdb::Query {
            families: &[fontdb::Family::Name(*family)],
            ..fontdb::Query::default()
        })?;
        let (data, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
        Some(LoadedFont {
            name: (*family).to_owned(),
            data,
            index,
        })
    })
}

fn read_fallback_font() -> Option<LoadedFont> {
    FALLBACK_PATHS.iter().find_map(|path| {
        let data = std::fs::read(path).ok()?;
        Some(LoadedFont {
            name: format!("fallback-{path}"),
            data,
            index: 0,
        })
    })
}
