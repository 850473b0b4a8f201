//! Colour themes for message rows.

use eframe::egui::{self, Color32};

use crate::row::ThemeId;

/// Colour set used by the row renderer
#[derive(Clone, Debug)]
pub struct RowTheme {
    pub name: &'static str,
    pub surface: Color32,
    pub surface_hover: Color32,
    pub surface_selected: Color32,
    pub accent: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub border_subtle: Color32,
}

impl RowTheme {
    pub fn for_id(id: ThemeId) -> Self {
        match id {
            ThemeId::Dark => Self::dark(),
            ThemeId::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "Dark",
            surface: Color32::from_rgb(28, 28, 38),
            surface_hover: Color32::from_rgb(37, 37, 50),
            surface_selected: Color32::from_rgb(46, 52, 92),
            accent: Color32::from_rgb(88, 101, 242),
            success: Color32::from_rgb(67, 181, 129),
            warning: Color32::from_rgb(250, 166, 26),
            error: Color32::from_rgb(240, 71, 71),
            text_primary: Color32::WHITE,
            text_secondary: Color32::from_rgb(185, 187, 190),
            text_muted: Color32::from_rgb(114, 118, 125),
            border_subtle: Color32::from_rgb(32, 34, 37),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light",
            surface: Color32::from_rgb(242, 243, 245),
            surface_hover: Color32::from_rgb(227, 229, 232),
            surface_selected: Color32::from_rgb(214, 220, 252),
            accent: Color32::from_rgb(88, 101, 242),
            success: Color32::from_rgb(67, 181, 129),
            warning: Color32::from_rgb(250, 166, 26),
            error: Color32::from_rgb(240, 71, 71),
            text_primary: Color32::from_rgb(6, 6, 7),
            text_secondary: Color32::from_rgb(79, 86, 96),
            text_muted: Color32::from_rgb(116, 127, 141),
            border_subtle: Color32::from_rgb(230, 232, 236),
        }
    }
}

/// egui base visuals matching a row theme
pub fn visuals(id: ThemeId) -> egui::Visuals {
    match id {
        ThemeId::Dark => egui::Visuals::dark(),
        ThemeId::Light => egui::Visuals::light(),
    }
}

const NAME_COLORS: [Color32; 8] = [
    Color32::from_rgb(232, 93, 117),
    Color32::from_rgb(250, 166, 26),
    Color32::from_rgb(67, 181, 129),
    Color32::from_rgb(0, 175, 244),
    Color32::from_rgb(155, 89, 182),
    Color32::from_rgb(241, 196, 15),
    Color32::from_rgb(26, 188, 156),
    Color32::from_rgb(230, 126, 34),
];

/// Stable colour for a sender name (FNV-1a over the bytes).
pub fn name_color(name: &str) -> Color32 {
    let mut hash: u64 = 1469598103934665603u64;
    for b in name.as_bytes() {
        hash ^= *b as u64;
        hash = hash.wrapping_mul(1099511628211u64);
    }
    NAME_COLORS[(hash as usize) % NAME_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_color_is_stable() {
        assert_eq!(name_color("Ada Lovelace"), name_color("Ada Lovelace"));
        assert!(NAME_COLORS.contains(&name_color("")));
    }

    #[test]
    fn test_for_id() {
        assert_eq!(RowTheme::for_id(ThemeId::Dark).name, "Dark");
        assert_eq!(RowTheme::for_id(ThemeId::Light).name, "Light");
    }
}
