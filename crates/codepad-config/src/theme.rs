/// Theme definitions: window chrome colors, pane colors, and the built-in catalog.
use serde::{Deserialize, Serialize};

use crate::color::HexColor;

/// Catalog entry that follows the OS light/dark preference.
pub const SYSTEM_THEME: &str = "System";

/// Colors for egui chrome (menu bar, panels, widgets, modal windows).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiColors {
    pub panel_fill: HexColor,
    pub window_fill: HexColor,
    pub faint_bg_color: HexColor,
    pub extreme_bg_color: HexColor,
    pub widget_inactive_bg: HexColor,
    pub widget_hovered_bg: HexColor,
    pub widget_active_bg: HexColor,
    pub accent_color: HexColor,
}

impl Default for UiColors {
    fn default() -> Self {
        builtin_dark().ui
    }
}

/// Colors for the info line, the body pane and the output pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneColors {
    pub info_text: HexColor,
    pub body_bg: HexColor,
    pub body_text: HexColor,
    pub output_bg: HexColor,
    pub output_text: HexColor,
}

impl Default for PaneColors {
    fn default() -> Self {
        builtin_dark().panes
    }
}

/// A complete, named look-and-feel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDefinition {
    pub name: String,
    pub dark_mode: bool,
    #[serde(default)]
    pub ui: UiColors,
    #[serde(default)]
    pub panes: PaneColors,
}

/// Builds a theme from a five-color palette: window background, window
/// text, pane background, pane text, and accent.
fn palette(
    name: &str,
    dark_mode: bool,
    background: HexColor,
    text: HexColor,
    pane_bg: HexColor,
    pane_text: HexColor,
    accent: HexColor,
) -> ThemeDefinition {
    let shade = |c: HexColor, delta: i16| {
        let f = |v: u8| (i16::from(v) + delta).clamp(0, 255) as u8;
        HexColor::rgb(f(c.r), f(c.g), f(c.b))
    };
    let step: i16 = if dark_mode { 12 } else { -12 };
    ThemeDefinition {
        name: name.to_string(),
        dark_mode,
        ui: UiColors {
            panel_fill: background,
            window_fill: background,
            faint_bg_color: shade(background, step / 2),
            extreme_bg_color: pane_bg,
            widget_inactive_bg: shade(background, step),
            widget_hovered_bg: shade(background, step * 2),
            widget_active_bg: shade(background, step * 3),
            accent_color: accent,
        },
        panes: PaneColors {
            info_text: text,
            body_bg: pane_bg,
            body_text: pane_text,
            output_bg: shade(pane_bg, step / 2),
            output_text: pane_text,
        },
    }
}

/// Light blue window with purple text. The default theme.
pub fn builtin_blue_purple() -> ThemeDefinition {
    palette(
        "BluePurple",
        false,
        HexColor::rgb(0xA5, 0xCA, 0xDD),
        HexColor::rgb(0x6E, 0x26, 0x6E),
        HexColor::rgb(0xE0, 0xF5, 0xFF),
        HexColor::rgb(0x00, 0x00, 0x00),
        HexColor::rgb(0x30, 0x3C, 0x9E),
    )
}

pub fn builtin_dark() -> ThemeDefinition {
    palette(
        "Dark",
        true,
        HexColor::rgb(43, 43, 43),
        HexColor::rgb(200, 200, 200),
        HexColor::rgb(30, 30, 30),
        HexColor::rgb(212, 212, 212),
        HexColor::rgb(80, 180, 200),
    )
}

pub fn builtin_light() -> ThemeDefinition {
    palette(
        "Light",
        false,
        HexColor::rgb(240, 240, 240),
        HexColor::rgb(40, 40, 40),
        HexColor::rgb(255, 255, 255),
        HexColor::rgb(30, 30, 30),
        HexColor::rgb(50, 120, 200),
    )
}

pub fn builtin_dark_amber() -> ThemeDefinition {
    palette(
        "DarkAmber",
        true,
        HexColor::rgb(0x2C, 0x28, 0x25),
        HexColor::rgb(0xFD, 0xCB, 0x52),
        HexColor::rgb(0x70, 0x5E, 0x52),
        HexColor::rgb(0xFD, 0xCB, 0x52),
        HexColor::rgb(0xFD, 0xCB, 0x52),
    )
}

pub fn builtin_green_tan() -> ThemeDefinition {
    palette(
        "GreenTan",
        false,
        HexColor::rgb(0x9F, 0xB8, 0xAD),
        HexColor::rgb(0x00, 0x00, 0x00),
        HexColor::rgb(0xF7, 0xF3, 0xEC),
        HexColor::rgb(0x00, 0x00, 0x00),
        HexColor::rgb(0x47, 0x5A, 0x51),
    )
}

pub fn builtin_reddit() -> ThemeDefinition {
    palette(
        "Reddit",
        false,
        HexColor::rgb(0xFF, 0xFF, 0xFF),
        HexColor::rgb(0x1A, 0x1A, 0x1B),
        HexColor::rgb(0xDA, 0xE0, 0xE6),
        HexColor::rgb(0x22, 0x22, 0x22),
        HexColor::rgb(0x00, 0x79, 0xD3),
    )
}

/// The built-in catalog in menu order (excluding [`SYSTEM_THEME`]).
pub fn builtin_themes() -> Vec<ThemeDefinition> {
    vec![
        builtin_blue_purple(),
        builtin_dark(),
        builtin_light(),
        builtin_dark_amber(),
        builtin_green_tan(),
        builtin_reddit(),
    ]
}
