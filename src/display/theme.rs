// Color lookup tables for consumed cells and the surrounding UI.
// Palette values carry alpha; they are composited over the theme base
// because terminals only take opaque RGB.

use crate::session::Preferences;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six click colors offered by the color picker
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteColor {
    #[default]
    Green,
    Blue,
    Purple,
    Pink,
    Yellow,
    Orange,
}

impl PaletteColor {
    pub const ALL: [PaletteColor; 6] = [
        PaletteColor::Green,
        PaletteColor::Blue,
        PaletteColor::Purple,
        PaletteColor::Pink,
        PaletteColor::Yellow,
        PaletteColor::Orange,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PaletteColor::Green => "green",
            PaletteColor::Blue => "blue",
            PaletteColor::Purple => "purple",
            PaletteColor::Pink => "pink",
            PaletteColor::Yellow => "yellow",
            PaletteColor::Orange => "orange",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|&c| c == self).unwrap_or(0)
    }

    /// Next color in picker order, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous color in picker order, wrapping around
    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| format!("unknown click color '{}'", s))
    }
}

/// Light or dark UI theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(dark_mode: bool) -> Self {
        if dark_mode {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    fn index(self) -> usize {
        match self {
            ThemeMode::Light => 0,
            ThemeMode::Dark => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Build from `0xRRGGBBAA`
    pub const fn hex(value: u32) -> Self {
        Self {
            r: (value >> 24) as u8,
            g: (value >> 16) as u8,
            b: (value >> 8) as u8,
            a: value as u8,
        }
    }

    /// Alpha-composite over an opaque base color
    pub fn over(self, base: Rgba) -> Color {
        let blend = |top: u8, bottom: u8| -> u8 {
            let a = self.a as u16;
            ((top as u16 * a + bottom as u16 * (255 - a) + 127) / 255) as u8
        };
        Color::Rgb(
            blend(self.r, base.r),
            blend(self.g, base.g),
            blend(self.b, base.b),
        )
    }

    pub fn opaque(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

/// Background/foreground pair for a consumed cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellColors {
    pub background: Color,
    pub foreground: Color,
}

#[derive(Clone, Copy)]
struct Swatch {
    background: Rgba,
    foreground: Rgba,
}

const fn swatch(background: u32, foreground: u32) -> Swatch {
    Swatch {
        background: Rgba::hex(background),
        foreground: Rgba::hex(foreground),
    }
}

const WHITE: u32 = 0xffffffff;
const NEUTRAL_ROW: usize = 6;

// Rows follow PaletteColor::ALL, then the neutral gray row; columns are [light, dark].
const CONSUMED_SWATCHES: [[Swatch; 2]; 7] = [
    [swatch(0x6ee7b7b4, 0x065f46ff), swatch(0x6ee7b7b4, WHITE)],
    [swatch(0x93c4fdab, 0x1e3a8aff), swatch(0x93c4fdab, WHITE)],
    [swatch(0xc3b5fdaf, 0x4c1d95ff), swatch(0xc3b5fdaf, WHITE)],
    [swatch(0xf9a8d4a6, 0x831843ff), swatch(0xf9a8d4a6, WHITE)],
    [swatch(0xfddf479c, 0x713f12ff), swatch(0xfddf479c, WHITE)],
    [swatch(0xfdbb74a1, 0x7c2d12ff), swatch(0xfdbb74a1, WHITE)],
    [swatch(0xcacacaea, 0x6e6e6eff), swatch(0x414141ff, 0xaaaaaaff)],
];

/// Colors of the chrome around the board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiColors {
    pub base: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub error: Color,
}

struct UiSwatch {
    base: Rgba,
    text: Rgba,
    muted: Rgba,
    border: Rgba,
    accent: Rgba,
    error: Rgba,
}

const UI_SWATCHES: [UiSwatch; 2] = [
    UiSwatch {
        base: Rgba::hex(0xf8fafcff),
        text: Rgba::hex(0x1f2937ff),
        muted: Rgba::hex(0x6b7280ff),
        border: Rgba::hex(0x9ca3afff),
        accent: Rgba::hex(0x2563ebff),
        error: Rgba::hex(0xef4444ff),
    },
    UiSwatch {
        base: Rgba::hex(0x1a1a1aff),
        text: Rgba::hex(0xe5e7ebff),
        muted: Rgba::hex(0x9ca3afff),
        border: Rgba::hex(0x4b5563ff),
        accent: Rgba::hex(0xfbbf24ff),
        error: Rgba::hex(0xdc2626ff),
    },
];

/// Colors for a correctly clicked cell under the given preferences
pub fn consumed_colors(prefs: &Preferences) -> CellColors {
    let mode = ThemeMode::from_dark(prefs.dark_mode);
    let row = if prefs.show_colors {
        prefs.click_color.position()
    } else {
        NEUTRAL_ROW
    };
    let swatch = CONSUMED_SWATCHES[row][mode.index()];
    let base = UI_SWATCHES[mode.index()].base;
    CellColors {
        background: swatch.background.over(base),
        foreground: swatch.foreground.over(base),
    }
}

pub fn ui_colors(mode: ThemeMode) -> UiColors {
    let swatch = &UI_SWATCHES[mode.index()];
    UiColors {
        base: swatch.base.opaque(),
        text: swatch.text.opaque(),
        muted: swatch.muted.opaque(),
        border: swatch.border.opaque(),
        accent: swatch.accent.opaque(),
        error: swatch.error.opaque(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(click_color: PaletteColor, show_colors: bool, dark_mode: bool) -> Preferences {
        Preferences {
            click_color,
            show_colors,
            dark_mode,
        }
    }

    #[test]
    fn test_color_cycle_wraps() {
        assert_eq!(PaletteColor::Orange.next(), PaletteColor::Green);
        assert_eq!(PaletteColor::Green.prev(), PaletteColor::Orange);
        assert_eq!(PaletteColor::Blue.next(), PaletteColor::Purple);
    }

    #[test]
    fn test_parse_color_names() {
        assert_eq!("Pink".parse::<PaletteColor>().unwrap(), PaletteColor::Pink);
        assert!("teal".parse::<PaletteColor>().is_err());
    }

    #[test]
    fn test_opaque_swatch_is_unchanged() {
        let base = Rgba::hex(0x000000ff);
        assert_eq!(Rgba::hex(0x414141ff).over(base), Color::Rgb(0x41, 0x41, 0x41));
    }

    #[test]
    fn test_alpha_blends_toward_base() {
        let half = Rgba::hex(0xff000080);
        match half.over(Rgba::hex(0x000000ff)) {
            Color::Rgb(r, g, b) => {
                assert!((126..=130).contains(&r));
                assert_eq!((g, b), (0, 0));
            }
            other => panic!("unexpected color {:?}", other),
        }
    }

    #[test]
    fn test_dark_mode_forces_white_text_for_palette() {
        for color in PaletteColor::ALL {
            let colors = consumed_colors(&prefs(color, true, true));
            assert_eq!(colors.foreground, Color::Rgb(255, 255, 255));
        }
        let light = consumed_colors(&prefs(PaletteColor::Blue, true, false));
        assert_eq!(light.foreground, Color::Rgb(0x1e, 0x3a, 0x8a));
    }

    #[test]
    fn test_neutral_mode_ignores_click_color() {
        let a = consumed_colors(&prefs(PaletteColor::Green, false, false));
        let b = consumed_colors(&prefs(PaletteColor::Orange, false, false));
        assert_eq!(a, b);

        let dark = consumed_colors(&prefs(PaletteColor::Green, false, true));
        assert_eq!(dark.background, Color::Rgb(0x41, 0x41, 0x41));
        assert_eq!(dark.foreground, Color::Rgb(0xaa, 0xaa, 0xaa));
    }

    #[test]
    fn test_palette_colors_differ() {
        let greens = consumed_colors(&prefs(PaletteColor::Green, true, false));
        let pinks = consumed_colors(&prefs(PaletteColor::Pink, true, false));
        assert_ne!(greens.background, pinks.background);
    }
}
