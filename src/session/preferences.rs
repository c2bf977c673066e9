use crate::config::DisplayConfig;
use crate::display::PaletteColor;

/// UI-only preferences; they live for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub click_color: PaletteColor,
    pub show_colors: bool,
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for Preferences {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            click_color: config.click_color,
            show_colors: config.show_colors,
            dark_mode: config.dark_mode,
        }
    }
}
