use crate::config::GridSize;
use crate::display::PaletteColor;
use crate::game_errors::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Comprehensive configuration for a game run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub timing: TimingConfig,
    pub display: DisplayConfig,
    pub storage: StorageConfig,
}

/// Board size choices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Size used at startup
    pub default_size: GridSize,
    /// Sizes offered by the size selector
    pub sizes: Vec<usize>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_size: GridSize::default(),
            sizes: vec![3, 4, 5, 6],
        }
    }
}

/// Timer and feedback cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Live timer sampling interval (ms)
    pub tick_interval_ms: u64,
    /// How long a wrong click stays flagged (ms)
    pub error_flash_ms: u64,
    /// Upper bound on input polling when nothing is scheduled (ms)
    pub frame_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 10,
            error_flash_ms: 500,
            frame_interval_ms: 50,
        }
    }
}

/// Initial preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub click_color: PaletteColor,
    pub show_colors: bool,
    pub dark_mode: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            click_color: PaletteColor::Green,
            show_colors: true,
            dark_mode: false,
        }
    }
}

/// Score store and log destinations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding the best times
    pub score_file: String,
    /// Keep scores in memory only
    pub ephemeral: bool,
    /// Log file; without one only errors are logged
    pub log_file: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            score_file: "schulte_scores.json".to_string(),
            ephemeral: false,
            log_file: None,
        }
    }
}

impl GameConfig {
    /// Load configuration from file
    pub fn load_from_file(path: &str) -> GameResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GameError::ConfigError(format!("cannot read {}: {}", path, e)))?;
        let config: GameConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &str) -> GameResult<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|e| GameError::ConfigError(format!("cannot write {}: {}", path, e)))?;
        Ok(())
    }

    /// Defaults overridden by `SCHULTE_*` environment variables
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `SCHULTE_*` overrides read through `lookup`; unparsable values are skipped
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(size) = lookup("SCHULTE_GRID_SIZE") {
            match size.parse::<usize>().map_err(|e| e.to_string()).and_then(|n| {
                GridSize::new(n).map_err(|e| e.to_string())
            }) {
                Ok(size) => self.board.default_size = size,
                Err(e) => log::warn!("ignoring SCHULTE_GRID_SIZE={:?}: {}", size, e),
            }
        }
        if let Some(path) = lookup("SCHULTE_SCORE_FILE") {
            self.storage.score_file = path;
        }
        if let Some(path) = lookup("SCHULTE_LOG_FILE") {
            self.storage.log_file = Some(path);
        }
        if let Some(dark) = lookup("SCHULTE_DARK_MODE") {
            self.display.dark_mode = dark.to_lowercase() == "true";
        }
        if let Some(show) = lookup("SCHULTE_SHOW_COLORS") {
            self.display.show_colors = show.to_lowercase() == "true";
        }
        if let Some(color) = lookup("SCHULTE_CLICK_COLOR") {
            match color.parse::<PaletteColor>() {
                Ok(color) => self.display.click_color = color,
                Err(e) => log::warn!("ignoring SCHULTE_CLICK_COLOR: {}", e),
            }
        }
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.timing.tick_interval_ms)
    }

    pub fn error_flash(&self) -> Duration {
        Duration::from_millis(self.timing.error_flash_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.timing.frame_interval_ms)
    }

    /// Validate configuration values
    pub fn validate(&self) -> GameResult<()> {
        if self.board.sizes.is_empty() {
            return Err(GameError::ConfigError(
                "At least one grid size must be offered".into(),
            ));
        }
        for &size in &self.board.sizes {
            GridSize::new(size)?;
        }
        if !self.board.sizes.contains(&self.board.default_size.get()) {
            return Err(GameError::ConfigError(format!(
                "Default grid size {} is not among the offered sizes {:?}",
                self.board.default_size.get(),
                self.board.sizes
            )));
        }
        if self.timing.tick_interval_ms == 0 {
            return Err(GameError::ConfigError(
                "Timer tick interval must be positive".into(),
            ));
        }
        if self.timing.error_flash_ms == 0 {
            return Err(GameError::ConfigError(
                "Error flash duration must be positive".into(),
            ));
        }
        if self.timing.frame_interval_ms == 0 {
            return Err(GameError::ConfigError(
                "Frame interval must be positive".into(),
            ));
        }
        Ok(())
    }
}
