// Configuration module - board sizes, timing, initial preferences, storage
pub mod game_config;
pub mod grid_config;

pub use game_config::{BoardConfig, DisplayConfig, GameConfig, StorageConfig, TimingConfig};
pub use grid_config::{GridSize, MAX_GRID_SIZE, MIN_GRID_SIZE};
