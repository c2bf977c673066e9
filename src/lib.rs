// Schulte table trainer - library with modular structure
// Board generation, click validation, timing and high scores live here;
// the terminal front end is in the `app` and `ui` modules.

pub mod app;
pub mod board;
pub mod config;
pub mod display;
pub mod game_errors;
pub mod score_store;
pub mod session;
pub mod timer;
pub mod ui;

// Re-export commonly used types
pub use board::{generate, generate_default, Board, Cell, CellState};
pub use config::{GameConfig, GridSize};
pub use display::{consumed_colors, format_best, format_time, CellColors, PaletteColor};
pub use game_errors::{GameError, GameResult};
pub use score_store::{score_key, FileStore, HighScores, KeyValueStore, MemoryStore, SaveOutcome};
pub use session::{Completion, Event, GameSession, GameState, Preferences, Transition};
pub use timer::{GameTimer, TimerHandle};
