use std::fmt;

/// Error types for session setup, configuration and storage
#[derive(Debug)]
pub enum GameError {
    /// Grid size outside the playable range
    InvalidGridSize { size: usize, min: usize, max: usize },
    /// Board coordinates outside the grid
    InvalidCoordinates { row: usize, col: usize, size: usize },
    /// Grid size that is valid but not offered by the configuration
    UnsupportedGridSize { size: usize, allowed: Vec<usize> },
    /// Configuration errors
    ConfigError(String),
    /// Score store read/write failures
    StoreError(String),
    /// JSON encode/decode failures
    SerializationError(String),
    /// Terminal setup or drawing failures
    TerminalError(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidGridSize { size, min, max } => {
                write!(
                    f,
                    "Invalid grid size {} - must be between {} and {}",
                    size, min, max
                )
            }
            GameError::InvalidCoordinates { row, col, size } => {
                write!(
                    f,
                    "Invalid board coordinates ({}, {}) - grid size is {}x{}",
                    row, col, size, size
                )
            }
            GameError::UnsupportedGridSize { size, allowed } => {
                write!(
                    f,
                    "Grid size {} is not offered (available: {:?})",
                    size, allowed
                )
            }
            GameError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            GameError::StoreError(msg) => write!(f, "Score store error: {}", msg),
            GameError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            GameError::TerminalError(msg) => write!(f, "Terminal error: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::StoreError(err.to_string())
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::SerializationError(err.to_string())
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;

/// Validate a requested grid size against the configured choices
pub fn validate_grid_choice(size: usize, allowed: &[usize]) -> GameResult<()> {
    if allowed.contains(&size) {
        Ok(())
    } else {
        Err(GameError::UnsupportedGridSize {
            size,
            allowed: allowed.to_vec(),
        })
    }
}
