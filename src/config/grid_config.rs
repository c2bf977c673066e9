// Grid size configuration
use crate::game_errors::{GameError, GameResult};
use std::fmt;

/// Smallest playable board edge
pub const MIN_GRID_SIZE: usize = 2;

/// Largest board edge; size keys stop at 9
pub const MAX_GRID_SIZE: usize = 9;

/// Edge length of a square Schulte board, within `MIN_GRID_SIZE..=MAX_GRID_SIZE`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct GridSize(usize);

impl GridSize {
    pub fn new(size: usize) -> GameResult<Self> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(GameError::InvalidGridSize {
                size,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }
        Ok(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn cell_count(self) -> usize {
        self.0 * self.0
    }

    /// Highest label on the board
    pub fn max_number(self) -> u32 {
        // At most MAX_GRID_SIZE², so the conversion cannot fail
        u32::try_from(self.cell_count()).unwrap_or(u32::MAX)
    }

    /// Validate coordinates against grid bounds
    pub fn validate_coordinates(self, row: usize, col: usize) -> GameResult<()> {
        if row >= self.0 || col >= self.0 {
            return Err(GameError::InvalidCoordinates {
                row,
                col,
                size: self.0,
            });
        }
        Ok(())
    }

    /// Row-major index of a cell
    pub fn index_of(self, row: usize, col: usize) -> GameResult<usize> {
        self.validate_coordinates(row, col)?;
        Ok(row * self.0 + col)
    }

    /// (row, col) of a row-major index
    pub fn position_of(self, index: usize) -> (usize, usize) {
        (index / self.0, index % self.0)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<usize> for GridSize {
    type Error = GameError;

    fn try_from(size: usize) -> GameResult<Self> {
        Self::new(size)
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> usize {
        size.0
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}
