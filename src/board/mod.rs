// Board module - the shuffled N×N grid of numbered cells

pub mod cell;
pub mod generator;

pub use cell::{Cell, CellState};
pub use generator::{generate, generate_default, is_permutation, shuffle};

use crate::config::GridSize;
use crate::game_errors::{GameError, GameResult};
use rand::Rng;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Board {
    /// Shuffle a fresh board
    pub fn new<R: Rng + ?Sized>(size: GridSize, rng: &mut R) -> Self {
        let cells = generate(size, rng).into_iter().map(Cell::new).collect();
        Self { size, cells }
    }

    /// Build a board from an explicit row-major layout
    pub fn from_values(size: GridSize, values: Vec<u32>) -> GameResult<Self> {
        if !is_permutation(size, &values) {
            return Err(GameError::ConfigError(format!(
                "board layout is not a permutation of 1..={}",
                size.max_number()
            )));
        }
        Ok(Self {
            size,
            cells: values.into_iter().map(Cell::new).collect(),
        })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn values(&self) -> Vec<u32> {
        self.cells.iter().map(Cell::value).collect()
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cell_at(&self, row: usize, col: usize) -> GameResult<&Cell> {
        let index = self.size.index_of(row, col)?;
        Ok(&self.cells[index])
    }

    /// Row-major index of the cell labelled `value`
    pub fn index_of(&self, value: u32) -> Option<usize> {
        self.cells.iter().position(|cell| cell.value() == value)
    }

    pub fn consumed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_consumed()).count()
    }

    pub(crate) fn consume(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.consume();
        }
    }

    pub(crate) fn flag(&mut self, index: usize, until: Instant) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.flag(until);
        }
    }

    /// Clear flags whose window has passed; returns how many were cleared
    pub(crate) fn expire_flags(&mut self, now: Instant) -> usize {
        self.cells
            .iter_mut()
            .map(|cell| cell.expire_flag(now))
            .filter(|&cleared| cleared)
            .count()
    }

    /// Earliest pending flag expiry, if any cell is flagged
    pub fn next_flag_expiry(&self) -> Option<Instant> {
        self.cells
            .iter()
            .filter_map(|cell| match cell.state() {
                CellState::Flagged { until } => Some(until),
                _ => None,
            })
            .min()
    }
}
