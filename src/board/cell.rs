use crate::display::{CellDisplay, CellVisual};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Open,                       // Waiting to be clicked
    Consumed,                   // Clicked in order, no longer clickable
    Flagged { until: Instant }, // Wrong click, cleared once `until` passes
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    value: u32,
    state: CellState,
}

impl Cell {
    pub fn new(value: u32) -> Self {
        Self {
            value,
            state: CellState::Open,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_consumed(&self) -> bool {
        self.state == CellState::Consumed
    }

    pub(crate) fn consume(&mut self) {
        self.state = CellState::Consumed;
    }

    /// Flag until `until`; a consumed cell stays consumed
    pub(crate) fn flag(&mut self, until: Instant) {
        if !self.is_consumed() {
            self.state = CellState::Flagged { until };
        }
    }

    /// Clear an expired flag, returning whether anything changed
    pub(crate) fn expire_flag(&mut self, now: Instant) -> bool {
        match self.state {
            CellState::Flagged { until } if until <= now => {
                self.state = CellState::Open;
                true
            }
            _ => false,
        }
    }
}

impl CellDisplay for Cell {
    fn label(&self) -> String {
        self.value.to_string()
    }

    fn visual(&self) -> CellVisual {
        match self.state {
            CellState::Open => CellVisual::Open,
            CellState::Consumed => CellVisual::Consumed,
            CellState::Flagged { .. } => CellVisual::Flagged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_flag_expires() {
        let now = Instant::now();
        let mut cell = Cell::new(5);
        cell.flag(now + Duration::from_millis(500));
        assert_eq!(cell.visual(), CellVisual::Flagged);
        assert!(!cell.expire_flag(now + Duration::from_millis(499)));
        assert!(cell.expire_flag(now + Duration::from_millis(500)));
        assert_eq!(cell.visual(), CellVisual::Open);
    }

    #[test]
    fn test_consumed_cell_ignores_flag() {
        let now = Instant::now();
        let mut cell = Cell::new(1);
        cell.consume();
        cell.flag(now);
        assert!(cell.is_consumed());
        assert!(!cell.is_clickable());
        assert_eq!(cell.label(), "1");
    }
}
