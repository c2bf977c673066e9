// Display module for readout formatting and board theming
pub mod formatters;
pub mod theme;

// Re-export main functions
pub use formatters::{format_best, format_target, format_time, COMPLETION_MARKER, NO_RECORD};
pub use theme::{consumed_colors, ui_colors, CellColors, PaletteColor, Rgba, ThemeMode, UiColors};

/// How a board cell should be drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellVisual {
    /// Not yet clicked
    Open,
    /// Clicked in order; drawn with the consumed colors
    Consumed,
    /// Recently clicked out of order
    Flagged,
}

/// Trait for displaying board cells
pub trait CellDisplay {
    /// Get the label printed inside the cell
    fn label(&self) -> String;

    /// Get the visual state of the cell
    fn visual(&self) -> CellVisual;

    /// Check if the cell still reacts to clicks
    fn is_clickable(&self) -> bool {
        self.visual() != CellVisual::Consumed
    }
}
