use super::board::Cell;

/// Disc color. White moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Red,
}

impl Color {
    /// Get the other color
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Red,
            Color::Red => Color::White,
        }
    }

    /// Convert color to cell type
    pub fn cell(self) -> Cell {
        match self {
            Color::White => Cell::White,
            Color::Red => Cell::Red,
        }
    }

    /// Get color name for display
    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Red => "Red",
        }
    }
}
