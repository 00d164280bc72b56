use std::fmt;

use crate::error::IllegalMove;
use crate::game::Color;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Powers of 3 by row, used for the per-column base-3 state identifier.
const POW3: [u16; ROWS] = [1, 3, 9, 27, 81, 243];

/// The four undirected line directions as (row, col) steps.
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    White,
    Red,
}

impl Cell {
    /// Single character used for display purposes
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::White => 'W',
            Cell::Red => 'R',
        }
    }
}

/// Canonical identifier for a grid: one base-3 number per column, where each
/// occupied row from the bottom up contributes digit 1 (White) or 2 (Red) at
/// increasing place value. Two grids are identical iff their identifiers are
/// equal, regardless of the order in which discs were placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId([u16; COLS]);

/// Connect Four board: a 6x7 grid plus the winner, if any.
///
/// Stored as a flat array addressed `row * COLS + col`, with row 0 at the
/// bottom (gravity fills upward). Within any column the empty cells are
/// contiguous at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; ROWS * COLS],
    winner: Option<Color>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; ROWS * COLS],
            winner: None,
        }
    }

    /// Get the cell at a specific position.
    /// Row 0 is the bottom, row 5 is the top.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * COLS + col]
    }

    /// The grid as a flat slice, row-major from the bottom row up.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of discs in a column (also the landing row of the next disc).
    pub fn column_height(&self, col: usize) -> usize {
        (0..ROWS)
            .find(|&row| self.get(row, col) == Cell::Empty)
            .unwrap_or(ROWS)
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.get(ROWS - 1, col) != Cell::Empty
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Columns with room for at least one more disc, in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// The winner, if a 4-in-a-row has been completed. Set at most once and
    /// never overwritten by later moves.
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Drop a disc of `color` into `col`, then check for a win centered at
    /// the placed cell. On error the board is unchanged.
    pub fn apply_move(&mut self, col: usize, color: Color) -> Result<(), IllegalMove> {
        if col >= COLS {
            return Err(IllegalMove::OutOfRange(col));
        }
        let row = self.column_height(col);
        if row == ROWS {
            return Err(IllegalMove::ColumnFull(col));
        }

        self.cells[row * COLS + col] = color.cell();
        if self.winner.is_none() && self.completes_line(row, col) {
            self.winner = Some(color);
        }
        Ok(())
    }

    /// The board that would result from `apply_move(col, color)`, leaving
    /// `self` untouched. This is what value players score.
    pub fn afterstate(&self, col: usize, color: Color) -> Result<Board, IllegalMove> {
        let mut next = *self;
        next.apply_move(col, color)?;
        Ok(next)
    }

    /// Canonical identifier of the current grid.
    pub fn state_id(&self) -> StateId {
        let mut ids = [0u16; COLS];
        for (col, id) in ids.iter_mut().enumerate() {
            for row in 0..self.column_height(col) {
                let digit = match self.get(row, col) {
                    Cell::White => 1,
                    Cell::Red => 2,
                    Cell::Empty => unreachable!("empty cell below column height"),
                };
                *id += digit * POW3[row];
            }
        }
        StateId(ids)
    }

    /// Identifier of the grid that would result from `apply_move(col, color)`,
    /// computed from the current identifier plus the move, without mutating
    /// the board.
    pub fn next_state_id(&self, col: usize, color: Color) -> Result<StateId, IllegalMove> {
        if col >= COLS {
            return Err(IllegalMove::OutOfRange(col));
        }
        let row = self.column_height(col);
        if row == ROWS {
            return Err(IllegalMove::ColumnFull(col));
        }

        let digit = match color {
            Color::White => 1,
            Color::Red => 2,
        };
        let mut ids = self.state_id();
        ids.0[col] += digit * POW3[row];
        Ok(ids)
    }

    /// Whether the disc at (row, col) is part of a 4-in-a-row.
    ///
    /// Scans the four line directions outward from the cell in both senses.
    /// A win can only newly appear at the just-placed cell, so this is all
    /// `apply_move` ever needs to check.
    fn completes_line(&self, row: usize, col: usize) -> bool {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return false;
        }

        for (dr, dc) in DIRECTIONS {
            let count = 1 + self.run_length(row, col, dr, dc, cell)
                + self.run_length(row, col, -dr, -dc, cell);
            if count >= 4 {
                return true;
            }
        }
        false
    }

    /// Consecutive same-color cells from (row, col) exclusive, stepping by
    /// (dr, dc) until the color changes or the grid edge is reached.
    fn run_length(&self, row: usize, col: usize, dr: i32, dc: i32, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        while r >= 0
            && r < ROWS as i32
            && c >= 0
            && c < COLS as i32
            && self.get(r as usize, c as usize) == cell
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Render the grid top row first, one character per cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            for col in 0..COLS {
                write!(f, "{}", self.get(row, col).to_char())?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_apply_move_stacks_from_bottom() {
        let mut board = Board::new();

        board.apply_move(3, Color::White).unwrap();
        assert_eq!(board.get(0, 3), Cell::White);

        board.apply_move(3, Color::Red).unwrap();
        assert_eq!(board.get(1, 3), Cell::Red);
        assert_eq!(board.column_height(3), 2);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.apply_move(0, Color::White).unwrap();
        }

        assert!(board.is_column_full(0));
        let full = board;
        assert_eq!(
            board.apply_move(0, Color::Red),
            Err(IllegalMove::ColumnFull(0))
        );
        // Board unchanged on error
        assert_eq!(board, full);
    }

    #[test]
    fn test_out_of_range_column() {
        let mut board = Board::new();
        assert_eq!(
            board.apply_move(7, Color::White),
            Err(IllegalMove::OutOfRange(7))
        );
    }

    #[test]
    fn test_legal_moves_ascending_and_exclude_full() {
        let mut board = Board::new();
        assert_eq!(board.legal_moves(), vec![0, 1, 2, 3, 4, 5, 6]);

        for _ in 0..ROWS {
            board.apply_move(2, Color::Red).unwrap();
        }
        assert_eq!(board.legal_moves(), vec![0, 1, 3, 4, 5, 6]);
    }

    #[test]
    fn test_full_board_has_no_legal_moves() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.apply_move(col, Color::White).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        for col in 0..4 {
            assert_eq!(board.winner(), None);
            board.apply_move(col, Color::White).unwrap();
        }
        assert_eq!(board.winner(), Some(Color::White));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        for _ in 0..4 {
            board.apply_move(3, Color::Red).unwrap();
        }
        assert_eq!(board.winner(), Some(Color::Red));
    }

    #[test]
    fn test_diagonal_up_win() {
        let mut board = Board::new();
        // Staircase: White on the rising diagonal, Red as filler
        board.apply_move(0, Color::White).unwrap();

        board.apply_move(1, Color::Red).unwrap();
        board.apply_move(1, Color::White).unwrap();

        board.apply_move(2, Color::Red).unwrap();
        board.apply_move(2, Color::Red).unwrap();
        board.apply_move(2, Color::White).unwrap();

        board.apply_move(3, Color::Red).unwrap();
        board.apply_move(3, Color::Red).unwrap();
        board.apply_move(3, Color::Red).unwrap();
        board.apply_move(3, Color::White).unwrap();

        assert_eq!(board.winner(), Some(Color::White));
    }

    #[test]
    fn test_diagonal_down_win() {
        let mut board = Board::new();
        board.apply_move(6, Color::White).unwrap();

        board.apply_move(5, Color::Red).unwrap();
        board.apply_move(5, Color::White).unwrap();

        board.apply_move(4, Color::Red).unwrap();
        board.apply_move(4, Color::Red).unwrap();
        board.apply_move(4, Color::White).unwrap();

        board.apply_move(3, Color::Red).unwrap();
        board.apply_move(3, Color::Red).unwrap();
        board.apply_move(3, Color::Red).unwrap();
        board.apply_move(3, Color::White).unwrap();

        assert_eq!(board.winner(), Some(Color::White));
    }

    #[test]
    fn test_three_in_a_row_is_not_a_win() {
        let mut board = Board::new();
        for col in 0..3 {
            board.apply_move(col, Color::White).unwrap();
        }
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_winner_never_overwritten() {
        let mut board = Board::new();
        for _ in 0..4 {
            board.apply_move(0, Color::White).unwrap();
        }
        assert_eq!(board.winner(), Some(Color::White));

        // Further moves are legal by the interface, but even a completed
        // Red line must not replace the recorded winner.
        for _ in 0..4 {
            board.apply_move(1, Color::Red).unwrap();
        }
        assert_eq!(board.winner(), Some(Color::White));
    }

    #[test]
    fn test_afterstate_leaves_board_untouched() {
        let board = Board::new();
        let after = board.afterstate(3, Color::White).unwrap();

        assert_eq!(board.get(0, 3), Cell::Empty);
        assert_eq!(after.get(0, 3), Cell::White);
    }

    #[test]
    fn test_state_id_empty_board() {
        assert_eq!(Board::new().state_id(), StateId([0; COLS]));
    }

    #[test]
    fn test_state_id_base3_digits() {
        let mut board = Board::new();
        board.apply_move(2, Color::White).unwrap(); // digit 1 at 3^0
        board.apply_move(2, Color::Red).unwrap(); // digit 2 at 3^1
        board.apply_move(2, Color::Red).unwrap(); // digit 2 at 3^2

        let mut expected = [0u16; COLS];
        expected[2] = 1 + 2 * 3 + 2 * 9;
        assert_eq!(board.state_id(), StateId(expected));
    }

    #[test]
    fn test_state_id_is_order_independent() {
        let mut a = Board::new();
        a.apply_move(0, Color::White).unwrap();
        a.apply_move(4, Color::Red).unwrap();
        a.apply_move(0, Color::Red).unwrap();

        let mut b = Board::new();
        b.apply_move(4, Color::Red).unwrap();
        b.apply_move(0, Color::White).unwrap();
        b.apply_move(0, Color::Red).unwrap();

        assert_eq!(a.state_id(), b.state_id());
    }

    #[test]
    fn test_different_grids_have_different_ids() {
        let mut a = Board::new();
        a.apply_move(0, Color::White).unwrap();

        let mut b = Board::new();
        b.apply_move(0, Color::Red).unwrap();

        let mut c = Board::new();
        c.apply_move(1, Color::White).unwrap();

        assert_ne!(a.state_id(), b.state_id());
        assert_ne!(a.state_id(), c.state_id());
        assert_ne!(b.state_id(), c.state_id());
    }

    #[test]
    fn test_next_state_id_matches_applied_move() {
        let mut board = Board::new();
        let moves = [(3, Color::White), (3, Color::Red), (0, Color::White)];
        for (col, color) in moves {
            board.apply_move(col, color).unwrap();
        }

        for col in board.legal_moves() {
            for color in [Color::White, Color::Red] {
                let predicted = board.next_state_id(col, color).unwrap();
                let actual = board.afterstate(col, color).unwrap().state_id();
                assert_eq!(predicted, actual, "col {} {:?}", col, color);
            }
        }
    }

    #[test]
    fn test_next_state_id_rejects_illegal_moves() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.apply_move(5, Color::White).unwrap();
        }

        assert_eq!(
            board.next_state_id(5, Color::Red),
            Err(IllegalMove::ColumnFull(5))
        );
        assert_eq!(
            board.next_state_id(7, Color::Red),
            Err(IllegalMove::OutOfRange(7))
        );
    }

    #[test]
    fn test_display_top_row_first() {
        let mut board = Board::new();
        board.apply_move(0, Color::White).unwrap();
        board.apply_move(1, Color::Red).unwrap();

        let rendered = board.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), ROWS);
        assert_eq!(lines[0], ".......");
        assert_eq!(lines[ROWS - 1], "WR.....");
    }
}
