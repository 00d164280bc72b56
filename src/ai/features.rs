//! Linear value-function features: open winning-line opportunity counts.

use crate::game::{Board, Cell, Color, COLS, ROWS};

/// Length of the feature vector fed to linear value functions: buckets 1..4
/// of [`count_open_positions`] for the acting color, then the same four
/// buckets for the opponent.
pub const NUM_FEATURES: usize = 8;

/// Window scan directions as (row, col) steps. Row steps are non-negative,
/// so every window is visited exactly once from its lowest starting cell.
const WINDOW_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Count the 4-cell lines still winnable for `color`, bucketed by how many
/// of the four cells already hold that color.
///
/// Every 4-cell window along every line direction that fits in the grid is
/// classified by its count of `color` cells, provided it holds no opposing
/// cell; windows containing any opposing disc can never become a win for
/// `color` and are skipped entirely. An empty board contributes everything
/// to bucket 0.
pub fn count_open_positions(board: &Board, color: Color) -> [u32; 5] {
    count_windows(board.cells(), ROWS, COLS, color)
}

/// The 8-dimensional feature vector for `color`: open-line buckets 1..4 for
/// `color` followed by buckets 1..4 for the opponent. Bucket 0 carries no
/// signal (no discs placed) and is discarded.
pub fn feature_vector(board: &Board, color: Color) -> [f64; NUM_FEATURES] {
    let own = count_open_positions(board, color);
    let other = count_open_positions(board, color.other());

    let mut features = [0.0; NUM_FEATURES];
    for i in 0..4 {
        features[i] = own[i + 1] as f64;
        features[i + 4] = other[i + 1] as f64;
    }
    features
}

/// Window scan over a flat row-major grid of the given dimensions.
fn count_windows(cells: &[Cell], rows: usize, cols: usize, color: Color) -> [u32; 5] {
    let own = color.cell();
    let opposing = color.other().cell();
    let mut counts = [0u32; 5];

    for row in 0..rows {
        for col in 0..cols {
            for (dr, dc) in WINDOW_DIRECTIONS {
                let end_row = row as i32 + 3 * dr;
                let end_col = col as i32 + 3 * dc;
                if end_row >= rows as i32 || end_col < 0 || end_col >= cols as i32 {
                    continue;
                }

                let mut own_count = 0;
                let mut blocked = false;
                for step in 0..4 {
                    let r = (row as i32 + step * dr) as usize;
                    let c = (col as i32 + step * dc) as usize;
                    let cell = cells[r * cols + c];
                    if cell == opposing {
                        blocked = true;
                        break;
                    }
                    if cell == own {
                        own_count += 1;
                    }
                }
                if !blocked {
                    counts[own_count] += 1;
                }
            }
        }
    }
    counts
}
