//! Core Connect Four board engine: grid representation, move legality, win
//! detection, and the canonical per-column base-3 state identifier.

pub mod board;
mod color;

pub use board::{Board, Cell, StateId, COLS, ROWS};
pub use color::Color;
