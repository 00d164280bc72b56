//! Match orchestrator: drives one game between two players, enforcing the
//! strict propose/reward alternation contract and converting board outcomes
//! into rewards.

use crate::ai::Player;
use crate::game::{Board, Color, COLS, ROWS};

pub const REWARD_WIN: f64 = 1.0;
pub const REWARD_LOSS: f64 = -1.0;
pub const REWARD_DRAW: f64 = 0.0;
pub const REWARD_LEGAL_MOVE: f64 = 0.0;
pub const REWARD_ILLEGAL_MOVE: f64 = -2.0;

/// Result of a completed match. `winner` is `None` on a draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    pub winner: Option<Color>,
    pub moves: usize,
}

/// One Connect Four match between two players. White moves first.
///
/// For each player the orchestrator guarantees: `propose_move` and
/// `receive_reward` alternate strictly starting with `propose_move`, and by
/// the end of the match the player has received exactly as many rewards as
/// it made proposals. The learners rely on that 1:1 correspondence.
pub struct Match<'a> {
    white: &'a mut dyn Player,
    red: &'a mut dyn Player,
}

impl<'a> Match<'a> {
    pub fn new(white: &'a mut dyn Player, red: &'a mut dyn Player) -> Self {
        Match { white, red }
    }

    /// Play one match to completion.
    ///
    /// Per turn: ask the current player for a move, then apply it to the
    /// board. An illegal proposal ends the game immediately: the proposer
    /// is penalized and the opponent wins, receiving the win reward only if
    /// it has moved at all this game. After a successful non-terminal move
    /// the *other* player receives the legal-move reward, deferred by one
    /// ply because its own previous move's consequence is only now known;
    /// the very first move produces no such reward.
    pub fn play(&mut self) -> MatchResult {
        let mut board = Board::new();
        self.white.set_color(Color::White);
        self.red.set_color(Color::Red);

        let max_moves = ROWS * COLS;
        for move_number in 0..max_moves {
            let (current, other, color): (&mut dyn Player, &mut dyn Player, Color) =
                if move_number % 2 == 0 {
                    (&mut *self.white, &mut *self.red, Color::White)
                } else {
                    (&mut *self.red, &mut *self.white, Color::Red)
                };

            let column = current.propose_move(&board);

            if board.apply_move(column, color).is_err() {
                current.receive_reward(REWARD_ILLEGAL_MOVE);
                if move_number > 0 {
                    other.receive_reward(REWARD_WIN);
                }
                return MatchResult {
                    winner: Some(color.other()),
                    moves: move_number,
                };
            }

            if board.winner().is_some() {
                current.receive_reward(REWARD_WIN);
                other.receive_reward(REWARD_LOSS);
                return MatchResult {
                    winner: Some(color),
                    moves: move_number + 1,
                };
            }

            if move_number == max_moves - 1 {
                current.receive_reward(REWARD_DRAW);
                other.receive_reward(REWARD_DRAW);
                return MatchResult {
                    winner: None,
                    moves: max_moves,
                };
            }

            if move_number > 0 {
                other.receive_reward(REWARD_LEGAL_MOVE);
            }
        }

        unreachable!("the board fills up within ROWS * COLS moves");
    }
}
