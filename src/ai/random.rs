use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::ai::Player;
use crate::game::{Board, Color};

/// A player making a uniformly random legal move each turn. Rewards are
/// ignored.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        RandomPlayer {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn set_color(&mut self, _color: Color) {}

    fn propose_move(&mut self, board: &Board) -> usize {
        let moves = board.legal_moves();
        assert!(!moves.is_empty(), "No legal moves available");
        moves[self.rng.random_range(0..moves.len())]
    }

    fn receive_reward(&mut self, _reward: f64) {}
}
