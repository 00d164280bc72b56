use crate::game::{Board, Color};

/// Universal interface for all players pluggable into the match orchestrator.
///
/// The orchestrator guarantees that for every match, `propose_move` and
/// `receive_reward` alternate strictly starting with `propose_move`, and that
/// a player ends the match having received exactly as many rewards as it made
/// proposals. Learners depend on this 1:1, in-order correspondence.
pub trait Player {
    /// Assign this player's disc color. Called once before play begins in
    /// each match; implementations reset any per-match session state here.
    fn set_color(&mut self, color: Color);

    /// Select a column to play. The board is read-only; the orchestrator
    /// applies the returned move to the live board.
    fn propose_move(&mut self, board: &Board) -> usize;

    /// Record the reward bridging the previous proposal to the current
    /// position. Invoked exactly once after each `propose_move`.
    fn receive_reward(&mut self, reward: f64);

    /// Enable or disable learning. Players without parameters ignore this.
    fn set_learning(&mut self, _enabled: bool) {}
}
