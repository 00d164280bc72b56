use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::ai::features::NUM_FEATURES;
use crate::ai::value::{LinearValue, ValueFunction};
use crate::ai::Player;
use crate::game::{Board, Color};

/// Hyperparameters for the online TD learner.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TdConfig {
    /// Exploration rate: probability of a uniformly random legal move while
    /// learning is enabled.
    pub epsilon: f64,
    /// Learning rate for the TD parameter update.
    pub alpha: f64,
}

impl Default for TdConfig {
    fn default() -> Self {
        TdConfig {
            epsilon: 0.05,
            alpha: 0.001,
        }
    }
}

/// A scored hypothetical board: the state immediately after one of our
/// moves, before the opponent responds.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Afterstate {
    pub board: Board,
    pub value: f64,
}

pub(crate) struct Selection {
    pub column: usize,
    pub afterstate: Afterstate,
    pub exploratory: bool,
}

/// Epsilon-greedy afterstate selection shared by the TD learners.
///
/// The greedy branch materializes the afterstate of every legal column on a
/// scratch copy of the grid and keeps the strictly best one, preferring the
/// first column encountered on ties. The exploratory branch (taken with
/// probability epsilon, and only while `explore` is set) still scores its
/// random pick so the rolling window can advance through it.
pub(crate) fn choose_afterstate(
    board: &Board,
    color: Color,
    value: &dyn ValueFunction,
    epsilon: f64,
    explore: bool,
    rng: &mut StdRng,
) -> Selection {
    let moves = board.legal_moves();
    assert!(!moves.is_empty(), "No legal moves available");

    if explore && rng.random_range(0.0..1.0) < epsilon {
        let column = moves[rng.random_range(0..moves.len())];
        let after = board.afterstate(column, color).expect("legal move");
        return Selection {
            column,
            afterstate: Afterstate {
                board: after,
                value: value.value(&after, color),
            },
            exploratory: true,
        };
    }

    let mut best: Option<(usize, Afterstate)> = None;
    for column in moves {
        let after = board.afterstate(column, color).expect("legal move");
        let v = value.value(&after, color);
        let better = match &best {
            None => true,
            Some((_, current)) => v > current.value,
        };
        if better {
            best = Some((
                column,
                Afterstate {
                    board: after,
                    value: v,
                },
            ));
        }
    }

    let (column, afterstate) = best.expect("at least one legal move");
    Selection {
        column,
        afterstate,
        exploratory: false,
    }
}

/// Afterstate value player with online TD(0) learning over a linear feature
/// value function.
///
/// Each move is chosen epsilon-greedily by scoring afterstates. Each reward
/// bridges the previously chosen afterstate to the current one; the one-step
/// TD target is `V(next) + reward` and the parameters move along the feature
/// gradient of the last afterstate. An exploratory pick clears the prior
/// afterstate so the following reward performs no update: learning must not
/// attribute credit through an action it did not choose greedily.
pub struct TdPlayer {
    config: TdConfig,
    value: LinearValue,
    color: Option<Color>,
    learning: bool,
    last: Option<Afterstate>,
    next: Option<Afterstate>,
    rng: StdRng,
}

impl TdPlayer {
    pub fn new(config: TdConfig) -> Self {
        let mut rng = StdRng::from_os_rng();
        let value = LinearValue::new(&mut rng);
        TdPlayer {
            config,
            value,
            color: None,
            learning: true,
            last: None,
            next: None,
            rng,
        }
    }

    pub fn parameters(&self) -> [f64; NUM_FEATURES] {
        self.value.parameters()
    }

    pub fn set_parameters(&mut self, parameters: [f64; NUM_FEATURES]) {
        self.value.set_parameters(parameters);
    }
}

impl Player for TdPlayer {
    fn set_color(&mut self, color: Color) {
        self.color = Some(color);
        self.last = None;
        self.next = None;
    }

    fn propose_move(&mut self, board: &Board) -> usize {
        let color = self.color.expect("set_color must be called before play");
        let selection = choose_afterstate(
            board,
            color,
            &self.value,
            self.config.epsilon,
            self.learning,
            &mut self.rng,
        );

        if selection.exploratory {
            self.last = None;
        }
        self.next = Some(selection.afterstate);
        selection.column
    }

    fn receive_reward(&mut self, reward: f64) {
        let next = self
            .next
            .take()
            .expect("receive_reward without a pending proposal");

        if self.learning {
            if let Some(last) = &self.last {
                let color = self.color.expect("set_color must be called before play");
                let target = next.value + reward;
                let error = target - last.value;
                let gradient = self.value.gradient(&last.board, color);

                let mut params = self.value.parameters();
                for (p, g) in params.iter_mut().zip(gradient) {
                    *p += self.config.alpha * error * g;
                }
                self.value.set_parameters(params);
            }
        }

        self.last = Some(next);
    }

    fn set_learning(&mut self, enabled: bool) {
        self.learning = enabled;
    }
}
