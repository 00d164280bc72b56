use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::ai::features::{feature_vector, NUM_FEATURES};
use crate::game::{Board, Color};

/// Capability interface for afterstate value functions.
///
/// Move selection and reward handling depend only on this interface, never
/// on a concrete estimator.
pub trait ValueFunction {
    /// Estimated value of `board` from `color`'s perspective.
    fn value(&self, board: &Board, color: Color) -> f64;

    /// Gradient of the value with respect to the parameters, evaluated at
    /// `board`.
    fn gradient(&self, board: &Board, color: Color) -> [f64; NUM_FEATURES];

    fn parameters(&self) -> [f64; NUM_FEATURES];

    fn set_parameters(&mut self, parameters: [f64; NUM_FEATURES]);
}

/// Linear value function over the open-line feature vector:
/// `V(board) = dot(features(board), weights)`.
pub struct LinearValue {
    weights: [f64; NUM_FEATURES],
}

impl LinearValue {
    /// Initialize with random weights: positive for the player's own
    /// open-line counts, negative for the opponent's.
    pub fn new(rng: &mut StdRng) -> Self {
        let mut weights = [0.0; NUM_FEATURES];
        for w in weights.iter_mut().take(4) {
            *w = rng.random_range(0.0..1.0);
        }
        for w in weights.iter_mut().skip(4) {
            *w = rng.random_range(-1.0..0.0);
        }
        LinearValue { weights }
    }
}

impl Default for LinearValue {
    fn default() -> Self {
        Self::new(&mut StdRng::from_os_rng())
    }
}

impl ValueFunction for LinearValue {
    fn value(&self, board: &Board, color: Color) -> f64 {
        let features = feature_vector(board, color);
        features
            .iter()
            .zip(self.weights.iter())
            .map(|(f, w)| f * w)
            .sum()
    }

    /// The value is linear in the weights, so the gradient is just the
    /// feature vector.
    fn gradient(&self, board: &Board, color: Color) -> [f64; NUM_FEATURES] {
        feature_vector(board, color)
    }

    fn parameters(&self) -> [f64; NUM_FEATURES] {
        self.weights
    }

    fn set_parameters(&mut self, parameters: [f64; NUM_FEATURES]) {
        self.weights = parameters;
    }
}
