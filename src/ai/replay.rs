use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use crate::ai::features::NUM_FEATURES;
use crate::ai::td::{choose_afterstate, Afterstate};
use crate::ai::value::{LinearValue, ValueFunction};
use crate::ai::Player;
use crate::game::{Board, Color};

/// Hyperparameters for the experience-replay learner.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Exploration rate while learning is enabled.
    pub epsilon: f64,
    /// Learning rate for the batched gradient step.
    pub alpha: f64,
    /// Retained buffer size; older experiences are evicted past this.
    pub capacity: usize,
    /// Batch sample size per learning step.
    pub episode_size: usize,
    /// Perform a learning step whenever the buffer length is a multiple of
    /// this.
    pub learn_interval: usize,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            epsilon: 0.05,
            alpha: 0.001,
            capacity: 1000,
            episode_size: 100,
            learn_interval: 100,
        }
    }
}

/// One stored transition: the afterstate we chose previously, the afterstate
/// we chose now, and the reward that bridges them.
#[derive(Debug, Clone, Copy)]
struct Experience {
    before: Board,
    after: Board,
    reward: f64,
}

/// Growable experience store with oldest-first eviction and uniform
/// without-replacement sampling.
struct ExperienceBuffer {
    entries: Vec<Experience>,
}

impl ExperienceBuffer {
    fn new() -> Self {
        ExperienceBuffer {
            entries: Vec::new(),
        }
    }

    fn push(&mut self, experience: Experience) {
        self.entries.push(experience);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drop the oldest entries so that at most `capacity` remain.
    fn truncate_to_recent(&mut self, capacity: usize) {
        if self.entries.len() > capacity {
            let excess = self.entries.len() - capacity;
            self.entries.drain(..excess);
        }
    }

    /// Sample `amount` entries uniformly without replacement.
    fn sample(&self, rng: &mut StdRng, amount: usize) -> Vec<Experience> {
        let indices = index::sample(rng, self.entries.len(), amount);
        indices.iter().map(|i| self.entries[i]).collect()
    }
}

/// Afterstate value player learning from batched experience replay.
///
/// Move selection matches [`super::TdPlayer`] exactly; only the learning
/// step differs. Rewards append transitions to the buffer, and every
/// `learn_interval` appends the player evicts down to `capacity`, samples a
/// batch, and applies one full-batch least-squares gradient step over it
/// rather than a per-sample TD update.
pub struct ReplayTdPlayer {
    config: ReplayConfig,
    value: LinearValue,
    color: Option<Color>,
    learning: bool,
    last: Option<Afterstate>,
    next: Option<Afterstate>,
    buffer: ExperienceBuffer,
    rng: StdRng,
}

impl ReplayTdPlayer {
    pub fn new(config: ReplayConfig) -> Self {
        let mut rng = StdRng::from_os_rng();
        let value = LinearValue::new(&mut rng);
        ReplayTdPlayer {
            config,
            value,
            color: None,
            learning: true,
            last: None,
            next: None,
            buffer: ExperienceBuffer::new(),
            rng,
        }
    }

    pub fn parameters(&self) -> [f64; NUM_FEATURES] {
        self.value.parameters()
    }

    pub fn set_parameters(&mut self, parameters: [f64; NUM_FEATURES]) {
        self.value.set_parameters(parameters);
    }

    /// One gradient-descent step on the mean-squared error over `batch`:
    /// `w -= alpha * 2 * X^T (X w - targets)` with targets
    /// `V(after) + reward` under the current parameters.
    fn batch_update(&mut self, batch: &[Experience], color: Color) {
        let params = self.value.parameters();
        let mut gradient = [0.0; NUM_FEATURES];

        for experience in batch {
            let features = self.value.gradient(&experience.before, color);
            let prediction: f64 = features
                .iter()
                .zip(params.iter())
                .map(|(f, p)| f * p)
                .sum();
            let target = self.value.value(&experience.after, color) + experience.reward;
            let residual = prediction - target;
            for (g, f) in gradient.iter_mut().zip(features) {
                *g += 2.0 * f * residual;
            }
        }

        let mut updated = params;
        for (p, g) in updated.iter_mut().zip(gradient) {
            *p -= self.config.alpha * g;
        }
        self.value.set_parameters(updated);
    }
}

impl Player for ReplayTdPlayer {
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
                self.buffer.push(Experience {
                    before: last.board,
                    after: next.board,
                    reward,
                });

                if self.buffer.len() % self.config.learn_interval == 0 {
                    self.buffer.truncate_to_recent(self.config.capacity);
                    let amount = self.config.episode_size.min(self.buffer.len());
                    let batch = self.buffer.sample(&mut self.rng, amount);
                    let color = self.color.expect("set_color must be called before play");
                    self.batch_update(&batch, color);
                }
            }
        }

        self.last = Some(next);
    }

    fn set_learning(&mut self, enabled: bool) {
        self.learning = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO: [f64; NUM_FEATURES] = [0.0; NUM_FEATURES];

    fn experience(reward: f64) -> Experience {
        Experience {
            before: Board::new(),
            after: Board::new(),
            reward,
        }
    }

    fn player(config: ReplayConfig) -> ReplayTdPlayer {
        let mut p = ReplayTdPlayer::new(config);
        p.set_parameters(ZERO);
        p.set_color(Color::White);
        p
    }

    #[test]
    fn test_eviction_keeps_most_recent() {
        let mut buffer = ExperienceBuffer::new();
        for i in 0..10 {
            buffer.push(experience(i as f64));
        }

        buffer.truncate_to_recent(4);
        assert_eq!(buffer.len(), 4);
        let rewards: Vec<f64> = buffer.entries.iter().map(|e| e.reward).collect();
        assert_eq!(rewards, vec![6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_truncate_below_capacity_is_a_noop() {
        let mut buffer = ExperienceBuffer::new();
        for i in 0..3 {
            buffer.push(experience(i as f64));
        }
        buffer.truncate_to_recent(10);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_sample_is_without_replacement() {
        let mut buffer = ExperienceBuffer::new();
        for i in 0..20 {
            buffer.push(experience(i as f64));
        }

        let mut rng = StdRng::seed_from_u64(11);
        let mut rewards: Vec<f64> = buffer
            .sample(&mut rng, 20)
            .iter()
            .map(|e| e.reward)
            .collect();
        rewards.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let expected: Vec<f64> = (0..20).map(|i| i as f64).collect();
        assert_eq!(rewards, expected);
    }

    #[test]
    fn test_batch_update_gradient_math() {
        // learn_interval 1 triggers on the very first stored experience;
        // with zero parameters the step reduces to 2 * alpha * reward *
        // features(before).
        let mut p = player(ReplayConfig {
            epsilon: 0.0,
            alpha: 0.25,
            capacity: 100,
            episode_size: 1,
            learn_interval: 1,
        });

        let board = Board::new();
        let col = p.propose_move(&board);
        assert_eq!(col, 0);
        p.receive_reward(0.0);

        let mut board = board.afterstate(col, Color::White).unwrap();
        board.apply_move(6, Color::Red).unwrap();
        p.propose_move(&board);
        p.receive_reward(1.0);

        // before = lone corner disc, on exactly 3 open lines:
        // w = 2 * 0.25 * 1.0 * [3, 0, ...]
        let params = p.parameters();
        assert!((params[0] - 1.5).abs() < 1e-12);
        assert!(params[1..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_learning_waits_for_the_interval() {
        let mut p = player(ReplayConfig {
            epsilon: 0.0,
            alpha: 0.25,
            capacity: 100,
            episode_size: 4,
            learn_interval: 4,
        });

        let mut board = Board::new();
        // 4 proposals produce only 3 stored experiences (the first reward
        // has no prior afterstate), so no update yet.
        for _ in 0..4 {
            let col = p.propose_move(&board);
            board.apply_move(col, Color::White).unwrap();
            p.receive_reward(0.5);
        }
        assert_eq!(p.parameters(), ZERO);

        // The 5th cycle stores the 4th experience and triggers the batch.
        let col = p.propose_move(&board);
        board.apply_move(col, Color::White).unwrap();
        p.receive_reward(0.5);
        assert_ne!(p.parameters(), ZERO);
    }

    #[test]
    fn test_exploratory_moves_store_nothing() {
        let mut p = player(ReplayConfig {
            epsilon: 1.0,
            alpha: 0.25,
            capacity: 100,
            episode_size: 1,
            learn_interval: 1,
        });

        let mut board = Board::new();
        for _ in 0..6 {
            let col = p.propose_move(&board);
            board.apply_move(col, Color::White).unwrap();
            p.receive_reward(1.0);
        }
        assert_eq!(p.buffer.len(), 0);
        assert_eq!(p.parameters(), ZERO);
    }
}
