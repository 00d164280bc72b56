use crate::ai::Player;
use crate::arena::Match;
use crate::game::Color;
use crate::training::metrics::TrainingMetrics;

/// Training session configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub num_matches: usize,
    /// Print a progress line every this many matches. 0 disables logging.
    pub log_interval: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            num_matches: 10_000,
            log_interval: 100,
        }
    }
}

/// Self-play training session driver: plays matches between two players in
/// a loop and tracks rolling statistics.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    /// Run the full training session. Both players keep whatever they learn.
    pub fn train(&self, white: &mut dyn Player, red: &mut dyn Player) -> TrainingMetrics {
        let mut metrics = TrainingMetrics::new();

        for match_number in 1..=self.config.num_matches {
            let result = Match::new(&mut *white, &mut *red).play();
            metrics.record(result);

            if self.config.log_interval > 0 && match_number % self.config.log_interval == 0 {
                let window = self.config.log_interval;
                println!(
                    "Match {}/{} | white: {:.1}% | red: {:.1}% | draw: {:.1}% | avg_len: {:.1}",
                    match_number,
                    self.config.num_matches,
                    metrics.win_rate(Color::White, window) * 100.0,
                    metrics.win_rate(Color::Red, window) * 100.0,
                    metrics.draw_rate(window) * 100.0,
                    metrics.average_moves(window),
                );
            }
        }

        metrics
    }
}
