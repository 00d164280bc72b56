use std::collections::VecDeque;

use crate::arena::MatchResult;
use crate::game::Color;

/// Match statistics tracker with rolling window computations.
pub struct TrainingMetrics {
    results: VecDeque<MatchResult>,
    capacity: usize,
    total_matches: usize, // lifetime count, never capped
}

impl TrainingMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        TrainingMetrics {
            results: VecDeque::with_capacity(capacity),
            capacity,
            total_matches: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record(&mut self, result: MatchResult) {
        self.total_matches += 1;
        self.results.push_back(result);
        if self.results.len() > self.capacity {
            self.results.pop_front();
        }
    }

    pub fn total_matches(&self) -> usize {
        self.total_matches
    }

    /// Win rate for `color` over the last N matches.
    pub fn win_rate(&self, color: Color, last_n: usize) -> f64 {
        let n = self.results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let wins = self
            .results
            .iter()
            .rev()
            .take(n)
            .filter(|r| r.winner == Some(color))
            .count();
        wins as f64 / n as f64
    }

    /// Draw rate over the last N matches.
    pub fn draw_rate(&self, last_n: usize) -> f64 {
        let n = self.results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let draws = self
            .results
            .iter()
            .rev()
            .take(n)
            .filter(|r| r.winner.is_none())
            .count();
        draws as f64 / n as f64
    }

    /// Average match length over the last N matches.
    pub fn average_moves(&self, last_n: usize) -> f64 {
        let n = self.results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: usize = self.results.iter().rev().take(n).map(|r| r.moves).sum();
        total as f64 / n as f64
    }
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self::new()
    }
}
