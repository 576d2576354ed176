//! Population history and the equilibrium rule.
//!
//! After every tick the world records its population here. Once more than
//! `window` entries have accumulated, each new entry is compared against
//! the mean of the entries before it; the oldest entry is then dropped so
//! the history never holds more than `window` values between ticks. If
//! the newest population lies within 10% of that mean (bounds inclusive)
//! the ecosystem is considered settled and the world ends the run.
//!
//! The comparison `0.9 * mean <= current <= 1.1 * mean` is evaluated as
//! `9 * sum <= 10 * n * current <= 11 * sum` in `u64`, with `n` the number
//! of entries averaged.

use std::collections::VecDeque;

/// Rolling population log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationMonitor {
    history: VecDeque<u32>,
    window: usize,
}

impl PopulationMonitor {
    /// A monitor that starts judging once it has seen more than `window`
    /// ticks.
    pub fn new(window: u32) -> Self {
        let window = usize::try_from(window).unwrap_or(usize::MAX);
        Self {
            history: VecDeque::with_capacity(window.saturating_add(1).min(4096)),
            window,
        }
    }

    /// Record the population at the end of a tick.
    ///
    /// Returns `true` when the population has settled and the run should
    /// end.
    pub fn record(&mut self, population: u32) -> bool {
        self.history.push_back(population);
        if self.history.len() <= self.window {
            return false;
        }

        let earlier = self.history.len().saturating_sub(1);
        let sum = self
            .history
            .iter()
            .take(earlier)
            .fold(0_u64, |acc, &p| acc.saturating_add(u64::from(p)));
        self.history.pop_front();

        let Ok(n) = u64::try_from(earlier) else {
            return false;
        };
        if n == 0 {
            return false;
        }
        let scaled = u64::from(population).saturating_mul(10).saturating_mul(n);
        sum.saturating_mul(9) <= scaled && scaled <= sum.saturating_mul(11)
    }

    /// Entries currently held, oldest first.
    pub fn history(&self) -> impl Iterator<Item = u32> {
        self.history.iter().copied()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Ticks that must be recorded before the rule can fire.
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        self.history.clear();
    }
}
