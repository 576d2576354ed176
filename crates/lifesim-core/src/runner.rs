//! Simulation loop runner.
//!
//! This module provides [`run_simulation`], the top-level async function
//! that ticks a [`World`] until one of:
//!
//! - **Extinction**: no blip is left alive
//! - **Equilibrium**: the population monitor emptied the world
//! - **Tick limit**: an optional `max_ticks` was reached
//! - **Operator stop**: a [`StopHandle`] was triggered (e.g. Ctrl-C)
//!
//! Each tick is a synchronous call; the runner only adds pacing between
//! ticks and the stop check around them.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::Rng;
use tracing::{info, warn};

use crate::tick::{TickError, TickSummary};
use crate::world::World;

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEndReason {
    /// Every blip died.
    Extinction,
    /// The population settled and the world was emptied.
    Equilibrium,
    /// Reached the configured `max_ticks` limit.
    MaxTicksReached,
    /// A stop was requested from outside the loop.
    OperatorStop,
}

/// Classify a completed tick as terminal or not.
///
/// Equilibrium wins over extinction: an equilibrium tick always leaves the
/// world empty.
pub const fn classify_end(summary: &TickSummary) -> Option<SimulationEndReason> {
    if summary.equilibrium {
        Some(SimulationEndReason::Equilibrium)
    } else if summary.population == 0 {
        Some(SimulationEndReason::Extinction)
    } else {
        None
    }
}

/// Limits and pacing for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Stop after this many ticks. `None` runs until the world ends.
    pub max_ticks: Option<u64>,
    /// Wall-clock pause between ticks.
    pub tick_interval: Duration,
}

/// Shared flag for requesting a clean stop from another task.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    requested: Arc<AtomicBool>,
}

impl StopHandle {
    /// A handle with no stop requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the runner to stop before its next tick.
    pub fn request_stop(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

/// Result of the simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
    /// Largest population seen, counting the initial one.
    pub peak_population: u32,
}

/// Callback invoked after each tick completes.
///
/// The engine uses this to report population every tick.
pub trait TickCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// # Arguments
///
/// * `world` - The world to tick
/// * `options` - Tick limit and pacing
/// * `stop` - Checked before every tick
/// * `callback` - Called after each tick
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick fails. The world is left as the
/// failing tick left it.
pub async fn run_simulation<R: Rng>(
    world: &mut World<R>,
    options: &RunOptions,
    stop: &StopHandle,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;
    let mut peak_population = u32::try_from(world.population()).unwrap_or(u32::MAX);

    info!(
        population = peak_population,
        max_ticks = options.max_ticks,
        tick_interval_ms = u64::try_from(options.tick_interval.as_millis()).unwrap_or(u64::MAX),
        "Simulation starting"
    );

    if world.is_extinct() {
        info!("No blips to simulate");
        return Ok(SimulationResult {
            end_reason: SimulationEndReason::Extinction,
            final_summary: None,
            total_ticks,
            peak_population,
        });
    }

    loop {
        // --- Check stop request (before tick) ---
        if stop.is_stop_requested() {
            info!("Operator stop requested");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::OperatorStop,
                final_summary: last_summary,
                total_ticks,
                peak_population,
            });
        }

        // --- Execute tick ---
        let summary = world.tick()?;
        total_ticks = total_ticks.saturating_add(1);
        peak_population = peak_population.max(summary.population);

        callback.on_tick(&summary);

        // --- Check extinction / equilibrium ---
        if let Some(end_reason) = classify_end(&summary) {
            info!(tick = summary.tick, reason = ?end_reason, "World is empty");
            return Ok(SimulationResult {
                end_reason,
                final_summary: Some(summary),
                total_ticks,
                peak_population,
            });
        }

        // --- Check tick limit (after tick) ---
        if options.max_ticks.is_some_and(|max| total_ticks >= max) {
            info!(
                tick = summary.tick,
                max_ticks = options.max_ticks,
                "Tick limit reached"
            );
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::MaxTicksReached,
                final_summary: Some(summary),
                total_ticks,
                peak_population,
            });
        }

        last_summary = Some(summary);

        // --- Sleep for tick interval ---
        if !options.tick_interval.is_zero() {
            tokio::time::sleep(options.tick_interval).await;
        }
    }
}

/// Log the simulation end sequence.
///
/// Called after [`run_simulation`] returns.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        max_population = result.peak_population,
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            population = summary.population,
            births = summary.births,
            deaths = summary.deaths.total(),
            "Final tick summary"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::config::SimulationConfig;
    use crate::tick::Deaths;

    fn make_world(config: SimulationConfig) -> World<SmallRng> {
        World::new(config, SmallRng::seed_from_u64(17)).unwrap()
    }

    #[tokio::test]
    async fn bounded_by_max_ticks() {
        let mut world = make_world(SimulationConfig::default());
        let options = RunOptions {
            max_ticks: Some(5),
            ..RunOptions::default()
        };
        let result = run_simulation(&mut world, &options, &StopHandle::new(), &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(result.final_summary.map(|s| s.tick), Some(5));
        assert!(result.peak_population >= 20);
    }

    #[tokio::test]
    async fn operator_stop() {
        let mut world = make_world(SimulationConfig::default());
        let stop = StopHandle::new();
        stop.request_stop();
        let result = run_simulation(&mut world, &RunOptions::default(), &stop, &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, SimulationEndReason::OperatorStop);
        assert_eq!(result.total_ticks, 0);
        assert_eq!(world.tick_count(), 0);
    }

    #[tokio::test]
    async fn extinction_stops_simulation() {
        // Every blip lives exactly 3 ticks and nothing buds.
        let mut config = SimulationConfig {
            max_life: 3,
            age_var: 0,
            ..SimulationConfig::default()
        };
        config.blip.budding_prob = 0;
        let mut world = make_world(config);
        let result = run_simulation(&mut world, &RunOptions::default(), &StopHandle::new(), &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, SimulationEndReason::Extinction);
        assert_eq!(result.total_ticks, 3);
        assert_eq!(result.peak_population, 20);
        let last = result.final_summary.unwrap();
        assert_eq!(last.deaths.old_age, 20);
        assert!(world.is_extinct());
    }

    #[tokio::test]
    async fn empty_world_ends_immediately() {
        let mut world = make_world(SimulationConfig {
            init_pop: 0,
            ..SimulationConfig::default()
        });
        let result = run_simulation(&mut world, &RunOptions::default(), &StopHandle::new(), &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(result.end_reason, SimulationEndReason::Extinction);
        assert_eq!(result.total_ticks, 0);
        assert!(result.final_summary.is_none());
    }

    #[tokio::test]
    async fn tick_callback_is_called() {
        struct Counter(Vec<u32>);
        impl TickCallback for Counter {
            fn on_tick(&mut self, summary: &TickSummary) {
                self.0.push(summary.population);
            }
        }

        let mut world = make_world(SimulationConfig::default());
        let options = RunOptions {
            max_ticks: Some(3),
            tick_interval: Duration::from_millis(1),
        };
        let mut counter = Counter(Vec::new());
        run_simulation(&mut world, &options, &StopHandle::new(), &mut counter)
            .await
            .unwrap();
        assert_eq!(counter.0.len(), 3);
    }

    #[test]
    fn equilibrium_outranks_extinction() {
        let summary = TickSummary {
            tick: 9,
            births: 0,
            deaths: Deaths::default(),
            population: 0,
            equilibrium: true,
        };
        assert_eq!(classify_end(&summary), Some(SimulationEndReason::Equilibrium));
        let summary = TickSummary {
            equilibrium: false,
            ..summary
        };
        assert_eq!(classify_end(&summary), Some(SimulationEndReason::Extinction));
        let summary = TickSummary {
            population: 4,
            ..summary
        };
        assert_eq!(classify_end(&summary), None);
    }
}
