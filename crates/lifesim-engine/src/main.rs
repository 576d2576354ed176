//! Headless engine binary for the LifeSim grid ecosystem.
//!
//! Loads a configuration, builds the world, and ticks it until the
//! population dies out, settles, hits an optional tick cap, or the
//! process receives Ctrl-C. Population is logged every tick and the peak
//! population once at the end.
//!
//! # Usage
//!
//! ```text
//! lifesim-engine [CONFIG] [SECONDS-PER-TICK] [MAX-TICKS]
//! ```
//!
//! `CONFIG` defaults to `lifesim-config.json` in the working directory,
//! and to built-in defaults if that file does not exist. `SECONDS-PER-TICK`
//! may be fractional and defaults to 0. Log verbosity follows `RUST_LOG`.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Parse arguments and load configuration
//! 3. Pick the RNG seed (configured, or drawn and logged)
//! 4. Build the world and place the initial population
//! 5. Install the Ctrl-C handler
//! 6. Run the simulation loop
//! 7. Log the result

mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use lifesim_core::runner::{self, RunOptions, StopHandle, TickCallback};
use lifesim_core::{SimulationConfig, TickSummary, World};
use rand::Rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Config file looked up when none is given on the command line.
const DEFAULT_CONFIG_FILE: &str = "lifesim-config.json";

/// Parsed command line.
#[derive(Debug)]
struct EngineArgs {
    config_path: Option<PathBuf>,
    tick_interval: Duration,
    max_ticks: Option<u64>,
}

/// Logs the population after every tick.
struct PopulationLog;

impl TickCallback for PopulationLog {
    fn on_tick(&mut self, summary: &TickSummary) {
        info!(
            tick = summary.tick,
            population = summary.population,
            births = summary.births,
            old_age = summary.deaths.old_age,
            exhaustion = summary.deaths.exhaustion,
            "Population {}",
            summary.population
        );
    }
}

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("lifesim-engine starting");

    // 2. Parse arguments and load configuration.
    let args = parse_args(std::env::args().skip(1))?;
    let config = load_config(args.config_path.as_deref())?;

    // 3. Pick the seed.
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    info!(
        seed,
        config = %serde_json::to_string(&config).map_err(EngineError::from)?,
        "Configuration loaded"
    );

    // 4. Build the world.
    let mut world = World::seeded(config, seed).map_err(EngineError::from)?;

    // 5. Ctrl-C requests a stop before the next tick.
    let stop = StopHandle::new();
    let on_signal = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, stopping after the current tick");
            on_signal.request_stop();
        }
    });

    // 6. Run.
    let options = RunOptions {
        max_ticks: args.max_ticks,
        tick_interval: args.tick_interval,
    };
    let result = runner::run_simulation(&mut world, &options, &stop, &mut PopulationLog)
        .await
        .map_err(EngineError::from)?;

    // 7. Report.
    runner::log_simulation_end(&result);
    info!("Max population {}", result.peak_population);

    Ok(())
}

/// Parse `[CONFIG] [SECONDS-PER-TICK] [MAX-TICKS]`.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<EngineArgs, EngineError> {
    let config_path = args.next().map(PathBuf::from);

    let tick_interval = match args.next() {
        Some(raw) => {
            let seconds: f64 = raw.parse().map_err(|e| EngineError::Usage {
                message: format!("seconds per tick must be a number, got {raw:?}: {e}"),
            })?;
            Duration::try_from_secs_f64(seconds).map_err(|e| EngineError::Usage {
                message: format!("invalid seconds per tick {seconds}: {e}"),
            })?
        }
        None => Duration::ZERO,
    };

    let max_ticks = match args.next() {
        Some(raw) => Some(raw.parse::<u64>().map_err(|e| EngineError::Usage {
            message: format!("max ticks must be a whole number, got {raw:?}: {e}"),
        })?),
        None => None,
    };

    if let Some(extra) = args.next() {
        return Err(EngineError::Usage {
            message: format!("unexpected argument {extra:?}"),
        });
    }

    Ok(EngineArgs {
        config_path,
        tick_interval,
        max_ticks,
    })
}

/// Load configuration from the given path, or from the default file if it
/// exists, or fall back to built-in defaults.
fn load_config(path: Option<&Path>) -> Result<SimulationConfig, EngineError> {
    if let Some(path) = path {
        return Ok(SimulationConfig::from_file(path)?);
    }
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        Ok(SimulationConfig::from_file(default_path)?)
    } else {
        info!("Config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}
