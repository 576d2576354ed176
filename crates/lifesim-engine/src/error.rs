//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and the run.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Command-line arguments could not be understood.
    #[error("usage error: {message}")]
    Usage {
        /// What was wrong with the arguments.
        message: String,
    },

    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: lifesim_core::ConfigError,
    },

    /// World construction failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: lifesim_world::WorldError,
    },

    /// The effective configuration could not be rendered for the log.
    #[error("failed to render config: {source}")]
    Render {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: lifesim_core::RunnerError,
    },
}
