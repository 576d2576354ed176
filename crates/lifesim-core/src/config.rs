//! Configuration loading and typed config structures for the LifeSim
//! simulation.
//!
//! A configuration file is a flat object of SCREAMING-KEBAB keys with one
//! nested `BLIP` object. JSON is the native format; any file whose
//! extension is not `.json` is read as YAML.
//!
//! Top-level keys that are absent take their defaults one by one. The
//! `BLIP` block is all or nothing: when absent every blip parameter takes
//! its default, when present every field must be given and all missing
//! names are reported together. Unknown keys are ignored.
//!
//! Parsing always ends with [`SimulationConfig::validate`], so a config
//! that loads is a config the world can be built from.

use std::path::Path;

use lifesim_agents::BlipConfig;
use lifesim_world::{TerrainLayout, WorldError};
use serde::{Deserialize, Serialize};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse JSON content.
    #[error("failed to parse config JSON: {source}")]
    Json {
        /// The underlying JSON parse error.
        source: serde_json::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The `BLIP` block is present but incomplete.
    #[error("BLIP block is missing: {}", .missing.join(", "))]
    IncompleteBlipBlock {
        /// Every missing key, in declaration order.
        missing: Vec<&'static str>,
    },

    /// The terrain does not fit the configured grid.
    #[error("invalid terrain: {source}")]
    Terrain {
        /// The underlying layout error.
        #[from]
        source: WorldError,
    },

    /// A value is outside its allowed range.
    #[error("invalid config: {reason}")]
    Invalid {
        /// Which rule was violated.
        reason: String,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Serializes with the same keys it is read from, so the engine can log
/// the effective configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub struct SimulationConfig {
    /// Blips placed at startup.
    pub init_pop: u32,
    /// Spread of lifespans across the map.
    pub age_var: u32,
    /// Sight radius in steps.
    pub see_range: u32,
    /// Capacity of each forest cell.
    pub food_size: u32,
    /// Food regrown per forest cell per tick.
    pub food_build: u32,
    /// Longest possible lifespan; also the population history window.
    pub max_life: u32,
    /// Grid rows.
    pub map_height: usize,
    /// Grid columns.
    pub map_width: usize,
    /// Rows of the north-west water block.
    pub water_height: usize,
    /// Columns of the north-west water block.
    pub water_width: usize,
    /// Columns of the eastern forest strip.
    pub forest_width: usize,
    /// RNG seed. `None` lets the engine draw one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Blip metabolism and budding.
    pub blip: BlipConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            init_pop: default_init_pop(),
            age_var: default_age_var(),
            see_range: default_see_range(),
            food_size: default_food_size(),
            food_build: default_food_build(),
            max_life: default_max_life(),
            map_height: default_map_height(),
            map_width: default_map_width(),
            water_height: default_water_size(),
            water_width: default_water_size(),
            forest_width: default_forest_width(),
            seed: None,
            blip: BlipConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a file.
    ///
    /// `.json` files are parsed as JSON, everything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, a parse
    /// error if the content is malformed, or a validation error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::parse_json(&contents)
        } else {
            Self::parse_yaml(&contents)
        }
    }

    /// Parse configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON, or a completeness
    /// or validation error.
    pub fn parse_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        raw.resolve()
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] for malformed YAML, or a completeness
    /// or validation error.
    pub fn parse_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yml::from_str(yaml)?;
        raw.resolve()
    }

    /// The starting map described by this configuration.
    pub const fn terrain_layout(&self) -> TerrainLayout {
        TerrainLayout {
            rows: self.map_height,
            cols: self.map_width,
            water_height: self.water_height,
            water_width: self.water_width,
            forest_width: self.forest_width,
            food_size: self.food_size,
            food_build: self.food_build,
        }
    }

    /// Check cross-field rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violated rule, or
    /// [`ConfigError::Terrain`] if the map blocks do not fit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_life == 0 {
            return Err(invalid("MAX-LIFE must be at least 1"));
        }
        if self.age_var > self.max_life {
            return Err(invalid(format!(
                "AGE-VAR ({}) must not exceed MAX-LIFE ({})",
                self.age_var, self.max_life
            )));
        }
        let blip = &self.blip;
        if blip.min_budding_age > blip.max_budding_age {
            return Err(invalid(format!(
                "MIN-BUDDING-AGE ({}) must not exceed MAX-BUDDING-AGE ({})",
                blip.min_budding_age, blip.max_budding_age
            )));
        }
        if blip.budding_prob > 100 {
            return Err(invalid(format!(
                "BUDDING-PROB is a percentage, got {}",
                blip.budding_prob
            )));
        }
        if blip.budding_time == 0 {
            return Err(invalid("BUDDING-TIME must be at least 1"));
        }
        if blip.max_res == 0 {
            return Err(invalid("MAX-RES must be at least 1"));
        }
        self.terrain_layout().validate()?;
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Configuration as written on disk, before defaults for the `BLIP` block
/// are decided.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
struct RawConfig {
    #[serde(default = "default_init_pop")]
    init_pop: u32,
    #[serde(default = "default_age_var")]
    age_var: u32,
    #[serde(default = "default_see_range")]
    see_range: u32,
    #[serde(default = "default_food_size")]
    food_size: u32,
    #[serde(default = "default_food_build")]
    food_build: u32,
    #[serde(default = "default_max_life")]
    max_life: u32,
    #[serde(default = "default_map_height")]
    map_height: usize,
    #[serde(default = "default_map_width")]
    map_width: usize,
    #[serde(default = "default_water_size")]
    water_height: usize,
    #[serde(default = "default_water_size")]
    water_width: usize,
    #[serde(default = "default_forest_width")]
    forest_width: usize,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    blip: Option<RawBlipConfig>,
}

impl RawConfig {
    fn resolve(self) -> Result<SimulationConfig, ConfigError> {
        let blip = match self.blip {
            Some(raw) => raw.complete()?,
            None => BlipConfig::default(),
        };
        let config = SimulationConfig {
            init_pop: self.init_pop,
            age_var: self.age_var,
            see_range: self.see_range,
            food_size: self.food_size,
            food_build: self.food_build,
            max_life: self.max_life,
            map_height: self.map_height,
            map_width: self.map_width,
            water_height: self.water_height,
            water_width: self.water_width,
            forest_width: self.forest_width,
            seed: self.seed,
            blip,
        };
        config.validate()?;
        Ok(config)
    }
}

/// The `BLIP` block with every field optional, so that all missing keys
/// can be reported at once.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
struct RawBlipConfig {
    budding_min_res: Option<u32>,
    min_budding_age: Option<u32>,
    max_budding_age: Option<u32>,
    budding_prob: Option<u32>,
    budding_time: Option<u32>,
    bud_factor: Option<u32>,
    power_to_stay: Option<u32>,
    vapour_to_stay: Option<u32>,
    power_to_move: Option<u32>,
    vapour_to_move: Option<u32>,
    max_res: Option<u32>,
}

impl RawBlipConfig {
    fn complete(self) -> Result<BlipConfig, ConfigError> {
        let mut missing = Vec::new();
        let mut take = |value: Option<u32>, key: &'static str| {
            if value.is_none() {
                missing.push(key);
            }
            value.unwrap_or_default()
        };
        let config = BlipConfig {
            budding_min_res: take(self.budding_min_res, "BUDDING-MIN-RES"),
            min_budding_age: take(self.min_budding_age, "MIN-BUDDING-AGE"),
            max_budding_age: take(self.max_budding_age, "MAX-BUDDING-AGE"),
            budding_prob: take(self.budding_prob, "BUDDING-PROB"),
            budding_time: take(self.budding_time, "BUDDING-TIME"),
            bud_factor: take(self.bud_factor, "BUD-FACTOR"),
            power_to_stay: take(self.power_to_stay, "POWER-TO-STAY"),
            vapour_to_stay: take(self.vapour_to_stay, "VAPOUR-TO-STAY"),
            power_to_move: take(self.power_to_move, "POWER-TO-MOVE"),
            vapour_to_move: take(self.vapour_to_move, "VAPOUR-TO-MOVE"),
            max_res: take(self.max_res, "MAX-RES"),
        };
        if missing.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::IncompleteBlipBlock { missing })
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_init_pop() -> u32 {
    20
}

const fn default_age_var() -> u32 {
    100
}

const fn default_see_range() -> u32 {
    25
}

const fn default_food_size() -> u32 {
    100
}

const fn default_food_build() -> u32 {
    1
}

const fn default_max_life() -> u32 {
    500
}

const fn default_map_height() -> usize {
    20
}

const fn default_map_width() -> usize {
    50
}

const fn default_water_size() -> usize {
    5
}

const fn default_forest_width() -> usize {
    5
}
