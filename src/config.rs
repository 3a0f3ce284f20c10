//! Configuration management with environment variable support.
//!
//! This module provides centralized configuration for the level harness, supporting:
//! - Environment variables for all configurable values
//! - Sensible defaults that match the reference simulator layout
//! - Explicit injection: the pipeline takes a `Config`, it never reads ambient state
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `LEVEL_HARNESS_SIM_ROOT` | Simulator framework root directory | `./Mario-AI-Framework` |
//! | `LEVEL_HARNESS_MAP_DIR` | Directory for serialized map files | `./Mario-AI-Framework/levels/test` |
//! | `LEVEL_HARNESS_MAP_NAME` | File name for the serialized map | `map_temp.txt` |
//! | `LEVEL_HARNESS_DATASET` | CSV dataset path | `./generated_levels.csv` |
//! | `LEVEL_HARNESS_LEVEL_COLUMN` | Dataset column holding level grids | `level` |
//! | `LEVEL_HARNESS_MAX_ATTEMPTS` | Attempts per level before giving up | `1` |
//!
//! # Example
//!
//! ```bash
//! # Point the harness at a checkout elsewhere
//! export LEVEL_HARNESS_SIM_ROOT="/opt/Mario-AI-Framework"
//! export LEVEL_HARNESS_DATASET="/data/generated_levels.csv"
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

// ============================================================================
// Default Values (matching the reference simulator layout)
// ============================================================================

/// Default simulator framework root
pub const DEFAULT_SIM_ROOT: &str = "./Mario-AI-Framework";

/// Default directory for serialized map files
pub const DEFAULT_MAP_DIR: &str = "./Mario-AI-Framework/levels/test";

/// Default serialized map file name
pub const DEFAULT_MAP_NAME: &str = "map_temp.txt";

/// Default CSV dataset path
pub const DEFAULT_DATASET: &str = "./generated_levels.csv";

/// Default dataset column holding level grids
pub const DEFAULT_LEVEL_COLUMN: &str = "level";

/// Default number of attempts per level
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

// ============================================================================
// Environment Variable Names
// ============================================================================

/// Environment variable for the simulator root
pub const ENV_SIM_ROOT: &str = "LEVEL_HARNESS_SIM_ROOT";

/// Environment variable for the map output directory
pub const ENV_MAP_DIR: &str = "LEVEL_HARNESS_MAP_DIR";

/// Environment variable for the map file name
pub const ENV_MAP_NAME: &str = "LEVEL_HARNESS_MAP_NAME";

/// Environment variable for the dataset path
pub const ENV_DATASET: &str = "LEVEL_HARNESS_DATASET";

/// Environment variable for the level column name
pub const ENV_LEVEL_COLUMN: &str = "LEVEL_HARNESS_LEVEL_COLUMN";

/// Environment variable for the per-level attempt count
pub const ENV_MAX_ATTEMPTS: &str = "LEVEL_HARNESS_MAX_ATTEMPTS";

// ============================================================================
// Configuration Getters (with caching)
// ============================================================================

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration (initialized from environment on first access)
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Centralized configuration for the level harness
#[derive(Debug, Clone)]
pub struct Config {
    /// Simulator configuration
    pub simulator: SimulatorSettings,
    /// Dataset configuration
    pub dataset: DatasetSettings,
    /// Evaluation configuration
    pub eval: EvalSettings,
}

/// Simulator-related settings
#[derive(Debug, Clone)]
pub struct SimulatorSettings {
    /// Root directory of the simulator framework checkout
    pub root: PathBuf,
    /// Directory the serialized map file is written into
    pub map_dir: PathBuf,
    /// File name of the serialized map
    pub map_name: String,
}

/// Dataset-related settings
#[derive(Debug, Clone)]
pub struct DatasetSettings {
    /// Path to the CSV dataset of generated levels
    pub path: PathBuf,
    /// Name of the column holding level grids
    pub level_column: String,
}

/// Evaluation-related settings
#[derive(Debug, Clone)]
pub struct EvalSettings {
    /// Maximum attempts per level (always at least 1)
    pub max_attempts: u32,
}

impl Config {
    /// Create configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            simulator: SimulatorSettings::from_env(),
            dataset: DatasetSettings::from_env(),
            eval: EvalSettings::from_env(),
        }
    }

    /// Create configuration with all defaults (ignoring environment)
    pub fn defaults() -> Self {
        Self {
            simulator: SimulatorSettings::defaults(),
            dataset: DatasetSettings::defaults(),
            eval: EvalSettings::defaults(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl SimulatorSettings {
    /// Create simulator settings from environment variables
    pub fn from_env() -> Self {
        Self {
            root: env::var(ENV_SIM_ROOT)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_SIM_ROOT)),
            map_dir: env::var(ENV_MAP_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MAP_DIR)),
            map_name: env::var(ENV_MAP_NAME)
                .unwrap_or_else(|_| DEFAULT_MAP_NAME.to_string()),
        }
    }

    /// Create simulator settings with defaults
    pub fn defaults() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_SIM_ROOT),
            map_dir: PathBuf::from(DEFAULT_MAP_DIR),
            map_name: DEFAULT_MAP_NAME.to_string(),
        }
    }

    /// Full path the serialized map file is written to
    pub fn map_path(&self) -> PathBuf {
        self.map_dir.join(&self.map_name)
    }
}

impl DatasetSettings {
    /// Create dataset settings from environment variables
    pub fn from_env() -> Self {
        Self {
            path: env::var(ENV_DATASET)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATASET)),
            level_column: env::var(ENV_LEVEL_COLUMN)
                .unwrap_or_else(|_| DEFAULT_LEVEL_COLUMN.to_string()),
        }
    }

    /// Create dataset settings with defaults
    pub fn defaults() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATASET),
            level_column: DEFAULT_LEVEL_COLUMN.to_string(),
        }
    }
}

impl EvalSettings {
    /// Create evaluation settings from environment variables
    pub fn from_env() -> Self {
        Self {
            max_attempts: env::var(ENV_MAX_ATTEMPTS)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_ATTEMPTS)
                .max(1),
        }
    }

    /// Create evaluation settings with defaults
    pub fn defaults() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::defaults();
        assert_eq!(config.simulator.root, PathBuf::from(DEFAULT_SIM_ROOT));
        assert_eq!(config.simulator.map_name, DEFAULT_MAP_NAME);
        assert_eq!(config.dataset.level_column, DEFAULT_LEVEL_COLUMN);
        assert_eq!(config.eval.max_attempts, 1);
    }

    #[test]
    fn test_map_path_joins_dir_and_name() {
        let sim = SimulatorSettings::defaults();
        assert_eq!(
            sim.map_path(),
            PathBuf::from(DEFAULT_MAP_DIR).join(DEFAULT_MAP_NAME)
        );
    }
}
