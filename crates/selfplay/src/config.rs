//! Configuration loading for the selfplay tool.
//!
//! A TOML file may set the search parameters, the base seed and the log
//! level. The path comes from `--config` or the `PLAYOUT_CONFIG` environment
//! variable; without one the built-in defaults are used.

use anyhow::{Context, Result};
use playout_mcts::MctsConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Top-level selfplay configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfplayConfig {
    /// Search parameters (`[mcts]` table).
    pub mcts: MctsConfig,

    /// Base seed; game `i` derives its own seeds from it.
    pub seed: u64,

    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for SelfplayConfig {
    fn default() -> Self {
        Self {
            mcts: MctsConfig::default(),
            seed: 42,
            log_level: "info".to_string(),
        }
    }
}

/// Load the configuration, falling back to defaults when no path is given.
///
/// An explicitly named file that cannot be read or parsed is an error.
pub fn load(path: Option<&Path>) -> Result<SelfplayConfig> {
    match path {
        Some(path) => load_from_path(path),
        None => {
            debug!("No config file given, using built-in defaults");
            Ok(SelfplayConfig::default())
        }
    }
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<SelfplayConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: SelfplayConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}
