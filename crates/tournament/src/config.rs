//! Tournament configuration, loaded from TOML.
//!
//! ```toml
//! team_count = 16
//! players_per_team = 10
//! seed = 42
//!
//! [tie_policy]
//! kind = "replay"
//! max_replays = 16
//! ```
//!
//! Every field is optional and falls back to its default.

use league_core::RosterConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::audit::AuditLimits;
use crate::resolver::TiePolicy;
use crate::simulator::SimulationConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything needed to set up and play one bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub team_count: usize,
    pub players_per_team: usize,
    /// Player height bounds in centimetres, inclusive
    pub height_min: u32,
    pub height_max: u32,
    pub min_lineup: usize,
    pub max_lineup: usize,
    /// Per-player score bounds for one game, inclusive
    pub score_min: u32,
    pub score_max: u32,
    /// RNG seed; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Shuffle the first round's matchups instead of pairing in creation order
    pub shuffle_seeds: bool,
    pub tie_policy: TiePolicy,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            team_count: 16,
            players_per_team: 10,
            height_min: 175,
            height_max: 225,
            min_lineup: 5,
            max_lineup: 10,
            score_min: 2,
            score_max: 20,
            seed: None,
            shuffle_seeds: false,
            tie_policy: TiePolicy::default(),
        }
    }
}

impl TournamentConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_roster_config()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.to_simulation_config()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.players_per_team < self.min_lineup {
            return Err(ConfigError::Invalid(format!(
                "players_per_team {} is below min_lineup {}",
                self.players_per_team, self.min_lineup
            )));
        }
        Ok(())
    }

    pub fn to_roster_config(&self) -> RosterConfig {
        RosterConfig {
            team_count: self.team_count,
            players_per_team: self.players_per_team,
            height_range: self.height_min..=self.height_max,
        }
    }

    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            min_lineup: self.min_lineup,
            max_lineup: self.max_lineup,
            score_range: self.score_min..=self.score_max,
        }
    }

    pub fn audit_limits(&self) -> AuditLimits {
        AuditLimits {
            min_lineup: self.min_lineup,
            max_lineup: self.max_lineup,
            score_range: self.score_min..=self.score_max,
            height_range: self.height_min..=self.height_max,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
