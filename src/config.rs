//! Turn-resolution configuration.
//!
//! Values can come from JSON or be set one at a time through the protocol's
//! `setoption` command.

use serde::{Deserialize, Serialize};

/// Damage dealt to a player when an enemy unit reaches its scoring row.
pub const DEFAULT_SCORE_DAMAGE: i32 = 3;

/// Upper bound on exchange rounds in a single duel.
pub const DEFAULT_MAX_DUEL_ROUNDS: u32 = 10_000;

/// Errors raised while loading or updating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("option '{name}' needs a value")]
    MissingValue { name: String },

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

/// Parameters that shape one turn of resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnConfig {
    /// Row that scores against the top player.
    pub score_row_top: i32,
    /// Row that scores against the bottom player.
    pub score_row_bottom: i32,
    pub score_damage: i32,
    /// Stop the attack phase at the first dead unit in acting order instead
    /// of skipping it.
    pub halt_attack_on_dead_unit: bool,
    pub max_duel_rounds: u32,
    /// Seed for attack rolls.
    pub seed: u64,
}

impl Default for TurnConfig {
    fn default() -> Self {
        TurnConfig {
            score_row_top: 0,
            score_row_bottom: 7,
            score_damage: DEFAULT_SCORE_DAMAGE,
            halt_attack_on_dead_unit: true,
            max_duel_rounds: DEFAULT_MAX_DUEL_ROUNDS,
            seed: 0,
        }
    }
}

impl TurnConfig {
    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<TurnConfig, ConfigError> {
        let config: TurnConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that resolution cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.score_damage < 0 {
            return Err(ConfigError::InvalidValue {
                name: "score_damage".to_string(),
                value: self.score_damage.to_string(),
            });
        }
        Ok(())
    }

    /// Returns true if `row` is either scoring row.
    pub fn is_score_row(&self, row: i32) -> bool {
        row == self.score_row_top || row == self.score_row_bottom
    }

    /// Applies a single named option.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let value = value.ok_or_else(|| ConfigError::MissingValue {
            name: name.to_string(),
        })?;
        match name {
            "ScoreRowTop" => self.score_row_top = parse_value(name, value)?,
            "ScoreRowBottom" => self.score_row_bottom = parse_value(name, value)?,
            "ScoreDamage" => {
                let damage: i32 = parse_value(name, value)?;
                if damage < 0 {
                    return Err(ConfigError::InvalidValue {
                        name: name.to_string(),
                        value: value.to_string(),
                    });
                }
                self.score_damage = damage;
            }
            "HaltAttackOnDeadUnit" => self.halt_attack_on_dead_unit = parse_value(name, value)?,
            "MaxDuelRounds" => self.max_duel_rounds = parse_value(name, value)?,
            "Seed" => self.seed = parse_value(name, value)?,
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.parse::<T>().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}
