//! Configuration for the GameWeek scoring engine

use crate::error::{Result, ScoringError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the scoring engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Fatigue decay and recovery
    pub fatigue: FatigueConfig,

    /// Captain multipliers
    pub captaincy: CaptaincyConfig,

    /// Exclusive team bonuses and the Golden Game booster
    pub team_bonuses: TeamBonusConfig,

    /// Roster shape validation
    pub roster: RosterRules,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FatigueConfig {
    /// Upper bound of the fatigue resource (100%)
    pub max_fatigue: f64,

    /// Fatigue regained by a player who did not play
    pub rest_recovery: f64,

    /// Fatigue lost by a Star who played
    pub star_reduction: f64,

    /// Fatigue lost by a Key player who played
    pub key_reduction: f64,

    /// Fatigue lost by a Wild player who played
    pub wild_reduction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptaincyConfig {
    /// Passive multiplier every captain receives
    pub captain_multiplier: f64,

    /// Total captain multiplier while Double Impact is active
    pub double_impact_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamBonusConfig {
    /// No starter is a Star
    pub no_star: f64,

    /// Every starter is Wild
    pub crazy: f64,

    /// Starters' mean age reaches `vintage_min_mean_age`
    pub vintage: f64,

    pub vintage_min_mean_age: u32,

    /// Team-wide booster, stacks after the exclusive bonus
    pub golden_game: f64,
}

/// Roster shape limits checked before a scoring pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterRules {
    pub max_starters: usize,

    pub max_substitutes: usize,

    /// Restrict Recovery Boost targets to the starting lineup
    pub recovery_target_must_start: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            max_fatigue: 1.0,
            rest_recovery: 0.10,
            star_reduction: 0.10,
            key_reduction: 0.05,
            wild_reduction: 0.0,
        }
    }
}

impl Default for CaptaincyConfig {
    fn default() -> Self {
        Self { captain_multiplier: 1.1, double_impact_multiplier: 2.2 }
    }
}

impl Default for TeamBonusConfig {
    fn default() -> Self {
        Self { no_star: 1.25, crazy: 1.40, vintage: 1.20, vintage_min_mean_age: 30, golden_game: 1.20 }
    }
}

impl Default for RosterRules {
    fn default() -> Self {
        Self { max_starters: 11, max_substitutes: 7, recovery_target_must_start: false }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

fn env_override<T>(name: &str, target: &mut T) -> anyhow::Result<()>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if let Ok(raw) = std::env::var(name) {
        *target = raw.trim().parse().with_context(|| format!("Invalid value for {name}: {raw}"))?;
    }
    Ok(())
}

impl ScoringConfig {
    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        env_override("SCORING_MAX_FATIGUE", &mut config.fatigue.max_fatigue)?;
        env_override("SCORING_REST_RECOVERY", &mut config.fatigue.rest_recovery)?;
        env_override("SCORING_STAR_REDUCTION", &mut config.fatigue.star_reduction)?;
        env_override("SCORING_KEY_REDUCTION", &mut config.fatigue.key_reduction)?;
        env_override("SCORING_WILD_REDUCTION", &mut config.fatigue.wild_reduction)?;
        env_override("SCORING_MAX_STARTERS", &mut config.roster.max_starters)?;
        env_override("SCORING_MAX_SUBSTITUTES", &mut config.roster.max_substitutes)?;
        env_override(
            "SCORING_RECOVERY_TARGET_MUST_START",
            &mut config.roster.recovery_target_must_start,
        )?;
        env_override("SCORING_LOG_LEVEL", &mut config.logging.level)?;
        env_override("SCORING_LOG_FORMAT", &mut config.logging.format)?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config {:?}", path.as_ref()))?;
        let config: ScoringConfig = toml::from_str(&content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Reject multipliers that would make scores meaningless
    pub fn validate(&self) -> Result<()> {
        let multipliers = [
            ("captaincy.captain_multiplier", self.captaincy.captain_multiplier),
            ("captaincy.double_impact_multiplier", self.captaincy.double_impact_multiplier),
            ("team_bonuses.no_star", self.team_bonuses.no_star),
            ("team_bonuses.crazy", self.team_bonuses.crazy),
            ("team_bonuses.vintage", self.team_bonuses.vintage),
            ("team_bonuses.golden_game", self.team_bonuses.golden_game),
        ];
        for (name, value) in multipliers {
            if !(value.is_finite() && value > 0.0) {
                return Err(ScoringError::Config(format!("{name} must be positive, got {value}")));
            }
        }

        if self.captaincy.double_impact_multiplier < self.captaincy.captain_multiplier {
            return Err(ScoringError::Config(format!(
                "double impact multiplier {} is below the captain multiplier {}",
                self.captaincy.double_impact_multiplier, self.captaincy.captain_multiplier
            )));
        }

        let fatigue = &self.fatigue;
        if !fatigue.max_fatigue.is_finite() || fatigue.max_fatigue <= 0.0 {
            return Err(ScoringError::Config("fatigue.max_fatigue must be positive".to_string()));
        }
        for (name, value) in [
            ("fatigue.rest_recovery", fatigue.rest_recovery),
            ("fatigue.star_reduction", fatigue.star_reduction),
            ("fatigue.key_reduction", fatigue.key_reduction),
            ("fatigue.wild_reduction", fatigue.wild_reduction),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ScoringError::Config(format!("{name} must be non-negative")));
            }
        }

        if self.roster.max_starters == 0 {
            return Err(ScoringError::Config("roster.max_starters must be at least 1".to_string()));
        }

        Ok(())
    }
}
