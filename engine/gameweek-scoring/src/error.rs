//! Error types for the GameWeek scoring engine

use player_registry::{PlayerId, PlayerLookupError};
use thiserror::Error;

/// Result type for scoring operations
pub type Result<T> = std::result::Result<T, ScoringError>;

/// Errors that reject a scoring call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Player lookup failed: {0}")]
    Lookup(#[from] PlayerLookupError),

    #[error("No statistics record for starter {player_id}")]
    MissingStats { player_id: PlayerId },

    #[error("No points computed for starter {player_id}")]
    MissingPoints { player_id: PlayerId },

    #[error("Player {player_id} has fatigue {fatigue} above the maximum {max}")]
    FatigueAboveMax { player_id: PlayerId, fatigue: f64, max: f64 },

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Roster and booster rule violations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    #[error("Player {player_id} is both a starter and a substitute")]
    PlayerInBothLists { player_id: PlayerId },

    #[error("Player {player_id} appears more than once in the lineup")]
    DuplicatePlayer { player_id: PlayerId },

    #[error("Captain {captain} is not a starter")]
    CaptainNotStarter { captain: PlayerId },

    #[error("Too many starters: {count} (max {max})")]
    TooManyStarters { count: usize, max: usize },

    #[error("Too many substitutes: {count} (max {max})")]
    TooManySubstitutes { count: usize, max: usize },

    #[error("Recovery Boost selected without a target player")]
    RecoveryBoostUnbound,

    #[error("Recovery Boost target {target} is not in the roster")]
    RecoveryTargetNotInRoster { target: PlayerId },

    #[error("Recovery Boost target {target} is not a starter")]
    RecoveryTargetNotStarter { target: PlayerId },

    #[error("Booster selection is locked for this GameWeek")]
    BoosterLocked,

    #[error("Roster is locked for this GameWeek")]
    RosterLocked,

    #[error("Substitutions are only made once the GameWeek has started")]
    SubstitutionNotAllowed,

    #[error("The GameWeek substitution has already been used")]
    SubstitutionAlreadyUsed,

    #[error("Player {player_id} is not a starter")]
    NotAStarter { player_id: PlayerId },

    #[error("Player {player_id} is not on the bench")]
    SubstituteNotOnBench { player_id: PlayerId },

    #[error("Starter {player_id} played {minutes} minutes and cannot be replaced")]
    StarterPlayed { player_id: PlayerId, minutes: u32 },
}
