//! GameWeek Scoring Engine
//!
//! Deterministic fantasy scoring for one GameWeek: rolling-form quality (PGS
//! and category), fatigue decay and recovery, per-player points under
//! position weights, and team totals with one exclusive composition bonus plus
//! a separately stacking booster.
//!
//! Every pass is pure and synchronous. Re-running it on the same roster,
//! statistics and player state yields the same result.

pub mod calculator;
pub mod config;
pub mod engine;
pub mod error;
pub mod fatigue;
pub mod leaderboard;
pub mod logging;
pub mod models;
pub mod quality;
pub mod roster;
pub mod scoring_table;
pub mod team;



pub use calculator::{PointsCalculator, ScoredPoints, ScoringInput};
pub use config::{
    CaptaincyConfig, FatigueConfig, LoggingConfig, RosterRules, ScoringConfig, TeamBonusConfig,
};
pub use engine::GameWeekEngine;
pub use error::{Result, RosterError, ScoringError};
pub use fatigue::FatigueModel;
pub use leaderboard::{rank_rosters, rank_scores, LeaderboardEntry};
pub use models::*;
pub use quality::{calculate_pgs, categorize, compute_player_quality};
pub use roster::{Booster, BoosterKind, BoosterState, Roster, RosterPhase, Substitution};
pub use scoring_table::{PositionWeights, ScoringTable, Statistic};
pub use team::{StarterProfile, TeamAggregator, TeamBonus, TeamScore};

/// Re-export the player pool types the engine reads
pub use player_registry::{Category, Player, PlayerId, PlayerRegistry, Position};

/// Current version of the scoring engine
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
