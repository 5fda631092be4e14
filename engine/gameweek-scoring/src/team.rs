//! Team aggregation: raw total, one exclusive composition bonus, then Golden Game.

use crate::config::TeamBonusConfig;
use crate::error::{Result, ScoringError};
use player_registry::{Category, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const GOLDEN_GAME_LABEL: &str = "Golden Game";

/// Roster-composition bonuses. At most one applies per team score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamBonus {
    NoStar,
    Crazy,
    Vintage,
}

impl TeamBonus {
    /// Name shown in the team breakdown
    pub fn label(&self) -> &'static str {
        match self {
            TeamBonus::NoStar => "No Star",
            TeamBonus::Crazy => "Crazy",
            TeamBonus::Vintage => "Vintage",
        }
    }
}

impl fmt::Display for TeamBonus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the aggregator needs to know about a starter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarterProfile {
    pub player_id: PlayerId,
    pub category: Category,
    /// Whole years at the evaluation date
    pub age: u32,
}

#[derive(Debug, Clone, Copy)]
struct BonusCandidate {
    bonus: TeamBonus,
    multiplier: f64,
    satisfied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamScore {
    /// Sum of starters' points before any team multiplier
    pub raw_total: f64,
    pub bonus: Option<TeamBonus>,
    pub bonus_multiplier: f64,
    pub golden_game: bool,
    pub total_points: f64,
    /// e.g. "Crazy & Golden Game"
    pub bonus_label: Option<String>,
}

impl TeamScore {
    fn empty() -> Self {
        Self {
            raw_total: 0.0,
            bonus: None,
            bonus_multiplier: 1.0,
            golden_game: false,
            total_points: 0.0,
            bonus_label: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TeamAggregator {
    config: TeamBonusConfig,
}

impl TeamAggregator {
    /// Create an aggregator with the given bonus multipliers
    pub fn new(config: TeamBonusConfig) -> Self {
        Self { config }
    }

    fn candidates(&self, starters: &[StarterProfile]) -> [BonusCandidate; 3] {
        let no_star = starters.iter().all(|s| s.category != Category::Star);
        let all_wild = starters.iter().all(|s| s.category == Category::Wild);
        let mean_age =
            starters.iter().map(|s| f64::from(s.age)).sum::<f64>() / starters.len() as f64;

        [
            BonusCandidate { bonus: TeamBonus::NoStar, multiplier: self.config.no_star, satisfied: no_star },
            BonusCandidate { bonus: TeamBonus::Crazy, multiplier: self.config.crazy, satisfied: all_wild },
            BonusCandidate {
                bonus: TeamBonus::Vintage,
                multiplier: self.config.vintage,
                satisfied: mean_age >= f64::from(self.config.vintage_min_mean_age),
            },
        ]
    }

    /// Pick the satisfied bonus with the largest multiplier; ties keep the earlier one
    pub fn select_bonus(&self, starters: &[StarterProfile]) -> Option<(TeamBonus, f64)> {
        if starters.is_empty() {
            return None;
        }

        let mut best: Option<BonusCandidate> = None;
        for candidate in self.candidates(starters).into_iter().filter(|c| c.satisfied) {
            match best {
                Some(current) if candidate.multiplier <= current.multiplier => {}
                _ => best = Some(candidate),
            }
        }
        best.map(|c| (c.bonus, c.multiplier))
    }

    /// Aggregate starters' points into the team total
    pub fn aggregate(
        &self,
        starters: &[StarterProfile],
        points: &BTreeMap<PlayerId, f64>,
        golden_game: bool,
    ) -> Result<TeamScore> {
        if starters.is_empty() {
            return Ok(TeamScore::empty());
        }

        let mut raw_total = 0.0;
        for starter in starters {
            raw_total += points
                .get(&starter.player_id)
                .ok_or(ScoringError::MissingPoints { player_id: starter.player_id })?;
        }

        let selected = self.select_bonus(starters);
        let bonus_multiplier = selected.map(|(_, m)| m).unwrap_or(1.0);
        let mut total_points = raw_total * bonus_multiplier;

        let mut labels: Vec<&str> = Vec::with_capacity(2);
        if let Some((bonus, _)) = selected {
            labels.push(bonus.label());
        }
        if golden_game {
            total_points *= self.config.golden_game;
            labels.push(GOLDEN_GAME_LABEL);
        }

        Ok(TeamScore {
            raw_total,
            bonus: selected.map(|(b, _)| b),
            bonus_multiplier,
            golden_game,
            total_points,
            bonus_label: if labels.is_empty() { None } else { Some(labels.join(" & ")) },
        })
    }
}

impl Default for TeamAggregator {
    fn default() -> Self {
        Self::new(TeamBonusConfig::default())
    }
}
