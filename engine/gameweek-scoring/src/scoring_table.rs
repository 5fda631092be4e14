//! Per-statistic, per-position point weights

use player_registry::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Discrete match events that earn or cost points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    Goals,
    Assists,
    ShotsOnTarget,
    Saves,
    PenaltiesScored,
    PenaltiesMissed,
    PenaltiesSaved,
    YellowCards,
    RedCards,
    GoalsConceded,
    Interceptions,
    Tackles,
    DuelsWon,
    DuelsLost,
    DribblesSucceeded,
    FoulsCommitted,
    FoulsSuffered,
}

impl Statistic {
    /// Evaluation order of the points loop
    pub const ALL: [Statistic; 17] = [
        Statistic::Goals,
        Statistic::Assists,
        Statistic::ShotsOnTarget,
        Statistic::Saves,
        Statistic::PenaltiesScored,
        Statistic::PenaltiesMissed,
        Statistic::PenaltiesSaved,
        Statistic::YellowCards,
        Statistic::RedCards,
        Statistic::GoalsConceded,
        Statistic::Interceptions,
        Statistic::Tackles,
        Statistic::DuelsWon,
        Statistic::DuelsLost,
        Statistic::DribblesSucceeded,
        Statistic::FoulsCommitted,
        Statistic::FoulsSuffered,
    ];

    /// Breakdown label
    pub fn label(&self) -> &'static str {
        match self {
            Statistic::Goals => "Goals",
            Statistic::Assists => "Assists",
            Statistic::ShotsOnTarget => "Shots on Target",
            Statistic::Saves => "Saves",
            Statistic::PenaltiesScored => "Penalties Scored",
            Statistic::PenaltiesMissed => "Penalties Missed",
            Statistic::PenaltiesSaved => "Penalties Saved",
            Statistic::YellowCards => "Yellow Cards",
            Statistic::RedCards => "Red Cards",
            Statistic::GoalsConceded => "Goals Conceded",
            Statistic::Interceptions => "Interceptions",
            Statistic::Tackles => "Tackles",
            Statistic::DuelsWon => "Duels Won",
            Statistic::DuelsLost => "Duels Lost",
            Statistic::DribblesSucceeded => "Dribbles Succeeded",
            Statistic::FoulsCommitted => "Fouls Committed",
            Statistic::FoulsSuffered => "Fouls Suffered",
        }
    }
}

/// Weights for one position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionWeights {
    /// Awarded for more than 60 minutes on the pitch
    pub minutes: f64,

    /// Awarded for a clean sheet with more than 60 minutes played
    pub clean_sheet: f64,

    /// Scales the accumulated event points
    pub rating_multiplier: f64,

    /// Points per unit of each statistic; missing entries weigh zero
    #[serde(default)]
    pub stats: BTreeMap<Statistic, f64>,
}

impl PositionWeights {
    /// Points per unit of `statistic`
    pub fn weight(&self, statistic: Statistic) -> f64 {
        self.stats.get(&statistic).copied().unwrap_or(0.0)
    }
}

/// Static lookup of point weights for every position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringTable {
    pub goalkeeper: PositionWeights,
    pub defender: PositionWeights,
    pub midfielder: PositionWeights,
    pub attacker: PositionWeights,
}

fn weights(
    minutes: f64,
    clean_sheet: f64,
    rating_multiplier: f64,
    stats: &[(Statistic, f64)],
) -> PositionWeights {
    PositionWeights {
        minutes,
        clean_sheet,
        rating_multiplier,
        stats: stats.iter().copied().filter(|(_, w)| *w != 0.0).collect(),
    }
}

impl ScoringTable {
    /// The game's standard table
    pub fn standard() -> Self {
        use Statistic::*;

        Self {
            goalkeeper: weights(
                1.0,
                4.0,
                1.2,
                &[
                    (Goals, 6.0),
                    (Assists, 3.0),
                    (ShotsOnTarget, 0.5),
                    (Saves, 0.5),
                    (PenaltiesScored, 5.0),
                    (PenaltiesMissed, -2.0),
                    (PenaltiesSaved, 5.0),
                    (YellowCards, -1.0),
                    (RedCards, -3.0),
                    (GoalsConceded, -1.0),
                    (Interceptions, 0.2),
                    (Tackles, 0.2),
                    (DuelsWon, 0.1),
                    (DuelsLost, -0.1),
                    (DribblesSucceeded, 0.2),
                    (FoulsCommitted, -0.3),
                    (FoulsSuffered, 0.1),
                ],
            ),
            defender: weights(
                1.0,
                4.0,
                1.3,
                &[
                    (Goals, 6.0),
                    (Assists, 3.0),
                    (ShotsOnTarget, 0.5),
                    (PenaltiesScored, 5.0),
                    (PenaltiesMissed, -2.0),
                    (YellowCards, -1.0),
                    (RedCards, -3.0),
                    (GoalsConceded, -0.5),
                    (Interceptions, 0.4),
                    (Tackles, 0.4),
                    (DuelsWon, 0.2),
                    (DuelsLost, -0.2),
                    (DribblesSucceeded, 0.3),
                    (FoulsCommitted, -0.3),
                    (FoulsSuffered, 0.2),
                ],
            ),
            midfielder: weights(
                1.0,
                1.0,
                1.2,
                &[
                    (Goals, 5.0),
                    (Assists, 3.0),
                    (ShotsOnTarget, 0.6),
                    (PenaltiesScored, 4.0),
                    (PenaltiesMissed, -2.0),
                    (YellowCards, -1.0),
                    (RedCards, -3.0),
                    (Interceptions, 0.3),
                    (Tackles, 0.3),
                    (DuelsWon, 0.2),
                    (DuelsLost, -0.2),
                    (DribblesSucceeded, 0.4),
                    (FoulsCommitted, -0.3),
                    (FoulsSuffered, 0.3),
                ],
            ),
            attacker: weights(
                1.0,
                0.0,
                1.1,
                &[
                    (Goals, 4.0),
                    (Assists, 3.0),
                    (ShotsOnTarget, 0.8),
                    (PenaltiesScored, 3.0),
                    (PenaltiesMissed, -2.0),
                    (YellowCards, -1.0),
                    (RedCards, -3.0),
                    (Interceptions, 0.2),
                    (Tackles, 0.2),
                    (DuelsWon, 0.2),
                    (DuelsLost, -0.1),
                    (DribblesSucceeded, 0.5),
                    (FoulsCommitted, -0.3),
                    (FoulsSuffered, 0.3),
                ],
            ),
        }
    }

    /// Weights for a position
    pub fn weights(&self, position: Position) -> &PositionWeights {
        match position {
            Position::Goalkeeper => &self.goalkeeper,
            Position::Defender => &self.defender,
            Position::Midfielder => &self.midfielder,
            Position::Attacker => &self.attacker,
        }
    }

    /// Mutable weights for a position
    pub fn weights_mut(&mut self, position: Position) -> &mut PositionWeights {
        match position {
            Position::Goalkeeper => &mut self.goalkeeper,
            Position::Defender => &mut self.defender,
            Position::Midfielder => &mut self.midfielder,
            Position::Attacker => &mut self.attacker,
        }
    }

    /// Load a table from JSON
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::standard()
    }
}
