use crate::config::CaptaincyConfig;
use crate::models::{GameWeekStatsRecord, ScoreBreakdown};
use crate::scoring_table::{ScoringTable, Statistic};
use player_registry::Position;
use tracing::trace;

pub const MINUTES_THRESHOLD: u32 = 60;

pub const LABEL_MINUTES: &str = "Minutes > 60";
pub const LABEL_CLEAN_SHEET: &str = "Clean Sheet";
pub const LABEL_RATING_BONUS: &str = "Rating Bonus";
pub const LABEL_FATIGUE_EFFECT: &str = "Fatigue Effect";
pub const LABEL_CAPTAIN_BONUS: &str = "Captain Bonus";
pub const LABEL_DOUBLE_IMPACT: &str = "Double Impact";

/// Everything the scorer needs about one starter
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub stats: &'a GameWeekStatsRecord,
    pub position: Position,
    pub fatigue: f64,
    pub is_captain: bool,
    /// Only honoured for the captain
    pub double_impact: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPoints {
    pub points: f64,
    pub breakdown: ScoreBreakdown,
}

/// Points calculator for a single player's GameWeek
#[derive(Debug, Clone)]
pub struct PointsCalculator {
    table: ScoringTable,
    captaincy: CaptaincyConfig,
}

impl PointsCalculator {
    /// Create a calculator over a scoring table
    pub fn new(table: ScoringTable, captaincy: CaptaincyConfig) -> Self {
        Self { table, captaincy }
    }

    /// Scoring table in use
    pub fn table(&self) -> &ScoringTable {
        &self.table
    }

    /// Compute a player's points.
    ///
    /// Order matters: minutes, clean sheet and event points accumulate first,
    /// then the rating, fatigue, captain and Double Impact multipliers are
    /// layered on, each recorded as the delta it adds.
    pub fn score(&self, input: ScoringInput<'_>) -> ScoredPoints {
        let weights = self.table.weights(input.position);
        let stats = input.stats;
        let mut breakdown = ScoreBreakdown::new();
        let mut points = 0.0;

        let full_match = stats.minutes_played > MINUTES_THRESHOLD;
        if full_match {
            points += weights.minutes;
            breakdown.record(LABEL_MINUTES, weights.minutes);
        }

        if stats.clean_sheet && full_match {
            points += weights.clean_sheet;
            breakdown.record(LABEL_CLEAN_SHEET, weights.clean_sheet);
        }

        for statistic in Statistic::ALL {
            let value = stats.value(statistic);
            if value == 0 {
                continue;
            }
            let contribution = weights.weight(statistic) * f64::from(value);
            if breakdown.record(statistic.label(), contribution) {
                points += contribution;
            }
        }

        points = apply_scaling(&mut breakdown, points, weights.rating_multiplier, LABEL_RATING_BONUS);
        points = apply_scaling(&mut breakdown, points, input.fatigue, LABEL_FATIGUE_EFFECT);

        if input.is_captain {
            let captain = self.captaincy.captain_multiplier;
            points = apply_scaling(&mut breakdown, points, captain, LABEL_CAPTAIN_BONUS);

            if input.double_impact {
                let residual = self.captaincy.double_impact_multiplier / captain;
                points = apply_scaling(&mut breakdown, points, residual, LABEL_DOUBLE_IMPACT);
            }
        }

        trace!("{:?} scored {:.3} over {} terms", input.position, points, breakdown.len());

        ScoredPoints { points, breakdown }
    }
}

impl Default for PointsCalculator {
    fn default() -> Self {
        Self::new(ScoringTable::standard(), CaptaincyConfig::default())
    }
}

/// Scale `points` by `multiplier`, recording the delta under `label`
fn apply_scaling(breakdown: &mut ScoreBreakdown, points: f64, multiplier: f64, label: &str) -> f64 {
    let delta = points * (multiplier - 1.0);
    breakdown.record(label, delta);
    points + delta
}
