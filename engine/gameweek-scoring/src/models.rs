use crate::scoring_table::Statistic;
use crate::team::TeamScore;
use player_registry::{Category, PlayerId};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

pub type RosterId = u64;

/// One GameWeek's statistics, keyed by player
pub type StatsByPlayer = HashMap<PlayerId, GameWeekStatsRecord>;

/// Rolling 10-game performance summary, produced by the stats ingestion job
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingStatsSummary {
    /// Aggregate match rating over the window
    pub rating: f64,
    pub impact: f64,
    pub consistency: f64,
    pub minutes_played: f64,
    /// Minutes the player could have played over the window
    pub total_possible_minutes: f64,
}

/// Output of the quality refresh run before each GameWeek
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerQuality {
    pub pgs: f64,
    pub playtime_ratio: f64,
    pub category: Category,
}

/// Raw statistics for one player in one GameWeek
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameWeekStatsRecord {
    pub minutes_played: u32,
    pub clean_sheet: bool,
    /// Match rating; carried for display, not part of the points loop
    pub rating: f64,
    pub goals: u32,
    pub assists: u32,
    pub shots_on_target: u32,
    pub saves: u32,
    pub penalties_scored: u32,
    pub penalties_missed: u32,
    pub penalties_saved: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub goals_conceded: u32,
    pub interceptions: u32,
    pub tackles: u32,
    pub duels_won: u32,
    pub duels_lost: u32,
    pub dribbles_succeeded: u32,
    pub fouls_committed: u32,
    pub fouls_suffered: u32,
}

impl GameWeekStatsRecord {
    /// Count recorded for a discrete statistic
    pub fn value(&self, statistic: Statistic) -> u32 {
        match statistic {
            Statistic::Goals => self.goals,
            Statistic::Assists => self.assists,
            Statistic::ShotsOnTarget => self.shots_on_target,
            Statistic::Saves => self.saves,
            Statistic::PenaltiesScored => self.penalties_scored,
            Statistic::PenaltiesMissed => self.penalties_missed,
            Statistic::PenaltiesSaved => self.penalties_saved,
            Statistic::YellowCards => self.yellow_cards,
            Statistic::RedCards => self.red_cards,
            Statistic::GoalsConceded => self.goals_conceded,
            Statistic::Interceptions => self.interceptions,
            Statistic::Tackles => self.tackles,
            Statistic::DuelsWon => self.duels_won,
            Statistic::DuelsLost => self.duels_lost,
            Statistic::DribblesSucceeded => self.dribbles_succeeded,
            Statistic::FoulsCommitted => self.fouls_committed,
            Statistic::FoulsSuffered => self.fouls_suffered,
        }
    }

    /// Any minutes on the pitch
    pub fn played(&self) -> bool {
        self.minutes_played > 0
    }
}

/// A labeled contribution to a player's points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub points: f64,
}

/// Ordered audit trail of how a player's points were accumulated.
///
/// Entries keep computation order; zero contributions are never recorded.
/// On the wire it is a JSON object whose keys follow that same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBreakdown {
    entries: Vec<BreakdownEntry>,
}

impl ScoreBreakdown {
    /// Create an empty breakdown
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a contribution; returns whether it was recorded
    pub fn record(&mut self, label: impl Into<String>, points: f64) -> bool {
        if points == 0.0 {
            return false;
        }
        self.entries.push(BreakdownEntry { label: label.into(), points });
        true
    }

    /// Contribution recorded under `label`, if any
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.label == label).map(|e| e.points)
    }

    /// Labels in computation order
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    /// Entries in computation order
    pub fn iter(&self) -> impl Iterator<Item = &BreakdownEntry> {
        self.entries.iter()
    }

    /// Sum of all contributions
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.points).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ScoreBreakdown {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.label, &entry.points)?;
        }
        map.end()
    }
}

struct BreakdownVisitor;

impl<'de> Visitor<'de> for BreakdownVisitor {
    type Value = ScoreBreakdown;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of breakdown label to points")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut breakdown = ScoreBreakdown::new();
        while let Some((label, points)) = access.next_entry::<String, f64>()? {
            breakdown.record(label, points);
        }
        Ok(breakdown)
    }
}

// Document order is kept; a BTreeMap would re-sort the labels
impl<'de> Deserialize<'de> for ScoreBreakdown {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(BreakdownVisitor)
    }
}

/// Where a player sat in the roster for this pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineupRole {
    Starter,
    Substitute,
}

/// Per-player result of a scoring pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player_id: PlayerId,
    pub role: LineupRole,
    pub points: f64,
    pub breakdown: ScoreBreakdown,
    /// Fatigue fed into the scorer (after any Recovery Boost override)
    pub fatigue_before: f64,
    /// Fatigue to persist once the GameWeek is final
    pub fatigue_after: f64,
}

/// Result of one roster's scoring pass. Always re-derivable from its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameWeekScore {
    pub roster_id: RosterId,
    pub game_week: u32,
    pub per_player: BTreeMap<PlayerId, PlayerScore>,
    pub team: TeamScore,
}

impl GameWeekScore {
    /// Fatigue values the host should persist, one per rostered player
    pub fn fatigue_updates(&self) -> Vec<(PlayerId, f64)> {
        self.per_player.values().map(|p| (p.player_id, p.fatigue_after)).collect()
    }

    /// Score for one rostered player
    pub fn player(&self, player_id: PlayerId) -> Option<&PlayerScore> {
        self.per_player.get(&player_id)
    }

    /// Team total after bonuses
    pub fn total_points(&self) -> f64 {
        self.team.total_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_skips_zero_and_keeps_order() {
        let mut breakdown = ScoreBreakdown::new();
        assert!(breakdown.record("Minutes > 60", 1.0));
        assert!(!breakdown.record("Goals", 0.0));
        assert!(breakdown.record("Clean Sheet", 4.0));
        assert!(breakdown.record("Yellow Cards", -1.0));

        assert_eq!(breakdown.labels(), vec!["Minutes > 60", "Clean Sheet", "Yellow Cards"]);
        assert_eq!(breakdown.get("Goals"), None);
        assert_eq!(breakdown.total(), 4.0);
    }

    #[test]
    fn test_breakdown_serializes_as_ordered_object() {
        let mut breakdown = ScoreBreakdown::new();
        breakdown.record("Minutes > 60", 1.0);
        breakdown.record("Clean Sheet", 4.0);
        breakdown.record("Rating Bonus", 1.5);

        let json = serde_json::to_string(&breakdown).unwrap();
        assert_eq!(json, r#"{"Minutes > 60":1.0,"Clean Sheet":4.0,"Rating Bonus":1.5}"#);
    }

    #[test]
    fn test_breakdown_deserialize_keeps_document_order() {
        let breakdown: ScoreBreakdown =
            serde_json::from_str(r#"{"Rating Bonus": 1.5, "Clean Sheet": 4, "Goals": 0}"#).unwrap();

        assert_eq!(breakdown.labels(), vec!["Rating Bonus", "Clean Sheet"]);
        assert_eq!(breakdown.get("Clean Sheet"), Some(4.0));
        assert!(serde_json::from_str::<ScoreBreakdown>(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn test_stats_record_defaults() {
        let record: GameWeekStatsRecord =
            serde_json::from_str(r#"{"minutes_played": 90, "goals": 2}"#).unwrap();
        assert!(record.played());
        assert!(!record.clean_sheet);
        assert_eq!(record.value(Statistic::Goals), 2);
        assert_eq!(record.value(Statistic::Assists), 0);

        assert!(!GameWeekStatsRecord::default().played());
    }
}
