//! League leaderboard over one GameWeek's scored rosters

use crate::engine::GameWeekEngine;
use crate::error::Result;
use crate::models::{GameWeekScore, RosterId, StatsByPlayer};
use crate::roster::Roster;
use chrono::NaiveDate;
use player_registry::PlayerRegistry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Competition rank: equal totals share a rank, the next rank skips
    pub rank: usize,
    pub roster_id: RosterId,
    pub total_points: f64,
    pub bonus_label: Option<String>,
}

/// Order scores by total (descending, ties by roster id) and assign 1, 2, 2, 4 ranks
pub fn rank_scores(scores: &[GameWeekScore]) -> Vec<LeaderboardEntry> {
    let mut ordered: Vec<&GameWeekScore> = scores.iter().collect();
    ordered.sort_by(|a, b| {
        b.team
            .total_points
            .total_cmp(&a.team.total_points)
            .then(a.roster_id.cmp(&b.roster_id))
    });

    let mut entries = Vec::with_capacity(ordered.len());
    let mut previous: Option<f64> = None;
    let mut rank = 0;
    for (index, score) in ordered.into_iter().enumerate() {
        if previous != Some(score.team.total_points) {
            rank = index + 1;
            previous = Some(score.team.total_points);
        }
        entries.push(LeaderboardEntry {
            rank,
            roster_id: score.roster_id,
            total_points: score.team.total_points,
            bonus_label: score.team.bonus_label.clone(),
        });
    }
    entries
}

/// Score every roster and rank them. Any rejected roster fails the whole call.
pub fn rank_rosters(
    engine: &GameWeekEngine,
    rosters: &[Roster],
    stats: &StatsByPlayer,
    registry: &PlayerRegistry,
    evaluation_date: NaiveDate,
) -> Result<(Vec<GameWeekScore>, Vec<LeaderboardEntry>)> {
    let scores = rosters
        .iter()
        .map(|roster| engine.score_game_week(roster, stats, registry, evaluation_date))
        .collect::<Result<Vec<_>>>()?;
    let leaderboard = rank_scores(&scores);
    Ok((scores, leaderboard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::TeamScore;
    use std::collections::BTreeMap;

    fn score(roster_id: RosterId, total_points: f64) -> GameWeekScore {
        GameWeekScore {
            roster_id,
            game_week: 1,
            per_player: BTreeMap::new(),
            team: TeamScore {
                raw_total: total_points,
                bonus: None,
                bonus_multiplier: 1.0,
                golden_game: false,
                total_points,
                bonus_label: None,
            },
        }
    }

    #[test]
    fn test_competition_ranking() {
        let scores = vec![score(3, 40.0), score(1, 55.5), score(2, 40.0), score(4, 12.0)];
        let board = rank_scores(&scores);

        let summary: Vec<(usize, RosterId)> = board.iter().map(|e| (e.rank, e.roster_id)).collect();
        assert_eq!(summary, vec![(1, 1), (2, 2), (2, 3), (4, 4)]);
    }

    #[test]
    fn test_empty_league() {
        assert!(rank_scores(&[]).is_empty());
    }
}
