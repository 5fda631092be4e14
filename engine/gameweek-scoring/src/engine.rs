use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

use crate::{
    calculator::{PointsCalculator, ScoringInput},
    config::ScoringConfig,
    error::{Result, ScoringError},
    fatigue::FatigueModel,
    models::{
        GameWeekScore, LineupRole, PlayerQuality, PlayerScore, RollingStatsSummary,
        ScoreBreakdown, StatsByPlayer,
    },
    quality,
    roster::{Booster, Roster},
    scoring_table::ScoringTable,
    team::{StarterProfile, TeamAggregator},
};
use player_registry::{Category, Player, PlayerId, PlayerRegistry};

/// GameWeek Orchestrator: one pure, synchronous scoring pass per roster.
///
/// The engine holds only configuration. It never writes player state; callers
/// persist `GameWeekScore::fatigue_updates` once the GameWeek is final.
#[derive(Debug, Clone)]
pub struct GameWeekEngine {
    config: ScoringConfig,
    fatigue: FatigueModel,
    calculator: PointsCalculator,
    aggregator: TeamAggregator,
}

impl GameWeekEngine {
    /// Create an engine with the standard scoring table
    pub fn new(config: ScoringConfig) -> Result<Self> {
        Self::with_table(config, ScoringTable::standard())
    }

    /// Create an engine with a custom scoring table; the config is validated first
    pub fn with_table(config: ScoringConfig, table: ScoringTable) -> Result<Self> {
        config.validate()?;

        let fatigue = FatigueModel::new(config.fatigue.clone());
        let calculator = PointsCalculator::new(table, config.captaincy.clone());
        let aggregator = TeamAggregator::new(config.team_bonuses.clone());

        Ok(Self { config, fatigue, calculator, aggregator })
    }

    /// Get configuration
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// PGS and category for one rolling summary
    pub fn compute_player_quality(&self, summary: &RollingStatsSummary) -> PlayerQuality {
        quality::compute_player_quality(summary)
    }

    /// Exposed so hosts can rest substitutes without a full pass
    pub fn update_fatigue(&self, current: f64, category: Category, played: bool) -> f64 {
        self.fatigue.update(current, category, played)
    }

    /// Recompute PGS and category for every player with a summary.
    ///
    /// Returns the refreshed ids in ascending order. An unknown id rejects
    /// the call before any player is touched.
    pub fn refresh_quality(
        &self,
        registry: &mut PlayerRegistry,
        summaries: &HashMap<PlayerId, RollingStatsSummary>,
    ) -> Result<Vec<PlayerId>> {
        let mut ids: Vec<PlayerId> = summaries.keys().copied().collect();
        ids.sort_unstable();

        for &player_id in &ids {
            registry.get(player_id)?;
        }
        for &player_id in &ids {
            let q = quality::compute_player_quality(&summaries[&player_id]);
            registry.update_quality(player_id, q.pgs, q.category)?;
        }

        info!("Refreshed quality for {} players", ids.len());
        Ok(ids)
    }

    /// Score one roster for one GameWeek.
    ///
    /// Ages for the Vintage bonus are taken at `evaluation_date`.
    pub fn score_game_week(
        &self,
        roster: &Roster,
        stats: &StatsByPlayer,
        registry: &PlayerRegistry,
        evaluation_date: NaiveDate,
    ) -> Result<GameWeekScore> {
        if let Err(e) = roster.validate(registry, &self.config.roster) {
            warn!("Rejected roster {}: {}", roster.roster_id, e);
            return Err(e);
        }

        let booster = roster.active_booster();
        let golden_game = booster == Some(Booster::GoldenGame);
        let double_impact = booster == Some(Booster::DoubleImpact);
        let recovery_target = booster.and_then(|b| b.recovery_target());

        let fatigue_before = |player_id: PlayerId, persisted: f64| {
            if recovery_target == Some(player_id) {
                self.fatigue.max_fatigue()
            } else {
                persisted
            }
        };

        let mut per_player = BTreeMap::new();
        let mut starter_points = BTreeMap::new();
        let mut profiles = Vec::with_capacity(roster.starters().len());

        for &player_id in roster.starters() {
            let player = registry.get(player_id)?;
            self.check_persisted_fatigue(player)?;
            let record = stats.get(&player_id).ok_or(ScoringError::MissingStats { player_id })?;

            let is_captain = roster.captain() == player_id;
            let fatigue_in = fatigue_before(player_id, player.fatigue);
            let scored = self.calculator.score(ScoringInput {
                stats: record,
                position: player.position,
                fatigue: fatigue_in,
                is_captain,
                double_impact: is_captain && double_impact,
            });
            let fatigue_after = self.fatigue.update(player.fatigue, player.category, record.played());

            debug!(
                "Player {} ({}, {}): {:.3} pts, fatigue {:.2} -> {:.2}",
                player_id, player.position, player.category, scored.points, fatigue_in, fatigue_after
            );

            starter_points.insert(player_id, scored.points);
            profiles.push(StarterProfile {
                player_id,
                category: player.category,
                age: player.age_on(evaluation_date),
            });
            per_player.insert(
                player_id,
                PlayerScore {
                    player_id,
                    role: LineupRole::Starter,
                    points: scored.points,
                    breakdown: scored.breakdown,
                    fatigue_before: fatigue_in,
                    fatigue_after,
                },
            );
        }

        for &player_id in roster.substitutes() {
            let player = registry.get(player_id)?;
            self.check_persisted_fatigue(player)?;
            per_player.insert(
                player_id,
                PlayerScore {
                    player_id,
                    role: LineupRole::Substitute,
                    points: 0.0,
                    breakdown: ScoreBreakdown::new(),
                    fatigue_before: fatigue_before(player_id, player.fatigue),
                    fatigue_after: self.fatigue.rest(player.fatigue),
                },
            );
        }

        let team = self.aggregator.aggregate(&profiles, &starter_points, golden_game)?;

        info!(
            "Scored roster {} for GameWeek {}: {:.2} pts (raw {:.2}, bonus {})",
            roster.roster_id,
            roster.game_week,
            team.total_points,
            team.raw_total,
            team.bonus_label.as_deref().unwrap_or("none")
        );

        Ok(GameWeekScore { roster_id: roster.roster_id, game_week: roster.game_week, per_player, team })
    }
}

impl GameWeekEngine {
    /// Stored fatigue must respect the bound; only rest would pull it back down
    fn check_persisted_fatigue(&self, player: &Player) -> Result<()> {
        let max = self.fatigue.max_fatigue();
        if player.fatigue.is_nan() || player.fatigue > max {
            warn!("Player {} has fatigue {} above {}", player.player_id, player.fatigue, max);
            return Err(ScoringError::FatigueAboveMax {
                player_id: player.player_id,
                fatigue: player.fatigue,
                max,
            });
        }
        Ok(())
    }
}

impl Default for GameWeekEngine {
    fn default() -> Self {
        let config = ScoringConfig::default();
        Self {
            fatigue: FatigueModel::new(config.fatigue.clone()),
            calculator: PointsCalculator::new(ScoringTable::standard(), config.captaincy.clone()),
            aggregator: TeamAggregator::new(config.team_bonuses.clone()),
            config,
        }
    }
}
