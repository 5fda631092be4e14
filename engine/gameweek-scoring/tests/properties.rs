use chrono::NaiveDate;
use gameweek_scoring::{
    categorize, Booster, FatigueModel, GameWeekEngine, GameWeekStatsRecord, PointsCalculator,
    Roster, ScoringInput, StatsByPlayer,
};
use player_registry::{Category, Player, PlayerRegistry, Position};
use proptest::prelude::*;

fn category_strategy() -> impl Strategy<Value = Category> {
    prop_oneof![Just(Category::Star), Just(Category::Key), Just(Category::Wild)]
}

fn position_strategy() -> impl Strategy<Value = Position> {
    prop_oneof![
        Just(Position::Goalkeeper),
        Just(Position::Defender),
        Just(Position::Midfielder),
        Just(Position::Attacker),
    ]
}

fn stats_strategy() -> impl Strategy<Value = GameWeekStatsRecord> {
    (
        0u32..=120,
        any::<bool>(),
        (0u32..4, 0u32..4, 0u32..6, 0u32..8, 0u32..2),
        (0u32..3, 0u32..2, 0u32..5, 0u32..8, 0u32..8),
        (0u32..15, 0u32..15, 0u32..6, 0u32..5, 0u32..5),
    )
        .prop_map(|(minutes_played, clean_sheet, a, b, c)| GameWeekStatsRecord {
            minutes_played,
            clean_sheet,
            goals: a.0,
            assists: a.1,
            shots_on_target: a.2,
            saves: a.3,
            penalties_scored: a.4,
            yellow_cards: b.0,
            red_cards: b.1,
            goals_conceded: b.2,
            interceptions: b.3,
            tackles: b.4,
            duels_won: c.0,
            duels_lost: c.1,
            dribbles_succeeded: c.2,
            fouls_committed: c.3,
            fouls_suffered: c.4,
            ..Default::default()
        })
}

proptest! {
    /// Resting never lifts fatigue past the configured maximum
    #[test]
    fn test_rest_never_exceeds_max(start in -2.0f64..1.0, weeks in 1usize..30) {
        let model = FatigueModel::default();
        let mut fatigue = start;
        for _ in 0..weeks {
            fatigue = model.update(fatigue, Category::Star, false);
            prop_assert!(fatigue <= model.max_fatigue());
        }
    }

    /// Playing never increases fatigue
    #[test]
    fn test_playing_never_recovers(start in -2.0f64..1.0, category in category_strategy()) {
        let model = FatigueModel::default();
        prop_assert!(model.update(start, category, true) <= start);
    }

    /// A higher PGS never lands in a lower category
    #[test]
    fn test_categorize_is_monotone(a in 0.0f64..10.0, b in 0.0f64..10.0) {
        let rank = |c: Category| match c {
            Category::Wild => 0,
            Category::Key => 1,
            Category::Star => 2,
        };
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rank(categorize(low)) <= rank(categorize(high)));
    }

    /// Every point a player earns is accounted for in the breakdown
    #[test]
    fn test_breakdown_total_matches_points(
        stats in stats_strategy(),
        position in position_strategy(),
        fatigue in 0.0f64..=1.0,
        is_captain in any::<bool>(),
        double_impact in any::<bool>(),
    ) {
        let calculator = PointsCalculator::default();
        let scored = calculator.score(ScoringInput {
            stats: &stats,
            position,
            fatigue,
            is_captain,
            double_impact: is_captain && double_impact,
        });
        prop_assert!((scored.breakdown.total() - scored.points).abs() < 1e-6);
        prop_assert!(scored.breakdown.iter().all(|entry| entry.points != 0.0));
    }

    /// Two passes over the same inputs agree exactly
    #[test]
    fn test_score_game_week_is_idempotent(
        first in stats_strategy(),
        second in stats_strategy(),
        category in category_strategy(),
        fatigue in 0.0f64..=1.0,
        golden in any::<bool>(),
    ) {
        let birth = NaiveDate::from_ymd_opt(1993, 4, 12).unwrap();
        let registry = PlayerRegistry::from_players(vec![
            Player::new(1, "First", Position::Defender, "Home", birth)
                .with_category(category)
                .with_fatigue(fatigue),
            Player::new(2, "Second", Position::Attacker, "Home", birth),
        ])
        .unwrap();
        let mut roster = Roster::new(1, 1, vec![1, 2], vec![], 2);
        if golden {
            roster.select_booster(Booster::GoldenGame).unwrap();
        }
        let stats: StatsByPlayer = [(1, first), (2, second)].into_iter().collect();
        let date = NaiveDate::from_ymd_opt(2025, 10, 4).unwrap();

        let engine = GameWeekEngine::default();
        let a = engine.score_game_week(&roster, &stats, &registry, date).unwrap();
        let b = engine.score_game_week(&roster, &stats, &registry, date).unwrap();
        prop_assert_eq!(a, b);
    }
}
