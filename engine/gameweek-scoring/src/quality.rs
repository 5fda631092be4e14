//! Player Game Score (PGS) and category assignment

use crate::models::{PlayerQuality, RollingStatsSummary};
use player_registry::Category;

pub const RATING_WEIGHT: f64 = 0.5;
pub const IMPACT_WEIGHT: f64 = 0.3;
pub const CONSISTENCY_WEIGHT: f64 = 0.2;

/// Playtime bands: (minimum ratio, PGS adjustment), highest band first
pub const PLAYTIME_BANDS: [(f64, f64); 2] = [(0.9, 0.30), (0.5, 0.15)];
pub const PLAYTIME_FLOOR_ADJUSTMENT: f64 = 0.05;

pub const STAR_THRESHOLD: f64 = 7.5;
pub const KEY_THRESHOLD: f64 = 6.0;

/// Share of the window's minutes the player was on the pitch; 0 for an empty window
pub fn playtime_ratio(summary: &RollingStatsSummary) -> f64 {
    if summary.total_possible_minutes == 0.0 {
        return 0.0;
    }
    summary.minutes_played / summary.total_possible_minutes
}

/// PGS bonus for the playtime band `ratio` falls in
pub fn playtime_adjustment(ratio: f64) -> f64 {
    PLAYTIME_BANDS
        .iter()
        .find(|(min_ratio, _)| ratio >= *min_ratio)
        .map(|(_, adjustment)| *adjustment)
        .unwrap_or(PLAYTIME_FLOOR_ADJUSTMENT)
}

/// Returns `(pgs, playtime_ratio)`
pub fn calculate_pgs(summary: &RollingStatsSummary) -> (f64, f64) {
    let base = summary.rating * RATING_WEIGHT
        + summary.impact * IMPACT_WEIGHT
        + summary.consistency * CONSISTENCY_WEIGHT;
    let ratio = playtime_ratio(summary);
    (base + playtime_adjustment(ratio), ratio)
}

/// Star at 7.5 and above, Key at 6.0 and above, otherwise Wild
pub fn categorize(pgs: f64) -> Category {
    if pgs >= STAR_THRESHOLD {
        Category::Star
    } else if pgs >= KEY_THRESHOLD {
        Category::Key
    } else {
        Category::Wild
    }
}

/// PGS plus the category it lands in
pub fn compute_player_quality(summary: &RollingStatsSummary) -> PlayerQuality {
    let (pgs, playtime_ratio) = calculate_pgs(summary);
    PlayerQuality { pgs, playtime_ratio, category: categorize(pgs) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(rating: f64, minutes: f64, possible: f64) -> RollingStatsSummary {
        RollingStatsSummary {
            rating,
            impact: rating,
            consistency: rating,
            minutes_played: minutes,
            total_possible_minutes: possible,
        }
    }

    #[test]
    fn test_zero_possible_minutes() {
        let s = summary(7.0, 0.0, 0.0);
        assert_eq!(playtime_ratio(&s), 0.0);

        let (pgs, ratio) = calculate_pgs(&s);
        assert_eq!(ratio, 0.0);
        assert!((pgs - 7.05).abs() < 1e-9);
    }

    #[test]
    fn test_playtime_bands() {
        assert_eq!(playtime_adjustment(1.0), 0.30);
        assert_eq!(playtime_adjustment(0.9), 0.30);
        assert_eq!(playtime_adjustment(0.89), 0.15);
        assert_eq!(playtime_adjustment(0.5), 0.15);
        assert_eq!(playtime_adjustment(0.49), 0.05);
        assert_eq!(playtime_adjustment(0.0), 0.05);
    }

    #[test]
    fn test_weighted_base() {
        let s = RollingStatsSummary {
            rating: 8.0,
            impact: 6.0,
            consistency: 5.0,
            minutes_played: 900.0,
            total_possible_minutes: 900.0,
        };
        // 4.0 + 1.8 + 1.0 + 0.30
        let quality = compute_player_quality(&s);
        assert!((quality.pgs - 7.1).abs() < 1e-9);
        assert_eq!(quality.playtime_ratio, 1.0);
        assert_eq!(quality.category, Category::Key);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(categorize(7.5), Category::Star);
        assert_eq!(categorize(7.499999), Category::Key);
        assert_eq!(categorize(6.0), Category::Key);
        assert_eq!(categorize(5.999999), Category::Wild);
        assert_eq!(categorize(-1.0), Category::Wild);
    }

    #[test]
    fn test_star_from_full_playtime() {
        let quality = compute_player_quality(&summary(7.3, 850.0, 900.0));
        assert_eq!(quality.category, Category::Star);
    }
}
