//! Fatigue model.
//!
//! Fatigue is a multiplier baseline around 1.0. Resting recovers it up to
//! `max_fatigue`; playing drains it by a category-dependent amount with no
//! floor, so sustained overuse can push it below zero.

use crate::config::FatigueConfig;
use player_registry::Category;

#[derive(Debug, Clone, PartialEq)]
pub struct FatigueModel {
    config: FatigueConfig,
}

impl FatigueModel {
    /// Create a fatigue model
    pub fn new(config: FatigueConfig) -> Self {
        Self { config }
    }

    /// Upper bound of fatigue; also the Recovery Boost value
    pub fn max_fatigue(&self) -> f64 {
        self.config.max_fatigue
    }

    /// Drain applied when a player of this category plays
    pub fn reduction_for(&self, category: Category) -> f64 {
        match category {
            Category::Star => self.config.star_reduction,
            Category::Key => self.config.key_reduction,
            Category::Wild => self.config.wild_reduction,
        }
    }

    /// Recover for a GameWeek without minutes, clamped at the maximum
    pub fn rest(&self, current: f64) -> f64 {
        (current + self.config.rest_recovery).min(self.config.max_fatigue)
    }

    /// Fatigue after one GameWeek
    pub fn update(&self, current: f64, category: Category, played: bool) -> f64 {
        if played {
            current - self.reduction_for(category)
        } else {
            self.rest(current)
        }
    }
}

impl Default for FatigueModel {
    fn default() -> Self {
        Self::new(FatigueConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_clamps_at_max() {
        let model = FatigueModel::default();
        assert!((model.update(0.5, Category::Star, false) - 0.6).abs() < 1e-12);
        assert_eq!(model.update(0.95, Category::Key, false), 1.0);
        assert_eq!(model.update(1.0, Category::Wild, false), 1.0);
        // Values above the bound from stale data are pulled back down by rest.
        assert_eq!(model.update(1.3, Category::Wild, false), 1.0);
    }

    #[test]
    fn test_play_drains_by_category() {
        let model = FatigueModel::default();
        assert!((model.update(1.0, Category::Star, true) - 0.90).abs() < 1e-12);
        assert!((model.update(1.0, Category::Key, true) - 0.95).abs() < 1e-12);
        assert_eq!(model.update(1.0, Category::Wild, true), 1.0);
    }

    #[test]
    fn test_play_has_no_floor() {
        let model = FatigueModel::default();
        let mut fatigue = 1.0;
        for _ in 0..15 {
            fatigue = model.update(fatigue, Category::Star, true);
        }
        assert!(fatigue < 0.0);
        assert!((fatigue - (-0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_many_rests_never_exceed_max() {
        let model = FatigueModel::default();
        let mut fatigue = -2.0;
        for _ in 0..100 {
            fatigue = model.rest(fatigue);
            assert!(fatigue <= model.max_fatigue());
        }
        assert_eq!(fatigue, 1.0);
    }
}
