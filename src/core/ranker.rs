use rayon::prelude::*;

use crate::core::{catalog::Catalog, path::order_by_progression, scoring::calculate_match_score};
use crate::error::EngineError;
use crate::models::{
    CategorizedRecommendations, Category, CourseItem, Level, MatchResult, RankingSettings,
    Recommendation, ScoringWeights, TraitProfile, UserPreferences,
};

/// Priority bonus for items the profile recommends by name
const RECOMMENDED_BONUS: i64 = 50;
/// Priority bonus for entry-level items
const ENTRY_LEVEL_BONUS: i64 = 20;
/// Priority bonus for items under the accessible price
const ACCESSIBLE_PRICE_BONUS: i64 = 10;

/// Ranking orchestrator
///
/// # Pipeline Stages
/// 1. Score every catalog item
/// 2. Drop items at or below the minimum score
/// 3. Compute the priority tiebreaker and category
/// 4. Sort by score, then priority, keeping catalog order for full ties
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
    settings: RankingSettings,
}

impl Recommender {
    pub fn new(weights: ScoringWeights, settings: RankingSettings) -> Self {
        Self { weights, settings }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScoringWeights::default(), RankingSettings::default())
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn settings(&self) -> &RankingSettings {
        &self.settings
    }

    /// Score a single course
    pub fn match_item(
        &self,
        item: &CourseItem,
        profile: &TraitProfile,
        preferences: Option<&UserPreferences>,
    ) -> Result<MatchResult, EngineError> {
        if let Some(prefs) = preferences {
            prefs.ensure_well_formed()?;
        }
        Ok(calculate_match_score(item, profile, preferences, &self.weights))
    }

    /// Top `limit` recommendations, best first
    pub fn recommend<C: Catalog + ?Sized>(
        &self,
        profile: &TraitProfile,
        preferences: Option<&UserPreferences>,
        catalog: &C,
        limit: usize,
    ) -> Result<Vec<Recommendation>, EngineError> {
        if limit == 0 {
            return Err(EngineError::InvalidInput("limit must be positive".to_string()));
        }

        let mut ranked = self.rank_all(profile, preferences, catalog)?;
        ranked.truncate(limit);
        Ok(ranked)
    }

    /// Every recommendation above the minimum score, grouped by category
    pub fn recommend_by_category<C: Catalog + ?Sized>(
        &self,
        profile: &TraitProfile,
        preferences: Option<&UserPreferences>,
        catalog: &C,
    ) -> Result<CategorizedRecommendations, EngineError> {
        let mut grouped = CategorizedRecommendations::default();
        for rec in self.rank_all(profile, preferences, catalog)? {
            match rec.category {
                Category::Primary => grouped.primary.push(rec),
                Category::Secondary => grouped.secondary.push(rec),
                Category::Explore => grouped.explore.push(rec),
            }
        }
        Ok(grouped)
    }

    /// Recommendations reordered beginner -> intermediate -> advanced
    pub fn build_learning_path<C: Catalog + ?Sized>(
        &self,
        profile: &TraitProfile,
        preferences: Option<&UserPreferences>,
        catalog: &C,
    ) -> Result<Vec<Recommendation>, EngineError> {
        let candidates = self.recommend(
            profile,
            preferences,
            catalog,
            self.settings.path_candidate_limit.max(1),
        )?;
        Ok(order_by_progression(candidates, self.settings.path_length))
    }

    /// Score, filter and sort the whole catalog
    pub fn rank_all<C: Catalog + ?Sized>(
        &self,
        profile: &TraitProfile,
        preferences: Option<&UserPreferences>,
        catalog: &C,
    ) -> Result<Vec<Recommendation>, EngineError> {
        if let Some(prefs) = preferences {
            prefs.ensure_well_formed()?;
        }

        let items = catalog.list_all();
        let score = |item: &CourseItem| calculate_match_score(item, profile, preferences, &self.weights);

        // indexed parallel collect keeps catalog order
        let matches: Vec<MatchResult> = if items.len() >= self.settings.parallel_threshold {
            items.par_iter().map(score).collect()
        } else {
            items.iter().map(score).collect()
        };

        let mut ranked: Vec<Recommendation> = items
            .iter()
            .zip(matches)
            .filter(|(_, m)| m.score > self.settings.min_score)
            .map(|(item, m)| {
                let priority = calculate_priority(item, &m, profile, &self.settings);
                Recommendation {
                    item: item.clone(),
                    category: Category::from_score(m.score),
                    match_result: m,
                    priority,
                }
            })
            .collect();

        // scores sit on a fixed grid, so exact-arithmetic ties reach the
        // priority key; sort_by is stable, so full ties keep catalog order
        ranked.sort_by(|a, b| {
            b.match_result
                .score
                .total_cmp(&a.match_result.score)
                .then_with(|| b.priority.cmp(&a.priority))
        });

        tracing::debug!(
            "Ranked {} of {} catalog items for {} profile",
            ranked.len(),
            items.len(),
            profile.path
        );

        Ok(ranked)
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Priority = round(score * 100) plus bonuses; only breaks score ties
pub fn calculate_priority(
    item: &CourseItem,
    result: &MatchResult,
    profile: &TraitProfile,
    settings: &RankingSettings,
) -> i64 {
    let mut priority = (result.score * 100.0).round() as i64;

    if profile.recommended_item_ids.iter().any(|id| *id == item.id) {
        priority += RECOMMENDED_BONUS;
    }
    if item.level == Level::Beginner {
        priority += ENTRY_LEVEL_BONUS;
    }
    if item.price < settings.accessible_price {
        priority += ACCESSIBLE_PRICE_BONUS;
    }

    priority
}
