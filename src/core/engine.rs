use std::sync::Arc;

use crate::core::{
    catalog::Catalog, ranker::Recommender, similarity, trait_model::TraitModel,
    trait_scorer::TraitScorer,
};
use crate::error::EngineError;
use crate::models::{
    CategorizedRecommendations, CourseItem, MatchResult, QuizAnswer, RankingSettings,
    Recommendation, ScoringWeights, TraitProfile, UserPreferences,
};

/// Entry point tying profile derivation to ranking
///
/// Holds configuration only. The catalog is passed on every call, so one
/// engine can be shared across threads and requests.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    scorer: TraitScorer,
    recommender: Recommender,
}

impl RecommendationEngine {
    /// Build an engine, rejecting an invalid weight table or trait model
    pub fn new(
        model: Arc<TraitModel>,
        weights: ScoringWeights,
        settings: RankingSettings,
    ) -> Result<Self, EngineError> {
        weights.validate()?;
        model.validate()?;
        if settings.default_limit == 0 || settings.path_length == 0 || settings.similar_limit == 0 {
            return Err(EngineError::Configuration(
                "ranking limits must be positive".to_string(),
            ));
        }

        Ok(Self {
            scorer: TraitScorer::new(model),
            recommender: Recommender::new(weights, settings),
        })
    }

    /// Engine over the built-in trait model and default weights
    pub fn with_defaults() -> Result<Self, EngineError> {
        Self::new(
            Arc::new(TraitModel::builtin()?),
            ScoringWeights::default(),
            RankingSettings::default(),
        )
    }

    /// Replace the trait scorer, e.g. one with per-question weights
    pub fn with_trait_scorer(mut self, scorer: TraitScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn trait_model(&self) -> &TraitModel {
        self.scorer.model()
    }

    pub fn settings(&self) -> &RankingSettings {
        self.recommender.settings()
    }

    pub fn score_traits(&self, answers: &[QuizAnswer]) -> Result<TraitProfile, EngineError> {
        self.scorer.score(answers)
    }

    pub fn match_item(
        &self,
        item: &CourseItem,
        profile: &TraitProfile,
        preferences: Option<&UserPreferences>,
    ) -> Result<MatchResult, EngineError> {
        self.recommender.match_item(item, profile, preferences)
    }

    /// Top recommendations; `None` uses the configured default limit
    pub fn recommend<C: Catalog + ?Sized>(
        &self,
        profile: &TraitProfile,
        preferences: Option<&UserPreferences>,
        catalog: &C,
        limit: Option<usize>,
    ) -> Result<Vec<Recommendation>, EngineError> {
        let limit = limit.unwrap_or(self.settings().default_limit);
        self.recommender.recommend(profile, preferences, catalog, limit)
    }

    pub fn recommend_by_category<C: Catalog + ?Sized>(
        &self,
        profile: &TraitProfile,
        preferences: Option<&UserPreferences>,
        catalog: &C,
    ) -> Result<CategorizedRecommendations, EngineError> {
        self.recommender.recommend_by_category(profile, preferences, catalog)
    }

    pub fn build_learning_path<C: Catalog + ?Sized>(
        &self,
        profile: &TraitProfile,
        preferences: Option<&UserPreferences>,
        catalog: &C,
    ) -> Result<Vec<Recommendation>, EngineError> {
        self.recommender.build_learning_path(profile, preferences, catalog)
    }

    /// Courses like `item_id`; `None` uses the configured default limit
    pub fn find_similar<C: Catalog + ?Sized>(
        &self,
        item_id: &str,
        catalog: &C,
        limit: Option<usize>,
    ) -> Result<Vec<CourseItem>, EngineError> {
        let limit = limit.unwrap_or(self.settings().similar_limit);
        similarity::find_similar(item_id, catalog, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TraitAxis;

    #[test]
    fn test_engine_with_defaults() {
        let engine = RecommendationEngine::with_defaults().unwrap();
        let profile = engine
            .score_traits(&[QuizAnswer::new("q1", TraitAxis::C)])
            .unwrap();
        assert_eq!(profile.path, "bhakti");
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let weights = ScoringWeights {
            level: 0.5,
            ..ScoringWeights::default()
        };
        let result = RecommendationEngine::new(
            Arc::new(TraitModel::builtin().unwrap()),
            weights,
            RankingSettings::default(),
        );
        assert!(matches!(result, Err(EngineError::Configuration(_))));
    }

    #[test]
    fn test_default_limits_applied() {
        let engine = RecommendationEngine::with_defaults().unwrap();
        let profile = engine
            .score_traits(&[QuizAnswer::new("q1", TraitAxis::B)])
            .unwrap();

        let catalog: Vec<CourseItem> = (0..10)
            .map(|i| CourseItem {
                id: format!("k{}", i),
                title: "Karma in daily practice".to_string(),
                description: String::new(),
                path: "karma".to_string(),
                level: crate::models::Level::Beginner,
                instructor: "Lee".to_string(),
                price: 25.0,
                tags: vec![],
            })
            .collect();

        assert_eq!(engine.recommend(&profile, None, &catalog, None).unwrap().len(), 6);
        assert_eq!(engine.find_similar("k0", &catalog, None).unwrap().len(), 3);
    }
}
