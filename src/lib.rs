//! Matcha - personalized course matching for a quiz-driven learning platform
//!
//! This library turns quiz answers into a trait profile and ranks a course
//! catalog against it: weighted multi-criteria scoring, tiering, category
//! buckets, level-ordered learning paths and "more like this" lookups.
//! Every operation is a pure function of its inputs plus a catalog snapshot.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Catalog, RecommendationEngine, Recommender, TraitModel, TraitScorer};
pub use error::EngineError;
pub use models::{
    CategorizedRecommendations, CourseItem, Level, MatchResult, QuizAnswer, Recommendation,
    TraitAxis, TraitProfile, UserPreferences,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let engine = RecommendationEngine::with_defaults().unwrap();
        let profile = engine
            .score_traits(&[QuizAnswer::new("q1", TraitAxis::A)])
            .unwrap();
        assert_eq!(profile.dominant, TraitAxis::A);
    }
}
