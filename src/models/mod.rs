// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Archetype, CategorizedRecommendations, Category, CourseItem, Level, MatchResult, MatchTier,
    PriceRange, QuizAnswer, RankingSettings, Recommendation, RecommendationEvent,
    RecommendationEventType, ScoringWeights, TraitAxis, TraitProfile, TraitScores,
    UserPreferences,
};
pub use requests::{RecommendRequest, RecordEventRequest, ScoreProfileRequest, SearchQuery, SimilarQuery};
pub use responses::{
    CategoriesResponse, ErrorResponse, HealthResponse, RecommendationsResponse,
    RecordEventResponse, SearchResponse, SimilarResponse,
};
