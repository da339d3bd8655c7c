use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{QuizAnswer, TraitProfile, UserPreferences};

/// Request to score a completed quiz
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreProfileRequest {
    #[validate(length(min = 1))]
    pub answers: Vec<QuizAnswer>,
}

/// Request for recommendations, categories or a learning path
///
/// Either raw `answers` or a previously computed `profile` must be supplied;
/// a profile takes precedence.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[serde(default)]
    pub answers: Vec<QuizAnswer>,
    #[serde(default)]
    pub profile: Option<TraitProfile>,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
    #[validate(range(min = 1, max = 50))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Query for similar courses
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SimilarQuery {
    #[validate(range(min = 1, max = 20))]
    pub limit: Option<u16>,
}

/// Catalog search query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Request to record a learner interaction
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordEventRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "item_id", rename = "itemId")]
    pub item_id: String,
    #[serde(alias = "event_type", rename = "eventType")]
    pub event_type: String,
    #[serde(default)]
    pub score: Option<f64>,
}
