use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::EngineError;

/// One of the three trait axes scored by the quiz
///
/// Declaration order is the fixed tie-break priority: `A > B > C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TraitAxis {
    #[serde(alias = "a")]
    A,
    #[serde(alias = "b")]
    B,
    #[serde(alias = "c")]
    C,
}

impl TraitAxis {
    /// All axes in tie-break priority order
    pub const ALL: [TraitAxis; 3] = [TraitAxis::A, TraitAxis::B, TraitAxis::C];

    pub fn letter(self) -> char {
        match self {
            TraitAxis::A => 'A',
            TraitAxis::B => 'B',
            TraitAxis::C => 'C',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(TraitAxis::A),
            'B' => Some(TraitAxis::B),
            'C' => Some(TraitAxis::C),
            _ => None,
        }
    }
}

impl fmt::Display for TraitAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Per-axis values (raw sums or percentages)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitScores {
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "C")]
    pub c: f64,
}

impl TraitScores {
    pub fn get(&self, axis: TraitAxis) -> f64 {
        match axis {
            TraitAxis::A => self.a,
            TraitAxis::B => self.b,
            TraitAxis::C => self.c,
        }
    }

    pub fn add(&mut self, axis: TraitAxis, amount: f64) {
        match axis {
            TraitAxis::A => self.a += amount,
            TraitAxis::B => self.b += amount,
            TraitAxis::C => self.c += amount,
        }
    }

    pub fn total(&self) -> f64 {
        self.a + self.b + self.c
    }
}

/// A single answered quiz question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAnswer {
    #[serde(rename = "questionId")]
    pub question_id: String,
    #[serde(rename = "selectedOption")]
    pub selected_option: TraitAxis,
}

impl QuizAnswer {
    pub fn new(question_id: impl Into<String>, selected_option: TraitAxis) -> Self {
        Self {
            question_id: question_id.into(),
            selected_option,
        }
    }
}

/// Archetype resolved from the ranked trait ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub code: String,
    pub title: String,
    pub description: String,
}

/// Result of scoring a completed quiz
///
/// Besides the raw scores, the profile carries the dominant axis' matching
/// data so that scoring an item needs nothing but the item, the profile and
/// the optional preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitProfile {
    pub scores: TraitScores,
    pub percentages: TraitScores,
    pub dominant: TraitAxis,
    pub archetype: Archetype,
    pub path: String,
    #[serde(rename = "synergyPaths", default)]
    pub synergy_paths: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub characteristics: Vec<String>,
    #[serde(rename = "recommendedItemIds", default)]
    pub recommended_item_ids: Vec<String>,
}

/// Course difficulty, ordered beginner < intermediate < advanced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn rank(self) -> i32 {
        match self {
            Level::Beginner => 0,
            Level::Intermediate => 1,
            Level::Advanced => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog course record, owned by the external content store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub path: String,
    pub level: Level,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Inclusive price bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Optional learner preferences supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "completedItemIds", default)]
    pub completed_item_ids: HashSet<String>,
    #[serde(rename = "preferredInstructors", default)]
    pub preferred_instructors: HashSet<String>,
    #[serde(rename = "priceRange", default)]
    pub price_range: Option<PriceRange>,
}

impl UserPreferences {
    /// Requested level, defaulting to the entry level
    pub fn requested_level(&self) -> Level {
        self.level.unwrap_or_default()
    }

    /// Reject structurally invalid preferences
    pub fn ensure_well_formed(&self) -> Result<(), EngineError> {
        if let Some(range) = &self.price_range {
            if !range.min.is_finite() || !range.max.is_finite() {
                return Err(EngineError::InvalidInput(
                    "price range bounds must be finite".to_string(),
                ));
            }
            if range.min < 0.0 || range.max < 0.0 {
                return Err(EngineError::InvalidInput(
                    "price range bounds must be non-negative".to_string(),
                ));
            }
            if range.min > range.max {
                return Err(EngineError::InvalidInput(format!(
                    "price range min {} exceeds max {}",
                    range.min, range.max
                )));
            }
        }
        Ok(())
    }
}

/// Coarse bucket of a relevance score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Perfect,
    High,
    Medium,
    Low,
}

impl MatchTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.85 {
            MatchTier::Perfect
        } else if score >= 0.7 {
            MatchTier::High
        } else if score >= 0.5 {
            MatchTier::Medium
        } else {
            MatchTier::Low
        }
    }
}

/// Relevance of one course for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "itemId")]
    pub item_id: String,
    pub score: f64,
    pub reasons: Vec<String>,
    #[serde(rename = "matchTier")]
    pub match_tier: MatchTier,
}

/// UI grouping of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Primary,
    Secondary,
    Explore,
}

impl Category {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Category::Primary
        } else if score >= 0.6 {
            Category::Secondary
        } else {
            Category::Explore
        }
    }
}

/// Ranked course with its match explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item: CourseItem,
    #[serde(rename = "match")]
    pub match_result: MatchResult,
    pub priority: i64,
    pub category: Category,
}

/// Recommendations grouped by category, each group in rank order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedRecommendations {
    pub primary: Vec<Recommendation>,
    pub secondary: Vec<Recommendation>,
    pub explore: Vec<Recommendation>,
}

impl CategorizedRecommendations {
    pub fn len(&self) -> usize {
        self.primary.len() + self.secondary.len() + self.explore.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Learner interaction forwarded to the event sink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationEvent {
    #[serde(rename = "eventId")]
    pub event_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "itemId")]
    pub item_id: String,
    #[serde(rename = "eventType")]
    pub event_type: RecommendationEventType,
    #[serde(default)]
    pub score: Option<f64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationEventType {
    Viewed,
    Clicked,
    Enrolled,
    Dismissed,
}

/// Weight of each sub-score in the composite match score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub path: f64,
    pub level: f64,
    pub resonance: f64,
    pub characteristics: f64,
    pub preferences: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.path + self.level + self.resonance + self.characteristics + self.preferences
    }

    /// Weights must be non-negative and sum to 1.0
    pub fn validate(&self) -> Result<(), EngineError> {
        let all = [
            self.path,
            self.level,
            self.resonance,
            self.characteristics,
            self.preferences,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(EngineError::Configuration(format!(
                "scoring weights must be finite and non-negative: {:?}",
                self
            )));
        }
        if (self.sum() - 1.0).abs() > 1e-6 {
            return Err(EngineError::Configuration(format!(
                "scoring weights must sum to 1.0, got {}",
                self.sum()
            )));
        }
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            path: 0.40,
            level: 0.25,
            resonance: 0.15,
            characteristics: 0.10,
            preferences: 0.10,
        }
    }
}

/// Ranking thresholds and limits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingSettings {
    /// Results scoring at or below this are discarded
    pub min_score: f64,
    /// Prices strictly below this earn the accessibility bonus
    pub accessible_price: f64,
    pub default_limit: usize,
    pub path_length: usize,
    pub path_candidate_limit: usize,
    pub similar_limit: usize,
    /// Catalogs at least this large are scored on the rayon pool
    pub parallel_threshold: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            min_score: 0.3,
            accessible_price: 50.0,
            default_limit: 6,
            path_length: 6,
            path_candidate_limit: 20,
            similar_limit: 3,
            parallel_threshold: 256,
        }
    }
}
