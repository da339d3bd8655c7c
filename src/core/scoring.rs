use crate::core::subscores::{
    characteristic_overlap, level_fit, path_alignment, preference_fit, trait_resonance, SubScore,
};
use crate::core::text::item_tokens;
use crate::models::{CourseItem, MatchResult, MatchTier, ScoringWeights, TraitProfile, UserPreferences};

/// Calculate a match score (0-1) for a course against a profile
///
/// Scoring formula:
/// score = (
///     path_alignment * 0.40 +          # Requested path, synergy or foundational
///     level_fit * 0.25 +               # Same level, next step or reinforcement
///     trait_resonance * 0.15 +         # Dominant-trait keywords in the item text
///     characteristic_overlap * 0.10 +  # Characteristic phrases in the item text
///     preference_fit * 0.10            # Only when preferences are supplied
/// )
///
/// Without preferences the last term is skipped and contributes nothing.
pub fn calculate_match_score(
    item: &CourseItem,
    profile: &TraitProfile,
    preferences: Option<&UserPreferences>,
    weights: &ScoringWeights,
) -> MatchResult {
    let tokens = item_tokens(item);

    let mut parts: Vec<(f64, SubScore)> = vec![
        (weights.path, path_alignment(item, profile, preferences)),
        (weights.level, level_fit(item, preferences)),
        (weights.resonance, trait_resonance(&tokens, profile)),
        (weights.characteristics, characteristic_overlap(&tokens, profile)),
    ];
    if let Some(prefs) = preferences {
        parts.push((weights.preferences, preference_fit(item, prefs)));
    }

    let total: f64 = parts.iter().map(|(weight, sub)| weight * sub.value).sum();
    let score = sanitise(total);

    let reasons = parts
        .into_iter()
        .filter_map(|(_, sub)| sub.reason)
        .filter(|reason| !reason.is_empty())
        .collect();

    MatchResult {
        item_id: item.id.clone(),
        score,
        reasons,
        match_tier: MatchTier::from_score(score),
    }
}

/// Scores are snapped to this grid so that composites equal in exact
/// arithmetic compare equal and fall through to the priority tie-break
const SCORE_GRID: f64 = 1e9;

/// Clamp to `[0, 1]` on the score grid; non-finite values score 0
#[inline]
fn sanitise(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    ((score * SCORE_GRID).round() / SCORE_GRID).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Archetype, Level, TraitAxis, TraitScores};

    fn create_test_profile() -> TraitProfile {
        TraitProfile {
            scores: TraitScores { a: 3.0, b: 1.0, c: 1.0 },
            percentages: TraitScores { a: 60.0, b: 20.0, c: 20.0 },
            dominant: TraitAxis::A,
            archetype: Archetype {
                code: "ABC".to_string(),
                title: "The Scholar-Servant".to_string(),
                description: "D".to_string(),
            },
            path: "jnana".to_string(),
            synergy_paths: vec!["vedanta".to_string(), "raja".to_string()],
            keywords: vec!["wisdom".to_string(), "study".to_string(), "inquiry".to_string()],
            characteristics: vec!["analytical mind".to_string(), "love of study".to_string()],
            recommended_item_ids: vec![],
        }
    }

    fn create_test_course(path: &str, level: Level, title: &str, description: &str) -> CourseItem {
        CourseItem {
            id: "course-1".to_string(),
            title: title.to_string(),
            description: description.to_string(),
            path: path.to_string(),
            level,
            instructor: "Ravi".to_string(),
            price: 30.0,
            tags: vec![],
        }
    }

    #[test]
    fn test_exact_match_without_preferences() {
        // path 1.0, level 1.0, resonance 1.0, characteristics 1.0, preferences skipped
        let item = create_test_course("jnana", Level::Beginner, "Wisdom and Study", "An analytical path");
        let result = calculate_match_score(&item, &create_test_profile(), None, &ScoringWeights::default());

        assert!((result.score - 0.9).abs() < 1e-9, "got {}", result.score);
        assert_eq!(result.match_tier, MatchTier::Perfect);
        assert_eq!(result.item_id, "course-1");
        assert_eq!(result.reasons.len(), 4);
    }

    #[test]
    fn test_low_relevance_still_has_baseline() {
        let item = create_test_course("hatha", Level::Advanced, "Arm Balances", "Strength work");
        let result = calculate_match_score(&item, &create_test_profile(), None, &ScoringWeights::default());

        // 0.4*0.3 + 0.25*0.3 + 0.15*0.5 + 0.10*0.5
        assert!((result.score - 0.32).abs() < 1e-9, "got {}", result.score);
        assert_eq!(result.match_tier, MatchTier::Low);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_preferences_add_weight() {
        let item = create_test_course("jnana", Level::Beginner, "Wisdom and Study", "An analytical path");
        let mut prefs = UserPreferences::default();
        prefs.preferred_instructors.insert("Ravi".to_string());

        let result = calculate_match_score(&item, &create_test_profile(), Some(&prefs), &ScoringWeights::default());

        // 0.9 + 0.10*0.8
        assert!((result.score - 0.98).abs() < 1e-9, "got {}", result.score);
        assert!(result.reasons.iter().any(|r| r.contains("Ravi")));
    }

    #[test]
    fn test_completed_item_keeps_other_subscores() {
        let item = create_test_course("jnana", Level::Beginner, "Wisdom and Study", "An analytical path");
        let mut prefs = UserPreferences::default();
        prefs.completed_item_ids.insert("course-1".to_string());

        let result = calculate_match_score(&item, &create_test_profile(), Some(&prefs), &ScoringWeights::default());

        assert!((result.score - 0.9).abs() < 1e-9, "got {}", result.score);
    }

    #[test]
    fn test_score_clamped() {
        let weights = ScoringWeights {
            path: 5.0,
            ..ScoringWeights::default()
        };
        let item = create_test_course("jnana", Level::Beginner, "x", "");
        let result = calculate_match_score(&item, &create_test_profile(), None, &weights);
        assert_eq!(result.score, 1.0);

        assert_eq!(sanitise(f64::NAN), 0.0);
        assert_eq!(sanitise(-0.5), 0.0);
    }

    #[test]
    fn test_sanitise_snaps_rounding_noise() {
        // 0.775 summed from two different sub-score mixes
        assert_eq!(sanitise(0.77500000000000013), sanitise(0.77500000000000002));
        assert_eq!(sanitise(0.77500000000000013), 0.775);
    }
}
