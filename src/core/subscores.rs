//! The five sub-scores that make up a match score.
//!
//! Each is a pure function returning a value in `[0, 1]` and, when it found
//! something worth telling the learner, a reason string. None of them fail:
//! missing data yields a neutral baseline.

use std::collections::HashSet;

use crate::core::text::{count_keyword_hits, is_foundational, phrase_matches};
use crate::models::{CourseItem, TraitProfile, UserPreferences};

/// Value of one sub-score with its optional justification
#[derive(Debug, Clone, PartialEq)]
pub struct SubScore {
    pub value: f64,
    pub reason: Option<String>,
}

impl SubScore {
    fn new(value: f64, reason: Option<String>) -> Self {
        Self { value, reason }
    }

    fn silent(value: f64) -> Self {
        Self { value, reason: None }
    }
}

/// Path alignment
///
/// Exact match against the requested path (preference, else the profile's
/// path) scores 1.0, a synergy path 0.7, a foundational item 0.6, anything
/// else 0.3.
pub fn path_alignment(
    item: &CourseItem,
    profile: &TraitProfile,
    preferences: Option<&UserPreferences>,
) -> SubScore {
    let target = preferences
        .and_then(|p| p.path.as_deref())
        .unwrap_or(profile.path.as_str());

    if item.path.eq_ignore_ascii_case(target) {
        return SubScore::new(1.0, Some(format!("Aligned with your {} path", target)));
    }

    if profile
        .synergy_paths
        .iter()
        .any(|p| p.eq_ignore_ascii_case(&item.path))
    {
        return SubScore::new(
            0.7,
            Some(format!("{} complements the {} path", item.path, profile.path)),
        );
    }

    if is_foundational(item) {
        return SubScore::new(0.6, Some("Builds a strong foundation".to_string()));
    }

    SubScore::silent(0.3)
}

/// Level fit against the requested level (entry level when unspecified)
pub fn level_fit(item: &CourseItem, preferences: Option<&UserPreferences>) -> SubScore {
    let requested = preferences.map(|p| p.requested_level()).unwrap_or_default();

    match item.level.rank() - requested.rank() {
        0 => SubScore::new(1.0, Some(format!("Matches your {} level", requested))),
        1 => SubScore::new(0.8, Some("A natural next step".to_string())),
        -1 => SubScore::new(0.6, Some("Reinforces what you already know".to_string())),
        _ => SubScore::silent(0.3),
    }
}

/// Keyword hits between the dominant trait's keywords and the item text
pub fn trait_resonance(item_tokens: &HashSet<String>, profile: &TraitProfile) -> SubScore {
    match count_keyword_hits(item_tokens, &profile.keywords) {
        0 => SubScore::silent(0.5),
        1 => SubScore::new(0.7, Some("Resonates with your nature".to_string())),
        _ => SubScore::new(1.0, Some("Strongly resonates with your nature".to_string())),
    }
}

/// Share of the profile's characteristic phrases reflected in the item text
pub fn characteristic_overlap(item_tokens: &HashSet<String>, profile: &TraitProfile) -> SubScore {
    if profile.characteristics.is_empty() {
        return SubScore::silent(0.5);
    }

    let matched = profile
        .characteristics
        .iter()
        .filter(|phrase| phrase_matches(item_tokens, phrase))
        .count();
    let fraction = matched as f64 / profile.characteristics.len() as f64;

    if fraction >= 0.5 {
        SubScore::new(1.0, Some("Suits how you like to learn".to_string()))
    } else if fraction >= 0.25 {
        SubScore::new(0.7, Some("Reflects some of your strengths".to_string()))
    } else {
        SubScore::silent(0.5)
    }
}

/// Fit with explicit preferences
///
/// Completed items score 0 here and nothing else is considered; the other
/// sub-scores still apply so the item can surface for review.
pub fn preference_fit(item: &CourseItem, preferences: &UserPreferences) -> SubScore {
    if preferences.completed_item_ids.contains(&item.id) {
        return SubScore::new(0.0, Some("Already completed, available for review".to_string()));
    }

    let mut value: f64 = 0.5;
    let mut reasons = Vec::new();

    if preferences.preferred_instructors.contains(&item.instructor) {
        value += 0.3;
        reasons.push(format!("Taught by {}", item.instructor));
    }

    if let Some(range) = &preferences.price_range {
        if range.contains(item.price) {
            value += 0.2;
            reasons.push("Within your budget".to_string());
        } else {
            value -= 0.2;
        }
    }

    let reason = if reasons.is_empty() {
        None
    } else {
        Some(reasons.join("; "))
    };

    SubScore::new(value.clamp(0.0, 1.0), reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::text::item_tokens;
    use crate::models::{Archetype, Level, PriceRange, TraitAxis, TraitScores};

    fn profile() -> TraitProfile {
        TraitProfile {
            scores: TraitScores { a: 3.0, b: 1.0, c: 1.0 },
            percentages: TraitScores { a: 60.0, b: 20.0, c: 20.0 },
            dominant: TraitAxis::A,
            archetype: Archetype {
                code: "ABC".to_string(),
                title: "T".to_string(),
                description: "D".to_string(),
            },
            path: "jnana".to_string(),
            synergy_paths: vec!["vedanta".to_string()],
            keywords: vec!["wisdom".to_string(), "study".to_string(), "scripture".to_string()],
            characteristics: vec![
                "analytical mind".to_string(),
                "love of study".to_string(),
                "reflective inquiry".to_string(),
                "quiet discipline".to_string(),
            ],
            recommended_item_ids: vec![],
        }
    }

    fn course(path: &str, level: Level, title: &str) -> CourseItem {
        CourseItem {
            id: "course-1".to_string(),
            title: title.to_string(),
            description: String::new(),
            path: path.to_string(),
            level,
            instructor: "Ravi".to_string(),
            price: 40.0,
            tags: vec![],
        }
    }

    #[test]
    fn test_path_alignment_tiers() {
        let p = profile();
        assert_eq!(path_alignment(&course("jnana", Level::Beginner, "x"), &p, None).value, 1.0);
        assert_eq!(path_alignment(&course("Vedanta", Level::Beginner, "x"), &p, None).value, 0.7);
        assert_eq!(
            path_alignment(&course("hatha", Level::Beginner, "Hatha Fundamentals"), &p, None).value,
            0.6
        );
        let other = path_alignment(&course("hatha", Level::Beginner, "Flow"), &p, None);
        assert_eq!(other.value, 0.3);
        assert!(other.reason.is_none());
    }

    #[test]
    fn test_path_alignment_prefers_requested_path() {
        let prefs = UserPreferences {
            path: Some("hatha".to_string()),
            ..Default::default()
        };
        let p = profile();
        assert_eq!(path_alignment(&course("hatha", Level::Beginner, "x"), &p, Some(&prefs)).value, 1.0);
        assert_eq!(path_alignment(&course("jnana", Level::Beginner, "x"), &p, Some(&prefs)).value, 0.3);
    }

    #[test]
    fn test_level_fit() {
        let prefs = UserPreferences {
            level: Some(Level::Intermediate),
            ..Default::default()
        };
        assert_eq!(level_fit(&course("x", Level::Intermediate, "x"), Some(&prefs)).value, 1.0);
        assert_eq!(level_fit(&course("x", Level::Advanced, "x"), Some(&prefs)).value, 0.8);
        assert_eq!(level_fit(&course("x", Level::Beginner, "x"), Some(&prefs)).value, 0.6);

        // no preferences: requested level is beginner
        assert_eq!(level_fit(&course("x", Level::Beginner, "x"), None).value, 1.0);
        assert_eq!(level_fit(&course("x", Level::Advanced, "x"), None).value, 0.3);
    }

    #[test]
    fn test_trait_resonance_never_zero() {
        let p = profile();
        let none = item_tokens(&course("x", Level::Beginner, "Handstands"));
        let one = item_tokens(&course("x", Level::Beginner, "Wisdom"));
        let two = item_tokens(&course("x", Level::Beginner, "Study of Scripture"));

        assert_eq!(trait_resonance(&none, &p).value, 0.5);
        assert_eq!(trait_resonance(&one, &p).value, 0.7);
        assert_eq!(trait_resonance(&two, &p).value, 1.0);
    }

    #[test]
    fn test_characteristic_overlap() {
        let p = profile();
        let half = item_tokens(&course("x", Level::Beginner, "Analytical Study"));
        let quarter = item_tokens(&course("x", Level::Beginner, "Inquiry"));
        let nothing = item_tokens(&course("x", Level::Beginner, "Handstands"));

        assert_eq!(characteristic_overlap(&half, &p).value, 1.0);
        assert_eq!(characteristic_overlap(&quarter, &p).value, 0.7);
        assert_eq!(characteristic_overlap(&nothing, &p).value, 0.5);
    }

    #[test]
    fn test_preference_fit_bonuses() {
        let item = course("x", Level::Beginner, "x");
        let mut prefs = UserPreferences::default();
        assert_eq!(preference_fit(&item, &prefs).value, 0.5);

        prefs.preferred_instructors.insert("Ravi".to_string());
        assert!((preference_fit(&item, &prefs).value - 0.8).abs() < 1e-9);

        prefs.price_range = Some(PriceRange { min: 0.0, max: 50.0 });
        let fit = preference_fit(&item, &prefs);
        assert!((fit.value - 1.0).abs() < 1e-9);
        assert!(fit.reason.unwrap().contains("budget"));

        prefs.price_range = Some(PriceRange { min: 100.0, max: 200.0 });
        assert!((preference_fit(&item, &prefs).value - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_preference_fit_completed_short_circuits() {
        let item = course("x", Level::Beginner, "x");
        let mut prefs = UserPreferences::default();
        prefs.preferred_instructors.insert("Ravi".to_string());
        prefs.completed_item_ids.insert("course-1".to_string());

        assert_eq!(preference_fit(&item, &prefs).value, 0.0);
    }
}
