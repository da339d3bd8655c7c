use crate::models::Recommendation;

/// Order ranked recommendations into a learning path
///
/// Stable partition by level (beginner, intermediate, advanced); each block
/// keeps its relevance order. Match results are left untouched.
pub fn order_by_progression(mut ranked: Vec<Recommendation>, length: usize) -> Vec<Recommendation> {
    ranked.sort_by_key(|rec| rec.item.level);
    ranked.truncate(length);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CourseItem, Level, MatchResult, MatchTier};

    fn rec(id: &str, level: Level, score: f64) -> Recommendation {
        Recommendation {
            item: CourseItem {
                id: id.to_string(),
                title: id.to_string(),
                description: String::new(),
                path: "raja".to_string(),
                level,
                instructor: String::new(),
                price: 0.0,
                tags: vec![],
            },
            match_result: MatchResult {
                item_id: id.to_string(),
                score,
                reasons: vec![],
                match_tier: MatchTier::from_score(score),
            },
            priority: 0,
            category: Category::from_score(score),
        }
    }

    #[test]
    fn test_levels_non_decreasing_and_blocks_keep_order() {
        let ranked = vec![
            rec("adv-1", Level::Advanced, 0.95),
            rec("beg-1", Level::Beginner, 0.9),
            rec("int-1", Level::Intermediate, 0.85),
            rec("beg-2", Level::Beginner, 0.8),
            rec("adv-2", Level::Advanced, 0.7),
        ];

        let path = order_by_progression(ranked, 6);
        let ids: Vec<&str> = path.iter().map(|r| r.item.id.as_str()).collect();
        assert_eq!(ids, vec!["beg-1", "beg-2", "int-1", "adv-1", "adv-2"]);
    }

    #[test]
    fn test_truncates_after_ordering() {
        let ranked = vec![
            rec("adv", Level::Advanced, 0.95),
            rec("int", Level::Intermediate, 0.9),
            rec("beg", Level::Beginner, 0.5),
        ];

        let path = order_by_progression(ranked, 2);
        let ids: Vec<&str> = path.iter().map(|r| r.item.id.as_str()).collect();
        assert_eq!(ids, vec!["beg", "int"]);
    }

    #[test]
    fn test_match_results_unchanged() {
        let ranked = vec![rec("adv", Level::Advanced, 0.95), rec("beg", Level::Beginner, 0.5)];
        let before: Vec<MatchResult> = ranked.iter().map(|r| r.match_result.clone()).collect();

        let path = order_by_progression(ranked, 6);
        assert_eq!(path[0].match_result, before[1]);
        assert_eq!(path[1].match_result, before[0]);
    }
}
