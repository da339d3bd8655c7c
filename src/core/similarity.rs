use crate::core::catalog::Catalog;
use crate::error::EngineError;
use crate::models::CourseItem;

const SAME_PATH_WEIGHT: f64 = 0.4;
const LEVEL_WEIGHT: f64 = 0.3;
const SAME_INSTRUCTOR_WEIGHT: f64 = 0.2;
const PRICE_WEIGHT: f64 = 0.1;

/// Profile-independent similarity between two courses (0-1)
///
/// similarity = (
///     same_path * 0.4 +
///     (1 - |level_a - level_b| / 2) * 0.3 +
///     same_instructor * 0.2 +
///     (1 - |price_a - price_b| / max(price_a, price_b)) * 0.1
/// )
pub fn course_similarity(a: &CourseItem, b: &CourseItem) -> f64 {
    let mut similarity = 0.0;

    if a.path.eq_ignore_ascii_case(&b.path) {
        similarity += SAME_PATH_WEIGHT;
    }

    let level_distance = (a.level.rank() - b.level.rank()).abs() as f64;
    similarity += (1.0 - level_distance / 2.0) * LEVEL_WEIGHT;

    if !a.instructor.is_empty() && a.instructor == b.instructor {
        similarity += SAME_INSTRUCTOR_WEIGHT;
    }

    similarity += price_closeness(a.price, b.price) * PRICE_WEIGHT;

    if similarity.is_finite() {
        similarity
    } else {
        0.0
    }
}

/// 1.0 for equal prices, falling towards 0 as they diverge; non-finite prices
/// share nothing
#[inline]
fn price_closeness(a: f64, b: f64) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return 0.0;
    }
    let max = a.max(b);
    if max <= 0.0 {
        return 1.0;
    }
    (1.0 - (a - b).abs() / max).clamp(0.0, 1.0)
}

/// Courses most similar to `item_id`, best first, excluding the course itself
pub fn find_similar<C: Catalog + ?Sized>(
    item_id: &str,
    catalog: &C,
    limit: usize,
) -> Result<Vec<CourseItem>, EngineError> {
    if limit == 0 {
        return Err(EngineError::InvalidInput("limit must be positive".to_string()));
    }

    let source = catalog
        .get_by_id(item_id)
        .ok_or_else(|| EngineError::NotFound(format!("course {}", item_id)))?;

    let mut scored: Vec<(f64, &CourseItem)> = catalog
        .list_all()
        .iter()
        .filter(|item| item.id != source.id)
        .map(|item| (course_similarity(source, item), item))
        .collect();

    // stable: equal similarity keeps catalog order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(limit);

    Ok(scored.into_iter().map(|(_, item)| item.clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Level;

    fn course(id: &str, path: &str, level: Level, instructor: &str, price: f64) -> CourseItem {
        CourseItem {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            path: path.to_string(),
            level,
            instructor: instructor.to_string(),
            price,
            tags: vec![],
        }
    }

    #[test]
    fn test_identical_courses_score_one() {
        let a = course("a", "raja", Level::Intermediate, "Sita", 80.0);
        assert!((course_similarity(&a, &a) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_terms() {
        let a = course("a", "raja", Level::Beginner, "Sita", 100.0);
        let b = course("b", "hatha", Level::Advanced, "Ram", 50.0);
        // level term 0, price term 0.5
        assert!((course_similarity(&a, &b) - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_free_courses_are_price_identical() {
        assert_eq!(price_closeness(0.0, 0.0), 1.0);
        assert_eq!(price_closeness(0.0, 10.0), 0.0);
    }

    #[test]
    fn test_non_finite_prices_share_nothing() {
        assert_eq!(price_closeness(f64::NAN, 10.0), 0.0);
        assert_eq!(price_closeness(f64::INFINITY, f64::INFINITY), 0.0);

        let a = course("a", "raja", Level::Beginner, "Sita", f64::NAN);
        let b = course("b", "raja", Level::Beginner, "Sita", 10.0);
        assert!((course_similarity(&a, &b) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_find_similar_with_malformed_prices() {
        let mut catalog = vec![course("s", "raja", Level::Beginner, "Sita", 20.0)];
        for i in 0..40 {
            let price = match i % 3 {
                0 => f64::NAN,
                1 => f64::INFINITY,
                _ => 20.0,
            };
            catalog.push(course(&format!("c{}", i), "raja", Level::Beginner, "Sita", price));
        }

        let similar = find_similar("s", &catalog, 3).unwrap();
        let ids: Vec<&str> = similar.iter().map(|c| c.id.as_str()).collect();
        // only finite, equal prices earn the full price term
        assert_eq!(ids, vec!["c2", "c5", "c8"]);
    }

    #[test]
    fn test_find_similar_excludes_source() {
        let catalog = vec![
            course("course-1", "raja", Level::Beginner, "Sita", 40.0),
            course("course-2", "hatha", Level::Advanced, "Ram", 400.0),
            course("course-3", "raja", Level::Beginner, "Sita", 40.0),
            course("course-4", "raja", Level::Intermediate, "Ram", 60.0),
        ];

        let similar = find_similar("course-1", &catalog, 3).unwrap();
        let ids: Vec<&str> = similar.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["course-3", "course-4", "course-2"]);

        let top = find_similar("course-1", &catalog, 1).unwrap();
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_find_similar_unknown_id() {
        let catalog: Vec<CourseItem> = vec![];
        let err = find_similar("nope", &catalog, 3).unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[test]
    fn test_find_similar_ties_keep_catalog_order() {
        let catalog = vec![
            course("src", "raja", Level::Beginner, "Sita", 10.0),
            course("x", "hatha", Level::Beginner, "Ram", 10.0),
            course("y", "hatha", Level::Beginner, "Ram", 10.0),
        ];

        let similar = find_similar("src", &catalog, 3).unwrap();
        assert_eq!(similar[0].id, "x");
        assert_eq!(similar[1].id, "y");
    }
}
