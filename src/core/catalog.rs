use crate::models::CourseItem;

/// Read-only access to a course catalog snapshot
///
/// The engine takes a catalog on every call instead of holding one, so any
/// snapshot works: a plain slice, an in-memory catalog loaded from disk, or a
/// caller-side adapter over a content store.
pub trait Catalog: Send + Sync {
    /// Every course, in catalog order
    fn list_all(&self) -> &[CourseItem];

    fn get_by_id(&self, id: &str) -> Option<&CourseItem> {
        self.list_all().iter().find(|item| item.id == id)
    }

    /// Case-insensitive substring search over title, description, instructor and tags
    fn search(&self, query: &str) -> Vec<&CourseItem> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.list_all().iter().collect();
        }

        self.list_all()
            .iter()
            .filter(|item| {
                item.title.to_lowercase().contains(&needle)
                    || item.description.to_lowercase().contains(&needle)
                    || item.instructor.to_lowercase().contains(&needle)
                    || item.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
            })
            .collect()
    }

    fn filter(&self, predicate: &dyn Fn(&CourseItem) -> bool) -> Vec<&CourseItem> {
        self.list_all().iter().filter(|item| predicate(item)).collect()
    }

    fn len(&self) -> usize {
        self.list_all().len()
    }

    fn is_empty(&self) -> bool {
        self.list_all().is_empty()
    }
}

impl Catalog for [CourseItem] {
    fn list_all(&self) -> &[CourseItem] {
        self
    }
}

impl Catalog for Vec<CourseItem> {
    fn list_all(&self) -> &[CourseItem] {
        self.as_slice()
    }
}
