use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::Catalog;
use crate::error::EngineError;
use crate::models::CourseItem;

/// Errors that can occur when loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] EngineError),
}

/// Catalog snapshot held in memory with an id index
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: Vec<CourseItem>,
    index: HashMap<String, usize>,
}

impl InMemoryCatalog {
    /// Build a catalog; ids must be unique
    pub fn new(items: Vec<CourseItem>) -> Result<Self, EngineError> {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), position).is_some() {
                return Err(EngineError::InvalidInput(format!(
                    "duplicate course id {}",
                    item.id
                )));
            }
        }
        Ok(Self { items, index })
    }

    /// Parse a JSON array of courses
    pub fn from_json_str(source: &str) -> Result<Self, CatalogError> {
        let items: Vec<CourseItem> = serde_json::from_str(source)?;
        Ok(Self::new(items)?)
    }

    /// Load a JSON catalog file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let source = tokio::fs::read_to_string(path.as_ref()).await?;
        let catalog = Self::from_json_str(&source)?;
        tracing::info!(
            "Loaded {} courses from {}",
            catalog.items.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }
}

impl Catalog for InMemoryCatalog {
    fn list_all(&self) -> &[CourseItem] {
        &self.items
    }

    fn get_by_id(&self, id: &str) -> Option<&CourseItem> {
        self.index.get(id).and_then(|position| self.items.get(*position))
    }
}
