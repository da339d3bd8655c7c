use serde::Deserialize;
use std::collections::HashMap;

use crate::core::archetype::ArchetypeTable;
use crate::error::EngineError;
use crate::models::TraitAxis;

/// Trait model shipped with the binary
const BUILTIN_TRAIT_MODEL: &str = include_str!("../../config/traits.toml");

/// Matching data attached to one trait axis
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AxisDefinition {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub characteristics: Vec<String>,
    #[serde(default)]
    pub recommended_items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AxisDefinitions {
    #[serde(rename = "A")]
    pub a: AxisDefinition,
    #[serde(rename = "B")]
    pub b: AxisDefinition,
    #[serde(rename = "C")]
    pub c: AxisDefinition,
}

impl AxisDefinitions {
    pub fn get(&self, axis: TraitAxis) -> &AxisDefinition {
        match axis {
            TraitAxis::A => &self.a,
            TraitAxis::B => &self.b,
            TraitAxis::C => &self.c,
        }
    }
}

/// Data tables consulted by the trait scorer and the match scorer
///
/// Loaded from TOML so that wording, keywords and archetypes can change
/// without touching scoring logic.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TraitModel {
    pub axes: AxisDefinitions,
    #[serde(default)]
    pub synergies: HashMap<String, Vec<String>>,
    pub archetypes: ArchetypeTable,
}

impl TraitModel {
    /// Parse and validate a trait model
    pub fn from_toml_str(source: &str) -> Result<Self, EngineError> {
        let model: TraitModel = toml::from_str(source)
            .map_err(|e| EngineError::Configuration(format!("invalid trait model: {}", e)))?;
        model.validate()?;
        Ok(model)
    }

    /// The model embedded from `config/traits.toml`
    pub fn builtin() -> Result<Self, EngineError> {
        Self::from_toml_str(BUILTIN_TRAIT_MODEL)
    }

    /// Paths considered partially relevant to `path`
    pub fn synergies_for(&self, path: &str) -> &[String] {
        self.synergies
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(path))
            .map(|(_, related)| related.as_slice())
            .unwrap_or(&[])
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        for axis in TraitAxis::ALL {
            let def = self.axes.get(axis);
            if def.name.trim().is_empty() || def.path.trim().is_empty() {
                return Err(EngineError::Configuration(format!(
                    "axis {} needs a name and a path",
                    axis
                )));
            }
        }
        self.archetypes.validate()
    }
}
