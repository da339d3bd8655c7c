use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::core::trait_model::AxisDefinitions;
use crate::error::EngineError;
use crate::models::{Archetype, TraitAxis};

/// Key of the archetype table: a ranked ordering of distinct axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchetypeCode {
    Triple([TraitAxis; 3]),
    Pair([TraitAxis; 2]),
}

impl ArchetypeCode {
    /// Top two axes of this code
    pub fn pair(self) -> ArchetypeCode {
        match self {
            ArchetypeCode::Triple([first, second, _]) => ArchetypeCode::Pair([first, second]),
            pair @ ArchetypeCode::Pair(_) => pair,
        }
    }

    pub fn axes(&self) -> &[TraitAxis] {
        match self {
            ArchetypeCode::Triple(axes) => axes,
            ArchetypeCode::Pair(axes) => axes,
        }
    }
}

impl fmt::Display for ArchetypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in self.axes() {
            write!(f, "{}", axis.letter())?;
        }
        Ok(())
    }
}

impl FromStr for ArchetypeCode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let axes = s
            .chars()
            .map(TraitAxis::from_letter)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| EngineError::Configuration(format!("unknown axis in archetype code `{}`", s)))?;

        let distinct = axes.iter().enumerate().all(|(i, a)| !axes[..i].contains(a));
        if !distinct {
            return Err(EngineError::Configuration(format!(
                "archetype code `{}` repeats an axis",
                s
            )));
        }

        match axes.as_slice() {
            [a, b, c] => Ok(ArchetypeCode::Triple([*a, *b, *c])),
            [a, b] => Ok(ArchetypeCode::Pair([*a, *b])),
            _ => Err(EngineError::Configuration(format!(
                "archetype code `{}` must have 2 or 3 letters",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArchetypeEntry {
    pub title: String,
    pub description: String,
}

/// Archetype lookup table
///
/// Lookup falls back from the full 3-letter ordering to the top-two pair and
/// finally to a generic description built from the axis names, so it never
/// fails at request time. [`ArchetypeTable::validate`] enforces at load time
/// that the generic fallback is never needed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "HashMap<String, ArchetypeEntry>")]
pub struct ArchetypeTable {
    entries: HashMap<ArchetypeCode, ArchetypeEntry>,
}

impl TryFrom<HashMap<String, ArchetypeEntry>> for ArchetypeTable {
    type Error = EngineError;

    fn try_from(raw: HashMap<String, ArchetypeEntry>) -> Result<Self, Self::Error> {
        let entries = raw
            .into_iter()
            .map(|(code, entry)| Ok((code.parse::<ArchetypeCode>()?, entry)))
            .collect::<Result<HashMap<_, _>, EngineError>>()?;
        Ok(Self { entries })
    }
}

impl ArchetypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: ArchetypeCode, entry: ArchetypeEntry) {
        self.entries.insert(code, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve an ordering to a table entry, if the table has one
    pub fn resolve(&self, ordering: [TraitAxis; 3]) -> Option<(ArchetypeCode, &ArchetypeEntry)> {
        let triple = ArchetypeCode::Triple(ordering);
        let pair = triple.pair();

        self.entries
            .get(&triple)
            .map(|entry| (triple, entry))
            .or_else(|| self.entries.get(&pair).map(|entry| (pair, entry)))
    }

    /// Resolve an ordering to an archetype; never fails
    pub fn lookup(&self, ordering: [TraitAxis; 3], axes: &AxisDefinitions) -> Archetype {
        if let Some((code, entry)) = self.resolve(ordering) {
            return Archetype {
                code: code.to_string(),
                title: entry.title.clone(),
                description: entry.description.clone(),
            };
        }

        let pair = ArchetypeCode::Triple(ordering).pair();
        let first = &axes.get(ordering[0]).name;
        let second = &axes.get(ordering[1]).name;

        tracing::warn!("No archetype entry for {}, using generic fallback", pair);

        Archetype {
            code: pair.to_string(),
            title: format!("{}-{}", first, second),
            description: format!(
                "A {} nature, balanced by {}.",
                first.to_lowercase(),
                second.to_lowercase()
            ),
        }
    }

    /// Every possible ordering must resolve through the 3- or 2-letter entries
    pub fn validate(&self) -> Result<(), EngineError> {
        let missing: Vec<String> = all_orderings()
            .into_iter()
            .filter(|ordering| self.resolve(*ordering).is_none())
            .map(|ordering| ArchetypeCode::Triple(ordering).to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Configuration(format!(
                "archetype table has neither a 3- nor 2-letter entry for: {}",
                missing.join(", ")
            )))
        }
    }
}

/// The six orderings of three distinct axes
pub fn all_orderings() -> Vec<[TraitAxis; 3]> {
    let mut orderings = Vec::with_capacity(6);
    for first in TraitAxis::ALL {
        for second in TraitAxis::ALL {
            for third in TraitAxis::ALL {
                if first != second && second != third && first != third {
                    orderings.push([first, second, third]);
                }
            }
        }
    }
    orderings
}
