// Core algorithm exports
pub mod archetype;
pub mod catalog;
pub mod engine;
pub mod path;
pub mod ranker;
pub mod scoring;
pub mod similarity;
pub mod subscores;
pub mod text;
pub mod trait_model;
pub mod trait_scorer;

pub use archetype::{ArchetypeCode, ArchetypeEntry, ArchetypeTable};
pub use catalog::Catalog;
pub use engine::RecommendationEngine;
pub use path::order_by_progression;
pub use ranker::{calculate_priority, Recommender};
pub use scoring::calculate_match_score;
pub use similarity::{course_similarity, find_similar};
pub use subscores::SubScore;
pub use trait_model::{AxisDefinition, AxisDefinitions, TraitModel};
pub use trait_scorer::{dominant_axis, ranked_axes, TraitScorer};
