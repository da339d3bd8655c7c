use std::collections::HashMap;
use std::sync::Arc;

use crate::core::trait_model::TraitModel;
use crate::error::EngineError;
use crate::models::{QuizAnswer, TraitAxis, TraitProfile, TraitScores};

/// Turns quiz answers into a [`TraitProfile`]
///
/// Every answer contributes one unit to the axis of its selected option,
/// unless a per-question weight has been configured.
#[derive(Debug, Clone)]
pub struct TraitScorer {
    model: Arc<TraitModel>,
    question_weights: HashMap<String, f64>,
}

impl TraitScorer {
    pub fn new(model: Arc<TraitModel>) -> Self {
        Self {
            model,
            question_weights: HashMap::new(),
        }
    }

    /// Weight individual questions; unlisted questions keep weight 1
    pub fn with_question_weights(
        mut self,
        weights: HashMap<String, f64>,
    ) -> Result<Self, EngineError> {
        if let Some((question, weight)) = weights.iter().find(|(_, w)| !w.is_finite() || **w < 0.0) {
            return Err(EngineError::InvalidInput(format!(
                "question {} has invalid weight {}",
                question, weight
            )));
        }
        self.question_weights = weights;
        Ok(self)
    }

    pub fn model(&self) -> &TraitModel {
        &self.model
    }

    /// Score a completed quiz
    pub fn score(&self, answers: &[QuizAnswer]) -> Result<TraitProfile, EngineError> {
        let mut scores = TraitScores::default();
        for answer in answers {
            let weight = self
                .question_weights
                .get(&answer.question_id)
                .copied()
                .unwrap_or(1.0);
            scores.add(answer.selected_option, weight);
        }

        let total = scores.total();
        if total <= 0.0 {
            return Err(EngineError::InvalidInput(
                "cannot score an empty answer set".to_string(),
            ));
        }

        let percentages = TraitScores {
            a: scores.a / total * 100.0,
            b: scores.b / total * 100.0,
            c: scores.c / total * 100.0,
        };

        let dominant = dominant_axis(&scores);
        let ordering = ranked_axes(&scores);
        let archetype = self.model.archetypes.lookup(ordering, &self.model.axes);
        let axis = self.model.axes.get(dominant);

        tracing::debug!(
            "Scored {} answers: dominant={}, archetype={}",
            answers.len(),
            dominant,
            archetype.code
        );

        Ok(TraitProfile {
            scores,
            percentages,
            dominant,
            archetype,
            path: axis.path.clone(),
            synergy_paths: self.model.synergies_for(&axis.path).to_vec(),
            keywords: axis.keywords.clone(),
            characteristics: axis.characteristics.clone(),
            recommended_item_ids: axis.recommended_items.clone(),
        })
    }
}

/// Axis with the strictly greatest sum; ties go to the earlier axis (A > B > C)
pub fn dominant_axis(scores: &TraitScores) -> TraitAxis {
    let mut best = TraitAxis::A;
    for axis in TraitAxis::ALL {
        if scores.get(axis) > scores.get(best) {
            best = axis;
        }
    }
    best
}

/// All axes by descending sum, ties in A > B > C order
pub fn ranked_axes(scores: &TraitScores) -> [TraitAxis; 3] {
    let mut ordering = TraitAxis::ALL;
    // stable: equal sums keep declaration order
    ordering.sort_by(|x, y| {
        scores
            .get(*y)
            .partial_cmp(&scores.get(*x))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ordering
}
