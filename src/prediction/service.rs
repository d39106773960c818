//! Encoder → Classifier → argmax → label → explanation.

use std::sync::Arc;

use crate::reference::{DiseaseLabels, ExplanationTables, SymptomVocabulary};

use super::classifier::{Classifier, ClassifierError};
use super::encoder::encode;
use super::error::PredictionError;
use super::types::{PredictionResult, SymptomSet};

/// Stateless prediction pipeline over shared, read-only reference data.
/// Cloning is cheap.
#[derive(Clone)]
pub struct PredictionService {
    vocabulary: Arc<SymptomVocabulary>,
    classifier: Arc<dyn Classifier>,
    labels: DiseaseLabels,
    explanations: Arc<ExplanationTables>,
}

impl PredictionService {
    pub fn new(
        vocabulary: Arc<SymptomVocabulary>,
        classifier: Arc<dyn Classifier>,
        explanations: Arc<ExplanationTables>,
    ) -> Self {
        Self {
            vocabulary,
            classifier,
            labels: DiseaseLabels,
            explanations,
        }
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        &self.vocabulary
    }

    pub fn labels(&self) -> DiseaseLabels {
        self.labels
    }

    /// Run one prediction. Classifier errors propagate unchanged as
    /// [`PredictionError::Failure`]; nothing is retried.
    pub fn predict(&self, selected: &SymptomSet) -> Result<PredictionResult, PredictionError> {
        let vector = encode(selected, &self.vocabulary);
        let recognized = vector.iter().filter(|&&v| v > 0.0).count();

        let probabilities = self.classifier.predict(&vector)?;
        let index = argmax(&probabilities).ok_or_else(|| {
            ClassifierError::Inference("classifier returned no probabilities".into())
        })?;

        let probability = round_probability(probabilities[index]);
        let disease_name = self.labels.lookup(index);
        let explanation = self.explanations.lookup(disease_name);

        tracing::debug!(
            selected = selected.len(),
            recognized,
            class = index,
            disease = disease_name,
            probability,
            "Prediction complete"
        );

        Ok(PredictionResult {
            disease_name: disease_name.to_string(),
            probability,
            description: explanation.description,
            home_care: explanation.precautions,
        })
    }
}

/// Index of the largest value; the lowest index wins ties. NaN never wins.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if v <= current => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Round to two decimals, halves away from zero.
pub fn round_probability(raw: f32) -> f64 {
    (f64::from(raw) * 100.0).round() / 100.0
}
