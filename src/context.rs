//! Application context shared by every front-end.
//!
//! Built once at startup from the reference files and the model artifact,
//! then handed to handlers behind an `Arc`. Nothing in it is mutated after
//! construction, so no locking is needed.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::ReferencePaths;
use crate::prediction::{load_classifier, Classifier, PredictionError, PredictionService};
use crate::reference::{DiseaseLabels, ExplanationTables, SymptomVocabulary};

pub struct AppContext {
    service: PredictionService,
    started_at: DateTime<Utc>,
}

impl AppContext {
    /// Load vocabulary, explanation tables and classifier from disk.
    ///
    /// Any failure is `UpstreamUnavailable`: the caller should refuse to
    /// serve rather than answer from partial data.
    pub fn load(paths: &ReferencePaths) -> Result<Self, PredictionError> {
        let vocabulary = SymptomVocabulary::load(&paths.symptoms)?;
        let explanations = ExplanationTables::load(&paths.descriptions, &paths.precautions)?;
        let classifier = load_classifier(&paths.model)
            .map_err(|e| PredictionError::UpstreamUnavailable(e.to_string()))?;

        Self::from_parts(vocabulary, classifier, explanations)
    }

    /// Assemble a context from already-loaded parts, checking that the
    /// classifier agrees with the vocabulary and the label table.
    pub fn from_parts(
        vocabulary: SymptomVocabulary,
        classifier: Arc<dyn Classifier>,
        explanations: ExplanationTables,
    ) -> Result<Self, PredictionError> {
        check_consistency(&vocabulary, classifier.as_ref())?;

        tracing::info!(
            symptoms = vocabulary.len(),
            classes = DiseaseLabels.len(),
            "Application context ready"
        );

        Ok(Self {
            service: PredictionService::new(
                Arc::new(vocabulary),
                classifier,
                Arc::new(explanations),
            ),
            started_at: Utc::now(),
        })
    }

    pub fn service(&self) -> &PredictionService {
        &self.service
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        self.service.vocabulary()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

fn check_consistency(
    vocabulary: &SymptomVocabulary,
    classifier: &dyn Classifier,
) -> Result<(), PredictionError> {
    if let Some(width) = classifier.input_width() {
        if width != vocabulary.len() {
            return Err(PredictionError::UpstreamUnavailable(format!(
                "classifier expects {width} input symptoms but the vocabulary has {}",
                vocabulary.len()
            )));
        }
    }

    let classes = DiseaseLabels.len();
    if let Some(width) = classifier.output_width() {
        if width != classes {
            return Err(PredictionError::UpstreamUnavailable(format!(
                "classifier emits {width} classes but the label table has {classes}"
            )));
        }
    }
    Ok(())
}
