//! `POST /predict`: symptoms in, disease with explanation out.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::prediction::{PredictionError, PredictionResult, SymptomSet};

pub const NO_SYMPTOMS_MESSAGE: &str = "No symptoms provided";
pub const INVALID_SYMPTOMS_MESSAGE: &str = "Invalid input. Please provide a valid symptoms list.";

/// Validate the raw request body and extract the symptom selection.
///
/// Parsed from raw bytes: every malformed shape, including a missing
/// content type, is `InvalidInput`, answered as a 400 with an
/// `{"error": ...}` body.
pub fn parse_symptoms(body: &[u8]) -> Result<SymptomSet, PredictionError> {
    let no_symptoms = || PredictionError::InvalidInput(NO_SYMPTOMS_MESSAGE.into());

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(no_symptoms());
    }
    let payload: Value = serde_json::from_slice(body).map_err(|_| no_symptoms())?;

    let symptoms = match payload.get("symptoms") {
        None | Some(Value::Null) => return Err(no_symptoms()),
        Some(symptoms) => symptoms,
    };

    let names: Vec<String> = serde_json::from_value(symptoms.clone())
        .map_err(|_| PredictionError::InvalidInput(INVALID_SYMPTOMS_MESSAGE.into()))?;

    Ok(names.into_iter().collect())
}

pub async fn predict(
    State(ctx): State<ApiContext>,
    body: Bytes,
) -> Result<Json<PredictionResult>, ApiError> {
    let selected = parse_symptoms(&body)?;
    tracing::info!(symptoms = selected.len(), "Prediction requested");

    let app = ctx.app.clone();
    let result = tokio::task::spawn_blocking(move || app.service().predict(&selected))
        .await
        .map_err(|e| ApiError::Internal(format!("inference task failed: {e}")))??;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_request_message(body: &[u8]) -> String {
        match parse_symptoms(body).map_err(ApiError::from) {
            Err(ApiError::BadRequest(message)) => message,
            other => panic!("expected bad request, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn validation_failures_are_invalid_input() {
        assert!(matches!(
            parse_symptoms(b"{}"),
            Err(PredictionError::InvalidInput(message)) if message == NO_SYMPTOMS_MESSAGE
        ));
    }

    #[test]
    fn accepts_symptom_array() {
        let selected = parse_symptoms(br#"{"symptoms": ["itching", "skin_rash"]}"#).unwrap();
        assert_eq!(selected.len(), 2);
        assert!(selected.contains("skin_rash"));
    }

    #[test]
    fn empty_array_is_accepted() {
        let selected = parse_symptoms(br#"{"symptoms": []}"#).unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn missing_field_or_body_is_no_symptoms() {
        assert_eq!(bad_request_message(b"{}"), NO_SYMPTOMS_MESSAGE);
        assert_eq!(bad_request_message(b""), NO_SYMPTOMS_MESSAGE);
        assert_eq!(bad_request_message(br#"{"symptoms": null}"#), NO_SYMPTOMS_MESSAGE);
        assert_eq!(bad_request_message(b"not json"), NO_SYMPTOMS_MESSAGE);
        assert_eq!(bad_request_message(b"[1, 2]"), NO_SYMPTOMS_MESSAGE);
    }

    #[test]
    fn non_string_symptoms_are_invalid() {
        assert_eq!(
            bad_request_message(br#"{"symptoms": "itching"}"#),
            INVALID_SYMPTOMS_MESSAGE
        );
        assert_eq!(
            bad_request_message(br#"{"symptoms": [1, 2]}"#),
            INVALID_SYMPTOMS_MESSAGE
        );
    }
}
