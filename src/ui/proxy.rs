//! Form UI that obtains predictions from the REST API.
//!
//! Reads the symptom list straight from the reference file and posts the
//! selection to `{api_url}/predict`. A non-200 answer becomes a generic
//! error; a transport failure shows the underlying error text.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use thiserror::Error;

use crate::api::PredictRequest;
use crate::prediction::{PredictionResult, SymptomSet};
use crate::reference::SymptomVocabulary;

use super::page::{render, selected_symptoms, Outcome, PageView, EMPTY_SELECTION_WARNING};

pub const HEADING: &str = "Disease Prediction (via API)";
pub const FETCH_FAILED_MESSAGE: &str = "Error fetching prediction. Please try again.";

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Could not reach the prediction API at {url}: {message}")]
    Connection { url: String, message: String },

    #[error("Request to the prediction API failed: {0}")]
    Request(String),

    #[error("Prediction API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

impl ProxyError {
    /// Text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ProxyError::Connection { .. } | ProxyError::Request(_) => self.to_string(),
            ProxyError::Status { .. } | ProxyError::ResponseParsing(_) => {
                FETCH_FAILED_MESSAGE.to_string()
            }
        }
    }
}

/// HTTP client for `POST /predict`.
#[derive(Clone)]
pub struct PredictClient {
    base_url: String,
    client: reqwest::Client,
}

impl PredictClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn predict(&self, selected: &SymptomSet) -> Result<PredictionResult, ProxyError> {
        let url = format!("{}/predict", self.base_url);
        let body = PredictRequest {
            symptoms: selected.iter().map(str::to_string).collect(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProxyError::Connection {
                        url: url.clone(),
                        message: error_chain(&e),
                    }
                } else {
                    ProxyError::Request(error_chain(&e))
                }
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ProxyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProxyError::ResponseParsing(e.to_string()))
    }
}

/// Render an error with its `source()` chain, e.g.
/// `error sending request: tcp connect error: Connection refused`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[derive(Clone)]
pub struct ProxyUiState {
    vocabulary: Arc<SymptomVocabulary>,
    client: PredictClient,
}

pub fn proxy_ui_router(vocabulary: Arc<SymptomVocabulary>, client: PredictClient) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit))
        .with_state(ProxyUiState { vocabulary, client })
}

async fn show_form(State(state): State<ProxyUiState>) -> Html<String> {
    Html(page(&state, &SymptomSet::new(), None))
}

async fn submit(
    State(state): State<ProxyUiState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Html<String> {
    let selected = selected_symptoms(fields);
    if selected.is_empty() {
        let warning = Outcome::Warning(EMPTY_SELECTION_WARNING.into());
        return Html(page(&state, &selected, Some(&warning)));
    }

    let outcome = match state.client.predict(&selected).await {
        Ok(result) => Outcome::Prediction(result),
        Err(e) => {
            tracing::warn!(error = %e, api = state.client.base_url(), "Proxy prediction failed");
            Outcome::Error(e.user_message())
        }
    };

    Html(page(&state, &selected, Some(&outcome)))
}

fn page(state: &ProxyUiState, selected: &SymptomSet, outcome: Option<&Outcome>) -> String {
    render(&PageView {
        heading: HEADING,
        symptoms: state.vocabulary.names(),
        selected,
        outcome,
    })
}
