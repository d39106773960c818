//! Form UI that runs predictions in-process.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};

use crate::context::AppContext;
use crate::prediction::SymptomSet;

use super::page::{render, selected_symptoms, Outcome, PageView, EMPTY_SELECTION_WARNING};

pub const HEADING: &str = "Disease Prediction";
pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed. Please try again.";

#[derive(Clone)]
pub struct DirectUiState {
    app: Arc<AppContext>,
}

pub fn direct_ui_router(app: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit))
        .with_state(DirectUiState { app })
}

async fn show_form(State(state): State<DirectUiState>) -> Html<String> {
    Html(page(&state, &SymptomSet::new(), None))
}

async fn submit(
    State(state): State<DirectUiState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Html<String> {
    let selected = selected_symptoms(fields);
    if selected.is_empty() {
        let warning = Outcome::Warning(EMPTY_SELECTION_WARNING.into());
        return Html(page(&state, &selected, Some(&warning)));
    }

    let app = state.app.clone();
    let request = selected.clone();
    let outcome = match tokio::task::spawn_blocking(move || app.service().predict(&request)).await
    {
        Ok(Ok(result)) => Outcome::Prediction(result),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Direct UI prediction failed");
            Outcome::Error(PREDICTION_FAILED_MESSAGE.into())
        }
        Err(e) => {
            tracing::error!(error = %e, "Direct UI inference task failed");
            Outcome::Error(PREDICTION_FAILED_MESSAGE.into())
        }
    };

    Html(page(&state, &selected, Some(&outcome)))
}

fn page(state: &DirectUiState, selected: &SymptomSet, outcome: Option<&Outcome>) -> String {
    render(&PageView {
        heading: HEADING,
        symptoms: state.app.vocabulary().names(),
        selected,
        outcome,
    })
}
