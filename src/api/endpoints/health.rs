//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub vocabulary_size: usize,
    pub classes: usize,
    pub started_at: String,
}

/// `GET /health`: liveness plus the sizes of the loaded tables.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    let service = ctx.app.service();

    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        vocabulary_size: service.vocabulary().len(),
        classes: service.labels().len(),
        started_at: ctx.app.started_at().to_rfc3339(),
    })
}
