//! Shared types for the REST layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::context::AppContext;

/// State handed to every endpoint.
#[derive(Clone)]
pub struct ApiContext {
    pub app: Arc<AppContext>,
}

impl ApiContext {
    pub fn new(app: Arc<AppContext>) -> Self {
        Self { app }
    }
}

/// `POST /predict` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub symptoms: Vec<String>,
}
