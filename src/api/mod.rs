//! REST transport.
//!
//! `POST /predict` wraps [`PredictionService`](crate::prediction::PredictionService)
//! behind a JSON request/response pair; `GET /health` reports readiness.
//! Input validation happens here, before the service is invoked; every
//! other failure is mapped to a generic 500.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::start_api_server;
pub use types::{ApiContext, PredictRequest};
