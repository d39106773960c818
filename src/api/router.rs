//! REST router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::context::AppContext;

/// Build the REST router: `POST /predict`, `GET /health`.
///
/// Cross-origin requests are allowed so browser front-ends served from
/// another origin can call `/predict`.
pub fn api_router(app: Arc<AppContext>) -> Router {
    let ctx = ApiContext::new(app);

    Router::new()
        .route("/predict", post(endpoints::predict::predict))
        .route("/health", get(endpoints::health::check))
        .with_state(ctx)
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::context::testing::{acne_context, context_with};
    use crate::prediction::classifier::testing::{FailingClassifier, FixedClassifier};

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let json = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn predict_returns_disease_with_explanation() {
        let app = api_router(Arc::new(acne_context()));

        let (status, json) = send(app, post_json(r#"{"symptoms": ["itching", "skin_rash"]}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["disease_name"], "Acne");
        assert_eq!(json["probability"], 0.91);
        assert!(json["description"]
            .as_str()
            .unwrap()
            .starts_with("Acne vulgaris"));
        assert_eq!(
            json["home_care"],
            serde_json::json!([
                "bath twice",
                "avoid fatty spicy food",
                "drink plenty of water",
                "avoid too many products"
            ])
        );
    }

    #[tokio::test]
    async fn unknown_symptoms_still_predict() {
        let app = api_router(Arc::new(acne_context()));
        let (status, _) = send(app, post_json(r#"{"symptoms": ["glowing_toes"]}"#)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_symptoms_returns_400() {
        let app = api_router(Arc::new(acne_context()));

        let (status, json) = send(app, post_json("{}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No symptoms provided");
    }

    #[tokio::test]
    async fn body_without_content_type_is_still_parsed() {
        let app = api_router(Arc::new(acne_context()));
        let req = Request::builder()
            .method("POST")
            .uri("/predict")
            .body(Body::from(r#"{"symptoms": ["itching"]}"#))
            .unwrap();

        let (status, _) = send(app, req).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn classifier_failure_returns_500() {
        let app = api_router(Arc::new(context_with(Arc::new(FailingClassifier))));

        let (status, json) = send(app, post_json(r#"{"symptoms": ["itching"]}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Internal server error");
    }

    #[tokio::test]
    async fn tie_resolves_to_lowest_class() {
        let mut probabilities = vec![0.0f32; 28];
        probabilities[3] = 0.45;
        probabilities[9] = 0.45;
        let classifier = FixedClassifier {
            probabilities,
            input_width: None,
        };
        let app = api_router(Arc::new(context_with(Arc::new(classifier))));

        let (_, json) = send(app, post_json(r#"{"symptoms": ["cough"]}"#)).await;

        assert_eq!(json["disease_name"], "Drug Reaction");
        assert_eq!(json["probability"], 0.45);
        assert_eq!(json["description"], "Description not found.");
        assert_eq!(json["home_care"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn health_reports_table_sizes() {
        let app = api_router(Arc::new(acne_context()));
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let (status, json) = send(app, req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["vocabulary_size"], 5);
        assert_eq!(json["classes"], 28);
    }

    #[tokio::test]
    async fn cors_preflight_is_allowed() {
        let app = api_router(Arc::new(acne_context()));
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/predict")
            .header("Origin", "http://localhost:3000")
            .header("Access-Control-Request-Method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}
