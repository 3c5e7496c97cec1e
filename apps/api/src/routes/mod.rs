pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/analyze-rfp",
            post(handlers::handle_analyze_rfp).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/catalog", get(handlers::handle_get_catalog))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::extractor::SimulatedExtractor;
    use crate::analysis::matching::CostBasis;
    use crate::catalog::Catalog;
    use crate::config::Config;

    const BOUNDARY: &str = "rfp-test-boundary";

    fn test_state(config: Config) -> AppState {
        AppState {
            config,
            catalog: Arc::new(Catalog::fallback()),
            extractor: Arc::new(SimulatedExtractor),
        }
    }

    fn test_config() -> Config {
        Config {
            analysis_delay: Duration::ZERO,
            ..Config::default()
        }
    }

    fn multipart_request(field_name: &str, contents: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field_name}\"; filename=\"tender.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(contents);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/analyze-rfp")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_rfp_returns_fixed_payload() {
        let app = build_router(test_state(test_config()));

        let response = app
            .oneshot(multipart_request("file", b"%PDF-1.4 garbage"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert!(body["summary"].as_str().unwrap().contains("Blue Horizon"));
        assert_eq!(body["requirements"].as_array().unwrap().len(), 6);

        let products = body["recommended_products"].as_array().unwrap();
        let ranking: Vec<(&str, &str)> = products
            .iter()
            .map(|p| (p["sku_id"].as_str().unwrap(), p["match_score"].as_str().unwrap()))
            .collect();
        assert_eq!(
            ranking,
            vec![("AP-EXT-005", "98%"), ("AP-IND-009", "95%"), ("AP-ROY-001", "90%")]
        );
        assert_eq!(products[0]["unit_price"], 620);
        assert_eq!(body["total_estimated_cost"], 960000.0);
    }

    #[tokio::test]
    async fn test_analyze_rfp_uses_configured_volume() {
        let config = Config {
            procurement_volume: 10.0,
            cost_basis: CostBasis::Recommended,
            ..test_config()
        };
        let app = build_router(test_state(config));

        let response = app.oneshot(multipart_request("file", b"")).await.unwrap();
        let body = json_body(response).await;
        assert_eq!(body["total_estimated_cost"], 19200.0);
    }

    #[tokio::test]
    async fn test_analyze_rfp_without_file_field_is_422() {
        let app = build_router(test_state(test_config()));

        let response = app
            .oneshot(multipart_request("attachment", b"%PDF-1.4"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_analyze_rfp_rejects_non_multipart_body() {
        let app = build_router(test_state(test_config()));

        let request = Request::builder()
            .method("POST")
            .uri("/analyze-rfp")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_rfp_over_upload_limit_is_413() {
        let config = Config {
            max_upload_bytes: 64,
            ..test_config()
        };
        let app = build_router(test_state(config));

        let response = app
            .oneshot(multipart_request("file", &[b'x'; 1024]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_rfp_truncated_multipart_is_400() {
        let app = build_router(test_state(test_config()));

        // no closing boundary after the file contents
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"tender.pdf\"\r\nContent-Type: application/pdf\r\n\r\n%PDF-1.4 cut off"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/analyze-rfp")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_rfp_waits_for_presentation_delay() {
        let config = Config {
            analysis_delay: Duration::from_millis(2500),
            ..Config::default()
        };
        let app = build_router(test_state(config));

        let started = tokio::time::Instant::now();
        let response = app.oneshot(multipart_request("file", b"")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(started.elapsed() >= Duration::from_millis(2500));
    }

    #[tokio::test]
    async fn test_health_reports_catalog() {
        let app = build_router(test_state(test_config()));

        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["catalog_source"], "fallback");
        assert_eq!(body["catalog_size"], 3);
    }

    #[tokio::test]
    async fn test_catalog_endpoint_lists_products() {
        let app = build_router(test_state(test_config()));

        let request = Request::builder()
            .uri("/api/v1/catalog")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        let body = json_body(response).await;
        let skus: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["sku_id"].as_str().unwrap())
            .collect();
        assert_eq!(skus, vec!["AP-EXT-005", "AP-ROY-001", "AP-IND-009"]);
    }
}
