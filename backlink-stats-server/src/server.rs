//! HTTP handlers for the backlink-stats API.
//!
//! Every endpoint is a thin wrapper over the pure computations in
//! `backlink-stats-core`. Computation failures are returned as
//! `422 Unprocessable Entity` with an [`ErrorResponse`] body.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use backlink_stats_core::protocol::{
    ErrorResponse, FormatRequest, FormatResponse, GapRequest, GapResponse, HealthResponse,
    StabilityRequest,
};
use backlink_stats_core::{format_with_unit, DashboardReport, Dataset, StatsError};

use crate::AppState;

fn unprocessable(err: &StatsError) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorResponse::from(err))).into_response()
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// POST /gap
/// Body: { "current": 145, "reference": 285 }
async fn gap(State(state): State<Arc<AppState>>, Json(request): Json<GapRequest>) -> Response {
    match state.comparator.compare(request.current, request.reference) {
        Ok(result) => (StatusCode::OK, Json(GapResponse::from(result))).into_response(),
        Err(err) => {
            tracing::debug!(kind = err.kind(), "gap request rejected");
            unprocessable(&err)
        }
    }
}

/// POST /stability
/// Body: { "series": [{ "period": "Jan", "count": 12 }, ...] }
async fn stability(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StabilityRequest>,
) -> Response {
    match state.analyzer.analyze(&request.series) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => {
            tracing::debug!(kind = err.kind(), "stability request rejected");
            unprocessable(&err)
        }
    }
}

/// POST /format
/// Body: { "value": 1250000, "unit": null }
async fn format_value(Json(request): Json<FormatRequest>) -> Json<FormatResponse> {
    Json(FormatResponse {
        text: format_with_unit(request.value, request.unit.as_deref()),
    })
}

/// POST /report
/// Body: a full dataset. Rows that cannot be computed carry an `error`.
async fn report(
    State(state): State<Arc<AppState>>,
    Json(dataset): Json<Dataset>,
) -> Json<DashboardReport> {
    tracing::info!(
        metrics = dataset.metrics.len(),
        series = dataset.velocity.len(),
        "building dashboard report"
    );
    Json(DashboardReport::build(
        &dataset,
        &state.comparator,
        &state.analyzer,
    ))
}

/// Build the router with all endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/gap", post(gap))
        .route("/stability", post(stability))
        .route("/format", post(format_value))
        .route("/report", post(report))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, Bytes};
    use axum::http::Request;
    use backlink_stats_core::{StabilityResult, Tier};
    use tower::ServiceExt;

    fn create_test_state() -> Arc<AppState> {
        Arc::new(AppState::default())
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, Bytes) {
        let app = build_router(create_test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "healthy");
    }

    #[tokio::test]
    async fn test_gap_endpoint() {
        let (status, body) = post_json("/gap", r#"{"current": 145, "reference": 285}"#).await;

        assert_eq!(status, StatusCode::OK);
        let result: GapResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.tier, Tier::DeficitSevere);
        assert_eq!(result.display, "-49.1%");
    }

    #[tokio::test]
    async fn test_gap_zero_reference() {
        let (status, body) = post_json("/gap", r#"{"current": 10, "reference": 0}"#).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.kind, "division-undefined");
    }

    #[tokio::test]
    async fn test_stability_endpoint() {
        let body = r#"{"series": [
            {"period": "Jan", "count": 12}, {"period": "Feb", "count": 8},
            {"period": "Mar", "count": 14}, {"period": "Apr", "count": 18},
            {"period": "May", "count": 38}, {"period": "Jun", "count": 16},
            {"period": "Jul", "count": 12}
        ]}"#;
        let (status, body) = post_json("/stability", body).await;

        assert_eq!(status, StatusCode::OK);
        let result: StabilityResult = serde_json::from_slice(&body).unwrap();
        assert!(result.is_unstable);
        assert_eq!(result.outliers.len(), 1);
        assert_eq!(result.outliers[0].period, "May");
    }

    #[tokio::test]
    async fn test_stability_empty_series() {
        let (status, body) = post_json("/stability", r#"{"series": []}"#).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.kind, "empty-series");
    }

    #[tokio::test]
    async fn test_format_endpoint() {
        let (status, body) = post_json("/format", r#"{"value": 2400, "unit": " links"}"#).await;

        assert_eq!(status, StatusCode::OK);
        let result: FormatResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.text, "2.4K links");
    }

    #[tokio::test]
    async fn test_report_endpoint() {
        let body = r#"{
            "metrics": [{"label": "Domain rating", "current": 42, "reference": 58}],
            "velocity": [{"name": "Empty", "series": []}]
        }"#;
        let (status, body) = post_json("/report", body).await;

        assert_eq!(status, StatusCode::OK);
        let report: DashboardReport = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            report.comparisons[0].gap.map(|g| g.tier),
            Some(Tier::DeficitModerate)
        );
        assert!(report.velocity[0].stability.is_none());
        assert_eq!(report.velocity[0].error.as_deref(), Some("Series is empty"));
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let (status, _) = post_json("/gap", r#"{"current": "lots"}"#).await;
        assert!(status.is_client_error());
    }
}
