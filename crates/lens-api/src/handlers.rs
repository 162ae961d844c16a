//! REST API handlers.
//!
//! Each handler reads the shared dataset through the `TelemetryProvider`
//! and returns JSON. A dataset that failed to load is a 500 on every
//! data-bearing route.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{debug, warn};

use lens_core::{MetricsRequest, MetricsResponse};

use crate::ApiState;

/// Response wrapper for consistent API format.
#[derive(serde::Serialize)]
struct ApiResponse<T: serde::Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: serde::Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

fn error_response(msg: &str, status: StatusCode) -> impl IntoResponse {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }),
    )
}

fn dataset_unavailable(e: &lens_dataset::DatasetError) -> axum::response::Response {
    warn!(error = %e, "request rejected, dataset unavailable");
    error_response(
        &format!("telemetry dataset unavailable: {e}"),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .into_response()
}

// ── Status ─────────────────────────────────────────────────────

/// GET /
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Telemetry Analytics API",
        "status": "active"
    }))
}

/// GET /healthz
pub async fn healthz() -> &'static str {
    "ok"
}

// ── Metrics ────────────────────────────────────────────────────

/// POST /metrics, POST /analyze
pub async fn query_metrics(
    State(state): State<ApiState>,
    Json(req): Json<MetricsRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(&e.to_string(), StatusCode::BAD_REQUEST).into_response();
    }

    match state.provider.dataset() {
        Ok(dataset) => {
            let metrics = lens_metrics::aggregate(&dataset, &req);
            debug!(regions = metrics.len(), "metrics query served");
            Json(MetricsResponse { metrics }).into_response()
        }
        Err(e) => dataset_unavailable(&e),
    }
}

/// GET /api/v1/regions
pub async fn list_regions(State(state): State<ApiState>) -> impl IntoResponse {
    match state.provider.dataset() {
        Ok(dataset) => ApiResponse::ok(dataset.regions()).into_response(),
        Err(e) => dataset_unavailable(&e),
    }
}

// ── Prometheus ─────────────────────────────────────────────────

/// GET /metrics
pub async fn prometheus_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    match state.provider.dataset() {
        Ok(dataset) => {
            let body = lens_metrics::render_prometheus(&dataset, state.default_threshold_ms);
            (
                StatusCode::OK,
                [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
                body,
            )
                .into_response()
        }
        Err(e) => dataset_unavailable(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::to_bytes;
    use lens_core::TelemetryRecord;
    use lens_dataset::{Dataset, DatasetError, LoadedDataset};

    fn test_state() -> ApiState {
        let dataset = Dataset::from_records(vec![
            TelemetryRecord::new("emea", 100.0, 99.0),
            TelemetryRecord::new("emea", 200.0, 98.0),
            TelemetryRecord::new("emea", 300.0, 97.0),
            TelemetryRecord::new("emea", 400.0, 96.0),
            TelemetryRecord::new("apac", 100.0, 99.5),
        ]);
        ApiState::new(Arc::new(LoadedDataset::ready(dataset)), 180.0)
    }

    fn failed_state() -> ApiState {
        let err = DatasetError::Read {
            path: "q-vercel-latency.json".to_string(),
            reason: "No such file or directory".to_string(),
        };
        ApiState::new(Arc::new(LoadedDataset::failed(err)), 180.0)
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_acknowledges() {
        let resp = root().await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["status"], "active");
    }

    #[tokio::test]
    async fn query_returns_one_entry_per_region() {
        let req = MetricsRequest::new(["EMEA", "latam", "apac"], 150.0);
        let resp = query_metrics(State(test_state()), Json(req)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body: MetricsResponse = serde_json::from_value(body_json(resp).await).unwrap();
        assert_eq!(body.metrics.len(), 3);
        assert_eq!(body.metrics[0].region, "EMEA");
        assert_eq!(body.metrics[0].p95_latency, 385.0);
        assert_eq!(body.metrics[0].breaches, 3);
        assert_eq!(body.metrics[1].region, "latam");
        assert_eq!(body.metrics[1].breaches, 0);
        assert_eq!(body.metrics[1].avg_latency, 0.0);
        assert_eq!(body.metrics[2].avg_uptime, 99.5);
    }

    #[tokio::test]
    async fn query_rejects_empty_regions() {
        let req = MetricsRequest::new(Vec::<String>::new(), 150.0);
        let resp = query_metrics(State(test_state()), Json(req)).await.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn query_with_missing_dataset_is_server_error() {
        let req = MetricsRequest::new(["emea"], 150.0);
        let resp = query_metrics(State(failed_state()), Json(req)).await.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("dataset unavailable"));
    }

    #[tokio::test]
    async fn list_regions_reports_counts() {
        let resp = list_regions(State(test_state())).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"][0]["region"], "apac");
        assert_eq!(body["data"][1]["records"], 4);
    }

    #[tokio::test]
    async fn list_regions_with_missing_dataset_is_server_error() {
        let resp = list_regions(State(failed_state())).await.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn prometheus_endpoint_returns_text() {
        let resp = prometheus_metrics(State(test_state())).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.contains("text/plain"));
    }
}
