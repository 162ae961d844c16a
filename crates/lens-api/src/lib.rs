//! lens-api — REST API for RegionLens.
//!
//! Provides axum route handlers that summarize telemetry per region over
//! the dataset loaded at startup.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/` | Service acknowledgment |
//! | GET | `/healthz` | Liveness probe |
//! | POST | `/metrics` | Region metrics for `{regions, threshold_ms}` |
//! | POST | `/analyze` | Same as `POST /metrics` |
//! | GET | `/metrics` | Prometheus exposition |
//! | GET | `/api/v1/regions` | Regions present in the dataset |

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use lens_core::config::CorsConfig;
use lens_dataset::TelemetryProvider;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub provider: Arc<dyn TelemetryProvider>,
    /// Breach threshold for the Prometheus exposition.
    pub default_threshold_ms: f64,
}

impl ApiState {
    pub fn new(provider: Arc<dyn TelemetryProvider>, default_threshold_ms: f64) -> Self {
        Self {
            provider,
            default_threshold_ms,
        }
    }
}

/// Build the complete API router (query endpoints + Prometheus + CORS).
pub fn build_router(state: ApiState, cors: &CorsConfig) -> Router {
    let api_routes = Router::new()
        .route("/regions", get(handlers::list_regions))
        .with_state(state.clone());

    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route(
            "/metrics",
            post(handlers::query_metrics).get(handlers::prometheus_metrics),
        )
        .route("/analyze", post(handlers::query_metrics))
        .with_state(state)
        .nest("/api/v1", api_routes)
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}
