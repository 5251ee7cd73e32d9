//! Heart Disease Prediction API Server
//!
//! HTTP input surface: publishes the attribute schema for form rendering,
//! accepts raw inputs, encodes them and runs the classifier.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use data_validator::Validator;
use feature_engine::FeatureEncoder;
use inference_engine::{InferenceEngine, ModelInfo};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub mod config;
pub mod error;
pub mod rate_limit;
mod routes;
pub mod telemetry;

use crate::config::Settings;
use crate::rate_limit::{create_governor_config, DefaultGovernorConfig};

/// Application state shared across handlers; read-only after startup
pub struct AppState {
    /// Classifier handle
    pub engine: InferenceEngine,
    /// Feature encoder
    pub encoder: FeatureEncoder,
    /// Input validator
    pub validator: Validator,
    /// Prometheus exporter, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state around a loaded classifier
    pub fn new(engine: InferenceEngine) -> Self {
        Self {
            engine,
            encoder: FeatureEncoder::default(),
            validator: Validator::default(),
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Attach a Prometheus handle for `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelInfo,
}

/// Create the application router
///
/// With a governor config, `/api/v1/predict` is rate limited per peer IP and
/// the router must be served with connect info.
pub fn create_router(
    state: Arc<AppState>,
    governor: Option<Arc<DefaultGovernorConfig>>,
) -> Router {
    let mut predict = Router::new().route("/api/v1/predict", post(routes::predictions::predict));
    if let Some(config) = governor {
        predict = predict.layer(GovernorLayer { config });
    }

    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/schema", get(routes::schema::get_schema))
        .route("/api/v1/about", get(routes::schema::get_about))
        .route("/api/v1/encode", post(routes::predictions::encode))
        .route("/api/v1/decode", post(routes::predictions::decode))
        .route("/metrics", get(metrics_handler))
        .merge(predict)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: state.engine.info(),
    })
}

/// Prometheus exposition handler
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed".to_string()),
    }
}

/// Load the model and run the server until Ctrl-C
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let engine = InferenceEngine::load(&settings.model.path, settings.model.format)?;
    let state = AppState::new(engine).with_metrics(telemetry::init_metrics()?);

    let governor = if settings.rate_limit.enabled {
        let config = create_governor_config(&settings.rate_limit)
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limit: {:?}", settings.rate_limit))?;
        Some(config)
    } else {
        warn!("Rate limiting disabled");
        None
    };

    let app = create_router(Arc::new(state), governor);

    info!("Starting API server on {}", settings.server.addr);

    let listener = tokio::net::TcpListener::bind(&settings.server.addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
