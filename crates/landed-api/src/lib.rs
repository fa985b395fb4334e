//! Landed API /v1: REST endpoints
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;

use axum::{
    routing::{get, post},
    Router,
};
use landed_report::{EstimationProfile, ReportEvaluator};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use config::ApiConfig;
pub use error::{ApiError, Result};

#[derive(Clone)]
pub struct AppState {
    pub evaluator: Arc<ReportEvaluator>,
    pub metrics: metrics::ApiMetrics,
}

impl AppState {
    pub fn new(profile: EstimationProfile) -> Result<Self> {
        Ok(Self {
            evaluator: Arc::new(ReportEvaluator::new(profile)),
            metrics: metrics::ApiMetrics::new()?,
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/reports/evaluate", post(handlers::evaluate_report))
        .route("/v1/ranges/estimate", post(handlers::estimate_range))
        .route("/v1/margins", post(handlers::margins))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics_text))
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::request_id))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(config: ApiConfig) -> Result<()> {
    let profile = config.load_profile()?;
    tracing::info!(profile = %profile.name, "estimation profile ready");

    let app = create_app(AppState::new(profile)?);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;

    tracing::info!("Landed API listening on {}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
