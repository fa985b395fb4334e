//! API Handlers
use crate::error::{ApiError, Result};
use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use landed_core::{ReportSnapshot, LANDED_VERSION};
use landed_estimate::{calculate_margin_scenarios, tighten};
use serde::Deserialize;
use serde_json::{json, Value};

pub async fn evaluate_report(
    State(state): State<AppState>,
    Json(report): Json<ReportSnapshot>,
) -> Result<(StatusCode, Json<Value>)> {
    let evaluation = state.evaluator.evaluate(&report);
    state
        .metrics
        .evaluations
        .with_label_values(&[evaluation.quality.tier.as_str()])
        .inc();

    Ok((
        StatusCode::OK,
        Json(json!({
            "evaluatedAt": chrono::Utc::now().to_rfc3339(),
            "evaluation": serde_json::to_value(&evaluation)?,
        })),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeRequest {
    #[serde(default)]
    pub supplier_quotes: Option<Vec<f64>>,
    #[serde(default)]
    pub internal_records: Option<Vec<f64>>,
}

pub async fn estimate_range(
    State(state): State<AppState>,
    Json(request): Json<RangeRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let fob = state.evaluator.profile().range_estimator().build_fob_range_result(
        request.supplier_quotes.as_deref(),
        request.internal_records.as_deref(),
    );
    let committed = tighten(&fob.result.range, fob.similar_records_count);
    state.metrics.range_estimates.inc();

    Ok((
        StatusCode::OK,
        Json(json!({
            "fob": serde_json::to_value(&fob)?,
            "committedRange": serde_json::to_value(&committed)?,
        })),
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginRequest {
    pub landed_cost: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub generic_category: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub food_percentage: Option<f64>,
}

pub async fn margins(
    State(state): State<AppState>,
    Json(request): Json<MarginRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    if !request.landed_cost.is_finite() || request.landed_cost < 0.0 {
        return Err(ApiError::BadRequest(format!(
            "landedCost must be a non-negative number, got {}",
            request.landed_cost
        )));
    }

    let quantity = request
        .quantity
        .unwrap_or(state.evaluator.profile().default_quantity);
    let analysis = calculate_margin_scenarios(
        request.landed_cost,
        request.category.as_deref(),
        request.generic_category.as_deref(),
        quantity,
        request.food_percentage,
    );
    state.metrics.margin_requests.inc();

    Ok((StatusCode::OK, Json(serde_json::to_value(&analysis)?)))
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": LANDED_VERSION,
            "profile": state.evaluator.profile().name,
        })),
    )
}

pub async fn metrics_text(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let body = state.metrics.render()?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
        body,
    ))
}
