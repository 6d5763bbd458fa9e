use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use lead_scoring::error::AppError;
use lead_scoring::import::LeadCsvImporter;
use lead_scoring::scoring::{Insights, LeadRecord, ScoreResult, ScoreSummary};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    pub(crate) score: ScoreResult,
    pub(crate) insights: Insights,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchScoreRequest {
    #[serde(default)]
    pub(crate) leads: Vec<LeadRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchScoreResponse {
    pub(crate) results: Vec<ScoreResult>,
    pub(crate) summary: ScoreSummary,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InsightsRequest {
    pub(crate) lead: LeadRecord,
    #[serde(default)]
    pub(crate) score: Option<ScoreResult>,
}

pub(crate) fn lead_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/leads/score", post(score_endpoint))
        .route("/api/v1/leads/score/batch", post(batch_score_endpoint))
        .route("/api/v1/leads/import", post(import_endpoint))
        .route("/api/v1/leads/insights", post(insights_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready", "ml_enabled": state.engine.ml_enabled() })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn score_endpoint(
    Extension(state): Extension<AppState>,
    Json(lead): Json<LeadRecord>,
) -> Json<ScoreResponse> {
    let score = state.engine.calculate_lead_score(&lead).await;
    let insights = state.engine.score_insights(&lead, &score);

    Json(ScoreResponse { score, insights })
}

pub(crate) async fn batch_score_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<BatchScoreRequest>,
) -> Json<BatchScoreResponse> {
    let results = state.engine.batch_calculate_scores(&payload.leads).await;
    let summary = ScoreSummary::from_results(&results);
    info!(
        total = summary.total,
        ml_scored = summary.ml_scored,
        average = summary.average_score,
        "scored lead batch"
    );

    Json(BatchScoreResponse { results, summary })
}

/// Scores a sheet export posted as the raw CSV body.
pub(crate) async fn import_endpoint(
    Extension(state): Extension<AppState>,
    body: String,
) -> Result<Json<BatchScoreResponse>, AppError> {
    let leads = LeadCsvImporter::from_reader(body.as_bytes())?;
    let results = state.engine.batch_calculate_scores(&leads).await;
    let summary = ScoreSummary::from_results(&results);
    info!(
        total = summary.total,
        average = summary.average_score,
        "scored imported leads"
    );

    Ok(Json(BatchScoreResponse { results, summary }))
}

pub(crate) async fn insights_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<InsightsRequest>,
) -> Json<Insights> {
    let InsightsRequest { lead, score } = payload;
    let score = match score {
        Some(score) => score,
        None => state.engine.calculate_lead_score(&lead).await,
    };

    Json(state.engine.score_insights(&lead, &score))
}
