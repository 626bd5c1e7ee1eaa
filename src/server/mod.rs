//! Axum HTTP surface: one POST route per task plus a health probe.
//!
//! Every well-formed request gets a 200 with an [`OperationResponse`];
//! task failure is signaled through the record's own `success` and
//! `return_code` fields, never through the transport. Malformed bodies are
//! rejected by the JSON extractor before the engine runs.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use uuid::Uuid;

use crate::args::ParameterSet;
use crate::execution::Executor;
use crate::schemas::{
    parameters_from, BenchmarkRequest, ExportRequest, HealthResponse, OperationResponse,
    PredictRequest, SolutionRequest, TrackRequest, TrainRequest, ValRequest,
};

pub struct AppState {
    pub executor: Executor,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/train", post(train))
        .route("/val", post(val))
        .route("/predict", post(predict))
        .route("/export", post(export))
        .route("/track", post(track))
        .route("/benchmark", post(benchmark))
        .route("/solution", post(solution))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "ultrad is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Local::now().to_rfc3339(),
    })
}

async fn train(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TrainRequest>,
) -> Json<OperationResponse> {
    run_task(&state, "train", parameters_from(&req)).await
}

async fn val(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ValRequest>,
) -> Json<OperationResponse> {
    run_task(&state, "val", parameters_from(&req)).await
}

async fn predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PredictRequest>,
) -> Json<OperationResponse> {
    run_task(&state, "predict", parameters_from(&req)).await
}

async fn export(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExportRequest>,
) -> Json<OperationResponse> {
    run_task(&state, "export", parameters_from(&req)).await
}

async fn track(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TrackRequest>,
) -> Json<OperationResponse> {
    run_task(&state, "track", parameters_from(&req)).await
}

async fn benchmark(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BenchmarkRequest>,
) -> Json<OperationResponse> {
    run_task(&state, "benchmark", parameters_from(&req)).await
}

async fn solution(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SolutionRequest>,
) -> Json<OperationResponse> {
    run_task(&state, "solution", parameters_from(&req)).await
}

/// Run one task and wrap the result with the request-scoped envelope
/// fields (fresh run id, completion timestamp).
async fn run_task(state: &AppState, task: &str, params: ParameterSet) -> Json<OperationResponse> {
    let run_id = Uuid::new_v4().to_string();
    info!(%run_id, task, "request accepted");
    let result = state.executor.execute(task, params).await;
    let timestamp = Local::now().to_rfc3339();
    Json(OperationResponse::from_result(run_id, timestamp, result))
}
