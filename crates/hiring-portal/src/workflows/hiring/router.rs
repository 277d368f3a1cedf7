use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::dashboard::recompute;
use super::domain::{InvalidStage, Stage, StageCompletion};
use super::intake::DashboardPayload;
use super::navigation::{NavigationOutcome, StageNavigationController};
use super::progress::calculate_completion;

/// Router builder exposing dashboard evaluation and stage navigation.
pub fn dashboard_router(controller: Arc<StageNavigationController>) -> Router {
    Router::new()
        .route("/api/v1/hiring/dashboard", post(dashboard_handler))
        .route(
            "/api/v1/hiring/dashboard/navigate",
            post(navigate_handler),
        )
        .with_state(controller)
}

#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    #[serde(flatten)]
    pub payload: DashboardPayload,
    #[serde(default)]
    pub previous_active_stage: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NavigationRequest {
    #[serde(flatten)]
    pub payload: DashboardPayload,
    pub current_stage: i64,
    pub target_stage: i64,
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub completion: StageCompletion,
    pub active_stage: Stage,
    #[serde(flatten)]
    pub outcome: NavigationOutcome,
}

pub(crate) async fn dashboard_handler(
    axum::Json(request): axum::Json<DashboardRequest>,
) -> Response {
    let previous = match request
        .previous_active_stage
        .map(<Stage as TryFrom<i64>>::try_from)
    {
        None => Stage::Application,
        Some(Ok(stage)) => stage,
        Some(Err(error)) => return invalid_stage(error),
    };

    let snapshot = request.payload.into_snapshot();
    let state = recompute(&snapshot, previous);
    (StatusCode::OK, axum::Json(state)).into_response()
}

pub(crate) async fn navigate_handler(
    State(controller): State<Arc<StageNavigationController>>,
    axum::Json(request): axum::Json<NavigationRequest>,
) -> Response {
    let (current, target) = match (
        <Stage as TryFrom<i64>>::try_from(request.current_stage),
        <Stage as TryFrom<i64>>::try_from(request.target_stage),
    ) {
        (Ok(current), Ok(target)) => (current, target),
        (Err(error), _) | (_, Err(error)) => return invalid_stage(error),
    };

    let snapshot = request.payload.into_snapshot();
    let completion = calculate_completion(&snapshot);
    let outcome = controller.request(&snapshot, &completion, current, target, Utc::now());

    let body = NavigationResponse {
        completion,
        active_stage: outcome.active_stage(),
        outcome,
    };
    (StatusCode::OK, axum::Json(body)).into_response()
}

fn invalid_stage(error: InvalidStage) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
