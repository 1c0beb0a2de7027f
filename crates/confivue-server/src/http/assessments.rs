//! Assessment session handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use confivue_core::model::NextItem;
use confivue_core::scaling::ScoreReport;
use confivue_core::session::{validate_category, ResponseOutcome};
use confivue_core::{AgeBand, Mode, Response};

use crate::error::ApiError;
use crate::AppState;

/// Body of POST /v1/assessments
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAssessmentRequest {
    pub user_id: String,
    pub age_band: AgeBand,
    #[serde(default)]
    pub mode: Mode,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAssessmentResponse {
    pub assessment_id: String,
}

/// Body of POST /v1/assessments/:id/response
#[derive(Debug, Serialize, Deserialize)]
pub struct ResponseRequest {
    pub item_id: String,
    /// Wide enough that any integer reaches range validation.
    pub category: i64,
    #[serde(default)]
    pub rt_ms: Option<u64>,
}

/// POST /v1/assessments
pub async fn create_assessment(
    State(state): State<Arc<AppState>>,
    request: Result<Json<CreateAssessmentRequest>, JsonRejection>,
) -> Result<Json<CreateAssessmentResponse>, ApiError> {
    let Json(request) = request?;
    let assessment_id = state
        .engine
        .create_assessment(&request.user_id, request.age_band, request.mode)
        .await;
    Ok(Json(CreateAssessmentResponse { assessment_id }))
}

/// GET /v1/assessments/:id/next-item
///
/// An empty `item_id` means the assessment has just been completed.
pub async fn next_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<NextItem>, ApiError> {
    Ok(Json(state.engine.next_item(&id).await?))
}

/// POST /v1/assessments/:id/response
pub async fn submit_response(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    request: Result<Json<ResponseRequest>, JsonRejection>,
) -> Result<Json<ResponseOutcome>, ApiError> {
    let Json(request) = request?;
    let response = Response {
        category: validate_category(request.category)?,
        item_id: request.item_id,
        rt_ms: request.rt_ms,
    };
    Ok(Json(state.engine.submit_response(&id, response).await?))
}

/// GET /v1/assessments/:id/report
pub async fn get_report(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ScoreReport>, ApiError> {
    Ok(Json(state.engine.report(&id).await?))
}
