//! HTTP server module

mod api;
mod assessments;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::AppState;

pub use api::{HealthResponse, ItemListResponse, ItemQuery};
pub use assessments::{CreateAssessmentRequest, CreateAssessmentResponse, ResponseRequest};

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::health))
        .route("/v1/items", get(api::list_items))
        .route("/v1/assessments", post(assessments::create_assessment))
        .route("/v1/assessments/:id/next-item", get(assessments::next_item))
        .route("/v1/assessments/:id/response", post(assessments::submit_response))
        .route("/v1/assessments/:id/report", get(assessments::get_report))
        .layer(cors)
        .with_state(state)
}
