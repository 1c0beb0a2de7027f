//! Health and catalog handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use confivue_core::{AgeBand, Item};

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the server
    pub status: String,
    /// Server version
    pub version: String,
    /// Seconds since server started
    pub uptime_seconds: i64,
    /// Number of assessments held in memory
    pub active_assessments: usize,
    /// Number of items in the catalog
    pub catalog_items: usize,
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        active_assessments: state.engine.session_count().await,
        catalog_items: state.engine.catalog().len(),
    })
}

/// Query parameters for listing items
#[derive(Debug, Default, Deserialize)]
pub struct ItemQuery {
    pub age_band: Option<AgeBand>,
    /// Matched ignoring case
    pub domain: Option<String>,
}

/// Response for listing items
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemListResponse {
    pub count: usize,
    pub items: Vec<Item>,
}

/// GET /v1/items
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ItemQuery>,
) -> Json<ItemListResponse> {
    let items = state
        .engine
        .list_items(query.age_band, query.domain.as_deref());
    Json(ItemListResponse {
        count: items.len(),
        items,
    })
}
