//! Server error types and the API error response.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use confivue_core::{AssessmentError, CatalogError};

/// Errors that can occur while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the configured address
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The item catalog could not be loaded
    #[error("catalog load failed: {0}")]
    Catalog(#[from] CatalogError),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON body returned for every failed API call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// An engine error on its way to the client.
#[derive(Debug)]
pub struct ApiError(pub AssessmentError);

impl From<AssessmentError> for ApiError {
    fn from(e: AssessmentError) -> Self {
        Self(e)
    }
}

/// Bodies that fail to deserialize are reported like any other bad input.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AssessmentError::Validation(rejection.body_text()))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            AssessmentError::NotFound(_) => StatusCode::NOT_FOUND,
            AssessmentError::InvalidState(_)
            | AssessmentError::DuplicateResponse(_)
            | AssessmentError::ItemNotPresented(_) => StatusCode::BAD_REQUEST,
            AssessmentError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.0.to_string(),
            code: self.0.code().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let status = |e| ApiError(e).status();
        assert_eq!(status(AssessmentError::NotFound("a".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status(AssessmentError::InvalidState("a".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(AssessmentError::DuplicateResponse("i".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(AssessmentError::Validation("x".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
