//! Engine and catalog error types.
//!
//! `AssessmentError` is returned by every session operation and maps one to
//! one onto the API's failure responses. `CatalogError` is raised only while
//! loading the item catalog and is fatal at startup.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while driving an assessment session.
#[derive(Debug, Error, PartialEq)]
pub enum AssessmentError {
    /// No assessment exists with this id (or it can no longer serve items).
    #[error("assessment not found: {0}")]
    NotFound(String),

    /// The operation is not allowed because the assessment is completed.
    #[error("assessment already completed: {0}")]
    InvalidState(String),

    /// A response for this item has already been recorded.
    #[error("item already answered: {0}")]
    DuplicateResponse(String),

    /// The item was never presented in this assessment.
    #[error("item was not presented in this assessment: {0}")]
    ItemNotPresented(String),

    /// Malformed input, e.g. a category outside 0..=4.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl AssessmentError {
    /// Stable machine-readable code for API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AssessmentError::NotFound(_) => "NOT_FOUND",
            AssessmentError::InvalidState(_) => "ALREADY_COMPLETED",
            AssessmentError::DuplicateResponse(_) => "ALREADY_ANSWERED",
            AssessmentError::ItemNotPresented(_) => "ITEM_NOT_PRESENTED",
            AssessmentError::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

/// Errors that can occur while loading the item catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not a valid item document.
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two items share the same identifier.
    #[error("duplicate item id in catalog: {0}")]
    DuplicateId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let errors = [
            AssessmentError::NotFound("a".into()),
            AssessmentError::InvalidState("a".into()),
            AssessmentError::DuplicateResponse("i".into()),
            AssessmentError::ItemNotPresented("i".into()),
            AssessmentError::Validation("bad".into()),
        ];
        let codes: std::collections::HashSet<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn display_includes_subject() {
        let err = AssessmentError::DuplicateResponse("item-7".into());
        assert_eq!(err.to_string(), "item already answered: item-7");
    }
}
