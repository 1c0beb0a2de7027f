//! The assessment session state machine.
//!
//! A session is `Active` until it is completed, and completion is terminal.
//! Presented and answered items are tracked separately: `asked` records what
//! the selector handed out, `responded` what the client actually answered.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AssessmentError;
use crate::estimator::{estimate_theta, sem_after, INITIAL_SEM};
use crate::model::{AgeBand, Band, Mode, Response, MAX_CATEGORY, MIN_CATEGORY};
use crate::scaling::{scale_to_0_100, ScoreReport};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Completed,
}

/// One assessment.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    /// Opaque caller-supplied user id.
    pub user_id: String,
    pub age_band: AgeBand,
    pub mode: Mode,
    pub theta: f64,
    pub sem: f64,
    /// Presented item ids, in presentation order. Never contains duplicates.
    asked: Vec<String>,
    /// Item ids with a recorded response.
    responded: HashSet<String>,
    /// Response log in arrival order.
    responses: Vec<Response>,
    completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Result of an accepted response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseOutcome {
    /// Number of responses recorded so far.
    pub asked_count: usize,
    pub theta: f64,
    pub sem: f64,
    pub completed: bool,
}

impl Session {
    pub fn new(user_id: impl Into<String>, age_band: AgeBand, mode: Mode) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            age_band,
            mode,
            theta: 0.0,
            sem: INITIAL_SEM,
            asked: Vec::new(),
            responded: HashSet::new(),
            responses: Vec::new(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.completed {
            SessionState::Completed
        } else {
            SessionState::Active
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// Snapshot of presented ids for the selector.
    pub fn asked_set(&self) -> HashSet<&str> {
        self.asked.iter().map(String::as_str).collect()
    }

    /// Enter the terminal state. Idempotent.
    pub fn complete(&mut self) {
        self.completed = true;
    }

    /// Record that an item was handed to the client.
    pub fn record_presented(&mut self, item_id: &str) -> Result<(), AssessmentError> {
        if self.completed {
            return Err(AssessmentError::InvalidState(self.id.clone()));
        }
        if !self.asked.iter().any(|id| id == item_id) {
            self.asked.push(item_id.to_string());
        }
        Ok(())
    }

    /// Validate and record a response, then refresh theta, sem and completion.
    ///
    /// All checks run before any mutation, so a rejected response leaves the
    /// session untouched.
    pub fn accept_response(
        &mut self,
        response: Response,
        max_items: usize,
        sem_stop_threshold: f64,
    ) -> Result<ResponseOutcome, AssessmentError> {
        validate_category(i64::from(response.category))?;
        if self.completed {
            return Err(AssessmentError::InvalidState(self.id.clone()));
        }
        if !self.asked.iter().any(|id| *id == response.item_id) {
            return Err(AssessmentError::ItemNotPresented(response.item_id));
        }
        if self.responded.contains(&response.item_id) {
            return Err(AssessmentError::DuplicateResponse(response.item_id));
        }

        self.responded.insert(response.item_id.clone());
        self.responses.push(response);

        let count = self.responses.len();
        self.theta = estimate_theta(&self.responses);
        self.sem = sem_after(count);
        if count >= max_items || self.sem <= sem_stop_threshold {
            self.completed = true;
        }

        Ok(ResponseOutcome {
            asked_count: count,
            theta: self.theta,
            sem: self.sem,
            completed: self.completed,
        })
    }

    /// Score report from the current theta; provisional while active.
    pub fn report(&self) -> ScoreReport {
        let scaled_score = scale_to_0_100(self.theta);
        ScoreReport {
            assessment_id: self.id.clone(),
            user_id: self.user_id.clone(),
            mode: self.mode,
            scaled_score,
            band: Band::from_score(scaled_score),
            sem: self.sem,
            asked: self.asked.clone(),
            completed: self.completed,
        }
    }
}

/// Reject categories outside `0..=4`, returning the accepted value.
pub fn validate_category(category: i64) -> Result<u8, AssessmentError> {
    if !(i64::from(MIN_CATEGORY)..=i64::from(MAX_CATEGORY)).contains(&category) {
        return Err(AssessmentError::Validation(format!(
            "category must be between {MIN_CATEGORY} and {MAX_CATEGORY}, got {category}"
        )));
    }
    Ok(category as u8)
}
