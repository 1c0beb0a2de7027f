//! Central assessment engine.
//!
//! Binds the catalog, the session repository and the random source, and runs
//! each session operation under that session's own lock.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::AssessmentError;
use crate::model::{AgeBand, Item, Mode, NextItem, Response};
use crate::scaling::ScoreReport;
use crate::selector::{select_next, Selection, DEFAULT_MAX_ITEMS};
use crate::session::{validate_category, ResponseOutcome, Session};
use crate::traits::{RandomSource, SessionRepository};

/// Default uncertainty at or below which a session stops.
pub const DEFAULT_SEM_STOP_THRESHOLD: f64 = 0.35;

/// Configuration for the assessment engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Items presented per session before it is exhausted.
    pub max_items: usize,
    /// Sessions complete once sem drops to this value.
    pub sem_stop_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            sem_stop_threshold: DEFAULT_SEM_STOP_THRESHOLD,
        }
    }
}

/// The assessment engine.
pub struct AssessmentEngine {
    catalog: Arc<Catalog>,
    store: Arc<dyn SessionRepository>,
    rng: Arc<dyn RandomSource>,
    config: EngineConfig,
}

impl AssessmentEngine {
    pub fn new(
        catalog: Arc<Catalog>,
        store: Arc<dyn SessionRepository>,
        rng: Arc<dyn RandomSource>,
        config: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            store,
            rng,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start a new assessment and return its id.
    pub async fn create_assessment(&self, user_id: &str, age_band: AgeBand, mode: Mode) -> String {
        let session = Session::new(user_id, age_band, mode);
        let id = session.id.clone();
        self.store.insert(session).await;
        tracing::info!(assessment_id = %id, %age_band, %mode, "assessment created");
        id
    }

    /// Select, record and return the next item.
    ///
    /// Returns the empty marker (and completes the session) once the pool is
    /// exhausted or the item cap is reached. Completed or unknown sessions
    /// fail with `NotFound`.
    pub async fn next_item(&self, assessment_id: &str) -> Result<NextItem, AssessmentError> {
        let mut session = self
            .store
            .checkout(assessment_id)
            .await
            .ok_or_else(|| AssessmentError::NotFound(assessment_id.to_string()))?;

        if session.is_completed() {
            tracing::warn!(assessment_id, "next item requested for completed assessment");
            return Err(AssessmentError::NotFound(assessment_id.to_string()));
        }

        let selection = {
            let asked = session.asked_set();
            select_next(
                &self.catalog,
                session.age_band,
                &asked,
                self.config.max_items,
                self.rng.as_ref(),
            )
        };

        match selection {
            Selection::Item(item) => {
                session.record_presented(&item.id)?;
                tracing::debug!(
                    assessment_id,
                    item_id = %item.id,
                    presented = session.asked().len(),
                    "item selected"
                );
                Ok(NextItem::from(item))
            }
            Selection::Exhausted => {
                session.complete();
                tracing::info!(
                    assessment_id,
                    presented = session.asked().len(),
                    "assessment completed: no more items"
                );
                Ok(NextItem::exhausted())
            }
        }
    }

    /// Record a response and refresh the session's estimates.
    pub async fn submit_response(
        &self,
        assessment_id: &str,
        response: Response,
    ) -> Result<ResponseOutcome, AssessmentError> {
        validate_category(i64::from(response.category))?;

        let mut session = self
            .store
            .checkout(assessment_id)
            .await
            .ok_or_else(|| AssessmentError::NotFound(assessment_id.to_string()))?;

        let item_id = response.item_id.clone();
        match session.accept_response(
            response,
            self.config.max_items,
            self.config.sem_stop_threshold,
        ) {
            Ok(outcome) => {
                tracing::debug!(
                    assessment_id,
                    %item_id,
                    asked_count = outcome.asked_count,
                    theta = outcome.theta,
                    sem = outcome.sem,
                    "response recorded"
                );
                if outcome.completed {
                    tracing::info!(
                        assessment_id,
                        responses = outcome.asked_count,
                        "assessment completed"
                    );
                }
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(assessment_id, %item_id, "response rejected: {e}");
                Err(e)
            }
        }
    }

    /// Score report for an assessment in any state.
    pub async fn report(&self, assessment_id: &str) -> Result<ScoreReport, AssessmentError> {
        let session = self
            .store
            .snapshot(assessment_id)
            .await
            .ok_or_else(|| AssessmentError::NotFound(assessment_id.to_string()))?;
        Ok(session.report())
    }

    /// Catalog items filtered by age band and (case-insensitive) domain.
    pub fn list_items(&self, age_band: Option<AgeBand>, domain: Option<&str>) -> Vec<Item> {
        self.catalog
            .filter(age_band, domain)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn session_count(&self) -> usize {
        self.store.count().await
    }
}
