//! Shared application state for the confivue server

use std::sync::Arc;

use chrono::{DateTime, Utc};
use confivue_core::selector::SeededRandom;
use confivue_core::traits::RandomSource;
use confivue_core::{AssessmentEngine, Catalog, EngineConfig, InMemorySessionStore};

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Assessment engine owning the catalog and session store
    pub engine: Arc<AssessmentEngine>,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create state over a catalog with an in-memory session store
    pub fn new(catalog: Catalog, config: EngineConfig, seed: Option<u64>) -> Self {
        let rng: Arc<dyn RandomSource> = match seed {
            Some(seed) => Arc::new(SeededRandom::from_seed(seed)),
            None => Arc::new(SeededRandom::from_entropy()),
        };
        let engine = AssessmentEngine::new(
            Arc::new(catalog),
            Arc::new(InMemorySessionStore::new()),
            rng,
            config,
        );
        Self::with_engine(Arc::new(engine))
    }

    /// Create AppState around an existing engine (for testing)
    pub fn with_engine(engine: Arc<AssessmentEngine>) -> Self {
        Self {
            engine,
            started_at: Utc::now(),
        }
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_new() {
        let state = AppState::new(Catalog::default(), EngineConfig::default(), Some(1));
        assert!(state.uptime_seconds() >= 0);
        assert!(state.engine.catalog().is_empty());
    }
}
