//! confivue-server — HTTP API for confivue adaptive assessments.
//!
//! Exposes the assessment engine over JSON endpoints: create an assessment,
//! fetch items, submit responses and read the score report.

pub mod config;
mod error;
pub mod http;
mod state;

use std::sync::Arc;

use tokio::net::TcpListener;

use confivue_core::load_catalog;

pub use config::{load_config_from, ServerConfig};
pub use error::{ApiError, ErrorResponse, ServerError};
pub use http::create_router;
pub use state::AppState;

/// The confivue API server
pub struct ConfivueServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl ConfivueServer {
    /// Load the catalog named by the config and build the server.
    ///
    /// A catalog that cannot be loaded is fatal.
    pub fn from_config(config: ServerConfig) -> Result<Self, ServerError> {
        let catalog = load_catalog(&config.catalog_path)?;
        for warning in confivue_core::catalog::validate_catalog(&catalog, config.max_items) {
            match &warning.item_id {
                Some(id) => tracing::warn!("catalog item {id}: {}", warning.message),
                None => tracing::warn!("catalog: {}", warning.message),
            }
        }
        let state = AppState::new(catalog, config.engine_config(), config.seed);
        Ok(Self::with_state(config, Arc::new(state)))
    }

    /// Create a server with custom state (for testing)
    pub fn with_state(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Run the server, binding to the configured address
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::Bind {
                addr: addr.clone(),
                source: e,
            })?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        let local = listener
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| self.config.addr());
        tracing::info!(
            "confivue server listening on {} ({} catalog items)",
            local,
            self.state.engine.catalog().len()
        );

        let router = create_router(self.state);
        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(())
    }
}
