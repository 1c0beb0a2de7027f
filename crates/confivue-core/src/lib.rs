//! confivue-core — Item selection, ability estimation and the assessment engine.
//!
//! This crate defines the data model, the item catalog, the session state
//! machine and the scoring logic that the API server and CLI build on.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod model;
pub mod scaling;
pub mod selector;
pub mod session;
pub mod store;
pub mod traits;

pub use catalog::{load_catalog, Catalog};
pub use engine::{AssessmentEngine, EngineConfig};
pub use error::{AssessmentError, CatalogError};
pub use model::{AgeBand, Band, Item, ItemFormat, Mode, Response};
pub use store::InMemorySessionStore;
