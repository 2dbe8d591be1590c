pub mod error;
pub mod constants;
pub mod catalog;
pub mod models;
pub mod form;
pub mod config;

// Re-export key types
pub use error::CatalogError;
pub use catalog::{providers, Modality, ModelDescriptor, ProviderDescriptor, ProviderId, PROVIDERS};
pub use models::{
    fetch_models_for_provider, sort_models_by_free_status, test_model, ModelCatalog, ModelSource,
    ModelTester,
};
pub use form::{should_fetch, LookupOutcome, ModelForm};
pub use config::Settings;
