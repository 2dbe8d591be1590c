use crate::catalog::{ModelDescriptor, ProviderId};
use crate::error::CatalogError;

/// A provider adapter: one outbound request, normalized into descriptors.
///
/// Implementations never set `is_free`; that is left to classification.
#[async_trait::async_trait]
pub trait ModelSource: Send + Sync {
    fn provider(&self) -> ProviderId;

    /// Fetch the provider's catalog. `base_url` is ignored by providers whose
    /// endpoint is not user-configurable.
    async fn list_models(
        &self,
        credential: &str,
        base_url: Option<&str>,
    ) -> Result<Vec<ModelDescriptor>, CatalogError>;
}
