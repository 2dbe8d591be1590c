use crate::catalog::{ModelDescriptor, ProviderId};
use crate::config::Settings;
use crate::error::CatalogError;
use crate::models::anthropic::AnthropicModels;
use crate::models::classify::sort_models_by_free_status;
use crate::models::google::GoogleModels;
use crate::models::http;
use crate::models::huggingface::HuggingFaceModels;
use crate::models::openai::OpenAIModels;
use crate::models::openrouter::OpenRouterModels;
use crate::models::traits::ModelSource;

/// Single entry point for model lookups: dispatches to the provider adapter,
/// then classifies and sorts the result.
///
/// Holds no mutable state, so one instance can serve concurrent lookups.
pub struct ModelCatalog {
    openai: OpenAIModels,
    google: GoogleModels,
    anthropic: AnthropicModels,
    huggingface: HuggingFaceModels,
    openrouter: OpenRouterModels,
}

impl ModelCatalog {
    /// Catalog against the public provider endpoints with default settings.
    pub fn new() -> Result<Self, CatalogError> {
        Self::from_settings(&Settings::default())
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, CatalogError> {
        let client = http::build_client(settings.catalog.request_timeout())?;
        Ok(Self::with_client(client, settings))
    }

    pub fn with_client(client: reqwest::Client, settings: &Settings) -> Self {
        let endpoints = &settings.endpoints;
        let catalog = &settings.catalog;

        Self {
            openai: OpenAIModels::new(client.clone()).with_base_url(&endpoints.openai),
            google: GoogleModels::new(client.clone())
                .with_base_url(&endpoints.google)
                .with_fallback(catalog.google_fallback),
            anthropic: AnthropicModels::new(client.clone()).with_base_url(&endpoints.anthropic),
            huggingface: HuggingFaceModels::new(client.clone())
                .with_base_url(&endpoints.huggingface)
                .with_page_size(catalog.huggingface_page_size),
            openrouter: OpenRouterModels::new(client)
                .with_base_url(&endpoints.openrouter)
                .with_multimodal_threshold(catalog.openrouter_multimodal_threshold),
        }
    }

    fn source(&self, provider: ProviderId) -> Option<&dyn ModelSource> {
        match provider {
            ProviderId::OpenAI => Some(&self.openai),
            ProviderId::Google => Some(&self.google),
            ProviderId::Anthropic => Some(&self.anthropic),
            ProviderId::HuggingFace => Some(&self.huggingface),
            ProviderId::OpenRouter => Some(&self.openrouter),
            ProviderId::Custom => None,
        }
    }

    /// Fetch, classify and sort the models for `provider_id`.
    ///
    /// `custom` and unrecognized ids return an empty list without touching
    /// the network. Adapter failures propagate unchanged.
    pub async fn fetch_models_for_provider(
        &self,
        provider_id: &str,
        credential: &str,
        base_url: Option<&str>,
    ) -> Result<Vec<ModelDescriptor>, CatalogError> {
        let Some(provider) = ProviderId::from_key(provider_id) else {
            tracing::debug!("Unknown provider '{}', nothing to list", provider_id);
            return Ok(Vec::new());
        };
        let Some(source) = self.source(provider) else {
            return Ok(Vec::new());
        };

        let base_url = if provider.accepts_base_url() { base_url } else { None };
        let models = source.list_models(credential, base_url).await?;
        Ok(sort_models_by_free_status(provider_id, &models))
    }
}

/// Convenience wrapper using a default [`ModelCatalog`].
pub async fn fetch_models_for_provider(
    provider_id: &str,
    credential: &str,
    base_url: Option<&str>,
) -> Result<Vec<ModelDescriptor>, CatalogError> {
    ModelCatalog::new()?
        .fetch_models_for_provider(provider_id, credential, base_url)
        .await
}
