use crate::catalog::{dedup_by_id, Modality, ModelDescriptor, ProviderId};
use crate::constants::{endpoints, google};
use crate::error::CatalogError;
use crate::models::http;
use crate::models::traits::ModelSource;
use serde::Deserialize;

/// Lists Gemini models. Unlike the other adapters this one can degrade to a
/// built-in list instead of failing; see [`GoogleModels::with_fallback`].
pub struct GoogleModels {
    client: reqwest::Client,
    base_url: String,
    fallback: bool,
}

impl GoogleModels {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: endpoints::GOOGLE_MODELS_URL.to_string(),
            fallback: true,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// When enabled, any lookup failure yields [`fallback_models`] instead of
    /// an error.
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback = enabled;
        self
    }

    async fn fetch(
        &self,
        credential: &str,
        base_url: Option<&str>,
    ) -> Result<Vec<ModelDescriptor>, CatalogError> {
        http::require_credential(self.provider(), credential)?;

        let url = http::resolve_base_url(base_url, &self.base_url);
        tracing::debug!("Fetching Google models from {}", url);

        let request = self.client.get(url).query(&[("key", credential)]);
        let response = http::send(self.provider(), request).await?;
        let body: GoogleModelsResponse = http::read_json(self.provider(), response).await?;
        Ok(normalize(body))
    }
}

#[derive(Debug, Deserialize)]
pub struct GoogleModelsResponse {
    pub models: Vec<GoogleModelEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleModelEntry {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

pub fn normalize(body: GoogleModelsResponse) -> Vec<ModelDescriptor> {
    let models = body
        .models
        .into_iter()
        .map(|m| {
            let modality = if m.name.contains("vision") {
                Modality::MultiModal
            } else {
                Modality::Text
            };
            let display_name = m
                .display_name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| m.name.clone());
            ModelDescriptor::new(m.name, display_name, modality)
        })
        .collect();
    dedup_by_id(models)
}

/// Well-known Gemini models served when the live lookup fails.
pub fn fallback_models() -> Vec<ModelDescriptor> {
    google::FALLBACK_MODELS
        .iter()
        .map(|(id, name, multi_modal)| {
            let modality = if *multi_modal {
                Modality::MultiModal
            } else {
                Modality::Text
            };
            ModelDescriptor::new(*id, *name, modality)
        })
        .collect()
}

#[async_trait::async_trait]
impl ModelSource for GoogleModels {
    fn provider(&self) -> ProviderId {
        ProviderId::Google
    }

    async fn list_models(
        &self,
        credential: &str,
        base_url: Option<&str>,
    ) -> Result<Vec<ModelDescriptor>, CatalogError> {
        match self.fetch(credential, base_url).await {
            Ok(models) => {
                tracing::info!("Google returned {} models", models.len());
                Ok(models)
            }
            Err(e) if self.fallback => {
                tracing::warn!("Google model lookup failed, serving built-in list: {}", e);
                Ok(fallback_models())
            }
            Err(e) => Err(e),
        }
    }
}
