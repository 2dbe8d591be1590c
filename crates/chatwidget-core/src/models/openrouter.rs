use crate::catalog::{dedup_by_id, Modality, ModelDescriptor, ProviderId};
use crate::constants::{endpoints, openrouter};
use crate::error::CatalogError;
use crate::models::http;
use crate::models::traits::ModelSource;
use serde::Deserialize;

pub struct OpenRouterModels {
    client: reqwest::Client,
    base_url: String,
    multimodal_threshold: u64,
}

impl OpenRouterModels {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: endpoints::OPENROUTER_BASE_URL.to_string(),
            multimodal_threshold: openrouter::MULTIMODAL_CONTEXT_THRESHOLD,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_multimodal_threshold(mut self, threshold: u64) -> Self {
        self.multimodal_threshold = threshold;
        self
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenRouterModelsResponse {
    pub data: Vec<OpenRouterModelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OpenRouterModelEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub context_length: Option<f64>,
}

/// Context length is the only signal used for modality here; it is a rough
/// proxy, not a capability flag.
pub fn infer_modality(context_length: Option<f64>, threshold: u64) -> Modality {
    match context_length {
        Some(len) if len > threshold as f64 => Modality::MultiModal,
        _ => Modality::Text,
    }
}

pub fn normalize(body: OpenRouterModelsResponse, threshold: u64) -> Vec<ModelDescriptor> {
    let models = body
        .data
        .into_iter()
        .map(|m| {
            let modality = infer_modality(m.context_length, threshold);
            let display_name = m
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| m.id.clone());
            ModelDescriptor::new(m.id, display_name, modality)
        })
        .collect();
    dedup_by_id(models)
}

#[async_trait::async_trait]
impl ModelSource for OpenRouterModels {
    fn provider(&self) -> ProviderId {
        ProviderId::OpenRouter
    }

    async fn list_models(
        &self,
        credential: &str,
        _base_url: Option<&str>,
    ) -> Result<Vec<ModelDescriptor>, CatalogError> {
        http::require_credential(self.provider(), credential)?;

        let url = format!("{}/api/v1/models", self.base_url.trim_end_matches('/'));
        tracing::debug!("Fetching OpenRouter models from {}", url);

        let request = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {credential}"))
            .header("Content-Type", "application/json");
        let response = http::send(self.provider(), request).await?;
        let body: OpenRouterModelsResponse = http::read_json(self.provider(), response).await?;

        let models = normalize(body, self.multimodal_threshold);
        tracing::info!("OpenRouter returned {} models", models.len());
        Ok(models)
    }
}
