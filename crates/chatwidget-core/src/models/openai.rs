use crate::catalog::{dedup_by_id, Modality, ModelDescriptor, ProviderId};
use crate::constants::{endpoints, openai};
use crate::error::CatalogError;
use crate::models::http;
use crate::models::traits::ModelSource;
use serde::Deserialize;

/// Lists chat, image and speech models from the OpenAI `/v1/models` endpoint.
pub struct OpenAIModels {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAIModels {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: endpoints::OPENAI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenAIModelsResponse {
    pub data: Vec<OpenAIModelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIModelEntry {
    pub id: String,
}

/// Keep the product families we care about and infer modality from the id.
pub fn normalize(body: OpenAIModelsResponse) -> Vec<ModelDescriptor> {
    let models = body
        .data
        .into_iter()
        .filter(|m| {
            let id = m.id.to_lowercase();
            openai::FAMILY_FILTERS.iter().any(|f| id.contains(f))
        })
        .map(|m| {
            let modality = infer_modality(&m.id);
            ModelDescriptor::from_id(m.id, modality)
        })
        .collect();
    dedup_by_id(models)
}

pub fn infer_modality(id: &str) -> Modality {
    let lower = id.to_lowercase();
    if lower.contains("dall-e") {
        Modality::Image
    } else if lower.contains("vision") {
        Modality::MultiModal
    } else {
        Modality::Text
    }
}

#[async_trait::async_trait]
impl ModelSource for OpenAIModels {
    fn provider(&self) -> ProviderId {
        ProviderId::OpenAI
    }

    async fn list_models(
        &self,
        credential: &str,
        _base_url: Option<&str>,
    ) -> Result<Vec<ModelDescriptor>, CatalogError> {
        http::require_credential(self.provider(), credential)?;

        let url = format!("{}/v1/models", self.base_url.trim_end_matches('/'));
        tracing::debug!("Fetching OpenAI models from {}", url);

        let request = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {credential}"))
            .header("Content-Type", "application/json");
        let response = http::send(self.provider(), request).await?;
        let body: OpenAIModelsResponse = http::read_json(self.provider(), response).await?;

        let models = normalize(body);
        tracing::info!("OpenAI returned {} relevant models", models.len());
        Ok(models)
    }
}
