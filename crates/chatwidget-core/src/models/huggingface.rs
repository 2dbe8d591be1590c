use crate::catalog::{dedup_by_id, Modality, ModelDescriptor, ProviderId};
use crate::constants::{endpoints, huggingface};
use crate::error::CatalogError;
use crate::models::http;
use crate::models::traits::ModelSource;
use serde::Deserialize;

/// Most-downloaded text-generation models from the Hugging Face hub.
pub struct HuggingFaceModels {
    client: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl HuggingFaceModels {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: endpoints::HUGGINGFACE_MODELS_URL.to_string(),
            page_size: huggingface::PAGE_SIZE,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

/// Hub entries carry both `id` and the older `modelId`; `modelId` is only
/// consulted when `id` is missing.
#[derive(Debug, Deserialize)]
pub struct HuggingFaceModelEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "modelId")]
    pub model_id: Option<String>,
}

impl HuggingFaceModelEntry {
    fn into_id(self) -> String {
        if self.id.is_empty() {
            self.model_id.unwrap_or_default()
        } else {
            self.id
        }
    }
}

pub fn normalize(body: Vec<HuggingFaceModelEntry>) -> Vec<ModelDescriptor> {
    let models = body
        .into_iter()
        .map(|m| ModelDescriptor::from_id(m.into_id(), Modality::Text))
        .collect();
    dedup_by_id(models)
}

#[async_trait::async_trait]
impl ModelSource for HuggingFaceModels {
    fn provider(&self) -> ProviderId {
        ProviderId::HuggingFace
    }

    async fn list_models(
        &self,
        credential: &str,
        base_url: Option<&str>,
    ) -> Result<Vec<ModelDescriptor>, CatalogError> {
        http::require_credential(self.provider(), credential)?;

        let url = http::resolve_base_url(base_url, &self.base_url);
        let limit = self.page_size.to_string();
        tracing::debug!("Fetching Hugging Face models from {}", url);

        let request = self
            .client
            .get(url)
            .query(&[
                ("filter", huggingface::PIPELINE_FILTER),
                ("sort", huggingface::SORT_FIELD),
                ("direction", "-1"),
                ("limit", limit.as_str()),
            ])
            .header("Authorization", format!("Bearer {credential}"));
        let response = http::send(self.provider(), request).await?;
        let body: Vec<HuggingFaceModelEntry> = http::read_json(self.provider(), response).await?;

        let models = normalize(body);
        tracing::info!("Hugging Face returned {} models", models.len());
        Ok(models)
    }
}
