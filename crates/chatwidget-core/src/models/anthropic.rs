use crate::catalog::{Modality, ModelDescriptor, ProviderId};
use crate::constants::{anthropic, endpoints};
use crate::error::CatalogError;
use crate::models::http;
use crate::models::traits::ModelSource;

/// Anthropic has no listing endpoint. The key is checked with a tiny
/// completion and, if accepted, the known Claude models are returned.
pub struct AnthropicModels {
    client: reqwest::Client,
    base_url: String,
}

impl AnthropicModels {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: endpoints::ANTHROPIC_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn key_check_body() -> serde_json::Value {
        serde_json::json!({
            "model": anthropic::KEY_CHECK_MODEL,
            "max_tokens": anthropic::KEY_CHECK_MAX_TOKENS,
            "messages": [{ "role": "user", "content": anthropic::KEY_CHECK_PROMPT }],
        })
    }
}

pub fn known_models() -> Vec<ModelDescriptor> {
    anthropic::KNOWN_MODELS
        .iter()
        .map(|(id, name)| ModelDescriptor::new(*id, *name, Modality::Text))
        .collect()
}

#[async_trait::async_trait]
impl ModelSource for AnthropicModels {
    fn provider(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    async fn list_models(
        &self,
        credential: &str,
        _base_url: Option<&str>,
    ) -> Result<Vec<ModelDescriptor>, CatalogError> {
        http::require_credential(self.provider(), credential)?;

        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));
        tracing::debug!("Checking Anthropic key against {}", url);

        let request = self
            .client
            .post(&url)
            .header("x-api-key", credential)
            .header("anthropic-version", anthropic::API_VERSION)
            .header("content-type", "application/json")
            .json(&Self::key_check_body());
        let response = http::send(self.provider(), request).await?;
        http::ensure_success(self.provider(), response).await?;

        Ok(known_models())
    }
}
