use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::ProviderId;
use crate::constants::{endpoints, env, huggingface, openrouter, paths};
use crate::error::CatalogError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub endpoints: EndpointSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub api_keys: ApiKeySettings,
}

/// Base URLs for each provider. Overridable for proxies and local mocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    pub openai: String,
    pub google: String,
    pub anthropic: String,
    pub huggingface: String,
    pub openrouter: String,
    /// Collection URL for `{model}:generateContent` when testing a Gemini model.
    pub google_generate: String,
    /// Inference URL a Hugging Face model id is appended to when testing it.
    pub huggingface_inference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Context length above which OpenRouter models count as multi-modal.
    pub openrouter_multimodal_threshold: u64,
    /// Serve the built-in Gemini list when the Google lookup fails.
    pub google_fallback: bool,
    pub huggingface_page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// Names of the environment variables holding each provider's key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeySettings {
    pub openai: String,
    pub google: String,
    pub anthropic: String,
    pub huggingface: String,
    pub openrouter: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            openai: endpoints::OPENAI_BASE_URL.to_string(),
            google: endpoints::GOOGLE_MODELS_URL.to_string(),
            anthropic: endpoints::ANTHROPIC_BASE_URL.to_string(),
            huggingface: endpoints::HUGGINGFACE_MODELS_URL.to_string(),
            openrouter: endpoints::OPENROUTER_BASE_URL.to_string(),
            google_generate: endpoints::GOOGLE_GENERATE_URL.to_string(),
            huggingface_inference: endpoints::HUGGINGFACE_INFERENCE_URL.to_string(),
        }
    }
}

impl EndpointSettings {
    /// Point every provider at the same host. Handy for a single mock server.
    pub fn all(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            openai: base.to_string(),
            google: format!("{base}/v1beta/models"),
            anthropic: base.to_string(),
            huggingface: format!("{base}/api/models"),
            openrouter: base.to_string(),
            google_generate: format!("{base}/v1/models"),
            huggingface_inference: format!("{base}/models"),
        }
    }

    pub fn for_provider(&self, id: ProviderId) -> &str {
        match id {
            ProviderId::OpenAI => &self.openai,
            ProviderId::Google => &self.google,
            ProviderId::Anthropic => &self.anthropic,
            ProviderId::HuggingFace => &self.huggingface,
            ProviderId::OpenRouter => &self.openrouter,
            ProviderId::Custom => "",
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            openrouter_multimodal_threshold: openrouter::MULTIMODAL_CONTEXT_THRESHOLD,
            google_fallback: true,
            huggingface_page_size: huggingface::PAGE_SIZE,
            request_timeout_secs: None,
        }
    }
}

impl CatalogSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ApiKeySettings {
    fn default() -> Self {
        Self {
            openai: env::OPENAI_API_KEY.to_string(),
            google: env::GOOGLE_API_KEY.to_string(),
            anthropic: env::ANTHROPIC_API_KEY.to_string(),
            huggingface: env::HUGGINGFACE_API_KEY.to_string(),
            openrouter: env::OPENROUTER_API_KEY.to_string(),
        }
    }
}

impl ApiKeySettings {
    pub fn env_var(&self, id: ProviderId) -> &str {
        match id {
            ProviderId::OpenAI => &self.openai,
            ProviderId::Google => &self.google,
            ProviderId::Anthropic => &self.anthropic,
            ProviderId::HuggingFace => &self.huggingface,
            ProviderId::OpenRouter => &self.openrouter,
            ProviderId::Custom => "",
        }
    }

    /// Read the provider's key from its configured environment variable.
    pub fn api_key(&self, id: ProviderId) -> Option<String> {
        let var = self.env_var(id);
        if var.is_empty() {
            return None;
        }
        std::env::var(var).ok().filter(|k| !k.is_empty())
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(paths::CONFIG_DIR)
            .join(paths::CONFIG_FILE)
    }

    /// Load from the default location, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(settings) => return settings,
                Err(e) => tracing::warn!("Ignoring invalid config {}: {}", config_path.display(), e),
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), CatalogError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), CatalogError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CatalogError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
