use crate::constants::{endpoints, env};
use serde::{Deserialize, Serialize};

/// Identifies an upstream model provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAI,
    Google,
    Anthropic,
    HuggingFace,
    OpenRouter,
    /// User types the model id by hand; never looked up remotely.
    Custom,
}

impl ProviderId {
    /// Stable dispatch key, e.g. `"huggingface"`.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Google => "google",
            Self::Anthropic => "anthropic",
            Self::HuggingFace => "huggingface",
            Self::OpenRouter => "openrouter",
            Self::Custom => "custom",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Google => "Google",
            Self::Anthropic => "Anthropic",
            Self::HuggingFace => "Hugging Face",
            Self::OpenRouter => "OpenRouter",
            Self::Custom => "Custom Provider",
        }
    }

    /// Resolve a dispatch key. Unknown keys yield `None` rather than an error
    /// so callers can treat them as "nothing to list".
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "openai" => Some(Self::OpenAI),
            "google" => Some(Self::Google),
            "anthropic" => Some(Self::Anthropic),
            "huggingface" => Some(Self::HuggingFace),
            "openrouter" => Some(Self::OpenRouter),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom)
    }

    /// Only these providers honor a caller-supplied base URL.
    pub fn accepts_base_url(&self) -> bool {
        matches!(self, Self::Google | Self::HuggingFace)
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAI => endpoints::OPENAI_BASE_URL,
            Self::Google => endpoints::GOOGLE_MODELS_URL,
            Self::Anthropic => endpoints::ANTHROPIC_BASE_URL,
            Self::HuggingFace => endpoints::HUGGINGFACE_MODELS_URL,
            Self::OpenRouter => endpoints::OPENROUTER_BASE_URL,
            Self::Custom => "",
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            Self::OpenAI => env::OPENAI_API_KEY,
            Self::Google => env::GOOGLE_API_KEY,
            Self::Anthropic => env::ANTHROPIC_API_KEY,
            Self::HuggingFace => env::HUGGINGFACE_API_KEY,
            Self::OpenRouter => env::OPENROUTER_API_KEY,
            Self::Custom => "",
        }
    }

    pub fn all() -> &'static [ProviderId] {
        &[
            Self::OpenAI,
            Self::Google,
            Self::Anthropic,
            Self::HuggingFace,
            Self::OpenRouter,
            Self::Custom,
        ]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Static catalog entry shown in the provider picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
}

impl ProviderDescriptor {
    pub const fn of(provider: ProviderId) -> Self {
        Self {
            id: provider.key(),
            display_name: provider.name(),
        }
    }
}

pub const PROVIDERS: [ProviderDescriptor; 6] = [
    ProviderDescriptor::of(ProviderId::OpenAI),
    ProviderDescriptor::of(ProviderId::Google),
    ProviderDescriptor::of(ProviderId::Anthropic),
    ProviderDescriptor::of(ProviderId::HuggingFace),
    ProviderDescriptor::of(ProviderId::OpenRouter),
    ProviderDescriptor::of(ProviderId::Custom),
];

/// The immutable provider catalog, in display order.
pub fn providers() -> &'static [ProviderDescriptor] {
    &PROVIDERS
}

/// Look up the display name for a dispatch key.
pub fn provider_name(id: &str) -> Option<&'static str> {
    PROVIDERS.iter().find(|p| p.id == id).map(|p| p.display_name)
}

/// Coarse capability class of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Modality {
    #[default]
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "multi-modal")]
    MultiModal,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::MultiModal => "multi-modal",
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable model, normalized across providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub modality: Modality,
    /// Set by classification only; adapters always leave it `false`.
    #[serde(default)]
    pub is_free: bool,
}

impl ModelDescriptor {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, modality: Modality) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            modality,
            is_free: false,
        }
    }

    /// Descriptor whose display name is the id itself.
    pub fn from_id(id: impl Into<String>, modality: Modality) -> Self {
        let id = id.into();
        Self::new(id.clone(), id, modality)
    }
}

/// Enforce the per-adapter invariants: non-empty ids, unique within the list.
/// The first occurrence of a duplicated id wins.
pub fn dedup_by_id(models: Vec<ModelDescriptor>) -> Vec<ModelDescriptor> {
    let mut seen = std::collections::HashSet::new();
    models
        .into_iter()
        .filter(|m| !m.id.is_empty() && seen.insert(m.id.clone()))
        .collect()
}
