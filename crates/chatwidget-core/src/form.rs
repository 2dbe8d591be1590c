//! Contract between the model lookup and the form that consumes it.
//!
//! The form decides when a lookup is worth issuing, distinguishes an empty
//! catalog from a failed lookup, and fills in name and modality when a model
//! is picked without clobbering a name the user typed themselves.

use crate::catalog::{Modality, ModelDescriptor};
use crate::constants::form;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Outcome of one lookup as the form sees it.
#[derive(Debug)]
pub enum LookupOutcome {
    Found(Vec<ModelDescriptor>),
    /// The provider answered but had nothing to offer.
    NoModels,
    Failed(CatalogError),
}

impl LookupOutcome {
    pub fn from_result(result: Result<Vec<ModelDescriptor>, CatalogError>) -> Self {
        match result {
            Ok(models) if models.is_empty() => Self::NoModels,
            Ok(models) => Self::Found(models),
            Err(e) => Self::Failed(e),
        }
    }

    /// Models to offer for selection; empty unless the lookup found some.
    pub fn models(&self) -> &[ModelDescriptor] {
        match self {
            Self::Found(models) => models,
            _ => &[],
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Whether the form has enough input to issue a lookup.
pub fn should_fetch(provider_id: &str, credential: &str) -> bool {
    !provider_id.is_empty()
        && provider_id != "custom"
        && credential.chars().count() >= form::MIN_CREDENTIAL_LEN
}

/// A single violated form rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Values of the model configuration form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelForm {
    pub name: String,
    pub provider: String,
    pub model_id: String,
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
    pub active: bool,
    #[serde(rename = "type")]
    pub modality: Modality,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip)]
    name_customized: bool,
}

impl Default for ModelForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            provider: String::new(),
            model_id: String::new(),
            api_key: String::new(),
            base_url: None,
            active: true,
            modality: Modality::Text,
            temperature: form::DEFAULT_TEMPERATURE,
            max_tokens: form::DEFAULT_MAX_TOKENS,
            name_customized: false,
        }
    }
}

impl ModelForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a name typed by the user. Later selections leave it alone.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.name_customized = !self.name.is_empty();
    }

    pub fn name_customized(&self) -> bool {
        self.name_customized
    }

    pub fn should_fetch(&self) -> bool {
        should_fetch(&self.provider, &self.api_key)
    }

    /// Base URL to forward to the lookup, if one was entered.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|u| !u.trim().is_empty())
    }

    /// The descriptor matching the selected model id, if it was listed.
    pub fn find_selection<'a>(&self, models: &'a [ModelDescriptor]) -> Option<&'a ModelDescriptor> {
        models.iter().find(|m| m.id == self.model_id)
    }

    /// Select a model: copies its id and modality, and its display name
    /// unless the user already customized the name.
    pub fn apply_selection(&mut self, model: &ModelDescriptor) {
        self.model_id = model.id.clone();
        self.modality = model.modality;
        if !self.name_customized {
            self.name = model.display_name.clone();
        }
    }

    /// Check every rule and return all violations.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.name.trim().chars().count() < form::MIN_NAME_LEN {
            errors.push(FieldError::new("name", "Model name is required"));
        }
        if self.provider.trim().is_empty() {
            errors.push(FieldError::new("provider", "Provider is required"));
        }
        if self.model_id.trim().chars().count() < form::MIN_MODEL_ID_LEN {
            errors.push(FieldError::new("modelId", "Model ID is required"));
        }
        if self.api_key.is_empty() {
            errors.push(FieldError::new("apiKey", "API Key is required"));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            errors.push(FieldError::new("temperature", "Temperature must be between 0 and 1"));
        }
        if self.max_tokens < 1 {
            errors.push(FieldError::new("maxTokens", "Max tokens must be at least 1"));
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
