use crate::catalog::{ModelDescriptor, ProviderId};
use crate::constants::{google, openai, openrouter};

/// Free-tier heuristic over the lowercased model id. Used for ordering only.
pub fn is_free(provider: Option<ProviderId>, model_id: &str) -> bool {
    let id = model_id.to_lowercase();
    match provider {
        Some(ProviderId::OpenAI) => openai::FREE_MARKERS.iter().any(|m| id.contains(m)),
        Some(ProviderId::Google) => id.contains(google::FREE_MARKER),
        Some(ProviderId::HuggingFace) => true,
        Some(ProviderId::OpenRouter) => id.contains(openrouter::FREE_MARKER),
        Some(ProviderId::Anthropic) | Some(ProviderId::Custom) | None => false,
    }
}

/// Tag each model's `is_free` flag and order free models first, then by
/// display name. The input is left untouched.
pub fn sort_models_by_free_status(provider_id: &str, models: &[ModelDescriptor]) -> Vec<ModelDescriptor> {
    let provider = ProviderId::from_key(provider_id);

    let mut tagged: Vec<ModelDescriptor> = models
        .iter()
        .map(|m| ModelDescriptor {
            is_free: is_free(provider, &m.id),
            ..m.clone()
        })
        .collect();

    // Stable, so equal names keep their upstream order.
    tagged.sort_by(|a, b| {
        b.is_free
            .cmp(&a.is_free)
            .then_with(|| a.display_name.cmp(&b.display_name))
    });
    tagged
}
