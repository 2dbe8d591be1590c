use chatwidget_core::catalog::{provider_name, ProviderDescriptor};
use chatwidget_core::{CatalogError, LookupOutcome, ModelDescriptor};

pub const NO_MODELS_MESSAGE: &str = "No models found. Please check your API key and try again.";
pub const LOOKUP_FAILED_MESSAGE: &str =
    "Failed to fetch models. Please verify your API key and provider settings.";
pub const KEY_TOO_SHORT_MESSAGE: &str = "API key looks incomplete; nothing was fetched.";
pub const TEST_FAILED_MESSAGE: &str =
    "Failed to test model. Please check your API key and model configuration.";
pub const CUSTOM_PROVIDER_MESSAGE: &str =
    "Custom provider: enter the model identifier directly, there is nothing to list.";

/// Render the provider catalog, one `id  name` row per provider.
pub fn render_providers(providers: &[ProviderDescriptor]) -> String {
    let width = providers.iter().map(|p| p.id.len()).max().unwrap_or(0);
    providers
        .iter()
        .map(|p| format!("{:<width$}  {}", p.id, p.display_name, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render models as a table. Free models are marked with `*`.
pub fn render_models(models: &[ModelDescriptor]) -> String {
    let id_width = models.iter().map(|m| m.id.len()).max().unwrap_or(0).max(2);
    let name_width = models
        .iter()
        .map(|m| m.display_name.len())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut lines = vec![format!(
        "  {:<id_width$}  {:<name_width$}  {}",
        "ID", "NAME", "MODALITY"
    )];
    for m in models {
        let marker = if m.is_free { '*' } else { ' ' };
        lines.push(format!(
            "{} {:<id_width$}  {:<name_width$}  {}",
            marker, m.id, m.display_name, m.modality
        ));
    }
    lines.join("\n")
}

pub fn render_json(models: &[ModelDescriptor]) -> Result<String, CatalogError> {
    Ok(serde_json::to_string_pretty(models)?)
}

/// The user-facing summary line for a lookup.
pub fn describe_outcome(provider_id: &str, outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::Found(models) => {
            let name = provider_name(provider_id).unwrap_or(provider_id);
            format!("Found {} models for {}", models.len(), name)
        }
        LookupOutcome::NoModels => NO_MODELS_MESSAGE.to_string(),
        LookupOutcome::Failed(e) => format!("{LOOKUP_FAILED_MESSAGE}\n  cause: {e}"),
    }
}

/// The user-facing message for a failed model test, including the reason the
/// provider gave when it sent one.
pub fn describe_test_failure(error: &CatalogError) -> String {
    match (error, error.upstream_message()) {
        (CatalogError::InvalidRequest(message), _) => message.clone(),
        (_, Some(reason)) => format!("{TEST_FAILED_MESSAGE}\n  cause: {error}\n  reason: {reason}"),
        (_, None) => format!("{TEST_FAILED_MESSAGE}\n  cause: {error}"),
    }
}
