use chatwidget_cli::commands::{
    describe_outcome, describe_test_failure, render_json, render_models, render_providers,
    LOOKUP_FAILED_MESSAGE, NO_MODELS_MESSAGE, TEST_FAILED_MESSAGE,
};
use chatwidget_core::{providers, CatalogError, LookupOutcome, Modality, ModelDescriptor, ProviderId};

fn sample_models() -> Vec<ModelDescriptor> {
    let mut free = ModelDescriptor::from_id("gpt-3.5-turbo", Modality::Text);
    free.is_free = true;
    vec![free, ModelDescriptor::from_id("dall-e-3", Modality::Image)]
}

// ========================================================================
// Rendering Tests (commands.rs)
// ========================================================================

#[test]
fn test_render_providers_lists_every_entry() {
    let output = render_providers(providers());
    let lines: Vec<_> = output.lines().collect();

    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("openai"));
    assert!(lines[3].contains("Hugging Face"));
    assert!(lines[5].contains("Custom Provider"));
}

#[test]
fn test_render_models_marks_free_rows() {
    let output = render_models(&sample_models());
    let lines: Vec<_> = output.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("MODALITY"));
    assert!(lines[1].starts_with("* gpt-3.5-turbo"));
    assert!(lines[1].ends_with("text"));
    assert!(lines[2].starts_with("  dall-e-3"));
    assert!(lines[2].ends_with("image"));
}

#[test]
fn test_render_json_uses_camel_case_fields() {
    let output = render_json(&sample_models()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value[0]["id"], "gpt-3.5-turbo");
    assert_eq!(value[0]["isFree"], true);
    assert_eq!(value[1]["modality"], "image");
    assert_eq!(value[1]["displayName"], "dall-e-3");
}

// ========================================================================
// Outcome Messages
// ========================================================================

#[test]
fn test_describe_found_uses_provider_name() {
    let outcome = LookupOutcome::Found(sample_models());
    assert_eq!(
        describe_outcome("huggingface", &outcome),
        "Found 2 models for Hugging Face"
    );
}

#[test]
fn test_describe_no_models_differs_from_failure() {
    let empty = describe_outcome("openai", &LookupOutcome::NoModels);
    let failed = describe_outcome(
        "openai",
        &LookupOutcome::Failed(CatalogError::rejected(ProviderId::OpenAI, 401, "")),
    );

    assert_eq!(empty, NO_MODELS_MESSAGE);
    assert!(failed.starts_with(LOOKUP_FAILED_MESSAGE));
    assert!(failed.contains("OpenAI API error: 401"));
    assert_ne!(empty, failed);
}

#[test]
fn test_describe_test_failure_includes_upstream_reason() {
    let err = CatalogError::rejected(
        ProviderId::OpenAI,
        404,
        r#"{"error":{"message":"The model `gpt-9` does not exist"}}"#,
    );
    let message = describe_test_failure(&err);

    assert!(message.starts_with(TEST_FAILED_MESSAGE));
    assert!(message.contains("OpenAI API error: 404"));
    assert!(message.ends_with("reason: The model `gpt-9` does not exist"));
}

#[test]
fn test_describe_test_failure_for_invalid_request_is_just_the_message() {
    let err = CatalogError::InvalidRequest("Please enter a prompt to test the model.".into());
    assert_eq!(describe_test_failure(&err), "Please enter a prompt to test the model.");

    let rejected = CatalogError::rejected(ProviderId::Anthropic, 500, "<html>oops</html>");
    assert!(!describe_test_failure(&rejected).contains("reason:"));
}
