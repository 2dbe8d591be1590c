use chatwidget_core::config::EndpointSettings;
use chatwidget_core::*;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

const API_KEY: &str = "test-api-key";
const PROMPT: &str = "Say hello";

fn bearer() -> String {
    format!("Bearer {API_KEY}")
}

fn tester_for(server: &ServerGuard) -> ModelTester {
    let mut settings = Settings::default();
    settings.endpoints = EndpointSettings::all(&server.url());
    ModelTester::from_settings(&settings).unwrap()
}

fn form(provider: &str, model_id: &str) -> ModelForm {
    let mut form = ModelForm::new();
    form.provider = provider.into();
    form.model_id = model_id.into();
    form.api_key = API_KEY.into();
    form.temperature = 0.5;
    form.max_tokens = 64;
    form
}

// ========================================================================
// Chat Completions (OpenAI, OpenRouter)
// ========================================================================

#[tokio::test]
async fn test_openai_sends_chat_completion() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", bearer().as_str())
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4",
            "messages": [{ "role": "user", "content": PROMPT }],
            "temperature": 0.5,
            "max_tokens": 64
        })))
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Hello!"}}]}"#)
        .expect(1)
        .create_async()
        .await;

    let reply = tester_for(&server)
        .test_model(&form("openai", "gpt-4"), PROMPT)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reply, "Hello!");
}

#[tokio::test]
async fn test_openrouter_uses_api_prefix() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .match_header("authorization", bearer().as_str())
        .match_body(Matcher::PartialJson(json!({
            "model": "mistralai/mistral-7b-instruct:free",
            "max_tokens": 64
        })))
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":"Bonjour"}}]}"#)
        .create_async()
        .await;

    let reply = tester_for(&server)
        .test_model(&form("openrouter", "mistralai/mistral-7b-instruct:free"), PROMPT)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reply, "Bonjour");
}

#[tokio::test]
async fn test_empty_choices_yield_placeholder() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let reply = tester_for(&server)
        .test_model(&form("openai", "gpt-4"), PROMPT)
        .await
        .unwrap();
    assert_eq!(reply, "No response content");
}

#[tokio::test]
async fn test_rejection_keeps_upstream_reason() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(404)
        .with_body(r#"{"error":{"message":"The model `gpt-9` does not exist","type":"invalid_request_error"}}"#)
        .create_async()
        .await;

    let err = tester_for(&server)
        .test_model(&form("openai", "gpt-9"), PROMPT)
        .await
        .unwrap_err();

    assert_eq!(err.provider(), Some(ProviderId::OpenAI));
    assert_eq!(err.status(), Some(404));
    assert_eq!(
        err.upstream_message().as_deref(),
        Some("The model `gpt-9` does not exist")
    );
}

// ========================================================================
// Anthropic
// ========================================================================

#[tokio::test]
async fn test_anthropic_sends_message_with_form_values() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", API_KEY)
        .match_header("anthropic-version", "2023-06-01")
        .match_body(Matcher::PartialJson(json!({
            "model": "claude-3-haiku-20240307",
            "max_tokens": 64,
            "temperature": 0.5,
            "messages": [{ "role": "user", "content": PROMPT }]
        })))
        .with_status(200)
        .with_body(r#"{"content":[{"type":"text","text":"Hi from Claude"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let reply = tester_for(&server)
        .test_model(&form("anthropic", "claude-3-haiku-20240307"), PROMPT)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reply, "Hi from Claude");
}

// ========================================================================
// Google
// ========================================================================

#[tokio::test]
async fn test_google_generate_content() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/models/gemini-pro:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), API_KEY.into()))
        .match_body(Matcher::PartialJson(json!({
            "contents": [{ "parts": [{ "text": PROMPT }] }],
            "generationConfig": { "temperature": 0.5, "maxOutputTokens": 64 }
        })))
        .with_status(200)
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"Hello from Gemini"}]}}]}"#)
        .expect(1)
        .create_async()
        .await;

    let reply = tester_for(&server)
        .test_model(&form("google", "gemini-pro"), PROMPT)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reply, "Hello from Gemini");
}

#[tokio::test]
async fn test_google_base_url_is_the_full_endpoint() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/proxy/generate")
        .match_query(Matcher::UrlEncoded("key".into(), API_KEY.into()))
        .with_status(200)
        .with_body(r#"{"candidates":[]}"#)
        .expect(1)
        .create_async()
        .await;

    let mut form = form("google", "gemini-pro");
    form.base_url = Some(format!("{}/proxy/generate", server.url()));
    let reply = ModelTester::new()
        .unwrap()
        .test_model(&form, PROMPT)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reply, "No response content");
}

#[tokio::test]
async fn test_google_failure_does_not_expose_key() {
    let secret = "SECRET-KEY-123";
    let mut form = form("google", "gemini-pro");
    form.api_key = secret.into();
    form.base_url = Some("http://127.0.0.1:1/v1/models/gemini-pro:generateContent".into());

    let err = ModelTester::new()
        .unwrap()
        .test_model(&form, PROMPT)
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Network { provider: ProviderId::Google, .. }));
    assert!(!err.to_string().contains(secret), "{err}");
    assert!(!format!("{err:?}").contains(secret), "{err:?}");
}

// ========================================================================
// Hugging Face
// ========================================================================

#[tokio::test]
async fn test_huggingface_inference_list_reply() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gpt2")
        .match_header("authorization", bearer().as_str())
        .match_body(Matcher::PartialJson(json!({
            "inputs": PROMPT,
            "parameters": {
                "temperature": 0.5,
                "max_new_tokens": 64,
                "return_full_text": false
            }
        })))
        .with_status(200)
        .with_body(r#"[{"generated_text":" hello world"}]"#)
        .expect(1)
        .create_async()
        .await;

    let reply = tester_for(&server)
        .test_model(&form("huggingface", "gpt2"), PROMPT)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reply, " hello world");
}

#[tokio::test]
async fn test_huggingface_base_url_and_object_reply() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/endpoint")
        .with_status(200)
        .with_body(r#"{"generated_text":"from a dedicated endpoint"}"#)
        .expect(1)
        .create_async()
        .await;

    let mut form = form("huggingface", "gpt2");
    form.base_url = Some(format!("{}/endpoint", server.url()));
    let reply = ModelTester::new()
        .unwrap()
        .test_model(&form, PROMPT)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reply, "from a dedicated endpoint");
}

#[tokio::test]
async fn test_huggingface_string_error_is_the_reason() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/models/gpt2")
        .with_status(503)
        .with_body(r#"{"error":"Model gpt2 is currently loading"}"#)
        .create_async()
        .await;

    let err = tester_for(&server)
        .test_model(&form("huggingface", "gpt2"), PROMPT)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(
        err.upstream_message().as_deref(),
        Some("Model gpt2 is currently loading")
    );
}

// ========================================================================
// Local Answers and Input Checks
// ========================================================================

#[tokio::test]
async fn test_custom_provider_gets_simulated_reply() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut form = form("custom", "my-llm");
    form.api_key.clear();
    let reply = tester_for(&server).test_model(&form, PROMPT).await.unwrap();

    mock.assert_async().await;
    assert!(reply.starts_with("This is a simulated response from custom's model (my-llm):"));
    assert!(reply.contains("You asked: \"Say hello\""));
}

#[tokio::test]
async fn test_blank_prompt_is_rejected_locally() {
    let err = ModelTester::new()
        .unwrap()
        .test_model(&form("openai", "gpt-4"), "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(_)));
    assert_eq!(err.to_string(), "Invalid request: Please enter a prompt to test the model.");
}

#[tokio::test]
async fn test_remote_provider_needs_key_and_model() {
    let tester = ModelTester::new().unwrap();

    let mut no_key = form("anthropic", "claude-2.1");
    no_key.api_key.clear();
    let err = tester.test_model(&no_key, PROMPT).await.unwrap_err();
    assert!(matches!(err, CatalogError::MissingCredential { provider: ProviderId::Anthropic }));

    let no_model = form("openai", " ");
    let err = tester.test_model(&no_model, PROMPT).await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRequest(_)));
}
