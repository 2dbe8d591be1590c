//! One-shot completion against a configured model, used to try a form's
//! settings before saving them.
//!
//! Every remote provider gets a single non-streaming request built from the
//! form's model id, temperature and max tokens. `custom` and unrecognized
//! providers are answered locally with a canned reply.

use crate::catalog::ProviderId;
use crate::config::{EndpointSettings, Settings};
use crate::constants::{anthropic, completion};
use crate::error::CatalogError;
use crate::form::ModelForm;
use crate::models::http;
use serde::{Deserialize, Serialize};

/// Sends test prompts to whichever provider a [`ModelForm`] names.
pub struct ModelTester {
    client: reqwest::Client,
    endpoints: EndpointSettings,
}

/// Values shared by every provider's request body.
struct Completion<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
}

impl ModelTester {
    pub fn new() -> Result<Self, CatalogError> {
        Self::from_settings(&Settings::default())
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, CatalogError> {
        let client = http::build_client(settings.catalog.request_timeout())?;
        Ok(Self::with_client(client, settings))
    }

    pub fn with_client(client: reqwest::Client, settings: &Settings) -> Self {
        Self {
            client,
            endpoints: settings.endpoints.clone(),
        }
    }

    /// Send `prompt` to the form's model and return the reply text.
    ///
    /// An empty reply becomes [`completion::NO_CONTENT`]. A blank prompt is
    /// rejected before anything is sent.
    pub async fn test_model(&self, form: &ModelForm, prompt: &str) -> Result<String, CatalogError> {
        if prompt.trim().is_empty() {
            return Err(CatalogError::InvalidRequest(completion::EMPTY_PROMPT.to_string()));
        }

        let provider = ProviderId::from_key(&form.provider).unwrap_or(ProviderId::Custom);
        if !provider.is_custom() {
            http::require_credential(provider, &form.api_key)?;
            if form.model_id.trim().is_empty() {
                return Err(CatalogError::InvalidRequest(
                    completion::MISSING_MODEL_ID.to_string(),
                ));
            }
        }

        let request = Completion {
            model: form.model_id.trim(),
            prompt,
            temperature: form.temperature,
            max_tokens: form.max_tokens,
        };
        let key = form.api_key.as_str();

        let reply = match provider {
            ProviderId::OpenAI => {
                let url = join(&self.endpoints.openai, "/v1/chat/completions");
                self.chat_completion(provider, &url, key, &request).await?
            }
            ProviderId::OpenRouter => {
                let url = join(&self.endpoints.openrouter, "/api/v1/chat/completions");
                self.chat_completion(provider, &url, key, &request).await?
            }
            ProviderId::Anthropic => self.anthropic_message(key, &request).await?,
            ProviderId::Google => self.google_generate(key, form.base_url(), &request).await?,
            ProviderId::HuggingFace => {
                self.huggingface_inference(key, form.base_url(), &request).await?
            }
            ProviderId::Custom => {
                return Ok(simulated_reply(&form.provider, &form.model_id, prompt));
            }
        };

        tracing::info!("{} answered the test prompt for {}", provider, request.model);
        Ok(reply
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| completion::NO_CONTENT.to_string()))
    }

    /// OpenAI-compatible `chat/completions`, shared by OpenAI and OpenRouter.
    async fn chat_completion(
        &self,
        provider: ProviderId,
        url: &str,
        credential: &str,
        request: &Completion<'_>,
    ) -> Result<Option<String>, CatalogError> {
        tracing::debug!("Testing {} model via {}", provider, url);
        let body = ChatCompletionRequest {
            model: request.model,
            messages: [ChatMessage::user(request.prompt)],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let builder = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {credential}"))
            .header("Content-Type", "application/json")
            .json(&body);
        let response = http::send(provider, builder).await?;
        let reply: ChatCompletionResponse = http::read_json(provider, response).await?;

        Ok(reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }

    async fn anthropic_message(
        &self,
        credential: &str,
        request: &Completion<'_>,
    ) -> Result<Option<String>, CatalogError> {
        let provider = ProviderId::Anthropic;
        let url = join(&self.endpoints.anthropic, "/v1/messages");
        tracing::debug!("Testing Anthropic model via {}", url);
        let body = AnthropicMessageRequest {
            model: request.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: [ChatMessage::user(request.prompt)],
        };

        let builder = self
            .client
            .post(&url)
            .header("x-api-key", credential)
            .header("anthropic-version", anthropic::API_VERSION)
            .header("content-type", "application/json")
            .json(&body);
        let response = http::send(provider, builder).await?;
        let reply: AnthropicMessageResponse = http::read_json(provider, response).await?;

        Ok(reply
            .content
            .into_iter()
            .find(|c| c.content_type == "text")
            .map(|c| c.text))
    }

    /// A base URL override is the full `generateContent` endpoint.
    async fn google_generate(
        &self,
        credential: &str,
        base_url: Option<&str>,
        request: &Completion<'_>,
    ) -> Result<Option<String>, CatalogError> {
        let provider = ProviderId::Google;
        let url = match base_url {
            Some(url) => url.trim().to_string(),
            None => format!(
                "{}:generateContent",
                join(&self.endpoints.google_generate, &format!("/{}", request.model))
            ),
        };
        tracing::debug!("Testing Google model via {}", url);
        let body = GenerateContentRequest {
            contents: [GoogleContent {
                parts: [GooglePart {
                    text: request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        };

        let builder = self
            .client
            .post(&url)
            .query(&[("key", credential)])
            .header("Content-Type", "application/json")
            .json(&body);
        let response = http::send(provider, builder).await?;
        let reply: GenerateContentResponse = http::read_json(provider, response).await?;

        Ok(reply
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text))
    }

    /// A base URL override is the full inference endpoint.
    async fn huggingface_inference(
        &self,
        credential: &str,
        base_url: Option<&str>,
        request: &Completion<'_>,
    ) -> Result<Option<String>, CatalogError> {
        let provider = ProviderId::HuggingFace;
        let url = match base_url {
            Some(url) => url.trim().to_string(),
            None => join(&self.endpoints.huggingface_inference, &format!("/{}", request.model)),
        };
        tracing::debug!("Testing Hugging Face model via {}", url);
        let body = InferenceRequest {
            inputs: request.prompt,
            parameters: InferenceParameters {
                temperature: request.temperature,
                max_new_tokens: request.max_tokens,
                return_full_text: false,
            },
        };

        let builder = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {credential}"))
            .header("Content-Type", "application/json")
            .json(&body);
        let response = http::send(provider, builder).await?;
        let reply: InferenceResponse = http::read_json(provider, response).await?;

        Ok(match reply {
            InferenceResponse::Batch(outputs) => {
                outputs.into_iter().next().and_then(|o| o.generated_text)
            }
            InferenceResponse::Single(output) => output.generated_text,
        })
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Canned reply for providers that have no endpoint to call.
pub fn simulated_reply(provider: &str, model_id: &str, prompt: &str) -> String {
    format!(
        "This is a simulated response from {provider}'s model ({model_id}):\n\n\
         You asked: \"{prompt}\"\n\n\
         This is a test response to confirm your model is configured correctly. \
         In a real scenario, the actual model would generate content here based on your input."
    )
}

/// Convenience wrapper using a default [`ModelTester`].
pub async fn test_model(form: &ModelForm, prompt: &str) -> Result<String, CatalogError> {
    ModelTester::new()?.test_model(form, prompt).await
}

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> ChatMessage<'a> {
    fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessageRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Deserialize)]
struct AnthropicMessageResponse {
    #[serde(default)]
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [GoogleContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GoogleContent<'a> {
    parts: [GooglePart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct GooglePart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
}

#[derive(Debug, Deserialize)]
struct GoogleCandidate {
    content: Option<GoogleCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GoogleCandidateContent {
    #[serde(default)]
    parts: Vec<GoogleReplyPart>,
}

#[derive(Debug, Deserialize)]
struct GoogleReplyPart {
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    temperature: f32,
    max_new_tokens: u32,
    return_full_text: bool,
}

/// Text-generation pipelines answer with a list; some endpoints with a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<InferenceOutput>),
    Single(InferenceOutput),
}

#[derive(Debug, Deserialize)]
struct InferenceOutput {
    generated_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_trims_trailing_slash() {
        assert_eq!(join("http://host/", "/v1/messages"), "http://host/v1/messages");
        assert_eq!(join("http://host", "/v1/messages"), "http://host/v1/messages");
    }

    #[test]
    fn test_simulated_reply_echoes_prompt() {
        let reply = simulated_reply("custom", "my-model", "Hi there");
        assert!(reply.starts_with("This is a simulated response from custom's model (my-model):"));
        assert!(reply.contains("You asked: \"Hi there\""));
    }

    #[test]
    fn test_inference_response_shapes() {
        let batch: InferenceResponse =
            serde_json::from_str(r#"[{"generated_text":"one"}]"#).unwrap();
        assert!(matches!(batch, InferenceResponse::Batch(ref o) if o[0].generated_text.as_deref() == Some("one")));

        let single: InferenceResponse = serde_json::from_str(r#"{"generated_text":"two"}"#).unwrap();
        assert!(matches!(single, InferenceResponse::Single(ref o) if o.generated_text.as_deref() == Some("two")));
    }

    #[test]
    fn test_generation_config_is_camel_case() {
        let body = serde_json::to_value(GenerateContentRequest {
            contents: [GoogleContent {
                parts: [GooglePart { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.5,
                max_output_tokens: 64,
            },
        })
        .unwrap();
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 64);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
    }
}
