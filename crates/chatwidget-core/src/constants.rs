//! Chatwidget centralized constants.
//! Endpoints, catalog filters and fallback model lists live here.

// ─── API Endpoints ────────────────────────────────────────────────────────────

pub mod endpoints {
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
    pub const GOOGLE_MODELS_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
    pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
    pub const HUGGINGFACE_MODELS_URL: &str = "https://huggingface.co/api/models";
    pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai";

    // Completion endpoints used when trying out a configured model.
    pub const GOOGLE_GENERATE_URL: &str = "https://generativelanguage.googleapis.com/v1/models";
    pub const HUGGINGFACE_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";
}

// ─── Environment Variables ────────────────────────────────────────────────────

pub mod env {
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
    pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
    pub const HUGGINGFACE_API_KEY: &str = "HF_TOKEN";
    pub const OPENROUTER_API_KEY: &str = "OPENROUTER_API_KEY";
}

// ─── OpenAI ───────────────────────────────────────────────────────────────────

pub mod openai {
    /// Product families worth showing; everything else (fine-tunes, embeddings,
    /// moderation) is dropped.
    pub const FAMILY_FILTERS: &[&str] = &["gpt-4", "gpt-3.5", "dall-e", "tts"];
    pub const FREE_MARKERS: &[&str] = &["gpt-3.5", "babbage", "ada"];
}

// ─── Google ───────────────────────────────────────────────────────────────────

pub mod google {
    pub const FREE_MARKER: &str = "gemini-1.0";

    /// (id, display name, is multi-modal)
    pub const FALLBACK_MODELS: &[(&str, &str, bool)] = &[
        ("gemini-pro", "Gemini Pro", false),
        ("gemini-pro-vision", "Gemini Pro Vision", true),
        ("gemini-ultra", "Gemini Ultra", false),
    ];
}

// ─── Anthropic ────────────────────────────────────────────────────────────────

pub mod anthropic {
    pub const API_VERSION: &str = "2023-06-01";
    pub const KEY_CHECK_MODEL: &str = "claude-3-sonnet-20240229";
    pub const KEY_CHECK_MAX_TOKENS: u32 = 10;
    pub const KEY_CHECK_PROMPT: &str = "Hello";

    pub const KNOWN_MODELS: &[(&str, &str)] = &[
        ("claude-3-opus-20240229", "Claude 3 Opus"),
        ("claude-3-sonnet-20240229", "Claude 3 Sonnet"),
        ("claude-3-haiku-20240307", "Claude 3 Haiku"),
        ("claude-2.1", "Claude 2.1"),
        ("claude-instant-1.2", "Claude Instant"),
    ];
}

// ─── Hugging Face ─────────────────────────────────────────────────────────────

pub mod huggingface {
    pub const PIPELINE_FILTER: &str = "text-generation";
    pub const SORT_FIELD: &str = "downloads";
    pub const PAGE_SIZE: u32 = 20;
}

// ─── OpenRouter ───────────────────────────────────────────────────────────────

pub mod openrouter {
    /// Context length above which a model is reported as multi-modal.
    pub const MULTIMODAL_CONTEXT_THRESHOLD: u64 = 8000;
    pub const FREE_MARKER: &str = "free";
}

// ─── Consumer Contract ────────────────────────────────────────────────────────

pub mod form {
    /// Shorter credentials are assumed to still be mid-typing; no lookup is issued.
    pub const MIN_CREDENTIAL_LEN: usize = 6;
    pub const MIN_NAME_LEN: usize = 2;
    pub const MIN_MODEL_ID_LEN: usize = 2;
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    pub const DEFAULT_MAX_TOKENS: u32 = 1024;
}

// ─── Model Test ───────────────────────────────────────────────────────────────

pub mod completion {
    pub const EMPTY_PROMPT: &str = "Please enter a prompt to test the model.";
    pub const MISSING_MODEL_ID: &str = "Model ID is required";
    /// Returned when the provider answered without any text.
    pub const NO_CONTENT: &str = "No response content";
}

// ─── Config Paths ─────────────────────────────────────────────────────────────

pub mod paths {
    pub const CONFIG_DIR: &str = "chatwidget";
    pub const CONFIG_FILE: &str = "config.toml";
}
