mod traits;
mod http;
pub mod openai;
pub mod google;
pub mod anthropic;
pub mod huggingface;
pub mod openrouter;
pub mod classify;
pub mod aggregator;
pub mod completion;

pub use traits::ModelSource;
pub use openai::OpenAIModels;
pub use google::GoogleModels;
pub use anthropic::AnthropicModels;
pub use huggingface::HuggingFaceModels;
pub use openrouter::OpenRouterModels;
pub use classify::{is_free, sort_models_by_free_status};
pub use aggregator::{fetch_models_for_provider, ModelCatalog};
pub use completion::{test_model, ModelTester};
