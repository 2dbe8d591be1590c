use anyhow::{bail, Result};
use chatwidget_core::{
    providers, should_fetch, LookupOutcome, ModelCatalog, ModelForm, ModelTester, ProviderId,
    Settings,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "chatwidget")]
#[command(about = "Look up the models available to a chat widget")]
#[command(version)]
struct Cli {
    /// Load settings from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the supported providers
    Providers,

    /// Fetch the models a provider offers for an API key
    Models {
        /// Provider id (openai, google, anthropic, huggingface, openrouter, custom)
        #[arg(short, long)]
        provider: String,

        /// API key; defaults to the provider's configured environment variable
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// Endpoint override (Google and Hugging Face only)
        #[arg(long)]
        base_url: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Send one prompt to a model to check its configuration
    Test {
        /// Provider id (openai, google, anthropic, huggingface, openrouter, custom)
        #[arg(short, long)]
        provider: String,

        /// Model identifier, e.g. gpt-4 or gemini-pro
        #[arg(short, long)]
        model: String,

        /// Prompt to send
        #[arg(long)]
        prompt: String,

        /// API key; defaults to the provider's configured environment variable
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// Full endpoint override (Google and Hugging Face only)
        #[arg(long)]
        base_url: Option<String>,

        /// Sampling temperature between 0 and 1
        #[arg(long, default_value_t = 0.7)]
        temperature: f32,

        /// Maximum tokens to generate
        #[arg(long, default_value_t = 1024)]
        max_tokens: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let settings = match cli.config {
        Some(ref path) => Settings::load_from(path)?,
        None => Settings::load(),
    };

    match cli.command {
        Command::Providers => {
            println!("{}", commands::render_providers(providers()));
        }
        Command::Models {
            provider,
            api_key,
            base_url,
            json,
        } => {
            run_models(&settings, &provider, api_key, base_url.as_deref(), json).await?;
        }
        Command::Test {
            provider,
            model,
            prompt,
            api_key,
            base_url,
            temperature,
            max_tokens,
        } => {
            let mut form = ModelForm::new();
            form.api_key = resolve_api_key(&settings, &provider, api_key);
            form.provider = provider;
            form.model_id = model;
            form.base_url = base_url;
            form.temperature = temperature;
            form.max_tokens = max_tokens;
            run_test(&settings, &form, &prompt).await?;
        }
    }

    Ok(())
}

async fn run_models(
    settings: &Settings,
    provider: &str,
    api_key: Option<String>,
    base_url: Option<&str>,
    json: bool,
) -> Result<()> {
    if provider == ProviderId::Custom.key() {
        println!("{}", commands::CUSTOM_PROVIDER_MESSAGE);
        return Ok(());
    }

    let api_key = resolve_api_key(settings, provider, api_key);

    if !should_fetch(provider, &api_key) {
        bail!(commands::KEY_TOO_SHORT_MESSAGE);
    }

    let catalog = ModelCatalog::from_settings(settings)?;
    let result = catalog
        .fetch_models_for_provider(provider, &api_key, base_url)
        .await;
    let outcome = LookupOutcome::from_result(result);

    if json && !outcome.is_failure() {
        println!("{}", commands::render_json(outcome.models())?);
        return Ok(());
    }

    let summary = commands::describe_outcome(provider, &outcome);
    match outcome {
        LookupOutcome::Found(ref models) => {
            eprintln!("{summary}");
            println!("{}", commands::render_models(models));
        }
        LookupOutcome::NoModels => eprintln!("{summary}"),
        LookupOutcome::Failed(e) => {
            tracing::debug!("Model lookup failed: {:?}", e);
            bail!(summary);
        }
    }

    Ok(())
}

async fn run_test(settings: &Settings, form: &ModelForm, prompt: &str) -> Result<()> {
    if let Some(error) = form
        .validate()
        .into_iter()
        .find(|e| matches!(e.field, "temperature" | "maxTokens"))
    {
        bail!(error.message);
    }

    let tester = ModelTester::from_settings(settings)?;
    match tester.test_model(form, prompt).await {
        Ok(reply) => {
            println!("{reply}");
            Ok(())
        }
        Err(e) => {
            tracing::debug!("Model test failed: {:?}", e);
            bail!(commands::describe_test_failure(&e));
        }
    }
}

/// Key from the flag, else from the provider's configured environment variable.
fn resolve_api_key(settings: &Settings, provider: &str, api_key: Option<String>) -> String {
    api_key
        .or_else(|| ProviderId::from_key(provider).and_then(|id| settings.api_keys.api_key(id)))
        .unwrap_or_default()
}
