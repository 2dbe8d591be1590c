use crate::catalog::ProviderId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{provider} API error: {status}")]
    UpstreamRejected {
        provider: ProviderId,
        status: u16,
        body: String,
    },

    #[error("{provider} API error: request failed: {source}")]
    Network {
        provider: ProviderId,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API error: malformed response: {message}")]
    MalformedPayload {
        provider: ProviderId,
        message: String,
    },

    #[error("{provider} API error: no API key supplied")]
    MissingCredential { provider: ProviderId },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CatalogError {
    pub fn rejected(provider: ProviderId, status: u16, body: impl Into<String>) -> Self {
        Self::UpstreamRejected {
            provider,
            status,
            body: body.into(),
        }
    }

    pub fn network(provider: ProviderId, source: reqwest::Error) -> Self {
        Self::Network { provider, source }
    }

    pub fn malformed(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            provider,
            message: message.into(),
        }
    }

    /// Provider the failure came from, if it came from an upstream call.
    pub fn provider(&self) -> Option<ProviderId> {
        match self {
            Self::UpstreamRejected { provider, .. }
            | Self::Network { provider, .. }
            | Self::MalformedPayload { provider, .. }
            | Self::MissingCredential { provider } => Some(*provider),
            _ => None,
        }
    }

    /// Reason given in a rejected request's body, when the provider sent one.
    /// Understands both `{"error": {"message": ..}}` and `{"error": ".."}`.
    pub fn upstream_message(&self) -> Option<String> {
        let Self::UpstreamRejected { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        match value.get("error")? {
            serde_json::Value::String(message) => Some(message.clone()),
            error => error.get("message")?.as_str().map(str::to_string),
        }
    }

    /// Upstream HTTP status, when the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamRejected { status, .. } => Some(*status),
            Self::Network { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
