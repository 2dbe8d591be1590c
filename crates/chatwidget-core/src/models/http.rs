use crate::catalog::ProviderId;
use crate::error::CatalogError;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub(crate) fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, CatalogError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| CatalogError::Config(format!("Failed to build HTTP client: {e}")))
}

pub(crate) fn require_credential(provider: ProviderId, credential: &str) -> Result<(), CatalogError> {
    if credential.trim().is_empty() {
        return Err(CatalogError::MissingCredential { provider });
    }
    Ok(())
}

/// A blank override means "use the default", same as no override at all.
pub(crate) fn resolve_base_url<'a>(override_url: Option<&'a str>, default: &'a str) -> &'a str {
    override_url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or(default)
        .trim_end_matches('/')
}

/// Send a request and surface transport failures with the provider attached.
///
/// The URL is stripped from the error: some providers take the API key as a
/// query parameter.
pub(crate) async fn send(
    provider: ProviderId,
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response, CatalogError> {
    request
        .send()
        .await
        .map_err(|e| CatalogError::network(provider, e.without_url()))
}

/// Reject non-success statuses, keeping the upstream body for diagnostics.
pub(crate) async fn ensure_success(
    provider: ProviderId,
    response: reqwest::Response,
) -> Result<reqwest::Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!("{} rejected request with status {}", provider, status);
    Err(CatalogError::rejected(provider, status.as_u16(), body))
}

/// Check the status, then decode the body as `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: ProviderId,
    response: reqwest::Response,
) -> Result<T, CatalogError> {
    let response = ensure_success(provider, response).await?;
    let text = response
        .text()
        .await
        .map_err(|e| CatalogError::network(provider, e.without_url()))?;
    serde_json::from_str(&text).map_err(|e| CatalogError::malformed(provider, e.to_string()))
}
