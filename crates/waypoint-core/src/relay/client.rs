//! HTTP client for the local relay.

use log::{debug, error};
use serde_json::Value;

use super::{parse::parse_suggestions, wire::ProviderProfile, RelayRequest};
use crate::{
    error::{MapperError, Result},
    models::{Provider, Suggestion},
};

/// Sends prompts to the relay, never to a vendor directly.
#[derive(Debug, Clone)]
pub struct RelayClient {
    base_url: String,
    http: reqwest::Client,
}

impl RelayClient {
    /// Creates a client for the relay at `base_url`
    /// (for example `http://localhost:3001/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Relay route for `provider`.
    pub fn endpoint(&self, provider: Provider) -> String {
        format!("{}/{}", self.base_url, provider.as_str())
    }

    /// Sends `prompt` and parses the numbered list in the reply.
    ///
    /// # Errors
    ///
    /// - `MapperError::RelayUnavailable` if the relay cannot be reached
    /// - `MapperError::Relay` if the relay answers with a non-success status
    /// - `MapperError::Parse` if the reply body is not the vendor's shape
    pub async fn send(&self, prompt: &str, provider: Provider, key: &str) -> Result<Vec<Suggestion>> {
        let text = self.complete(prompt, provider, key).await?;
        let suggestions = parse_suggestions(&text);
        debug!(
            "Parsed {} suggestions from {} completion",
            suggestions.len(),
            provider.as_str()
        );
        Ok(suggestions)
    }

    /// Sends `prompt` and returns the raw completion text.
    pub async fn complete(&self, prompt: &str, provider: Provider, key: &str) -> Result<String> {
        let url = self.endpoint(provider);
        let request = RelayRequest::single(prompt, key);

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| MapperError::RelayUnavailable {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| MapperError::RelayUnavailable {
            url: url.clone(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            error!("Relay call to {url} failed with {status}: {body}");
            return Err(MapperError::Relay {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = serde_json::from_str(&body)
            .map_err(|e| MapperError::parse(format!("relay body is not JSON: {e}")))?;

        ProviderProfile::for_provider(provider)
            .completion_text(&json)
            .map(str::to_string)
            .ok_or_else(|| {
                MapperError::parse(format!(
                    "{} response has no completion text",
                    provider.display_name()
                ))
            })
    }
}
