//! Suggestion generation: relay-backed or static fallback.

use log::{debug, warn};

use crate::{
    credential_store::CredentialStore,
    error::{MapperError, Result},
    models::{Step, Suggestion, SuggestionSource},
    prompts::{build_prompt, PromptKind},
    relay::RelayClient,
};

/// Static suggestions shown when no credentials are configured. Each one
/// points the user at credential setup.
pub const FALLBACK_SUGGESTIONS: [&str; 3] = [
    "Setup AI credentials for smart suggestions",
    "Configure OpenAI or Anthropic API",
    "Get intelligent journey recommendations",
];

/// The three fallback suggestions.
pub fn fallback_suggestions() -> Vec<Suggestion> {
    FALLBACK_SUGGESTIONS
        .iter()
        .zip(1..)
        .map(|(text, id)| Suggestion::fallback(id, text))
        .collect()
}

/// Chooses between the relay and the fallback text.
#[derive(Debug, Clone)]
pub struct SuggestionGenerator {
    client: RelayClient,
}

impl SuggestionGenerator {
    pub fn new(client: RelayClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RelayClient {
        &self.client
    }

    /// Produces suggestions for `steps` under `context`.
    ///
    /// Without valid credentials this returns the fallback list and never
    /// touches the network.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::Generation` wrapping the relay, parse or
    /// credential failure. There is no silent fallback once credentials exist.
    pub async fn generate(
        &self,
        credentials: &mut CredentialStore,
        kind: PromptKind,
        context: &str,
        steps: &[Step],
    ) -> Result<(Vec<Suggestion>, SuggestionSource)> {
        if !credentials.has_valid() {
            debug!("No credentials configured; using fallback suggestions");
            return Ok((fallback_suggestions(), SuggestionSource::Fallback));
        }

        let Some((provider, key)) = credentials.active_key() else {
            return Err(MapperError::generation(MapperError::credential(
                "Invalid provider configuration",
            )));
        };

        let prompt = build_prompt(kind, context, steps);
        debug!(
            "Requesting {kind:?} suggestions from {} for {} steps",
            provider.as_str(),
            steps.len()
        );

        match self.client.send(&prompt, provider, key).await {
            Ok(suggestions) => Ok((suggestions, SuggestionSource::Generated)),
            Err(e) => {
                if matches!(e, MapperError::RelayUnavailable { .. }) {
                    credentials.note_relay_unreachable();
                }
                warn!("Suggestion generation failed: {e}");
                Err(MapperError::generation(e))
            }
        }
    }
}
