//! Parameter structures for mapper operations.
//!
//! These are plain structs with no framework derives beyond serde, so any
//! front end can build them. The CLI defines clap wrappers and converts them
//! with `From`:
//!
//! ```text
//! CLI Args (clap) ──From──▶ Core Params ──▶ Mapper
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{Credentials, Provider};

/// Start a new journey.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartJourney {
    /// Free-text description of the experience being mapped
    pub context: String,
}

/// Append a step after the current tail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddStep {
    pub text: String,
}

/// Regenerate suggestions, optionally for the prefix ending at a step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Suggest {
    pub step_id: Option<String>,
}

/// Open a saved project or template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenProject {
    pub id: String,
}

/// Replace stored credentials.
///
/// Keys left as `None` keep their stored value, so switching provider does
/// not require re-entering the other key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetCredentials {
    pub provider: Provider,
    pub openai_key: Option<String>,
    pub anthropic_key: Option<String>,
}

impl SetCredentials {
    /// Merges these parameters over `existing`.
    pub fn merge_into(self, existing: Option<&Credentials>) -> Credentials {
        let mut credentials = existing.cloned().unwrap_or_default();
        credentials.provider = self.provider;
        if let Some(key) = self.openai_key {
            credentials.set_key(Provider::OpenAi, Some(key));
        }
        if let Some(key) = self.anthropic_key {
            credentials.set_key(Provider::Anthropic, Some(key));
        }
        credentials
    }
}

/// Build a share link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareJourney {
    /// Origin the link points at, e.g. `http://localhost:5173`
    pub origin: String,
}

impl Default for ShareJourney {
    fn default() -> Self {
        Self {
            origin: "http://localhost:5173".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_credentials_merges_keys() {
        let existing = Credentials::new(Provider::OpenAi, "sk-open");
        let merged = SetCredentials {
            provider: Provider::Anthropic,
            openai_key: None,
            anthropic_key: Some("sk-ant".to_string()),
        }
        .merge_into(Some(&existing));

        assert_eq!(merged.provider, Provider::Anthropic);
        assert_eq!(merged.key_for(Provider::OpenAi), Some("sk-open"));
        assert_eq!(merged.active_key(), Some((Provider::Anthropic, "sk-ant")));
    }

    #[test]
    fn test_set_credentials_without_existing() {
        let merged = SetCredentials {
            provider: Provider::OpenAi,
            openai_key: Some("sk".to_string()),
            anthropic_key: None,
        }
        .merge_into(None);
        assert_eq!(merged, Credentials::new(Provider::OpenAi, "sk"));
    }
}
