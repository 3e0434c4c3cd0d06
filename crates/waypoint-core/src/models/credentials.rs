//! Credential model: the selected provider and its API keys.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language-model vendor. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Anthropic,
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            _ => Err(format!("Invalid provider: {s}")),
        }
    }
}

impl Provider {
    /// Lowercase name, also the relay route segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
        }
    }

    /// Human-readable vendor name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
        }
    }
}

/// API credentials as persisted under `ai_credentials`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic: Option<String>,

    /// Currently selected provider
    pub provider: Provider,
}

impl Credentials {
    /// Credentials with a single key for the given provider, which becomes
    /// active.
    pub fn new(provider: Provider, key: impl Into<String>) -> Self {
        let mut credentials = Self {
            provider,
            ..Self::default()
        };
        credentials.set_key(provider, Some(key.into()));
        credentials
    }

    /// Replaces the key stored for `provider`.
    pub fn set_key(&mut self, provider: Provider, key: Option<String>) {
        match provider {
            Provider::OpenAi => self.openai = key,
            Provider::Anthropic => self.anthropic = key,
        }
    }

    /// Returns the non-empty key stored for `provider`.
    pub fn key_for(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::OpenAi => self.openai.as_deref(),
            Provider::Anthropic => self.anthropic.as_deref(),
        }
        .filter(|key| !key.trim().is_empty())
    }

    /// Returns the active provider and its key, if that key is present.
    pub fn active_key(&self) -> Option<(Provider, &str)> {
        self.key_for(self.provider).map(|key| (self.provider, key))
    }

    /// True if a key exists for either provider.
    pub fn has_any_key(&self) -> bool {
        self.key_for(Provider::OpenAi).is_some() || self.key_for(Provider::Anthropic).is_some()
    }

    /// Trims keys and drops empty ones.
    pub fn normalized(self) -> Self {
        let clean = |key: Option<String>| {
            key.map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
        };
        Self {
            openai: clean(self.openai),
            anthropic: clean(self.anthropic),
            provider: self.provider,
        }
    }

    /// Returns the key for `provider` with everything but the last four
    /// characters masked, for display.
    pub fn masked_key(&self, provider: Provider) -> Option<String> {
        self.key_for(provider).map(|key| {
            let chars: Vec<char> = key.chars().collect();
            let visible = chars.len().min(4);
            let tail: String = chars[chars.len() - visible..].iter().collect();
            format!("{}{tail}", "*".repeat(chars.len() - visible))
        })
    }

    /// [`Credentials::masked_key`] for the active provider.
    pub fn masked_active_key(&self) -> Option<String> {
        self.masked_key(self.provider)
    }
}
