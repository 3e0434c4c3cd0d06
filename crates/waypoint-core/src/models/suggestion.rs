//! Suggestion model: a candidate next step offered to the user.

use serde::{Deserialize, Serialize};

/// Maximum number of suggestions any generation path returns.
pub const MAX_SUGGESTIONS: usize = 5;

/// Maximum number of whitespace-separated words in a suggestion.
pub const MAX_SUGGESTION_WORDS: usize = 6;

/// Where a batch of suggestions came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    /// Produced by a language model through the relay
    Generated,
    /// Static text shown when no credentials are configured
    Fallback,
}

impl SuggestionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionSource::Generated => "generated",
            SuggestionSource::Fallback => "fallback",
        }
    }
}

/// A candidate next step. Recomputed after every journey mutation and never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    /// Ordinal reported by the model (1..=5 for well-behaved output)
    pub id: u32,

    /// Display text, at most six words
    pub text: String,

    /// Confidence score in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Optional reasoning text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,

    pub source: SuggestionSource,
}

impl Suggestion {
    /// Creates a generated suggestion, truncating the text to six words.
    pub fn generated(id: u32, text: &str, confidence: f64) -> Self {
        Self {
            id,
            text: truncate_words(text, MAX_SUGGESTION_WORDS),
            confidence: Some(confidence),
            reasoning: None,
            source: SuggestionSource::Generated,
        }
    }

    /// Creates a static fallback suggestion.
    pub fn fallback(id: u32, text: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            confidence: None,
            reasoning: None,
            source: SuggestionSource::Fallback,
        }
    }

    pub fn is_generated(&self) -> bool {
        self.source == SuggestionSource::Generated
    }
}

/// Keeps the first `max_words` whitespace-separated words of `text`.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
