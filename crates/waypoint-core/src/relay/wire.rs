//! Wire types shared by the relay client and server.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::Provider;

/// Protocol version header value sent to Anthropic.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// One chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body accepted by the relay's `/api/{provider}` routes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl RelayRequest {
    /// A single-turn request carrying `prompt`.
    pub fn single(prompt: &str, api_key: &str) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
            api_key: Some(api_key.to_string()),
        }
    }
}

/// Fixed request parameters the relay injects for a vendor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderProfile {
    pub provider: Provider,
    pub model: &'static str,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl ProviderProfile {
    pub const OPENAI: ProviderProfile = ProviderProfile {
        provider: Provider::OpenAi,
        model: "gpt-4",
        max_tokens: 800,
        temperature: Some(0.7),
    };

    pub const ANTHROPIC: ProviderProfile = ProviderProfile {
        provider: Provider::Anthropic,
        model: "claude-3-sonnet-20240229",
        max_tokens: 1000,
        temperature: None,
    };

    pub fn for_provider(provider: Provider) -> Self {
        match provider {
            Provider::OpenAi => Self::OPENAI,
            Provider::Anthropic => Self::ANTHROPIC,
        }
    }

    /// Vendor request body for `messages`.
    pub fn request_body(&self, messages: &[ChatMessage]) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": self.max_tokens,
        });
        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }

    /// Pulls the completion text out of a vendor response body.
    pub fn completion_text<'a>(&self, body: &'a Value) -> Option<&'a str> {
        let pointer = match self.provider {
            Provider::OpenAi => "/choices/0/message/content",
            Provider::Anthropic => "/content/0/text",
        };
        body.pointer(pointer).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_request_wire_format() {
        let request = RelayRequest::single("Hello", "sk-1");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({"messages": [{"role": "user", "content": "Hello"}], "apiKey": "sk-1"})
        );

        let missing: RelayRequest = serde_json::from_value(json!({"messages": []})).unwrap();
        assert_eq!(missing.api_key, None);
    }

    #[test]
    fn test_relay_request_fields_are_optional() {
        let empty: RelayRequest = serde_json::from_value(json!({})).unwrap();
        assert!(empty.messages.is_empty());
        assert_eq!(empty.api_key, None);

        let blank_key: RelayRequest = serde_json::from_value(json!({"apiKey": ""})).unwrap();
        assert!(blank_key.messages.is_empty());
        assert_eq!(blank_key.api_key.as_deref(), Some(""));
    }

    #[test]
    fn test_openai_body_has_temperature() {
        let body = ProviderProfile::OPENAI.request_body(&[ChatMessage::user("hi")]);
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["max_tokens"], 800);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_anthropic_body_has_no_temperature() {
        let body = ProviderProfile::ANTHROPIC.request_body(&[ChatMessage::user("hi")]);
        assert_eq!(body["model"], "claude-3-sonnet-20240229");
        assert_eq!(body["max_tokens"], 1000);
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_completion_text_per_provider() {
        let openai = json!({"choices": [{"message": {"content": "1. Sign up"}}]});
        let anthropic = json!({"content": [{"type": "text", "text": "1. Log in"}]});

        assert_eq!(
            ProviderProfile::OPENAI.completion_text(&openai),
            Some("1. Sign up")
        );
        assert_eq!(
            ProviderProfile::ANTHROPIC.completion_text(&anthropic),
            Some("1. Log in")
        );
        assert_eq!(ProviderProfile::ANTHROPIC.completion_text(&openai), None);
    }
}
