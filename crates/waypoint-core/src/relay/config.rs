//! Relay configuration.

use std::net::SocketAddr;

use crate::{
    error::{MapperError, Result},
    models::Provider,
};

/// Where clients reach the relay unless told otherwise.
pub const DEFAULT_RELAY_URL: &str = "http://localhost:3001/api";
/// Default relay listening port.
pub const DEFAULT_RELAY_PORT: u16 = 3001;
pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

/// Settings for the relay server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub openai_url: String,
    pub anthropic_url: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_RELAY_PORT,
            openai_url: OPENAI_CHAT_URL.to_string(),
            anthropic_url: ANTHROPIC_MESSAGES_URL.to_string(),
        }
    }
}

impl RelayConfig {
    /// Upstream vendor endpoint for `provider`.
    pub fn vendor_url(&self, provider: Provider) -> &str {
        match provider {
            Provider::OpenAi => &self.openai_url,
            Provider::Anthropic => &self.anthropic_url,
        }
    }

    /// Socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::Configuration` if host and port do not form a
    /// valid address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| MapperError::Configuration {
                message: format!("Invalid relay address {}:{}: {e}", self.host, self.port),
            })
    }
}
