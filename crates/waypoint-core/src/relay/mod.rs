//! The local model relay and its client.
//!
//! Browsers cannot call the vendors' chat APIs directly, so every completion
//! goes through a small pass-through service:
//!
//! ```text
//! RelayClient ──POST /api/{provider}──▶ relay server ──HTTPS──▶ vendor
//!      ▲                                      │
//!      └──────── vendor body + status ◀───────┘
//! ```
//!
//! - [`client`]: builds the `{messages, apiKey}` request and parses the reply
//! - [`parse`]: turns numbered-list model output into suggestions
//! - [`server`]: the axum relay itself
//! - [`wire`]: request bodies and per-vendor profiles shared by both sides

pub mod client;
pub mod config;
pub mod parse;
pub mod server;
pub mod wire;

pub use client::RelayClient;
pub use config::{RelayConfig, DEFAULT_RELAY_URL};
pub use parse::parse_suggestions;
pub use wire::{ChatMessage, ProviderProfile, RelayRequest};
