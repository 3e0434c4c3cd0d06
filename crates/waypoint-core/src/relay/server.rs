//! The relay server.
//!
//! Routes:
//! - `POST /api/openai`
//! - `POST /api/anthropic`
//! - `GET /health`
//!
//! The relay adds the vendor's fixed model parameters and auth headers, then
//! returns the vendor's body and status unchanged. It keeps no state between
//! requests and never retries.

use std::{future::Future, sync::Arc};

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use super::{
    config::RelayConfig,
    wire::{ProviderProfile, RelayRequest, ANTHROPIC_VERSION},
};
use crate::{
    error::{MapperError, Result},
    models::Provider,
};

#[derive(Clone)]
struct RelayState {
    config: Arc<RelayConfig>,
    client: reqwest::Client,
}

/// Builds the relay router.
pub fn router(config: RelayConfig) -> Router {
    let state = RelayState {
        config: Arc::new(config),
        client: reqwest::Client::new(),
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/openai", post(proxy_openai).options(preflight))
        .route("/api/anthropic", post(proxy_anthropic).options(preflight))
        .layer(middleware::map_response(allow_any_origin))
        .with_state(state)
}

/// Binds to the configured address and serves until Ctrl-C.
pub async fn serve(config: RelayConfig) -> Result<()> {
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| MapperError::Configuration {
            message: format!("Failed to bind relay to {addr}: {e}"),
        })?;

    info!("Relay listening on http://{addr}");
    run(listener, config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

/// Serves the relay on an already-bound listener until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, config: RelayConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| MapperError::Configuration {
            message: format!("Relay server error: {e}"),
        })
}

async fn health() -> Json<Value> {
    Json(json!({"status": "OK", "message": "AI Proxy Server is running"}))
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn allow_any_origin(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    response
}

async fn proxy_openai(State(state): State<RelayState>, Json(request): Json<RelayRequest>) -> Response {
    forward(&state, Provider::OpenAi, request).await
}

async fn proxy_anthropic(
    State(state): State<RelayState>,
    Json(request): Json<RelayRequest>,
) -> Response {
    forward(&state, Provider::Anthropic, request).await
}

async fn forward(state: &RelayState, provider: Provider, request: RelayRequest) -> Response {
    let Some(api_key) = request.api_key.filter(|key| !key.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "API key required"})),
        )
            .into_response();
    };

    let profile = ProviderProfile::for_provider(provider);
    let url = state.config.vendor_url(provider);
    let upstream = state
        .client
        .post(url)
        .json(&profile.request_body(&request.messages));
    let upstream = match provider {
        Provider::OpenAi => upstream.bearer_auth(&api_key),
        Provider::Anthropic => upstream
            .header("x-api-key", &api_key)
            .header("anthropic-version", ANTHROPIC_VERSION),
    };

    let response = match upstream.send().await {
        Ok(response) => response,
        Err(e) => return internal_error(provider, &e),
    };

    let status = response.status();
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => return internal_error(provider, &e),
    };

    if !status.is_success() {
        error!("{} API error: {status} {text}", provider.display_name());
    }

    let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
    let status = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(body)).into_response()
}

fn internal_error(provider: Provider, e: &reqwest::Error) -> Response {
    error!("{} relay error: {e}", provider.display_name());
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Internal server error", "details": e.to_string()})),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;
    use wiremock::{
        matchers::{body_partial_json, header as has_header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    /// Starts the relay on an ephemeral port, returning its base URL.
    async fn start_relay(config: RelayConfig) -> (String, oneshot::Sender<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(run(listener, config, async {
            let _ = rx.await;
        }));
        (format!("http://{addr}"), tx)
    }

    fn config_for(vendor: &MockServer) -> RelayConfig {
        RelayConfig {
            openai_url: format!("{}/v1/chat/completions", vendor.uri()),
            anthropic_url: format!("{}/v1/messages", vendor.uri()),
            ..RelayConfig::default()
        }
    }

    #[tokio::test]
    async fn test_health() {
        let (base, _stop) = start_relay(RelayConfig::default()).await;
        let response = reqwest::get(format!("{base}/health")).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "OK");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_bad_request() {
        let (base, _stop) = start_relay(RelayConfig::default()).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/openai"))
            .json(&json!({"messages": [{"role": "user", "content": "hi"}]}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "API key required");
    }

    #[tokio::test]
    async fn test_bodies_without_usable_key_are_bad_request() {
        let (base, _stop) = start_relay(RelayConfig::default()).await;
        let client = reqwest::Client::new();
        for (route, payload) in [
            ("openai", json!({})),
            ("openai", json!({"apiKey": ""})),
            ("anthropic", json!({})),
            ("anthropic", json!({"apiKey": ""})),
        ] {
            let response = client
                .post(format!("{base}/api/{route}"))
                .json(&payload)
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), 400, "{route} {payload}");
            let body: Value = response.json().await.unwrap();
            assert_eq!(body["error"], "API key required", "{route} {payload}");
        }
    }

    #[tokio::test]
    async fn test_openai_forwarding() {
        let vendor = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(has_header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({"model": "gpt-4", "max_tokens": 800})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "1. Sign up"}}]
            })))
            .expect(1)
            .mount(&vendor)
            .await;

        let (base, _stop) = start_relay(config_for(&vendor)).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/openai"))
            .json(&RelayRequest::single("hi", "sk-test"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["choices"][0]["message"]["content"], "1. Sign up");
    }

    #[tokio::test]
    async fn test_anthropic_forwarding_headers() {
        let vendor = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(has_header("x-api-key", "sk-ant"))
            .and(has_header("anthropic-version", ANTHROPIC_VERSION))
            .and(body_partial_json(json!({"max_tokens": 1000})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "1. Log in"}]
            })))
            .expect(1)
            .mount(&vendor)
            .await;

        let (base, _stop) = start_relay(config_for(&vendor)).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/anthropic"))
            .json(&RelayRequest::single("hi", "sk-ant"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_vendor_status_passes_through() {
        let vendor = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429).set_body_json(json!({"error": {"message": "slow down"}})),
            )
            .mount(&vendor)
            .await;

        let (base, _stop) = start_relay(config_for(&vendor)).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/openai"))
            .json(&RelayRequest::single("hi", "sk"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 429);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"]["message"], "slow down");
    }

    #[tokio::test]
    async fn test_non_json_vendor_body_becomes_string() {
        let vendor = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad gateway"))
            .mount(&vendor)
            .await;

        let (base, _stop) = start_relay(config_for(&vendor)).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/openai"))
            .json(&RelayRequest::single("hi", "sk"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 502);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, Value::String("Bad gateway".to_string()));
    }

    #[tokio::test]
    async fn test_transport_error_is_internal_error() {
        let config = RelayConfig {
            openai_url: "http://127.0.0.1:1/v1/chat/completions".to_string(),
            ..RelayConfig::default()
        };
        let (base, _stop) = start_relay(config).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/openai"))
            .json(&RelayRequest::single("hi", "sk"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 500);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Internal server error");
        assert!(body["details"].as_str().is_some());
    }
}
