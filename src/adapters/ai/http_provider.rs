//! HTTP AI Provider - OpenAI-compatible chat completion client.
//!
//! Speaks the `/v1/chat/completions` wire format, which most hosted and
//! self-hosted gateways accept. The provider performs exactly one request
//! per `complete` call; retries, timeouts, and failover belong to the
//! orchestrator.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpProviderConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com");
//!
//! let provider = HttpAIProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AiConfig;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason,
    Message, MessageRole, ProviderHealth, ProviderInfo, TokenUsage,
};

/// Configuration for the HTTP provider.
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// API key for bearer authentication.
    api_key: Secret<String>,
    /// Model identifier sent with every request.
    pub model: String,
    /// Base URL of the completion endpoint.
    pub base_url: String,
    /// Socket-level request timeout.
    pub timeout: Duration,
}

impl HttpProviderConfig {
    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Builds provider configuration from the application AI section.
    pub fn from_app_config(config: &AiConfig, api_key: impl Into<String>) -> Self {
        Self::new(api_key)
            .with_base_url(config.base_url.clone())
            .with_timeout(config.timeout())
    }

    /// Sets the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-compatible chat completion provider.
pub struct HttpAIProvider {
    config: HttpProviderConfig,
    client: Client,
}

impl HttpAIProvider {
    /// Creates a provider from configuration.
    pub fn new(config: HttpProviderConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::Misconfigured(format!("http client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }

    fn models_url(&self) -> String {
        format!("{}/v1/models", self.config.base_url)
    }

    /// Converts the port request to the wire format. The system prompt
    /// becomes a leading system message.
    fn to_wire_request(&self, request: &CompletionRequest) -> WireRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(system) = &request.system_prompt {
            messages.push(WireMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        for Message { role, content } in &request.messages {
            let role = match role {
                MessageRole::System => "system",
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            };
            messages.push(WireMessage {
                role: role.to_string(),
                content: content.clone(),
            });
        }

        WireRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let wire = self.to_wire_request(request);

        self.client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&wire)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    async fn handle_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u32>().ok());
        let body = response.text().await.unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AIError::AuthenticationFailed),
            StatusCode::TOO_MANY_REQUESTS => Err(AIError::RateLimited {
                retry_after_secs: retry_after.unwrap_or(30),
            }),
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => {
                Err(AIError::InvalidRequest(body))
            }
            s if s.is_server_error() => {
                Err(AIError::unavailable(format!("server error {}: {}", s, body)))
            }
            s => Err(AIError::network(format!("unexpected status {}: {}", s, body))),
        }
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("response body: {}", e)))?;

        let choice = wire
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("response contained no choices"))?;

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            usage: wire
                .usage
                .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens)),
            model: wire.model,
            finish_reason: Some(parse_finish_reason(choice.finish_reason.as_deref())),
        })
    }
}

#[async_trait]
impl AIProvider for HttpAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(&request).await?;
        let response = self.handle_status(response).await?;
        self.parse_response(response).await
    }

    async fn health_check(&self) -> ProviderHealth {
        let result = self
            .client
            .get(self.models_url())
            .bearer_auth(self.config.api_key())
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => ProviderHealth::healthy(),
            Ok(response) if response.status() == StatusCode::TOO_MANY_REQUESTS => {
                ProviderHealth::degraded("rate limited")
            }
            Ok(response) => {
                ProviderHealth::unavailable(format!("status {}", response.status()))
            }
            Err(e) => ProviderHealth::unavailable(e.to_string()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai", &self.config.model)
    }
}

fn parse_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        Some("error") => FinishReason::Error,
        _ => FinishReason::Stop,
    }
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    model: String,
    choices: Vec<WireChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
