//! AI Orchestrator - retry, timeout, and provider failover.
//!
//! The primary provider is retried with exponential backoff, each attempt
//! bounded by a timeout. When the primary is exhausted, fallbacks are tried
//! once each, in order, after an independent health check. The response
//! carries metadata about which provider served it and how many attempts
//! it took, so callers can observe degradation without parsing logs.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{error, warn};

use super::retry::RetryPolicy;
use crate::config::AiConfig;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, HealthStatus, ProviderHealth,
};

/// A completion with orchestration metadata.
#[derive(Debug, Clone)]
pub struct OrchestratedResponse {
    /// The provider's completion.
    pub response: CompletionResponse,
    /// Name of the provider that served the request.
    pub provider: String,
    /// Attempts made against the serving provider.
    pub attempts: u32,
    /// Whether a fallback served the request.
    pub fallback_used: bool,
}

/// One provider's terminal failure during orchestration.
#[derive(Debug, Clone)]
pub struct ProviderAttempt {
    /// Provider name.
    pub provider: String,
    /// Last error from that provider.
    pub error: AIError,
    /// Attempts made against it.
    pub attempts: u32,
}

/// Orchestration errors.
#[derive(Debug, Clone, Error)]
pub enum OrchestratorError {
    /// Primary and every fallback failed or was skipped as unhealthy.
    #[error("all AI providers failed ({} tried)", attempts.len())]
    AllProvidersFailed { attempts: Vec<ProviderAttempt> },
}

impl OrchestratorError {
    /// The per-provider failures behind this error.
    pub fn attempts(&self) -> &[ProviderAttempt] {
        match self {
            Self::AllProvidersFailed { attempts } => attempts,
        }
    }
}

/// Aggregate health across the provider chain.
#[derive(Debug, Clone)]
pub struct AggregateHealth {
    /// Overall status: healthy primary, degraded-to-fallback, or down.
    pub status: HealthStatus,
    /// Per-provider reports, primary first.
    pub providers: Vec<(String, ProviderHealth)>,
}

/// Routes completion requests across a primary provider and ordered
/// fallbacks.
pub struct AIOrchestrator {
    primary: Arc<dyn AIProvider>,
    fallbacks: Vec<Arc<dyn AIProvider>>,
    policy: RetryPolicy,
    attempt_timeout: Duration,
}

impl AIOrchestrator {
    /// Creates an orchestrator with a primary provider and no fallbacks.
    pub fn new(primary: Arc<dyn AIProvider>, policy: RetryPolicy, attempt_timeout: Duration) -> Self {
        Self {
            primary,
            fallbacks: Vec::new(),
            policy,
            attempt_timeout,
        }
    }

    /// Creates an orchestrator from configuration.
    pub fn from_config(primary: Arc<dyn AIProvider>, config: &AiConfig) -> Self {
        Self::new(
            primary,
            // max_retries counts retries after the first attempt
            RetryPolicy::new(config.max_retries + 1, config.backoff_base()),
            config.timeout(),
        )
    }

    /// Appends a fallback provider; order is the order tried.
    pub fn with_fallback(mut self, fallback: Arc<dyn AIProvider>) -> Self {
        self.fallbacks.push(fallback);
        self
    }

    /// Runs a completion through the provider chain.
    pub async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<OrchestratedResponse, OrchestratorError> {
        let mut failures = Vec::new();

        let primary_name = self.primary.provider_info().name;
        match self.attempt_provider(&self.primary, &request, self.policy).await {
            Ok((response, attempts)) => {
                return Ok(OrchestratedResponse {
                    response,
                    provider: primary_name,
                    attempts,
                    fallback_used: false,
                });
            }
            Err((err, attempts)) => {
                warn!(
                    provider = %primary_name,
                    attempts,
                    error = %err,
                    "primary AI provider exhausted, trying fallbacks"
                );
                failures.push(ProviderAttempt {
                    provider: primary_name,
                    error: err,
                    attempts,
                });
            }
        }

        for fallback in &self.fallbacks {
            let name = fallback.provider_info().name;

            let health = fallback.health_check().await;
            if !health.is_usable() {
                warn!(provider = %name, "skipping unhealthy fallback provider");
                failures.push(ProviderAttempt {
                    provider: name,
                    error: AIError::unavailable(
                        health.detail.unwrap_or_else(|| "failed health check".to_string()),
                    ),
                    attempts: 0,
                });
                continue;
            }

            match self
                .attempt_provider(fallback, &request, RetryPolicy::once())
                .await
            {
                Ok((response, attempts)) => {
                    warn!(provider = %name, "fallback AI provider served the request");
                    return Ok(OrchestratedResponse {
                        response,
                        provider: name,
                        attempts,
                        fallback_used: true,
                    });
                }
                Err((err, attempts)) => {
                    failures.push(ProviderAttempt {
                        provider: name,
                        error: err,
                        attempts,
                    });
                }
            }
        }

        error!(
            providers_tried = failures.len(),
            "all AI providers failed"
        );
        Err(OrchestratorError::AllProvidersFailed { attempts: failures })
    }

    /// Aggregate health: healthy primary wins; a usable fallback keeps the
    /// chain degraded; otherwise the chain is down.
    pub async fn health(&self) -> AggregateHealth {
        let mut providers = Vec::with_capacity(1 + self.fallbacks.len());

        let primary_health = self.primary.health_check().await;
        let primary_ok = primary_health.status == HealthStatus::Healthy;
        providers.push((self.primary.provider_info().name, primary_health));

        let mut any_usable = providers[0].1.is_usable();
        for fallback in &self.fallbacks {
            let health = fallback.health_check().await;
            any_usable |= health.is_usable();
            providers.push((fallback.provider_info().name, health));
        }

        let status = if primary_ok {
            HealthStatus::Healthy
        } else if any_usable {
            HealthStatus::Degraded
        } else {
            HealthStatus::Unavailable
        };

        AggregateHealth { status, providers }
    }

    /// Runs the retry loop for one provider, bounding every attempt by the
    /// configured timeout. An expired attempt drops the in-flight future.
    async fn attempt_provider(
        &self,
        provider: &Arc<dyn AIProvider>,
        request: &CompletionRequest,
        policy: RetryPolicy,
    ) -> Result<(CompletionResponse, u32), (AIError, u32)> {
        let timeout_secs = self.attempt_timeout.as_secs() as u32;
        let mut attempts = 0;

        let result = policy
            .attempt(
                |attempt| {
                    attempts = attempt;
                    let request = request.clone();
                    async move {
                        match timeout(self.attempt_timeout, provider.complete(request)).await {
                            Ok(result) => result,
                            Err(_) => Err(AIError::Timeout { timeout_secs }),
                        }
                    }
                },
                AIError::is_retryable,
            )
            .await;

        match result {
            Ok(response) => Ok((response, attempts)),
            Err(outcome) => Err((outcome.error, outcome.attempts)),
        }
    }
}
