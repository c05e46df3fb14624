//! Mock AI provider for tests.
//!
//! Scriptable fixture: queue responses and errors in order, set a fixed
//! health report, and optionally delay each call to exercise timeouts.
//! Once the script runs out, the default response repeats.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderHealth,
    ProviderInfo, TokenUsage,
};

/// Scriptable AI provider for unit and integration tests.
pub struct MockAIProvider {
    name: String,
    script: Mutex<VecDeque<Result<String, AIError>>>,
    default_response: String,
    default_error: Option<AIError>,
    delay: Option<Duration>,
    health: ProviderHealth,
    call_count: AtomicU32,
}

impl MockAIProvider {
    /// Creates a mock that answers every call with a canned response.
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            script: Mutex::new(VecDeque::new()),
            default_response: "mock response".to_string(),
            default_error: None,
            delay: None,
            health: ProviderHealth::healthy(),
            call_count: AtomicU32::new(0),
        }
    }

    /// Sets the provider name reported in `provider_info`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the default response used once the script is exhausted.
    pub fn with_response(mut self, content: impl Into<String>) -> Self {
        self.default_response = content.into();
        self
    }

    /// Queues a scripted success for the next unclaimed call.
    pub fn then_respond(self, content: impl Into<String>) -> Self {
        self.script
            .lock()
            .expect("mock script lock")
            .push_back(Ok(content.into()));
        self
    }

    /// Queues a scripted error for the next unclaimed call.
    pub fn then_fail(self, error: AIError) -> Self {
        self.script
            .lock()
            .expect("mock script lock")
            .push_back(Err(error));
        self
    }

    /// Fails every unscripted call with clones of the given error.
    pub fn always_failing(mut self, error: AIError) -> Self {
        self.default_error = Some(error);
        self
    }

    /// Delays each call, for timeout tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the health report.
    pub fn with_health(mut self, health: ProviderHealth) -> Self {
        self.health = health;
        self
    }

    /// Completion calls made so far.
    pub fn calls(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self.script.lock().expect("mock script lock").pop_front();
        let content = match scripted {
            Some(Ok(content)) => content,
            Some(Err(err)) => return Err(err),
            None => match &self.default_error {
                Some(err) => return Err(err.clone()),
                None => self.default_response.clone(),
            },
        };

        Ok(CompletionResponse {
            content,
            usage: Some(TokenUsage::new(50, 25)),
            model: "mock-model".to_string(),
            finish_reason: Some(FinishReason::Stop),
        })
    }

    async fn health_check(&self) -> ProviderHealth {
        self.health.clone()
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new(self.name.clone(), "mock-model")
    }
}
