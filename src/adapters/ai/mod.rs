//! AI provider adapters and orchestration.

mod http_provider;
mod mock_provider;
mod orchestrator;
mod retry;

pub use http_provider::{HttpAIProvider, HttpProviderConfig};
pub use mock_provider::MockAIProvider;
pub use orchestrator::{
    AIOrchestrator, AggregateHealth, OrchestratedResponse, OrchestratorError, ProviderAttempt,
};
pub use retry::{AttemptOutcome, RetryPolicy};
