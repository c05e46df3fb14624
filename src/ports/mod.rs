//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - prompt-in, text-out completion oracle with health checks
//! - `DoctorDirectory` - keyword/specialty search over the doctor catalog
//! - `ProximityResolver` - injected distance lookup (geocoding collaborator)

mod ai_provider;
mod doctor_directory;
mod proximity;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, HealthStatus,
    Message, MessageRole, ProviderHealth, ProviderInfo, TokenUsage,
};
pub use doctor_directory::{
    DirectoryError, DoctorDirectory, DoctorRecord, SearchFilters, SearchPage,
};
pub use proximity::{NoProximity, ProximityResolver};
