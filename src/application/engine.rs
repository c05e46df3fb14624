//! Triage engine facade.
//!
//! One constructor-injected service object exposing the whole pipeline:
//! symptom analysis, follow-up question generation, doctor matching, and
//! AI-backed response generation. No globals; independently configured
//! engines can coexist in one process.

use std::sync::Arc;
use tracing::info;

use crate::adapters::ai::{AIOrchestrator, AggregateHealth, OrchestratorError};
use crate::config::AppConfig;
use crate::domain::conversation::{ChatRole, ConversationContext};
use crate::domain::matching::{
    DoctorMatchingEngine, DoctorRecommendations, MatchingError, RecommendationRequest,
};
use crate::domain::questions::{PrioritizedQuestion, QuestionEngine};
use crate::domain::response::{NaturalLanguageResponse, ResponseSanitizer};
use crate::domain::triage::{
    EmergencyDetector, Symptom, SymptomAnalysis, SymptomExtractor, UrgencyClassifier,
};
use crate::ports::{CompletionRequest, DoctorDirectory, MessageRole, ProximityResolver};

/// Everything the engine needs to phrase one AI response.
#[derive(Debug, Clone)]
pub struct PromptContext {
    /// The user's current message, verbatim.
    pub user_message: String,
    /// Conversation so far.
    pub context: ConversationContext,
    /// Structured analysis of the current turn, when available.
    pub analysis: Option<SymptomAnalysis>,
}

impl PromptContext {
    /// Creates a prompt context for one user turn.
    pub fn new(user_message: impl Into<String>, context: ConversationContext) -> Self {
        Self {
            user_message: user_message.into(),
            context,
            analysis: None,
        }
    }

    /// Attaches the turn's symptom analysis.
    pub fn with_analysis(mut self, analysis: SymptomAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }
}

/// Facade over the triage pipeline.
pub struct TriageEngine {
    extractor: SymptomExtractor,
    emergency: EmergencyDetector,
    classifier: UrgencyClassifier,
    questions: QuestionEngine,
    matching: DoctorMatchingEngine,
    orchestrator: AIOrchestrator,
    sanitizer: ResponseSanitizer,
    max_tokens: u32,
    temperature: f32,
}

impl TriageEngine {
    /// Wires the engine from configuration and injected ports.
    pub fn new(
        config: &AppConfig,
        directory: Arc<dyn DoctorDirectory>,
        proximity: Arc<dyn ProximityResolver>,
        orchestrator: AIOrchestrator,
    ) -> Self {
        Self {
            extractor: SymptomExtractor::new(),
            emergency: EmergencyDetector::new(),
            classifier: UrgencyClassifier::new(&config.triage),
            questions: QuestionEngine::new(&config.triage),
            matching: DoctorMatchingEngine::new(directory, proximity, &config.matching),
            orchestrator,
            sanitizer: ResponseSanitizer::new(),
            max_tokens: config.ai.max_tokens,
            temperature: config.ai.temperature,
        }
    }

    /// Runs extraction, emergency detection, and classification on one
    /// message. Never fails; unparseable text yields an empty, Low-urgency
    /// analysis.
    pub fn analyze_symptoms(&self, text: &str) -> SymptomAnalysis {
        let symptoms = self.extractor.extract(text);
        let flags = self.emergency.detect(text);
        let analysis = self.classifier.analyze(symptoms, flags);

        if analysis.is_emergency() {
            info!(
                flags = analysis.emergency_flags.len(),
                "turn classified as emergency"
            );
        }
        analysis
    }

    /// Generates up to `max_questions` prioritized follow-up questions.
    pub fn generate_questions(
        &self,
        symptoms: &[Symptom],
        context: &ConversationContext,
        max_questions: usize,
    ) -> Vec<PrioritizedQuestion> {
        self.questions.generate(symptoms, context, max_questions)
    }

    /// Retrieves and ranks doctor candidates for the request.
    pub async fn recommend_doctors(
        &self,
        request: RecommendationRequest,
    ) -> Result<DoctorRecommendations, MatchingError> {
        self.matching.recommend(request).await
    }

    /// Produces a sanitized natural-language reply through the provider
    /// chain.
    pub async fn generate_natural_language_response(
        &self,
        prompt: PromptContext,
    ) -> Result<NaturalLanguageResponse, OrchestratorError> {
        let request = self.build_completion_request(&prompt);
        let orchestrated = self.orchestrator.complete(request).await?;

        if orchestrated.fallback_used {
            info!(
                provider = %orchestrated.provider,
                attempts = orchestrated.attempts,
                "response served by fallback provider"
            );
        }
        Ok(self.sanitizer.sanitize(&orchestrated.response.content))
    }

    /// Aggregate provider-chain health.
    pub async fn ai_health(&self) -> AggregateHealth {
        self.orchestrator.health().await
    }

    fn build_completion_request(&self, prompt: &PromptContext) -> CompletionRequest {
        let mut request = CompletionRequest::new()
            .with_system_prompt(system_prompt(prompt))
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        for message in prompt.context.recent_messages(6) {
            let role = match message.role {
                ChatRole::User => MessageRole::User,
                ChatRole::Assistant => MessageRole::Assistant,
            };
            request = request.with_message(role, message.content.clone());
        }
        request.with_message(MessageRole::User, prompt.user_message.clone())
    }
}

/// Builds the system prompt, folding in the structured analysis so the
/// model phrases rather than re-derives the triage outcome.
fn system_prompt(prompt: &PromptContext) -> String {
    let mut parts = vec![
        "You are a medical triage assistant. Be empathetic and concise. \
         Never state a diagnosis as certain; always recommend professional \
         care when symptoms warrant it."
            .to_string(),
    ];

    if let Some(analysis) = &prompt.analysis {
        parts.push(format!("Assessed urgency: {}.", analysis.urgency_level));
        if !analysis.symptoms.is_empty() {
            parts.push(format!(
                "Reported symptoms: {}.",
                analysis.symptom_keywords().join(", ")
            ));
        }
        if analysis.is_emergency() {
            parts.push(
                "Emergency indicators were detected. Urge the user to seek \
                 emergency care immediately."
                    .to_string(),
            );
        }
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, RetryPolicy};
    use crate::adapters::directory::InMemoryDoctorDirectory;
    use crate::ports::{DoctorRecord, NoProximity};
    use std::time::Duration;
    use uuid::Uuid;

    fn sample_doctors() -> Vec<DoctorRecord> {
        vec![DoctorRecord {
            id: "c1".to_string(),
            name: "Dr. Hart".to_string(),
            specialization: "Cardiology".to_string(),
            sub_specializations: Vec::new(),
            rating: 4.8,
            review_count: 120,
            years_experience: 15,
            consultation_fee: 220.0,
            office_address: "9 Harbor Rd".to_string(),
            languages: vec!["english".to_string()],
            accepting_patients: true,
        }]
    }

    fn engine_with(provider: MockAIProvider) -> TriageEngine {
        let orchestrator = AIOrchestrator::new(
            Arc::new(provider),
            RetryPolicy::new(2, Duration::ZERO),
            Duration::from_millis(200),
        );
        TriageEngine::new(
            &AppConfig::default(),
            Arc::new(InMemoryDoctorDirectory::new(sample_doctors())),
            Arc::new(NoProximity),
            orchestrator,
        )
    }

    #[test]
    fn analysis_flows_through_the_pipeline() {
        let engine = engine_with(MockAIProvider::new());
        let analysis = engine.analyze_symptoms("severe chest pain and shortness of breath");

        assert_eq!(analysis.symptoms.len(), 2);
        assert!(analysis
            .recommended_specialties
            .iter()
            .any(|s| s == "cardiology"));
    }

    #[tokio::test]
    async fn recommendations_use_the_injected_directory() {
        let engine = engine_with(MockAIProvider::new());
        let analysis = engine.analyze_symptoms("chest pain");

        let result = engine
            .recommend_doctors(RecommendationRequest {
                specialties: analysis.recommended_specialties,
                urgency_level: analysis.urgency_level,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(result.doctors.len(), 1);
        assert_eq!(result.doctors[0].record.name, "Dr. Hart");
    }

    #[tokio::test]
    async fn response_generation_sanitizes_output() {
        let engine = engine_with(
            MockAIProvider::new().with_response("<|im_start|>Please see a doctor soon."),
        );
        let prompt = PromptContext::new("I have a headache", ConversationContext::new(Uuid::new_v4()));

        let response = engine
            .generate_natural_language_response(prompt)
            .await
            .unwrap();

        assert_eq!(response.content, "Please see a doctor soon.");
        assert!(!response.warnings.is_empty());
    }

    #[test]
    fn system_prompt_carries_the_analysis() {
        let engine = engine_with(MockAIProvider::new());
        let analysis = engine.analyze_symptoms("chest pain and shortness of breath");
        let prompt = PromptContext::new("what should I do?", ConversationContext::new(Uuid::new_v4()))
            .with_analysis(analysis);

        let text = system_prompt(&prompt);
        assert!(text.contains("chest pain"));
        assert!(text.contains("Assessed urgency"));
    }
}
