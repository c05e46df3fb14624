//! End-to-end triage flow: free text in, analysis, questions, and ranked
//! doctor recommendations out.

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use medmatch::adapters::ai::{AIOrchestrator, MockAIProvider, RetryPolicy};
use medmatch::adapters::directory::{FailingDoctorDirectory, InMemoryDoctorDirectory};
use medmatch::adapters::proximity::StaticProximityResolver;
use medmatch::application::TriageEngine;
use medmatch::config::AppConfig;
use medmatch::domain::conversation::{ChatMessage, ConversationContext};
use medmatch::domain::foundation::{Severity, UrgencyLevel};
use medmatch::domain::matching::{MatchingError, RecommendationRequest};
use medmatch::ports::DoctorRecord;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn doctor(id: &str, specialization: &str, rating: f64, address: &str) -> DoctorRecord {
    DoctorRecord {
        id: id.to_string(),
        name: format!("Dr. {}", id),
        specialization: specialization.to_string(),
        sub_specializations: Vec::new(),
        rating,
        review_count: 80,
        years_experience: 12,
        consultation_fee: 180.0,
        office_address: address.to_string(),
        languages: vec!["english".to_string()],
        accepting_patients: true,
    }
}

fn engine() -> TriageEngine {
    init_tracing();
    let directory = InMemoryDoctorDirectory::new(vec![
        doctor("near", "Cardiology", 3.9, "1 Clinic Way"),
        doctor("far", "Cardiology", 4.9, "99 Distant Ave"),
        doctor("gp", "General Practice", 4.2, "5 Village Rd"),
    ]);
    let proximity = StaticProximityResolver::new()
        .with_distance("downtown", "1 Clinic Way", 3.0)
        .with_distance("downtown", "99 Distant Ave", 85.0)
        .with_distance("downtown", "5 Village Rd", 6.0);
    let orchestrator = AIOrchestrator::new(
        Arc::new(MockAIProvider::new().with_response("Take care.")),
        RetryPolicy::new(2, Duration::ZERO),
        Duration::from_millis(500),
    );

    TriageEngine::new(
        &AppConfig::default(),
        Arc::new(directory),
        Arc::new(proximity),
        orchestrator,
    )
}

#[test]
fn severe_chest_pain_with_breathlessness_is_high_urgency() {
    let engine = engine();
    let analysis = engine.analyze_symptoms("I have severe chest pain and shortness of breath");

    assert_eq!(analysis.symptoms.len(), 2);
    assert!(analysis.symptoms.iter().all(|s| s.severity == Severity::Severe));
    assert_eq!(analysis.urgency_score, 9);
    assert_eq!(analysis.urgency_level, UrgencyLevel::High);
    assert!(analysis.emergency_flags.is_empty());
    assert!(analysis
        .possible_conditions
        .iter()
        .any(|c| c.contains("cardiac")));
    assert_eq!(analysis.recommended_specialties[0], "cardiology");
}

#[test]
fn emergency_phrase_dominates_regardless_of_symptom_scores() {
    let engine = engine();
    let analysis = engine.analyze_symptoms("mild crushing chest pain since this morning");

    assert_eq!(analysis.urgency_level, UrgencyLevel::Emergency);
    assert_eq!(analysis.emergency_flags.len(), 1);
    assert!(!analysis.emergency_flags[0].immediate_action.is_empty());
}

#[test]
fn text_without_catalog_hits_yields_empty_low_analysis() {
    let engine = engine();
    let analysis = engine.analyze_symptoms("my bicycle makes a funny noise");

    assert!(analysis.symptoms.is_empty());
    assert_eq!(analysis.urgency_score, 0);
    assert_eq!(analysis.urgency_level, UrgencyLevel::Low);
}

#[test]
fn duration_survives_the_pipeline() {
    let engine = engine();
    let analysis = engine.analyze_symptoms("I've had a cough for 3 days");

    assert_eq!(analysis.symptoms.len(), 1);
    assert_eq!(analysis.symptoms[0].duration.as_deref(), Some("3 days"));
}

#[test]
fn questions_are_bounded_deduplicated_and_ordered() {
    let engine = engine();
    let analysis = engine.analyze_symptoms("chest pain and shortness of breath");
    let context = ConversationContext::new(Uuid::new_v4())
        .with_message(ChatMessage::user("chest pain and shortness of breath"));

    let questions = engine.generate_questions(&analysis.symptoms, &context, 3);

    assert!(questions.len() <= 3);
    assert!(!questions.is_empty());
    for pair in questions.windows(2) {
        assert!(pair[0].priority >= pair[1].priority);
    }
    let mut texts: Vec<String> = questions
        .iter()
        .map(|q| q.question.trim().to_lowercase())
        .collect();
    texts.sort();
    texts.dedup();
    assert_eq!(texts.len(), questions.len());
}

#[tokio::test]
async fn urgency_reorders_doctor_recommendations() {
    let engine = engine();

    let mut emergency_request = RecommendationRequest {
        specialties: vec!["cardiology".to_string()],
        urgency_level: UrgencyLevel::Emergency,
        user_location: Some("downtown".to_string()),
        ..Default::default()
    };
    let result = engine.recommend_doctors(emergency_request.clone()).await.unwrap();
    assert_eq!(result.doctors[0].record.id, "near");

    emergency_request.urgency_level = UrgencyLevel::Low;
    let result = engine.recommend_doctors(emergency_request).await.unwrap();
    assert_eq!(result.doctors[0].record.id, "far");
}

#[tokio::test]
async fn recommendations_report_totals_and_advice() {
    let engine = engine();
    let result = engine
        .recommend_doctors(RecommendationRequest {
            specialties: vec!["cardiology".to_string()],
            urgency_level: UrgencyLevel::High,
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(result.total_found >= result.doctors.len());
    assert_eq!(result.recommendations.primary_specialty, "Cardiology");
    assert!(!result.recommendations.urgency_advice.is_empty());
    for scored in &result.doctors {
        assert!(scored.score > 0.0);
        assert!(scored.breakdown.specialty_match >= 0.0);
    }
}

#[tokio::test]
async fn empty_specialties_route_to_general_practice() {
    let engine = engine();
    let result = engine
        .recommend_doctors(RecommendationRequest::default())
        .await
        .unwrap();

    assert_eq!(result.recommendations.primary_specialty, "General Practice");
    assert_eq!(result.doctors.len(), 1);
    assert_eq!(result.doctors[0].record.id, "gp");
}

#[tokio::test]
async fn directory_outage_surfaces_a_typed_error() {
    let orchestrator = AIOrchestrator::new(
        Arc::new(MockAIProvider::new()),
        RetryPolicy::new(1, Duration::ZERO),
        Duration::from_millis(500),
    );
    let engine = TriageEngine::new(
        &AppConfig::default(),
        Arc::new(FailingDoctorDirectory),
        Arc::new(StaticProximityResolver::new()),
        orchestrator,
    );

    let err = engine
        .recommend_doctors(RecommendationRequest {
            specialties: vec!["cardiology".to_string()],
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, MatchingError::Directory(_)));
}
