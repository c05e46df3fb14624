//! Doctor retrieval and ranking.
//!
//! Maps generic specialty tokens to directory labels, queries the directory
//! once per label, merges and deduplicates candidates, scores them with the
//! urgency-weighted model, and returns a bounded ranked list with advice.

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::scoring::{DoctorScorer, ScoredDoctor};
use super::specialty::map_specialties;
use crate::config::MatchingConfig;
use crate::domain::foundation::UrgencyLevel;
use crate::ports::{DirectoryError, DoctorDirectory, ProximityResolver, SearchFilters};

/// A doctor recommendation request from the conversation controller.
#[derive(Debug, Clone, Default)]
pub struct RecommendationRequest {
    /// Generic specialty tokens, usually from `SymptomAnalysis`.
    pub specialties: Vec<String>,
    /// Urgency level driving the scoring weights.
    pub urgency_level: UrgencyLevel,
    /// Patient location, if shared.
    pub user_location: Option<String>,
    /// Result cap; the configured default applies when `None`.
    pub max_results: Option<usize>,
    /// Fee ceiling, if stated.
    pub max_fee: Option<f64>,
    /// Required languages, if stated.
    pub languages: Option<Vec<String>>,
}

/// Specialty guidance returned with the ranked list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialtyAdvice {
    /// The specialty searched first.
    pub primary_specialty: String,
    /// Other specialties worth considering.
    pub alternative_specialties: Vec<String>,
    /// Care-seeking advice for the request's urgency level.
    pub urgency_advice: String,
}

/// Ranked recommendation result.
#[derive(Debug, Clone)]
pub struct DoctorRecommendations {
    /// Ranked doctors, best first, truncated to the requested maximum.
    pub doctors: Vec<ScoredDoctor>,
    /// Distinct candidates found before truncation.
    pub total_found: usize,
    /// Specialty and urgency guidance.
    pub recommendations: SpecialtyAdvice,
}

/// Matching failures. Scoring itself never fails; only retrieval can.
#[derive(Debug, Clone, Error)]
pub enum MatchingError {
    #[error("doctor directory error: {0}")]
    Directory(#[from] DirectoryError),
}

/// Retrieves, scores, and ranks doctor candidates.
pub struct DoctorMatchingEngine {
    directory: Arc<dyn DoctorDirectory>,
    proximity: Arc<dyn ProximityResolver>,
    scorer: DoctorScorer,
    page_size: usize,
    default_max_results: usize,
}

impl DoctorMatchingEngine {
    /// Creates an engine over the given directory and proximity ports.
    pub fn new(
        directory: Arc<dyn DoctorDirectory>,
        proximity: Arc<dyn ProximityResolver>,
        config: &MatchingConfig,
    ) -> Self {
        Self {
            directory,
            proximity,
            scorer: DoctorScorer::new(),
            page_size: config.page_size,
            default_max_results: config.max_results,
        }
    }

    /// Returns a ranked, bounded list of candidates with advice.
    pub async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> Result<DoctorRecommendations, MatchingError> {
        let labels = map_specialties(&request.specialties);
        let candidates = self.retrieve(&labels, &request).await?;
        let total_found = candidates.len();

        let mut scored: Vec<ScoredDoctor> = candidates
            .iter()
            .map(|record| {
                let distance = request.user_location.as_deref().and_then(|loc| {
                    self.proximity.distance_miles(loc, &record.office_address)
                });
                self.scorer.score(
                    record,
                    &labels,
                    distance,
                    request.max_fee,
                    request.urgency_level,
                )
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        let max_results = request.max_results.unwrap_or(self.default_max_results);
        scored.truncate(max_results);

        debug!(
            total_found,
            returned = scored.len(),
            urgency = %request.urgency_level,
            "ranked doctor candidates"
        );

        Ok(DoctorRecommendations {
            doctors: scored,
            total_found,
            recommendations: SpecialtyAdvice {
                primary_specialty: labels[0].clone(),
                alternative_specialties: labels[1..].to_vec(),
                urgency_advice: request.urgency_level.advice().to_string(),
            },
        })
    }

    /// One bounded query per label; merge and dedupe by provider id,
    /// first occurrence kept.
    async fn retrieve(
        &self,
        labels: &[String],
        request: &RecommendationRequest,
    ) -> Result<Vec<crate::ports::DoctorRecord>, MatchingError> {
        let mut merged = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for label in labels {
            let mut filters = SearchFilters::for_specialization(label.clone());
            if let Some(max_fee) = request.max_fee {
                filters = filters.with_max_fee(max_fee);
            }
            if let Some(languages) = &request.languages {
                filters = filters.with_languages(languages.clone());
            }

            let page = self.directory.search(&filters, self.page_size).await?;
            for record in page.candidates {
                if seen.insert(record.id.clone()) {
                    merged.push(record);
                }
            }
        }

        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::directory::InMemoryDoctorDirectory;
    use crate::ports::{DoctorRecord, NoProximity};

    fn doctor(id: &str, specialization: &str, rating: f64) -> DoctorRecord {
        DoctorRecord {
            id: id.to_string(),
            name: format!("Dr. {}", id),
            specialization: specialization.to_string(),
            sub_specializations: Vec::new(),
            rating,
            review_count: 60,
            years_experience: 10,
            consultation_fee: 150.0,
            office_address: "1 Clinic Way".to_string(),
            languages: vec!["english".to_string()],
            accepting_patients: true,
        }
    }

    fn engine(records: Vec<DoctorRecord>) -> DoctorMatchingEngine {
        DoctorMatchingEngine::new(
            Arc::new(InMemoryDoctorDirectory::new(records)),
            Arc::new(NoProximity),
            &MatchingConfig::default(),
        )
    }

    fn request(specialties: &[&str]) -> RecommendationRequest {
        RecommendationRequest {
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn empty_specialties_default_to_general_practice() {
        let engine = engine(vec![doctor("gp", "General Practice", 4.0)]);
        let result = engine.recommend(request(&[])).await.unwrap();

        assert_eq!(result.recommendations.primary_specialty, "General Practice");
        assert_eq!(result.doctors.len(), 1);
    }

    #[tokio::test]
    async fn results_are_ranked_and_bounded() {
        let records: Vec<DoctorRecord> = (0..10)
            .map(|i| doctor(&format!("doc-{}", i), "Cardiology", 2.0 + 0.3 * i as f64))
            .collect();
        let engine = engine(records);

        let mut req = request(&["cardiology"]);
        req.max_results = Some(4);
        let result = engine.recommend(req).await.unwrap();

        assert_eq!(result.doctors.len(), 4);
        assert_eq!(result.total_found, 10);
        assert!(result.total_found >= result.doctors.len());
        for pair in result.doctors.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        // Best rating surfaces first when everything else is equal.
        assert_eq!(result.doctors[0].record.id, "doc-9");
    }

    #[tokio::test]
    async fn candidates_deduplicate_across_specialty_queries() {
        // One doctor matching both mapped labels must appear once.
        let mut dual = doctor("dual", "Cardiology", 4.5);
        dual.sub_specializations = vec!["Cardiothoracic Surgery".to_string()];
        let engine = engine(vec![dual]);

        let result = engine.recommend(request(&["cardiology"])).await.unwrap();
        assert_eq!(result.total_found, 1);
        assert_eq!(result.doctors.len(), 1);
    }

    #[tokio::test]
    async fn non_accepting_doctors_are_filtered_at_retrieval() {
        let mut closed = doctor("closed", "Cardiology", 5.0);
        closed.accepting_patients = false;
        let engine = engine(vec![closed, doctor("open", "Cardiology", 3.5)]);

        let result = engine.recommend(request(&["cardiology"])).await.unwrap();
        assert_eq!(result.doctors.len(), 1);
        assert_eq!(result.doctors[0].record.id, "open");
    }

    #[tokio::test]
    async fn fee_ceiling_filters_at_retrieval() {
        let mut pricey = doctor("pricey", "Cardiology", 5.0);
        pricey.consultation_fee = 900.0;
        let engine = engine(vec![pricey, doctor("fair", "Cardiology", 3.5)]);

        let mut req = request(&["cardiology"]);
        req.max_fee = Some(200.0);
        let result = engine.recommend(req).await.unwrap();

        assert_eq!(result.doctors.len(), 1);
        assert_eq!(result.doctors[0].record.id, "fair");
    }

    #[tokio::test]
    async fn advice_reflects_urgency() {
        let engine = engine(vec![doctor("gp", "General Practice", 4.0)]);
        let mut req = request(&[]);
        req.urgency_level = UrgencyLevel::Emergency;
        let result = engine.recommend(req).await.unwrap();

        assert!(result
            .recommendations
            .urgency_advice
            .contains("emergency"));
    }

    #[tokio::test]
    async fn alternatives_list_the_remaining_labels() {
        let engine = engine(vec![doctor("c", "Cardiology", 4.0)]);
        let result = engine
            .recommend(request(&["cardiology", "pulmonology"]))
            .await
            .unwrap();

        assert_eq!(result.recommendations.primary_specialty, "Cardiology");
        assert!(result
            .recommendations
            .alternative_specialties
            .contains(&"Pulmonology".to_string()));
    }

    #[tokio::test]
    async fn breakdown_is_always_present() {
        let engine = engine(vec![doctor("c", "Cardiology", 4.0)]);
        let result = engine.recommend(request(&["cardiology"])).await.unwrap();
        let scored = &result.doctors[0];
        assert!(scored.breakdown.specialty_match >= 0.0);
        assert!(scored.breakdown.rating > 0.0);
    }
}
