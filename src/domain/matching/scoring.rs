//! Multi-factor doctor scoring.
//!
//! Five sub-scores in [0,100] are combined by an urgency-dependent weighted
//! sum. The weight table shifts emphasis toward proximity and availability
//! as urgency rises; specialty match (0.3) and fee (0.1) stay fixed.
//! The breakdown is always returned alongside the total so every ranking
//! decision can be audited.

use serde::{Deserialize, Serialize};

use super::specialty::GENERAL_PRACTICE;
use crate::domain::foundation::UrgencyLevel;
use crate::ports::DoctorRecord;

/// Per-factor components of a doctor's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub specialty_match: f64,
    pub rating: f64,
    pub proximity: f64,
    pub availability: f64,
    pub fee: f64,
}

/// A directory record with its request-scoped score.
///
/// Recomputed on every request; weights depend on urgency, so rankings are
/// never reused across urgency levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDoctor {
    pub record: DoctorRecord,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub distance: Option<f64>,
}

/// Rating/proximity/availability weights for one urgency level.
///
/// Each triple sums to 1.0; specialty (0.3) and fee (0.1) are added on top.
#[derive(Debug, Clone, Copy)]
struct UrgencyWeights {
    rating: f64,
    proximity: f64,
    availability: f64,
}

const SPECIALTY_WEIGHT: f64 = 0.3;
const FEE_WEIGHT: f64 = 0.1;

fn weights_for(urgency: UrgencyLevel) -> UrgencyWeights {
    match urgency {
        UrgencyLevel::Low => UrgencyWeights {
            rating: 0.7,
            proximity: 0.2,
            availability: 0.1,
        },
        UrgencyLevel::Medium => UrgencyWeights {
            rating: 0.5,
            proximity: 0.3,
            availability: 0.2,
        },
        UrgencyLevel::High => UrgencyWeights {
            rating: 0.3,
            proximity: 0.4,
            availability: 0.3,
        },
        UrgencyLevel::Emergency => UrgencyWeights {
            rating: 0.1,
            proximity: 0.6,
            availability: 0.3,
        },
    }
}

/// Scores directory candidates against an inferred care need.
#[derive(Debug, Clone, Default)]
pub struct DoctorScorer;

impl DoctorScorer {
    /// Creates a new scorer.
    pub fn new() -> Self {
        Self
    }

    /// Scores one candidate.
    ///
    /// `target_specialties` are the mapped directory labels being searched;
    /// `distance` is the injected proximity, `None` when unknown.
    pub fn score(
        &self,
        record: &DoctorRecord,
        target_specialties: &[String],
        distance: Option<f64>,
        max_fee: Option<f64>,
        urgency: UrgencyLevel,
    ) -> ScoredDoctor {
        let breakdown = ScoreBreakdown {
            specialty_match: specialty_match_score(record, target_specialties),
            rating: rating_score(record.rating, record.review_count),
            proximity: proximity_score(distance),
            availability: availability_score(record),
            fee: fee_score(record.consultation_fee, max_fee),
        };

        let w = weights_for(urgency);
        let score = SPECIALTY_WEIGHT * breakdown.specialty_match
            + w.rating * breakdown.rating
            + w.proximity * breakdown.proximity
            + w.availability * breakdown.availability
            + FEE_WEIGHT * breakdown.fee;

        ScoredDoctor {
            record: record.clone(),
            score,
            breakdown,
            distance,
        }
    }
}

/// 100 exact, 90 sub-specialization, 70 partial text, 50 general/family
/// practice fallback, 20 otherwise.
fn specialty_match_score(record: &DoctorRecord, targets: &[String]) -> f64 {
    let specialization = record.specialization.to_lowercase();

    for target in targets {
        let target = target.to_lowercase();
        if specialization == target {
            return 100.0;
        }
        if record
            .sub_specializations
            .iter()
            .any(|sub| sub.to_lowercase() == target)
        {
            return 90.0;
        }
        if specialization.contains(&target) || target.contains(&specialization) {
            return 70.0;
        }
    }

    let general = GENERAL_PRACTICE.to_lowercase();
    if specialization == general || specialization == "family medicine" {
        return 50.0;
    }
    20.0
}

/// `(rating/5)*100`, discounted by review-count confidence.
fn rating_score(rating: f64, review_count: u32) -> f64 {
    let base = (rating.clamp(0.0, 5.0) / 5.0) * 100.0;
    let confidence = match review_count {
        n if n >= 50 => 1.0,
        n if n >= 20 => 0.9,
        n if n >= 10 => 0.8,
        n if n >= 5 => 0.7,
        _ => 0.5,
    };
    base * confidence
}

/// Bucketed by miles; unknown distance scores neutrally.
fn proximity_score(distance: Option<f64>) -> f64 {
    let Some(miles) = distance else {
        return 50.0;
    };
    match miles {
        m if m <= 5.0 => 100.0,
        m if m <= 10.0 => 90.0,
        m if m <= 20.0 => 75.0,
        m if m <= 50.0 => 50.0,
        m if m <= 100.0 => 25.0,
        _ => 10.0,
    }
}

/// Base 70, adjusted by experience; 0 when not accepting patients.
fn availability_score(record: &DoctorRecord) -> f64 {
    if !record.accepting_patients {
        return 0.0;
    }
    let mut score: f64 = 70.0;
    if record.years_experience < 5 {
        score += 20.0;
    }
    if record.years_experience > 20 {
        score -= 10.0;
    }
    score.clamp(0.0, 100.0)
}

/// Lower fee scores higher; over-ceiling fees score 0.
fn fee_score(fee: f64, max_fee: Option<f64>) -> f64 {
    if max_fee.is_some_and(|ceiling| fee > ceiling) {
        return 0.0;
    }
    match fee {
        f if f <= 100.0 => 100.0,
        f if f <= 200.0 => 80.0,
        f if f <= 300.0 => 60.0,
        f if f <= 400.0 => 40.0,
        f if f <= 500.0 => 30.0,
        _ => 20.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record() -> DoctorRecord {
        DoctorRecord {
            id: "doc-1".to_string(),
            name: "Dr. Test".to_string(),
            specialization: "Cardiology".to_string(),
            sub_specializations: vec!["Electrophysiology".to_string()],
            rating: 4.5,
            review_count: 60,
            years_experience: 12,
            consultation_fee: 180.0,
            office_address: "12 Main St".to_string(),
            languages: vec!["english".to_string()],
            accepting_patients: true,
        }
    }

    fn targets(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn specialty_match_tiers() {
        let mut r = record();
        assert_eq!(specialty_match_score(&r, &targets(&["Cardiology"])), 100.0);
        assert_eq!(
            specialty_match_score(&r, &targets(&["Electrophysiology"])),
            90.0
        );

        r.specialization = "Pediatric Cardiology".to_string();
        r.sub_specializations.clear();
        assert_eq!(specialty_match_score(&r, &targets(&["Cardiology"])), 70.0);

        r.specialization = "General Practice".to_string();
        assert_eq!(specialty_match_score(&r, &targets(&["Neurology"])), 50.0);

        r.specialization = "Dermatology".to_string();
        assert_eq!(specialty_match_score(&r, &targets(&["Neurology"])), 20.0);
    }

    #[test]
    fn rating_confidence_discount() {
        assert_eq!(rating_score(5.0, 100), 100.0);
        assert_eq!(rating_score(5.0, 25), 90.0);
        assert_eq!(rating_score(5.0, 12), 80.0);
        assert_eq!(rating_score(5.0, 6), 70.0);
        assert_eq!(rating_score(5.0, 2), 50.0);
        assert_eq!(rating_score(0.0, 100), 0.0);
    }

    #[test]
    fn proximity_buckets() {
        assert_eq!(proximity_score(Some(3.0)), 100.0);
        assert_eq!(proximity_score(Some(8.0)), 90.0);
        assert_eq!(proximity_score(Some(15.0)), 75.0);
        assert_eq!(proximity_score(Some(40.0)), 50.0);
        assert_eq!(proximity_score(Some(80.0)), 25.0);
        assert_eq!(proximity_score(Some(300.0)), 10.0);
        assert_eq!(proximity_score(None), 50.0);
    }

    #[test]
    fn availability_experience_adjustments() {
        let mut r = record();
        assert_eq!(availability_score(&r), 70.0);

        r.years_experience = 3;
        assert_eq!(availability_score(&r), 90.0);

        r.years_experience = 25;
        assert_eq!(availability_score(&r), 60.0);

        r.accepting_patients = false;
        assert_eq!(availability_score(&r), 0.0);
    }

    #[test]
    fn fee_buckets_and_ceiling() {
        assert_eq!(fee_score(90.0, None), 100.0);
        assert_eq!(fee_score(180.0, None), 80.0);
        assert_eq!(fee_score(280.0, None), 60.0);
        assert_eq!(fee_score(380.0, None), 40.0);
        assert_eq!(fee_score(480.0, None), 30.0);
        assert_eq!(fee_score(600.0, None), 20.0);
        assert_eq!(fee_score(300.0, Some(250.0)), 0.0);
    }

    #[test]
    fn urgency_shifts_weight_toward_proximity() {
        let scorer = DoctorScorer::new();
        let near = {
            let mut r = record();
            r.rating = 3.0;
            r
        };
        let far_but_loved = {
            let mut r = record();
            r.id = "doc-2".to_string();
            r.rating = 5.0;
            r
        };
        let t = targets(&["Cardiology"]);

        // Emergency: the nearby doctor wins despite the lower rating.
        let near_e = scorer.score(&near, &t, Some(2.0), None, UrgencyLevel::Emergency);
        let far_e = scorer.score(&far_but_loved, &t, Some(80.0), None, UrgencyLevel::Emergency);
        assert!(near_e.score > far_e.score);

        // Low urgency: the better-rated doctor wins despite distance.
        let near_l = scorer.score(&near, &t, Some(2.0), None, UrgencyLevel::Low);
        let far_l = scorer.score(&far_but_loved, &t, Some(80.0), None, UrgencyLevel::Low);
        assert!(far_l.score > near_l.score);
    }

    #[test]
    fn breakdown_travels_with_the_score() {
        let scorer = DoctorScorer::new();
        let scored = scorer.score(
            &record(),
            &targets(&["Cardiology"]),
            Some(4.0),
            None,
            UrgencyLevel::Medium,
        );
        assert_eq!(scored.breakdown.specialty_match, 100.0);
        assert_eq!(scored.breakdown.proximity, 100.0);
        assert_eq!(scored.distance, Some(4.0));
        assert!(scored.score > 0.0);
    }

    proptest! {
        /// Holding everything else fixed, a higher rating never lowers the
        /// total score, at any urgency level.
        #[test]
        fn rating_is_monotonic(
            r1 in 0.0f64..=5.0,
            r2 in 0.0f64..=5.0,
            reviews in 0u32..200,
            urgency_idx in 0usize..4,
        ) {
            let urgency = [
                UrgencyLevel::Low,
                UrgencyLevel::Medium,
                UrgencyLevel::High,
                UrgencyLevel::Emergency,
            ][urgency_idx];
            let (lo, hi) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };

            let mut low_rated = record();
            low_rated.rating = lo;
            low_rated.review_count = reviews;
            let mut high_rated = record();
            high_rated.rating = hi;
            high_rated.review_count = reviews;

            let scorer = DoctorScorer::new();
            let t = targets(&["Cardiology"]);
            let s_lo = scorer.score(&low_rated, &t, Some(10.0), None, urgency);
            let s_hi = scorer.score(&high_rated, &t, Some(10.0), None, urgency);

            prop_assert!(s_hi.score >= s_lo.score);
        }
    }
}
