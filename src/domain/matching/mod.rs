//! Doctor matching: specialty mapping, multi-factor scoring, and ranking.

pub mod engine;
pub mod scoring;
pub mod specialty;

pub use engine::{
    DoctorMatchingEngine, DoctorRecommendations, MatchingError, RecommendationRequest,
    SpecialtyAdvice,
};
pub use scoring::{DoctorScorer, ScoreBreakdown, ScoredDoctor};
pub use specialty::map_specialties;
