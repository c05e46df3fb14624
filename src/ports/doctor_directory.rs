//! Doctor Directory Port - specialty search over the provider catalog.
//!
//! The catalog itself (CRUD, persistence) is an external collaborator;
//! the matching engine only needs bounded specialty queries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for doctor catalog search.
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    /// Returns up to `page_size` candidates matching the filters, plus the
    /// total number of matches in the directory.
    async fn search(
        &self,
        filters: &SearchFilters,
        page_size: usize,
    ) -> Result<SearchPage, DirectoryError>;
}

/// Search filters for one directory query.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Directory specialization label to match.
    pub specialization: String,
    /// Only providers currently accepting patients.
    pub accepting_patients: bool,
    /// Optional fee ceiling.
    pub max_fee: Option<f64>,
    /// Optional required languages.
    pub languages: Option<Vec<String>>,
}

impl SearchFilters {
    /// Creates filters for a specialization, accepting patients only.
    pub fn for_specialization(specialization: impl Into<String>) -> Self {
        Self {
            specialization: specialization.into(),
            accepting_patients: true,
            max_fee: None,
            languages: None,
        }
    }

    /// Sets the fee ceiling.
    pub fn with_max_fee(mut self, max_fee: f64) -> Self {
        self.max_fee = Some(max_fee);
        self
    }

    /// Sets the required languages.
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = Some(languages);
        self
    }
}

/// One page of directory results.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    /// Candidates on this page.
    pub candidates: Vec<DoctorRecord>,
    /// Total matches in the directory, across all pages.
    pub total_count: usize,
}

/// A doctor catalog record as exposed by the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorRecord {
    /// Provider identity, unique within the directory.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Primary specialization label.
    pub specialization: String,
    /// Sub-specialization labels.
    pub sub_specializations: Vec<String>,
    /// Average rating, 0.0-5.0.
    pub rating: f64,
    /// Number of reviews behind the rating.
    pub review_count: u32,
    /// Years in practice.
    pub years_experience: u32,
    /// Consultation fee in the directory's currency.
    pub consultation_fee: f64,
    /// Office address as free text.
    pub office_address: String,
    /// Languages spoken.
    pub languages: Vec<String>,
    /// Whether the provider takes new patients.
    pub accepting_patients: bool,
}

/// Directory query errors.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("directory unavailable: {0}")]
    Unavailable(String),

    #[error("invalid directory query: {0}")]
    InvalidQuery(String),
}
