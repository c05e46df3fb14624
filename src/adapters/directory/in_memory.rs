//! In-memory doctor directory.
//!
//! Backs tests and demos with a fixed record set. Matching mirrors what a
//! real catalog index would do: case-insensitive specialization match
//! against primary and sub-specializations, accepting-patients and fee
//! filters, and language intersection.

use async_trait::async_trait;

use crate::ports::{DirectoryError, DoctorDirectory, DoctorRecord, SearchFilters, SearchPage};

/// Fixed-content directory for tests and demos.
pub struct InMemoryDoctorDirectory {
    records: Vec<DoctorRecord>,
}

impl InMemoryDoctorDirectory {
    /// Creates a directory over the given records.
    pub fn new(records: Vec<DoctorRecord>) -> Self {
        Self { records }
    }

    fn matches(record: &DoctorRecord, filters: &SearchFilters) -> bool {
        if filters.accepting_patients && !record.accepting_patients {
            return false;
        }

        let target = filters.specialization.to_lowercase();
        let specialization_hit = record.specialization.to_lowercase() == target
            || record
                .sub_specializations
                .iter()
                .any(|sub| sub.to_lowercase() == target);
        if !specialization_hit {
            return false;
        }

        if filters.max_fee.is_some_and(|max| record.consultation_fee > max) {
            return false;
        }

        if let Some(languages) = &filters.languages {
            let speaks_one = languages.iter().any(|wanted| {
                record
                    .languages
                    .iter()
                    .any(|spoken| spoken.eq_ignore_ascii_case(wanted))
            });
            if !speaks_one {
                return false;
            }
        }

        true
    }
}

#[async_trait]
impl DoctorDirectory for InMemoryDoctorDirectory {
    async fn search(
        &self,
        filters: &SearchFilters,
        page_size: usize,
    ) -> Result<SearchPage, DirectoryError> {
        let matching: Vec<DoctorRecord> = self
            .records
            .iter()
            .filter(|record| Self::matches(record, filters))
            .cloned()
            .collect();

        let total_count = matching.len();
        let candidates = matching.into_iter().take(page_size).collect();

        Ok(SearchPage {
            candidates,
            total_count,
        })
    }
}

/// Directory that fails every query, for outage tests.
pub struct FailingDoctorDirectory;

#[async_trait]
impl DoctorDirectory for FailingDoctorDirectory {
    async fn search(
        &self,
        _filters: &SearchFilters,
        _page_size: usize,
    ) -> Result<SearchPage, DirectoryError> {
        Err(DirectoryError::Unavailable("directory offline".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, specialization: &str, fee: f64, languages: &[&str]) -> DoctorRecord {
        DoctorRecord {
            id: id.to_string(),
            name: format!("Dr. {}", id),
            specialization: specialization.to_string(),
            sub_specializations: Vec::new(),
            rating: 4.0,
            review_count: 30,
            years_experience: 8,
            consultation_fee: fee,
            office_address: "2 Health Sq".to_string(),
            languages: languages.iter().map(|l| l.to_string()).collect(),
            accepting_patients: true,
        }
    }

    #[tokio::test]
    async fn specialization_match_is_case_insensitive() {
        let directory = InMemoryDoctorDirectory::new(vec![record(
            "a",
            "Cardiology",
            100.0,
            &["english"],
        )]);
        let page = directory
            .search(&SearchFilters::for_specialization("cardiology"), 20)
            .await
            .unwrap();
        assert_eq!(page.candidates.len(), 1);
        assert_eq!(page.total_count, 1);
    }

    #[tokio::test]
    async fn sub_specialization_matches_too() {
        let mut r = record("a", "Surgery", 100.0, &["english"]);
        r.sub_specializations = vec!["Cardiothoracic Surgery".to_string()];
        let directory = InMemoryDoctorDirectory::new(vec![r]);

        let page = directory
            .search(&SearchFilters::for_specialization("Cardiothoracic Surgery"), 20)
            .await
            .unwrap();
        assert_eq!(page.candidates.len(), 1);
    }

    #[tokio::test]
    async fn page_size_bounds_candidates_but_not_total() {
        let records = (0..30)
            .map(|i| record(&format!("d{}", i), "Dermatology", 100.0, &["english"]))
            .collect();
        let directory = InMemoryDoctorDirectory::new(records);

        let page = directory
            .search(&SearchFilters::for_specialization("Dermatology"), 20)
            .await
            .unwrap();
        assert_eq!(page.candidates.len(), 20);
        assert_eq!(page.total_count, 30);
    }

    #[tokio::test]
    async fn language_filter_requires_an_overlap() {
        let directory = InMemoryDoctorDirectory::new(vec![
            record("en", "Neurology", 100.0, &["English"]),
            record("es", "Neurology", 100.0, &["spanish"]),
        ]);

        let filters = SearchFilters::for_specialization("Neurology")
            .with_languages(vec!["Spanish".to_string()]);
        let page = directory.search(&filters, 20).await.unwrap();

        assert_eq!(page.candidates.len(), 1);
        assert_eq!(page.candidates[0].id, "es");
    }

    #[tokio::test]
    async fn failing_directory_surfaces_unavailable() {
        let err = FailingDoctorDirectory
            .search(&SearchFilters::for_specialization("Cardiology"), 20)
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Unavailable(_)));
    }
}
