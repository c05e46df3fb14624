//! Post-processing of model-generated responses.

mod sanitizer;

pub use sanitizer::{NaturalLanguageResponse, ResponseSanitizer};
