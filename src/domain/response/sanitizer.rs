//! Response sanitization for model-generated text.
//!
//! Model output is untrusted: it can carry control characters, leaked
//! prompt scaffolding, or phrasing a triage assistant must not present as
//! medical fact. The sanitizer cleans what it can and reports what it saw
//! as warnings; salvageable content is never rejected outright.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default response length cap, in characters.
const DEFAULT_MAX_LENGTH: usize = 4000;

/// Prompt scaffolding tokens that must never reach the user.
const PROMPT_MARKERS: &[&str] = &[
    "<|im_start|>",
    "<|im_end|>",
    "[INST]",
    "[/INST]",
    "<<SYS>>",
    "<</SYS>>",
    "### System:",
    "### Assistant:",
];

/// Phrases a triage assistant must not assert; flagged, not removed.
const GUARDRAIL_PHRASES: &[&str] = &[
    "you definitely have",
    "you certainly have",
    "i diagnose you with",
    "this is definitely",
    "no need to see a doctor",
    "you do not need medical attention",
    "stop taking your medication",
    "i prescribe",
];

/// A sanitized model response with any warnings raised along the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalLanguageResponse {
    /// Cleaned content, safe to display.
    pub content: String,
    /// Human-readable notes about what sanitization changed or flagged.
    pub warnings: Vec<String>,
}

/// Cleans and audits model output before it reaches the conversation.
#[derive(Debug, Clone)]
pub struct ResponseSanitizer {
    max_length: usize,
}

impl ResponseSanitizer {
    /// Creates a sanitizer with the default length cap.
    pub fn new() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Overrides the length cap.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length.max(1);
        self
    }

    /// Sanitizes raw model output.
    pub fn sanitize(&self, raw: &str) -> NaturalLanguageResponse {
        let mut warnings = Vec::new();

        let stripped = strip_control_chars(raw);
        if stripped.len() != raw.len() {
            warnings.push("control characters removed".to_string());
        }

        let mut content = stripped;
        let mut markers_found = false;
        for marker in PROMPT_MARKERS {
            if content.contains(marker) {
                markers_found = true;
                content = content.replace(marker, "");
            }
        }
        if markers_found {
            warnings.push("prompt markers removed".to_string());
        }

        let mut content = content.trim().to_string();
        if content.chars().count() > self.max_length {
            content = content.chars().take(self.max_length).collect();
            warnings.push(format!("response truncated to {} characters", self.max_length));
        }

        let lower = content.to_lowercase();
        for phrase in GUARDRAIL_PHRASES {
            if lower.contains(phrase) {
                warnings.push(format!("guardrail phrase detected: \"{}\"", phrase));
            }
        }

        if !warnings.is_empty() {
            warn!(count = warnings.len(), "response sanitization raised warnings");
        }

        NaturalLanguageResponse { content, warnings }
    }
}

impl Default for ResponseSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops control characters, keeping newlines and tabs.
fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}
