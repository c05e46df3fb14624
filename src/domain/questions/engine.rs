//! Follow-up question generation pipeline.
//!
//! Four independent generators produce candidates, which are then
//! deduplicated, filtered against already-answered categories, boosted by
//! context, stably sorted, and truncated to the requested count.
//!
//! The sort must stay stable: ties keep their generation order, which is
//! what makes question selection deterministic for a given turn.

use tracing::debug;

use super::question::{AnswerType, PrioritizedQuestion, QuestionCategory};
use crate::config::TriageConfig;
use crate::domain::conversation::ConversationContext;
use crate::domain::triage::catalog::{COMBINATION_QUESTIONS, SYMPTOM_CATALOG};
use crate::domain::triage::extractor::{
    mentions_any_location, parse_duration, parse_pain_scale,
};
use crate::domain::triage::Symptom;
use crate::domain::foundation::UrgencyLevel;

/// Phrases in recent history that mean progression was already discussed.
static PROGRESSION_ANSWERED: &[&str] = &[
    "better",
    "worse",
    "improving",
    "worsening",
    "the same",
    "unchanged",
];

/// Phrases in recent history that mean triggers were already discussed.
static TRIGGERS_ANSWERED: &[&str] =
    &["trigger", "brings it on", "sets it off", "after eating", "when i"];

/// Phrases in recent history that mean associated symptoms were covered.
static ASSOCIATED_ANSWERED: &[&str] =
    &["also have", "along with", "as well as", "no other symptom"];

/// Severity vocabulary that counts as an answered severity question.
static SEVERITY_ANSWERED: &[&str] = &["mild", "moderate", "severe", "out of 10"];

/// How many recent messages the contextual generator inspects.
const RECENT_WINDOW: usize = 5;

/// A candidate question, optionally linked to the symptom that produced it.
struct Candidate {
    question: PrioritizedQuestion,
    symptom_index: Option<usize>,
}

impl Candidate {
    fn linked(question: PrioritizedQuestion, index: usize) -> Self {
        Self {
            question,
            symptom_index: Some(index),
        }
    }

    fn free(question: PrioritizedQuestion) -> Self {
        Self {
            question,
            symptom_index: None,
        }
    }
}

/// Generates and ranks clarifying questions for one turn.
///
/// Stateless apart from the configured emergency-question threshold; safe
/// to share across requests.
#[derive(Debug, Clone)]
pub struct QuestionEngine {
    emergency_threshold: u8,
}

impl QuestionEngine {
    /// Creates an engine with the configured thresholds.
    pub fn new(config: &TriageConfig) -> Self {
        Self {
            emergency_threshold: config.emergency_question_threshold,
        }
    }

    /// Produces the top `max_questions` questions, highest priority first.
    pub fn generate(
        &self,
        symptoms: &[Symptom],
        context: &ConversationContext,
        max_questions: usize,
    ) -> Vec<PrioritizedQuestion> {
        let mut candidates = Vec::new();
        self.gap_filling_questions(symptoms, &mut candidates);
        self.contextual_questions(symptoms, context, &mut candidates);
        self.emergency_questions(symptoms, &mut candidates);
        self.combination_and_stage_questions(symptoms, context, &mut candidates);

        let mut candidates = dedupe(candidates);
        filter_answered(&context.user_text(), &mut candidates);
        apply_boosts(symptoms, context, &mut candidates);

        let mut questions: Vec<PrioritizedQuestion> =
            candidates.into_iter().map(|c| c.question).collect();
        // Stable: ties keep generation order.
        questions.sort_by_key(|q| std::cmp::Reverse(q.priority));
        questions.truncate(max_questions);

        debug!(count = questions.len(), "generated follow-up questions");
        questions
    }

    /// Generator (a): per-symptom gap filling.
    fn gap_filling_questions(&self, symptoms: &[Symptom], out: &mut Vec<Candidate>) {
        for (i, symptom) in symptoms.iter().enumerate() {
            if symptom.duration.is_none() {
                out.push(Candidate::linked(
                    PrioritizedQuestion::new(
                        format!("How long have you had the {}?", symptom.text),
                        7,
                        QuestionCategory::Duration,
                        format!("no duration reported for {}", symptom.text),
                        AnswerType::Duration,
                    ),
                    i,
                ));
            }
            if symptom.severity.is_unknown() {
                let question = if symptom.is_pain() {
                    format!("Is the {} sharp, dull, or burning?", symptom.text)
                } else {
                    format!(
                        "On a scale of 1 to 10, how severe is the {}?",
                        symptom.text
                    )
                };
                let answer_type = if symptom.is_pain() {
                    AnswerType::Description
                } else {
                    AnswerType::Scale
                };
                out.push(Candidate::linked(
                    PrioritizedQuestion::new(
                        question,
                        6,
                        QuestionCategory::Severity,
                        format!("no severity reported for {}", symptom.text),
                        answer_type,
                    ),
                    i,
                ));
            }
            let entry = SYMPTOM_CATALOG.iter().find(|e| e.keyword == symptom.text);
            if symptom.location.is_none()
                && entry.is_some_and(|e| !e.locations.is_empty())
            {
                out.push(Candidate::linked(
                    PrioritizedQuestion::new(
                        format!("Where exactly is the {}?", symptom.text),
                        5,
                        QuestionCategory::Location,
                        format!("no location reported for {}", symptom.text),
                        AnswerType::Location,
                    ),
                    i,
                ));
            }
            // Catalog defaults round out the candidate pool at low priority.
            if let Some(entry) = entry {
                for default in entry.follow_up_questions {
                    out.push(Candidate::linked(
                        PrioritizedQuestion::new(
                            *default,
                            4,
                            QuestionCategory::Associated,
                            format!("default follow-up for {}", symptom.text),
                            AnswerType::Description,
                        ),
                        i,
                    ));
                }
            }
        }
    }

    /// Generator (b): history-aware progression/trigger/associated questions.
    fn contextual_questions(
        &self,
        symptoms: &[Symptom],
        context: &ConversationContext,
        out: &mut Vec<Candidate>,
    ) {
        if symptoms.is_empty() {
            return;
        }
        let recent: String = context
            .recent_messages(RECENT_WINDOW)
            .iter()
            .map(|m| m.content.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        if !PROGRESSION_ANSWERED.iter().any(|kw| recent.contains(kw)) {
            for (i, symptom) in symptoms.iter().enumerate() {
                out.push(Candidate::linked(
                    PrioritizedQuestion::new(
                        format!(
                            "Has the {} been getting better or worse?",
                            symptom.text
                        ),
                        5,
                        QuestionCategory::Progression,
                        "progression not yet discussed",
                        AnswerType::Description,
                    ),
                    i,
                ));
            }
        }

        if !TRIGGERS_ANSWERED.iter().any(|kw| recent.contains(kw)) {
            out.push(Candidate::free(PrioritizedQuestion::new(
                "Have you noticed anything that triggers or relieves it?",
                4,
                QuestionCategory::Triggers,
                "triggers not yet discussed",
                AnswerType::Description,
            )));
        }

        if !ASSOCIATED_ANSWERED.iter().any(|kw| recent.contains(kw)) {
            out.push(Candidate::free(PrioritizedQuestion::new(
                "Have you noticed any other symptoms along with this?",
                4,
                QuestionCategory::Associated,
                "associated symptoms not yet discussed",
                AnswerType::Description,
            )));
        }
    }

    /// Generator (c): critical differentiators for high-scoring symptoms.
    fn emergency_questions(&self, symptoms: &[Symptom], out: &mut Vec<Candidate>) {
        for (i, symptom) in symptoms.iter().enumerate() {
            if symptom.urgency_score < self.emergency_threshold {
                continue;
            }
            let differentiator = SYMPTOM_CATALOG
                .iter()
                .find(|e| e.keyword == symptom.text)
                .and_then(|e| e.emergency_question);
            if let Some(question) = differentiator {
                out.push(Candidate::linked(
                    PrioritizedQuestion::new(
                        question,
                        10,
                        QuestionCategory::Emergency,
                        format!(
                            "{} scores {} and needs an emergency differentiator",
                            symptom.text, symptom.urgency_score
                        ),
                        AnswerType::YesNo,
                    ),
                    i,
                ));
            }
        }
    }

    /// Generator (d): combination patterns and stage-adaptive questions.
    fn combination_and_stage_questions(
        &self,
        symptoms: &[Symptom],
        context: &ConversationContext,
        out: &mut Vec<Candidate>,
    ) {
        for combo in COMBINATION_QUESTIONS {
            let has_first = symptoms.iter().any(|s| s.text == combo.first);
            let has_second = symptoms.iter().any(|s| s.text == combo.second);
            if has_first && has_second {
                out.push(Candidate::free(PrioritizedQuestion::new(
                    combo.question,
                    7,
                    QuestionCategory::Associated,
                    format!("{} together with {}", combo.first, combo.second),
                    AnswerType::YesNo,
                )));
            }
        }

        if context.user_turns() <= 1 {
            out.push(Candidate::free(PrioritizedQuestion::new(
                "What is bothering you the most right now?",
                3,
                QuestionCategory::Associated,
                "early conversation, establish the chief complaint",
                AnswerType::Description,
            )));
        } else if context.user_turns() >= 3 {
            out.push(Candidate::free(PrioritizedQuestion::new(
                "Are you currently taking any medications?",
                3,
                QuestionCategory::Associated,
                "later conversation, collect medication history",
                AnswerType::Description,
            )));
        }
    }
}

impl Default for QuestionEngine {
    fn default() -> Self {
        Self::new(&TriageConfig::default())
    }
}

/// Keeps the first occurrence of each normalized question text.
fn dedupe(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = std::collections::HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.question.normalized_text()))
        .collect()
}

/// Drops questions whose category the patient has already answered.
fn filter_answered(user_text: &str, candidates: &mut Vec<Candidate>) {
    let severity_answered = parse_pain_scale(user_text).is_some()
        || SEVERITY_ANSWERED.iter().any(|kw| user_text.contains(kw));
    let duration_answered = parse_duration(user_text).is_some();
    let location_answered = mentions_any_location(user_text);

    candidates.retain(|c| match c.question.category {
        QuestionCategory::Severity => !severity_answered,
        QuestionCategory::Duration => !duration_answered,
        QuestionCategory::Location => !location_answered,
        _ => true,
    });
}

/// Applies the contextual priority boosts.
fn apply_boosts(
    symptoms: &[Symptom],
    context: &ConversationContext,
    candidates: &mut [Candidate],
) {
    let duration_globally_missing =
        !symptoms.is_empty() && symptoms.iter().all(|s| s.duration.is_none());
    let severity_globally_missing =
        !symptoms.is_empty() && symptoms.iter().all(|s| s.severity.is_unknown());

    for candidate in candidates.iter_mut() {
        let q = &mut candidate.question;

        if q.category == QuestionCategory::Emergency
            && context.urgency_level == UrgencyLevel::Emergency
        {
            q.priority += 3;
        }
        if q.category == QuestionCategory::Duration && duration_globally_missing {
            q.priority += 2;
        }
        if q.category == QuestionCategory::Severity && severity_globally_missing {
            q.priority += 2;
        }

        let Some(symptom) = candidate.symptom_index.and_then(|i| symptoms.get(i)) else {
            continue;
        };
        match q.category {
            QuestionCategory::Severity if symptom.is_pain() => q.priority += 1,
            QuestionCategory::Location if symptom.is_localizable() => q.priority += 1,
            QuestionCategory::Progression if symptom.is_chronic() => q.priority += 1,
            _ => {}
        }
    }
}
