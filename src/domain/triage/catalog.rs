//! Static clinical keyword catalogs.
//!
//! These tables drive the rule-based layer: symptom keywords with base
//! urgency scores, emergency phrase patterns, severity vocabularies, and
//! condition co-occurrence rules. They are data, not logic, so they can be
//! unit-tested and revised independently of the matchers that consume them.
//!
//! Catalog version: 2026-08. Scores use a 1-10 scale calibrated against the
//! urgency thresholds in `config::TriageConfig` (>=8 high, >=5 medium).

/// One recognizable symptom keyword and its clinical metadata.
#[derive(Debug, Clone, Copy)]
pub struct SymptomEntry {
    /// Keyword matched as a substring of normalized text.
    pub keyword: &'static str,
    /// Base urgency score, 1-10.
    pub urgency_score: u8,
    /// Generic specialty tokens this symptom suggests.
    pub specialties: &'static [&'static str],
    /// Default clarifying questions when nothing better applies.
    pub follow_up_questions: &'static [&'static str],
    /// Body-location phrases specific to this symptom.
    pub locations: &'static [&'static str],
    /// Critical-differentiator question asked when the symptom scores high.
    pub emergency_question: Option<&'static str>,
}

/// The symptom keyword catalog, ordered roughly by clinical acuity.
///
/// Keywords are chosen so that no entry is a substring of another entry's
/// keyword; each distinct entry matching the text yields exactly one symptom.
pub static SYMPTOM_CATALOG: &[SymptomEntry] = &[
    SymptomEntry {
        keyword: "chest pain",
        urgency_score: 9,
        specialties: &["cardiology", "emergency medicine"],
        follow_up_questions: &[
            "When did the chest pain start?",
            "Is the pain sharp, dull, or pressure-like?",
        ],
        locations: &["left chest", "center chest", "right chest", "upper chest"],
        emergency_question: Some("Does the pain spread to your arm, jaw, or back?"),
    },
    SymptomEntry {
        keyword: "shortness of breath",
        urgency_score: 8,
        specialties: &["pulmonology", "cardiology"],
        follow_up_questions: &["Does it get worse when you lie down or exert yourself?"],
        locations: &[],
        emergency_question: Some("Are you able to speak in full sentences right now?"),
    },
    SymptomEntry {
        keyword: "difficulty breathing",
        urgency_score: 8,
        specialties: &["pulmonology", "emergency medicine"],
        follow_up_questions: &["Did the breathing difficulty come on suddenly?"],
        locations: &[],
        emergency_question: Some("Are your lips or fingertips turning blue?"),
    },
    SymptomEntry {
        keyword: "palpitations",
        urgency_score: 7,
        specialties: &["cardiology"],
        follow_up_questions: &["Do the palpitations come and go, or are they constant?"],
        locations: &[],
        emergency_question: Some("Have you fainted or nearly fainted with them?"),
    },
    SymptomEntry {
        keyword: "numbness",
        urgency_score: 7,
        specialties: &["neurology"],
        follow_up_questions: &["Where exactly do you feel the numbness?"],
        locations: &["left arm", "right arm", "left leg", "right leg", "face", "hands", "feet"],
        emergency_question: Some("Is the numbness only on one side of your body?"),
    },
    SymptomEntry {
        keyword: "blood in stool",
        urgency_score: 7,
        specialties: &["gastroenterology"],
        follow_up_questions: &["Is the blood bright red or dark and tarry?"],
        locations: &[],
        emergency_question: Some("Are you feeling faint, dizzy, or unusually weak?"),
    },
    SymptomEntry {
        keyword: "dizziness",
        urgency_score: 6,
        specialties: &["neurology", "cardiology"],
        follow_up_questions: &["Does the room spin, or do you feel lightheaded?"],
        locations: &[],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "blurred vision",
        urgency_score: 6,
        specialties: &["ophthalmology", "neurology"],
        follow_up_questions: &["Is the blurring in one eye or both?"],
        locations: &["left eye", "right eye", "both eyes"],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "abdominal pain",
        urgency_score: 6,
        specialties: &["gastroenterology"],
        follow_up_questions: &["Does eating make the pain better or worse?"],
        locations: &["upper abdomen", "lower abdomen", "left side", "right side"],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "stomach pain",
        urgency_score: 6,
        specialties: &["gastroenterology"],
        follow_up_questions: &["Does eating make the pain better or worse?"],
        locations: &["upper abdomen", "lower abdomen", "left side", "right side"],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "difficulty swallowing",
        urgency_score: 6,
        specialties: &["otolaryngology", "gastroenterology"],
        follow_up_questions: &["Is it harder with solids, liquids, or both?"],
        locations: &[],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "headache",
        urgency_score: 5,
        specialties: &["neurology"],
        follow_up_questions: &["Is this headache different from ones you've had before?"],
        locations: &["forehead", "temples", "back of head", "behind the eyes", "one side"],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "fever",
        urgency_score: 5,
        specialties: &["general practice", "infectious disease"],
        follow_up_questions: &["Have you measured your temperature?"],
        locations: &[],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "vomiting",
        urgency_score: 5,
        specialties: &["gastroenterology"],
        follow_up_questions: &["Are you able to keep fluids down?"],
        locations: &[],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "cough",
        urgency_score: 4,
        specialties: &["pulmonology", "general practice"],
        follow_up_questions: &["Is the cough dry, or are you bringing anything up?"],
        locations: &[],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "nausea",
        urgency_score: 4,
        specialties: &["gastroenterology"],
        follow_up_questions: &["Does anything in particular set off the nausea?"],
        locations: &[],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "back pain",
        urgency_score: 4,
        specialties: &["orthopedics"],
        follow_up_questions: &["Does the pain shoot down either leg?"],
        locations: &["lower back", "upper back", "middle back"],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "joint pain",
        urgency_score: 4,
        specialties: &["rheumatology", "orthopedics"],
        follow_up_questions: &["Which joints are affected?"],
        locations: &["knee", "shoulder", "elbow", "wrist", "ankle", "hip"],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "swelling",
        urgency_score: 4,
        specialties: &["general practice"],
        follow_up_questions: &["Where is the swelling, and is it warm to the touch?"],
        locations: &["legs", "ankles", "feet", "hands", "face"],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "anxiety",
        urgency_score: 4,
        specialties: &["psychiatry"],
        follow_up_questions: &["How often do the anxious episodes occur?"],
        locations: &[],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "rash",
        urgency_score: 3,
        specialties: &["dermatology"],
        follow_up_questions: &["Is the rash itchy, painful, or spreading?"],
        locations: &["arms", "legs", "torso", "face", "neck"],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "sore throat",
        urgency_score: 3,
        specialties: &["otolaryngology", "general practice"],
        follow_up_questions: &["Is it painful to swallow?"],
        locations: &[],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "ear pain",
        urgency_score: 3,
        specialties: &["otolaryngology"],
        follow_up_questions: &["Is there any discharge from the ear?"],
        locations: &["left ear", "right ear", "both ears"],
        emergency_question: None,
    },
    SymptomEntry {
        keyword: "fatigue",
        urgency_score: 3,
        specialties: &["general practice"],
        follow_up_questions: &["Is the tiredness constant, or worse at certain times?"],
        locations: &[],
        emergency_question: None,
    },
];

/// One emergency pattern: any phrase matching flags the whole entry once.
#[derive(Debug, Clone, Copy)]
pub struct EmergencyEntry {
    /// Phrases matched as substrings; first hit per entry wins.
    pub phrases: &'static [&'static str],
    /// Human-readable description of the suspected emergency.
    pub description: &'static str,
    /// What the patient should do right now.
    pub immediate_action: &'static str,
}

/// The emergency pattern catalog, in reporting order.
pub static EMERGENCY_CATALOG: &[EmergencyEntry] = &[
    EmergencyEntry {
        phrases: &[
            "crushing chest pain",
            "chest pain radiating",
            "chest pain spreading",
            "chest pain with sweating",
        ],
        description: "Chest pain pattern consistent with a possible heart attack",
        immediate_action: "Call emergency services now. Do not drive yourself.",
    },
    EmergencyEntry {
        phrases: &[
            "face drooping",
            "slurred speech",
            "sudden weakness on one side",
            "sudden numbness on one side",
            "can't move my arm",
        ],
        description: "Neurological signs consistent with a possible stroke",
        immediate_action: "Call emergency services immediately. Note the time symptoms began.",
    },
    EmergencyEntry {
        phrases: &[
            "can't breathe",
            "cannot breathe",
            "gasping for air",
            "turning blue",
        ],
        description: "Severe breathing difficulty",
        immediate_action: "Call emergency services now. Sit upright and stay calm.",
    },
    EmergencyEntry {
        phrases: &[
            "throat closing",
            "throat is closing",
            "swollen tongue",
            "severe allergic reaction",
        ],
        description: "Possible anaphylaxis",
        immediate_action: "Use an epinephrine auto-injector if available and call emergency services.",
    },
    EmergencyEntry {
        phrases: &[
            "bleeding heavily",
            "won't stop bleeding",
            "coughing up blood",
            "vomiting blood",
        ],
        description: "Uncontrolled or internal bleeding",
        immediate_action: "Apply firm pressure to any external wound and call emergency services.",
    },
    EmergencyEntry {
        phrases: &["unconscious", "passed out", "unresponsive", "seizure"],
        description: "Loss of consciousness or seizure",
        immediate_action: "Call emergency services. Do not leave the person alone.",
    },
    EmergencyEntry {
        phrases: &[
            "suicidal",
            "want to end my life",
            "want to hurt myself",
            "kill myself",
        ],
        description: "Risk of self-harm",
        immediate_action: "Contact a crisis line or emergency services immediately. You are not alone.",
    },
    EmergencyEntry {
        phrases: &["worst pain of my life", "rigid abdomen"],
        description: "Severe acute pain suggesting a surgical emergency",
        immediate_action: "Go to the nearest emergency department now.",
    },
];

/// Severity vocabulary matched before falling back to pain-scale parsing.
pub static MILD_KEYWORDS: &[&str] = &["mild", "slight", "minor", "a little", "barely"];

pub static MODERATE_KEYWORDS: &[&str] =
    &["moderate", "noticeable", "uncomfortable", "bothersome"];

pub static SEVERE_KEYWORDS: &[&str] = &[
    "severe",
    "intense",
    "excruciating",
    "unbearable",
    "worst",
    "extreme",
    "terrible",
    "very bad",
];

/// Relative duration phrases, matched when no `<number> <unit>` is present.
pub static RELATIVE_DURATIONS: &[&str] =
    &["today", "yesterday", "last week", "last month", "recently"];

/// A condition suggested by the co-occurrence of two symptom keywords.
#[derive(Debug, Clone, Copy)]
pub struct CooccurrenceRule {
    pub first: &'static str,
    pub second: &'static str,
    pub condition: &'static str,
}

/// Symptom co-occurrence rules feeding `SymptomAnalysis::possible_conditions`.
pub static COOCCURRENCE_RULES: &[CooccurrenceRule] = &[
    CooccurrenceRule {
        first: "chest pain",
        second: "shortness of breath",
        condition: "possible cardiac event",
    },
    CooccurrenceRule {
        first: "chest pain",
        second: "nausea",
        condition: "possible cardiac event",
    },
    CooccurrenceRule {
        first: "fever",
        second: "cough",
        condition: "possible respiratory infection",
    },
    CooccurrenceRule {
        first: "fever",
        second: "headache",
        condition: "possible systemic infection",
    },
    CooccurrenceRule {
        first: "nausea",
        second: "abdominal pain",
        condition: "possible gastroenteritis",
    },
    CooccurrenceRule {
        first: "vomiting",
        second: "abdominal pain",
        condition: "possible gastroenteritis",
    },
    CooccurrenceRule {
        first: "headache",
        second: "blurred vision",
        condition: "possible migraine",
    },
    CooccurrenceRule {
        first: "dizziness",
        second: "palpitations",
        condition: "possible arrhythmia",
    },
    CooccurrenceRule {
        first: "fever",
        second: "rash",
        condition: "possible viral illness",
    },
];

/// A clarifying question triggered by a pair of co-occurring symptoms.
#[derive(Debug, Clone, Copy)]
pub struct CombinationQuestion {
    pub first: &'static str,
    pub second: &'static str,
    pub question: &'static str,
}

/// Combination-pattern questions used by the follow-up question engine.
pub static COMBINATION_QUESTIONS: &[CombinationQuestion] = &[
    CombinationQuestion {
        first: "chest pain",
        second: "shortness of breath",
        question: "Do you feel pressure or tightness in your chest?",
    },
    CombinationQuestion {
        first: "fever",
        second: "headache",
        question: "Do you have a stiff neck or sensitivity to light?",
    },
    CombinationQuestion {
        first: "dizziness",
        second: "nausea",
        question: "Have you fainted or come close to fainting?",
    },
    CombinationQuestion {
        first: "abdominal pain",
        second: "vomiting",
        question: "When did you last manage to keep food or fluids down?",
    },
];

/// Symptom words that usually have a meaningful body location.
pub static LOCALIZABLE_KEYWORDS: &[&str] = &[
    "pain", "ache", "hurt", "sore", "tender", "swelling", "rash", "numbness", "tingling",
];

/// Duration fragments that mark a symptom as chronic.
pub static CHRONIC_MARKERS: &[&str] =
    &["week", "month", "year", "chronic", "ongoing", "recurring"];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn symptom_scores_stay_on_scale() {
        for entry in SYMPTOM_CATALOG {
            assert!(
                (1..=10).contains(&entry.urgency_score),
                "{} has score {}",
                entry.keyword,
                entry.urgency_score
            );
        }
    }

    #[test]
    fn symptom_keywords_are_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for entry in SYMPTOM_CATALOG {
            assert_eq!(entry.keyword, entry.keyword.to_lowercase());
            assert!(seen.insert(entry.keyword), "duplicate keyword {}", entry.keyword);
        }
    }

    #[test]
    fn no_symptom_keyword_contains_another() {
        for a in SYMPTOM_CATALOG {
            for b in SYMPTOM_CATALOG {
                if a.keyword != b.keyword {
                    assert!(
                        !a.keyword.contains(b.keyword),
                        "{} contains {}",
                        a.keyword,
                        b.keyword
                    );
                }
            }
        }
    }

    #[test]
    fn every_symptom_suggests_a_specialty() {
        for entry in SYMPTOM_CATALOG {
            assert!(!entry.specialties.is_empty(), "{}", entry.keyword);
        }
    }

    #[test]
    fn high_scoring_symptoms_have_emergency_questions() {
        for entry in SYMPTOM_CATALOG {
            if entry.urgency_score >= 7 {
                assert!(
                    entry.emergency_question.is_some(),
                    "{} scores {} but has no differentiator question",
                    entry.keyword,
                    entry.urgency_score
                );
            }
        }
    }

    #[test]
    fn emergency_entries_are_complete() {
        for entry in EMERGENCY_CATALOG {
            assert!(!entry.phrases.is_empty());
            assert!(!entry.description.is_empty());
            assert!(!entry.immediate_action.is_empty());
        }
    }

    #[test]
    fn cooccurrence_rules_reference_catalog_keywords() {
        let keywords: HashSet<_> = SYMPTOM_CATALOG.iter().map(|e| e.keyword).collect();
        for rule in COOCCURRENCE_RULES {
            assert!(keywords.contains(rule.first), "{}", rule.first);
            assert!(keywords.contains(rule.second), "{}", rule.second);
        }
        for combo in COMBINATION_QUESTIONS {
            assert!(keywords.contains(combo.first), "{}", combo.first);
            assert!(keywords.contains(combo.second), "{}", combo.second);
        }
    }
}
