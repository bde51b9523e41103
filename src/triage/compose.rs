//! Final result composition.
//!
//! Maps the assessed level onto the static presentation table, attaches
//! red flags and reasoning, and grades confidence. AI output is merged
//! here but can never change the level.

use crate::ai::orchestrator::AiOutcome;
use crate::models::{Confidence, TriageLevel, TriageResult};

use super::types::Assessment;

/// Presentation fields for one ESI level.
pub struct LevelRow {
    pub level: TriageLevel,
    pub color_code: &'static str,
    pub label_en: &'static str,
    pub label_ar: &'static str,
    pub description: &'static str,
    pub recommended_action: &'static str,
    pub time_to_physician: &'static str,
}

/// One row per ESI level, index = level - 1.
pub const LEVEL_TABLE: [LevelRow; 5] = [
    LevelRow {
        level: TriageLevel::Resuscitation,
        color_code: "#ef4444",
        label_en: "Resuscitation (Level 1)",
        label_ar: "إنعاش (مستوى ١)",
        description: "Immediate life-saving intervention required",
        recommended_action: "Activate the resuscitation team immediately",
        time_to_physician: "immediate",
    },
    LevelRow {
        level: TriageLevel::Emergent,
        color_code: "#f97316",
        label_en: "Emergent (Level 2)",
        label_ar: "طوارئ (مستوى ٢)",
        description: "High risk of rapid deterioration",
        recommended_action: "Move to a monitored bed; do not leave unobserved",
        time_to_physician: "within 15 minutes",
    },
    LevelRow {
        level: TriageLevel::Urgent,
        color_code: "#eab308",
        label_en: "Urgent (Level 3)",
        label_ar: "عاجل (مستوى ٣)",
        description: "Stable but expected to need multiple resources",
        recommended_action: "Assign an examination room; start workup",
        time_to_physician: "within 60 minutes",
    },
    LevelRow {
        level: TriageLevel::LessUrgent,
        color_code: "#22c55e",
        label_en: "Less Urgent (Level 4)",
        label_ar: "أقل إلحاحاً (مستوى ٤)",
        description: "Stable, a single resource expected",
        recommended_action: "Route to the fast-track area",
        time_to_physician: "can wait",
    },
    LevelRow {
        level: TriageLevel::NonUrgent,
        color_code: "#3b82f6",
        label_en: "Non-Urgent (Level 5)",
        label_ar: "غير عاجل (مستوى ٥)",
        description: "No acute resources expected",
        recommended_action: "Reassure; consider referral to an outpatient clinic",
        time_to_physician: "can wait or refer to clinic",
    },
];

/// Static presentation row for a level.
pub fn level_row(level: TriageLevel) -> &'static LevelRow {
    &LEVEL_TABLE[(level.as_u8() - 1) as usize]
}

/// Red flags always argue for level 2; a verdict more than one level away
/// from that means the layers and the flags disagree.
const RED_FLAG_PROPOSED_LEVEL: u8 = 2;
const MAX_RED_FLAG_DISAGREEMENT: u8 = 1;

fn confidence(assessment: &Assessment, ai: Option<&AiOutcome>) -> Confidence {
    if assessment.fault {
        return Confidence::Low;
    }
    if ai.is_some_and(|outcome| !outcome.complete) {
        return Confidence::Low;
    }
    let level = assessment.evaluation.level.as_u8();
    if !assessment.red_flags.is_empty()
        && level.abs_diff(RED_FLAG_PROPOSED_LEVEL) > MAX_RED_FLAG_DISAGREEMENT
    {
        return Confidence::Low;
    }
    if assessment.evaluation.matches.len() > 1 {
        return Confidence::Medium;
    }
    Confidence::High
}

/// Merge a deterministic assessment with the optional AI outcome into the
/// final immutable result.
pub fn compose(assessment: &Assessment, ai: Option<&AiOutcome>) -> TriageResult {
    let row = level_row(assessment.evaluation.level);
    TriageResult {
        level: row.level,
        color_code: row.color_code.to_string(),
        label_en: row.label_en.to_string(),
        label_ar: row.label_ar.to_string(),
        description: row.description.to_string(),
        recommended_action: row.recommended_action.to_string(),
        time_to_physician: row.time_to_physician.to_string(),
        red_flags: assessment
            .red_flags
            .iter()
            .map(|f| f.justification.clone())
            .collect(),
        reasoning: assessment.evaluation.reasoning(),
        confidence: confidence(assessment, ai),
        ai_data: ai.and_then(|outcome| outcome.data.clone()),
    }
}
