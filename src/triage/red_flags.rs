//! High-risk pattern detection.
//!
//! A red flag fires only when a declared history flag and matching
//! complaint evidence co-occur. A keyword alone never raises one, so a
//! patient's word choice cannot escalate acuity by itself; the history
//! flag alone never fires either, keeping flags tied to the presenting
//! complaint.

use crate::models::PatientInput;

use super::types::{RedFlag, RedFlagTag};

struct RedFlagRule {
    tag: RedFlagTag,
    keywords: &'static [&'static str],
    justification: &'static str,
}

const RED_FLAG_RULES: &[RedFlagRule] = &[
    RedFlagRule {
        tag: RedFlagTag::AcsSuspected,
        keywords: &[
            "chest pain",
            "pain in chest",
            "tightness",
            "pressure",
            "angina",
            "ألم صدر",
            "وجع في صدري",
            "نغزة",
            "طبقة على صدري",
            "ذبحة",
            "حرقان في الصدر",
        ],
        justification: "possible acute coronary syndrome: cardiac history with chest pain complaint",
    },
    RedFlagRule {
        tag: RedFlagTag::CvaSuspected,
        keywords: &[
            "dizzy",
            "faint",
            "passed out",
            "seizure",
            "stroke",
            "numbness",
            "weakness",
            "slurred",
            "دوخة",
            "إغماء",
            "تشنجات",
            "جلطة",
            "تنميل",
            "ضعف",
            "صداع شديد",
        ],
        justification: "possible stroke: prior stroke history with neurological complaint",
    },
    RedFlagRule {
        tag: RedFlagTag::SepsisRisk,
        keywords: &[
            "fever",
            "chills",
            "shivering",
            "حرارة",
            "سخونية",
            "رعشة",
            "حمى",
        ],
        justification: "sepsis risk: immunocompromised patient with fever complaint",
    },
];

fn history_allows(patient: &PatientInput, tag: RedFlagTag) -> bool {
    match tag {
        RedFlagTag::AcsSuspected => patient.history.history_cardiac,
        RedFlagTag::CvaSuspected => patient.history.history_stroke,
        RedFlagTag::SepsisRisk => patient.history.immuno_compromised,
    }
}

/// Scan history flags plus complaint text for known high-risk patterns.
/// Output order follows the rule table; each tag appears at most once.
pub fn detect_red_flags(patient: &PatientInput) -> Vec<RedFlag> {
    let text = patient.chief_complaint.to_lowercase();
    let mut flags: Vec<RedFlag> = Vec::new();

    for rule in RED_FLAG_RULES {
        if !history_allows(patient, rule.tag) {
            continue;
        }
        if flags.iter().any(|f| f.tag == rule.tag) {
            continue;
        }
        if let Some(kw) = rule.keywords.iter().copied().find(|kw| text.contains(*kw)) {
            flags.push(RedFlag {
                tag: rule.tag,
                justification: format!("{} (complaint mentions \"{kw}\")", rule.justification),
            });
        }
    }

    flags
}
