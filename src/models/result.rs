use serde::{Deserialize, Serialize};

/// Emergency Severity Index acuity level. Lower is more urgent, so the
/// derived `Ord` makes "most urgent" the minimum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum TriageLevel {
    Resuscitation = 1,
    Emergent = 2,
    Urgent = 3,
    LessUrgent = 4,
    NonUrgent = 5,
}

impl TriageLevel {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<TriageLevel> for u8 {
    fn from(level: TriageLevel) -> u8 {
        level as u8
    }
}

impl TryFrom<u8> for TriageLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TriageLevel::Resuscitation),
            2 => Ok(TriageLevel::Emergent),
            3 => Ok(TriageLevel::Urgent),
            4 => Ok(TriageLevel::LessUrgent),
            5 => Ok(TriageLevel::NonUrgent),
            other => Err(format!("triage level out of range 1-5: {other}")),
        }
    }
}

/// Engine-reported certainty in the produced level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// Bilingual augmentation produced by the AI reasoning step. Present only
/// when the step completed; never affects the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiData {
    pub reasoning_ar: String,
    pub followup_question: String,
    pub followup_question_ar: String,
}

/// Final immutable triage verdict handed to the intake UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageResult {
    pub level: TriageLevel,
    pub color_code: String,
    pub label_en: String,
    pub label_ar: String,
    pub description: String,
    pub recommended_action: String,
    pub time_to_physician: String,
    /// Justifications of every detected red flag, detection order.
    pub red_flags: Vec<String>,
    /// Explanations from every matched rule layer, most urgent layer first.
    /// Never empty.
    pub reasoning: Vec<String>,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_data: Option<AiData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_serializes_as_bare_integer() {
        assert_eq!(serde_json::to_value(TriageLevel::Urgent).unwrap(), 3);
        let level: TriageLevel = serde_json::from_str("1").unwrap();
        assert_eq!(level, TriageLevel::Resuscitation);
    }

    #[test]
    fn level_rejects_out_of_range() {
        assert!(serde_json::from_str::<TriageLevel>("0").is_err());
        assert!(serde_json::from_str::<TriageLevel>("6").is_err());
    }

    #[test]
    fn lower_level_is_more_urgent() {
        assert!(TriageLevel::Resuscitation < TriageLevel::Emergent);
        assert_eq!(
            [TriageLevel::Urgent, TriageLevel::Resuscitation].iter().min(),
            Some(&TriageLevel::Resuscitation)
        );
    }

    #[test]
    fn confidence_serializes_snake_case() {
        assert_eq!(serde_json::to_value(Confidence::High).unwrap(), "high");
        assert_eq!(serde_json::to_value(Confidence::Low).unwrap(), "low");
    }

    #[test]
    fn ai_data_is_omitted_when_absent() {
        let result = TriageResult {
            level: TriageLevel::NonUrgent,
            color_code: "#3b82f6".into(),
            label_en: "Non-Urgent (Level 5)".into(),
            label_ar: "غير عاجل (مستوى ٥)".into(),
            description: "d".into(),
            recommended_action: "a".into(),
            time_to_physician: "t".into(),
            red_flags: vec![],
            reasoning: vec!["no acuity criteria met".into()],
            confidence: Confidence::High,
            ai_data: None,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("ai_data").is_none());
        assert_eq!(value["level"], 5);
        assert_eq!(value["confidence"], "high");
    }
}
