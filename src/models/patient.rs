use serde::{Deserialize, Serialize};

use super::vitals::{RawVitals, Vitals};

/// Patient gender as recognized by the intake contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Case- and whitespace-insensitive parse of an intake gender string.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// High-risk history markers collected at intake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFlags {
    #[serde(default)]
    pub history_cardiac: bool,
    #[serde(default)]
    pub history_stroke: bool,
    #[serde(default)]
    pub immuno_compromised: bool,
}

impl HistoryFlags {
    pub fn any(self) -> bool {
        self.history_cardiac || self.history_stroke || self.immuno_compromised
    }
}

/// Raw triage submission, exactly as received from the intake layer.
///
/// Everything here is untrusted: age and gender may be absent, the
/// complaint may be blank, vitals may be strings. `normalize` turns this
/// into a [`PatientInput`] or rejects it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriageRequest {
    pub age: Option<f64>,
    pub gender: Option<String>,
    #[serde(default)]
    pub chief_complaint_text: String,
    #[serde(default)]
    pub vitals: RawVitals,
    // `red_flag_history` is the name older intake clients send.
    #[serde(default, alias = "red_flag_history")]
    pub red_flags: HistoryFlags,
}

/// Canonical patient input produced by the normalizer. Downstream rule
/// code can rely on every field being validated and in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    /// Age in years; fractional for infants (0.5 = six months).
    pub age: f64,
    pub gender: Gender,
    pub chief_complaint: String,
    pub vitals: Vitals,
    pub history: HistoryFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parse_is_lenient_about_case_and_whitespace() {
        assert_eq!(Gender::parse(" MALE "), Some(Gender::Male));
        assert_eq!(Gender::parse("Female"), Some(Gender::Female));
        assert_eq!(Gender::parse("other"), None);
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn gender_serializes_snake_case() {
        assert_eq!(serde_json::to_value(Gender::Male).unwrap(), "male");
        assert_eq!(serde_json::to_value(Gender::Female).unwrap(), "female");
    }

    #[test]
    fn history_flags_default_to_false() {
        let flags: HistoryFlags = serde_json::from_str("{}").unwrap();
        assert!(!flags.any());
    }

    #[test]
    fn request_accepts_legacy_red_flag_history_key() {
        let raw = r#"{
            "age": 60,
            "gender": "male",
            "chief_complaint_text": "chest pain",
            "red_flag_history": {"history_cardiac": true}
        }"#;
        let request: TriageRequest = serde_json::from_str(raw).unwrap();
        assert!(request.red_flags.history_cardiac);
        assert!(!request.red_flags.history_stroke);
    }

    #[test]
    fn request_tolerates_missing_everything() {
        let request: TriageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.age, None);
        assert_eq!(request.gender, None);
        assert!(request.chief_complaint_text.is_empty());
    }
}
