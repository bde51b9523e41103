//! The deterministic triage engine.
//!
//! Pipeline: normalize → red-flag detection → layered evaluation →
//! composed result. The engine holds no state; identical input always
//! yields an identical result.

use crate::ai::orchestrator::AiOutcome;
use crate::models::{PatientInput, TriageLevel, TriageRequest, TriageResult};

use super::compose::compose;
use super::normalize::normalize;
use super::red_flags::detect_red_flags;
use super::rules::evaluate;
use super::types::{Assessment, Evaluation, LayerMatch, RuleLayer, ValidationError};

#[derive(Debug, Default)]
pub struct TriageEngine;

impl TriageEngine {
    pub fn new() -> Self {
        Self
    }

    /// Rule-only triage of a raw submission.
    pub fn triage(&self, raw: &TriageRequest) -> Result<TriageResult, ValidationError> {
        let patient = normalize(raw)?;
        let assessment = self.assess(&patient);
        Ok(self.finish(&assessment, None))
    }

    /// Red-flag detection plus layered evaluation of a normalized patient.
    ///
    /// If the evaluator ever yields no layer at all (the default layer
    /// makes this unreachable), the patient is routed to manual review at
    /// level 3 rather than dropped.
    pub fn assess(&self, patient: &PatientInput) -> Assessment {
        let red_flags = detect_red_flags(patient);
        let evaluation = evaluate(patient, &red_flags);

        if evaluation.matches.is_empty() {
            tracing::error!(
                age = patient.age,
                "evaluation produced no rule layer; routing to manual review"
            );
            return Assessment {
                evaluation: Evaluation {
                    level: TriageLevel::Urgent,
                    matches: vec![LayerMatch {
                        layer: RuleLayer::ManualReview,
                        level: TriageLevel::Urgent,
                        reasons: vec![
                            "unable to fully classify; manual review required".to_string(),
                        ],
                    }],
                },
                red_flags,
                fault: true,
            };
        }

        tracing::info!(
            level = evaluation.level.as_u8(),
            layers = evaluation.matches.len(),
            red_flags = red_flags.len(),
            "triage evaluation complete"
        );

        Assessment {
            evaluation,
            red_flags,
            fault: false,
        }
    }

    /// Compose the final result from an assessment and an optional AI
    /// outcome.
    pub fn finish(&self, assessment: &Assessment, ai: Option<&AiOutcome>) -> TriageResult {
        compose(assessment, ai)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Confidence, HistoryFlags, RawVitals};

    fn request(age: f64, gender: &str, complaint: &str) -> TriageRequest {
        TriageRequest {
            age: Some(age),
            gender: Some(gender.to_string()),
            chief_complaint_text: complaint.to_string(),
            vitals: RawVitals::default(),
            red_flags: HistoryFlags::default(),
        }
    }

    fn engine() -> TriageEngine {
        TriageEngine::new()
    }

    #[test]
    fn mild_complaint_with_normal_vitals_is_non_urgent() {
        let mut raw = request(45.0, "male", "mild headache");
        raw.vitals.spo2 = Some(97.0);
        raw.vitals.sbp = Some(120.0);
        let result = engine().triage(&raw).unwrap();
        assert_eq!(result.level, TriageLevel::NonUrgent);
        assert_eq!(result.confidence, Confidence::High);
        assert!(result.red_flags.is_empty());
        assert!(!result.reasoning.is_empty());
        assert_eq!(result.color_code, "#3b82f6");
    }

    #[test]
    fn comatose_gcs_dominates_everything() {
        let mut raw = request(30.0, "female", "not responding to questions");
        raw.vitals.gcs = Some(8.0);
        let result = engine().triage(&raw).unwrap();
        assert_eq!(result.level, TriageLevel::Resuscitation);
        assert!(result.reasoning.iter().any(|r| r.contains("comatose")));
        assert_eq!(result.time_to_physician, "immediate");
    }

    #[test]
    fn severe_bradycardia_is_resuscitation() {
        let mut raw = request(60.0, "male", "feeling very tired");
        raw.vitals.hr = Some(35.0);
        let result = engine().triage(&raw).unwrap();
        assert_eq!(result.level, TriageLevel::Resuscitation);
        assert!(result.reasoning.iter().any(|r| r.contains("heart rate 35")));
    }

    #[test]
    fn severe_hypoxia_is_resuscitation() {
        let mut raw = request(50.0, "female", "can't breathe");
        raw.vitals.spo2 = Some(85.0);
        let result = engine().triage(&raw).unwrap();
        assert_eq!(result.level, TriageLevel::Resuscitation);
        assert!(result.reasoning.iter().any(|r| r.contains("hypoxia")));
    }

    #[test]
    fn shock_range_blood_pressure_is_resuscitation() {
        let mut raw = request(40.0, "male", "bleeding heavily after injury");
        raw.vitals.sbp = Some(70.0);
        let result = engine().triage(&raw).unwrap();
        assert_eq!(result.level, TriageLevel::Resuscitation);
        assert!(result.reasoning.iter().any(|r| r.contains("shock")));
    }

    #[test]
    fn cardiac_history_with_chest_pain_is_emergent_with_flags() {
        let mut raw = request(58.0, "male", "chest pain radiating to my arm");
        raw.red_flags.history_cardiac = true;
        let result = engine().triage(&raw).unwrap();
        assert_eq!(result.level, TriageLevel::Emergent);
        assert_eq!(result.red_flags.len(), 1);
        assert!(result.red_flags[0].contains("coronary"));
        // Chest pain also matched the resource layer, so two layers agree.
        assert_eq!(result.confidence, Confidence::Medium);
    }

    #[test]
    fn chest_pain_without_history_is_urgent_not_emergent() {
        let result = engine()
            .triage(&request(58.0, "male", "chest pain radiating to my arm"))
            .unwrap();
        assert_eq!(result.level, TriageLevel::Urgent);
        assert!(result.red_flags.is_empty());
    }

    #[test]
    fn history_flag_never_lowers_a_verdict() {
        let base = request(58.0, "male", "chest pain radiating to my arm");
        let without = engine().triage(&base).unwrap();

        let mut flagged = base.clone();
        flagged.red_flags.history_cardiac = true;
        let with = engine().triage(&flagged).unwrap();

        assert!(with.level <= without.level);
    }

    #[test]
    fn infant_fever_with_fast_breathing_is_emergent() {
        let mut raw = request(0.5, "female", "سخونية من امبارح");
        raw.vitals.temp = Some(39.5);
        raw.vitals.rr = Some(55.0);
        let result = engine().triage(&raw).unwrap();
        assert_eq!(result.level, TriageLevel::Emergent);
    }

    #[test]
    fn infant_critical_tachypnea_is_resuscitation() {
        let mut raw = request(0.5, "female", "سخونية من امبارح");
        raw.vitals.rr = Some(65.0);
        let result = engine().triage(&raw).unwrap();
        assert_eq!(result.level, TriageLevel::Resuscitation);
    }

    #[test]
    fn abdominal_pain_with_fever_is_urgent() {
        let mut raw = request(25.0, "female", "stomach pain and fever for two days");
        raw.vitals.temp = Some(38.5);
        raw.vitals.pain_score = Some(5.0);
        let result = engine().triage(&raw).unwrap();
        assert_eq!(result.level, TriageLevel::Urgent);
        assert_eq!(result.time_to_physician, "within 60 minutes");
    }

    #[test]
    fn arabic_trauma_and_cramps_complaint_is_urgent() {
        let result = engine()
            .triage(&request(33.0, "male", "وقعت من السلم وعندي مغص"))
            .unwrap();
        assert_eq!(result.level, TriageLevel::Urgent);
    }

    #[test]
    fn altered_gcs_alone_is_less_urgent() {
        let mut raw = request(40.0, "male", "feeling off today");
        raw.vitals.gcs = Some(12.0);
        let result = engine().triage(&raw).unwrap();
        assert_eq!(result.level, TriageLevel::LessUrgent);
    }

    #[test]
    fn elderly_altered_gcs_is_emergent() {
        let mut raw = request(82.0, "female", "feeling off today");
        raw.vitals.gcs = Some(12.0);
        let result = engine().triage(&raw).unwrap();
        assert_eq!(result.level, TriageLevel::Emergent);
    }

    #[test]
    fn identical_input_yields_identical_results() {
        let mut raw = request(58.0, "male", "chest pain and fever");
        raw.red_flags.history_cardiac = true;
        raw.vitals.hr = Some(105.0);
        let first = engine().triage(&raw).unwrap();
        let second = engine().triage(&raw).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn every_result_is_within_level_bounds_with_reasoning() {
        let requests = vec![
            request(30.0, "male", "mild headache"),
            request(0.4, "female", "سخونية"),
            request(90.0, "male", "chest pain"),
            request(7.0, "female", "fell off a bike, ankle hurts"),
            request(45.0, "male", "انتحار"),
        ];
        for raw in requests {
            let result = engine().triage(&raw).unwrap();
            assert!((1..=5).contains(&result.level.as_u8()));
            assert!(!result.reasoning.is_empty(), "{:?}", result.reasoning);
            assert!(!result.label_ar.is_empty());
            assert!(result.ai_data.is_none());
        }
    }

    #[test]
    fn validation_failures_surface_as_errors() {
        let err = engine().triage(&request(30.0, "male", "   ")).unwrap_err();
        assert_eq!(err, ValidationError::EmptyComplaint);

        let mut raw = request(30.0, "male", "pain");
        raw.age = None;
        assert_eq!(engine().triage(&raw).unwrap_err(), ValidationError::MissingAge);
    }
}
