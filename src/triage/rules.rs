//! Layered rule evaluation.
//!
//! Each layer inspects the whole patient and may propose a candidate level
//! with explanations. Layers never suppress one another: every matching
//! layer contributes its reasons, and the most urgent proposed level wins.

use crate::models::{PatientInput, TriageLevel};

use super::keywords::categorize;
use super::thresholds::{
    gcs_band, heart_rate_band, respiratory_rate_band, spo2_band, systolic_bp_band,
    temperature_band, VitalBand,
};
use super::types::{Evaluation, LayerMatch, RedFlag, RuleLayer};

/// Age above which any off-normal vital escalates risk.
pub const HIGH_RISK_AGE_OVER: f64 = 75.0;
/// Age below which any off-normal vital escalates risk.
pub const HIGH_RISK_AGE_UNDER: f64 = 3.0;
/// Pain score at or above which pain counts as severe.
pub const SEVERE_PAIN: u8 = 7;
/// Inclusive moderate-pain range handled by the mildly-abnormal layer.
pub const MODERATE_PAIN_LOW: u8 = 4;
pub const MODERATE_PAIN_HIGH: u8 = 6;
/// Estimated resource count at or above which a case is resource-intensive.
pub const RESOURCE_INTENSIVE_MIN: u32 = 2;

/// One measured vital with its band classification.
#[derive(Debug, Clone)]
pub(crate) struct VitalFinding {
    pub label: &'static str,
    pub detail: String,
    pub band: VitalBand,
}

/// Classify every measured vital. GCS always yields a finding since the
/// normalizer guarantees it a value.
pub(crate) fn vital_findings(patient: &PatientInput) -> Vec<VitalFinding> {
    let age = patient.age;
    let v = &patient.vitals;
    let mut findings = Vec::new();

    if let Some(hr) = v.heart_rate {
        findings.push(VitalFinding {
            label: "heart rate",
            detail: format!("heart rate {hr:.0}/min"),
            band: heart_rate_band(age, hr),
        });
    }
    if let Some(rr) = v.respiratory_rate {
        findings.push(VitalFinding {
            label: "respiratory rate",
            detail: format!("respiratory rate {rr:.0}/min"),
            band: respiratory_rate_band(age, rr),
        });
    }
    if let Some(spo2) = v.spo2 {
        findings.push(VitalFinding {
            label: "SpO2",
            detail: format!("SpO2 {spo2:.0}%"),
            band: spo2_band(spo2),
        });
    }
    if let Some(sbp) = v.systolic_bp {
        findings.push(VitalFinding {
            label: "systolic BP",
            detail: format!("systolic BP {sbp:.0} mmHg"),
            band: systolic_bp_band(sbp),
        });
    }
    if let Some(temp) = v.temperature {
        findings.push(VitalFinding {
            label: "temperature",
            detail: format!("temperature {temp:.1} C"),
            band: temperature_band(age, temp),
        });
    }
    findings.push(VitalFinding {
        label: "GCS",
        detail: format!("GCS {}", v.gcs),
        band: gcs_band(v.gcs),
    });

    findings
}

/// Layer 1: immediately life-threatening vitals. Unmeasured vitals never
/// trigger this layer.
fn immediate_threat(patient: &PatientInput) -> Option<LayerMatch> {
    let age = patient.age;
    let v = &patient.vitals;
    let mut reasons = Vec::new();

    if v.gcs < 9 {
        reasons.push(format!("GCS {} indicates comatose state (below 9)", v.gcs));
    }
    if let Some(rr) = v.respiratory_rate {
        if respiratory_rate_band(age, rr) == VitalBand::Critical {
            reasons.push(format!(
                "respiratory rate {rr:.0}/min in life-threatening range for age"
            ));
        }
    }
    if let Some(hr) = v.heart_rate {
        if heart_rate_band(age, hr) == VitalBand::Critical {
            reasons.push(format!(
                "heart rate {hr:.0}/min in life-threatening range for age"
            ));
        }
    }
    if let Some(spo2) = v.spo2 {
        if spo2_band(spo2) == VitalBand::Critical {
            reasons.push(format!("severe hypoxia: SpO2 {spo2:.0}% (below 90%)"));
        }
    }
    if let Some(sbp) = v.systolic_bp {
        if systolic_bp_band(sbp) == VitalBand::Critical {
            if sbp < 80.0 {
                reasons.push(format!("shock-range systolic BP {sbp:.0} mmHg"));
            } else {
                reasons.push(format!("hypertensive crisis: systolic BP {sbp:.0} mmHg"));
            }
        }
    }
    if let Some(temp) = v.temperature {
        if temperature_band(age, temp) == VitalBand::Critical {
            if temp < 35.0 {
                reasons.push(format!("severe hypothermia: temperature {temp:.1} C"));
            } else {
                reasons.push(format!("extreme hyperthermia: temperature {temp:.1} C"));
            }
        }
    }

    (!reasons.is_empty()).then(|| LayerMatch {
        layer: RuleLayer::ImmediateThreat,
        level: TriageLevel::Resuscitation,
        reasons,
    })
}

/// Layer 2: high-risk presentations. Red flags, severe pain with unstable
/// vitals, or age extremes with any off-normal vital.
fn high_risk(
    patient: &PatientInput,
    red_flags: &[RedFlag],
    findings: &[VitalFinding],
) -> Option<LayerMatch> {
    let mut reasons = Vec::new();

    for flag in red_flags {
        reasons.push(flag.justification.clone());
    }

    let any_off_normal = findings.iter().any(|f| f.band >= VitalBand::Abnormal);

    if patient.vitals.pain_score >= SEVERE_PAIN && any_off_normal {
        reasons.push(format!(
            "severe pain {}/10 with unstable vital signs",
            patient.vitals.pain_score
        ));
    }

    let age_extreme = patient.age < HIGH_RISK_AGE_UNDER || patient.age > HIGH_RISK_AGE_OVER;
    if age_extreme && any_off_normal {
        let off: Vec<&str> = findings
            .iter()
            .filter(|f| f.band >= VitalBand::Abnormal)
            .map(|f| f.label)
            .collect();
        reasons.push(format!(
            "high-risk age {:.1} years with off-normal vitals ({})",
            patient.age,
            off.join(", ")
        ));
    }

    (!reasons.is_empty()).then(|| LayerMatch {
        layer: RuleLayer::HighRisk,
        level: TriageLevel::Emergent,
        reasons,
    })
}

/// Layer 3: resource-intensive presentations. Complaint categories carry
/// fixed resource weights; each mildly abnormal vital adds one more.
/// Critical vitals do not count here, layer 1 already owns them.
fn resource_intensive(patient: &PatientInput, findings: &[VitalFinding]) -> Option<LayerMatch> {
    let categories = categorize(&patient.chief_complaint);
    let category_total: u32 = categories.iter().map(|c| c.resource_weight()).sum();
    let abnormal_count = findings
        .iter()
        .filter(|f| f.band == VitalBand::Abnormal)
        .count() as u32;
    let total = category_total + abnormal_count;

    if total < RESOURCE_INTENSIVE_MIN {
        return None;
    }

    let mut drivers: Vec<String> = categories.iter().map(|c| c.as_str().to_string()).collect();
    if abnormal_count > 0 {
        drivers.push(format!("{abnormal_count} abnormal vital(s)"));
    }

    Some(LayerMatch {
        layer: RuleLayer::ResourceIntensive,
        level: TriageLevel::Urgent,
        reasons: vec![format!(
            "estimated {total} diagnostic/treatment resources needed ({})",
            drivers.join(", ")
        )],
    })
}

/// Layer 4: a single mildly abnormal vital (with nothing critical), or
/// moderate pain.
fn mildly_abnormal(patient: &PatientInput, findings: &[VitalFinding]) -> Option<LayerMatch> {
    let mut reasons = Vec::new();

    let critical_count = findings
        .iter()
        .filter(|f| f.band == VitalBand::Critical)
        .count();
    let abnormal: Vec<&VitalFinding> = findings
        .iter()
        .filter(|f| f.band == VitalBand::Abnormal)
        .collect();

    if critical_count == 0 && abnormal.len() == 1 {
        reasons.push(format!("single mildly abnormal vital: {}", abnormal[0].detail));
    }

    let pain = patient.vitals.pain_score;
    if (MODERATE_PAIN_LOW..=MODERATE_PAIN_HIGH).contains(&pain) {
        reasons.push(format!("moderate pain {pain}/10"));
    }

    (!reasons.is_empty()).then(|| LayerMatch {
        layer: RuleLayer::MildlyAbnormal,
        level: TriageLevel::LessUrgent,
        reasons,
    })
}

/// Run every layer in order. The most urgent proposed level wins; all
/// matching layers keep their explanations. The default layer guarantees
/// at least one match.
pub fn evaluate(patient: &PatientInput, red_flags: &[RedFlag]) -> Evaluation {
    let findings = vital_findings(patient);

    let mut matches = Vec::new();
    matches.extend(immediate_threat(patient));
    matches.extend(high_risk(patient, red_flags, &findings));
    matches.extend(resource_intensive(patient, &findings));
    matches.extend(mildly_abnormal(patient, &findings));

    if matches.is_empty() {
        matches.push(LayerMatch {
            layer: RuleLayer::Default,
            level: TriageLevel::NonUrgent,
            reasons: vec!["no acuity criteria met; suitable for routine care".to_string()],
        });
    }

    let level = matches
        .iter()
        .map(|m| m.level)
        .min()
        .unwrap_or(TriageLevel::Urgent);

    Evaluation { level, matches }
}
