//! Intake validation and coercion.
//!
//! Turns an untrusted [`TriageRequest`] into a canonical [`PatientInput`]
//! the rule layers can rely on, or rejects it with a [`ValidationError`].

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Gender, PatientInput, TriageRequest, Vitals};

use super::types::ValidationError;

pub const GCS_MIN: u8 = 3;
pub const GCS_MAX: u8 = 15;
pub const PAIN_MIN: u8 = 0;
pub const PAIN_MAX: u8 = 10;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Trim and collapse runs of internal whitespace to single spaces.
pub(crate) fn canonical_text(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// A vital counts as measured only when finite and non-negative. Sensor
/// glitches and sentinel values (-1, NaN) read as "not measured".
fn measured(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

fn clamp_scale(value: Option<f64>, default: u8, min: u8, max: u8) -> u8 {
    match measured(value) {
        Some(v) => (v.round() as i64).clamp(i64::from(min), i64::from(max)) as u8,
        None => default,
    }
}

/// Validate and coerce a raw submission into canonical [`PatientInput`].
pub fn normalize(raw: &TriageRequest) -> Result<PatientInput, ValidationError> {
    let age = raw.age.ok_or(ValidationError::MissingAge)?;
    if !age.is_finite() || age < 0.0 {
        return Err(ValidationError::InvalidAge(age));
    }

    let gender_raw = raw.gender.as_deref().unwrap_or("");
    let gender = Gender::parse(gender_raw)
        .ok_or_else(|| ValidationError::InvalidGender(gender_raw.to_string()))?;

    let chief_complaint = canonical_text(&raw.chief_complaint_text);
    if chief_complaint.is_empty() {
        return Err(ValidationError::EmptyComplaint);
    }

    let v = &raw.vitals;
    let vitals = Vitals {
        heart_rate: measured(v.hr),
        respiratory_rate: measured(v.rr),
        spo2: measured(v.spo2),
        temperature: measured(v.temp),
        systolic_bp: measured(v.sbp),
        diastolic_bp: measured(v.dbp),
        gcs: clamp_scale(v.gcs, GCS_MAX, GCS_MIN, GCS_MAX),
        pain_score: clamp_scale(v.pain_score, PAIN_MIN, PAIN_MIN, PAIN_MAX),
    };

    Ok(PatientInput {
        age,
        gender,
        chief_complaint,
        vitals,
        history: raw.red_flags,
    })
}

/// Append a voice transcript to the complaint and re-canonicalize, so the
/// extended text goes through the same whitespace rules as typed input.
pub fn append_transcript(patient: &PatientInput, transcript: &str) -> PatientInput {
    let mut updated = patient.clone();
    updated.chief_complaint =
        canonical_text(&format!("{} {}", patient.chief_complaint, transcript));
    updated
}
