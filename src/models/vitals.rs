use serde::{Deserialize, Deserializer, Serialize};

/// Vital signs as submitted over the wire.
///
/// Intake forms send whatever the nurse managed to capture: numbers,
/// numeric strings, empty strings, nulls. Anything that does not parse as
/// a number is carried as "unmeasured" — never coerced to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVitals {
    #[serde(default, deserialize_with = "lenient_number")]
    pub hr: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rr: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub spo2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sbp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub dbp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub gcs: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pain_score: Option<f64>,
}

/// Accept a JSON number or a numeric string; anything else is unmeasured.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Canonical vitals after normalization.
///
/// Measured values are `Some`; "unmeasured" stays `None` and is never
/// conflated with zero. GCS and pain score always carry a value (clamped,
/// with defaults of 15 and 0 respectively).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub heart_rate: Option<f64>,
    pub respiratory_rate: Option<f64>,
    pub spo2: Option<f64>,
    pub temperature: Option<f64>,
    pub systolic_bp: Option<f64>,
    pub diastolic_bp: Option<f64>,
    pub gcs: u8,
    pub pain_score: u8,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            heart_rate: None,
            respiratory_rate: None,
            spo2: None,
            temperature: None,
            systolic_bp: None,
            diastolic_bp: None,
            gcs: 15,
            pain_score: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RawVitals {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn numbers_are_taken_as_is() {
        let v = parse(r#"{"hr": 88, "spo2": 96.5}"#);
        assert_eq!(v.hr, Some(88.0));
        assert_eq!(v.spo2, Some(96.5));
    }

    #[test]
    fn numeric_strings_are_parsed() {
        let v = parse(r#"{"rr": " 22 ", "gcs": "12"}"#);
        assert_eq!(v.rr, Some(22.0));
        assert_eq!(v.gcs, Some(12.0));
    }

    #[test]
    fn junk_and_null_become_unmeasured() {
        let v = parse(r#"{"hr": "n/a", "rr": null, "temp": "", "sbp": true}"#);
        assert_eq!(v.hr, None);
        assert_eq!(v.rr, None);
        assert_eq!(v.temp, None);
        assert_eq!(v.sbp, None);
    }

    #[test]
    fn missing_fields_are_unmeasured() {
        let v = parse("{}");
        assert_eq!(v.hr, None);
        assert_eq!(v.gcs, None);
        assert_eq!(v.pain_score, None);
    }

    #[test]
    fn zero_is_a_measurement_not_unmeasured() {
        let v = parse(r#"{"pain_score": 0}"#);
        assert_eq!(v.pain_score, Some(0.0));
    }

    #[test]
    fn canonical_defaults() {
        let v = Vitals::default();
        assert_eq!(v.gcs, 15);
        assert_eq!(v.pain_score, 0);
        assert_eq!(v.heart_rate, None);
    }
}
