//! Age-adjusted vital-sign reference bands.
//!
//! Adults (>= 14 years):
//!   HR   abnormal <50 or >100, critical <40 or >150
//!   RR   abnormal <10 or >24, critical <8 or >36
//!   SpO2 abnormal 90..94, critical <90
//!   SBP  abnormal <90 or >180, critical <80 or >220
//!   Temp abnormal <36 or >39, critical <35 or >41
//!   GCS  abnormal 9..15, critical <9
//! Children use the bradycardia/bradypnea floors plus the infant (<1y) and
//! young-child (<5y) upper cutoffs below; SpO2, SBP and GCS bands are
//! age-independent. Threshold values pending clinical sign-off.

/// Patients at or above this age use adult reference ranges.
pub const ADULT_AGE_YEARS: f64 = 14.0;
/// Below this age, infant reference ranges apply.
pub const INFANT_AGE_YEARS: f64 = 1.0;
/// Below this age (and at or above infant age), young-child ranges apply.
pub const YOUNG_CHILD_AGE_YEARS: f64 = 5.0;

/// Classification of one measured vital against its reference ranges.
/// Ordering is by severity, so `band >= Abnormal` means "off normal".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VitalBand {
    Normal,
    Abnormal,
    Critical,
}

pub fn heart_rate_band(age: f64, hr: f64) -> VitalBand {
    if age >= ADULT_AGE_YEARS {
        if hr < 40.0 || hr > 150.0 {
            VitalBand::Critical
        } else if hr < 50.0 || hr > 100.0 {
            VitalBand::Abnormal
        } else {
            VitalBand::Normal
        }
    } else if hr < 60.0 {
        // Bradycardia floor for any child.
        VitalBand::Critical
    } else if age < INFANT_AGE_YEARS {
        if hr > 180.0 {
            VitalBand::Critical
        } else if hr > 160.0 {
            VitalBand::Abnormal
        } else {
            VitalBand::Normal
        }
    } else if age < YOUNG_CHILD_AGE_YEARS {
        if hr > 160.0 {
            VitalBand::Critical
        } else if hr > 140.0 {
            VitalBand::Abnormal
        } else {
            VitalBand::Normal
        }
    } else {
        VitalBand::Normal
    }
}

pub fn respiratory_rate_band(age: f64, rr: f64) -> VitalBand {
    if age >= ADULT_AGE_YEARS {
        if rr < 8.0 || rr > 36.0 {
            VitalBand::Critical
        } else if rr < 10.0 || rr > 24.0 {
            VitalBand::Abnormal
        } else {
            VitalBand::Normal
        }
    } else if rr < 10.0 {
        VitalBand::Critical
    } else if age < INFANT_AGE_YEARS {
        if rr > 60.0 {
            VitalBand::Critical
        } else if rr > 50.0 {
            VitalBand::Abnormal
        } else {
            VitalBand::Normal
        }
    } else if age < YOUNG_CHILD_AGE_YEARS {
        if rr > 50.0 {
            VitalBand::Critical
        } else if rr > 40.0 {
            VitalBand::Abnormal
        } else {
            VitalBand::Normal
        }
    } else {
        VitalBand::Normal
    }
}

/// SpO2 bands are the same for all ages.
pub fn spo2_band(spo2: f64) -> VitalBand {
    if spo2 < 90.0 {
        VitalBand::Critical
    } else if spo2 < 94.0 {
        VitalBand::Abnormal
    } else {
        VitalBand::Normal
    }
}

/// Systolic blood pressure bands are the same for all ages.
pub fn systolic_bp_band(sbp: f64) -> VitalBand {
    if sbp < 80.0 || sbp > 220.0 {
        VitalBand::Critical
    } else if sbp < 90.0 || sbp > 180.0 {
        VitalBand::Abnormal
    } else {
        VitalBand::Normal
    }
}

/// Body temperature in degrees Celsius. The critical band is shared;
/// children only flag the febrile side as abnormal.
pub fn temperature_band(age: f64, temp: f64) -> VitalBand {
    if temp < 35.0 || temp > 41.0 {
        VitalBand::Critical
    } else if age >= ADULT_AGE_YEARS {
        if temp < 36.0 || temp > 39.0 {
            VitalBand::Abnormal
        } else {
            VitalBand::Normal
        }
    } else if temp > 39.0 {
        VitalBand::Abnormal
    } else {
        VitalBand::Normal
    }
}

/// Glasgow Coma Scale, age-independent.
pub fn gcs_band(gcs: u8) -> VitalBand {
    if gcs < 9 {
        VitalBand::Critical
    } else if gcs < 15 {
        VitalBand::Abnormal
    } else {
        VitalBand::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use VitalBand::{Abnormal, Critical, Normal};

    #[test]
    fn band_ordering_reflects_severity() {
        assert!(Normal < Abnormal);
        assert!(Abnormal < Critical);
        assert!(Abnormal >= Abnormal);
    }

    #[test]
    fn adult_heart_rate_bands() {
        assert_eq!(heart_rate_band(40.0, 72.0), Normal);
        assert_eq!(heart_rate_band(40.0, 45.0), Abnormal);
        assert_eq!(heart_rate_band(40.0, 110.0), Abnormal);
        assert_eq!(heart_rate_band(40.0, 35.0), Critical);
        assert_eq!(heart_rate_band(40.0, 155.0), Critical);
        // Boundary: 150 is abnormal, not critical.
        assert_eq!(heart_rate_band(40.0, 150.0), Abnormal);
    }

    #[test]
    fn child_bradycardia_floor_applies_at_any_age_below_adult() {
        assert_eq!(heart_rate_band(0.5, 55.0), Critical);
        assert_eq!(heart_rate_band(4.0, 55.0), Critical);
        assert_eq!(heart_rate_band(10.0, 55.0), Critical);
        assert_eq!(heart_rate_band(14.0, 55.0), Normal);
    }

    #[test]
    fn infant_and_young_child_tachycardia_cutoffs() {
        assert_eq!(heart_rate_band(0.5, 170.0), Abnormal);
        assert_eq!(heart_rate_band(0.5, 185.0), Critical);
        assert_eq!(heart_rate_band(3.0, 150.0), Abnormal);
        assert_eq!(heart_rate_band(3.0, 165.0), Critical);
        // Ages 5-13 only carry the bradycardia floor.
        assert_eq!(heart_rate_band(9.0, 150.0), Normal);
    }

    #[test]
    fn adult_respiratory_rate_bands() {
        assert_eq!(respiratory_rate_band(30.0, 16.0), Normal);
        assert_eq!(respiratory_rate_band(30.0, 9.0), Abnormal);
        assert_eq!(respiratory_rate_band(30.0, 28.0), Abnormal);
        assert_eq!(respiratory_rate_band(30.0, 4.0), Critical);
        assert_eq!(respiratory_rate_band(30.0, 40.0), Critical);
    }

    #[test]
    fn pediatric_respiratory_rate_bands() {
        assert_eq!(respiratory_rate_band(0.5, 45.0), Normal);
        assert_eq!(respiratory_rate_band(0.5, 55.0), Abnormal);
        assert_eq!(respiratory_rate_band(0.5, 65.0), Critical);
        assert_eq!(respiratory_rate_band(3.0, 45.0), Abnormal);
        assert_eq!(respiratory_rate_band(3.0, 55.0), Critical);
        assert_eq!(respiratory_rate_band(8.0, 8.0), Critical);
    }

    #[test]
    fn spo2_bands_ignore_age() {
        for age in [0.5, 4.0, 40.0] {
            assert_eq!(spo2_band(97.0), Normal, "age {age}");
            assert_eq!(spo2_band(93.0), Abnormal, "age {age}");
            assert_eq!(spo2_band(85.0), Critical, "age {age}");
        }
        assert_eq!(spo2_band(94.0), Normal);
        assert_eq!(spo2_band(90.0), Abnormal);
    }

    #[test]
    fn systolic_bp_bands() {
        assert_eq!(systolic_bp_band(120.0), Normal);
        assert_eq!(systolic_bp_band(85.0), Abnormal);
        assert_eq!(systolic_bp_band(190.0), Abnormal);
        assert_eq!(systolic_bp_band(70.0), Critical);
        assert_eq!(systolic_bp_band(230.0), Critical);
    }

    #[test]
    fn temperature_bands_by_age() {
        assert_eq!(temperature_band(30.0, 37.0), Normal);
        assert_eq!(temperature_band(30.0, 35.5), Abnormal);
        assert_eq!(temperature_band(30.0, 39.5), Abnormal);
        assert_eq!(temperature_band(30.0, 34.0), Critical);
        assert_eq!(temperature_band(30.0, 41.5), Critical);
        // Children: only the febrile side is abnormal.
        assert_eq!(temperature_band(3.0, 35.5), Normal);
        assert_eq!(temperature_band(3.0, 39.5), Abnormal);
        assert_eq!(temperature_band(3.0, 34.0), Critical);
    }

    #[test]
    fn gcs_bands() {
        assert_eq!(gcs_band(15), Normal);
        assert_eq!(gcs_band(12), Abnormal);
        assert_eq!(gcs_band(9), Abnormal);
        assert_eq!(gcs_band(8), Critical);
        assert_eq!(gcs_band(3), Critical);
    }
}
