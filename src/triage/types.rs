use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::TriageLevel;

/// Why a raw submission was rejected before evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("age is required")]
    MissingAge,
    #[error("age must be a finite, non-negative number of years (got {0})")]
    InvalidAge(f64),
    #[error("gender must be \"male\" or \"female\" (got {0:?})")]
    InvalidGender(String),
    #[error("chief complaint must not be empty")]
    EmptyComplaint,
}

/// Tag identifying a detected high-risk pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlagTag {
    AcsSuspected,
    CvaSuspected,
    SepsisRisk,
}

impl RedFlagTag {
    pub fn as_str(self) -> &'static str {
        match self {
            RedFlagTag::AcsSuspected => "acs_suspected",
            RedFlagTag::CvaSuspected => "cva_suspected",
            RedFlagTag::SepsisRisk => "sepsis_risk",
        }
    }
}

/// A detected high-risk pattern: a history flag plus complaint evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlag {
    pub tag: RedFlagTag,
    /// Human-readable justification, quoted verbatim in the final result.
    pub justification: String,
}

/// The rule layer that proposed a candidate level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleLayer {
    ImmediateThreat,
    HighRisk,
    ResourceIntensive,
    MildlyAbnormal,
    Default,
    ManualReview,
}

impl RuleLayer {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleLayer::ImmediateThreat => "immediate_threat",
            RuleLayer::HighRisk => "high_risk",
            RuleLayer::ResourceIntensive => "resource_intensive",
            RuleLayer::MildlyAbnormal => "mildly_abnormal",
            RuleLayer::Default => "default",
            RuleLayer::ManualReview => "manual_review",
        }
    }
}

/// One matched rule layer with its proposed level and explanations.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerMatch {
    pub layer: RuleLayer,
    pub level: TriageLevel,
    pub reasons: Vec<String>,
}

/// Outcome of the layered evaluation: the most urgent proposed level plus
/// every matching layer, kept in layer order.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub level: TriageLevel,
    pub matches: Vec<LayerMatch>,
}

impl Evaluation {
    /// Concatenated explanations, most urgent layer first.
    pub fn reasoning(&self) -> Vec<String> {
        self.matches
            .iter()
            .flat_map(|m| m.reasons.iter().cloned())
            .collect()
    }
}

/// Full deterministic assessment of one patient.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub evaluation: Evaluation,
    pub red_flags: Vec<RedFlag>,
    /// Set when the evaluator produced no layers and the manual-review
    /// fallback fired. Cannot happen while the default layer exists.
    pub fault: bool,
}
