//! Deterministic Emergency Severity Index triage: intake normalization,
//! bilingual red-flag detection, layered rule evaluation, and result
//! composition.

pub mod compose;
pub mod engine;
pub mod keywords;
pub mod normalize;
pub mod red_flags;
pub mod rules;
pub mod thresholds;
pub mod types;

pub use engine::TriageEngine;
pub use types::{
    Assessment, Evaluation, LayerMatch, RedFlag, RedFlagTag, RuleLayer, ValidationError,
};
